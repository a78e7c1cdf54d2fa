//! Ledger entry routes.
//!
//! Every handler here runs behind the authentication middleware and scopes
//! its repository calls to the authenticated account.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{error, info};
use uuid::Uuid;

use crate::{AppState, middleware::AuthUser};
use duitku_db::{
    entities::{sea_orm_active_enums::EntryType, transaksi},
    repositories::entry::{EntryError, EntryFilter, EntryInput, EntryRepository},
};

/// Creates the transaction routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/transactions", get(list_transactions).post(create_transaction))
        .route("/transactions/summary/stats", get(summary_stats))
        .route(
            "/transactions/{id}",
            get(get_transaction)
                .put(update_transaction)
                .delete(delete_transaction),
        )
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Query parameters for listing transactions.
#[derive(Debug, Deserialize)]
pub struct ListTransactionsQuery {
    /// Inclusive start of the date range (YYYY-MM-DD).
    #[serde(rename = "startDate")]
    pub start_date: Option<NaiveDate>,
    /// Inclusive end of the date range (YYYY-MM-DD).
    #[serde(rename = "endDate")]
    pub end_date: Option<NaiveDate>,
    /// Entry type filter. Unknown values are ignored, not rejected.
    pub tipe: Option<String>,
}

/// Query parameters for the summary endpoint.
#[derive(Debug, Deserialize)]
pub struct SummaryQuery {
    /// Inclusive start of the date window (YYYY-MM-DD).
    #[serde(rename = "startDate")]
    pub start_date: Option<NaiveDate>,
    /// Inclusive end of the date window (YYYY-MM-DD).
    #[serde(rename = "endDate")]
    pub end_date: Option<NaiveDate>,
}

/// Request body shared by create and update.
///
/// All fields are optional at the serde layer so that missing required
/// fields produce this API's own 400 body instead of a deserialization
/// rejection.
#[derive(Debug, Deserialize)]
pub struct TransactionRequest {
    /// Entry date (YYYY-MM-DD).
    pub tanggal: Option<NaiveDate>,
    /// Entry type, strictly "masuk" or "keluar".
    pub tipe: Option<String>,
    /// Positive amount.
    pub jumlah: Option<Decimal>,
    /// Optional free-text note.
    pub keterangan: Option<String>,
}

/// Response for a single transaction.
#[derive(Debug, Serialize)]
pub struct TransactionResponse {
    /// Entry ID.
    pub id: Uuid,
    /// Owning account ID.
    pub user_id: Uuid,
    /// Entry date.
    pub tanggal: NaiveDate,
    /// Entry type.
    pub tipe: EntryType,
    /// Amount.
    pub jumlah: Decimal,
    /// Note.
    pub keterangan: Option<String>,
    /// Created at timestamp.
    pub created_at: String,
    /// Updated at timestamp.
    pub updated_at: String,
}

impl From<transaksi::Model> for TransactionResponse {
    fn from(model: transaksi::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            tanggal: model.tanggal,
            tipe: model.tipe,
            jumlah: model.jumlah,
            keterangan: model.keterangan,
            created_at: model.created_at.to_rfc3339(),
            updated_at: model.updated_at.to_rfc3339(),
        }
    }
}

/// Response for the summary endpoint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryResponse {
    /// Total inflow.
    pub total_masuk: Decimal,
    /// Total outflow.
    pub total_keluar: Decimal,
    /// Net balance.
    pub saldo: Decimal,
    /// Number of inflow entries.
    pub count_masuk: u64,
    /// Number of outflow entries.
    pub count_keluar: u64,
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET `/transactions` - List the account's entries with optional filters.
async fn list_transactions(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<ListTransactionsQuery>,
) -> impl IntoResponse {
    let repo = EntryRepository::new((*state.db).clone());

    match repo.list(auth.user_id(), filter_from_query(query)).await {
        Ok(entries) => {
            let items: Vec<TransactionResponse> =
                entries.into_iter().map(TransactionResponse::from).collect();

            (StatusCode::OK, Json(items)).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to list transactions");
            internal_error("Server error fetching transactions")
        }
    }
}

/// GET `/transactions/{id}` - Get a single entry.
async fn get_transaction(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = EntryRepository::new((*state.db).clone());

    match repo.find_by_id(auth.user_id(), id).await {
        Ok(entry) => (StatusCode::OK, Json(TransactionResponse::from(entry))).into_response(),
        Err(EntryError::NotFound(_)) => not_found(),
        Err(e) => {
            error!(error = %e, "Failed to get transaction");
            internal_error("Server error fetching transaction")
        }
    }
}

/// POST `/transactions` - Create a new entry.
async fn create_transaction(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<TransactionRequest>,
) -> impl IntoResponse {
    let input = match validate_request(payload) {
        Ok(input) => input,
        Err(response) => return response,
    };

    let repo = EntryRepository::new((*state.db).clone());

    match repo.create(auth.user_id(), input).await {
        Ok(entry) => {
            info!(user_id = %auth.user_id(), entry_id = %entry.id, "Transaction created");

            (StatusCode::CREATED, Json(TransactionResponse::from(entry))).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to create transaction");
            internal_error("Server error creating transaction")
        }
    }
}

/// PUT `/transactions/{id}` - Replace an entry's fields.
async fn update_transaction(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<TransactionRequest>,
) -> impl IntoResponse {
    let input = match validate_request(payload) {
        Ok(input) => input,
        Err(response) => return response,
    };

    let repo = EntryRepository::new((*state.db).clone());

    match repo.update(auth.user_id(), id, input).await {
        Ok(entry) => {
            info!(user_id = %auth.user_id(), entry_id = %id, "Transaction updated");

            (StatusCode::OK, Json(TransactionResponse::from(entry))).into_response()
        }
        Err(EntryError::NotFound(_)) => not_found(),
        Err(e) => {
            error!(error = %e, "Failed to update transaction");
            internal_error("Server error updating transaction")
        }
    }
}

/// DELETE `/transactions/{id}` - Delete an entry.
async fn delete_transaction(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = EntryRepository::new((*state.db).clone());

    match repo.delete(auth.user_id(), id).await {
        Ok(()) => {
            info!(user_id = %auth.user_id(), entry_id = %id, "Transaction deleted");

            (
                StatusCode::OK,
                Json(json!({ "message": "Transaction deleted successfully" })),
            )
                .into_response()
        }
        Err(EntryError::NotFound(_)) => not_found(),
        Err(e) => {
            error!(error = %e, "Failed to delete transaction");
            internal_error("Server error deleting transaction")
        }
    }
}

/// GET `/transactions/summary/stats` - Aggregate statistics.
async fn summary_stats(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<SummaryQuery>,
) -> impl IntoResponse {
    let repo = EntryRepository::new((*state.db).clone());

    match repo
        .summarize(auth.user_id(), query.start_date, query.end_date)
        .await
    {
        Ok(summary) => (
            StatusCode::OK,
            Json(SummaryResponse {
                total_masuk: summary.total_masuk,
                total_keluar: summary.total_keluar,
                saldo: summary.saldo,
                count_masuk: summary.count_masuk,
                count_keluar: summary.count_keluar,
            }),
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "Failed to compute summary");
            internal_error("Server error fetching summary")
        }
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Builds the repository filter from list query parameters.
///
/// An out-of-enum `tipe` value parses to `None` and the filter is simply
/// not applied; only the write paths reject unknown types.
fn filter_from_query(query: ListTransactionsQuery) -> EntryFilter {
    EntryFilter {
        start_date: query.start_date,
        end_date: query.end_date,
        tipe: query
            .tipe
            .as_deref()
            .and_then(duitku_core::EntryType::parse_filter)
            .map(EntryType::from),
    }
}

/// Validates a write-path body before any store call.
///
/// `tanggal`, `tipe`, and `jumlah` are required; `tipe` must be exactly one
/// of the two permitted values and `jumlah` must be positive.
fn validate_request(payload: TransactionRequest) -> Result<EntryInput, Response> {
    let (Some(tanggal), Some(tipe), Some(jumlah)) =
        (payload.tanggal, payload.tipe, payload.jumlah)
    else {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "missing_field",
                "message": "Tanggal, tipe, and jumlah are required"
            })),
        )
            .into_response());
    };

    let Ok(tipe) = duitku_core::EntryType::parse_strict(&tipe) else {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "invalid_tipe",
                "message": "Tipe must be either \"masuk\" or \"keluar\""
            })),
        )
            .into_response());
    };

    if jumlah <= Decimal::ZERO {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "invalid_jumlah",
                "message": "Jumlah must be a positive amount"
            })),
        )
            .into_response());
    }

    Ok(EntryInput {
        tanggal,
        tipe: tipe.into(),
        jumlah,
        keterangan: payload.keterangan,
    })
}

fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": "not_found",
            "message": "Transaction not found"
        })),
    )
        .into_response()
}

fn internal_error(message: &str) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({
            "error": "internal_error",
            "message": message
        })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list_query(tipe: Option<&str>) -> ListTransactionsQuery {
        ListTransactionsQuery {
            start_date: None,
            end_date: None,
            tipe: tipe.map(str::to_string),
        }
    }

    #[test]
    fn test_unknown_tipe_filter_is_dropped_not_rejected() {
        let filter = filter_from_query(list_query(Some("bogus")));
        assert_eq!(filter.tipe, None);

        let filter = filter_from_query(list_query(None));
        assert_eq!(filter.tipe, None);
    }

    #[test]
    fn test_valid_tipe_filter_is_applied() {
        let filter = filter_from_query(list_query(Some("masuk")));
        assert_eq!(filter.tipe, Some(EntryType::Masuk));

        let filter = filter_from_query(list_query(Some("keluar")));
        assert_eq!(filter.tipe, Some(EntryType::Keluar));
    }

    #[test]
    fn test_date_bounds_pass_through_independently() {
        let query = ListTransactionsQuery {
            start_date: Some(NaiveDate::from_ymd_opt(2026, 6, 10).unwrap()),
            end_date: None,
            tipe: None,
        };
        let filter = filter_from_query(query);
        assert_eq!(
            filter.start_date,
            Some(NaiveDate::from_ymd_opt(2026, 6, 10).unwrap())
        );
        assert_eq!(filter.end_date, None);
    }
}
