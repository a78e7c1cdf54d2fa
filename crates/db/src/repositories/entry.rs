//! Entry repository for ledger entry database operations.
//!
//! Every query here is scoped to the owning account: the `user_id`
//! predicate is always the first condition, so no operation can observe
//! or affect another account's rows.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use uuid::Uuid;

use duitku_core::Summary;

use crate::entities::{sea_orm_active_enums::EntryType, transaksi};

/// Error types for entry operations.
#[derive(Debug, thiserror::Error)]
pub enum EntryError {
    /// Entry not found, or not owned by the requesting account. The two
    /// cases are deliberately indistinguishable.
    #[error("Entry not found: {0}")]
    NotFound(Uuid),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Filter options for listing entries.
///
/// Each predicate is applied independently; absent fields contribute no
/// condition at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct EntryFilter {
    /// Inclusive lower bound on the entry date.
    pub start_date: Option<NaiveDate>,
    /// Inclusive upper bound on the entry date.
    pub end_date: Option<NaiveDate>,
    /// Entry type to match.
    pub tipe: Option<EntryType>,
}

/// Input for creating or replacing an entry. Create and Update share the
/// same body shape.
#[derive(Debug, Clone)]
pub struct EntryInput {
    /// Entry date.
    pub tanggal: NaiveDate,
    /// Entry type.
    pub tipe: EntryType,
    /// Positive amount.
    pub jumlah: Decimal,
    /// Optional note.
    pub keterangan: Option<String>,
}

/// Entry repository for CRUD and aggregation.
#[derive(Debug, Clone)]
pub struct EntryRepository {
    db: DatabaseConnection,
}

impl EntryRepository {
    /// Creates a new entry repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists entries for an account with optional filters.
    ///
    /// Predicates are appended in a fixed order: owner, start date, end
    /// date, type. Both date bounds are inclusive. Results are ordered by
    /// entry date descending, then creation time descending.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(
        &self,
        user_id: Uuid,
        filter: EntryFilter,
    ) -> Result<Vec<transaksi::Model>, EntryError> {
        let mut query = transaksi::Entity::find().filter(transaksi::Column::UserId.eq(user_id));

        if let Some(start_date) = filter.start_date {
            query = query.filter(transaksi::Column::Tanggal.gte(start_date));
        }

        if let Some(end_date) = filter.end_date {
            query = query.filter(transaksi::Column::Tanggal.lte(end_date));
        }

        if let Some(tipe) = filter.tipe {
            query = query.filter(transaksi::Column::Tipe.eq(tipe));
        }

        let entries = query
            .order_by_desc(transaksi::Column::Tanggal)
            .order_by_desc(transaksi::Column::CreatedAt)
            .all(&self.db)
            .await?;

        Ok(entries)
    }

    /// Gets a single entry by ID, scoped to the owning account.
    ///
    /// # Errors
    ///
    /// Returns `EntryError::NotFound` whether the row does not exist or
    /// belongs to another account.
    pub async fn find_by_id(
        &self,
        user_id: Uuid,
        entry_id: Uuid,
    ) -> Result<transaksi::Model, EntryError> {
        let entry = transaksi::Entity::find_by_id(entry_id)
            .filter(transaksi::Column::UserId.eq(user_id))
            .one(&self.db)
            .await?
            .ok_or(EntryError::NotFound(entry_id))?;

        Ok(entry)
    }

    /// Creates a new entry owned by the account.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn create(
        &self,
        user_id: Uuid,
        input: EntryInput,
    ) -> Result<transaksi::Model, EntryError> {
        let now = Utc::now().into();

        let entry = transaksi::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id),
            tanggal: Set(input.tanggal),
            tipe: Set(input.tipe),
            jumlah: Set(input.jumlah),
            keterangan: Set(input.keterangan),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let inserted = entry.insert(&self.db).await?;
        Ok(inserted)
    }

    /// Replaces an entry's fields, advancing `updated_at`.
    ///
    /// Only the row matching both the entry ID and the owning account is
    /// touched.
    ///
    /// # Errors
    ///
    /// Returns `EntryError::NotFound` if no such row exists for this
    /// account.
    pub async fn update(
        &self,
        user_id: Uuid,
        entry_id: Uuid,
        input: EntryInput,
    ) -> Result<transaksi::Model, EntryError> {
        let entry = transaksi::Entity::find_by_id(entry_id)
            .filter(transaksi::Column::UserId.eq(user_id))
            .one(&self.db)
            .await?
            .ok_or(EntryError::NotFound(entry_id))?;

        let mut active: transaksi::ActiveModel = entry.into();
        active.tanggal = Set(input.tanggal);
        active.tipe = Set(input.tipe);
        active.jumlah = Set(input.jumlah);
        active.keterangan = Set(input.keterangan);
        active.updated_at = Set(Utc::now().into());

        let updated = active.update(&self.db).await?;
        Ok(updated)
    }

    /// Deletes an entry, scoped to the owning account.
    ///
    /// # Errors
    ///
    /// Returns `EntryError::NotFound` if no row matched both the entry ID
    /// and the account.
    pub async fn delete(&self, user_id: Uuid, entry_id: Uuid) -> Result<(), EntryError> {
        let result = transaksi::Entity::delete_by_id(entry_id)
            .filter(transaksi::Column::UserId.eq(user_id))
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(EntryError::NotFound(entry_id));
        }

        Ok(())
    }

    /// Computes aggregate statistics for an account.
    ///
    /// The date window applies only when both bounds are present; a single
    /// bound applies no window at all. Aggregation is an exact-decimal fold
    /// over the matching `(tipe, jumlah)` pairs, so an empty match yields
    /// the all-zero summary rather than an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn summarize(
        &self,
        user_id: Uuid,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<Summary, EntryError> {
        let mut query = transaksi::Entity::find().filter(transaksi::Column::UserId.eq(user_id));

        if let (Some(start), Some(end)) = (start_date, end_date) {
            query = query
                .filter(transaksi::Column::Tanggal.gte(start))
                .filter(transaksi::Column::Tanggal.lte(end));
        }

        let pairs: Vec<(EntryType, Decimal)> = query
            .select_only()
            .column(transaksi::Column::Tipe)
            .column(transaksi::Column::Jumlah)
            .into_tuple()
            .all(&self.db)
            .await?;

        Ok(Summary::from_entries(
            pairs
                .into_iter()
                .map(|(tipe, jumlah)| (tipe.into(), jumlah)),
        ))
    }
}
