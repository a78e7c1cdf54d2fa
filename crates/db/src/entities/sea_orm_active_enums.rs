//! Active enums backing constrained string columns.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Entry type stored in `transaksi.tipe`.
///
/// The column is VARCHAR(10) with a CHECK constraint on the same two
/// literals, so the restriction holds at the storage layer as well.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(10))")]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    /// Inflow.
    #[sea_orm(string_value = "masuk")]
    Masuk,
    /// Outflow.
    #[sea_orm(string_value = "keluar")]
    Keluar,
}

impl From<duitku_core::EntryType> for EntryType {
    fn from(value: duitku_core::EntryType) -> Self {
        match value {
            duitku_core::EntryType::Masuk => Self::Masuk,
            duitku_core::EntryType::Keluar => Self::Keluar,
        }
    }
}

impl From<EntryType> for duitku_core::EntryType {
    fn from(value: EntryType) -> Self {
        match value {
            EntryType::Masuk => Self::Masuk,
            EntryType::Keluar => Self::Keluar,
        }
    }
}
