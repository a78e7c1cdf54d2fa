//! `SeaORM` Entity for the transaksi table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::EntryType;

/// One ledger entry: an inflow or outflow owned by exactly one account.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "transaksi")]
pub struct Model {
    /// System-assigned entry ID.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Owning account. Rows cascade-delete with the account.
    pub user_id: Uuid,
    /// Entry date.
    pub tanggal: Date,
    /// Entry type, restricted to masuk/keluar at the storage layer.
    pub tipe: EntryType,
    /// Amount at fixed decimal precision.
    #[sea_orm(column_type = "Decimal(Some((15, 2)))")]
    pub jumlah: Decimal,
    /// Optional free-text note.
    pub keterangan: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTimeWithTimeZone,
    /// Last-updated timestamp.
    pub updated_at: DateTimeWithTimeZone,
}

/// Entity relations.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Owning account.
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id"
    )]
    Users,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
