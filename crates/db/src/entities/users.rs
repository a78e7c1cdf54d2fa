//! `SeaORM` Entity for the users table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// An account that owns ledger entries.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    /// System-assigned account ID.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Unique account identity.
    pub email: String,
    /// Argon2id password hash (PHC string).
    pub password_hash: String,
    /// Creation timestamp.
    pub created_at: DateTimeWithTimeZone,
}

/// Entity relations.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Ledger entries owned by this account.
    #[sea_orm(has_many = "super::transaksi::Entity")]
    Transaksi,
}

impl Related<super::transaksi::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Transaksi.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
