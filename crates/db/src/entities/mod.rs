//! `SeaORM` entity definitions.

pub mod sea_orm_active_enums;
pub mod transaksi;
pub mod users;
