//! Core business logic for duitku.
//!
//! Pure logic only: entry types, summary aggregation, and password hashing.
//! This crate has no web or database dependencies.

pub mod auth;
pub mod ledger;

pub use ledger::{EntryType, Summary};
