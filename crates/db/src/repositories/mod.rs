//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the
//! application. Every query on ledger entries carries the owning
//! account's predicate.

pub mod entry;
pub mod user;

pub use entry::{EntryError, EntryFilter, EntryInput, EntryRepository};
pub use user::UserRepository;
