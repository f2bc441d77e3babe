//! `carrental-users` — the user entity and its persistence contract.
//!
//! Storage adapters implement [`UserRepository`]; none ship with this crate.

pub mod repository;
pub mod user;

pub use repository::{RepositoryError, RepositoryResult, UserRepository};
pub use user::{User, UserStatus};
