//! Persistence contract for users.
//!
//! Adapters (Postgres, in-memory, ...) live outside the domain and implement
//! [`UserRepository`]. Callers hold it as `Arc<dyn UserRepository>`.

use thiserror::Error;

use carrental_core::UserId;

use crate::user::User;

pub type RepositoryResult<T> = Result<T, RepositoryError>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("user not found")]
    NotFound,

    /// Uniqueness violation (e.g. duplicate email).
    #[error("conflict: {0}")]
    Conflict(String),

    /// Storage failure; message comes from the adapter.
    #[error("storage backend error: {0}")]
    Backend(String),
}

/// User persistence operations.
#[async_trait::async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: &User) -> RepositoryResult<()>;

    /// `Ok(None)` when no user has this id.
    async fn get_by_id(&self, id: UserId) -> RepositoryResult<Option<User>>;

    async fn get_by_email(&self, email: &str) -> RepositoryResult<Option<User>>;

    /// Fails with [`RepositoryError::NotFound`] if the user does not exist.
    async fn update(&self, user: &User) -> RepositoryResult<()>;

    async fn delete(&self, id: UserId) -> RepositoryResult<()>;
}
