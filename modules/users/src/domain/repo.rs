use async_trait::async_trait;
use thiserror::Error;

use super::model::{NewUser, User, UserId};
use super::update::SetField;

/// Persistence port for the domain layer. Object-safe so the service
/// can run against SeaORM in production and doubles in tests.
///
/// The repository owns identifier assignment and timestamps; callers
/// hand it validated data only.
#[async_trait]
pub trait UsersRepository: Send + Sync {
    /// Insert a validated record and return the stored user.
    async fn insert(&self, user: NewUser) -> Result<User, RepoError>;

    /// All users, oldest first.
    async fn find_all(&self) -> Result<Vec<User>, RepoError>;

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, RepoError>;

    /// Apply set-field commands to one record, refreshing `updated_at`.
    /// Returns `None` when the id does not exist.
    async fn apply_fields(&self, id: UserId, fields: &[SetField])
        -> Result<Option<User>, RepoError>;

    /// Returns true if a record was deleted.
    async fn delete_by_id(&self, id: UserId) -> Result<bool, RepoError>;
}

/// Storage-level failures the domain distinguishes.
#[derive(Debug, Error)]
pub enum RepoError {
    /// A unique index rejected the write.
    #[error("unique constraint violated on {field}")]
    UniqueViolation { field: &'static str },

    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}
