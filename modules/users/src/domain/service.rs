use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::{debug, info, instrument};

use super::error::DomainError;
use super::model::{User, UserDraft, UserId};
use super::repo::{RepoError, UsersRepository};
use super::update::{flatten_payload, to_commands};
use super::validation::validate_draft;

/// Domain service for the user collection. Depends only on the
/// repository port.
#[derive(Clone)]
pub struct UsersService {
    repo: Arc<dyn UsersRepository>,
}

impl UsersService {
    pub fn new(repo: Arc<dyn UsersRepository>) -> Self {
        Self { repo }
    }

    #[instrument(name = "users.service.register", skip(self, draft), fields(email = ?draft.email))]
    pub async fn register(&self, draft: UserDraft) -> Result<User, DomainError> {
        let new_user = validate_draft(&draft).map_err(DomainError::validation)?;
        let email = new_user.email.clone();

        let user = self.repo.insert(new_user).await.map_err(|err| match err {
            RepoError::UniqueViolation { field: "email" } => DomainError::email_taken(email),
            other => storage_failure(other),
        })?;

        info!(user_id = %user.id, "user registered");
        Ok(user)
    }

    #[instrument(name = "users.service.list", skip(self))]
    pub async fn list(&self) -> Result<Vec<User>, DomainError> {
        let users = self.repo.find_all().await.map_err(storage_failure)?;
        debug!(count = users.len(), "listed users");
        Ok(users)
    }

    #[instrument(name = "users.service.get", skip(self), fields(user_id = %id))]
    pub async fn get(&self, id: UserId) -> Result<User, DomainError> {
        self.repo
            .find_by_id(id)
            .await
            .map_err(storage_failure)?
            .ok_or_else(|| DomainError::not_found(id))
    }

    #[instrument(name = "users.service.update", skip(self, payload), fields(user_id = %id))]
    pub async fn update(
        &self,
        id: UserId,
        payload: Map<String, Value>,
    ) -> Result<User, DomainError> {
        let flat = flatten_payload(&payload)?;
        let commands = to_commands(flat)?;

        // A payload like {"address": {"zip": ...}} filters down to
        // nothing; treat it as a no-op read.
        if commands.is_empty() {
            return self.get(id).await;
        }

        let updated = self
            .repo
            .apply_fields(id, &commands)
            .await
            .map_err(storage_failure)?
            .ok_or_else(|| DomainError::not_found(id))?;

        info!(fields = commands.len(), "user updated");
        Ok(updated)
    }

    #[instrument(name = "users.service.delete", skip(self), fields(user_id = %id))]
    pub async fn delete(&self, id: UserId) -> Result<(), DomainError> {
        let deleted = self
            .repo
            .delete_by_id(id)
            .await
            .map_err(storage_failure)?;
        if !deleted {
            return Err(DomainError::not_found(id));
        }
        info!("user deleted");
        Ok(())
    }
}

fn storage_failure(err: RepoError) -> DomainError {
    DomainError::database(anyhow::Error::new(err))
}
