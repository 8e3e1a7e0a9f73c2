use thiserror::Error;

use super::model::UserId;

/// Domain-level failure taxonomy for the user collection.
///
/// Everything except `Database` is recoverable and carries a message
/// suitable for the caller; `Database` keeps its detail server-side.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("User not found")]
    NotFound { id: UserId },

    #[error("Email already registered")]
    EmailTaken { email: String },

    /// One message per failed field rule, collected across the record.
    #[error("{}", .messages.join(", "))]
    Validation { messages: Vec<String> },

    /// Update payload named fields outside the allow-list.
    #[error("Invalid fields: {}", .fields.join(", "))]
    DisallowedFields { fields: Vec<String> },

    #[error("No data provided to update")]
    EmptyUpdate,

    #[error("storage failure")]
    Database {
        #[source]
        source: anyhow::Error,
    },
}

impl DomainError {
    pub fn not_found(id: UserId) -> Self {
        Self::NotFound { id }
    }

    pub fn email_taken(email: impl Into<String>) -> Self {
        Self::EmailTaken {
            email: email.into(),
        }
    }

    pub fn validation(messages: Vec<String>) -> Self {
        Self::Validation { messages }
    }

    pub fn database(source: anyhow::Error) -> Self {
        Self::Database { source }
    }
}
