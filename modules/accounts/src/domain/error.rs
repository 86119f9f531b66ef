use thiserror::Error;
use uuid::Uuid;
use webgis_errors::ErrorKind;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation failed on '{field}': {message}")]
    Validation { field: String, message: String },

    #[error("Wrong email or password")]
    InvalidCredentials,

    #[error("Your account is not activated. Please contact support.")]
    Deactivated,

    #[error("User {0} not found")]
    UserNotFound(String),

    #[error("Profile {0} not found")]
    ProfileNotFound(Uuid),

    #[error("Email '{0}' is already registered")]
    EmailTaken(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn user_not_found(key: impl std::fmt::Display) -> Self {
        Self::UserNotFound(key.to_string())
    }

    pub fn database(e: impl std::fmt::Display) -> Self {
        Self::Database(e.to_string())
    }

    pub fn internal(e: impl std::fmt::Display) -> Self {
        Self::Internal(e.to_string())
    }

    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation { .. } => ErrorKind::Validation,
            Self::InvalidCredentials => ErrorKind::Unauthorized,
            Self::Deactivated => ErrorKind::Forbidden,
            Self::UserNotFound(_) | Self::ProfileNotFound(_) => ErrorKind::NotFound,
            Self::EmailTaken(_) => ErrorKind::Conflict,
            Self::Database(_) | Self::Internal(_) => ErrorKind::Internal,
        }
    }
}
