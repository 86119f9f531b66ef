use thiserror::Error;
use webgis_errors::ErrorKind;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation failed on '{field}': {message}")]
    Validation { field: String, message: String },

    #[error("Map layer {0} not found")]
    LayerNotFound(i32),

    #[error("Feature {0} not found")]
    FeatureNotFound(i32),

    #[error("No feature matches '{0}'")]
    NoMatch(String),

    #[error("Feature '{name}' already exists in map layer {layer_id}")]
    DuplicateFeature { name: String, layer_id: i32 },

    #[error("Feature source failed: {0}")]
    Upstream(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl DomainError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn database(e: impl std::fmt::Display) -> Self {
        Self::Database(e.to_string())
    }

    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation { .. } => ErrorKind::Validation,
            Self::LayerNotFound(_) | Self::FeatureNotFound(_) | Self::NoMatch(_) => {
                ErrorKind::NotFound
            }
            Self::DuplicateFeature { .. } => ErrorKind::Conflict,
            Self::Upstream(_) => ErrorKind::Upstream,
            Self::Database(_) => ErrorKind::Internal,
        }
    }
}

impl From<super::source::SourceError> for DomainError {
    fn from(e: super::source::SourceError) -> Self {
        Self::Upstream(e.to_string())
    }
}
