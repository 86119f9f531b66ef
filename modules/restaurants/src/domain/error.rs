use thiserror::Error;
use webgis_errors::ErrorKind;
use webgis_geojson::GeoJsonError;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation failed on '{field}': {message}")]
    Validation { field: String, message: String },

    #[error("Restaurant {id} not found")]
    NotFound { id: i32 },

    #[error("No restaurant matches '{name}'")]
    NoMatch { name: String },

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

    #[must_use]
    pub const fn not_found(id: i32) -> Self {
        Self::NotFound { id }
    }

    pub fn database(e: impl std::fmt::Display) -> Self {
        Self::Database(e.to_string())
    }

    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation { .. } => ErrorKind::Validation,
            Self::NotFound { .. } | Self::NoMatch { .. } => ErrorKind::NotFound,
            Self::Database(_) => ErrorKind::Internal,
        }
    }
}

impl From<GeoJsonError> for DomainError {
    fn from(e: GeoJsonError) -> Self {
        match e {
            GeoJsonError::LatitudeOutOfRange(_) => Self::validation("latitude", e.to_string()),
            GeoJsonError::LongitudeOutOfRange(_) => Self::validation("longitude", e.to_string()),
            GeoJsonError::InvalidGeometry(_) => Self::database(e),
        }
    }
}
