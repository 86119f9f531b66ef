//! Port for the external feature source (a WFS server in production).

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// One feature as returned by the source, before it is mapped to a row.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceFeature {
    pub id: Option<String>,
    pub properties: Option<Value>,
}

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("request failed: {0}")]
    Request(String),
    #[error("unexpected status {0}")]
    Status(u16),
    #[error("invalid response body: {0}")]
    Decode(String),
}

#[async_trait]
pub trait FeatureSource: Send + Sync {
    /// Fetch every feature of `type_name` published in `workspace`.
    async fn fetch(&self, workspace: &str, type_name: &str)
    -> Result<Vec<SourceFeature>, SourceError>;
}
