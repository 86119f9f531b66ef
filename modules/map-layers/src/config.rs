use std::fmt;

use serde::{Deserialize, Serialize};

/// `geoserver` section of the server configuration.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeoServerConfig {
    /// Base URL up to, not including, the workspace segment.
    pub base_url: String,
    pub username: String,
    pub password: String,
    /// `maxFeatures` sent with every GetFeature request.
    pub max_features: u32,
    pub timeout_secs: u64,
}

impl Default for GeoServerConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080/geoserver".to_owned(),
            username: "admin".to_owned(),
            password: String::new(),
            max_features: 52_000,
            timeout_secs: 120,
        }
    }
}

impl GeoServerConfig {
    /// Copy that is safe to print.
    #[must_use]
    pub fn redacted(&self) -> Self {
        Self {
            password: if self.password.is_empty() {
                String::new()
            } else {
                "***".to_owned()
            },
            ..self.clone()
        }
    }
}

impl fmt::Debug for GeoServerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeoServerConfig")
            .field("base_url", &self.base_url)
            .field("username", &self.username)
            .field("password", &"***")
            .field("max_features", &self.max_features)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}
