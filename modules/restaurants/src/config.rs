use serde::{Deserialize, Serialize};

/// `restaurants` section of the server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RestaurantsConfig {
    /// Upper bound for `per_page` on paginated listings.
    pub max_page_size: u64,
}

impl Default for RestaurantsConfig {
    fn default() -> Self {
        Self {
            max_page_size: 1000,
        }
    }
}
