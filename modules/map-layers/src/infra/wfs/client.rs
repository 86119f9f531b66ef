use std::time::Duration;

use anyhow::{Context, bail};
use async_trait::async_trait;
use reqwest::header::ACCEPT;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, instrument};
use url::Url;

use crate::config::GeoServerConfig;
use crate::domain::source::{FeatureSource, SourceError, SourceFeature};

/// GeoServer WFS 2.0 client fetching a whole feature type as GeoJSON.
pub struct WfsClient {
    client: reqwest::Client,
    base_url: Url,
    username: String,
    password: SecretString,
    max_features: u32,
}

impl WfsClient {
    /// # Errors
    /// Returns an error if `base_url` is not an absolute http(s) URL or the
    /// HTTP client cannot be built.
    pub fn new(cfg: &GeoServerConfig) -> anyhow::Result<Self> {
        let base_url = Url::parse(&cfg.base_url)
            .with_context(|| format!("invalid geoserver.base_url '{}'", cfg.base_url))?;
        if base_url.cannot_be_a_base() || !matches!(base_url.scheme(), "http" | "https") {
            bail!("geoserver.base_url must be an http(s) URL: {base_url}");
        }
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .build()
            .context("failed to build WFS HTTP client")?;
        Ok(Self {
            client,
            base_url,
            username: cfg.username.clone(),
            password: SecretString::from(cfg.password.clone()),
            max_features: cfg.max_features,
        })
    }

    /// `{base}/{workspace}/ows?service=WFS&...&typeName={type_name}`
    fn get_feature_url(&self, workspace: &str, type_name: &str) -> Result<Url, SourceError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                SourceError::Request(format!("'{}' cannot be a base URL", self.base_url))
            })?
            .pop_if_empty()
            .extend([workspace, "ows"]);
        url.query_pairs_mut()
            .append_pair("service", "WFS")
            .append_pair("version", "2.0.0")
            .append_pair("request", "GetFeature")
            .append_pair("typeName", type_name)
            .append_pair("maxFeatures", &self.max_features.to_string())
            .append_pair("outputFormat", "application/json");
        Ok(url)
    }
}

#[derive(Deserialize)]
struct WfsResponse {
    #[serde(default)]
    features: Vec<WfsFeature>,
}

#[derive(Deserialize)]
struct WfsFeature {
    #[serde(default)]
    id: Option<Value>,
    #[serde(default)]
    properties: Option<Value>,
}

impl From<WfsFeature> for SourceFeature {
    fn from(f: WfsFeature) -> Self {
        let id = match f.id {
            Some(Value::String(s)) => Some(s),
            Some(Value::Number(n)) => Some(n.to_string()),
            _ => None,
        };
        Self {
            id,
            properties: f.properties,
        }
    }
}

#[async_trait]
impl FeatureSource for WfsClient {
    #[instrument(skip_all, fields(wfs_base = %self.base_url, workspace = %workspace, type_name = %type_name))]
    async fn fetch(
        &self,
        workspace: &str,
        type_name: &str,
    ) -> Result<Vec<SourceFeature>, SourceError> {
        let url = self.get_feature_url(workspace, type_name)?;

        let response = self
            .client
            .get(url)
            .basic_auth(&self.username, Some(self.password.expose_secret()))
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| SourceError::Request(e.without_url().to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status(status.as_u16()));
        }

        let body: WfsResponse = response
            .json()
            .await
            .map_err(|e| SourceError::Decode(e.without_url().to_string()))?;
        debug!(count = body.features.len(), "fetched WFS features");
        Ok(body.features.into_iter().map(Into::into).collect())
    }
}
