//! Layered server configuration.
//!
//! Precedence, lowest first: built-in defaults, YAML file (`--config`),
//! environment (`APP__SECTION__KEY`), CLI overrides.

use std::net::SocketAddr;
use std::path::Path;

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use map_layers::GeoServerConfig;
use restaurants::RestaurantsConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use webgis_db::{DbConfig, redact_credentials_in_dsn};

pub const ENV_PREFIX: &str = "APP__";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("config file does not exist: {0}")]
    MissingFile(String),
    #[error("failed to load configuration: {0}")]
    Load(#[from] Box<figment::Error>),
    #[error("invalid server.bind_addr '{addr}': {source}")]
    BindAddr {
        addr: String,
        source: std::net::AddrParseError,
    },
    #[error("invalid configuration: {0}")]
    Invalid(String),
    #[error(transparent)]
    Database(#[from] webgis_db::DbError),
    #[error("failed to render configuration as YAML: {0}")]
    Render(String),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DbConfig,
    pub logging: LoggingConfig,
    pub geoserver: GeoServerConfig,
    pub restaurants: RestaurantsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    pub bind_addr: String,
    pub cors_enabled: bool,
    pub request_timeout_secs: u64,
    pub body_limit_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:3000".to_owned(),
            cors_enabled: true,
            request_timeout_secs: 30,
            body_limit_bytes: 2 * 1024 * 1024,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            format: LogFormat::Text,
        }
    }
}

/// Values given on the command line; they win over every other layer.
#[derive(Debug, Clone, Copy, Default)]
pub struct CliOverrides {
    pub port: Option<u16>,
    pub verbose: u8,
}

impl AppConfig {
    /// Loads defaults, then the optional YAML file, then `APP__*` variables.
    ///
    /// # Errors
    /// Returns an error if the file is missing or any layer fails to parse.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(path) = path {
            if !path.is_file() {
                return Err(ConfigError::MissingFile(path.display().to_string()));
            }
            figment = figment.merge(Yaml::file(path));
        }
        figment
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .map_err(|e| ConfigError::Load(Box::new(e)))
    }

    /// # Errors
    /// Returns an error if `server.bind_addr` is not a socket address.
    pub fn apply_cli_overrides(&mut self, cli: CliOverrides) -> Result<(), ConfigError> {
        if let Some(port) = cli.port {
            let mut addr = self.bind_addr()?;
            addr.set_port(port);
            self.server.bind_addr = addr.to_string();
        }
        self.logging.level = match cli.verbose {
            0 => return Ok(()),
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
        .to_owned();
        Ok(())
    }

    /// # Errors
    /// Returns an error if `server.bind_addr` cannot be parsed.
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.server
            .bind_addr
            .parse()
            .map_err(|source| ConfigError::BindAddr {
                addr: self.server.bind_addr.clone(),
                source,
            })
    }

    /// Checks every section without touching the network.
    ///
    /// # Errors
    /// Returns the first invalid setting found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.bind_addr()?;
        self.database.validate()?;
        if self.server.request_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "server.request_timeout_secs must be greater than zero".to_owned(),
            ));
        }
        if self.restaurants.max_page_size == 0 {
            return Err(ConfigError::Invalid(
                "restaurants.max_page_size must be greater than zero".to_owned(),
            ));
        }
        if url::Url::parse(&self.geoserver.base_url).is_err() {
            return Err(ConfigError::Invalid(format!(
                "geoserver.base_url is not a URL: {}",
                self.geoserver.base_url
            )));
        }
        Ok(())
    }

    /// Effective configuration as YAML with credentials masked.
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    pub fn to_redacted_yaml(&self) -> Result<String, ConfigError> {
        let mut shown = self.clone();
        shown.database.dsn = redact_credentials_in_dsn(Some(&self.database.dsn));
        shown.geoserver = self.geoserver.redacted();
        serde_saphyr::to_string(&shown).map_err(|e| ConfigError::Render(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    fn write_yaml(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn defaults_apply_without_file() {
        temp_env::with_vars_unset(["APP__SERVER__BIND_ADDR", "APP__DATABASE__DSN"], || {
            let cfg = AppConfig::load(None).unwrap();
            assert_eq!(cfg.server.bind_addr, "0.0.0.0:3000");
            assert_eq!(cfg.server.request_timeout_secs, 30);
            assert_eq!(cfg.geoserver.max_features, 52_000);
            assert_eq!(cfg.restaurants.max_page_size, 1000);
            assert!(cfg.database.auto_migrate);
        });
    }

    #[test]
    fn env_overrides_file_and_cli_overrides_env() {
        let file = write_yaml(
            "server:\n  bind_addr: \"127.0.0.1:4000\"\ndatabase:\n  dsn: \"sqlite::memory:\"\n",
        );
        temp_env::with_vars(
            [
                ("APP__SERVER__BIND_ADDR", Some("127.0.0.1:5000")),
                ("APP__GEOSERVER__MAX_FEATURES", Some("10")),
            ],
            || {
                let mut cfg = AppConfig::load(Some(file.path())).unwrap();
                assert_eq!(cfg.server.bind_addr, "127.0.0.1:5000");
                assert_eq!(cfg.database.dsn, "sqlite::memory:");
                assert_eq!(cfg.geoserver.max_features, 10);

                cfg.apply_cli_overrides(CliOverrides {
                    port: Some(6000),
                    verbose: 2,
                })
                .unwrap();
                assert_eq!(cfg.server.bind_addr, "127.0.0.1:6000");
                assert_eq!(cfg.logging.level, "debug");
            },
        );
    }

    #[test]
    fn missing_file_is_reported() {
        let err = AppConfig::load(Some(Path::new("/nonexistent/webgis.yaml"))).unwrap_err();
        assert!(matches!(err, ConfigError::MissingFile(_)));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let file = write_yaml("server:\n  bind_adr: \"127.0.0.1:4000\"\n");
        assert!(AppConfig::load(Some(file.path())).is_err());
    }

    #[test]
    fn validate_catches_bad_values() {
        let mut cfg = AppConfig::default();
        assert!(cfg.validate().is_ok());

        cfg.server.bind_addr = "localhost".to_owned();
        assert!(matches!(cfg.validate(), Err(ConfigError::BindAddr { .. })));

        let cfg = AppConfig {
            database: DbConfig {
                dsn: "mysql://root@db/webgis".to_owned(),
                ..DbConfig::default()
            },
            ..AppConfig::default()
        };
        assert!(matches!(cfg.validate(), Err(ConfigError::Database(_))));
    }

    #[test]
    fn printed_config_hides_credentials() {
        let mut cfg = AppConfig::default();
        cfg.database.dsn = "postgres://gis:s3cret@db:5432/webgis".to_owned();
        cfg.geoserver.password = "geoserver-pass".to_owned();

        let yaml = cfg.to_redacted_yaml().unwrap();
        assert!(!yaml.contains("s3cret"));
        assert!(!yaml.contains("geoserver-pass"));
        assert!(yaml.contains("postgres://gis:***@db:5432/webgis"));
    }
}
