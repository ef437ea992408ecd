//! Application configuration loaded from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use quill_infra::PartitionStrategy;
use quill_infra::database::DEFAULT_OPERATION_TIMEOUT;
use thiserror::Error;

use crate::telemetry::TelemetryConfig;

/// Configuration errors. All of them are fatal at start-up.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value {value:?} for {key}")]
    InvalidValue { key: &'static str, value: String },
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: String,
    pub host: String,
    pub port: u16,
    pub read_timeout: Duration,
    pub write_timeout: Duration,
    /// Author recorded on every post until there is a user model.
    pub author_id: String,
    pub telemetry: TelemetryConfig,
    pub database: DatabaseConfig,
}

/// Document store settings.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// MongoDB URI. `None` runs on the in-memory store.
    pub url: Option<String>,
    pub operation_timeout: Duration,
    pub partitioning: PartitionStrategy,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |key: &str, default: &str| {
            lookup(key)
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let collection = var("POSTS_COLLECTION", "posts");
        let partitioning = match var("TENANT_PARTITIONING", "database").as_str() {
            "database" => PartitionStrategy::DatabasePerTenant { collection },
            "collection" => PartitionStrategy::CollectionPerTenant {
                database: var("TENANT_DATABASE", "blog"),
                prefix: collection,
            },
            other => {
                return Err(ConfigError::InvalidValue {
                    key: "TENANT_PARTITIONING",
                    value: other.to_string(),
                });
            }
        };

        Ok(Self {
            env: var("ENV", "development"),
            host: var("HOST", "127.0.0.1"),
            port: parse(&lookup, "PORT", 5000)?,
            read_timeout: Duration::from_secs(parse(&lookup, "SERVER_READ_TIMEOUT", 2)?),
            write_timeout: Duration::from_secs(parse(&lookup, "SERVER_WRITE_TIMEOUT", 2)?),
            author_id: var("AUTHOR_ID", "admin"),
            telemetry: TelemetryConfig {
                json_logs: var("LOG_FORMAT", "pretty").eq_ignore_ascii_case("json"),
                log_level: var("LOG_LEVEL", "info"),
                service_name: var("SERVICE_NAME", "quill-api"),
            },
            database: DatabaseConfig {
                url: lookup("DATABASE_URL").filter(|v| !v.is_empty()),
                operation_timeout: Duration::from_secs(parse(
                    &lookup,
                    "DB_OPERATION_TIMEOUT",
                    DEFAULT_OPERATION_TIMEOUT.as_secs(),
                )?),
                partitioning,
            },
        })
    }

    pub fn is_production(&self) -> bool {
        self.env.eq_ignore_ascii_case("production")
    }
}

/// Parse a numeric variable, falling back to `default` when unset.
fn parse<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(key).filter(|v| !v.is_empty()) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue { key, value }),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();

        assert_eq!(config.env, "development");
        assert_eq!(config.port, 5000);
        assert_eq!(config.read_timeout, Duration::from_secs(2));
        assert_eq!(config.write_timeout, Duration::from_secs(2));
        assert_eq!(config.author_id, "admin");
        assert_eq!(config.telemetry.log_level, "info");
        assert!(!config.telemetry.json_logs);
        assert!(config.database.url.is_none());
        assert_eq!(config.database.operation_timeout, Duration::from_secs(10));
        assert_eq!(config.database.partitioning, PartitionStrategy::default());
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("ENV", "production"),
            ("PORT", "8081"),
            ("SERVER_READ_TIMEOUT", "5"),
            ("LOG_FORMAT", "JSON"),
            ("DATABASE_URL", "mongodb://localhost:27017"),
            ("DB_OPERATION_TIMEOUT", "3"),
            ("TENANT_PARTITIONING", "collection"),
            ("TENANT_DATABASE", "shared"),
        ])
        .unwrap();

        assert!(config.is_production());
        assert_eq!(config.port, 8081);
        assert_eq!(config.read_timeout, Duration::from_secs(5));
        assert!(config.telemetry.json_logs);
        assert_eq!(
            config.database.url.as_deref(),
            Some("mongodb://localhost:27017")
        );
        assert_eq!(config.database.operation_timeout, Duration::from_secs(3));
        assert_eq!(
            config.database.partitioning,
            PartitionStrategy::CollectionPerTenant {
                database: "shared".to_string(),
                prefix: "posts".to_string(),
            }
        );
    }

    #[test]
    fn test_malformed_values_are_fatal() {
        assert!(matches!(
            load(&[("SERVER_WRITE_TIMEOUT", "two")]),
            Err(ConfigError::InvalidValue { key: "SERVER_WRITE_TIMEOUT", .. })
        ));
        assert!(load(&[("PORT", "70000")]).is_err());
        assert!(load(&[("TENANT_PARTITIONING", "shard")]).is_err());
    }
}
