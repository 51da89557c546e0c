//! Environment-sourced process configuration
//!
//! Everything the service needs is read from the environment exactly once at
//! startup and validated eagerly; a missing required value aborts the process
//! before the listener binds.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use aws_config::{retry::RetryConfig, timeout::TimeoutConfig, BehaviorVersion, Region};
use aws_sdk_s3::config::Credentials;
use thiserror::Error;

const DEFAULT_PORT: u16 = 3002;
const DEFAULT_ALLOWED_ORIGIN: &str = "http://localhost:5173";
const DEFAULT_KEY_PREFIX: &str = "aws+";
const DEFAULT_PRESIGN_EXPIRY_SECS: u64 = 3600;

/// Errors raised while loading configuration from the environment
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// A required environment variable is absent or empty
    #[error("{0} environment variable is not set")]
    MissingVar(&'static str),

    /// An environment variable is set but cannot be parsed
    #[error("{name} environment variable has invalid value: {value}")]
    InvalidVar {
        /// Name of the offending variable
        name: &'static str,
        /// The rejected value
        value: String,
    },
}

/// Deployment stage, from `APP_ENV`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    /// Production environment
    Production,
    /// Staging environment
    Staging,
    /// Development environment (uses `LocalStack`)
    Development,
}

impl Environment {
    /// Reads the deployment stage from the `APP_ENV` environment variable,
    /// defaulting to development.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidVar` for an unrecognized stage name.
    pub fn from_env() -> Result<Self, ConfigError> {
        let env = env::var("APP_ENV")
            .unwrap_or_else(|_| "development".to_string())
            .trim()
            .to_lowercase();

        match env.as_str() {
            "production" => Ok(Self::Production),
            "staging" => Ok(Self::Staging),
            "development" => Ok(Self::Development),
            _ => Err(ConfigError::InvalidVar {
                name: "APP_ENV",
                value: env,
            }),
        }
    }

    /// Returns the endpoint URL to use for AWS services
    #[must_use]
    pub const fn aws_endpoint_override(&self) -> Option<&str> {
        match self {
            // Regular AWS endpoints for production and staging
            Self::Production | Self::Staging => None,
            // LocalStack endpoint for development
            Self::Development => Some("http://localhost:4566"),
        }
    }
}

/// Process configuration, populated once at startup
#[derive(Clone)]
pub struct Config {
    /// Deployment stage
    pub environment: Environment,
    /// Listening port
    pub port: u16,
    /// Web origin allowed to call the API cross-origin
    pub allowed_origin: String,
    /// Storage-provider access key identifier
    pub access_key_id: String,
    /// Storage-provider secret key
    pub secret_access_key: String,
    /// Target bucket name
    pub bucket: String,
    /// Target region
    pub region: String,
    /// Prefix distinguishing this service's object keys within the bucket
    pub key_prefix: String,
    /// Presigned URL validity window in seconds
    pub presign_expiry_secs: u64,
}

impl Config {
    /// Loads and validates the full configuration from the environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingVar` when a required credential, bucket,
    /// or region variable is absent, and `ConfigError::InvalidVar` when a
    /// value fails to parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            environment: Environment::from_env()?,
            port: optional_parsed("PORT")?.unwrap_or(DEFAULT_PORT),
            allowed_origin: optional("ALLOWED_ORIGIN")
                .unwrap_or_else(|| DEFAULT_ALLOWED_ORIGIN.to_string()),
            access_key_id: required("AWS_ACCESS_KEY_ID")?,
            secret_access_key: required("AWS_SECRET_ACCESS_KEY")?,
            bucket: required("AWS_BUCKET")?,
            region: required("AWS_REGION")?,
            key_prefix: optional("UPLOAD_KEY_PREFIX")
                .unwrap_or_else(|| DEFAULT_KEY_PREFIX.to_string()),
            presign_expiry_secs: optional_parsed("PRESIGNED_URL_EXPIRY_SECS")?
                .unwrap_or(DEFAULT_PRESIGN_EXPIRY_SECS),
        })
    }

    /// AWS S3 service configuration with retry and timeout settings
    #[must_use]
    pub fn s3_client_config(&self) -> aws_sdk_s3::Config {
        let retry_config = RetryConfig::standard()
            .with_max_attempts(3)
            .with_initial_backoff(Duration::from_millis(50));

        let timeout_config = TimeoutConfig::builder()
            .operation_timeout(Duration::from_secs(30))
            .build();

        let credentials = Credentials::new(
            self.access_key_id.clone(),
            self.secret_access_key.clone(),
            None,
            None,
            "upload-gateway-env",
        );

        let mut builder = aws_sdk_s3::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new(self.region.clone()))
            .credentials_provider(credentials)
            .retry_config(retry_config)
            .timeout_config(timeout_config);

        // Override "force path style" to true for compatibility with LocalStack
        // https://github.com/awslabs/aws-sdk-rust/discussions/874
        if let Some(endpoint_url) = self.environment.aws_endpoint_override() {
            builder = builder.endpoint_url(endpoint_url).force_path_style(true);
        }

        builder.build()
    }
}

fn optional(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn required(name: &'static str) -> Result<String, ConfigError> {
    optional(name).ok_or(ConfigError::MissingVar(name))
}

fn optional_parsed<T: FromStr>(name: &'static str) -> Result<Option<T>, ConfigError> {
    optional(name)
        .map(|value| {
            value
                .parse()
                .map_err(|_| ConfigError::InvalidVar { name, value })
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn set_required_env() {
        env::set_var("AWS_ACCESS_KEY_ID", "test-access-key");
        env::set_var("AWS_SECRET_ACCESS_KEY", "test-secret-key");
        env::set_var("AWS_BUCKET", "test-bucket");
        env::set_var("AWS_REGION", "us-east-1");
    }

    fn clear_optional_env() {
        for name in [
            "APP_ENV",
            "PORT",
            "ALLOWED_ORIGIN",
            "UPLOAD_KEY_PREFIX",
            "PRESIGNED_URL_EXPIRY_SECS",
        ] {
            env::remove_var(name);
        }
    }

    #[test]
    #[serial]
    fn test_environment_from_env() {
        // Development is the default
        env::remove_var("APP_ENV");
        assert_eq!(Environment::from_env(), Ok(Environment::Development));

        env::set_var("APP_ENV", "development");
        assert_eq!(Environment::from_env(), Ok(Environment::Development));

        env::set_var("APP_ENV", "staging");
        assert_eq!(Environment::from_env(), Ok(Environment::Staging));

        env::set_var("APP_ENV", "production");
        assert_eq!(Environment::from_env(), Ok(Environment::Production));

        env::set_var("APP_ENV", "invalid");
        assert_eq!(
            Environment::from_env(),
            Err(ConfigError::InvalidVar {
                name: "APP_ENV",
                value: "invalid".to_string(),
            })
        );

        env::remove_var("APP_ENV");
    }

    #[test]
    #[serial]
    fn test_config_defaults() {
        set_required_env();
        clear_optional_env();

        let config = Config::from_env().expect("config should load");
        assert_eq!(config.environment, Environment::Development);
        assert_eq!(config.port, 3002);
        assert_eq!(config.allowed_origin, "http://localhost:5173");
        assert_eq!(config.bucket, "test-bucket");
        assert_eq!(config.region, "us-east-1");
        assert_eq!(config.key_prefix, "aws+");
        assert_eq!(config.presign_expiry_secs, 3600);
    }

    #[test]
    #[serial]
    fn test_config_overrides() {
        set_required_env();
        clear_optional_env();
        env::set_var("APP_ENV", "staging");
        env::set_var("PORT", "8080");
        env::set_var("ALLOWED_ORIGIN", "https://app.example.com");
        env::set_var("UPLOAD_KEY_PREFIX", "uploads/");
        env::set_var("PRESIGNED_URL_EXPIRY_SECS", "120");

        let config = Config::from_env().expect("config should load");
        assert_eq!(config.environment, Environment::Staging);
        assert_eq!(config.port, 8080);
        assert_eq!(config.allowed_origin, "https://app.example.com");
        assert_eq!(config.key_prefix, "uploads/");
        assert_eq!(config.presign_expiry_secs, 120);

        clear_optional_env();
    }

    #[test]
    #[serial]
    fn test_config_missing_required_is_fatal() {
        set_required_env();
        clear_optional_env();
        env::remove_var("AWS_BUCKET");

        assert_eq!(
            Config::from_env().err(),
            Some(ConfigError::MissingVar("AWS_BUCKET"))
        );

        // An empty value counts as missing
        env::set_var("AWS_BUCKET", "  ");
        assert_eq!(
            Config::from_env().err(),
            Some(ConfigError::MissingVar("AWS_BUCKET"))
        );
    }

    #[test]
    #[serial]
    fn test_config_invalid_values() {
        set_required_env();
        clear_optional_env();

        env::set_var("PORT", "not-a-port");
        assert_eq!(
            Config::from_env().err(),
            Some(ConfigError::InvalidVar {
                name: "PORT",
                value: "not-a-port".to_string(),
            })
        );
        env::remove_var("PORT");

        env::set_var("PRESIGNED_URL_EXPIRY_SECS", "-1");
        assert_eq!(
            Config::from_env().err(),
            Some(ConfigError::InvalidVar {
                name: "PRESIGNED_URL_EXPIRY_SECS",
                value: "-1".to_string(),
            })
        );
        env::remove_var("PRESIGNED_URL_EXPIRY_SECS");
    }
}
