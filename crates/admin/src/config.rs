//! Admin configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `SUNSTOCK_DATABASE_URL` - `PostgreSQL` connection string
//! - `SUNSTOCK_BASE_URL` - Public URL for the panel (scheme decides cookie
//!   security)
//!
//! ## Optional
//! - `SUNSTOCK_HOST` - Bind address (default: 127.0.0.1)
//! - `SUNSTOCK_PORT` - Listen port (default: 3001)
//! - `COMPANY_NAME`, `COMPANY_ADDRESS`, `COMPANY_EMAIL`, `COMPANY_PHONE` -
//!   Buyer block printed on RFQ documents
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Performance sample rate (default: 0.0)
//!
//! ## Optional (TLS)
//! - `SUNSTOCK_TLS_CERT` - PEM-encoded certificate chain
//! - `SUNSTOCK_TLS_KEY` - PEM-encoded private key

use std::net::{IpAddr, SocketAddr};

use secrecy::SecretString;
use thiserror::Error;

/// Blocklist of common placeholder patterns (case-insensitive).
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "todo",
    "fixme",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure value in {0}: {1}")]
    InsecureValue(String, String),
}

/// Admin application configuration.
#[derive(Debug, Clone)]
pub struct AdminConfig {
    /// `PostgreSQL` connection URL (contains password).
    pub database_url: SecretString,
    /// IP address to bind the server to.
    pub host: IpAddr,
    /// Port to listen on.
    pub port: u16,
    /// Public base URL for the panel.
    pub base_url: String,
    /// Buyer block printed on RFQ documents.
    pub company: CompanyConfig,
    /// Sentry DSN for error tracking.
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g. "development", "production").
    pub sentry_environment: Option<String>,
    /// Sentry error sample rate (0.0 to 1.0).
    pub sentry_sample_rate: f32,
    /// Sentry traces sample rate for performance monitoring (0.0 to 1.0).
    pub sentry_traces_sample_rate: f32,
    /// TLS configuration for HTTPS (optional).
    pub tls: Option<TlsConfig>,
}

/// Company identity used as the buyer block on RFQ documents.
#[derive(Debug, Clone)]
pub struct CompanyConfig {
    pub name: String,
    pub address: String,
    pub email: String,
    pub phone: String,
}

/// TLS certificate configuration.
///
/// Implements `Debug` manually to redact the private key.
#[derive(Clone)]
pub struct TlsConfig {
    /// PEM-encoded certificate chain.
    pub cert_pem: String,
    /// PEM-encoded private key.
    pub key_pem: SecretString,
}

impl std::fmt::Debug for TlsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TlsConfig")
            .field("cert_pem", &"[PEM]")
            .field("key_pem", &"[REDACTED]")
            .finish()
    }
}

impl AdminConfig {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a required variable is missing, unparseable,
    /// or carries an obvious placeholder value.
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url = required("SUNSTOCK_DATABASE_URL")?;
        reject_placeholder("SUNSTOCK_DATABASE_URL", &database_url)?;

        let host: IpAddr = optional("SUNSTOCK_HOST")
            .unwrap_or_else(|| "127.0.0.1".to_owned())
            .parse()
            .map_err(|e| invalid("SUNSTOCK_HOST", e))?;

        let port: u16 = optional("SUNSTOCK_PORT")
            .unwrap_or_else(|| "3001".to_owned())
            .parse()
            .map_err(|e| invalid("SUNSTOCK_PORT", e))?;

        let base_url = required("SUNSTOCK_BASE_URL")?;

        let company = CompanyConfig {
            name: optional("COMPANY_NAME").unwrap_or_else(|| "Moja Firma d.o.o.".to_owned()),
            address: optional("COMPANY_ADDRESS").unwrap_or_else(|| "Adresa firme, Grad".to_owned()),
            email: optional("COMPANY_EMAIL").unwrap_or_else(|| "info@mojafirma.rs".to_owned()),
            phone: optional("COMPANY_PHONE").unwrap_or_else(|| "+381 11 123-4567".to_owned()),
        };

        let sentry_sample_rate: f32 = optional("SENTRY_SAMPLE_RATE")
            .unwrap_or_else(|| "1.0".to_owned())
            .parse()
            .map_err(|e| invalid("SENTRY_SAMPLE_RATE", e))?;

        let sentry_traces_sample_rate: f32 = optional("SENTRY_TRACES_SAMPLE_RATE")
            .unwrap_or_else(|| "0.0".to_owned())
            .parse()
            .map_err(|e| invalid("SENTRY_TRACES_SAMPLE_RATE", e))?;

        let tls = match (optional("SUNSTOCK_TLS_CERT"), optional("SUNSTOCK_TLS_KEY")) {
            (Some(cert_pem), Some(key_pem)) => Some(TlsConfig {
                cert_pem,
                key_pem: SecretString::from(key_pem),
            }),
            (None, None) => None,
            _ => {
                return Err(ConfigError::InvalidEnvVar(
                    "SUNSTOCK_TLS_CERT/SUNSTOCK_TLS_KEY".to_owned(),
                    "both must be set together".to_owned(),
                ));
            }
        };

        Ok(Self {
            database_url: SecretString::from(database_url),
            host,
            port,
            base_url,
            company,
            sentry_dsn: optional("SENTRY_DSN"),
            sentry_environment: optional("SENTRY_ENVIRONMENT"),
            sentry_sample_rate,
            sentry_traces_sample_rate,
            tls,
        })
    }

    /// The socket address to bind.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn required(name: &str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::MissingEnvVar(name.to_owned()))
}

fn optional(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

fn invalid(name: &str, err: impl std::fmt::Display) -> ConfigError {
    ConfigError::InvalidEnvVar(name.to_owned(), err.to_string())
}

fn reject_placeholder(name: &str, value: &str) -> Result<(), ConfigError> {
    let lowered = value.to_lowercase();
    for pattern in PLACEHOLDER_PATTERNS {
        if lowered.contains(pattern) {
            return Err(ConfigError::InsecureValue(
                name.to_owned(),
                format!("looks like a placeholder (contains \"{pattern}\")"),
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reject_placeholder_patterns() {
        assert!(reject_placeholder("X", "postgres://user:changeme@db/app").is_err());
        assert!(reject_placeholder("X", "postgres://app:s3cureRandom@db/app").is_ok());
    }

    #[test]
    fn test_placeholder_check_is_case_insensitive() {
        assert!(reject_placeholder("X", "postgres://CHANGEME@db/app").is_err());
    }
}
