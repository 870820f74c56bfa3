//! Configuration loading and validation for the crypto service.
//!
//! All values are read from `AESCONNECT_*` environment variables at startup.
//! The process exits with a clear error message if any value is invalid.

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Prefix shared by every environment variable the service reads.
const ENV_PREFIX: &str = "AESCONNECT";

/// Validated service configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Address the HTTP server binds to.
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// Port the HTTP server listens on.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Tracing log level (e.g. `"info"`, `"debug"`). `RUST_LOG` takes precedence.
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// OTLP collector endpoint. Span export is disabled when unset.
    #[serde(default)]
    pub otel_exporter_otlp_endpoint: Option<String>,

    /// Upper bound on key derivations running at once. Each one costs
    /// 100 000 HMAC-SHA256 rounds of CPU time.
    #[serde(default = "default_max_concurrent_derivations")]
    pub max_concurrent_derivations: usize,

    /// Minimum password length accepted by `POST /encrypt`.
    #[serde(default = "default_min_password_len")]
    pub min_password_len: usize,

    /// Per-request timeout in seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Largest accepted request body in bytes.
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

fn default_bind_address() -> String {
    "0.0.0.0".into()
}
fn default_port() -> u16 {
    5000
}
fn default_log_level() -> String {
    "info".into()
}
fn default_max_concurrent_derivations() -> usize {
    4
}
fn default_min_password_len() -> usize {
    1
}
fn default_request_timeout() -> u64 {
    30
}
fn default_max_body_bytes() -> usize {
    64 * 1024
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            port: default_port(),
            log_level: default_log_level(),
            otel_exporter_otlp_endpoint: None,
            max_concurrent_derivations: default_max_concurrent_derivations(),
            min_password_len: default_min_password_len(),
            request_timeout_secs: default_request_timeout(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

impl Config {
    /// Load and validate configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if any variable cannot be parsed or fails validation.
    pub fn from_env() -> Result<Self> {
        let cfg = config::Config::builder()
            .add_source(config::Environment::with_prefix(ENV_PREFIX))
            .build()
            .context("failed to build configuration from environment")?;

        let c: Config = cfg
            .try_deserialize()
            .context("failed to deserialise configuration")?;

        c.validate()?;
        Ok(c)
    }

    /// Socket address to bind the HTTP listener to.
    ///
    /// # Errors
    ///
    /// Returns an error if `bind_address` is not an IP address.
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        let ip: IpAddr = self.bind_address.parse().with_context(|| {
            format!(
                "AESCONNECT_BIND_ADDRESS is not an IP address: {}",
                self.bind_address
            )
        })?;
        Ok(SocketAddr::new(ip, self.port))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Validate all fields, returning a descriptive error on the first failure.
    fn validate(&self) -> Result<()> {
        self.socket_addr()?;

        if let Some(endpoint) = &self.otel_exporter_otlp_endpoint {
            if endpoint.trim().is_empty() {
                anyhow::bail!("AESCONNECT_OTEL_EXPORTER_OTLP_ENDPOINT must not be empty when set");
            }
        }
        if self.max_concurrent_derivations == 0 {
            anyhow::bail!("AESCONNECT_MAX_CONCURRENT_DERIVATIONS must be > 0");
        }
        if self.min_password_len == 0 {
            anyhow::bail!("AESCONNECT_MIN_PASSWORD_LEN must be > 0");
        }
        if self.request_timeout_secs == 0 {
            anyhow::bail!("AESCONNECT_REQUEST_TIMEOUT_SECS must be > 0");
        }
        if self.max_body_bytes == 0 {
            anyhow::bail!("AESCONNECT_MAX_BODY_BYTES must be > 0");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        assert_eq!(default_bind_address(), "0.0.0.0");
        assert_eq!(default_port(), 5000);
        assert_eq!(default_log_level(), "info");
        assert_eq!(default_max_concurrent_derivations(), 4);
        assert_eq!(default_min_password_len(), 1);
        assert_eq!(default_request_timeout(), 30);
        assert_eq!(default_max_body_bytes(), 65536);
    }

    #[test]
    fn default_config_is_valid() {
        let cfg = Config::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.socket_addr().unwrap().to_string(), "0.0.0.0:5000");
    }

    #[test]
    fn validate_rejects_bad_bind_address() {
        let cfg = Config {
            bind_address: "localhost:80".into(),
            ..Config::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_derivations() {
        let cfg = Config {
            max_concurrent_derivations: 0,
            ..Config::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_min_password_len() {
        let cfg = Config {
            min_password_len: 0,
            ..Config::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn validate_rejects_blank_otlp_endpoint() {
        let cfg = Config {
            otel_exporter_otlp_endpoint: Some("  ".into()),
            ..Config::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn accepts_ipv6_bind_address() {
        let cfg = Config {
            bind_address: "::1".into(),
            port: 8080,
            ..Config::default()
        };
        assert_eq!(cfg.socket_addr().unwrap().to_string(), "[::1]:8080");
    }
}
