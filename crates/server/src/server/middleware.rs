//! Limits applied by the router's middleware layers.

use std::time::Duration;

use crate::config::Config;

/// Per-request limits enforced by tower-http layers.
#[derive(Debug, Clone, Copy)]
pub struct Limits {
    /// Requests running longer than this are answered with `408`.
    pub request_timeout: Duration,
    /// Bodies larger than this are answered with `413`.
    pub max_body_bytes: usize,
}

impl From<&Config> for Limits {
    fn from(cfg: &Config) -> Self {
        Self {
            request_timeout: cfg.request_timeout(),
            max_body_bytes: cfg.max_body_bytes,
        }
    }
}

impl Default for Limits {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}
