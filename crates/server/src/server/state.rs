//! Shared application state injected into every Axum handler.

use crate::config::Config;
use crate::pool::DerivationPool;

/// Application state shared across all request handlers.
///
/// All fields are cheaply cloneable so that Axum can clone the state for each
/// request. Nothing here is process-global; tests build their own instances.
#[derive(Clone, Debug)]
pub struct AppState {
    /// Bounded executor for key-derivation work.
    pub pool: DerivationPool,
    /// Minimum password length accepted when encrypting.
    pub min_password_len: usize,
}

impl AppState {
    /// Create a new [`AppState`] with the provided pool and password policy.
    pub fn new(pool: DerivationPool, min_password_len: usize) -> Self {
        Self {
            pool,
            min_password_len,
        }
    }

    /// Build state from validated configuration.
    pub fn from_config(cfg: &Config) -> Self {
        Self::new(
            DerivationPool::new(cfg.max_concurrent_derivations),
            cfg.min_password_len,
        )
    }
}

impl Default for AppState {
    /// Creates a default [`AppState`], suitable for tests.
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}
