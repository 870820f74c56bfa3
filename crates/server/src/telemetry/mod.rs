//! Structured logging and optional OpenTelemetry span export.
//!
//! # Telemetry invariants
//!
//! - **No plaintext, password, derived key or blob** may appear in any span
//!   attribute or log field. Only sizes, modes and outcomes are recorded.
//! - Log level is configurable via `AESCONNECT_LOG_LEVEL` (default: `info`),
//!   overridden by `RUST_LOG` when set.

pub mod init;

pub use init::{init_telemetry, shutdown_telemetry, SERVICE_NAME};
