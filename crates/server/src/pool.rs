//! [`DerivationPool`]: bounded execution of CPU-heavy codec calls.
//!
//! Every encrypt or decrypt runs a 100 000-round PBKDF2 derivation. Running
//! that on an async worker thread would stall unrelated requests, so each
//! call is moved to Tokio's blocking pool. A semaphore caps how many run at
//! once; excess requests wait for a permit instead of oversubscribing the CPU.

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::Semaphore;
use tokio::task::JoinError;

/// Errors produced by the pool itself, independent of the job's result.
#[derive(Debug, Error)]
pub enum PoolError {
    /// The semaphore was closed; the service is shutting down.
    #[error("derivation pool closed")]
    Closed,

    /// The blocking task panicked or was cancelled.
    #[error("derivation task failed: {0}")]
    Join(#[from] JoinError),
}

/// Cheaply cloneable handle to a shared derivation limit.
#[derive(Clone, Debug)]
pub struct DerivationPool {
    permits: Arc<Semaphore>,
    capacity: usize,
}

impl DerivationPool {
    /// Create a pool allowing at most `capacity` concurrent jobs.
    pub fn new(capacity: usize) -> Self {
        Self {
            permits: Arc::new(Semaphore::new(capacity)),
            capacity,
        }
    }

    /// Configured maximum number of concurrent jobs.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of jobs that could start immediately.
    pub fn available(&self) -> usize {
        self.permits.available_permits()
    }

    /// Whether [`close`](Self::close) has been called.
    pub fn is_closed(&self) -> bool {
        self.permits.is_closed()
    }

    /// Stop accepting new jobs. Jobs already holding a permit finish normally.
    pub fn close(&self) {
        self.permits.close();
    }

    /// Run `job` on the blocking thread pool once a permit is free.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::Closed`] if the pool has been closed, or
    /// [`PoolError::Join`] if the job panicked.
    pub async fn run<F, T>(&self, job: F) -> Result<T, PoolError>
    where
        F: FnOnce() -> T + Send + 'static,
        T: Send + 'static,
    {
        let permit = self
            .permits
            .clone()
            .acquire_owned()
            .await
            .map_err(|_| PoolError::Closed)?;

        let out = tokio::task::spawn_blocking(move || {
            let _permit = permit;
            job()
        })
        .await?;
        Ok(out)
    }
}
