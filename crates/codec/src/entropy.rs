//! Source of salt and IV bytes.

use rand::{rngs::OsRng, RngCore};

/// Fills buffers with cryptographically secure random bytes.
///
/// Implementations must never fall back to a weaker generator; an unavailable
/// source is reported as an error instead.
#[cfg_attr(test, mockall::automock)]
pub trait EntropySource {
    /// Fill `dest` entirely with random bytes.
    fn fill(&self, dest: &mut [u8]) -> Result<(), rand::Error>;
}

/// The operating system CSPRNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsEntropy;

impl EntropySource for OsEntropy {
    fn fill(&self, dest: &mut [u8]) -> Result<(), rand::Error> {
        OsRng.try_fill_bytes(dest)
    }
}
