//! Wire protocol types and errors shared between the AESConnect crypto service
//! and its callers.

pub mod error;
pub mod protocol;

pub use error::ServiceError;
