//! Repository Module
//!
//! One repository per entity type, constructed per-request over the shared
//! [`DataStore`](super::DataStore). Every mutation flushes the affected
//! collection(s) through the gateway before returning.

pub mod medicine;
pub mod order;
pub mod user;

// Re-exports
pub use medicine::MedicineRepository;
pub use order::OrderRepository;
pub use user::UserRepository;

use thiserror::Error;

use super::GatewayError;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Insufficient stock for medicine {0}")]
    InsufficientStock(u64),

    #[error("Storage error: {0}")]
    Storage(#[from] GatewayError),
}

pub type RepoResult<T> = Result<T, RepoError>;
