//! Product store error types.

use thiserror::Error;

/// Errors that can occur when talking to the product store.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The store is unreachable or refused the call.
    #[error("product store unavailable: {0}")]
    Unavailable(String),
}
