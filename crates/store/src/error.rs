//! Store-level error model.

use thiserror::Error;

use stockroom_warehouse::ProductId;

/// Infrastructure failure in the product store.
///
/// These are the **unexpected** conditions of the system: deterministic
/// business rejections travel as response values from the warehouse core, not
/// through this type.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Optimistic concurrency failure (the product changed underneath us).
    #[error("version conflict: {0}")]
    Conflict(String),

    /// A quantity update addressed an id the store does not hold.
    #[error("no product with id {0}")]
    Missing(ProductId),

    /// The store's lock was poisoned by a panicking writer.
    #[error("store lock poisoned")]
    Poisoned,
}
