//! `stockroom-store` — the product store and its orchestration layer.
//!
//! Holds the authoritative product collection behind the [`ProductStore`]
//! trait and composes it with the pure warehouse engine in
//! [`WarehouseService`]: fetch, validate, apply, persist with a bounded
//! optimistic-concurrency retry.

pub mod error;
pub mod product_store;
pub mod service;


pub use error::StoreError;
pub use product_store::{InMemoryProductStore, ProductStore};
pub use service::{MAX_CONFLICT_RETRIES, WarehouseService};
