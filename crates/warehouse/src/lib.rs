//! `stockroom-warehouse` — warehouse domain core.
//!
//! This crate contains **pure domain** logic (no infrastructure concerns):
//! the product model, the quantity operation engine, the name uniqueness
//! resolver, and the registration workflow. All state lives with the caller;
//! every decision here is a deterministic function of its inputs.

pub mod engine;
pub mod naming;
pub mod product;
pub mod registration;
pub mod response;

pub use engine::{QuantityChangeRequest, QuantityOperation};
pub use naming::resolve_unique_name;
pub use product::{Product, ProductId};
pub use registration::{ProductDraft, register_product};
pub use response::{CreateResponse, ErrorReason, UpdateResponse};
