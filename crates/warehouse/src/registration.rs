//! Product registration workflow.
//!
//! Same short-circuit validation discipline as the quantity engine: the first
//! failing check wins. A passing registration yields an id-less draft; id
//! assignment and persistence are the store's concern.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::naming::resolve_unique_name;
use crate::response::ErrorReason;

/// A validated, uniquely named product awaiting id assignment by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDraft {
    pub name: String,
    pub in_stock_quantity: i64,
    pub reserved_quantity: i64,
}

/// Validate a registration request and resolve its name against the current
/// product set.
///
/// Chain: negative stock -> `QuantityInvalid`; blank name (after trimming) ->
/// `InvalidRequest`; otherwise the draft carries the resolved name and a
/// reserved quantity forced to zero.
pub fn register_product(
    name: &str,
    in_stock_quantity: i64,
    existing_names: &HashSet<String>,
) -> Result<ProductDraft, ErrorReason> {
    if in_stock_quantity < 0 {
        return Err(ErrorReason::QuantityInvalid);
    }
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ErrorReason::InvalidRequest);
    }

    Ok(ProductDraft {
        name: resolve_unique_name(trimmed, existing_names),
        in_stock_quantity,
        reserved_quantity: 0,
    })
}
