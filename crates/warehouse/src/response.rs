//! Operation result types returned to callers.
//!
//! Rejections here are **expected business outcomes**, not faults: every
//! operation reports success plus, on failure, exactly one reason. Anything
//! genuinely unexpected (store unreachable, poisoned state) travels as an
//! error through the store layer instead.

use serde::{Deserialize, Serialize};

/// Why an operation was rejected. Serialized as the variant name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorReason {
    /// A negative quantity was requested.
    QuantityInvalid,
    /// The target product does not exist, or a required field was blank.
    InvalidRequest,
    /// The operation would violate a stock or reservation bound.
    NotEnoughQuantity,
}

/// Outcome of a quantity operation (order / ship / restock).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_reason: Option<ErrorReason>,
}

impl UpdateResponse {
    pub fn ok() -> Self {
        Self {
            success: true,
            error_reason: None,
        }
    }

    pub fn failed(reason: ErrorReason) -> Self {
        Self {
            success: false,
            error_reason: Some(reason),
        }
    }
}

/// Outcome of a creation, carrying the created model only on success.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateResponse<T> {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_reason: Option<ErrorReason>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<T>,
}

impl<T> CreateResponse<T> {
    pub fn created(model: T) -> Self {
        Self {
            success: true,
            error_reason: None,
            model: Some(model),
        }
    }

    pub fn failed(reason: ErrorReason) -> Self {
        Self {
            success: false,
            error_reason: Some(reason),
            model: None,
        }
    }
}
