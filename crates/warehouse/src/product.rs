//! Product model and identifier.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

/// Product identifier, assigned by the store at registration time.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(i64);

impl ProductId {
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    pub const fn as_i64(&self) -> i64 {
        self.0
    }
}

impl core::fmt::Display for ProductId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl From<i64> for ProductId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<ProductId> for i64 {
    fn from(value: ProductId) -> Self {
        value.0
    }
}

impl FromStr for ProductId {
    type Err = core::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(i64::from_str(s)?))
    }
}

/// A warehouse product.
///
/// `reserved_quantity` tracks units earmarked for shipment but still on the
/// shelf; under normal operation `0 <= reserved_quantity <= in_stock_quantity`.
/// The engine's Ship operation clamps rather than fails when a prior
/// over-reservation would push the reserved balance negative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub in_stock_quantity: i64,
    pub reserved_quantity: i64,
}

impl Product {
    /// Whether unreserved units remain on the shelf.
    pub fn has_available_stock(&self) -> bool {
        self.in_stock_quantity > self.reserved_quantity
    }
}
