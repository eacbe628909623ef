//! Request DTOs.
//!
//! Missing body fields default to zero/empty so that malformed requests fall
//! through the business validation chain (`QuantityInvalid` /
//! `InvalidRequest` with `success=false`) instead of dying in the
//! deserializer.

use serde::Deserialize;

use stockroom_warehouse::{ProductId, QuantityChangeRequest};

/// Body of the order/ship/restock endpoints: `{"id": 1, "quantity": 2}`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct QuantityChangeBody {
    pub id: i64,
    pub quantity: i64,
}

impl From<QuantityChangeBody> for QuantityChangeRequest {
    fn from(body: QuantityChangeBody) -> Self {
        Self {
            id: ProductId::new(body.id),
            quantity: body.quantity,
        }
    }
}

/// Body of the add endpoint. Clients send a product-shaped object; only the
/// name and in-stock quantity are honored, `id` and `reservedQuantity` are
/// ignored.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AddProductBody {
    pub name: String,
    pub in_stock_quantity: i64,
}
