//! Quantity operation engine.
//!
//! Order, Ship and Restock share one validation chain, evaluated in strict
//! order with the first failing check winning:
//!
//! 1. negative quantity          -> `QuantityInvalid`
//! 2. no product for the id      -> `InvalidRequest`
//! 3. operation capacity check   -> `NotEnoughQuantity`
//!    (a Restock the ledger cannot represent -> `QuantityInvalid`)
//! 4. apply the mutation
//!
//! The precedence `QuantityInvalid > InvalidRequest > NotEnoughQuantity` is a
//! contract, expressed below as ordered early-exit guards. The engine never
//! persists anything: it returns the updated product for the caller to store,
//! or the single reason the request was rejected.

use serde::{Deserialize, Serialize};

use crate::product::{Product, ProductId};
use crate::response::ErrorReason;

/// A request to change one product's quantities. Its meaning (reserve more,
/// ship out, restock in) is determined by the operation receiving it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuantityChangeRequest {
    pub id: ProductId,
    pub quantity: i64,
}

/// The three quantity state transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityOperation {
    /// Reserve stock for future shipment: `reserved += quantity`.
    Order,
    /// Fulfill a reservation: `reserved -= quantity` (floored at 0), then
    /// `in_stock -= quantity`.
    Ship,
    /// Replenish: `in_stock += quantity`. No stock ceiling beyond what the
    /// ledger's integer type can represent.
    Restock,
}

impl QuantityOperation {
    /// Run the validation chain against a fetched product and, if every check
    /// passes, return the product with the mutation applied.
    pub fn execute(
        self,
        product: Option<&Product>,
        quantity: i64,
    ) -> Result<Product, ErrorReason> {
        if quantity < 0 {
            return Err(ErrorReason::QuantityInvalid);
        }
        let product = product.ok_or(ErrorReason::InvalidRequest)?;
        self.check_capacity(product, quantity)?;
        Ok(self.apply(product.clone(), quantity))
    }

    fn check_capacity(self, product: &Product, quantity: i64) -> Result<(), ErrorReason> {
        match self {
            // Reservations must never outrun physical stock. A sum that does
            // not even fit in i64 exceeds any representable stock level.
            QuantityOperation::Order => match product.reserved_quantity.checked_add(quantity) {
                Some(total) if total <= product.in_stock_quantity => Ok(()),
                _ => Err(ErrorReason::NotEnoughQuantity),
            },
            // Stock must never go negative. Both operands are non-negative
            // here, so the subtraction itself cannot overflow.
            QuantityOperation::Ship if product.in_stock_quantity - quantity < 0 => {
                Err(ErrorReason::NotEnoughQuantity)
            }
            QuantityOperation::Ship => Ok(()),
            // A quantity the ledger cannot represent is an invalid request,
            // not a capacity problem.
            QuantityOperation::Restock => match product.in_stock_quantity.checked_add(quantity) {
                Some(_) => Ok(()),
                None => Err(ErrorReason::QuantityInvalid),
            },
        }
    }

    fn apply(self, mut product: Product, quantity: i64) -> Product {
        // check_capacity has already bounded every sum below, so the plain
        // additions cannot overflow.
        match self {
            QuantityOperation::Order => {
                product.reserved_quantity += quantity;
            }
            QuantityOperation::Ship => {
                // Over-reservation cleanup must not block a legitimate
                // shipment: clamp the reserved balance instead of failing.
                product.reserved_quantity =
                    product.reserved_quantity.saturating_sub(quantity).max(0);
                product.in_stock_quantity -= quantity;
            }
            QuantityOperation::Restock => {
                product.in_stock_quantity += quantity;
            }
        }
        product
    }
}
