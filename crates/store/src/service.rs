//! Warehouse orchestration: fetch, validate, apply, persist.
//!
//! The service owns the read-then-validate-then-write sequence the pure
//! engine cannot do for itself. Each quantity operation runs under optimistic
//! concurrency: the product is fetched with its version, the engine decides,
//! and the compare-and-swap persist either lands or the whole chain is re-run
//! against fresh state. Business rejections are deterministic and never
//! retried; only version conflicts are.

use std::collections::HashSet;

use stockroom_warehouse::{
    CreateResponse, Product, ProductId, QuantityChangeRequest, QuantityOperation, UpdateResponse,
    register_product,
};

use crate::error::StoreError;
use crate::product_store::ProductStore;

/// Bound on compare-and-swap retries before a contended operation gives up.
pub const MAX_CONFLICT_RETRIES: u32 = 5;

/// Stateless facade over a [`ProductStore`]; all state lives in the store.
#[derive(Debug)]
pub struct WarehouseService<S> {
    store: S,
}

impl<S> WarehouseService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }
}

impl<S: ProductStore> WarehouseService<S> {
    /// Single product lookup; `None` for an unknown id.
    pub fn get_product(&self, id: ProductId) -> Result<Option<Product>, StoreError> {
        self.store.get(id)
    }

    /// Products with unreserved stock remaining.
    pub fn in_stock_products(&self) -> Result<Vec<Product>, StoreError> {
        self.store.query(&Product::has_available_stock)
    }

    /// Reserve stock for future shipment.
    pub fn order(&self, request: QuantityChangeRequest) -> Result<UpdateResponse, StoreError> {
        self.execute(QuantityOperation::Order, request)
    }

    /// Fulfill a reservation, depleting stock.
    pub fn ship(&self, request: QuantityChangeRequest) -> Result<UpdateResponse, StoreError> {
        self.execute(QuantityOperation::Ship, request)
    }

    /// Replenish stock.
    pub fn restock(&self, request: QuantityChangeRequest) -> Result<UpdateResponse, StoreError> {
        self.execute(QuantityOperation::Restock, request)
    }

    /// Register a new product with a guaranteed-unique name.
    pub fn add_product(
        &self,
        name: &str,
        in_stock_quantity: i64,
    ) -> Result<CreateResponse<Product>, StoreError> {
        let existing_names: HashSet<String> =
            self.store.list()?.into_iter().map(|p| p.name).collect();

        match register_product(name, in_stock_quantity, &existing_names) {
            Ok(draft) => {
                let stored = self.store.insert(draft)?;
                tracing::debug!(id = %stored.id, name = %stored.name, "registered product");
                Ok(CreateResponse::created(stored))
            }
            Err(reason) => Ok(CreateResponse::failed(reason)),
        }
    }

    fn execute(
        &self,
        operation: QuantityOperation,
        request: QuantityChangeRequest,
    ) -> Result<UpdateResponse, StoreError> {
        for attempt in 1..=MAX_CONFLICT_RETRIES {
            let fetched = self.store.get_versioned(request.id)?;

            let decision =
                operation.execute(fetched.as_ref().map(|(p, _)| p), request.quantity);
            let updated = match decision {
                Ok(updated) => updated,
                // Deterministic rejection: retrying cannot change it.
                Err(reason) => return Ok(UpdateResponse::failed(reason)),
            };

            // The engine approved, so the product was present.
            let version = fetched.map(|(_, v)| v).unwrap_or(0);
            match self.store.update_quantities(&updated, version) {
                Ok(()) => return Ok(UpdateResponse::ok()),
                Err(StoreError::Conflict(msg)) => {
                    tracing::debug!(
                        id = %request.id,
                        attempt,
                        conflict = %msg,
                        "quantity update lost a version race, revalidating"
                    );
                }
                Err(e) => return Err(e),
            }
        }

        tracing::warn!(
            id = %request.id,
            retries = MAX_CONFLICT_RETRIES,
            "quantity update exhausted conflict retries"
        );
        Err(StoreError::Conflict(format!(
            "product {} stayed contended across {} attempts",
            request.id, MAX_CONFLICT_RETRIES
        )))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};

    use stockroom_warehouse::{ErrorReason, ProductDraft};

    use super::*;
    use crate::product_store::InMemoryProductStore;

    fn service_with(
        products: impl IntoIterator<Item = Product>,
    ) -> WarehouseService<InMemoryProductStore> {
        WarehouseService::new(InMemoryProductStore::with_products(products))
    }

    fn widget(in_stock: i64, reserved: i64) -> Product {
        Product {
            id: ProductId::new(1),
            name: "Widget".to_string(),
            in_stock_quantity: in_stock,
            reserved_quantity: reserved,
        }
    }

    fn request(id: i64, quantity: i64) -> QuantityChangeRequest {
        QuantityChangeRequest {
            id: ProductId::new(id),
            quantity,
        }
    }

    #[test]
    fn order_persists_on_success() {
        let service = service_with([widget(10, 5)]);

        let response = service.order(request(1, 3)).unwrap();
        assert!(response.success);

        let stored = service.get_product(ProductId::new(1)).unwrap().unwrap();
        assert_eq!(stored.reserved_quantity, 8);
    }

    #[test]
    fn failed_order_leaves_store_untouched() {
        let service = service_with([widget(10, 5)]);

        let response = service.order(request(1, 6)).unwrap();
        assert_eq!(response.error_reason, Some(ErrorReason::NotEnoughQuantity));

        let stored = service.get_product(ProductId::new(1)).unwrap().unwrap();
        assert_eq!(stored.reserved_quantity, 5);
        assert_eq!(stored.in_stock_quantity, 10);
    }

    #[test]
    fn unknown_id_fails_without_retry() {
        let service = service_with([]);
        let response = service.ship(request(404, 1)).unwrap();
        assert_eq!(response.error_reason, Some(ErrorReason::InvalidRequest));
    }

    #[test]
    fn add_product_assigns_id_and_persists() {
        let service = service_with([]);

        let response = service.add_product("Widget", 10).unwrap();
        assert!(response.success);

        let stored = response.model.unwrap();
        assert_eq!(service.get_product(stored.id).unwrap(), Some(stored));
    }

    #[test]
    fn add_product_resolves_duplicate_names() {
        let service = service_with([]);

        let first = service.add_product("Widget", 1).unwrap().model.unwrap();
        let second = service.add_product("Widget", 1).unwrap().model.unwrap();

        assert_eq!(first.name, "Widget");
        assert_eq!(second.name, "Widget (2)");
    }

    #[test]
    fn add_product_rejection_persists_nothing() {
        let service = service_with([]);

        let response = service.add_product("  ", 1).unwrap();
        assert_eq!(response.error_reason, Some(ErrorReason::InvalidRequest));
        assert!(response.model.is_none());
        assert!(service.in_stock_products().unwrap().is_empty());
    }

    /// Store that reports a version conflict for the first `conflicts` update
    /// attempts, then delegates.
    struct ContendedStore {
        inner: InMemoryProductStore,
        remaining_conflicts: AtomicU32,
    }

    impl ContendedStore {
        fn new(inner: InMemoryProductStore, conflicts: u32) -> Self {
            Self {
                inner,
                remaining_conflicts: AtomicU32::new(conflicts),
            }
        }
    }

    impl ProductStore for ContendedStore {
        fn list(&self) -> Result<Vec<Product>, StoreError> {
            self.inner.list()
        }

        fn get(&self, id: ProductId) -> Result<Option<Product>, StoreError> {
            self.inner.get(id)
        }

        fn query(
            &self,
            predicate: &dyn Fn(&Product) -> bool,
        ) -> Result<Vec<Product>, StoreError> {
            self.inner.query(predicate)
        }

        fn get_versioned(&self, id: ProductId) -> Result<Option<(Product, u64)>, StoreError> {
            self.inner.get_versioned(id)
        }

        fn update_quantities(
            &self,
            product: &Product,
            expected_version: u64,
        ) -> Result<(), StoreError> {
            if self
                .remaining_conflicts
                .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
                .is_ok()
            {
                return Err(StoreError::Conflict("simulated race".to_string()));
            }
            self.inner.update_quantities(product, expected_version)
        }

        fn insert(&self, draft: ProductDraft) -> Result<Product, StoreError> {
            self.inner.insert(draft)
        }
    }

    #[test]
    fn conflicted_update_is_retried_to_success() {
        let store = ContendedStore::new(InMemoryProductStore::with_products([widget(10, 0)]), 2);
        let service = WarehouseService::new(Arc::new(store));

        let response = service.order(request(1, 4)).unwrap();
        assert!(response.success);

        let stored = service.get_product(ProductId::new(1)).unwrap().unwrap();
        assert_eq!(stored.reserved_quantity, 4);
    }

    #[test]
    fn exhausted_retries_surface_a_conflict_error() {
        let store = ContendedStore::new(
            InMemoryProductStore::with_products([widget(10, 0)]),
            MAX_CONFLICT_RETRIES,
        );
        let service = WarehouseService::new(Arc::new(store));

        let err = service.order(request(1, 4)).unwrap_err();
        assert!(matches!(err, StoreError::Conflict(_)));
    }
}
