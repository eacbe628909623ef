//! Product store trait and in-memory implementation.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use stockroom_warehouse::{Product, ProductDraft, ProductId};

use crate::error::StoreError;

/// The collaborator holding the authoritative product collection.
///
/// `get_versioned` / `update_quantities` form a compare-and-swap pair: the
/// version read with the product must be presented back when persisting, and
/// a moved version fails with [`StoreError::Conflict`]. This gives callers
/// per-product atomicity for the read-validate-write sequence without any
/// cross-product locking.
pub trait ProductStore: Send + Sync {
    /// Every product, in no particular order.
    fn list(&self) -> Result<Vec<Product>, StoreError>;

    /// A single product, or `None` if the id is unknown.
    fn get(&self, id: ProductId) -> Result<Option<Product>, StoreError>;

    /// Products matching the predicate.
    fn query(&self, predicate: &dyn Fn(&Product) -> bool) -> Result<Vec<Product>, StoreError>;

    /// A product together with its current store version.
    fn get_versioned(&self, id: ProductId) -> Result<Option<(Product, u64)>, StoreError>;

    /// Persist the product's quantities if its stored version still equals
    /// `expected_version`. The name is immutable after creation and is never
    /// written here.
    fn update_quantities(
        &self,
        product: &Product,
        expected_version: u64,
    ) -> Result<(), StoreError>;

    /// Assign the next id to the draft and persist it.
    fn insert(&self, draft: ProductDraft) -> Result<Product, StoreError>;
}

impl<S> ProductStore for Arc<S>
where
    S: ProductStore + ?Sized,
{
    fn list(&self) -> Result<Vec<Product>, StoreError> {
        (**self).list()
    }

    fn get(&self, id: ProductId) -> Result<Option<Product>, StoreError> {
        (**self).get(id)
    }

    fn query(&self, predicate: &dyn Fn(&Product) -> bool) -> Result<Vec<Product>, StoreError> {
        (**self).query(predicate)
    }

    fn get_versioned(&self, id: ProductId) -> Result<Option<(Product, u64)>, StoreError> {
        (**self).get_versioned(id)
    }

    fn update_quantities(
        &self,
        product: &Product,
        expected_version: u64,
    ) -> Result<(), StoreError> {
        (**self).update_quantities(product, expected_version)
    }

    fn insert(&self, draft: ProductDraft) -> Result<Product, StoreError> {
        (**self).insert(draft)
    }
}

#[derive(Debug, Clone)]
struct VersionedProduct {
    product: Product,
    version: u64,
}

#[derive(Debug)]
struct Inner {
    products: HashMap<ProductId, VersionedProduct>,
    next_id: i64,
}

/// In-memory product store.
///
/// A single `RwLock` over the collection makes each trait call atomic; the
/// per-product version counter detects lost updates between calls.
#[derive(Debug)]
pub struct InMemoryProductStore {
    inner: RwLock<Inner>,
}

impl InMemoryProductStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                products: HashMap::new(),
                next_id: 1,
            }),
        }
    }

    /// Seed the store with pre-existing products (tests, demos). Ids must be
    /// unique; versions start at 1.
    pub fn with_products(products: impl IntoIterator<Item = Product>) -> Self {
        let store = Self::new();
        if let Ok(mut inner) = store.inner.write() {
            for product in products {
                inner.next_id = inner.next_id.max(product.id.as_i64() + 1);
                inner
                    .products
                    .insert(product.id, VersionedProduct { product, version: 1 });
            }
        }
        store
    }
}

impl Default for InMemoryProductStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ProductStore for InMemoryProductStore {
    fn list(&self) -> Result<Vec<Product>, StoreError> {
        let inner = self.inner.read().map_err(|_| StoreError::Poisoned)?;
        Ok(inner.products.values().map(|v| v.product.clone()).collect())
    }

    fn get(&self, id: ProductId) -> Result<Option<Product>, StoreError> {
        let inner = self.inner.read().map_err(|_| StoreError::Poisoned)?;
        Ok(inner.products.get(&id).map(|v| v.product.clone()))
    }

    fn query(&self, predicate: &dyn Fn(&Product) -> bool) -> Result<Vec<Product>, StoreError> {
        let inner = self.inner.read().map_err(|_| StoreError::Poisoned)?;
        Ok(inner
            .products
            .values()
            .filter(|v| predicate(&v.product))
            .map(|v| v.product.clone())
            .collect())
    }

    fn get_versioned(&self, id: ProductId) -> Result<Option<(Product, u64)>, StoreError> {
        let inner = self.inner.read().map_err(|_| StoreError::Poisoned)?;
        Ok(inner
            .products
            .get(&id)
            .map(|v| (v.product.clone(), v.version)))
    }

    fn update_quantities(
        &self,
        product: &Product,
        expected_version: u64,
    ) -> Result<(), StoreError> {
        let mut inner = self.inner.write().map_err(|_| StoreError::Poisoned)?;
        let entry = inner
            .products
            .get_mut(&product.id)
            .ok_or(StoreError::Missing(product.id))?;

        if entry.version != expected_version {
            return Err(StoreError::Conflict(format!(
                "product {} is at version {}, expected {}",
                product.id, entry.version, expected_version
            )));
        }

        entry.product.in_stock_quantity = product.in_stock_quantity;
        entry.product.reserved_quantity = product.reserved_quantity;
        entry.version += 1;
        Ok(())
    }

    fn insert(&self, draft: ProductDraft) -> Result<Product, StoreError> {
        let mut inner = self.inner.write().map_err(|_| StoreError::Poisoned)?;
        let id = ProductId::new(inner.next_id);
        inner.next_id += 1;

        let product = Product {
            id,
            name: draft.name,
            in_stock_quantity: draft.in_stock_quantity,
            reserved_quantity: draft.reserved_quantity,
        };
        inner
            .products
            .insert(id, VersionedProduct { product: product.clone(), version: 1 });
        Ok(product)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(name: &str, in_stock: i64) -> ProductDraft {
        ProductDraft {
            name: name.to_string(),
            in_stock_quantity: in_stock,
            reserved_quantity: 0,
        }
    }

    #[test]
    fn insert_assigns_sequential_ids() {
        let store = InMemoryProductStore::new();
        let first = store.insert(draft("Widget", 10)).unwrap();
        let second = store.insert(draft("Gadget", 3)).unwrap();

        assert_eq!(first.id, ProductId::new(1));
        assert_eq!(second.id, ProductId::new(2));
        assert_eq!(store.list().unwrap().len(), 2);
    }

    #[test]
    fn get_distinguishes_absence_from_zero() {
        let store = InMemoryProductStore::new();
        let stored = store.insert(draft("Widget", 0)).unwrap();

        assert_eq!(store.get(stored.id).unwrap(), Some(stored));
        assert_eq!(store.get(ProductId::new(99)).unwrap(), None);
    }

    #[test]
    fn update_bumps_version_and_persists_quantities() {
        let store = InMemoryProductStore::new();
        let mut product = store.insert(draft("Widget", 10)).unwrap();
        let (_, version) = store.get_versioned(product.id).unwrap().unwrap();

        product.reserved_quantity = 4;
        store.update_quantities(&product, version).unwrap();

        let (reloaded, new_version) = store.get_versioned(product.id).unwrap().unwrap();
        assert_eq!(reloaded.reserved_quantity, 4);
        assert_eq!(new_version, version + 1);
    }

    #[test]
    fn stale_version_is_rejected() {
        let store = InMemoryProductStore::new();
        let mut product = store.insert(draft("Widget", 10)).unwrap();
        let (_, version) = store.get_versioned(product.id).unwrap().unwrap();

        product.reserved_quantity = 4;
        store.update_quantities(&product, version).unwrap();

        // Second writer presenting the same version loses.
        product.reserved_quantity = 6;
        let err = store.update_quantities(&product, version).unwrap_err();
        assert!(matches!(err, StoreError::Conflict(_)));

        let reloaded = store.get(product.id).unwrap().unwrap();
        assert_eq!(reloaded.reserved_quantity, 4);
    }

    #[test]
    fn update_for_unknown_id_reports_missing() {
        let store = InMemoryProductStore::new();
        let ghost = Product {
            id: ProductId::new(7),
            name: "Ghost".to_string(),
            in_stock_quantity: 1,
            reserved_quantity: 0,
        };
        assert_eq!(
            store.update_quantities(&ghost, 1),
            Err(StoreError::Missing(ProductId::new(7)))
        );
    }

    #[test]
    fn update_never_touches_the_name() {
        let store = InMemoryProductStore::new();
        let mut product = store.insert(draft("Widget", 10)).unwrap();
        let (_, version) = store.get_versioned(product.id).unwrap().unwrap();

        product.name = "Renamed".to_string();
        product.in_stock_quantity = 12;
        store.update_quantities(&product, version).unwrap();

        let reloaded = store.get(product.id).unwrap().unwrap();
        assert_eq!(reloaded.name, "Widget");
        assert_eq!(reloaded.in_stock_quantity, 12);
    }

    #[test]
    fn seeded_store_continues_id_sequence_past_seeds() {
        let store = InMemoryProductStore::with_products([Product {
            id: ProductId::new(5),
            name: "Widget".to_string(),
            in_stock_quantity: 1,
            reserved_quantity: 0,
        }]);

        let inserted = store.insert(draft("Gadget", 1)).unwrap();
        assert_eq!(inserted.id, ProductId::new(6));
    }
}
