//! Shared product handles.
//!
//! Inventories and orders reference the same product instance; each instance is
//! guarded by its own lock so stock updates on one SKU never block another.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use stockroom_core::Sku;

use crate::product::Product;

/// Cloneable handle to a product shared between an inventory and its orders.
#[derive(Debug, Clone)]
pub struct SharedProduct {
    // A product's SKU never changes, so it is readable without the lock.
    sku: Sku,
    inner: Arc<Mutex<Product>>,
}

impl SharedProduct {
    pub fn new(product: Product) -> Self {
        Self {
            sku: product.sku().clone(),
            inner: Arc::new(Mutex::new(product)),
        }
    }

    pub fn sku(&self) -> &Sku {
        &self.sku
    }

    /// Acquire the product lock.
    ///
    /// A poisoned lock is recovered rather than propagated.
    pub fn lock(&self) -> MutexGuard<'_, Product> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Copy of the product's current state.
    pub fn snapshot(&self) -> Product {
        self.lock().clone()
    }

    /// Whether both handles point at the same product instance.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl From<Product> for SharedProduct {
    fn from(product: Product) -> Self {
        Self::new(product)
    }
}
