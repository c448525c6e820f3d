use std::collections::HashMap;

use rust_decimal::Decimal;

use stockroom_catalog::{CatalogRegistry, CategoryId, TagId};
use stockroom_core::{DomainError, DomainResult, Sku};
use stockroom_products::{Product, SharedProduct, sum_amounts};

/// Registry of products keyed by SKU.
///
/// Products are kept in registration order; a SKU maps to at most one product
/// and the first registration wins. The inventory also owns the catalog every
/// registered product's labels must resolve against.
#[derive(Debug, Default)]
pub struct Inventory {
    products: HashMap<Sku, SharedProduct>,
    order: Vec<Sku>,
    catalog: CatalogRegistry,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_catalog(catalog: CatalogRegistry) -> Self {
        Self {
            catalog,
            ..Self::default()
        }
    }

    pub fn catalog(&self) -> &CatalogRegistry {
        &self.catalog
    }

    pub fn catalog_mut(&mut self) -> &mut CatalogRegistry {
        &mut self.catalog
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Register a product and return the shared handle orders should use.
    ///
    /// Fails with `AlreadyExists` if the SKU is taken (the registered product is
    /// left untouched) and with `NotFound` if one of the product's labels is
    /// not in the catalog.
    pub fn add_product(
        &mut self,
        product: impl Into<SharedProduct>,
    ) -> DomainResult<SharedProduct> {
        let product = product.into();
        let sku = product.sku().clone();
        if self.products.contains_key(&sku) {
            return Err(DomainError::already_exists(format!("product {sku}")));
        }
        self.ensure_labels_registered(&product.lock())?;

        tracing::debug!(sku = %sku, "product registered");
        self.order.push(sku.clone());
        self.products.insert(sku, product.clone());
        Ok(product)
    }

    /// Unregister a product, returning its handle.
    ///
    /// Orders that already reference the product keep their handle.
    pub fn remove_product(&mut self, sku: &Sku) -> DomainResult<SharedProduct> {
        let product = self
            .products
            .remove(sku)
            .ok_or_else(|| DomainError::not_found(format!("product {sku}")))?;
        self.order.retain(|s| s != sku);
        tracing::debug!(sku = %sku, "product removed");
        Ok(product)
    }

    pub fn get_product(&self, sku: &Sku) -> Option<SharedProduct> {
        self.products.get(sku).cloned()
    }

    /// Like [`Inventory::get_product`], but an unknown SKU is a `NotFound` error.
    pub fn require_product(&self, sku: &Sku) -> DomainResult<SharedProduct> {
        self.get_product(sku)
            .ok_or_else(|| DomainError::not_found(format!("product {sku}")))
    }

    /// All products in registration order.
    pub fn list_products(&self) -> Vec<SharedProduct> {
        self.iter().cloned().collect()
    }

    /// Products whose name contains `fragment`, ignoring case.
    pub fn find_by_name(&self, fragment: &str) -> Vec<SharedProduct> {
        let needle = fragment.to_lowercase();
        self.iter()
            .filter(|p| p.lock().name().to_lowercase().contains(&needle))
            .cloned()
            .collect()
    }

    /// Sum of every product's stock value.
    ///
    /// Fails with `Validation` if the value does not fit in a `Decimal`.
    pub fn get_total_inventory_value(&self) -> DomainResult<Decimal> {
        sum_amounts(self.iter().map(|p| p.lock().calculate_total_value_in_stock()))
    }

    /// One [`Product::get_info`] line per product, in registration order.
    pub fn generate_inventory_report(&self) -> String {
        self.iter()
            .map(|p| p.lock().get_info())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Attach a registered category to a registered product.
    ///
    /// Returns `false` if the product already carried the category.
    pub fn categorize(&self, sku: &Sku, category: &CategoryId) -> DomainResult<bool> {
        self.catalog.require_category(category)?;
        let product = self.require_product(sku)?;
        let added = product.lock().add_category(category.clone());
        Ok(added)
    }

    /// Attach a registered tag to a registered product.
    ///
    /// Returns `false` if the product already carried the tag.
    pub fn tag(&self, sku: &Sku, tag: &TagId) -> DomainResult<bool> {
        self.catalog.require_tag(tag)?;
        let product = self.require_product(sku)?;
        let added = product.lock().add_tag(tag.clone());
        Ok(added)
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &SharedProduct> {
        self.order.iter().filter_map(|sku| self.products.get(sku))
    }

    fn ensure_labels_registered(&self, product: &Product) -> DomainResult<()> {
        for category in product.categories() {
            self.catalog.require_category(category)?;
        }
        for tag in product.tags() {
            self.catalog.require_tag(tag)?;
        }
        Ok(())
    }
}

impl core::fmt::Display for Inventory {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Inventory({} products)", self.len())
    }
}
