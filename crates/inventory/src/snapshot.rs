//! Plain-data interchange shape for inventories.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use stockroom_catalog::{CatalogRegistry, Category, Tag};
use stockroom_core::{DomainResult, Sku};
use stockroom_products::Product;

use crate::inventory::Inventory;

/// A product with its labels resolved to full category/tag records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub name: String,
    pub sku: Sku,
    pub price: Decimal,
    pub current_stock: i64,
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub tags: Vec<Tag>,
}

impl ProductRecord {
    /// Resolve a product's labels against `catalog`.
    pub fn from_product(product: &Product, catalog: &CatalogRegistry) -> DomainResult<Self> {
        let categories = product
            .categories()
            .iter()
            .map(|id| catalog.require_category(id).cloned())
            .collect::<DomainResult<Vec<_>>>()?;
        let tags = product
            .tags()
            .iter()
            .map(|id| catalog.require_tag(id).cloned())
            .collect::<DomainResult<Vec<_>>>()?;

        Ok(Self {
            name: product.name().to_string(),
            sku: product.sku().clone(),
            price: product.price(),
            current_stock: product.current_stock(),
            categories,
            tags,
        })
    }

    /// Build the product, interning its labels into `catalog`.
    ///
    /// The rebuilt product starts a fresh price history at the recorded price.
    /// Recorded stock is taken as is, including negative levels.
    pub fn into_product(self, catalog: &mut CatalogRegistry) -> DomainResult<Product> {
        let mut product = Product::restore(self.name, self.sku, self.price, self.current_stock)?;
        for category in self.categories {
            let id = catalog.intern_category(category)?;
            product.add_category(id);
        }
        for tag in self.tags {
            let id = catalog.intern_tag(tag)?;
            product.add_tag(id);
        }
        Ok(product)
    }
}

/// Every product of an inventory, in registration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventorySnapshot {
    pub products: Vec<ProductRecord>,
}

impl Inventory {
    pub fn snapshot(&self) -> DomainResult<InventorySnapshot> {
        let products = self
            .iter()
            .map(|p| ProductRecord::from_product(&p.lock(), self.catalog()))
            .collect::<DomainResult<Vec<_>>>()?;
        Ok(InventorySnapshot { products })
    }

    /// Rebuild an inventory from a snapshot.
    ///
    /// Labels shared by several products are registered once; duplicate SKUs
    /// fail with `AlreadyExists`.
    pub fn from_snapshot(snapshot: InventorySnapshot) -> DomainResult<Self> {
        let mut inventory = Inventory::new();
        for record in snapshot.products {
            let product = record.into_product(inventory.catalog_mut())?;
            inventory.add_product(product)?;
        }
        tracing::debug!(products = inventory.len(), "inventory restored from snapshot");
        Ok(inventory)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use stockroom_core::DomainError;

    fn sku(s: &str) -> Sku {
        Sku::new(s).unwrap()
    }

    fn labelled_inventory() -> Inventory {
        let mut inventory = Inventory::new();
        let electronics = inventory
            .catalog_mut()
            .register_category(Category::new("Electronics", "Devices and gadgets").unwrap())
            .unwrap();
        let on_sale = inventory
            .catalog_mut()
            .register_tag(Tag::new("On Sale").unwrap())
            .unwrap();

        let mut laptop = Product::new("Laptop", sku("SKU123"), dec!(1200), 10).unwrap();
        laptop.add_category(electronics.clone());
        laptop.add_tag(on_sale.clone());
        inventory.add_product(laptop).unwrap();

        let mut mouse = Product::new("Mouse", sku("SKU456"), dec!(25.50), 100).unwrap();
        mouse.add_tag(on_sale);
        inventory.add_product(mouse).unwrap();
        inventory
    }

    #[test]
    fn snapshot_round_trips_through_json() {
        let inventory = labelled_inventory();
        let json = serde_json::to_string(&inventory.snapshot().unwrap()).unwrap();

        let decoded: InventorySnapshot = serde_json::from_str(&json).unwrap();
        let restored = Inventory::from_snapshot(decoded).unwrap();

        assert_eq!(restored.len(), 2);
        for original in inventory.list_products() {
            let original = original.lock();
            let copy = restored.get_product(original.sku()).unwrap();
            let copy = copy.lock();
            assert_eq!(copy.price(), original.price());
            assert_eq!(copy.current_stock(), original.current_stock());
            assert_eq!(copy.categories(), original.categories());
            assert_eq!(copy.tags(), original.tags());
        }
        assert_eq!(restored.catalog().tags().len(), 1);
        assert_eq!(restored.catalog().categories().len(), 1);
        assert_eq!(
            restored.generate_inventory_report(),
            inventory.generate_inventory_report()
        );
    }

    #[test]
    fn record_uses_interchange_field_names() {
        let inventory = labelled_inventory();
        let snapshot = inventory.snapshot().unwrap();
        let value = serde_json::to_value(&snapshot.products[0]).unwrap();

        assert_eq!(value["name"], "Laptop");
        assert_eq!(value["sku"], "SKU123");
        assert_eq!(value["current_stock"], 10);
        assert_eq!(value["categories"][0]["name"], "Electronics");
        assert_eq!(value["categories"][0]["description"], "Devices and gadgets");
        assert_eq!(value["tags"][0]["name"], "On Sale");
    }

    #[test]
    fn from_snapshot_rejects_duplicate_skus() {
        let record = ProductRecord {
            name: "Laptop".to_string(),
            sku: sku("SKU123"),
            price: dec!(1200),
            current_stock: 10,
            categories: Vec::new(),
            tags: Vec::new(),
        };
        let snapshot = InventorySnapshot {
            products: vec![record.clone(), record],
        };
        assert!(matches!(
            Inventory::from_snapshot(snapshot),
            Err(DomainError::AlreadyExists(_))
        ));
    }

    #[test]
    fn negative_stock_survives_round_trip() {
        let mut inventory = Inventory::new();
        let laptop = inventory
            .add_product(Product::new("Laptop", sku("SKU123"), dec!(1200), 1).unwrap())
            .unwrap();
        laptop.lock().update_stock(-3).unwrap();

        let json = serde_json::to_string(&inventory.snapshot().unwrap()).unwrap();
        let restored = Inventory::from_snapshot(serde_json::from_str(&json).unwrap()).unwrap();

        let copy = restored.require_product(&sku("SKU123")).unwrap();
        assert_eq!(copy.lock().current_stock(), -2);
        assert!(!copy.lock().is_in_stock());
    }

    #[test]
    fn from_snapshot_rejects_invalid_records() {
        let json = r#"{"products":[{"name":"Mouse","sku":"SKU456","price":"-1","current_stock":3}]}"#;
        let snapshot: InventorySnapshot = serde_json::from_str(json).unwrap();
        assert!(matches!(
            Inventory::from_snapshot(snapshot),
            Err(DomainError::Validation(_))
        ));
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: snapshot -> JSON -> restore preserves SKUs, prices and stocks.
            #[test]
            fn round_trip_preserves_prices_and_stocks(
                products in proptest::collection::vec(
                    (0i64..10_000_000, 0i64..1_000, -2_000i64..2_000, 0u32..=100),
                    0..8
                )
            ) {
                let mut inventory = Inventory::new();
                for (i, (price_cents, stock, delta, discount)) in products.iter().enumerate() {
                    let price = Decimal::new(*price_cents, 2);
                    let code = format!("SKU{i}");
                    let handle = inventory
                        .add_product(Product::new("Widget", sku(&code), price, *stock).unwrap())
                        .unwrap();
                    let mut product = handle.lock();
                    product.update_stock(*delta).unwrap();
                    product.apply_discount(Decimal::from(*discount)).unwrap();
                }

                let json = serde_json::to_string(&inventory.snapshot().unwrap()).unwrap();
                let decoded: InventorySnapshot = serde_json::from_str(&json).unwrap();
                let restored = Inventory::from_snapshot(decoded).unwrap();

                prop_assert_eq!(restored.len(), inventory.len());
                let pairs = inventory.list_products().into_iter().zip(restored.list_products());
                for (original, copy) in pairs {
                    let (original, copy) = (original.lock(), copy.lock());
                    prop_assert_eq!(copy.sku(), original.sku());
                    prop_assert_eq!(copy.price(), original.price());
                    prop_assert_eq!(copy.current_stock(), original.current_stock());
                }
            }
        }
    }
}
