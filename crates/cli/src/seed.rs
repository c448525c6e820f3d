//! Seed file: an inventory snapshot plus discounts and order requests to run.

use std::path::Path;

use anyhow::Context;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use stockroom_core::{DomainResult, Sku};
use stockroom_inventory::{Inventory, InventorySnapshot};
use stockroom_sales::OrderRequest;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Discount {
    pub sku: Sku,
    pub percent: Decimal,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seed {
    #[serde(flatten)]
    pub inventory: InventorySnapshot,
    #[serde(default)]
    pub discounts: Vec<Discount>,
    #[serde(default)]
    pub orders: Vec<OrderRequest>,
}

impl Seed {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read seed file {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse seed file {}", path.display()))
    }

    /// Build the inventory and apply the seeded discounts to it.
    pub fn build_inventory(&self) -> DomainResult<Inventory> {
        let inventory = Inventory::from_snapshot(self.inventory.clone())?;
        for discount in &self.discounts {
            let product = inventory.require_product(&discount.sku)?;
            product.lock().apply_discount(discount.percent)?;
        }
        Ok(inventory)
    }
}
