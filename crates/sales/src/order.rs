use std::sync::MutexGuard;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use stockroom_core::{DomainError, DomainResult, Entity, OrderId, Sku, ValueObject};
use stockroom_products::{Product, SharedProduct, line_amount, sum_amounts};

/// Status reported by a successful purchase.
pub const PURCHASE_COMPLETED: &str = "Purchase Completed";

/// Order status lifecycle: `Open` until the first successful `buy()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Open,
    Bought,
}

/// Order line: a shared product and the requested quantity.
#[derive(Debug, Clone)]
pub struct LineItem {
    product: SharedProduct,
    quantity: i64,
}

impl LineItem {
    pub fn product(&self) -> &SharedProduct {
        &self.product
    }

    pub fn sku(&self) -> &Sku {
        self.product.sku()
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    /// Line total at the product's current price.
    pub fn total(&self) -> DomainResult<Decimal> {
        line_amount(self.product.lock().price(), self.quantity)
    }
}

/// Confirmation returned by a successful [`Order::buy`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseReceipt {
    pub order_id: OrderId,
    pub total: Decimal,
    pub status: String,
    pub completed_at: DateTime<Utc>,
}

impl ValueObject for PurchaseReceipt {}

impl core::fmt::Display for PurchaseReceipt {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "Order ID: {} - Total: ${:.2} - {}",
            self.order_id, self.total, self.status
        )
    }
}

/// A collection of line items keyed by SKU, in insertion order.
///
/// Orders reference products (they never copy them) and need not be tied to
/// any inventory.
#[derive(Debug, Clone)]
pub struct Order {
    id: OrderId,
    status: OrderStatus,
    items: Vec<LineItem>,
}

impl Order {
    pub fn new(id: OrderId) -> Self {
        Self {
            id,
            status: OrderStatus::Open,
            items: Vec::new(),
        }
    }

    pub fn order_id(&self) -> &OrderId {
        &self.id
    }

    pub fn status(&self) -> OrderStatus {
        self.status
    }

    pub fn is_modifiable(&self) -> bool {
        matches!(self.status, OrderStatus::Open)
    }

    pub fn line_items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn quantity_of(&self, sku: &Sku) -> Option<i64> {
        self.items
            .iter()
            .find(|item| item.sku() == sku)
            .map(LineItem::quantity)
    }

    /// Add `quantity` units of `product`.
    ///
    /// A SKU already on the order accumulates quantity instead of adding a
    /// second line.
    pub fn add_product(&mut self, product: &SharedProduct, quantity: i64) -> DomainResult<()> {
        self.ensure_modifiable()?;
        if quantity <= 0 {
            return Err(DomainError::validation("quantity must be positive"));
        }

        if let Some(item) = self.items.iter_mut().find(|item| item.sku() == product.sku()) {
            item.quantity = item
                .quantity
                .checked_add(quantity)
                .ok_or_else(|| DomainError::validation("quantity overflow"))?;
            return Ok(());
        }

        self.items.push(LineItem {
            product: product.clone(),
            quantity,
        });
        Ok(())
    }

    /// Remove the line item for `sku`, returning it.
    pub fn remove_product(&mut self, sku: &Sku) -> DomainResult<LineItem> {
        self.ensure_modifiable()?;
        let index = self
            .items
            .iter()
            .position(|item| item.sku() == sku)
            .ok_or_else(|| DomainError::not_found(format!("line item {sku}")))?;
        Ok(self.items.remove(index))
    }

    /// Sum of line totals at each product's current price.
    pub fn calculate_total(&self) -> DomainResult<Decimal> {
        sum_amounts(self.items.iter().map(LineItem::total))
    }

    pub fn get_order_summary(&self) -> DomainResult<String> {
        let mut lines = vec![format!("Order ID: {}", self.id)];
        let mut line_totals = Vec::with_capacity(self.items.len());
        for item in &self.items {
            let (name, line_total) = {
                let product = item.product.lock();
                (
                    product.name().to_string(),
                    line_amount(product.price(), item.quantity)?,
                )
            };
            line_totals.push(line_total);
            lines.push(format!("{} (x{}) - ${:.2}", name, item.quantity, line_total));
        }
        let total = sum_amounts(line_totals.into_iter().map(Ok))?;
        lines.push(format!("Total: ${total:.2}"));
        Ok(lines.join("\n"))
    }

    /// Commit the order against product stock.
    ///
    /// All product locks are taken in ascending SKU order and held while every
    /// line item is checked; stock is decremented only if all of them can be
    /// served. On failure nothing changes and the order stays `Open`.
    pub fn buy(&mut self) -> DomainResult<PurchaseReceipt> {
        if self.status == OrderStatus::Bought {
            return Err(DomainError::invalid_state(format!(
                "order {} has already been bought",
                self.id
            )));
        }
        if self.items.is_empty() {
            return Err(DomainError::validation("cannot buy an order without line items"));
        }

        let mut guards = self.lock_products();

        let total = sum_amounts(
            self.items
                .iter()
                .zip(guards.iter())
                .map(|(item, product)| line_amount(product.price(), item.quantity)),
        )?;

        for (item, product) in self.items.iter().zip(guards.iter()) {
            if product.current_stock() < item.quantity {
                tracing::warn!(
                    order_id = %self.id,
                    sku = %item.sku(),
                    available = product.current_stock(),
                    requested = item.quantity,
                    "purchase rejected: insufficient stock"
                );
                return Err(DomainError::insufficient_stock(
                    product.name(),
                    product.current_stock(),
                    item.quantity,
                ));
            }
        }

        // Every stock is at least its positive quantity, so no decrement can fail.
        for (item, product) in self.items.iter().zip(guards.iter_mut()) {
            product.update_stock(-item.quantity)?;
        }
        drop(guards);

        self.status = OrderStatus::Bought;
        tracing::info!(
            order_id = %self.id,
            total = %total,
            items = self.items.len(),
            "purchase completed"
        );

        Ok(PurchaseReceipt {
            order_id: self.id.clone(),
            total,
            status: PURCHASE_COMPLETED.to_string(),
            completed_at: Utc::now(),
        })
    }

    /// Lock every line item's product in ascending SKU order.
    ///
    /// Guards are returned in line-item order. SKUs are unique within an order,
    /// so no product is locked twice.
    fn lock_products(&self) -> Vec<MutexGuard<'_, Product>> {
        let mut lock_order: Vec<usize> = (0..self.items.len()).collect();
        lock_order.sort_by(|&a, &b| self.items[a].sku().cmp(self.items[b].sku()));

        let mut slots: Vec<Option<MutexGuard<'_, Product>>> =
            (0..self.items.len()).map(|_| None).collect();
        for index in lock_order {
            slots[index] = Some(self.items[index].product.lock());
        }
        slots.into_iter().flatten().collect()
    }

    fn ensure_modifiable(&self) -> DomainResult<()> {
        if !self.is_modifiable() {
            return Err(DomainError::invalid_state(format!(
                "cannot modify order {} once it is bought",
                self.id
            )));
        }
        Ok(())
    }
}

impl Entity for Order {
    type Id = OrderId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl core::fmt::Display for Order {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "Order(order_id='{}', total_items={})",
            self.id,
            self.items.len()
        )
    }
}
