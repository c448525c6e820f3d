//! Order requests: the plain-data form of an order, resolved against an
//! inventory and processed in batches.

use serde::{Deserialize, Serialize};

use stockroom_core::{DomainResult, OrderId, Sku};
use stockroom_inventory::Inventory;

use crate::order::{Order, PurchaseReceipt};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRequestItem {
    pub sku: Sku,
    pub quantity: i64,
}

/// Interchange shape of an order: `{order_id, items: [{sku, quantity}]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRequest {
    pub order_id: OrderId,
    pub items: Vec<OrderRequestItem>,
}

/// Result of processing one request in a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderOutcome {
    pub order_id: OrderId,
    pub result: DomainResult<PurchaseReceipt>,
}

impl Order {
    pub fn to_request(&self) -> OrderRequest {
        OrderRequest {
            order_id: self.order_id().clone(),
            items: self
                .line_items()
                .iter()
                .map(|item| OrderRequestItem {
                    sku: item.sku().clone(),
                    quantity: item.quantity(),
                })
                .collect(),
        }
    }
}

/// Build an open order from a request, resolving SKUs against `inventory`.
///
/// Unknown SKUs fail with `NotFound`; repeated SKUs accumulate.
pub fn place_order(inventory: &Inventory, request: &OrderRequest) -> DomainResult<Order> {
    let mut order = Order::new(request.order_id.clone());
    for item in &request.items {
        let product = inventory.require_product(&item.sku)?;
        order.add_product(&product, item.quantity)?;
    }
    Ok(order)
}

/// Place and buy each request in turn.
///
/// A failing request does not stop the batch; every request gets an outcome,
/// in input order.
pub fn process_orders<I>(inventory: &Inventory, requests: I) -> Vec<OrderOutcome>
where
    I: IntoIterator<Item = OrderRequest>,
{
    requests
        .into_iter()
        .map(|request| {
            let result = place_order(inventory, &request).and_then(|mut order| order.buy());
            if let Err(err) = &result {
                tracing::warn!(order_id = %request.order_id, error = %err, "order not processed");
            }
            OrderOutcome {
                order_id: request.order_id,
                result,
            }
        })
        .collect()
}
