//! Sales orders domain module.
//!
//! Orders collect line items over shared products and commit them with
//! [`Order::buy`], which validates every line item before decrementing any
//! stock. Pure domain logic (no IO, no HTTP, no storage).

pub mod fulfillment;
pub mod order;

pub use fulfillment::{OrderOutcome, OrderRequest, OrderRequestItem, place_order, process_orders};
pub use order::{LineItem, Order, OrderStatus, PURCHASE_COMPLETED, PurchaseReceipt};
