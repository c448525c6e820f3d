//! Products domain module.
//!
//! A product is a plain data holder: it records price, stock, labels and price
//! history, and leaves business rules about selling to the order layer.

pub mod amount;
pub mod product;
pub mod shared;

pub use amount::{line_amount, sum_amounts};
pub use product::{INITIAL_PRICE_REASON, PriceChange, Product};
pub use shared::SharedProduct;
