//! Inventory domain module.
//!
//! An in-memory registry of products keyed by SKU, owning the catalog labels
//! those products refer to. Pure domain logic (no IO, no HTTP, no storage);
//! [`InventorySnapshot`] is the plain-data shape persistence layers round-trip.

pub mod inventory;
pub mod snapshot;

pub use inventory::Inventory;
pub use snapshot::{InventorySnapshot, ProductRecord};
