//! Catalog labels (categories and tags) and the registry that owns them.
//!
//! Products never embed label objects; they hold [`CategoryId`]/[`TagId`]
//! references into a [`CatalogRegistry`], so there is exactly one label object
//! per name.

pub mod label;
pub mod registry;

pub use label::{Category, CategoryId, Tag, TagId};
pub use registry::CatalogRegistry;
