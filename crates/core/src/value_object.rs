//! Value object trait: equality by value, not identity.
//!
//! Value objects have **no identity**: they are defined entirely by their
//! attribute values. Price history entries and order receipts are value
//! objects; products and orders are entities.

/// Marker trait for value objects.
///
/// Value objects are **immutable** once recorded and **compared by value**. To
/// "modify" one, record a new one (a discount appends a new price history entry
/// instead of editing the previous one).
///
/// ## Usage Pattern
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq)]
/// struct PriceChange {
///     price: Decimal,
///     reason: String,
/// }
///
/// impl ValueObject for PriceChange {}
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
