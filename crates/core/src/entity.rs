//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// Products are identified by their SKU, orders by their order id. Two entities
/// with the same id are the same entity, whatever their current state.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}
