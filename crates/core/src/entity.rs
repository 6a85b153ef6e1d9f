//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// Every record the back office stores (menu items, stock records, orders)
/// has a store-assigned identifier and is compared by it.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Copy + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> Self::Id;
}
