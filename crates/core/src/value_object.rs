//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects have no identity and are immutable: `Money` is one, a
/// `MenuItem` is not (it is an [`Entity`](crate::Entity)).
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
