//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**: a ticket line
/// item `ADULT x 2` is equal to any other `ADULT x 2`. To "modify" one, build
/// a new value.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
