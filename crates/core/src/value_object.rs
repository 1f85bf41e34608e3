//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value** — two instances
/// with the same attribute values are interchangeable. The ticket status
/// types implement this: a status carries no identity of its own, only the
/// position it denotes in the lifecycle.
///
/// The trait requires `Clone + PartialEq + Debug` so values stay cheap to
/// copy, comparable, and debuggable in tests and logs.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
