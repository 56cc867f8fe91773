//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects have no identity of their own; two instances holding the same
/// attributes are interchangeable. In this workspace that covers normalized
/// query bounds and resolved relational references.
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq, Eq)]
/// struct Currency(String);
///
/// impl ValueObject for Currency {}
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
