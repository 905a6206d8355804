//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// A record keeps its identifier for its whole lifetime; PATCH bodies merge
/// into the other fields but never replace it.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Copy + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> Self::Id;
}
