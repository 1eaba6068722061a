//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// Lets repository code handle keyed domain objects generically (e.g. a
/// duplicate-checked insert keyed by the entity's own identifier).
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}
