//! Entity trait: identity + continuity across snapshots.

/// Server-owned record with a stable identity.
///
/// Two snapshots of the same entity taken at different times compare equal by
/// `id()` even when their fields differ.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Copy + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> Self::Id;
}

/// Locate a snapshot by identifier in a slice of entities.
pub fn find_by_id<E: Entity>(items: &[E], id: E::Id) -> Option<&E> {
    items.iter().find(|item| item.id() == id)
}
