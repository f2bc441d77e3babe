//! Entity trait: records addressed by a stable identifier.

/// Anything stored and looked up by id (users today, cars and bookings later).
pub trait Entity {
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    fn id(&self) -> &Self::Id;
}
