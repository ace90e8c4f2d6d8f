//! Entity trait: a persisted model with store-assigned identity.

/// Persisted model exposed through a resource handler.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Copy + Eq + Ord + core::hash::Hash + core::fmt::Debug + core::fmt::Display;

    /// Singular, lowercase model name (`"item"`), used by routing and admin listings.
    const MODEL_NAME: &'static str;

    /// Plural route segment (`"items"`).
    const COLLECTION: &'static str;

    /// Returns the entity identifier.
    fn id(&self) -> Self::Id;
}
