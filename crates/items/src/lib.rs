//! Item resource domain module.
//!
//! Holds the `Item` model and the declarative serializer that maps stored
//! attributes to and from the JSON wire representation. No IO, no HTTP.

pub mod item;
pub mod serializer;

pub use item::{Item, ItemId, item_fields};
pub use serializer::{Attributes, FieldKind, FieldSpec, Serializer, ValidationMode};
