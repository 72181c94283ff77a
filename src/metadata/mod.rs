//! The in-memory meta-model
//!
//! A [`MetaEntity`] aggregates an ordered list of [`MetaProperty`]s;
//! each property owns a map of [`MetaAttribute`]s and a list of
//! [`MetaValidation`]s. The graph is built by the factories, mutated by
//! the question flow, and flattened into an artifact at the end of a
//! generation session.

pub mod attribute;
pub mod entity;
pub mod property;
pub mod validation;

pub use attribute::{AttributeValue, MetaAttribute};
pub use entity::{EntityRef, MetaEntity, NAMESPACE_SEPARATOR, NO_BUNDLE_NAMESPACE};
pub use property::{MetaProperty, PropertyKind};
pub use validation::MetaValidation;
