//! Factories building the meta-model
//!
//! Entities come from shortcut notation or existing class names,
//! properties from type tokens, attributes from configuration entries,
//! and validations from explicit options or parsed doc comments.

pub mod attribute;
pub mod entity;
pub mod property;
pub mod validation;

pub use attribute::MetaAttributeFactory;
pub use entity::{BundleProvider, MetaEntityFactory};
pub use property::MetaPropertyFactory;
pub use validation::MetaValidationFactory;
