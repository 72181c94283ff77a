//! Named, typed attribute slots attached to meta-properties

use serde::{Deserialize, Serialize};

use crate::error::GeneratorError;
use crate::metadata::entity::EntityRef;

/// Typed value held by a [`MetaAttribute`]
///
/// A closed enum instead of stringly-typed values: every attribute the
/// generator knows about carries one of these shapes, and the
/// configuration layer checks answers against the declared type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
	Bool(bool),
	Int(i64),
	Str(String),
	Entity(EntityRef),
	List(Vec<String>),
	Null,
}

impl AttributeValue {
	pub fn is_null(&self) -> bool {
		matches!(self, AttributeValue::Null)
	}

	pub fn as_bool(&self) -> Option<bool> {
		match self {
			AttributeValue::Bool(b) => Some(*b),
			_ => None,
		}
	}

	pub fn as_int(&self) -> Option<i64> {
		match self {
			AttributeValue::Int(i) => Some(*i),
			_ => None,
		}
	}

	pub fn as_str(&self) -> Option<&str> {
		match self {
			AttributeValue::Str(s) => Some(s),
			_ => None,
		}
	}

	pub fn as_entity(&self) -> Option<&EntityRef> {
		match self {
			AttributeValue::Entity(entity) => Some(entity),
			_ => None,
		}
	}

	/// Human-readable type name used in configuration error messages.
	pub fn type_name(&self) -> &'static str {
		match self {
			AttributeValue::Bool(_) => "bool",
			AttributeValue::Int(_) => "int",
			AttributeValue::Str(_) => "string",
			AttributeValue::Entity(_) => "entity",
			AttributeValue::List(_) => "list",
			AttributeValue::Null => "null",
		}
	}
}

impl From<bool> for AttributeValue {
	fn from(value: bool) -> Self {
		AttributeValue::Bool(value)
	}
}

impl From<i64> for AttributeValue {
	fn from(value: i64) -> Self {
		AttributeValue::Int(value)
	}
}

impl From<&str> for AttributeValue {
	fn from(value: &str) -> Self {
		AttributeValue::Str(value.to_string())
	}
}

impl From<String> for AttributeValue {
	fn from(value: String) -> Self {
		AttributeValue::Str(value)
	}
}

impl From<EntityRef> for AttributeValue {
	fn from(value: EntityRef) -> Self {
		AttributeValue::Entity(value)
	}
}

/// A single named key/value slot on a meta-property
///
/// Attribute names are unique within their owning property's attribute
/// map; the map key is the attribute name. An attribute whose value is
/// unset falls back to its default value when read.
#[derive(Debug, Clone, PartialEq)]
pub struct MetaAttribute {
	name: String,
	value: AttributeValue,
	default_value: Option<AttributeValue>,
}

impl MetaAttribute {
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			value: AttributeValue::Null,
			default_value: None,
		}
	}

	pub fn with_value(mut self, value: AttributeValue) -> Self {
		self.value = value;
		self
	}

	pub fn with_default(mut self, default: AttributeValue) -> Self {
		self.default_value = Some(default);
		self
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	/// Current value, falling back to the default when unset.
	pub fn value(&self) -> &AttributeValue {
		if self.value.is_null() {
			if let Some(default) = &self.default_value {
				return default;
			}
		}
		&self.value
	}

	/// The explicitly set value, ignoring any default.
	pub fn raw_value(&self) -> &AttributeValue {
		&self.value
	}

	pub fn set_value(&mut self, value: AttributeValue) {
		self.value = value;
	}

	pub fn default_value(&self) -> Option<&AttributeValue> {
		self.default_value.as_ref()
	}

	pub fn set_default_value(&mut self, default: AttributeValue) {
		self.default_value = Some(default);
	}
}

/// Build an error for a lookup of an attribute that was never declared.
pub(crate) fn undeclared_attribute(name: &str) -> GeneratorError {
	GeneratorError::InvalidArguments(format!(
		"No attribute \"{name}\" has been defined for this property"
	))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_value_falls_back_to_default() {
		let attr = MetaAttribute::new("orphanRemoval").with_default(AttributeValue::Bool(false));
		assert_eq!(attr.value(), &AttributeValue::Bool(false));
		assert!(attr.raw_value().is_null());
	}

	#[test]
	fn test_explicit_value_wins_over_default() {
		let mut attr = MetaAttribute::new("nullable").with_default(AttributeValue::Bool(false));
		attr.set_value(AttributeValue::Bool(true));
		assert_eq!(attr.value().as_bool(), Some(true));
	}

	#[test]
	fn test_unset_value_without_default_is_null() {
		let attr = MetaAttribute::new("length");
		assert!(attr.value().is_null());
	}
}
