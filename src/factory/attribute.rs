//! Attribute construction from configuration

use crate::config::{AttributeConfig, AttributeType};
use crate::error::{GeneratorError, GeneratorResult};
use crate::metadata::{AttributeValue, EntityRef, MetaAttribute, NAMESPACE_SEPARATOR};

/// Builds [`MetaAttribute`]s from configuration entries
#[derive(Debug, Clone, Copy, Default)]
pub struct MetaAttributeFactory;

impl MetaAttributeFactory {
	/// Create an attribute from its configuration, carrying the
	/// configured default value. A default that does not match the
	/// declared type is a configuration error.
	pub fn create(&self, name: &str, config: &AttributeConfig) -> GeneratorResult<MetaAttribute> {
		let mut attribute = MetaAttribute::new(name);
		if let Some(default) = &config.default {
			let default = self.coerce(name, config.attribute_type, default.clone())?;
			attribute.set_default_value(default);
		}
		Ok(attribute)
	}

	/// Create an attribute holding an explicit value.
	pub fn create_with_value(
		&self,
		name: &str,
		config: &AttributeConfig,
		value: AttributeValue,
	) -> GeneratorResult<MetaAttribute> {
		let mut attribute = self.create(name, config)?;
		attribute.set_value(self.coerce(name, config.attribute_type, value)?);
		Ok(attribute)
	}

	/// Check a value against an attribute's declared type, resolving
	/// class-name strings for entity-typed attributes.
	pub fn coerce(
		&self,
		name: &str,
		attribute_type: AttributeType,
		value: AttributeValue,
	) -> GeneratorResult<AttributeValue> {
		if !attribute_type.matches(&value) {
			return Err(GeneratorError::Configuration(format!(
				"Value for attribute \"{}\" must be of type \"{}\", got \"{}\"",
				name,
				attribute_type.name(),
				value.type_name(),
			)));
		}
		if attribute_type == AttributeType::Entity {
			if let AttributeValue::Str(class_name) = value {
				return Ok(AttributeValue::Entity(entity_ref_from_class_name(&class_name)));
			}
		}
		Ok(value)
	}
}

fn entity_ref_from_class_name(full_class_name: &str) -> EntityRef {
	match full_class_name.rsplit_once(NAMESPACE_SEPARATOR) {
		Some((namespace, name)) => EntityRef::new(namespace, name),
		None => EntityRef::new("", full_class_name),
	}
}
