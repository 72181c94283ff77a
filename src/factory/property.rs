//! Property construction and kind dispatch

use tracing::debug;

use crate::config::GeneratorConfig;
use crate::error::GeneratorResult;
use crate::factory::attribute::MetaAttributeFactory;
use crate::inflect::{classify, camelize, singularize};
use crate::metadata::property::{attr, ARRAY_COLLECTION_USAGE, COLLECTION_USAGE};
use crate::metadata::{EntityRef, MetaEntity, MetaProperty, PropertyKind};

/// Builds properties onto an owning entity
///
/// Maps type tokens (primitive type names, their aliases, and the four
/// relationship markers) to property kinds. Unrecognized tokens yield
/// `Ok(None)` so an existing-class scan degrades property by property
/// instead of failing the whole read.
#[derive(Debug, Clone, Copy, Default)]
pub struct MetaPropertyFactory;

impl MetaPropertyFactory {
	/// Create a property of the kind matching `type_token` and register
	/// it on the entity. Returns the property's index, or `None` for an
	/// unsupported token.
	pub fn create(
		&self,
		entity: &mut MetaEntity,
		type_token: &str,
		name: &str,
		config: &GeneratorConfig,
	) -> GeneratorResult<Option<usize>> {
		let Some(kind) = PropertyKind::from_token(type_token) else {
			debug!(token = type_token, property = name, "unsupported type token, property skipped");
			return Ok(None);
		};

		let mut property = MetaProperty::new(kind, name);
		self.apply_config_attributes(&mut property, kind, config)?;

		if kind.is_relationship() {
			// Default target: a class named after the property, in the
			// owning entity's namespace.
			let default_target =
				EntityRef::new(entity.namespace(), classify(property.name()));
			property
				.meta_attribute_mut(attr::TARGET_ENTITY)?
				.set_default_value(default_target.into());
		}

		if kind == PropertyKind::OneToMany {
			let target = EntityRef::new(
				entity.namespace(),
				classify(&singularize(property.name())),
			);
			property.set_target_entity(target)?;
			property.set_mapped_by(camelize(entity.name()))?;
		}

		if kind.is_collection() {
			entity.add_usage(COLLECTION_USAGE);
			entity.add_usage(ARRAY_COLLECTION_USAGE);
		}

		Ok(Some(entity.add_property(property)))
	}

	/// Overlay configured attributes on a freshly constructed property:
	/// defaults for the slots the kind already declares, new slots for
	/// configured attributes the kind does not know about.
	fn apply_config_attributes(
		&self,
		property: &mut MetaProperty,
		kind: PropertyKind,
		config: &GeneratorConfig,
	) -> GeneratorResult<()> {
		let attribute_factory = MetaAttributeFactory;
		for (name, attribute_config) in config.attributes_for_kind(kind) {
			if property.has_attribute(name) {
				if let Some(default) = &attribute_config.default {
					let default = attribute_factory.coerce(
						name,
						attribute_config.attribute_type,
						default.clone(),
					)?;
					property.meta_attribute_mut(name)?.set_default_value(default);
				}
			} else {
				property.add_meta_attribute(attribute_factory.create(name, attribute_config)?);
			}
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn entity() -> MetaEntity {
		MetaEntity::new("App\\Entity", "Post").unwrap()
	}

	#[test]
	fn test_unrecognized_token_is_skipped_not_failed() {
		let mut entity = entity();
		let result = MetaPropertyFactory
			.create(&mut entity, "uuid", "ref", &GeneratorConfig::default())
			.unwrap();
		assert!(result.is_none());
		assert!(entity.properties().is_empty());
	}

	#[test]
	fn test_primitive_tokens_and_aliases_resolve() {
		let mut entity = entity();
		let config = GeneratorConfig::default();
		let factory = MetaPropertyFactory;
		factory.create(&mut entity, "string", "title", &config).unwrap();
		factory.create(&mut entity, "sint", "rank", &config).unwrap();
		factory.create(&mut entity, "bool", "active", &config).unwrap();

		let kinds: Vec<_> = entity.properties().iter().map(|p| p.kind()).collect();
		assert_eq!(
			kinds,
			vec![PropertyKind::String, PropertyKind::SmallInt, PropertyKind::Boolean]
		);
	}

	#[test]
	fn test_one_to_many_derives_target_and_mapped_by() {
		let mut entity = entity();
		let index = MetaPropertyFactory
			.create(&mut entity, "OneToMany", "comments", &GeneratorConfig::default())
			.unwrap()
			.unwrap();

		let property = entity.property(index).unwrap();
		let target = property.target_entity().unwrap();
		assert_eq!(target.name, "Comment");
		assert_eq!(target.namespace, "App\\Entity");
		assert_eq!(property.mapped_by(), Some("post"));
		assert!(!property.orphan_removal());
	}

	#[test]
	fn test_collection_kinds_register_collection_usages() {
		let mut entity = entity();
		MetaPropertyFactory
			.create(&mut entity, "ManyToMany", "tags", &GeneratorConfig::default())
			.unwrap();
		let usages: Vec<_> = entity.usages().collect();
		assert!(usages.contains(&COLLECTION_USAGE));
		assert!(usages.contains(&ARRAY_COLLECTION_USAGE));
	}

	#[test]
	fn test_relationship_default_target_follows_the_property_name() {
		let mut entity = entity();
		let index = MetaPropertyFactory
			.create(&mut entity, "ManyToOne", "author", &GeneratorConfig::default())
			.unwrap()
			.unwrap();
		let property = entity.property(index).unwrap();
		// No explicit target yet: the default applies.
		let target = property.target_entity().unwrap();
		assert_eq!(target.name, "Author");
		assert_eq!(target.namespace, "App\\Entity");
	}
}
