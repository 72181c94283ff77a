//! The meta-entity aggregate root

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{GeneratorError, GeneratorResult};
use crate::metadata::property::MetaProperty;

/// Namespace used when an entity belongs to no bundle.
pub const NO_BUNDLE_NAMESPACE: &str = "App\\Entity";

/// Namespace separator in fully qualified class names.
pub const NAMESPACE_SEPARATOR: &str = "\\";

/// Lightweight reference to an entity class
///
/// Used for relationship targets: the referenced class does not have to
/// exist yet, so this carries only the namespace and class name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityRef {
	pub namespace: String,
	pub name: String,
}

impl EntityRef {
	pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
		Self {
			namespace: namespace.into(),
			name: name.into(),
		}
	}

	pub fn full_class_name(&self) -> String {
		if self.namespace.is_empty() {
			self.name.clone()
		} else {
			format!("{}{}{}", self.namespace, NAMESPACE_SEPARATOR, self.name)
		}
	}
}

/// The aggregate root of one generation run
///
/// Holds the entity name, its namespace (possibly the no-bundle
/// sentinel), an optional sub-directory, the ordered property list
/// (insertion order is declaration order) and the deduplicated set of
/// import usages.
#[derive(Debug, Clone)]
pub struct MetaEntity {
	name: String,
	namespace: String,
	sub_dir: Option<String>,
	properties: Vec<MetaProperty>,
	usages: IndexSet<String>,
}

impl MetaEntity {
	/// Create an entity; fails on an empty name.
	pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> GeneratorResult<Self> {
		let mut entity = Self {
			name: String::new(),
			namespace: namespace.into(),
			sub_dir: None,
			properties: Vec::new(),
			usages: IndexSet::new(),
		};
		entity.set_name(name)?;
		Ok(entity)
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn set_name(&mut self, name: impl Into<String>) -> GeneratorResult<()> {
		let name = name.into();
		if name.is_empty() {
			return Err(GeneratorError::InvalidArguments(
				"The entity name cannot be empty".to_string(),
			));
		}
		self.name = name;
		Ok(())
	}

	pub fn namespace(&self) -> &str {
		&self.namespace
	}

	pub fn sub_dir(&self) -> Option<&str> {
		self.sub_dir.as_deref()
	}

	pub fn set_sub_dir(&mut self, sub_dir: Option<String>) {
		self.sub_dir = sub_dir.filter(|s| !s.is_empty());
	}

	/// Fully qualified class name: namespace, optional sub-directory,
	/// class name.
	pub fn full_class_name(&self) -> String {
		let mut parts = vec![self.namespace.as_str()];
		if let Some(sub_dir) = &self.sub_dir {
			parts.push(sub_dir);
		}
		parts.push(&self.name);
		parts.join(NAMESPACE_SEPARATOR)
	}

	/// Reference form of this entity, used as a relationship target.
	pub fn entity_ref(&self) -> EntityRef {
		let mut namespace = self.namespace.clone();
		if let Some(sub_dir) = &self.sub_dir {
			namespace = format!("{namespace}{NAMESPACE_SEPARATOR}{sub_dir}");
		}
		EntityRef::new(namespace, self.name.clone())
	}

	/// Append a property; insertion order is declaration order.
	///
	/// Duplicate names are a caller error surfaced at render time, not
	/// guarded here.
	pub fn add_property(&mut self, property: MetaProperty) -> usize {
		debug!(entity = %self.name, property = %property.name(), "property added");
		self.properties.push(property);
		self.properties.len() - 1
	}

	pub fn properties(&self) -> &[MetaProperty] {
		&self.properties
	}

	pub fn property(&self, index: usize) -> Option<&MetaProperty> {
		self.properties.get(index)
	}

	pub fn property_mut(&mut self, index: usize) -> Option<&mut MetaProperty> {
		self.properties.get_mut(index)
	}

	pub fn property_by_name(&self, name: &str) -> Option<&MetaProperty> {
		self.properties.iter().find(|p| p.name() == name)
	}

	/// Register an import usage; already-present usages are kept once.
	pub fn add_usage(&mut self, full_class_name: impl Into<String>) {
		self.usages.insert(full_class_name.into());
	}

	pub fn usages(&self) -> impl Iterator<Item = &str> {
		self.usages.iter().map(String::as_str)
	}

	/// Set a relationship property's target entity.
	///
	/// Lives on the entity because pointing a property at a target in a
	/// different namespace registers an import usage on the owning
	/// entity.
	pub fn set_property_target(
		&mut self,
		index: usize,
		target: EntityRef,
	) -> GeneratorResult<()> {
		let namespace = self.namespace.clone();
		let property = self.properties.get_mut(index).ok_or_else(|| {
			GeneratorError::InvalidArguments(format!("No property at index {index}"))
		})?;
		let usage = (target.namespace != namespace).then(|| target.full_class_name());
		property.set_target_entity(target)?;
		if let Some(usage) = usage {
			self.add_usage(usage);
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::metadata::property::{MetaProperty, PropertyKind};

	fn entity() -> MetaEntity {
		MetaEntity::new("App\\Entity", "Post").unwrap()
	}

	#[test]
	fn test_empty_name_is_rejected() {
		let result = MetaEntity::new("App\\Entity", "");
		assert!(matches!(result, Err(GeneratorError::InvalidArguments(_))));

		let mut entity = entity();
		assert!(entity.set_name("").is_err());
		assert_eq!(entity.name(), "Post");
	}

	#[test]
	fn test_properties_keep_insertion_order() {
		let mut entity = entity();
		for name in ["title", "body", "createdAt"] {
			entity.add_property(MetaProperty::new(PropertyKind::String, name));
		}
		let names: Vec<_> = entity.properties().iter().map(|p| p.name()).collect();
		assert_eq!(names, vec!["title", "body", "createdAt"]);
	}

	#[test]
	fn test_usages_are_deduplicated() {
		let mut entity = entity();
		entity.add_usage("Doctrine\\Common\\Collections\\Collection");
		entity.add_usage("Doctrine\\Common\\Collections\\Collection");
		assert_eq!(entity.usages().count(), 1);
	}

	#[test]
	fn test_full_class_name_includes_sub_dir() {
		let mut entity = entity();
		assert_eq!(entity.full_class_name(), "App\\Entity\\Post");
		entity.set_sub_dir(Some("Admin".to_string()));
		assert_eq!(entity.full_class_name(), "App\\Entity\\Admin\\Post");
	}

	#[test]
	fn test_foreign_namespace_target_registers_usage() {
		let mut entity = entity();
		let index = entity.add_property(MetaProperty::new(PropertyKind::ManyToOne, "author"));
		entity
			.set_property_target(index, EntityRef::new("Acme\\Entity", "Author"))
			.unwrap();
		assert!(entity.usages().any(|u| u == "Acme\\Entity\\Author"));
	}

	#[test]
	fn test_same_namespace_target_registers_no_usage() {
		let mut entity = entity();
		let index = entity.add_property(MetaProperty::new(PropertyKind::ManyToOne, "author"));
		entity
			.set_property_target(index, EntityRef::new("App\\Entity", "Author"))
			.unwrap();
		assert_eq!(entity.usages().count(), 0);
	}
}
