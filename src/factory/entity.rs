//! Entity construction from shortcut notation and class names

use indexmap::IndexMap;
use tracing::debug;

use crate::error::{GeneratorError, GeneratorResult};
use crate::inflect::classify;
use crate::metadata::{EntityRef, MetaEntity, NAMESPACE_SEPARATOR, NO_BUNDLE_NAMESPACE};

/// Resolves bundle names to entity namespaces
///
/// Backed by the `bundles` configuration table; unknown names resolve
/// to the no-bundle sentinel namespace.
#[derive(Debug, Clone, Default)]
pub struct BundleProvider {
	bundles: IndexMap<String, String>,
}

impl BundleProvider {
	pub fn new(bundles: IndexMap<String, String>) -> Self {
		Self { bundles }
	}

	pub fn bundle_names(&self) -> impl Iterator<Item = &str> {
		self.bundles.keys().map(String::as_str)
	}

	pub fn namespace_by_name(&self, name: Option<&str>) -> &str {
		name.and_then(|n| self.bundles.get(n))
			.map(String::as_str)
			.unwrap_or(NO_BUNDLE_NAMESPACE)
	}
}

/// Builds [`MetaEntity`] instances and [`EntityRef`] targets
#[derive(Debug, Clone, Default)]
pub struct MetaEntityFactory {
	bundle_provider: BundleProvider,
}

impl MetaEntityFactory {
	pub fn new(bundle_provider: BundleProvider) -> Self {
		Self { bundle_provider }
	}

	pub fn bundle_provider(&self) -> &BundleProvider {
		&self.bundle_provider
	}

	/// Parse the compact `[bundle:]Name[/SubDir]` notation.
	///
	/// The bundle prefix resolves the namespace through the bundle
	/// provider; the optional `/SubDir` suffix becomes the entity's
	/// sub-directory. Malformed input fails with an invalid-argument
	/// error.
	///
	/// # Examples
	///
	/// ```
	/// use entity_forge::factory::{BundleProvider, MetaEntityFactory};
	/// use indexmap::IndexMap;
	///
	/// let mut bundles = IndexMap::new();
	/// bundles.insert("blog".to_string(), "Blog\\Entity".to_string());
	/// let factory = MetaEntityFactory::new(BundleProvider::new(bundles));
	///
	/// let entity = factory.create_by_shortcut_notation("blog:Post/Admin").unwrap();
	/// assert_eq!(entity.name(), "Post");
	/// assert_eq!(entity.namespace(), "Blog\\Entity");
	/// assert_eq!(entity.sub_dir(), Some("Admin"));
	/// ```
	pub fn create_by_shortcut_notation(&self, notation: &str) -> GeneratorResult<MetaEntity> {
		let notation = notation.trim();
		if notation.is_empty() {
			return Err(GeneratorError::InvalidArguments(
				"The entity name cannot be empty".to_string(),
			));
		}

		let (bundle, rest) = match notation.split_once(':') {
			Some((bundle, rest)) => (Some(bundle), rest),
			None => (None, notation),
		};
		let (name, sub_dir) = match rest.split_once('/') {
			Some((name, sub_dir)) => (name, Some(sub_dir)),
			None => (rest, None),
		};

		for part in [Some(name), bundle, sub_dir].into_iter().flatten() {
			if !is_valid_identifier(part) {
				return Err(GeneratorError::InvalidArguments(format!(
					"Invalid shortcut notation \"{notation}\"; expected [bundle:]Name[/SubDir]"
				)));
			}
		}

		let namespace = self.bundle_provider.namespace_by_name(bundle);
		let mut entity = MetaEntity::new(namespace, classify(name))?;
		entity.set_sub_dir(sub_dir.map(classify));
		debug!(entity = %entity.full_class_name(), "entity created from shortcut notation");
		Ok(entity)
	}

	/// Wrap an existing fully qualified class name as a reference,
	/// without requiring the class to exist.
	pub fn create_by_class_name(&self, full_class_name: &str) -> EntityRef {
		match full_class_name.rsplit_once(NAMESPACE_SEPARATOR) {
			Some((namespace, name)) => EntityRef::new(namespace, name),
			None => EntityRef::new("", full_class_name),
		}
	}
}

fn is_valid_identifier(s: &str) -> bool {
	let mut chars = s.chars();
	match chars.next() {
		Some(first) if first.is_ascii_alphabetic() || first == '_' => {}
		_ => return false,
	}
	chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
	use super::*;

	fn factory() -> MetaEntityFactory {
		let mut bundles = IndexMap::new();
		bundles.insert("blog".to_string(), "Blog\\Entity".to_string());
		MetaEntityFactory::new(BundleProvider::new(bundles))
	}

	#[test]
	fn test_shortcut_notation_with_bundle_and_sub_dir() {
		let entity = factory()
			.create_by_shortcut_notation("blog:Post/Admin")
			.unwrap();
		assert_eq!(entity.name(), "Post");
		assert_eq!(entity.namespace(), "Blog\\Entity");
		assert_eq!(entity.sub_dir(), Some("Admin"));
	}

	#[test]
	fn test_shortcut_notation_plain_name() {
		let entity = factory().create_by_shortcut_notation("Invoice").unwrap();
		assert_eq!(entity.name(), "Invoice");
		assert_eq!(entity.namespace(), NO_BUNDLE_NAMESPACE);
		assert_eq!(entity.sub_dir(), None);
	}

	#[test]
	fn test_shortcut_notation_classifies_the_name() {
		let entity = factory().create_by_shortcut_notation("blog_post").unwrap();
		assert_eq!(entity.name(), "BlogPost");
	}

	#[test]
	fn test_unknown_bundle_falls_back_to_sentinel_namespace() {
		let entity = factory().create_by_shortcut_notation("shop:Order").unwrap();
		assert_eq!(entity.namespace(), NO_BUNDLE_NAMESPACE);
	}

	#[test]
	fn test_malformed_notation_is_rejected() {
		let factory = factory();
		for notation in ["", "blog:", ":Post", "Post/", "Post/Sub/Dir", "9Post", "Po st"] {
			assert!(
				factory.create_by_shortcut_notation(notation).is_err(),
				"expected rejection of {notation:?}"
			);
		}
	}

	#[test]
	fn test_create_by_class_name_splits_namespace() {
		let target = factory().create_by_class_name("App\\Entity\\Foo");
		assert_eq!(target.namespace, "App\\Entity");
		assert_eq!(target.name, "Foo");
		assert_eq!(target.full_class_name(), "App\\Entity\\Foo");

		let bare = factory().create_by_class_name("Foo");
		assert_eq!(bare.namespace, "");
		assert_eq!(bare.full_class_name(), "Foo");
	}
}
