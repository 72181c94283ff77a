//! Property kinds and the meta-property type
//!
//! A property is either one of the primitive column kinds or one of the
//! four relationship kinds. Each kind's ORM type token, shorthand alias
//! and return type live in a static table, checked exhaustively at
//! compile time, instead of per-kind constants resolved at runtime.

use indexmap::IndexMap;

use crate::error::{GeneratorError, GeneratorResult};
use crate::inflect::camelize;
use crate::metadata::attribute::{undeclared_attribute, AttributeValue, MetaAttribute};
use crate::metadata::entity::EntityRef;
use crate::metadata::validation::MetaValidation;

/// Attribute names the property kinds declare.
pub mod attr {
	pub const NULLABLE: &str = "nullable";
	pub const UNIQUE: &str = "unique";
	pub const LENGTH: &str = "length";
	pub const TARGET_ENTITY: &str = "targetEntity";
	pub const MAPPED_BY: &str = "mappedBy";
	pub const INVERSED_BY: &str = "inversedBy";
	pub const ORPHAN_REMOVAL: &str = "orphanRemoval";
	pub const REFERENCED_COLUMN_NAME: &str = "referencedColumnName";
}

/// Import registered on the owning entity by collection-valued kinds.
pub const COLLECTION_USAGE: &str = "Doctrine\\Common\\Collections\\Collection";
pub const ARRAY_COLLECTION_USAGE: &str = "Doctrine\\Common\\Collections\\ArrayCollection";

/// The catalog of property kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyKind {
	String,
	Text,
	Integer,
	SmallInt,
	BigInt,
	Boolean,
	DateTime,
	Date,
	OneToOne,
	OneToMany,
	ManyToOne,
	ManyToMany,
}

/// Per-kind type information
#[derive(Debug, Clone, Copy)]
pub struct KindSpec {
	/// ORM type token (primitive) or relationship marker.
	pub orm_type: &'static str,
	/// Shorthand alias accepted by the property factory.
	pub alias: Option<&'static str>,
	/// Return type token used by the renderer.
	pub return_type: &'static str,
	/// Whether the kind carries a `length` attribute.
	pub has_length: bool,
}

impl PropertyKind {
	/// All kinds, in catalog order.
	pub const ALL: [PropertyKind; 12] = [
		PropertyKind::String,
		PropertyKind::Text,
		PropertyKind::Integer,
		PropertyKind::SmallInt,
		PropertyKind::BigInt,
		PropertyKind::Boolean,
		PropertyKind::DateTime,
		PropertyKind::Date,
		PropertyKind::OneToOne,
		PropertyKind::OneToMany,
		PropertyKind::ManyToOne,
		PropertyKind::ManyToMany,
	];

	/// Kind type information; exhaustive, so a kind can never be missing
	/// its type tokens.
	pub const fn spec(self) -> KindSpec {
		match self {
			PropertyKind::String => KindSpec {
				orm_type: "string",
				alias: None,
				return_type: "string",
				has_length: true,
			},
			PropertyKind::Text => KindSpec {
				orm_type: "text",
				alias: None,
				return_type: "string",
				has_length: false,
			},
			PropertyKind::Integer => KindSpec {
				orm_type: "integer",
				alias: Some("int"),
				return_type: "int",
				has_length: false,
			},
			PropertyKind::SmallInt => KindSpec {
				orm_type: "smallint",
				alias: Some("sint"),
				return_type: "int",
				has_length: true,
			},
			PropertyKind::BigInt => KindSpec {
				orm_type: "bigint",
				alias: None,
				return_type: "int",
				has_length: false,
			},
			PropertyKind::Boolean => KindSpec {
				orm_type: "boolean",
				alias: Some("bool"),
				return_type: "bool",
				has_length: false,
			},
			PropertyKind::DateTime => KindSpec {
				orm_type: "datetime",
				alias: None,
				return_type: "\\DateTimeInterface",
				has_length: false,
			},
			PropertyKind::Date => KindSpec {
				orm_type: "date",
				alias: None,
				return_type: "\\DateTimeInterface",
				has_length: false,
			},
			PropertyKind::OneToOne => KindSpec {
				orm_type: "OneToOne",
				alias: None,
				return_type: "",
				has_length: false,
			},
			PropertyKind::OneToMany => KindSpec {
				orm_type: "OneToMany",
				alias: None,
				return_type: "Collection",
				has_length: false,
			},
			PropertyKind::ManyToOne => KindSpec {
				orm_type: "ManyToOne",
				alias: None,
				return_type: "",
				has_length: false,
			},
			PropertyKind::ManyToMany => KindSpec {
				orm_type: "ManyToMany",
				alias: None,
				return_type: "Collection",
				has_length: false,
			},
		}
	}

	/// ORM type token (for relationships: the association marker).
	pub const fn orm_type(self) -> &'static str {
		self.spec().orm_type
	}

	/// Shorthand alias, falling back to the ORM type itself.
	pub const fn orm_type_alias(self) -> &'static str {
		match self.spec().alias {
			Some(alias) => alias,
			None => self.spec().orm_type,
		}
	}

	pub const fn is_relationship(self) -> bool {
		matches!(
			self,
			PropertyKind::OneToOne
				| PropertyKind::OneToMany
				| PropertyKind::ManyToOne
				| PropertyKind::ManyToMany
		)
	}

	/// Collection-valued kinds hold many related records.
	pub const fn is_collection(self) -> bool {
		matches!(self, PropertyKind::OneToMany | PropertyKind::ManyToMany)
	}

	/// Resolve a type token or alias to a kind; `None` for unknown
	/// tokens, so existing-class scans degrade property by property.
	pub fn from_token(token: &str) -> Option<PropertyKind> {
		PropertyKind::ALL.into_iter().find(|kind| {
			let spec = kind.spec();
			spec.orm_type == token || spec.alias == Some(token)
		})
	}
}

/// A single property of a meta-entity
///
/// Owns a map of named attributes (keys unique) and an ordered list of
/// validation rules.
#[derive(Debug, Clone)]
pub struct MetaProperty {
	name: String,
	kind: PropertyKind,
	attributes: IndexMap<String, MetaAttribute>,
	validations: Vec<MetaValidation>,
}

impl MetaProperty {
	/// Create a property, declaring the attribute slots its kind knows
	/// about. The name is lower-camel-cased.
	pub fn new(kind: PropertyKind, name: &str) -> Self {
		let mut property = Self {
			name: camelize(name),
			kind,
			attributes: IndexMap::new(),
			validations: Vec::new(),
		};
		property.declare_kind_attributes();
		property
	}

	fn declare_kind_attributes(&mut self) {
		self.add_meta_attribute(MetaAttribute::new(attr::NULLABLE));
		self.add_meta_attribute(MetaAttribute::new(attr::UNIQUE));
		if self.kind.spec().has_length {
			self.add_meta_attribute(MetaAttribute::new(attr::LENGTH));
		}
		if self.kind.is_relationship() {
			self.add_meta_attribute(MetaAttribute::new(attr::TARGET_ENTITY));
			self.add_meta_attribute(MetaAttribute::new(attr::MAPPED_BY));
			self.add_meta_attribute(MetaAttribute::new(attr::INVERSED_BY));
			self.add_meta_attribute(
				MetaAttribute::new(attr::ORPHAN_REMOVAL).with_default(AttributeValue::Bool(false)),
			);
			self.add_meta_attribute(MetaAttribute::new(attr::REFERENCED_COLUMN_NAME));
		}
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn set_name(&mut self, name: &str) {
		self.name = camelize(name);
	}

	pub fn kind(&self) -> PropertyKind {
		self.kind
	}

	pub fn orm_type(&self) -> &'static str {
		self.kind.orm_type()
	}

	/// Return type token: the target entity name for owning-side
	/// relationships, `Collection` for collection sides, the kind's
	/// declared type otherwise.
	pub fn return_type(&self) -> String {
		if self.kind.is_relationship() && !self.kind.is_collection() {
			return self
				.target_entity()
				.map(|target| target.name.clone())
				.unwrap_or_default();
		}
		self.kind.spec().return_type.to_string()
	}

	// -- attribute map -------------------------------------------------

	pub fn has_attribute(&self, name: &str) -> bool {
		self.attributes.contains_key(name)
	}

	/// Fails with a descriptive error naming the missing attribute.
	pub fn meta_attribute(&self, name: &str) -> GeneratorResult<&MetaAttribute> {
		self.attributes
			.get(name)
			.ok_or_else(|| undeclared_attribute(name))
	}

	pub fn meta_attribute_mut(&mut self, name: &str) -> GeneratorResult<&mut MetaAttribute> {
		self.attributes
			.get_mut(name)
			.ok_or_else(|| undeclared_attribute(name))
	}

	/// Current value of a declared attribute (default-aware).
	pub fn attribute(&self, name: &str) -> GeneratorResult<&AttributeValue> {
		Ok(self.meta_attribute(name)?.value())
	}

	pub fn set_attribute(&mut self, name: &str, value: AttributeValue) -> GeneratorResult<()> {
		self.meta_attribute_mut(name)?.set_value(value);
		Ok(())
	}

	/// Insert an attribute if no attribute with that name exists yet.
	pub fn add_meta_attribute(&mut self, attribute: MetaAttribute) {
		if !self.attributes.contains_key(attribute.name()) {
			self.attributes.insert(attribute.name().to_string(), attribute);
		}
	}

	pub fn meta_attributes(&self) -> impl Iterator<Item = &MetaAttribute> {
		self.attributes.values()
	}

	// -- common attributes ---------------------------------------------

	pub fn is_nullable(&self) -> Option<bool> {
		self.attribute(attr::NULLABLE).ok().and_then(AttributeValue::as_bool)
	}

	/// Collection sides (one-to-many, many-to-many) cannot be forced
	/// non-nullable.
	pub fn set_nullable(&mut self, nullable: Option<bool>) -> GeneratorResult<()> {
		if nullable == Some(false) && self.kind.is_collection() {
			return Err(GeneratorError::InvalidDefinition(format!(
				"Setting nullable to false on {} is not possible",
				self.kind.orm_type()
			)));
		}
		let value = match nullable {
			Some(b) => AttributeValue::Bool(b),
			None => AttributeValue::Null,
		};
		self.set_attribute(attr::NULLABLE, value)
	}

	pub fn is_unique(&self) -> Option<bool> {
		self.attribute(attr::UNIQUE).ok().and_then(AttributeValue::as_bool)
	}

	pub fn set_unique(&mut self, unique: Option<bool>) -> GeneratorResult<()> {
		let value = match unique {
			Some(b) => AttributeValue::Bool(b),
			None => AttributeValue::Null,
		};
		self.set_attribute(attr::UNIQUE, value)
	}

	pub fn length(&self) -> Option<i64> {
		self.attribute(attr::LENGTH).ok().and_then(AttributeValue::as_int)
	}

	pub fn set_length(&mut self, length: Option<i64>) -> GeneratorResult<()> {
		let value = match length {
			Some(l) => AttributeValue::Int(l),
			None => AttributeValue::Null,
		};
		self.set_attribute(attr::LENGTH, value)
	}

	// -- relationship attributes ---------------------------------------

	pub fn target_entity(&self) -> Option<&EntityRef> {
		self.attribute(attr::TARGET_ENTITY)
			.ok()
			.and_then(AttributeValue::as_entity)
	}

	/// Set the relationship target. Usage registration on the owning
	/// entity happens in [`MetaEntity::set_property_target`], which
	/// callers should prefer.
	///
	/// [`MetaEntity::set_property_target`]: crate::metadata::MetaEntity::set_property_target
	pub fn set_target_entity(&mut self, target: EntityRef) -> GeneratorResult<()> {
		self.set_attribute(attr::TARGET_ENTITY, AttributeValue::Entity(target))
	}

	pub fn mapped_by(&self) -> Option<&str> {
		self.attribute(attr::MAPPED_BY).ok().and_then(AttributeValue::as_str)
	}

	/// Designate the non-owning side. Fails when `inversedBy` is already
	/// set: a relationship has exactly one owning side.
	pub fn set_mapped_by(&mut self, mapped_by: impl Into<String>) -> GeneratorResult<()> {
		if self.inversed_by().is_some() {
			return Err(GeneratorError::InvalidDefinition(format!(
				"Cannot set mappedBy on property \"{}\"; the inversedBy has already been set",
				self.name
			)));
		}
		self.set_attribute(attr::MAPPED_BY, AttributeValue::Str(mapped_by.into()))
	}

	pub fn inversed_by(&self) -> Option<&str> {
		self.attribute(attr::INVERSED_BY).ok().and_then(AttributeValue::as_str)
	}

	/// Designate the owning side. Fails when `mappedBy` is already set,
	/// and always fails on a one-to-many property: a one-to-many is
	/// definitionally the inverse side.
	pub fn set_inversed_by(&mut self, inversed_by: impl Into<String>) -> GeneratorResult<()> {
		if self.kind == PropertyKind::OneToMany {
			return Err(GeneratorError::InvalidDefinition(format!(
				"Cannot set inversedBy on property \"{}\"; a OneToMany property always is the inverse side",
				self.name
			)));
		}
		if self.mapped_by().is_some() {
			return Err(GeneratorError::InvalidDefinition(format!(
				"Cannot set inversedBy on property \"{}\"; the mappedBy has already been set",
				self.name
			)));
		}
		self.set_attribute(attr::INVERSED_BY, AttributeValue::Str(inversed_by.into()))
	}

	pub fn orphan_removal(&self) -> bool {
		self.attribute(attr::ORPHAN_REMOVAL)
			.ok()
			.and_then(AttributeValue::as_bool)
			.unwrap_or(false)
	}

	pub fn set_orphan_removal(&mut self, orphan_removal: bool) -> GeneratorResult<()> {
		self.set_attribute(attr::ORPHAN_REMOVAL, AttributeValue::Bool(orphan_removal))
	}

	pub fn referenced_column_name(&self) -> Option<&str> {
		self.attribute(attr::REFERENCED_COLUMN_NAME)
			.ok()
			.and_then(AttributeValue::as_str)
	}

	pub fn set_referenced_column_name(
		&mut self,
		referenced_column_name: impl Into<String>,
	) -> GeneratorResult<()> {
		self.set_attribute(
			attr::REFERENCED_COLUMN_NAME,
			AttributeValue::Str(referenced_column_name.into()),
		)
	}

	// -- validations ---------------------------------------------------

	pub fn add_validation(&mut self, validation: MetaValidation) {
		if !self.validations.contains(&validation) {
			self.validations.push(validation);
		}
	}

	pub fn validations(&self) -> &[MetaValidation] {
		&self.validations
	}

	pub fn has_validations(&self) -> bool {
		!self.validations.is_empty()
	}

	// -- annotation rendering ------------------------------------------

	/// Ordered annotation lines for the renderer: the kind's mapping
	/// annotation first, then one line per validation.
	pub fn annotation_lines(&self) -> Vec<String> {
		let mut lines = if self.kind.is_relationship() {
			self.association_annotation_lines()
		} else {
			vec![format!("@ORM\\Column({})", self.column_annotation_options())]
		};
		lines.extend(self.validations.iter().map(MetaValidation::annotation_formatted));
		lines
	}

	fn column_annotation_options(&self) -> String {
		let mut options = format!("type=\"{}\"", self.kind.orm_type());
		if self.is_nullable() == Some(true) {
			options.push_str(", nullable=true");
		}
		if self.is_unique() == Some(true) {
			options.push_str(", unique=true");
		}
		if let Some(length) = self.length() {
			options.push_str(&format!(", length={length}"));
		}
		options
	}

	fn association_annotation_lines(&self) -> Vec<String> {
		let target = self
			.target_entity()
			.map(EntityRef::full_class_name)
			.unwrap_or_default();
		let mut options = format!("targetEntity=\"{target}\"");
		if let Some(mapped_by) = self.mapped_by() {
			options.push_str(&format!(", mappedBy=\"{mapped_by}\""));
		}
		if let Some(inversed_by) = self.inversed_by() {
			options.push_str(&format!(", inversedBy=\"{inversed_by}\""));
		}
		if self.orphan_removal() {
			options.push_str(", orphanRemoval=true");
		}
		if self.kind == PropertyKind::OneToMany {
			options.push_str(", cascade={\"persist\"}");
		}
		let mut lines = vec![format!("@ORM\\{}({})", self.kind.orm_type(), options)];
		if let Some(referenced_column_name) = self.referenced_column_name() {
			lines.push(format!(
				"@ORM\\JoinColumn(referencedColumnName=\"{referenced_column_name}\")"
			));
		}
		lines
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_token_resolution_covers_aliases() {
		assert_eq!(PropertyKind::from_token("string"), Some(PropertyKind::String));
		assert_eq!(PropertyKind::from_token("sint"), Some(PropertyKind::SmallInt));
		assert_eq!(PropertyKind::from_token("bool"), Some(PropertyKind::Boolean));
		assert_eq!(PropertyKind::from_token("ManyToOne"), Some(PropertyKind::ManyToOne));
		assert_eq!(PropertyKind::from_token("uuid"), None);
	}

	#[test]
	fn test_alias_falls_back_to_orm_type() {
		assert_eq!(PropertyKind::SmallInt.orm_type_alias(), "sint");
		assert_eq!(PropertyKind::Text.orm_type_alias(), "text");
	}

	#[test]
	fn test_name_is_camelized() {
		let property = MetaProperty::new(PropertyKind::String, "created_at");
		assert_eq!(property.name(), "createdAt");
	}

	#[test]
	fn test_undeclared_attribute_lookup_fails_by_name() {
		let property = MetaProperty::new(PropertyKind::Boolean, "active");
		let err = property.meta_attribute("length").unwrap_err();
		assert!(err.to_string().contains("\"length\""));
	}

	#[test]
	fn test_mapped_by_and_inversed_by_are_exclusive() {
		let mut property = MetaProperty::new(PropertyKind::ManyToOne, "author");
		property.set_inversed_by("posts").unwrap();
		assert!(property.set_mapped_by("posts").is_err());

		let mut property = MetaProperty::new(PropertyKind::ManyToMany, "tags");
		property.set_mapped_by("articles").unwrap();
		assert!(property.set_inversed_by("articles").is_err());
	}

	#[test]
	fn test_one_to_many_is_always_the_inverse_side() {
		let mut property = MetaProperty::new(PropertyKind::OneToMany, "comments");
		assert!(property.set_inversed_by("post").is_err());
		// mappedBy is fine.
		property.set_mapped_by("post").unwrap();
		assert_eq!(property.mapped_by(), Some("post"));
	}

	#[test]
	fn test_collection_sides_reject_non_nullable() {
		let mut one_to_many = MetaProperty::new(PropertyKind::OneToMany, "comments");
		assert!(one_to_many.set_nullable(Some(false)).is_err());
		one_to_many.set_nullable(Some(true)).unwrap();

		let mut many_to_many = MetaProperty::new(PropertyKind::ManyToMany, "tags");
		assert!(many_to_many.set_nullable(Some(false)).is_err());

		let mut string = MetaProperty::new(PropertyKind::String, "title");
		string.set_nullable(Some(false)).unwrap();
	}

	#[test]
	fn test_column_annotation_includes_length_only_when_set() {
		let mut property = MetaProperty::new(PropertyKind::String, "title");
		let lines = property.annotation_lines();
		assert_eq!(lines, vec!["@ORM\\Column(type=\"string\")".to_string()]);

		property.set_length(Some(255)).unwrap();
		property.set_nullable(Some(true)).unwrap();
		let lines = property.annotation_lines();
		assert_eq!(
			lines,
			vec!["@ORM\\Column(type=\"string\", nullable=true, length=255)".to_string()]
		);
	}

	#[test]
	fn test_one_to_many_annotation_carries_cascade_persist() {
		let mut property = MetaProperty::new(PropertyKind::OneToMany, "comments");
		property
			.set_target_entity(EntityRef::new("App\\Entity", "Comment"))
			.unwrap();
		property.set_mapped_by("post").unwrap();
		let lines = property.annotation_lines();
		assert_eq!(
			lines[0],
			"@ORM\\OneToMany(targetEntity=\"App\\Entity\\Comment\", mappedBy=\"post\", cascade={\"persist\"})"
		);
	}

	#[test]
	fn test_validation_lines_follow_the_mapping_annotation() {
		let mut property = MetaProperty::new(PropertyKind::String, "title");
		let mut validation = MetaValidation::new("NotBlank");
		validation.set_option("message", "required");
		property.add_validation(validation);

		let lines = property.annotation_lines();
		assert_eq!(lines.len(), 2);
		assert_eq!(lines[1], "@Assert\\NotBlank(message=\"required\")");
	}

	#[test]
	fn test_return_type_for_relationships() {
		let mut many_to_one = MetaProperty::new(PropertyKind::ManyToOne, "author");
		many_to_one
			.set_target_entity(EntityRef::new("App\\Entity", "Author"))
			.unwrap();
		assert_eq!(many_to_one.return_type(), "Author");

		let one_to_many = MetaProperty::new(PropertyKind::OneToMany, "comments");
		assert_eq!(one_to_many.return_type(), "Collection");
	}
}
