//! Existing-class extraction
//!
//! Rebuilds a meta-entity from a structured description of an already
//! generated class. The description (fields in declaration order, their
//! column or association mappings, and raw doc comments) is produced by
//! an ORM-specific adapter that is out of scope here; this module owns
//! the extraction logic only.

use indexmap::IndexMap;
use tracing::debug;

use crate::config::GeneratorConfig;
use crate::error::{GeneratorError, GeneratorResult};
use crate::factory::{MetaEntityFactory, MetaPropertyFactory, MetaValidationFactory};
use crate::metadata::{AttributeValue, MetaAttribute, MetaEntity};

/// Column mapping of one declared field
#[derive(Debug, Clone, Default)]
pub struct FieldMapping {
	/// ORM type token, e.g. `string` or `smallint`.
	pub type_token: String,
	/// Mapping attributes: nullable, unique, length, and anything else
	/// the mapping carried.
	pub attributes: IndexMap<String, AttributeValue>,
}

/// Join column of an owning-side association
#[derive(Debug, Clone, Default)]
pub struct JoinColumn {
	pub referenced_column_name: Option<String>,
}

/// Association mapping of one declared field
#[derive(Debug, Clone, Default)]
pub struct AssociationMapping {
	/// Relationship marker: `OneToOne`, `OneToMany`, `ManyToOne` or
	/// `ManyToMany`.
	pub kind: String,
	/// Fully qualified class name of the target entity.
	pub target_entity: String,
	pub mapped_by: Option<String>,
	pub inversed_by: Option<String>,
	pub orphan_removal: Option<bool>,
	pub join_column: Option<JoinColumn>,
}

/// One declared field of an existing class, in declaration order
#[derive(Debug, Clone, Default)]
pub struct FieldSchema {
	pub name: String,
	/// Fields inherited from traits are not re-generated.
	pub from_trait: bool,
	pub mapping: Option<FieldMapping>,
	pub association: Option<AssociationMapping>,
	pub doc_comment: Option<String>,
}

/// Structured description of an existing class
#[derive(Debug, Clone, Default)]
pub struct ClassSchema {
	pub full_class_name: String,
	pub fields: Vec<FieldSchema>,
}

/// Source of class schemas, keyed by fully qualified class name
pub trait SchemaSource {
	fn class_schema(&self, full_class_name: &str) -> Option<&ClassSchema>;
}

/// Simple in-memory schema source, used by tests and embedders
#[derive(Debug, Clone, Default)]
pub struct InMemorySchemaSource {
	classes: IndexMap<String, ClassSchema>,
}

impl InMemorySchemaSource {
	pub fn insert(&mut self, schema: ClassSchema) {
		self.classes.insert(schema.full_class_name.clone(), schema);
	}
}

impl SchemaSource for InMemorySchemaSource {
	fn class_schema(&self, full_class_name: &str) -> Option<&ClassSchema> {
		self.classes.get(full_class_name)
	}
}

/// Rebuilds meta-entities from existing-class schemas
#[derive(Debug, Clone, Default)]
pub struct ExistingEntityReader {
	entity_factory: MetaEntityFactory,
	property_factory: MetaPropertyFactory,
	validation_factory: MetaValidationFactory,
}

impl ExistingEntityReader {
	pub fn new(entity_factory: MetaEntityFactory) -> Self {
		Self {
			entity_factory,
			property_factory: MetaPropertyFactory,
			validation_factory: MetaValidationFactory,
		}
	}

	/// Populate a meta-entity from the schema of its existing class.
	///
	/// Walks fields in declaration order, skipping the implicit `id`
	/// field and fields inherited from traits. Each remaining field's
	/// type resolves from its column mapping, or from relationship
	/// markers in its doc comment when no column mapping exists; fields
	/// of unsupported types are skipped so the scan degrades property
	/// by property. Fails when no schema exists for the class.
	pub fn extract(
		&self,
		entity: &mut MetaEntity,
		source: &dyn SchemaSource,
		config: &GeneratorConfig,
	) -> GeneratorResult<()> {
		let full_class_name = entity.full_class_name();
		let schema = source.class_schema(&full_class_name).ok_or_else(|| {
			GeneratorError::InvalidArguments(format!(
				"No existing class found for \"{full_class_name}\""
			))
		})?;
		// Clone so the borrow on the source does not pin the entity.
		let schema = schema.clone();

		for field in &schema.fields {
			// The id is generated without being specified.
			if field.name == "id" {
				continue;
			}
			if field.from_trait {
				continue;
			}
			let Some(type_token) = Self::type_for_field(field) else {
				continue;
			};
			let Some(index) =
				self.property_factory.create(entity, &type_token, &field.name, config)?
			else {
				continue;
			};

			if let Some(mapping) = &field.mapping {
				self.apply_field_mapping(entity, index, mapping)?;
			} else if let Some(association) = &field.association {
				self.apply_association_mapping(entity, index, association)?;
			}

			if let Some(doc_comment) = &field.doc_comment {
				if let Some(property) = entity.property_mut(index) {
					self.validation_factory.add_from_doc_comment(property, doc_comment);
				}
			}
		}

		debug!(
			entity = %full_class_name,
			properties = entity.properties().len(),
			"existing class extracted"
		);
		Ok(())
	}

	/// Resolve a field's type token: the column mapping type when
	/// present, otherwise the first relationship marker found in the
	/// doc comment.
	fn type_for_field(field: &FieldSchema) -> Option<String> {
		if let Some(mapping) = &field.mapping {
			return Some(mapping.type_token.clone());
		}
		if let Some(association) = &field.association {
			if !association.kind.is_empty() {
				return Some(association.kind.clone());
			}
		}
		let doc_comment = field.doc_comment.as_deref()?;
		for marker in ["ManyToOne", "OneToMany", "ManyToMany", "OneToOne"] {
			if doc_comment.contains(marker) {
				return Some(marker.to_string());
			}
		}
		None
	}

	fn apply_field_mapping(
		&self,
		entity: &mut MetaEntity,
		index: usize,
		mapping: &FieldMapping,
	) -> GeneratorResult<()> {
		let Some(property) = entity.property_mut(index) else {
			return Ok(());
		};
		for (name, value) in &mapping.attributes {
			if value.is_null() {
				continue;
			}
			if property.has_attribute(name) {
				property.set_attribute(name, value.clone())?;
			} else {
				property.add_meta_attribute(
					MetaAttribute::new(name.clone()).with_value(value.clone()),
				);
			}
		}
		Ok(())
	}

	fn apply_association_mapping(
		&self,
		entity: &mut MetaEntity,
		index: usize,
		association: &AssociationMapping,
	) -> GeneratorResult<()> {
		let target = self.entity_factory.create_by_class_name(&association.target_entity);
		entity.set_property_target(index, target)?;

		let Some(property) = entity.property_mut(index) else {
			return Ok(());
		};
		if let Some(mapped_by) = &association.mapped_by {
			property.set_mapped_by(mapped_by.clone())?;
		}
		if let Some(inversed_by) = &association.inversed_by {
			property.set_inversed_by(inversed_by.clone())?;
		}
		if let Some(orphan_removal) = association.orphan_removal {
			property.set_orphan_removal(orphan_removal)?;
		}
		// A nested referenced column name flattens onto the property.
		if let Some(referenced) = association
			.join_column
			.as_ref()
			.and_then(|jc| jc.referenced_column_name.clone())
		{
			property.set_referenced_column_name(referenced)?;
		}
		Ok(())
	}
}
