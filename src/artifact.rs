//! Generation output
//!
//! The question flow produces a [`MetaEntity`]; the artifact is its
//! render-ready projection: fully qualified names resolved, imports
//! sorted out, annotation lines formatted. Template rendering itself
//! happens outside this crate, so the artifact is plain serializable
//! data.

use serde::Serialize;

use crate::config::GeneratorConfig;
use crate::metadata::MetaEntity;

#[derive(Debug, Clone, Serialize)]
pub struct PropertyArtifact {
	pub name: String,
	pub orm_type: String,
	pub return_type: String,
	/// Doc-block annotation lines, mapping first, validations after.
	pub annotations: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EntityArtifact {
	pub class_name: String,
	pub namespace: String,
	pub sub_dir: Option<String>,
	pub full_class_name: String,
	/// Set when repository generation is enabled in configuration.
	pub repository_class: Option<String>,
	pub usages: Vec<String>,
	pub properties: Vec<PropertyArtifact>,
}

impl EntityArtifact {
	pub fn from_entity(entity: &MetaEntity, config: &GeneratorConfig) -> Self {
		let repository_class = config
			.auto_generate_repository
			.then(|| format!("{}Repository", entity.name()));
		Self {
			class_name: entity.name().to_string(),
			namespace: entity.namespace().to_string(),
			sub_dir: entity.sub_dir().map(str::to_string),
			full_class_name: entity.full_class_name(),
			repository_class,
			usages: entity.usages().map(str::to_string).collect(),
			properties: entity
				.properties()
				.iter()
				.map(|property| PropertyArtifact {
					name: property.name().to_string(),
					orm_type: property.orm_type().to_string(),
					return_type: property.return_type(),
					annotations: property.annotation_lines(),
				})
				.collect(),
		}
	}
}
