//! Configuration surface
//!
//! A TOML tree of recognized options merged over built-in defaults:
//! `attributes` (attribute name to declared type, optional question
//! handler, default value and applicable property kinds),
//! `auto_generate_repository`, and the `bundles` table feeding bundle
//! name resolution. Conflicts between a configured attribute type and
//! its built-in default type abort at load time.

use std::path::Path;

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use serde::Deserialize;
use tracing::debug;

use crate::error::{GeneratorError, GeneratorResult};
use crate::metadata::property::PropertyKind;
use crate::metadata::AttributeValue;

/// Name of the fallback attribute-question handler.
pub const BASIC_ATTRIBUTE_QUESTION: &str = "basic";

/// Declared type of a configured attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttributeType {
	Bool,
	Int,
	String,
	Entity,
	List,
}

impl AttributeType {
	pub fn name(self) -> &'static str {
		match self {
			AttributeType::Bool => "bool",
			AttributeType::Int => "int",
			AttributeType::String => "string",
			AttributeType::Entity => "entity",
			AttributeType::List => "list",
		}
	}

	/// Whether a value is acceptable for this declared type. Null is
	/// always acceptable (the attribute is simply unset).
	pub fn matches(self, value: &AttributeValue) -> bool {
		match (self, value) {
			(_, AttributeValue::Null) => true,
			(AttributeType::Bool, AttributeValue::Bool(_)) => true,
			(AttributeType::Int, AttributeValue::Int(_)) => true,
			(AttributeType::String, AttributeValue::Str(_)) => true,
			(AttributeType::Entity, AttributeValue::Entity(_)) => true,
			// Entity-typed attributes also accept a class-name string;
			// the attribute factory resolves it to a reference.
			(AttributeType::Entity, AttributeValue::Str(_)) => true,
			(AttributeType::List, AttributeValue::List(_)) => true,
			_ => false,
		}
	}
}

/// Configuration of one recognized attribute
#[derive(Debug, Clone, Deserialize)]
pub struct AttributeConfig {
	#[serde(rename = "type")]
	pub attribute_type: AttributeType,

	/// Name of the question handler responsible for prompting this
	/// attribute; `None` binds the basic handler.
	#[serde(default)]
	pub question: Option<String>,

	#[serde(default)]
	pub default: Option<AttributeValue>,

	/// Property-kind tokens this attribute applies to; empty means all.
	#[serde(default)]
	pub meta_properties: Vec<String>,
}

impl AttributeConfig {
	fn new(attribute_type: AttributeType, meta_properties: &[&str]) -> Self {
		Self {
			attribute_type,
			question: None,
			default: None,
			meta_properties: meta_properties.iter().map(|s| s.to_string()).collect(),
		}
	}

	pub fn applies_to(&self, kind: PropertyKind) -> bool {
		self.meta_properties.is_empty()
			|| self
				.meta_properties
				.iter()
				.any(|token| token == kind.orm_type() || token == kind.orm_type_alias())
	}
}

static DEFAULT_ATTRIBUTES: Lazy<IndexMap<String, AttributeConfig>> = Lazy::new(|| {
	let relationships = ["OneToOne", "OneToMany", "ManyToOne", "ManyToMany"];
	let mut attributes = IndexMap::new();
	attributes.insert(
		"nullable".to_string(),
		AttributeConfig::new(AttributeType::Bool, &[]),
	);
	attributes.insert(
		"unique".to_string(),
		AttributeConfig::new(AttributeType::Bool, &[]),
	);
	attributes.insert(
		"length".to_string(),
		AttributeConfig::new(AttributeType::Int, &["string", "smallint"]),
	);
	attributes.insert(
		"targetEntity".to_string(),
		AttributeConfig::new(AttributeType::Entity, &relationships),
	);
	attributes.insert(
		"mappedBy".to_string(),
		AttributeConfig::new(AttributeType::String, &relationships),
	);
	attributes.insert(
		"inversedBy".to_string(),
		// A OneToMany property is always the inverse side.
		AttributeConfig::new(AttributeType::String, &["OneToOne", "ManyToOne", "ManyToMany"]),
	);
	attributes.insert(
		"orphanRemoval".to_string(),
		AttributeConfig::new(AttributeType::Bool, &["OneToOne", "OneToMany"]),
	);
	attributes.insert(
		"referencedColumnName".to_string(),
		AttributeConfig::new(AttributeType::String, &["OneToOne", "ManyToOne"]),
	);
	attributes
});

/// User-supplied attribute overrides; every field optional so a user
/// can extend the defaults piecemeal.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserAttributeConfig {
	#[serde(rename = "type", default)]
	pub attribute_type: Option<AttributeType>,
	#[serde(default)]
	pub question: Option<String>,
	#[serde(default)]
	pub default: Option<AttributeValue>,
	#[serde(default)]
	pub meta_properties: Vec<String>,
}

/// Raw configuration file shape
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserConfig {
	#[serde(default)]
	pub attributes: IndexMap<String, UserAttributeConfig>,
	#[serde(default)]
	pub auto_generate_repository: Option<bool>,
	#[serde(default)]
	pub bundles: IndexMap<String, String>,
}

/// Resolved configuration: defaults merged with user overrides
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
	pub attributes: IndexMap<String, AttributeConfig>,
	pub auto_generate_repository: bool,
	pub bundles: IndexMap<String, String>,
}

impl Default for GeneratorConfig {
	fn default() -> Self {
		Self {
			attributes: DEFAULT_ATTRIBUTES.clone(),
			auto_generate_repository: false,
			bundles: IndexMap::new(),
		}
	}
}

impl GeneratorConfig {
	/// Merge user configuration over the built-in defaults.
	///
	/// `meta_properties` lists merge additively; a `type` conflicting
	/// with the built-in default type is a hard configuration error.
	pub fn from_user(user: UserConfig) -> GeneratorResult<Self> {
		let mut config = GeneratorConfig {
			auto_generate_repository: user.auto_generate_repository.unwrap_or(false),
			bundles: user.bundles,
			..GeneratorConfig::default()
		};

		for (name, overrides) in user.attributes {
			match config.attributes.get_mut(&name) {
				Some(existing) => {
					if let Some(declared) = overrides.attribute_type {
						if declared != existing.attribute_type {
							return Err(GeneratorError::Configuration(format!(
								"Invalid configuration \"attributes.{}\": \"type\" is set to \"{}\", but \"{}\" is required. Remove \"type\" or change its value to \"{}\"",
								name,
								declared.name(),
								existing.attribute_type.name(),
								existing.attribute_type.name(),
							)));
						}
					}
					if overrides.question.is_some() {
						existing.question = overrides.question;
					}
					if overrides.default.is_some() {
						existing.default = overrides.default;
					}
					// meta_properties can only be added, not replaced.
					for token in overrides.meta_properties {
						if !existing.meta_properties.contains(&token) {
							existing.meta_properties.push(token);
						}
					}
				}
				None => {
					let attribute_type = overrides.attribute_type.ok_or_else(|| {
						GeneratorError::Configuration(format!(
							"Invalid configuration \"attributes.{name}\": custom attributes must declare a \"type\""
						))
					})?;
					config.attributes.insert(
						name,
						AttributeConfig {
							attribute_type,
							question: overrides.question,
							default: overrides.default,
							meta_properties: overrides.meta_properties,
						},
					);
				}
			}
		}

		debug!(
			attributes = config.attributes.len(),
			bundles = config.bundles.len(),
			"configuration resolved"
		);
		Ok(config)
	}

	/// Load and merge a TOML configuration file.
	pub fn load(path: &Path) -> GeneratorResult<Self> {
		let raw = std::fs::read_to_string(path)?;
		let user: UserConfig = toml::from_str(&raw).map_err(|e| {
			GeneratorError::Configuration(format!(
				"Failed to parse configuration file {}: {e}",
				path.display()
			))
		})?;
		Self::from_user(user)
	}

	/// Attributes applicable to a property kind, in declaration order.
	pub fn attributes_for_kind(
		&self,
		kind: PropertyKind,
	) -> impl Iterator<Item = (&str, &AttributeConfig)> {
		self.attributes
			.iter()
			.filter(move |(_, cfg)| cfg.applies_to(kind))
			.map(|(name, cfg)| (name.as_str(), cfg))
	}

	/// Handler name bound to an attribute's question.
	pub fn question_handler_for(&self, attribute: &str) -> &str {
		self.attributes
			.get(attribute)
			.and_then(|cfg| cfg.question.as_deref())
			.unwrap_or(BASIC_ATTRIBUTE_QUESTION)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_defaults_cover_the_known_attributes() {
		let config = GeneratorConfig::default();
		for name in [
			"nullable",
			"unique",
			"length",
			"targetEntity",
			"mappedBy",
			"inversedBy",
			"orphanRemoval",
			"referencedColumnName",
		] {
			assert!(config.attributes.contains_key(name), "missing {name}");
		}
		assert!(!config.auto_generate_repository);
	}

	#[test]
	fn test_length_applies_to_string_and_smallint_only() {
		let config = GeneratorConfig::default();
		let length = &config.attributes["length"];
		assert!(length.applies_to(PropertyKind::String));
		assert!(length.applies_to(PropertyKind::SmallInt));
		assert!(!length.applies_to(PropertyKind::Boolean));
		assert!(!length.applies_to(PropertyKind::ManyToOne));
	}

	#[test]
	fn test_inversed_by_never_applies_to_one_to_many() {
		let config = GeneratorConfig::default();
		assert!(!config.attributes["inversedBy"].applies_to(PropertyKind::OneToMany));
		assert!(config.attributes["inversedBy"].applies_to(PropertyKind::ManyToOne));
	}

	#[test]
	fn test_type_conflict_is_a_hard_configuration_error() {
		let user: UserConfig = toml::from_str(
			r#"
			[attributes.length]
			type = "string"
			"#,
		)
		.unwrap();
		let err = GeneratorConfig::from_user(user).unwrap_err();
		assert!(matches!(err, GeneratorError::Configuration(_)));
		assert!(err.to_string().contains("length"));
	}

	#[test]
	fn test_meta_properties_merge_additively() {
		let user: UserConfig = toml::from_str(
			r#"
			[attributes.length]
			meta_properties = ["text"]
			"#,
		)
		.unwrap();
		let config = GeneratorConfig::from_user(user).unwrap();
		let tokens = &config.attributes["length"].meta_properties;
		assert!(tokens.contains(&"string".to_string()));
		assert!(tokens.contains(&"text".to_string()));
	}

	#[test]
	fn test_custom_attribute_requires_a_type() {
		let user: UserConfig = toml::from_str(
			r#"
			[attributes.comment]
			question = "comment_question"
			"#,
		)
		.unwrap();
		assert!(GeneratorConfig::from_user(user).is_err());

		let user: UserConfig = toml::from_str(
			r#"
			[attributes.comment]
			type = "string"
			"#,
		)
		.unwrap();
		let config = GeneratorConfig::from_user(user).unwrap();
		assert_eq!(
			config.attributes["comment"].attribute_type,
			AttributeType::String
		);
	}

	#[test]
	fn test_question_handler_falls_back_to_basic() {
		let config = GeneratorConfig::default();
		assert_eq!(config.question_handler_for("nullable"), BASIC_ATTRIBUTE_QUESTION);
	}
}
