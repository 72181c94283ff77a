//! Question handler discovery
//!
//! Handlers submit a factory through [`inventory`]; the registry
//! collects them at build time, orders entity and property questions by
//! priority, and binds each configured attribute to the handler its
//! configuration names.

use crate::config::{AttributeConfig, GeneratorConfig};
use crate::error::{GeneratorError, GeneratorResult};
use crate::metadata::MetaAttribute;
use crate::questions::io::Io;
use crate::questions::{AttributeQuestion, EntityQuestion, PropertyQuestion};

/// Registration record for an entity question handler
pub struct EntityQuestionFactory {
	pub name: &'static str,
	/// Higher runs first; unregistered handlers default to 0.
	pub priority: i32,
	pub construct: fn() -> Box<dyn EntityQuestion>,
}

inventory::collect!(EntityQuestionFactory);

/// Registration record for a property question handler
pub struct PropertyQuestionFactory {
	pub name: &'static str,
	pub priority: i32,
	pub construct: fn() -> Box<dyn PropertyQuestion>,
}

inventory::collect!(PropertyQuestionFactory);

/// Registration record for an attribute question handler
pub struct AttributeQuestionFactory {
	/// Handler name referenced by the `question` key in configuration.
	pub name: &'static str,
	pub construct: fn() -> Box<dyn AttributeQuestion>,
}

inventory::collect!(AttributeQuestionFactory);

/// An attribute question bound to one configured attribute
pub struct BoundAttributeQuestion {
	attribute: String,
	config: AttributeConfig,
	handler: Box<dyn AttributeQuestion>,
}

impl BoundAttributeQuestion {
	pub fn attribute(&self) -> &str {
		&self.attribute
	}

	pub fn config(&self) -> &AttributeConfig {
		&self.config
	}

	pub fn ask(&self, io: &mut dyn Io, attribute: &mut MetaAttribute) -> GeneratorResult<()> {
		self.handler.ask(io, attribute, &self.config)
	}
}

/// Ordered question handlers for one generator run
pub struct QuestionRegistry {
	entity_questions: Vec<Box<dyn EntityQuestion>>,
	property_questions: Vec<Box<dyn PropertyQuestion>>,
	attribute_questions: Vec<BoundAttributeQuestion>,
}

impl std::fmt::Debug for QuestionRegistry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("QuestionRegistry")
			.field("entity_questions", &self.entity_questions.len())
			.field("property_questions", &self.property_questions.len())
			.field("attribute_questions", &self.attribute_questions.len())
			.finish()
	}
}

impl QuestionRegistry {
	pub fn build(config: &GeneratorConfig) -> GeneratorResult<Self> {
		let mut entity_factories: Vec<&EntityQuestionFactory> =
			inventory::iter::<EntityQuestionFactory>.into_iter().collect();
		entity_factories.sort_by(|a, b| b.priority.cmp(&a.priority).then(a.name.cmp(b.name)));

		let mut property_factories: Vec<&PropertyQuestionFactory> =
			inventory::iter::<PropertyQuestionFactory>.into_iter().collect();
		property_factories.sort_by(|a, b| b.priority.cmp(&a.priority).then(a.name.cmp(b.name)));

		let mut attribute_questions = Vec::with_capacity(config.attributes.len());
		for (attribute, attribute_config) in &config.attributes {
			let handler_name = config.question_handler_for(attribute);
			let factory = inventory::iter::<AttributeQuestionFactory>
				.into_iter()
				.find(|factory| factory.name == handler_name)
				.ok_or_else(|| {
					GeneratorError::Configuration(format!(
						"No question handler named \"{handler_name}\" is registered \
						 for attribute \"{attribute}\""
					))
				})?;
			attribute_questions.push(BoundAttributeQuestion {
				attribute: attribute.clone(),
				config: attribute_config.clone(),
				handler: (factory.construct)(),
			});
		}

		Ok(Self {
			entity_questions: entity_factories.iter().map(|f| (f.construct)()).collect(),
			property_questions: property_factories.iter().map(|f| (f.construct)()).collect(),
			attribute_questions,
		})
	}

	pub fn entity_questions(&self) -> &[Box<dyn EntityQuestion>] {
		&self.entity_questions
	}

	pub fn property_questions(&self) -> &[Box<dyn PropertyQuestion>] {
		&self.property_questions
	}

	pub fn attribute_questions(&self) -> &[BoundAttributeQuestion] {
		&self.attribute_questions
	}

	/// The bound question responsible for one attribute, if any.
	pub fn attribute_question_for(&self, attribute: &str) -> Option<&BoundAttributeQuestion> {
		self.attribute_questions
			.iter()
			.find(|bound| bound.attribute() == attribute)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::config::UserConfig;

	#[test]
	fn test_default_registry_orders_entity_questions_by_priority() {
		let registry = QuestionRegistry::build(&GeneratorConfig::default()).unwrap();
		// The entity name question must run before anything that needs
		// an existing entity.
		assert!(registry.entity_questions().len() >= 2);
	}

	#[test]
	fn test_every_default_attribute_gets_a_bound_question() {
		let config = GeneratorConfig::default();
		let registry = QuestionRegistry::build(&config).unwrap();
		for attribute in config.attributes.keys() {
			assert!(
				registry.attribute_question_for(attribute).is_some(),
				"attribute {attribute} has no bound question"
			);
		}
	}

	#[test]
	fn test_unknown_handler_name_fails_the_build() {
		let raw = r#"
			[attributes.nullable]
			question = "no_such_handler"
		"#;
		let user: UserConfig = toml::from_str(raw).unwrap();
		let config = GeneratorConfig::from_user(user).unwrap();
		let err = QuestionRegistry::build(&config).unwrap_err();
		assert!(err.to_string().contains("no_such_handler"));
	}
}
