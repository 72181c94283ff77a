//! Interactive question flow
//!
//! Question handlers mutate a [`MetaEntity`] step by step: entity
//! questions establish the entity, property questions add fields, and
//! attribute questions fill in individual attribute values. Handlers
//! register themselves through [`inventory`] and run in priority order,
//! so additional handlers plug in without touching the session.

pub mod attribute;
pub mod command_info;
pub mod entity;
pub mod io;
pub mod property;
pub mod registry;

use tracing::debug;

use crate::config::{AttributeConfig, GeneratorConfig};
use crate::error::{GeneratorError, GeneratorResult};
use crate::factory::{BundleProvider, MetaEntityFactory};
use crate::metadata::{MetaAttribute, MetaEntity};
use crate::questions::command_info::CommandInfo;
use crate::questions::io::Io;
use crate::questions::registry::{BoundAttributeQuestion, QuestionRegistry};

/// Immutable services shared by all question handlers
pub struct GeneratorContext {
	pub config: GeneratorConfig,
	pub entity_factory: MetaEntityFactory,
}

impl GeneratorContext {
	pub fn new(config: GeneratorConfig) -> Self {
		let entity_factory =
			MetaEntityFactory::new(BundleProvider::new(config.bundles.clone()));
		Self {
			config,
			entity_factory,
		}
	}
}

/// A question that establishes or edits the entity itself
pub trait EntityQuestion: Send + Sync {
	fn ask(&self, context: &GeneratorContext, info: &mut CommandInfo<'_>) -> GeneratorResult<()>;

	/// Labelled follow-up actions this handler offers in the review
	/// menu after the initial pass. Selecting one re-runs `ask`.
	fn actions(&self) -> Vec<&'static str> {
		Vec::new()
	}
}

/// A question that adds or edits properties of the entity
pub trait PropertyQuestion: Send + Sync {
	fn ask(
		&self,
		context: &GeneratorContext,
		info: &mut CommandInfo<'_>,
		attribute_questions: &[BoundAttributeQuestion],
	) -> GeneratorResult<()>;

	fn actions(&self) -> Vec<&'static str> {
		Vec::new()
	}
}

/// A question that prompts for one attribute's value and writes the
/// answer back onto the attribute
pub trait AttributeQuestion: Send + Sync {
	fn ask(
		&self,
		io: &mut dyn Io,
		attribute: &mut MetaAttribute,
		config: &AttributeConfig,
	) -> GeneratorResult<()>;
}

const FINISH_ACTION: &str = "All fine, generate!";

/// Runs the full question flow and yields the finished meta-entity
pub struct GeneratorSession {
	context: GeneratorContext,
	registry: QuestionRegistry,
}

impl GeneratorSession {
	pub fn new(config: GeneratorConfig) -> GeneratorResult<Self> {
		let registry = QuestionRegistry::build(&config)?;
		Ok(Self {
			context: GeneratorContext::new(config),
			registry,
		})
	}

	pub fn context(&self) -> &GeneratorContext {
		&self.context
	}

	/// Ask every question in order, then offer the review menu until
	/// the user confirms the entity is complete.
	pub fn run(
		&self,
		io: &mut dyn Io,
		entity_arg: Option<String>,
	) -> GeneratorResult<MetaEntity> {
		let mut info = CommandInfo::new(io, entity_arg);

		for question in self.registry.entity_questions() {
			question.ask(&self.context, &mut info)?;
		}
		for question in self.registry.property_questions() {
			question.ask(&self.context, &mut info, self.registry.attribute_questions())?;
		}
		self.review(&mut info)?;

		let entity = info.meta_entity.take().ok_or_else(|| {
			GeneratorError::InvalidDefinition(
				"The question flow finished without creating an entity".to_string(),
			)
		})?;
		debug!(entity = %entity.full_class_name(), "question flow finished");
		Ok(entity)
	}

	/// Review menu: each handler's edit actions plus a finish item.
	fn review(&self, info: &mut CommandInfo<'_>) -> GeneratorResult<()> {
		enum Target {
			Entity(usize),
			Property(usize),
		}

		let mut labels: Vec<String> = Vec::new();
		let mut targets: Vec<Target> = Vec::new();
		for (index, question) in self.registry.entity_questions().iter().enumerate() {
			for label in question.actions() {
				labels.push(label.to_string());
				targets.push(Target::Entity(index));
			}
		}
		for (index, question) in self.registry.property_questions().iter().enumerate() {
			for label in question.actions() {
				labels.push(label.to_string());
				targets.push(Target::Property(index));
			}
		}
		labels.push(FINISH_ACTION.to_string());
		let finish = labels.len() - 1;

		loop {
			let choice = info.io.select("Next action", &labels, finish)?;
			if choice == finish {
				return Ok(());
			}
			match targets[choice] {
				Target::Entity(index) => {
					self.registry.entity_questions()[index].ask(&self.context, info)?;
				}
				Target::Property(index) => {
					self.registry.property_questions()[index].ask(
						&self.context,
						info,
						self.registry.attribute_questions(),
					)?;
				}
			}
		}
	}
}
