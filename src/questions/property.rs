//! Field questions
//!
//! One handler drives the whole add-a-field loop: prompt for a name
//! (empty stops), pick a type, create the property through the factory,
//! then walk the configured attribute questions that apply to the
//! chosen kind.

use crate::error::{GeneratorError, GeneratorResult};
use crate::factory::MetaPropertyFactory;
use crate::inflect::camelize;
use crate::metadata::property::attr;
use crate::metadata::{MetaEntity, PropertyKind};
use crate::questions::command_info::CommandInfo;
use crate::questions::io::Io;
use crate::questions::registry::{BoundAttributeQuestion, PropertyQuestionFactory};
use crate::questions::{GeneratorContext, PropertyQuestion};

/// Prompts for new fields until the user enters an empty name
#[derive(Default)]
pub struct FieldsQuestion {
	property_factory: MetaPropertyFactory,
}

impl FieldsQuestion {
	fn ask_attributes(
		entity: &mut MetaEntity,
		index: usize,
		io: &mut dyn Io,
		attribute_questions: &[BoundAttributeQuestion],
	) -> GeneratorResult<()> {
		let kind = match entity.property(index) {
			Some(property) => property.kind(),
			None => return Ok(()),
		};
		for bound in attribute_questions {
			if !bound.config().applies_to(kind) {
				continue;
			}
			let name = bound.attribute();
			// Collection sides are nullable by nature.
			if name == attr::NULLABLE && kind.is_collection() {
				continue;
			}
			let Some(property) = entity.property_mut(index) else {
				return Ok(());
			};
			if !property.has_attribute(name) {
				continue;
			}
			// The owning and inverse side fields exclude each other.
			if name == attr::INVERSED_BY && property.mapped_by().is_some() {
				continue;
			}
			if name == attr::MAPPED_BY && property.inversed_by().is_some() {
				continue;
			}
			let attribute = property.meta_attribute_mut(name)?;
			// Values preset by the property factory are not asked again.
			if !attribute.raw_value().is_null() {
				continue;
			}
			bound.ask(io, attribute)?;
			// An answered target goes through the entity so a foreign
			// namespace registers its import usage.
			if name == attr::TARGET_ENTITY {
				if let Some(target) = attribute.raw_value().as_entity().cloned() {
					entity.set_property_target(index, target)?;
				}
			}
		}
		Ok(())
	}
}

impl PropertyQuestion for FieldsQuestion {
	fn ask(
		&self,
		context: &GeneratorContext,
		info: &mut CommandInfo<'_>,
		attribute_questions: &[BoundAttributeQuestion],
	) -> GeneratorResult<()> {
		let CommandInfo {
			meta_entity, io, ..
		} = info;
		let entity = meta_entity.as_mut().ok_or_else(|| {
			GeneratorError::InvalidDefinition(
				"No entity has been created for this command".to_string(),
			)
		})?;
		let type_items: Vec<String> = PropertyKind::ALL
			.iter()
			.map(|kind| kind.orm_type().to_string())
			.collect();

		loop {
			let name = io.ask("New field name (press <return> to stop adding fields)", None)?;
			let name = name.trim().to_string();
			if name.is_empty() {
				break;
			}
			if entity.property_by_name(&camelize(&name)).is_some() {
				io.error(&format!("Field \"{name}\" is already defined"));
				continue;
			}
			let choice = io.select("Field type", &type_items, 0)?;
			let token = &type_items[choice];
			let Some(index) = self
				.property_factory
				.create(entity, token, &name, &context.config)?
			else {
				io.error(&format!("Type \"{token}\" is not supported"));
				continue;
			};
			Self::ask_attributes(entity, index, &mut **io, attribute_questions)?;
		}
		Ok(())
	}

	fn actions(&self) -> Vec<&'static str> {
		vec!["Add more fields"]
	}
}

inventory::submit! {
	PropertyQuestionFactory {
		name: "fields",
		priority: 0,
		construct: || Box::<FieldsQuestion>::default(),
	}
}
