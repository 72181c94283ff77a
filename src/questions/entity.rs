//! Entity-level questions

use crate::error::GeneratorResult;
use crate::questions::command_info::CommandInfo;
use crate::questions::registry::EntityQuestionFactory;
use crate::questions::{EntityQuestion, GeneratorContext};

/// Asks for the entity name and creates the entity from it.
///
/// Runs first: every later question needs an entity on the session.
/// When an entity already exists (the review menu re-runs this
/// question) the answer renames it instead of creating a new one.
pub struct EntityNameQuestion;

impl EntityNameQuestion {
	const PRIORITY: i32 = 99;
}

impl EntityQuestion for EntityNameQuestion {
	fn ask(&self, context: &GeneratorContext, info: &mut CommandInfo<'_>) -> GeneratorResult<()> {
		let bundles: Vec<&str> = context
			.entity_factory
			.bundle_provider()
			.bundle_names()
			.collect();
		if !bundles.is_empty() {
			info.io
				.info(&format!("Available bundles: {}", bundles.join(", ")));
		}
		loop {
			let default = info
				.meta_entity
				.as_ref()
				.map(|entity| entity.name().to_string())
				.or_else(|| info.entity_arg.clone());
			let answer = info.io.ask("Entity name", default.as_deref())?;
			if answer.trim().is_empty() {
				info.io.error("The entity name cannot be empty");
				continue;
			}
			if let Some(entity) = info.meta_entity.as_mut() {
				entity.set_name(&answer)?;
				return Ok(());
			}
			match context.entity_factory.create_by_shortcut_notation(&answer) {
				Ok(entity) => {
					info.meta_entity = Some(entity);
					return Ok(());
				}
				Err(error) => {
					info.io.error(&error.to_string());
				}
			}
		}
	}

	fn actions(&self) -> Vec<&'static str> {
		vec!["Edit entity name"]
	}
}

inventory::submit! {
	EntityQuestionFactory {
		name: "entity_name",
		priority: EntityNameQuestion::PRIORITY,
		construct: || Box::new(EntityNameQuestion),
	}
}

/// Asks for an optional sub-directory under the entity namespace.
///
/// Requires an entity on the session; it never creates one.
pub struct SubDirQuestion;

impl EntityQuestion for SubDirQuestion {
	fn ask(&self, _context: &GeneratorContext, info: &mut CommandInfo<'_>) -> GeneratorResult<()> {
		let CommandInfo {
			meta_entity, io, ..
		} = info;
		let entity = meta_entity.as_mut().ok_or_else(|| {
			crate::error::GeneratorError::InvalidDefinition(
				"No entity has been created for this command".to_string(),
			)
		})?;
		let default = entity.sub_dir().map(str::to_string);
		let answer = io.ask("Sub directory (optional)", default.as_deref())?;
		entity.set_sub_dir(if answer.trim().is_empty() {
			None
		} else {
			Some(answer)
		});
		Ok(())
	}

	fn actions(&self) -> Vec<&'static str> {
		vec!["Edit sub directory"]
	}
}

inventory::submit! {
	EntityQuestionFactory {
		name: "sub_dir",
		priority: 0,
		construct: || Box::new(SubDirQuestion),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::config::GeneratorConfig;
	use crate::questions::io::ScriptedIo;

	fn context() -> GeneratorContext {
		GeneratorContext::new(GeneratorConfig::default())
	}

	#[test]
	fn test_empty_name_reports_an_error_and_reprompts() {
		let mut io = ScriptedIo::new(["", "Invoice"]);
		let mut info = CommandInfo::new(&mut io, None);
		EntityNameQuestion.ask(&context(), &mut info).unwrap();
		assert_eq!(info.meta_entity.unwrap().name(), "Invoice");
		assert_eq!(io.errors, vec!["The entity name cannot be empty"]);
	}

	#[test]
	fn test_malformed_notation_reports_and_reprompts() {
		let mut io = ScriptedIo::new(["bad notation!", "Post"]);
		let mut info = CommandInfo::new(&mut io, None);
		EntityNameQuestion.ask(&context(), &mut info).unwrap();
		assert_eq!(info.meta_entity.unwrap().name(), "Post");
		assert_eq!(io.errors.len(), 1);
		assert!(io.errors[0].contains("bad notation!"));
	}

	#[test]
	fn test_cli_argument_is_offered_as_default() {
		let mut io = ScriptedIo::new([""]);
		let mut info = CommandInfo::new(&mut io, Some("Order".to_string()));
		EntityNameQuestion.ask(&context(), &mut info).unwrap();
		assert_eq!(info.meta_entity.unwrap().name(), "Order");
	}

	#[test]
	fn test_rerun_renames_the_existing_entity() {
		let mut io = ScriptedIo::new(["Post", "Article"]);
		let mut info = CommandInfo::new(&mut io, None);
		let ctx = context();
		EntityNameQuestion.ask(&ctx, &mut info).unwrap();
		EntityNameQuestion.ask(&ctx, &mut info).unwrap();
		assert_eq!(info.meta_entity.unwrap().name(), "Article");
	}

	#[test]
	fn test_sub_dir_requires_an_entity() {
		let mut io = ScriptedIo::new(["Admin"]);
		let mut info = CommandInfo::new(&mut io, None);
		assert!(SubDirQuestion.ask(&context(), &mut info).is_err());
	}

	#[test]
	fn test_sub_dir_is_stored_on_the_entity() {
		let mut io = ScriptedIo::new(["Post", "Admin"]);
		let mut info = CommandInfo::new(&mut io, None);
		let ctx = context();
		EntityNameQuestion.ask(&ctx, &mut info).unwrap();
		SubDirQuestion.ask(&ctx, &mut info).unwrap();
		assert_eq!(info.meta_entity.unwrap().sub_dir(), Some("Admin"));
	}
}
