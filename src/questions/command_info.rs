//! Shared state of one generator run
//!
//! Question handlers read and write the run state through
//! [`CommandInfo`]: the entity under construction, the raw entity
//! argument from the command line, and the I/O channel.

use crate::error::{GeneratorError, GeneratorResult};
use crate::metadata::MetaEntity;
use crate::questions::io::Io;

/// Mutable state threaded through the question flow
pub struct CommandInfo<'io> {
	pub meta_entity: Option<MetaEntity>,
	/// Entity shortcut notation passed on the command line, if any.
	pub entity_arg: Option<String>,
	pub io: &'io mut dyn Io,
}

impl<'io> CommandInfo<'io> {
	pub fn new(io: &'io mut dyn Io, entity_arg: Option<String>) -> Self {
		Self {
			meta_entity: None,
			entity_arg,
			io,
		}
	}

	/// The entity under construction. Fails when a handler that needs
	/// an entity runs before one has been created.
	pub fn meta_entity(&mut self) -> GeneratorResult<&mut MetaEntity> {
		self.meta_entity.as_mut().ok_or_else(|| {
			GeneratorError::InvalidDefinition(
				"No entity has been created for this command".to_string(),
			)
		})
	}
}
