//! Error types for the entity scaffolding core
//!
//! One error enum covers the four failure families the generator
//! distinguishes: recoverable user input, hard invariant violations,
//! startup configuration problems, and I/O failures from the terminal.

use thiserror::Error;

/// Result alias used throughout the crate
pub type GeneratorResult<T> = Result<T, GeneratorError>;

/// Errors raised by the meta-model, factories, and question flow
#[derive(Debug, Error)]
pub enum GeneratorError {
	/// Invalid caller-supplied input: malformed shortcut notation, empty
	/// entity names, lookups of undeclared attributes. In the interactive
	/// flow these are reported and the question is re-asked.
	#[error("Invalid arguments: {0}")]
	InvalidArguments(String),

	/// A meta-model invariant was violated, e.g. setting `inversedBy` when
	/// `mappedBy` is already present. These indicate a programming error
	/// and terminate the session.
	#[error("Invalid definition: {0}")]
	InvalidDefinition(String),

	/// Configuration problems detected at startup, before any interactive
	/// session runs: attribute type conflicts, unknown question handlers.
	#[error("Invalid configuration: {0}")]
	Configuration(String),

	/// Terminal / prompt I/O failure.
	#[error("I/O error: {0}")]
	Io(#[from] std::io::Error),
}

impl From<dialoguer::Error> for GeneratorError {
	fn from(err: dialoguer::Error) -> Self {
		match err {
			dialoguer::Error::IO(io) => GeneratorError::Io(io),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_error_messages_name_the_failure() {
		let err = GeneratorError::InvalidArguments("the entity name cannot be empty".to_string());
		assert!(err.to_string().contains("entity name"));

		let err = GeneratorError::Configuration("type mismatch for \"length\"".to_string());
		assert!(err.to_string().starts_with("Invalid configuration"));
	}
}
