//! Attribute questions
//!
//! The basic handler covers every built-in attribute type; custom
//! handlers register under their own name and are bound through the
//! `question` key in configuration.

use crate::config::{AttributeConfig, AttributeType, BASIC_ATTRIBUTE_QUESTION};
use crate::error::GeneratorResult;
use crate::metadata::{AttributeValue, EntityRef, MetaAttribute, NO_BUNDLE_NAMESPACE};
use crate::questions::io::Io;
use crate::questions::registry::AttributeQuestionFactory;
use crate::questions::AttributeQuestion;

/// Prompts for one attribute value, typed by the attribute's
/// configuration, and writes the answer onto the attribute. Empty
/// answers leave the attribute unset so its default applies.
pub struct BasicAttributeQuestion;

impl BasicAttributeQuestion {
	fn ask_bool(
		io: &mut dyn Io,
		attribute: &mut MetaAttribute,
	) -> GeneratorResult<()> {
		let default = attribute.value().as_bool().unwrap_or(false);
		let answer = io.confirm(attribute.name(), default)?;
		attribute.set_value(AttributeValue::Bool(answer));
		Ok(())
	}

	fn ask_int(io: &mut dyn Io, attribute: &mut MetaAttribute) -> GeneratorResult<()> {
		let default = attribute.value().as_int().map(|i| i.to_string());
		loop {
			let answer = io.ask(attribute.name(), default.as_deref())?;
			let answer = answer.trim();
			if answer.is_empty() {
				return Ok(());
			}
			match answer.parse::<i64>() {
				Ok(value) if value > 0 => {
					attribute.set_value(AttributeValue::Int(value));
					return Ok(());
				}
				Ok(_) => {
					io.error(&format!("\"{answer}\" must be a positive number"));
				}
				Err(_) => {
					io.error(&format!("\"{answer}\" is not a valid number"));
				}
			}
		}
	}

	fn ask_string(io: &mut dyn Io, attribute: &mut MetaAttribute) -> GeneratorResult<()> {
		let default = attribute.value().as_str().map(str::to_string);
		let answer = io.ask(attribute.name(), default.as_deref())?;
		let answer = answer.trim();
		if !answer.is_empty() {
			attribute.set_value(AttributeValue::Str(answer.to_string()));
		}
		Ok(())
	}

	/// A bare class name reuses the namespace of the attribute's
	/// default target; a qualified name is split on its last separator.
	fn ask_entity(io: &mut dyn Io, attribute: &mut MetaAttribute) -> GeneratorResult<()> {
		let default = attribute
			.value()
			.as_entity()
			.map(|target| target.full_class_name());
		let answer = io.ask(attribute.name(), default.as_deref())?;
		let answer = answer.trim();
		if answer.is_empty() {
			return Ok(());
		}
		let target = match answer.rsplit_once('\\') {
			Some((namespace, name)) => EntityRef {
				namespace: namespace.to_string(),
				name: name.to_string(),
			},
			None => {
				let namespace = attribute
					.value()
					.as_entity()
					.map(|target| target.namespace.clone())
					.unwrap_or_else(|| NO_BUNDLE_NAMESPACE.to_string());
				EntityRef {
					namespace,
					name: answer.to_string(),
				}
			}
		};
		attribute.set_value(AttributeValue::Entity(target));
		Ok(())
	}

	fn ask_list(io: &mut dyn Io, attribute: &mut MetaAttribute) -> GeneratorResult<()> {
		let answer = io.ask(
			&format!("{} (comma separated)", attribute.name()),
			None,
		)?;
		let items: Vec<String> = answer
			.split(',')
			.map(str::trim)
			.filter(|item| !item.is_empty())
			.map(str::to_string)
			.collect();
		if !items.is_empty() {
			attribute.set_value(AttributeValue::List(items));
		}
		Ok(())
	}
}

impl AttributeQuestion for BasicAttributeQuestion {
	fn ask(
		&self,
		io: &mut dyn Io,
		attribute: &mut MetaAttribute,
		config: &AttributeConfig,
	) -> GeneratorResult<()> {
		match config.attribute_type {
			AttributeType::Bool => Self::ask_bool(io, attribute),
			AttributeType::Int => Self::ask_int(io, attribute),
			AttributeType::String => Self::ask_string(io, attribute),
			AttributeType::Entity => Self::ask_entity(io, attribute),
			AttributeType::List => Self::ask_list(io, attribute),
		}
	}
}

inventory::submit! {
	AttributeQuestionFactory {
		name: BASIC_ATTRIBUTE_QUESTION,
		construct: || Box::new(BasicAttributeQuestion),
	}
}
