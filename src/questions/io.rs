//! Prompt I/O
//!
//! Question handlers talk to the user through the [`Io`] trait so the
//! interactive flow can run against the terminal in production and
//! against a scripted answer queue in tests.

use std::collections::VecDeque;

use console::style;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input, Select};

use crate::error::{GeneratorError, GeneratorResult};

/// Interactive channel between question handlers and the user
pub trait Io {
	/// Ask a free-form question. An empty reply is returned as-is;
	/// callers decide whether empty is acceptable.
	fn ask(&mut self, prompt: &str, default: Option<&str>) -> GeneratorResult<String>;

	/// Ask a yes/no question.
	fn confirm(&mut self, prompt: &str, default: bool) -> GeneratorResult<bool>;

	/// Ask the user to pick one item, returning its index.
	fn select(&mut self, prompt: &str, items: &[String], default: usize) -> GeneratorResult<usize>;

	fn error(&mut self, message: &str);

	fn info(&mut self, message: &str);

	fn success(&mut self, message: &str);
}

/// Terminal-backed prompts with the standard colorful theme
pub struct ConsoleIo {
	theme: ColorfulTheme,
}

impl ConsoleIo {
	pub fn new() -> Self {
		Self {
			theme: ColorfulTheme::default(),
		}
	}
}

impl Default for ConsoleIo {
	fn default() -> Self {
		Self::new()
	}
}

impl Io for ConsoleIo {
	fn ask(&mut self, prompt: &str, default: Option<&str>) -> GeneratorResult<String> {
		let mut input = Input::<String>::with_theme(&self.theme)
			.with_prompt(prompt)
			.allow_empty(true);
		if let Some(default) = default {
			input = input.default(default.to_string());
		}
		Ok(input.interact_text()?)
	}

	fn confirm(&mut self, prompt: &str, default: bool) -> GeneratorResult<bool> {
		Ok(Confirm::with_theme(&self.theme)
			.with_prompt(prompt)
			.default(default)
			.interact()?)
	}

	fn select(&mut self, prompt: &str, items: &[String], default: usize) -> GeneratorResult<usize> {
		Ok(Select::with_theme(&self.theme)
			.with_prompt(prompt)
			.items(items)
			.default(default)
			.interact()?)
	}

	fn error(&mut self, message: &str) {
		eprintln!("{} {}", style("error:").red().bold(), message);
	}

	fn info(&mut self, message: &str) {
		println!("{message}");
	}

	fn success(&mut self, message: &str) {
		println!("{} {}", style("✓").green().bold(), message);
	}
}

/// Scripted answers for tests: a queue of replies consumed in order.
///
/// `select` answers match the item text, `confirm` answers are `y`/`n`.
/// Running out of answers fails the question instead of looping, so a
/// test with a wrong script errors out instead of hanging.
#[derive(Debug, Default)]
pub struct ScriptedIo {
	answers: VecDeque<String>,
	pub errors: Vec<String>,
	pub infos: Vec<String>,
	pub successes: Vec<String>,
}

impl ScriptedIo {
	pub fn new<I, S>(answers: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self {
			answers: answers.into_iter().map(Into::into).collect(),
			..Self::default()
		}
	}

	fn next_answer(&mut self, prompt: &str) -> GeneratorResult<String> {
		self.answers.pop_front().ok_or_else(|| {
			GeneratorError::InvalidArguments(format!(
				"Ran out of scripted answers at prompt \"{prompt}\""
			))
		})
	}
}

impl Io for ScriptedIo {
	fn ask(&mut self, prompt: &str, default: Option<&str>) -> GeneratorResult<String> {
		let answer = self.next_answer(prompt)?;
		if answer.is_empty() {
			if let Some(default) = default {
				return Ok(default.to_string());
			}
		}
		Ok(answer)
	}

	fn confirm(&mut self, prompt: &str, default: bool) -> GeneratorResult<bool> {
		let answer = self.next_answer(prompt)?;
		match answer.trim() {
			"" => Ok(default),
			"y" | "yes" | "true" => Ok(true),
			"n" | "no" | "false" => Ok(false),
			other => Err(GeneratorError::InvalidArguments(format!(
				"Scripted confirm answer \"{other}\" is not yes or no"
			))),
		}
	}

	fn select(&mut self, prompt: &str, items: &[String], default: usize) -> GeneratorResult<usize> {
		let answer = self.next_answer(prompt)?;
		if answer.is_empty() {
			return Ok(default);
		}
		items
			.iter()
			.position(|item| item == &answer)
			.ok_or_else(|| {
				GeneratorError::InvalidArguments(format!(
					"Scripted select answer \"{answer}\" is not offered by \"{prompt}\""
				))
			})
	}

	fn error(&mut self, message: &str) {
		self.errors.push(message.to_string());
	}

	fn info(&mut self, message: &str) {
		self.infos.push(message.to_string());
	}

	fn success(&mut self, message: &str) {
		self.successes.push(message.to_string());
	}
}
