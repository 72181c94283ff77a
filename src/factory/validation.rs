//! Validation construction, including doc-comment extraction

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::metadata::{MetaProperty, MetaValidation};

/// Matches `@Assert\Name` with an optional `(…)` option list.
static ASSERT_PATTERN: Lazy<Regex> =
	Lazy::new(|| Regex::new(r"@Assert\\(\w+)(\([^)]*\))?").expect("valid assert pattern"));

/// Matches one `name=value` option: bare word, quoted string or `{…}`
/// list.
static OPTION_PATTERN: Lazy<Regex> = Lazy::new(|| {
	Regex::new(r#"(\w+)=((\w+)|("[^"]+")|(\{[^}]+\}))"#).expect("valid option pattern")
});

/// Builds [`MetaValidation`]s from explicit config or doc comments
#[derive(Debug, Clone, Copy, Default)]
pub struct MetaValidationFactory;

impl MetaValidationFactory {
	/// Create a validation and attach it to its owning property.
	pub fn create(
		&self,
		property: &mut MetaProperty,
		name: &str,
		options: IndexMap<String, String>,
	) {
		property.add_validation(MetaValidation::new(name).with_options(options));
	}

	/// Extract `@Assert\…` validation rules from a documentation
	/// comment. Options parse as a flat `name=value` list with quotes
	/// stripped; `{…}` list values pass through verbatim.
	///
	/// # Examples
	///
	/// ```
	/// use entity_forge::factory::MetaValidationFactory;
	///
	/// let parsed = MetaValidationFactory
	/// 	.parse_doc_comment(r#"/** @Assert\NotBlank(message="required") */"#);
	/// assert_eq!(parsed.len(), 1);
	/// assert_eq!(parsed[0].name(), "NotBlank");
	/// assert_eq!(parsed[0].options()["message"], "required");
	/// ```
	pub fn parse_doc_comment(&self, doc_comment: &str) -> Vec<MetaValidation> {
		ASSERT_PATTERN
			.captures_iter(doc_comment)
			.map(|captures| {
				let name = &captures[1];
				let mut options = IndexMap::new();
				if let Some(raw_options) = captures.get(2) {
					let inner = &raw_options.as_str()[1..raw_options.len() - 1];
					for option in OPTION_PATTERN.captures_iter(inner) {
						let value = option[2].trim_matches('"').to_string();
						options.insert(option[1].to_string(), value);
					}
				}
				MetaValidation::new(name).with_options(options)
			})
			.collect()
	}

	/// Parse a doc comment and attach every extracted rule to the
	/// property.
	pub fn add_from_doc_comment(&self, property: &mut MetaProperty, doc_comment: &str) {
		for validation in self.parse_doc_comment(doc_comment) {
			property.add_validation(validation);
		}
	}
}
