//! Validation rules attached to meta-properties

use indexmap::IndexMap;

/// A named validation rule with an option mapping
///
/// Owned by exactly one property, rendered as a single `@Assert\…`
/// annotation line.
#[derive(Debug, Clone, PartialEq)]
pub struct MetaValidation {
	name: String,
	options: IndexMap<String, String>,
}

impl MetaValidation {
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			options: IndexMap::new(),
		}
	}

	pub fn with_options(mut self, options: IndexMap<String, String>) -> Self {
		self.options = options;
		self
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn options(&self) -> &IndexMap<String, String> {
		&self.options
	}

	pub fn set_option(&mut self, name: impl Into<String>, value: impl Into<String>) {
		self.options.insert(name.into(), value.into());
	}

	/// Render the rule as an annotation line.
	///
	/// String options are re-quoted; bare booleans, numbers and `{…}`
	/// lists pass through untouched.
	///
	/// # Examples
	///
	/// ```
	/// use entity_forge::metadata::MetaValidation;
	///
	/// let mut validation = MetaValidation::new("NotBlank");
	/// validation.set_option("message", "required");
	/// assert_eq!(
	/// 	validation.annotation_formatted(),
	/// 	"@Assert\\NotBlank(message=\"required\")"
	/// );
	/// ```
	pub fn annotation_formatted(&self) -> String {
		if self.options.is_empty() {
			return format!("@Assert\\{}", self.name);
		}
		let options = self
			.options
			.iter()
			.map(|(name, value)| format!("{}={}", name, format_option_value(value)))
			.collect::<Vec<_>>()
			.join(", ");
		format!("@Assert\\{}({})", self.name, options)
	}
}

fn format_option_value(value: &str) -> String {
	if value == "true" || value == "false" {
		return value.to_string();
	}
	if value.parse::<i64>().is_ok() || value.parse::<f64>().is_ok() {
		return value.to_string();
	}
	if value.starts_with('{') && value.ends_with('}') {
		return value.to_string();
	}
	format!("\"{value}\"")
}
