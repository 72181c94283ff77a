//! String inflection helpers
//!
//! Small, dependency-free case and number helpers used when deriving
//! class and property names: `classify` turns user input into a class
//! name, `camelize` into a property name, `singularize` strips the most
//! common English plural suffixes for one-to-many target derivation.

/// Convert a string to CamelCase, splitting on `_`, `-` and spaces.
///
/// # Examples
///
/// ```
/// use entity_forge::inflect::classify;
///
/// assert_eq!(classify("blog_post"), "BlogPost");
/// assert_eq!(classify("invoice"), "Invoice");
/// ```
pub fn classify(s: &str) -> String {
	s.split(['_', '-', ' '])
		.filter(|part| !part.is_empty())
		.map(ucfirst)
		.collect()
}

/// Lower-case the first character, leaving the rest untouched.
pub fn lcfirst(s: &str) -> String {
	let mut chars = s.chars();
	match chars.next() {
		None => String::new(),
		Some(first) => first.to_lowercase().collect::<String>() + chars.as_str(),
	}
}

/// Upper-case the first character, leaving the rest untouched.
pub fn ucfirst(s: &str) -> String {
	let mut chars = s.chars();
	match chars.next() {
		None => String::new(),
		Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
	}
}

/// Convert a string to lowerCamelCase (property-name form).
///
/// # Examples
///
/// ```
/// use entity_forge::inflect::camelize;
///
/// assert_eq!(camelize("created_at"), "createdAt");
/// assert_eq!(camelize("Title"), "title");
/// ```
pub fn camelize(s: &str) -> String {
	lcfirst(&classify(s))
}

/// Strip the most common English plural suffixes.
///
/// This covers the shapes that occur in property names (`categories`,
/// `addresses`, `boxes`, `tags`); irregular plurals pass through
/// unchanged.
///
/// # Examples
///
/// ```
/// use entity_forge::inflect::singularize;
///
/// assert_eq!(singularize("categories"), "category");
/// assert_eq!(singularize("addresses"), "address");
/// assert_eq!(singularize("tags"), "tag");
/// ```
pub fn singularize(s: &str) -> String {
	if ends_with_ignore_case(s, "ies") && s.len() > 3 {
		return format!("{}y", &s[..s.len() - 3]);
	}
	for suffix in ["sses", "shes", "ches", "xes", "zes"] {
		if ends_with_ignore_case(s, suffix) {
			return s[..s.len() - 2].to_string();
		}
	}
	if ends_with_ignore_case(s, "s") && !ends_with_ignore_case(s, "ss") && s.len() > 1 {
		return s[..s.len() - 1].to_string();
	}
	s.to_string()
}

/// ASCII-case-insensitive suffix check on the raw bytes, so the suffix
/// length can be sliced off `s` without splitting a char boundary.
fn ends_with_ignore_case(s: &str, suffix: &str) -> bool {
	s.len() >= suffix.len()
		&& s.is_char_boundary(s.len() - suffix.len())
		&& s[s.len() - suffix.len()..].eq_ignore_ascii_case(suffix)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_classify_basic() {
		assert_eq!(classify("blog_post"), "BlogPost");
		assert_eq!(classify("blog-post"), "BlogPost");
		assert_eq!(classify("post"), "Post");
		assert_eq!(classify(""), "");
	}

	#[test]
	fn test_camelize_is_lcfirst_classify() {
		assert_eq!(camelize("created_at"), "createdAt");
		assert_eq!(camelize("Comments"), "comments");
	}

	#[test]
	fn test_singularize_common_plurals() {
		assert_eq!(singularize("comments"), "comment");
		assert_eq!(singularize("categories"), "category");
		assert_eq!(singularize("addresses"), "address");
		assert_eq!(singularize("boxes"), "box");
		// No trailing s: unchanged.
		assert_eq!(singularize("staff"), "staff");
		// Double s is not a plural marker.
		assert_eq!(singularize("address"), "address");
	}

	#[test]
	fn test_singularize_handles_multi_byte_names() {
		assert_eq!(singularize("catégories"), "catégory");
		assert_eq!(singularize("entrées"), "entrée");
		// Lowercasing can change byte lengths (e.g. U+0130); suffix
		// matching must stay on the original string's boundaries.
		assert_eq!(singularize("ENTRİES"), "ENTRİE");
		assert_eq!(singularize("café"), "café");
	}
}
