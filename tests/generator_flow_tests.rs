//! Generator session flow tests
//!
//! End-to-end runs of the interactive question flow against scripted
//! answers: entity creation, field collection, attribute prompts and
//! the review menu.

use entity_forge::artifact::EntityArtifact;
use entity_forge::config::GeneratorConfig;
use entity_forge::metadata::PropertyKind;
use entity_forge::questions::io::ScriptedIo;
use entity_forge::questions::GeneratorSession;
use rstest::{fixture, rstest};

// =============================================================================
// Fixtures
// =============================================================================

#[fixture]
fn session() -> GeneratorSession {
	GeneratorSession::new(GeneratorConfig::default()).unwrap()
}

fn bundled_session() -> GeneratorSession {
	let raw = r#"
		[bundles]
		blog = "Blog\\Entity"
	"#;
	let user = toml::from_str(raw).unwrap();
	let config = GeneratorConfig::from_user(user).unwrap();
	GeneratorSession::new(config).unwrap()
}

// =============================================================================
// Entity Creation Tests
// =============================================================================

/// Test that an empty name answer reports an error and re-prompts
///
/// **Category**: Edge Case
/// **Verifies**: the name question retries instead of failing the run
#[rstest]
fn test_empty_name_is_reprompted(session: GeneratorSession) {
	let mut io = ScriptedIo::new([
		"",        // rejected
		"Invoice", // accepted
		"",        // sub directory
		"",        // stop adding fields
		"",        // review menu: all fine
	]);
	let entity = session.run(&mut io, None).unwrap();
	assert_eq!(entity.name(), "Invoice");
	assert_eq!(io.errors, vec!["The entity name cannot be empty"]);
}

/// Test shortcut notation with bundle and sub-directory
///
/// **Category**: Happy Path
/// **Verifies**: `blog:Post/Admin` resolves bundle, name and sub-dir
#[rstest]
fn test_shortcut_notation_resolves_all_parts() {
	let session = bundled_session();
	let mut io = ScriptedIo::new(["blog:Post/Admin", "", "", ""]);
	let entity = session.run(&mut io, None).unwrap();
	assert_eq!(entity.name(), "Post");
	assert_eq!(entity.namespace(), "Blog\\Entity");
	assert_eq!(entity.sub_dir(), Some("Admin"));
	assert_eq!(entity.full_class_name(), "Blog\\Entity\\Admin\\Post");
}

/// Test that the command-line entity argument becomes the default
///
/// **Category**: Happy Path
/// **Verifies**: an empty answer accepts the argument as the name
#[rstest]
fn test_cli_argument_is_the_default_name(session: GeneratorSession) {
	let mut io = ScriptedIo::new(["", "", "", ""]);
	let entity = session.run(&mut io, Some("Order".to_string())).unwrap();
	assert_eq!(entity.name(), "Order");
}

// =============================================================================
// Field Collection Tests
// =============================================================================

/// Test a full run with a string field and a one-to-many field
///
/// **Category**: Happy Path
/// **Verifies**: fields keep insertion order and derived attributes
#[rstest]
fn test_fields_are_collected_in_order(session: GeneratorSession) {
	let mut io = ScriptedIo::new([
		"Post", // entity name
		"",     // sub directory
		"title", "string", "y", "n", "255", // first field
		"comments", "OneToMany", "n", "n", // second field (unique, orphanRemoval)
		"",     // stop adding fields
		"",     // review menu: all fine
	]);
	let entity = session.run(&mut io, None).unwrap();

	let names: Vec<&str> = entity.properties().iter().map(|p| p.name()).collect();
	assert_eq!(names, vec!["title", "comments"]);

	let title = entity.property_by_name("title").unwrap();
	assert_eq!(title.kind(), PropertyKind::String);
	assert_eq!(title.length(), Some(255));

	let comments = entity.property_by_name("comments").unwrap();
	assert_eq!(comments.kind(), PropertyKind::OneToMany);
	assert_eq!(comments.target_entity().unwrap().name, "Comment");
	assert_eq!(comments.mapped_by(), Some("post"));
}

/// Test the rendered annotations of a collected string field
///
/// **Category**: Happy Path
/// **Verifies**: length shows up in the column annotation options
#[rstest]
fn test_length_appears_in_the_annotation(session: GeneratorSession) {
	let mut io = ScriptedIo::new([
		"Post", "", "title", "string", "y", "n", "255", "", "",
	]);
	let entity = session.run(&mut io, None).unwrap();
	let artifact = EntityArtifact::from_entity(&entity, &GeneratorConfig::default());
	let annotation = &artifact.properties[0].annotations[0];
	assert!(annotation.contains("length=255"), "got {annotation}");
	assert!(annotation.contains("nullable=true"), "got {annotation}");
}

// =============================================================================
// Review Menu Tests
// =============================================================================

/// Test renaming the entity through the review menu
///
/// **Category**: Happy Path
/// **Verifies**: edit actions re-run their question on the same entity
#[rstest]
fn test_review_menu_renames_the_entity(session: GeneratorSession) {
	let mut io = ScriptedIo::new([
		"Post",             // entity name
		"",                 // sub directory
		"",                 // stop adding fields
		"Edit entity name", // review action
		"Article",          // new name
		"",                 // review menu: all fine
	]);
	let entity = session.run(&mut io, None).unwrap();
	assert_eq!(entity.name(), "Article");
}

/// Test adding a field through the review menu
///
/// **Category**: Happy Path
/// **Verifies**: the fields question can run again after the first pass
#[rstest]
fn test_review_menu_adds_more_fields(session: GeneratorSession) {
	let mut io = ScriptedIo::new([
		"Post", "", "", // no fields on the first pass
		"Add more fields",
		"title", "string", "y", "n", "255", "",
		"", // review menu: all fine
	]);
	let entity = session.run(&mut io, None).unwrap();
	assert_eq!(entity.properties().len(), 1);
}

// =============================================================================
// Exhausted Script Tests
// =============================================================================

/// Test that running out of scripted answers fails instead of looping
///
/// **Category**: Edge Case
/// **Verifies**: the retry-until-valid contract is bounded under test
#[rstest]
fn test_exhausted_answers_fail_the_run(session: GeneratorSession) {
	let mut io = ScriptedIo::new([""; 3]);
	let result = session.run(&mut io, None);
	assert!(result.is_err());
}
