//! entity-forge
//!
//! Interactive scaffolding for ORM-annotated entity classes. A
//! meta-model (entities, properties, attributes, validation rules)
//! is built up by factories and an interactive question flow, then
//! projected into a render-ready artifact for a template layer.
//!
//! The crate is organised around that pipeline:
//!
//! - [`metadata`]: the meta-model itself
//! - [`factory`]: construction from shortcut notation, configuration
//!   and doc comments
//! - [`reader`]: rebuilding a meta-entity from an existing class
//! - [`questions`]: the interactive flow that mutates the meta-model
//! - [`artifact`]: the serializable generation output
//!
//! ## Example
//!
//! ```
//! use entity_forge::config::GeneratorConfig;
//! use entity_forge::questions::io::ScriptedIo;
//! use entity_forge::questions::GeneratorSession;
//!
//! let session = GeneratorSession::new(GeneratorConfig::default()).unwrap();
//! let mut io = ScriptedIo::new([
//! 	"blog:Post", // entity name
//! 	"",          // sub directory
//! 	"title",     // first field
//! 	"string",
//! 	"y",         // nullable
//! 	"n",         // unique
//! 	"255",       // length
//! 	"",          // stop adding fields
//! 	"",          // review menu: all fine
//! ]);
//! let entity = session.run(&mut io, None).unwrap();
//! assert_eq!(entity.name(), "Post");
//! ```

pub mod artifact;
pub mod config;
pub mod error;
pub mod factory;
pub mod inflect;
pub mod metadata;
pub mod questions;
pub mod reader;

pub use artifact::EntityArtifact;
pub use config::GeneratorConfig;
pub use error::{GeneratorError, GeneratorResult};
pub use metadata::{MetaEntity, MetaProperty, PropertyKind};
pub use questions::GeneratorSession;
