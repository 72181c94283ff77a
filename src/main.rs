//! entity-forge CLI
//!
//! Interactive entity scaffolding from the terminal.
//!
//! ## Usage
//!
//! ```bash
//! entity-forge generate
//! entity-forge generate blog:Post/Admin
//! entity-forge generate --config entity-forge.toml Invoice
//! ```

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use console::style;
use tracing_subscriber::EnvFilter;

use entity_forge::artifact::EntityArtifact;
use entity_forge::config::GeneratorConfig;
use entity_forge::error::GeneratorResult;
use entity_forge::questions::io::{ConsoleIo, Io};
use entity_forge::questions::GeneratorSession;

#[derive(Parser)]
#[command(name = "entity-forge")]
#[command(about = "Interactive ORM entity scaffolding", long_about = None)]
#[command(version)]
struct Cli {
	#[command(subcommand)]
	command: Commands,

	/// Verbosity level (can be repeated)
	#[arg(short, long, action = clap::ArgAction::Count)]
	verbosity: u8,
}

#[derive(Subcommand)]
enum Commands {
	/// Generate a new entity through the interactive question flow
	Generate {
		/// Entity shortcut notation: [bundle:]Name[/SubDir]
		#[arg(value_name = "ENTITY")]
		entity: Option<String>,

		/// Path to a configuration file
		#[arg(short, long, value_name = "PATH")]
		config: Option<PathBuf>,
	},
}

fn init_tracing(verbosity: u8) {
	let default_level = match verbosity {
		0 => "warn",
		1 => "info",
		2 => "debug",
		_ => "trace",
	};
	let filter = EnvFilter::try_from_default_env()
		.unwrap_or_else(|_| EnvFilter::new(default_level));
	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.init();
}

fn run_generate(entity: Option<String>, config_path: Option<PathBuf>) -> GeneratorResult<()> {
	let config = match config_path {
		Some(path) => GeneratorConfig::load(&path)?,
		None => GeneratorConfig::default(),
	};
	let session = GeneratorSession::new(config)?;
	let mut io = ConsoleIo::new();
	let entity = session.run(&mut io, entity)?;
	let artifact = EntityArtifact::from_entity(&entity, &session.context().config);

	io.success(&format!("Entity {} is ready", artifact.full_class_name));
	if let Some(repository) = &artifact.repository_class {
		io.info(&format!("  repository: {repository}"));
	}
	for usage in &artifact.usages {
		io.info(&format!("  use {usage};"));
	}
	for property in &artifact.properties {
		io.info(&format!(
			"  {} {} ({})",
			style(&property.name).bold(),
			property.return_type,
			property.orm_type
		));
		for line in &property.annotations {
			io.info(&format!("    {line}"));
		}
	}
	Ok(())
}

fn main() {
	let cli = Cli::parse();
	init_tracing(cli.verbosity);

	let result = match cli.command {
		Commands::Generate { entity, config } => run_generate(entity, config),
	};

	if let Err(error) = result {
		eprintln!("{} {}", style("error:").red().bold(), error);
		process::exit(1);
	}
}
