//! Command-line interface.

pub mod generate;
pub mod inspect;

use crate::config::ContentgenConfig;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "contentgen", version, about = "Generate typed content packages from a content schema")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Generate the content package (data modules, declarations, manifest)
    Generate(generate::GenerateArgs),
    /// Print the normalized schema as JSON
    Schema(inspect::InspectArgs),
    /// Print the generated type declarations
    Types(inspect::InspectArgs),
}

/// Project location and schema override shared by every command.
#[derive(Args, Debug, Clone)]
pub struct ProjectArgs {
    /// Project root
    #[arg(long, default_value = ".")]
    pub root: PathBuf,

    /// Schema JSON file (overrides config)
    #[arg(long)]
    pub schema: Option<PathBuf>,
}

impl ProjectArgs {
    pub fn config(&self) -> ContentgenConfig {
        ContentgenConfig::load(&self.root)
    }

    pub fn schema_path(&self, config: &ContentgenConfig) -> PathBuf {
        self.schema
            .clone()
            .unwrap_or_else(|| config.schema_path(&self.root))
    }
}

/// Run a parsed command line, returning the process exit code.
pub async fn run(cli: Cli) -> i32 {
    match cli.command {
        Command::Generate(args) => generate::run(args).await,
        Command::Schema(args) => inspect::run_schema(args).await,
        Command::Types(args) => inspect::run_types(args).await,
    }
}
