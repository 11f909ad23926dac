//! Generate command - builds the content package.

use super::ProjectArgs;
use crate::dotpkg::{GenerateOptions, generate_dotpkg};
use crate::source::JsonSource;
use clap::Args;
use std::path::PathBuf;

/// Generate command arguments
#[derive(Args, Debug)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Content cache JSON file (overrides config)
    #[arg(long)]
    pub cache: Option<PathBuf>,

    /// Output directory (overrides config)
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Ask the content source to watch for changes
    #[arg(long)]
    pub watch: bool,
}

/// Run the generate command
pub async fn run(args: GenerateArgs) -> i32 {
    let config = args.project.config();
    let root = &args.project.root;

    let source = JsonSource::new(
        args.project.schema_path(&config),
        args.cache.unwrap_or_else(|| config.cache_path(root)),
    );
    let target = args.out.unwrap_or_else(|| config.output_dir(root));
    let options = GenerateOptions {
        watch_data: args.watch,
    };

    match generate_dotpkg(&source, &target, &options, &config.emit_options()).await {
        Ok(summary) => {
            eprintln!(
                "Generated {} documents ({} document types, {} object types) into {}",
                summary.documents,
                summary.document_types,
                summary.object_types,
                target.display()
            );
            0
        }
        Err(e) => {
            eprintln!("Generation failed: {}", e);
            1
        }
    }
}
