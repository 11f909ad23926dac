//! Schema and types commands - print intermediate results to stdout.

use super::ProjectArgs;
use crate::config::ContentgenConfig;
use crate::dotpkg::declaration_module;
use crate::source::{ContentSource, JsonSource};
use clap::Args;
use contentgen_typegen::{CoreSchema, normalize};

/// Arguments of the schema and types commands
#[derive(Args, Debug)]
pub struct InspectArgs {
    #[command(flatten)]
    pub project: ProjectArgs,
}

async fn load_schema(args: &InspectArgs, config: &ContentgenConfig) -> Result<CoreSchema, String> {
    let root = &args.project.root;
    let source = JsonSource::new(args.project.schema_path(config), config.cache_path(root));
    let schema = source.provide_schema().await.map_err(|e| e.to_string())?;
    normalize(&schema).map_err(|e| e.to_string())
}

/// Print the normalized schema as pretty JSON
pub async fn run_schema(args: InspectArgs) -> i32 {
    let config = args.project.config();
    let schema = match load_schema(&args, &config).await {
        Ok(s) => s,
        Err(e) => {
            eprintln!("{}", e);
            return 1;
        }
    };

    match serde_json::to_string_pretty(&schema) {
        Ok(json) => {
            println!("{}", json);
            0
        }
        Err(e) => {
            eprintln!("Failed to serialize schema: {}", e);
            1
        }
    }
}

/// Print the declaration module
pub async fn run_types(args: InspectArgs) -> i32 {
    let config = args.project.config();
    match load_schema(&args, &config).await {
        Ok(schema) => {
            print!("{}", declaration_module(&schema, &config.emit_options()));
            0
        }
        Err(e) => {
            eprintln!("{}", e);
            1
        }
    }
}
