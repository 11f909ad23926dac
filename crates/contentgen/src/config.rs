//! Configuration for contentgen.
//!
//! Loads config from:
//! 1. Global: ~/.config/contentgen/config.toml
//! 2. Per-project: .contentgen/config.toml (overrides global)
//!
//! Example config.toml:
//! ```toml
//! [source]
//! schema = "contentgen.schema.json"
//! cache = ".contentgen/cache.json"
//!
//! [output]
//! dir = ".contentgen/generated"
//! package_name = "dot-contentgen"
//! runtime_module = "contentgen"
//! ```

use crate::dotpkg::EmitOptions;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::warn;

pub const DEFAULT_SCHEMA: &str = "contentgen.schema.json";
pub const DEFAULT_CACHE: &str = ".contentgen/cache.json";
pub const DEFAULT_OUTPUT_DIR: &str = ".contentgen/generated";

/// Where the schema and the realized cache are read from.
#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct SourceConfig {
    pub schema: Option<PathBuf>,
    pub cache: Option<PathBuf>,
}

/// Where and how the package is generated.
#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct OutputConfig {
    pub dir: Option<PathBuf>,
    pub package_name: Option<String>,
    pub package_version: Option<String>,
    /// Module providing `isType` and `Markdown` to generated code.
    pub runtime_module: Option<String>,
}

/// Root configuration structure.
#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct ContentgenConfig {
    pub source: SourceConfig,
    pub output: OutputConfig,
}

impl ContentgenConfig {
    /// Load configuration for a project.
    ///
    /// Loads global config from ~/.config/contentgen/config.toml,
    /// then merges with per-project config from .contentgen/config.toml.
    pub fn load(root: &Path) -> Self {
        let mut config = Self::default();

        if let Some(global) = Self::global_config_path().and_then(|p| Self::load_file(&p)) {
            config = config.merge(global);
        }

        let project_path = root.join(".contentgen").join("config.toml");
        if let Some(project) = Self::load_file(&project_path) {
            config = config.merge(project);
        }

        config
    }

    fn global_config_path() -> Option<PathBuf> {
        let config_home = std::env::var("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .ok()
            .or_else(|| dirs::home_dir().map(|h| h.join(".config")))?;
        Some(config_home.join("contentgen").join("config.toml"))
    }

    /// Load config from a file path. A missing file is not an error; a
    /// malformed one is logged and ignored.
    fn load_file(path: &Path) -> Option<Self> {
        let content = std::fs::read_to_string(path).ok()?;
        match toml::from_str(&content) {
            Ok(config) => Some(config),
            Err(err) => {
                warn!(path = %path.display(), error = %err, "ignoring invalid config file");
                None
            }
        }
    }

    /// Merge another config into this one. Values set in `other` win.
    fn merge(self, other: Self) -> Self {
        Self {
            source: SourceConfig {
                schema: other.source.schema.or(self.source.schema),
                cache: other.source.cache.or(self.source.cache),
            },
            output: OutputConfig {
                dir: other.output.dir.or(self.output.dir),
                package_name: other.output.package_name.or(self.output.package_name),
                package_version: other.output.package_version.or(self.output.package_version),
                runtime_module: other.output.runtime_module.or(self.output.runtime_module),
            },
        }
    }

    pub fn schema_path(&self, root: &Path) -> PathBuf {
        root.join(self.source.schema.as_deref().unwrap_or(Path::new(DEFAULT_SCHEMA)))
    }

    pub fn cache_path(&self, root: &Path) -> PathBuf {
        root.join(self.source.cache.as_deref().unwrap_or(Path::new(DEFAULT_CACHE)))
    }

    pub fn output_dir(&self, root: &Path) -> PathBuf {
        root.join(self.output.dir.as_deref().unwrap_or(Path::new(DEFAULT_OUTPUT_DIR)))
    }

    pub fn emit_options(&self) -> EmitOptions {
        let defaults = EmitOptions::default();
        EmitOptions {
            package_name: self.output.package_name.clone().unwrap_or(defaults.package_name),
            package_version: self
                .output
                .package_version
                .clone()
                .unwrap_or(defaults.package_version),
            runtime_module: self
                .output
                .runtime_module
                .clone()
                .unwrap_or(defaults.runtime_module),
        }
    }
}
