//! Configuration resolution for the CLI
//!
//! An explicit `--config` path must exist. Without one, `synapse.toml` is
//! read from the current directory when present, and defaults apply
//! otherwise.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use synapse_core::{SynapseConfig, CONFIG_FILE};

/// Where the effective configuration came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(PathBuf),
    Defaults,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::File(path) => write!(f, "{}", path.display()),
            ConfigSource::Defaults => f.write_str("built-in defaults"),
        }
    }
}

/// Load the effective configuration
pub fn resolve(explicit: Option<&Path>) -> Result<(SynapseConfig, ConfigSource)> {
    if let Some(path) = explicit {
        let config = SynapseConfig::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?;
        return Ok((config, ConfigSource::File(path.to_path_buf())));
    }

    let cwd = std::env::current_dir().context("Failed to read current directory")?;
    resolve_in(&cwd)
}

fn resolve_in(dir: &Path) -> Result<(SynapseConfig, ConfigSource)> {
    let config = SynapseConfig::load_from_dir(dir)
        .with_context(|| format!("Failed to load {} in {}", CONFIG_FILE, dir.display()))?;
    let path = dir.join(CONFIG_FILE);
    let source = if path.exists() {
        ConfigSource::File(path)
    } else {
        ConfigSource::Defaults
    };
    Ok((config, source))
}
