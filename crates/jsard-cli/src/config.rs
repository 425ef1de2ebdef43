use anyhow::{Context, Result};
use jsard_core::{ArraySelector, DeobfuscateOptions};
use serde::Deserialize;
use std::path::Path;

use crate::args::CliArgs;

/// Contents of a `jsard.json` file. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct JsardConfig {
    #[serde(default)]
    pub array_name: Option<String>,
    #[serde(default)]
    pub min_elements: Option<usize>,
    #[serde(default)]
    pub max_passes: Option<u32>,
}

pub fn parse_config(source: &str) -> Result<JsardConfig> {
    let config = serde_json::from_str(source).context("failed to parse jsard config JSON")?;
    Ok(config)
}

pub fn load_config(path: &Path) -> Result<JsardConfig> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config: {}", path.display()))?;
    parse_config(&source).with_context(|| format!("failed to parse config: {}", path.display()))
}

/// Engine options from the config file, with command-line flags taking
/// precedence key by key.
pub fn resolve_options(args: &CliArgs, config: &JsardConfig) -> DeobfuscateOptions {
    let defaults = DeobfuscateOptions::default();
    DeobfuscateOptions {
        max_passes: args
            .max_passes
            .or(config.max_passes)
            .unwrap_or(defaults.max_passes),
        max_arena_nodes: defaults.max_arena_nodes,
        selector: ArraySelector {
            name: args.array_name.clone().or_else(|| config.array_name.clone()),
            min_elements: args
                .min_elements
                .or(config.min_elements)
                .unwrap_or(defaults.selector.min_elements),
        },
    }
}
