//! Tracing setup for the jsard binary.
//!
//! The level comes from `-v/--verbosity` unless `JSARD_LOG` is set, in which
//! case `JSARD_LOG` is used as a full `EnvFilter` directive:
//!
//! ```bash
//! JSARD_LOG=jsard_core=trace jsard -i obfuscated.js
//! JSARD_LOG=debug JSARD_LOG_FORMAT=tree jsard -i obfuscated.js
//! ```
//!
//! `JSARD_LOG_FORMAT` picks the output shape:
//!
//! - `text` (default): flat `tracing-subscriber` lines
//! - `tree`: indented spans via `tracing-tree`
//! - `json`: one JSON object per event
//!
//! Everything is written to stderr; stdout carries the deobfuscated code.

use crate::args::Verbosity;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Registry, fmt};

const LOG_ENV: &str = "JSARD_LOG";
const LOG_FORMAT_ENV: &str = "JSARD_LOG_FORMAT";

/// Tracing output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Tree,
    Json,
}

impl LogFormat {
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "tree" => Self::Tree,
            "json" => Self::Json,
            _ => Self::Text,
        }
    }

    fn from_env() -> Self {
        Self::parse(&std::env::var(LOG_FORMAT_ENV).unwrap_or_default())
    }
}

/// Filter for `verbosity`, overridden by a non-empty `env_directive`.
pub fn build_filter(verbosity: Verbosity, env_directive: Option<&str>) -> EnvFilter {
    match env_directive.filter(|directive| !directive.trim().is_empty()) {
        Some(directive) => EnvFilter::builder().parse_lossy(directive),
        None => EnvFilter::builder()
            .with_default_directive(verbosity.level_filter().into())
            .parse_lossy(""),
    }
}

/// Install the global subscriber.
///
/// `disabled` without `JSARD_LOG` installs nothing. A subscriber that is
/// already installed (tests, embedding) is left alone.
pub fn init_tracing(verbosity: Verbosity) {
    let env_directive = std::env::var(LOG_ENV).ok();
    if env_directive.is_none() && verbosity.level_filter() == LevelFilter::OFF {
        return;
    }

    let filter = build_filter(verbosity, env_directive.as_deref());
    let installed = match LogFormat::from_env() {
        LogFormat::Tree => {
            let tree_layer = tracing_tree::HierarchicalLayer::default()
                .with_writer(std::io::stderr)
                .with_indent_amount(2)
                .with_indent_lines(true)
                .with_targets(true);
            Registry::default().with(filter).with(tree_layer).try_init()
        }
        LogFormat::Json => {
            let json_layer = fmt::layer().json().with_writer(std::io::stderr);
            Registry::default().with(filter).with(json_layer).try_init()
        }
        LogFormat::Text => {
            let text_layer = fmt::layer().with_target(false).with_writer(std::io::stderr);
            Registry::default().with(filter).with(text_layer).try_init()
        }
    };
    if installed.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}
