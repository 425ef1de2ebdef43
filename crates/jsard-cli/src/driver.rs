//! One jsard invocation: read the input, deobfuscate, write the output.

use anyhow::{Context, Result};
use jsard_common::Diagnostic;
use jsard_core::{Deobfuscator, JsardError};
use std::io::{Read, Write};
use std::path::Path;
use tracing::{debug, info};

use crate::args::CliArgs;
use crate::config::{JsardConfig, load_config, resolve_options};

pub const EXIT_SUCCESS: i32 = 0;
/// I/O, configuration and any other failure outside the engine
pub const EXIT_UNKNOWN_FAILURE: i32 = 1;
/// Bad command line (clap uses 2 as well) or no obfuscation array
pub const EXIT_INVALID_INPUT: i32 = 2;
pub const EXIT_PARSE_ERROR: i32 = 3;
pub const EXIT_NON_TERMINATING: i32 = 4;

/// Name used for standard input in diagnostics.
pub const STDIN_NAME: &str = "<stdin>";

/// What the binary needs to report once the run is over.
#[derive(Debug)]
pub struct RunResult {
    /// Input file name as shown in diagnostics
    pub file_name: String,
    /// Input text, for diagnostic snippets
    pub source: String,
    /// Skipped references on success, the fatal error otherwise
    pub diagnostics: Vec<Diagnostic>,
    pub exit_code: i32,
}

pub fn exit_code_for(error: &JsardError) -> i32 {
    match error {
        JsardError::InvalidInputFormat(_) => EXIT_INVALID_INPUT,
        JsardError::Parse(_) => EXIT_PARSE_ERROR,
        JsardError::NonTerminatingRewrite { .. } => EXIT_NON_TERMINATING,
    }
}

/// Run jsard for `args`. Engine failures are reported through
/// [`RunResult`]; only I/O and configuration problems are `Err`.
pub fn run(args: &CliArgs) -> Result<RunResult> {
    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => JsardConfig::default(),
    };
    let options = resolve_options(args, &config);
    debug!(?options, "resolved options");

    let (file_name, source) = read_input(args.input_path())?;
    let deobfuscator = Deobfuscator::new(options);

    match deobfuscator.run_named(&file_name, &source) {
        Ok(result) => {
            write_output(args.output_path(), &result.code)?;
            let diagnostics = result
                .diagnostics
                .iter()
                .map(|diagnostic| diagnostic.to_diagnostic(&file_name))
                .collect();
            Ok(RunResult {
                file_name,
                source,
                diagnostics,
                exit_code: EXIT_SUCCESS,
            })
        }
        Err(error) => {
            info!(code = error.code(), "{error}");
            Ok(RunResult {
                diagnostics: vec![error.to_diagnostic(&file_name)],
                exit_code: exit_code_for(&error),
                file_name,
                source,
            })
        }
    }
}

fn read_input(path: Option<&Path>) -> Result<(String, String)> {
    match path {
        Some(path) => {
            let source = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read input: {}", path.display()))?;
            Ok((path.display().to_string(), source))
        }
        None => {
            let mut source = String::new();
            std::io::stdin()
                .lock()
                .read_to_string(&mut source)
                .context("failed to read standard input")?;
            Ok((STDIN_NAME.to_string(), source))
        }
    }
}

/// Write `code` followed by a newline.
fn write_output(path: Option<&Path>, code: &str) -> Result<()> {
    let mut text = String::with_capacity(code.len() + 1);
    text.push_str(code);
    text.push('\n');

    match path {
        Some(path) => std::fs::write(path, text)
            .with_context(|| format!("failed to write output: {}", path.display())),
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(text.as_bytes())
                .and_then(|()| stdout.flush())
                .context("failed to write standard output")
        }
    }
}
