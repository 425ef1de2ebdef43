//! Command-line front end for the jsard deobfuscator.
//!
//! - `args` - clap definitions (`CliArgs`)
//! - `config` - `jsard.json` loading and merging with flags
//! - `driver` - read input, deobfuscate, write output, pick the exit code
//! - `reporter` - text and JSON rendering of diagnostics
//! - `tracing_config` - stderr log subscriber

pub mod args;
pub mod config;
pub mod driver;
pub mod reporter;
pub mod tracing_config;

#[cfg(test)]
#[path = "tests/args_tests.rs"]
mod args_tests;
#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod config_tests;
#[cfg(test)]
#[path = "tests/reporter_tests.rs"]
mod reporter_tests;
