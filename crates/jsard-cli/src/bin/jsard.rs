#![allow(clippy::print_stderr)]

use clap::Parser;
use std::io::IsTerminal;

use jsard_cli::args::{CliArgs, ReportFormat, Verbosity};
use jsard_cli::driver::{self, EXIT_UNKNOWN_FAILURE, RunResult};
use jsard_cli::reporter::Reporter;
use jsard_cli::tracing_config::init_tracing;

fn main() {
    // clap exits with status 2 on invalid arguments
    let args = CliArgs::parse();
    init_tracing(args.verbosity);

    let exit_code = match driver::run(&args) {
        Ok(result) => {
            report(&args, &result);
            result.exit_code
        }
        Err(error) => {
            if args.verbosity != Verbosity::Disabled {
                eprintln!("error: {error:#}");
            }
            EXIT_UNKNOWN_FAILURE
        }
    };
    std::process::exit(exit_code);
}

fn report(args: &CliArgs, result: &RunResult) {
    let diagnostics: Vec<_> = result
        .diagnostics
        .iter()
        .filter(|diagnostic| args.verbosity.reports(diagnostic.category))
        .cloned()
        .collect();
    if diagnostics.is_empty() {
        return;
    }

    let pretty = args
        .pretty
        .unwrap_or_else(|| std::io::stderr().is_terminal());
    // stderr may be redirected while stdout is a terminal; colored only looks at stdout
    colored::control::set_override(pretty);
    let mut reporter = Reporter::new(pretty);
    reporter.add_source(result.file_name.clone(), result.source.clone());

    match args.report_format {
        ReportFormat::Text => eprintln!("{}", reporter.render(&diagnostics)),
        ReportFormat::Json => match reporter.render_json(&diagnostics) {
            Ok(json) => eprintln!("{json}"),
            Err(error) => eprintln!("error: failed to serialize diagnostics: {error}"),
        },
    }
}
