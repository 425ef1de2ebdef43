use crate::args::{CliArgs, ReportFormat, Verbosity};
use clap::Parser;
use jsard_common::DiagnosticCategory;
use std::path::Path;
use tracing_subscriber::filter::LevelFilter;

#[test]
fn defaults_read_stdin_and_write_stdout() {
    let args = CliArgs::try_parse_from(["jsard"]).expect("no arguments should parse");
    assert_eq!(args.input_path(), None);
    assert_eq!(args.output_path(), None);
    assert_eq!(args.verbosity, Verbosity::Info);
    assert_eq!(args.report_format, ReportFormat::Text);
    assert!(args.config.is_none());
    assert!(args.pretty.is_none());
}

#[test]
fn dash_means_standard_streams() {
    let args = CliArgs::try_parse_from(["jsard", "-i", "-", "-o", "-"]).expect("should parse");
    assert_eq!(args.input_path(), None);
    assert_eq!(args.output_path(), None);
}

#[test]
fn parses_files_and_selection_flags() {
    let args = CliArgs::try_parse_from([
        "jsard",
        "--input",
        "in.js",
        "-o",
        "out.js",
        "--array-name",
        "_0x3f2a",
        "--min-elements",
        "4",
        "--max-passes",
        "16",
        "--config",
        "jsard.json",
    ])
    .expect("should parse");

    assert_eq!(args.input_path(), Some(Path::new("in.js")));
    assert_eq!(args.output_path(), Some(Path::new("out.js")));
    assert_eq!(args.array_name.as_deref(), Some("_0x3f2a"));
    assert_eq!(args.min_elements, Some(4));
    assert_eq!(args.max_passes, Some(16));
    assert_eq!(args.config.as_deref(), Some(Path::new("jsard.json")));
}

#[test]
fn verbosity_accepts_every_level_case_insensitively() {
    for (value, expected) in [
        ("debug", Verbosity::Debug),
        ("INFO", Verbosity::Info),
        ("warning", Verbosity::Warning),
        ("Error", Verbosity::Error),
        ("critical", Verbosity::Critical),
        ("disabled", Verbosity::Disabled),
    ] {
        let args = CliArgs::try_parse_from(["jsard", "-v", value]).expect("level should parse");
        assert_eq!(args.verbosity, expected, "{value}");
    }
}

#[test]
fn rejects_unknown_verbosity() {
    assert!(CliArgs::try_parse_from(["jsard", "-v", "loud"]).is_err());
}

#[test]
fn rejects_non_numeric_pass_cap() {
    assert!(CliArgs::try_parse_from(["jsard", "--max-passes", "many"]).is_err());
}

#[test]
fn pretty_and_report_format() {
    let args = CliArgs::try_parse_from(["jsard", "--pretty", "false", "--report-format", "json"])
        .expect("should parse");
    assert_eq!(args.pretty, Some(false));
    assert_eq!(args.report_format, ReportFormat::Json);
}

#[test]
fn verbosity_maps_to_level_filters() {
    assert_eq!(Verbosity::Debug.level_filter(), LevelFilter::DEBUG);
    assert_eq!(Verbosity::Warning.level_filter(), LevelFilter::WARN);
    assert_eq!(Verbosity::Critical.level_filter(), LevelFilter::ERROR);
    assert_eq!(Verbosity::Disabled.level_filter(), LevelFilter::OFF);
}

#[test]
fn quieter_levels_hide_warnings() {
    assert!(Verbosity::Info.reports(DiagnosticCategory::Warning));
    assert!(Verbosity::Warning.reports(DiagnosticCategory::Warning));
    assert!(!Verbosity::Error.reports(DiagnosticCategory::Warning));
    assert!(Verbosity::Critical.reports(DiagnosticCategory::Error));
    assert!(!Verbosity::Disabled.reports(DiagnosticCategory::Error));
}
