use crate::reporter::Reporter;
use jsard_common::{Diagnostic, diagnostic_codes};

const SOURCE: &str = "var _a = ['x'];\ndelete _a[0];\n";

fn skipped_reference() -> Diagnostic {
    Diagnostic::warning(
        "in.js",
        23,
        5,
        "Cannot replace reference to '_a[0]' inside PrefixUnaryExpression: no replaceable expression slot.",
        diagnostic_codes::UNSUPPORTED_PARENT_SHAPE,
    )
}

#[test]
fn text_report_has_location_code_and_snippet() {
    let mut reporter = Reporter::new(false);
    reporter.add_source("in.js", SOURCE);

    let rendered = reporter.render(&[skipped_reference()]);
    let lines: Vec<&str> = rendered.lines().collect();
    assert_eq!(
        lines[0],
        "in.js:2:8 - warning JSARD2001: Cannot replace reference to '_a[0]' inside PrefixUnaryExpression: no replaceable expression slot."
    );
    assert_eq!(lines[1], "    2   delete _a[0];");
    assert_eq!(lines[2], "               ~~~~~");
}

#[test]
fn unknown_source_falls_back_to_file_name() {
    let mut reporter = Reporter::new(false);
    let diagnostic = Diagnostic::error(
        "<stdin>",
        0,
        0,
        "No obfuscation array declaration found.",
        diagnostic_codes::OBFUSCATION_ARRAY_NOT_FOUND,
    );
    assert_eq!(
        reporter.render(&[diagnostic]),
        "<stdin> - error JSARD3001: No obfuscation array declaration found."
    );
}

#[test]
fn render_joins_diagnostics_with_newlines() {
    let mut reporter = Reporter::new(false);
    reporter.add_source("in.js", SOURCE);
    let first = Diagnostic::error("in.js", 0, 0, "first", 1001);
    let second = Diagnostic::error("in.js", 16, 0, "second", 1001);
    assert_eq!(
        reporter.render(&[first, second]),
        "in.js:1:1 - error JSARD1001: first\nin.js:2:1 - error JSARD1001: second"
    );
}

#[test]
fn json_report_adds_line_and_column() {
    let mut reporter = Reporter::new(false);
    reporter.add_source("in.js", SOURCE);

    let rendered = reporter
        .render_json(&[skipped_reference()])
        .expect("diagnostic should serialize");
    let value: serde_json::Value = serde_json::from_str(&rendered).expect("valid JSON");
    assert_eq!(value["category"], "warning");
    assert_eq!(value["code"], 2001);
    assert_eq!(value["file"], "in.js");
    assert_eq!(value["start"], 23);
    assert_eq!(value["length"], 5);
    assert_eq!(value["line"], 2);
    assert_eq!(value["column"], 8);
    assert!(
        value["messageText"]
            .as_str()
            .is_some_and(|text| text.starts_with("Cannot replace"))
    );
}

#[test]
fn json_report_without_source_omits_position() {
    let mut reporter = Reporter::new(false);
    let diagnostic = Diagnostic::error("<stdin>", 0, 0, "No obfuscation array declaration found.", 3001);
    let rendered = reporter.render_json(&[diagnostic]).expect("serializes");
    let value: serde_json::Value = serde_json::from_str(&rendered).expect("valid JSON");
    assert!(value.get("line").is_none());
    assert_eq!(value["code"], 3001);
}
