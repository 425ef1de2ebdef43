use colored::Colorize;
use jsard_common::{Diagnostic, DiagnosticCategory, LineMap};
use serde::Serialize;
use std::collections::HashMap;

/// Renders diagnostics for stderr, either as
/// `file:line:col - warning JSARD2001: message` with a source snippet or as
/// one JSON object per line.
pub struct Reporter {
    color: bool,
    sources: HashMap<String, String>,
    line_maps: HashMap<String, LineMap>,
}

/// JSON shape of a reported diagnostic.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonDiagnostic<'a> {
    #[serde(flatten)]
    diagnostic: &'a Diagnostic,
    /// 1-based, absent when the source text is unknown
    #[serde(skip_serializing_if = "Option::is_none")]
    line: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    column: Option<u32>,
}

impl Reporter {
    pub fn new(color: bool) -> Self {
        Reporter {
            color,
            sources: HashMap::new(),
            line_maps: HashMap::new(),
        }
    }

    /// Register the text of `file` so locations and snippets can be shown.
    /// Standard input never exists on disk, so sources are always handed in.
    pub fn add_source(&mut self, file: impl Into<String>, text: impl Into<String>) {
        let file = file.into();
        self.line_maps.remove(&file);
        self.sources.insert(file, text.into());
    }

    pub fn render(&mut self, diagnostics: &[Diagnostic]) -> String {
        let mut out = String::new();
        for (index, diagnostic) in diagnostics.iter().enumerate() {
            if index > 0 {
                out.push('\n');
            }
            out.push_str(&self.format_diagnostic(diagnostic));
        }
        out
    }

    pub fn render_json(&mut self, diagnostics: &[Diagnostic]) -> serde_json::Result<String> {
        let mut lines = Vec::with_capacity(diagnostics.len());
        for diagnostic in diagnostics {
            let position = self.position_for(&diagnostic.file, diagnostic.start);
            let json = JsonDiagnostic {
                diagnostic,
                line: position.map(|(line, _)| line),
                column: position.map(|(_, column)| column),
            };
            lines.push(serde_json::to_string(&json)?);
        }
        Ok(lines.join("\n"))
    }

    pub fn format_diagnostic(&mut self, diagnostic: &Diagnostic) -> String {
        let mut output = match self.format_location(&diagnostic.file, diagnostic.start) {
            Some(location) => location,
            None if !diagnostic.file.is_empty() => diagnostic.file.clone(),
            None => "<unknown>".to_string(),
        };

        output.push_str(" - ");
        output.push_str(&self.format_category(diagnostic.category));
        output.push(' ');
        output.push_str(&self.format_code(diagnostic.code));
        output.push_str(": ");
        output.push_str(&diagnostic.message_text);

        if let Some(snippet) =
            self.format_snippet(&diagnostic.file, diagnostic.start, diagnostic.length)
        {
            output.push_str(&snippet);
        }
        output
    }

    /// Source line with the span underlined:
    ///
    /// ```text
    ///     2   delete _a[0];
    ///                ~~~~~
    /// ```
    fn format_snippet(&mut self, file: &str, start: u32, length: u32) -> Option<String> {
        if length == 0 {
            return None;
        }
        let (line, column) = self.position_for(file, start)?;
        let (end_line, end_column) = self.position_for(file, start + length)?;
        let source = self.sources.get(file)?;
        let line_text = self.line_maps.get(file)?.line_text((line - 1) as usize, source)?;

        let underline_end = if end_line == line {
            end_column
        } else {
            line_text.chars().count() as u32 + 1
        };

        let mut underline = String::new();
        for (i, ch) in line_text.chars().enumerate() {
            let col = i as u32 + 1;
            if col >= underline_end {
                break;
            }
            let mark = if col < column { ' ' } else { '~' };
            if ch == '\t' {
                underline.extend(std::iter::repeat_n(mark, 4));
            } else {
                underline.push(mark);
            }
        }
        if !underline.contains('~') {
            underline.push('~');
        }

        let underline = if self.color {
            underline.red().to_string()
        } else {
            underline
        };
        Some(format!("\n  {line:>3}   {line_text}\n        {underline}"))
    }

    fn format_location(&mut self, file: &str, offset: u32) -> Option<String> {
        let (line, column) = self.position_for(file, offset)?;
        Some(format!("{file}:{line}:{column}"))
    }

    /// 1-based line and column of `offset` in a registered source.
    fn position_for(&mut self, file: &str, offset: u32) -> Option<(u32, u32)> {
        let source = self.sources.get(file)?;
        let line_map = self
            .line_maps
            .entry(file.to_string())
            .or_insert_with(|| LineMap::build(source));
        let position = line_map.offset_to_position(offset, source);
        Some((position.line + 1, position.character + 1))
    }

    fn format_category(&self, category: DiagnosticCategory) -> String {
        let label = category.as_str();
        if !self.color {
            return label.to_string();
        }
        match category {
            DiagnosticCategory::Error => label.red().bold().to_string(),
            DiagnosticCategory::Warning => label.yellow().bold().to_string(),
            DiagnosticCategory::Message => label.blue().to_string(),
        }
    }

    fn format_code(&self, code: u32) -> String {
        let text = format!("JSARD{code}");
        if self.color {
            text.dimmed().to_string()
        } else {
            text
        }
    }
}
