//! Indentation-aware output buffer.

#[derive(Debug, Default)]
pub struct SourceWriter {
    output: String,
    indent_level: u32,
    indent_width: usize,
    /// Indentation is written lazily, with the first text on a line
    at_line_start: bool,
}

impl SourceWriter {
    pub fn new(indent_width: usize) -> SourceWriter {
        SourceWriter {
            output: String::new(),
            indent_level: 0,
            indent_width,
            at_line_start: true,
        }
    }

    pub fn with_capacity(indent_width: usize, capacity: usize) -> SourceWriter {
        SourceWriter {
            output: String::with_capacity(capacity),
            ..SourceWriter::new(indent_width)
        }
    }

    fn write_indent(&mut self) {
        if self.at_line_start {
            let width = self.indent_level as usize * self.indent_width;
            self.output.extend(std::iter::repeat_n(' ', width));
            self.at_line_start = false;
        }
    }

    pub fn write(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        self.write_indent();
        self.output.push_str(text);
    }

    pub fn write_char(&mut self, ch: char) {
        self.write_indent();
        self.output.push(ch);
    }

    pub fn write_space(&mut self) {
        self.write_char(' ');
    }

    pub fn write_line(&mut self) {
        self.output.push('\n');
        self.at_line_start = true;
    }

    pub fn increase_indent(&mut self) {
        self.indent_level += 1;
    }

    pub fn decrease_indent(&mut self) {
        self.indent_level = self.indent_level.saturating_sub(1);
    }

    pub fn indent_level(&self) -> u32 {
        self.indent_level
    }

    pub fn len(&self) -> usize {
        self.output.len()
    }

    pub fn is_empty(&self) -> bool {
        self.output.is_empty()
    }

    pub fn get_output(&self) -> &str {
        &self.output
    }

    pub fn take_output(self) -> String {
        self.output
    }
}

#[cfg(test)]
#[path = "tests/source_writer_tests.rs"]
mod source_writer_tests;
