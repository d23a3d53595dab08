//! Indentation-aware text buffer.

const DEFAULT_INDENT: &str = "    ";

/// Accumulates source text line by line with indentation.
#[derive(Debug, Clone)]
pub struct CodeWriter {
    out: String,
    indent: usize,
    unit: &'static str,
    at_line_start: bool,
}

impl Default for CodeWriter {
    fn default() -> Self {
        Self::new(DEFAULT_INDENT)
    }
}

impl CodeWriter {
    /// Creates a writer indenting with `unit` per level.
    #[must_use]
    pub fn new(unit: &'static str) -> Self {
        Self {
            out: String::new(),
            indent: 0,
            unit,
            at_line_start: true,
        }
    }

    /// Increases the indentation of the following lines.
    pub fn indent(&mut self) {
        self.indent += 1;
    }

    /// Decreases the indentation of the following lines.
    pub fn dedent(&mut self) {
        self.indent = self.indent.saturating_sub(1);
    }

    /// Appends text to the current line.
    pub fn write(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        if self.at_line_start {
            for _ in 0..self.indent {
                self.out.push_str(self.unit);
            }
            self.at_line_start = false;
        }
        self.out.push_str(text);
    }

    /// Ends the current line.
    pub fn newline(&mut self) {
        self.out.push('\n');
        self.at_line_start = true;
    }

    /// Writes a complete line.
    pub fn line(&mut self, text: &str) {
        self.write(text);
        self.newline();
    }

    /// Ends the current line if anything was written to it.
    pub fn end_line(&mut self) {
        if !self.at_line_start {
            self.newline();
        }
    }

    /// Emits one empty line; consecutive calls and calls at the start of the
    /// buffer are collapsed.
    pub fn blank_line(&mut self) {
        self.end_line();
        if self.out.is_empty() || self.out.ends_with("\n\n") || self.out.ends_with("{\n") {
            return;
        }
        self.newline();
    }

    /// Removes empty lines at the end of the buffer.
    pub fn trim_blank_lines(&mut self) {
        self.end_line();
        while self.out.ends_with("\n\n") {
            self.out.pop();
        }
    }

    /// Current indentation level.
    #[must_use]
    pub const fn level(&self) -> usize {
        self.indent
    }

    /// Returns the text with exactly one trailing newline.
    #[must_use]
    pub fn finish(mut self) -> String {
        let trimmed = self.out.trim_end_matches('\n').len();
        self.out.truncate(trimmed);
        self.out.push('\n');
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indentation_applies_to_new_lines() {
        let mut writer = CodeWriter::default();
        writer.line("class A {");
        writer.indent();
        writer.write("int x");
        writer.write(";");
        writer.newline();
        writer.dedent();
        writer.line("}");
        assert_eq!(writer.finish(), "class A {\n    int x;\n}\n");
    }

    #[test]
    fn test_blank_lines_collapse() {
        let mut writer = CodeWriter::new("\t");
        writer.blank_line();
        writer.line("a");
        writer.blank_line();
        writer.blank_line();
        writer.write("b");
        writer.blank_line();
        assert_eq!(writer.finish(), "a\n\nb\n");
    }

    #[test]
    fn test_no_blank_line_after_opening_brace() {
        let mut writer = CodeWriter::default();
        writer.line("{");
        writer.blank_line();
        writer.line("}");
        assert_eq!(writer.finish(), "{\n}\n");
    }

    #[test]
    fn test_trim_blank_lines_before_closing_brace() {
        let mut writer = CodeWriter::default();
        writer.line("enum A {");
        writer.indent();
        writer.line("X;");
        writer.blank_line();
        writer.trim_blank_lines();
        writer.dedent();
        writer.line("}");
        assert_eq!(writer.finish(), "enum A {\n    X;\n}\n");
    }

    #[test]
    fn test_dedent_saturates() {
        let mut writer = CodeWriter::default();
        writer.dedent();
        assert_eq!(writer.level(), 0);
        writer.line("x");
        assert_eq!(writer.finish(), "x\n");
    }
}
