//! Indented line writer for Kotlin source.

const INDENT: &str = "    ";

#[derive(Debug, Default)]
pub struct CodeWriter {
    buf: String,
    depth: usize,
}

impl CodeWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes one line at the current depth. Empty text writes a bare newline.
    pub fn line(&mut self, text: impl AsRef<str>) {
        let text = text.as_ref();
        if !text.is_empty() {
            for _ in 0..self.depth {
                self.buf.push_str(INDENT);
            }
            self.buf.push_str(text);
        }
        self.buf.push('\n');
    }

    pub fn blank(&mut self) {
        self.buf.push('\n');
    }

    pub fn indent(&mut self) {
        self.depth += 1;
    }

    pub fn dedent(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// Writes `header {`, the indented body, and the closing brace.
    pub fn block(&mut self, header: impl AsRef<str>, body: impl FnOnce(&mut Self)) {
        self.line(format!("{} {{", header.as_ref()));
        self.indent();
        body(self);
        self.dedent();
        self.line("}");
    }

    /// Writes a KDoc comment, one ` * ` line per input line.
    pub fn kdoc(&mut self, docs: &str) {
        self.line("/**");
        for line in docs.lines() {
            if line.is_empty() {
                self.line(" *");
            } else {
                self.line(format!(" * {}", line));
            }
        }
        self.line(" */");
    }

    pub fn finish(self) -> String {
        self.buf
    }
}
