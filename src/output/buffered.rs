//! In-memory output, used by tests and anywhere the text is needed as a value

use std::io;

use super::ConsoleOutput;
use super::table::render_table;

/// Header row and body rows of one written table.
pub type WrittenTable = (Vec<String>, Vec<Vec<String>>);

/// Collects everything written to it.
#[derive(Debug, Default)]
pub struct BufferedOutput {
    lines: Vec<String>,
    tables: Vec<WrittenTable>,
    rendered: Vec<String>,
}

impl BufferedOutput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Plain lines, without tables.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn tables(&self) -> &[WrittenTable] {
        &self.tables
    }

    /// Everything in write order, tables rendered as text.
    pub fn text(&self) -> String {
        let mut text = self.rendered.join("\n");
        if !text.is_empty() {
            text.push('\n');
        }
        text
    }
}

impl ConsoleOutput for BufferedOutput {
    fn output_line(&mut self, line: &str) -> io::Result<()> {
        self.lines.push(line.to_string());
        self.rendered.push(line.to_string());
        Ok(())
    }

    fn output_table(&mut self, headers: &[&str], rows: &[Vec<String>]) -> io::Result<()> {
        self.tables.push((
            headers.iter().map(|h| h.to_string()).collect(),
            rows.to_vec(),
        ));
        self.rendered.extend(render_table(headers, rows));
        Ok(())
    }
}
