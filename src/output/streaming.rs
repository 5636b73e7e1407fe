//! Console output formatter
//!
//! This module provides `StreamingFormatter` which writes lines and tables
//! directly to stdout as they are produced.

use std::io::{self, Write};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use super::ConsoleOutput;
use super::config::OutputConfig;
use super::table::TableLayout;

/// Writes to stdout, coloring table headers and errors when enabled.
pub struct StreamingFormatter {
    stdout: StandardStream,
    stderr: StandardStream,
}

impl StreamingFormatter {
    pub fn new(config: OutputConfig) -> Self {
        let choice = if config.use_color {
            ColorChoice::Auto
        } else {
            ColorChoice::Never
        };
        Self {
            stdout: StandardStream::stdout(choice),
            stderr: StandardStream::stderr(choice),
        }
    }

    /// Report a failed command on stderr.
    pub fn error(&mut self, message: &str) -> io::Result<()> {
        self.stderr
            .set_color(ColorSpec::new().set_fg(Some(Color::Red)).set_bold(true))?;
        write!(self.stderr, "ERROR:")?;
        self.stderr.reset()?;
        writeln!(self.stderr, " {}", message)?;
        Ok(())
    }
}

impl ConsoleOutput for StreamingFormatter {
    fn output_line(&mut self, line: &str) -> io::Result<()> {
        writeln!(self.stdout, "{}", line)
    }

    fn output_table(&mut self, headers: &[&str], rows: &[Vec<String>]) -> io::Result<()> {
        let layout = TableLayout::new(headers, rows);
        let border = layout.border();

        writeln!(self.stdout, "{}", border)?;
        self.stdout
            .set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
        write!(self.stdout, "{}", layout.format_row(headers))?;
        self.stdout.reset()?;
        writeln!(self.stdout)?;
        writeln!(self.stdout, "{}", border)?;
        for row in rows {
            writeln!(self.stdout, "{}", layout.format_row(row))?;
        }
        writeln!(self.stdout, "{}", border)?;
        self.stdout.flush()
    }
}
