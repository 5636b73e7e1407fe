//! Console output
//!
//! Commands and the tree printer write through the `ConsoleOutput` trait:
//!
//! - `streaming` - colored stdout output for the CLI
//! - `buffered` - collects output in memory
//! - `table` - ASCII table layout shared by both
//! - `json` - single line JSON output

mod buffered;
mod config;
mod json;
mod streaming;
mod table;

use std::io;

pub use buffered::{BufferedOutput, WrittenTable};
pub use config::OutputConfig;
pub use json::print_json;
pub use streaming::StreamingFormatter;
pub use table::{TableLayout, render_table};

/// Sink for command output: free-form lines and tables.
pub trait ConsoleOutput {
    fn output_line(&mut self, line: &str) -> io::Result<()>;

    fn output_table(&mut self, headers: &[&str], rows: &[Vec<String>]) -> io::Result<()>;
}
