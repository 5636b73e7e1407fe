//! JSON output formatting

use std::io;

use serde::Serialize;

use super::ConsoleOutput;

/// Write `value` as a single line of JSON.
pub fn print_json<T, O>(value: &T, output: &mut O) -> io::Result<()>
where
    T: Serialize + ?Sized,
    O: ConsoleOutput + ?Sized,
{
    let json = serde_json::to_string(value).map_err(io::Error::other)?;
    output.output_line(&json)
}
