//! Plain text table layout
//!
//! Tables are drawn with ASCII borders:
//!
//! ```text
//! +----------+------------+
//! | URL path | Page Title |
//! +----------+------------+
//! | /news    | News       |
//! +----------+------------+
//! ```

/// Column widths computed from headers and every row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableLayout {
    widths: Vec<usize>,
}

impl TableLayout {
    pub fn new(headers: &[&str], rows: &[Vec<String>]) -> Self {
        let columns = rows
            .iter()
            .map(Vec::len)
            .chain(std::iter::once(headers.len()))
            .max()
            .unwrap_or(0);
        let mut widths = vec![0; columns];
        for (i, header) in headers.iter().enumerate() {
            widths[i] = widths[i].max(header.chars().count());
        }
        for row in rows {
            for (i, cell) in row.iter().enumerate() {
                widths[i] = widths[i].max(cell.chars().count());
            }
        }
        Self { widths }
    }

    pub fn border(&self) -> String {
        let mut line = String::from("+");
        for width in &self.widths {
            line.push_str(&"-".repeat(width + 2));
            line.push('+');
        }
        line
    }

    /// One table line; missing cells render empty.
    pub fn format_row<S: AsRef<str>>(&self, cells: &[S]) -> String {
        let mut line = String::from("|");
        for (i, width) in self.widths.iter().enumerate() {
            let cell = cells.get(i).map(AsRef::as_ref).unwrap_or("");
            let padding = width - cell.chars().count();
            line.push(' ');
            line.push_str(cell);
            line.push_str(&" ".repeat(padding + 1));
            line.push('|');
        }
        line
    }
}

/// Render a whole table as lines, header first.
pub fn render_table(headers: &[&str], rows: &[Vec<String>]) -> Vec<String> {
    let layout = TableLayout::new(headers, rows);
    let mut lines = vec![layout.border(), layout.format_row(headers), layout.border()];
    lines.extend(rows.iter().map(|row| layout.format_row(row)));
    lines.push(layout.border());
    lines
}
