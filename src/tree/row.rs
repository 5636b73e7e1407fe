//! Rows produced by the document tree printer

use serde::Serialize;

/// Column headers of the document table, in row order.
pub const TABLE_HEADERS: [&str; 4] = ["URL path", "Page Title", "Node Type", "Neos Node Path"];

/// One visited document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentRow {
    /// Joined `uriPathSegment` chain with every `home` substring removed.
    pub url: String,
    pub title: String,
    pub node_type: String,
    /// Node path relative to the printer's start node.
    pub path: String,
}

impl DocumentRow {
    /// Line format used by the plain (non-table) listing.
    pub fn to_line(&self) -> String {
        format!(
            "{} \"{}\" {{{}}} [{}]",
            self.url, self.title, self.node_type, self.path
        )
    }

    pub fn into_cells(self) -> Vec<String> {
        vec![self.url, self.title, self.node_type, self.path]
    }
}
