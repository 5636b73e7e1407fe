//! DocumentTreePrinter - depth bounded pre-order listing of documents
//!
//! Two output modes share one traversal:
//!
//! - table mode buffers every row and writes a single table at the end, so a
//!   failing traversal writes nothing
//! - line mode writes each row as soon as its node is visited, so rows
//!   written before a failure stay written

use tracing::debug;

use crate::error::Result;
use crate::node::Node;
use crate::output::ConsoleOutput;
use crate::store::NodeStore;

use super::config::PrinterConfig;
use super::row::{DocumentRow, TABLE_HEADERS};

/// Substring erased from every joined URL.
const HOME_SEGMENT: &str = "home";

pub struct DocumentTreePrinter<'s, S: NodeStore + ?Sized> {
    store: &'s S,
    root: &'s Node,
    config: PrinterConfig,
}

impl<'s, S: NodeStore + ?Sized> DocumentTreePrinter<'s, S> {
    pub fn new(store: &'s S, root: &'s Node, max_depth: usize) -> Self {
        Self::with_config(store, root, PrinterConfig::with_depth(max_depth))
    }

    pub fn with_config(store: &'s S, root: &'s Node, config: PrinterConfig) -> Self {
        Self {
            store,
            root,
            config,
        }
    }

    pub fn print_tree<O: ConsoleOutput + ?Sized>(
        &self,
        output: &mut O,
        as_table: bool,
    ) -> Result<()> {
        debug!(
            "printing documents below {} to depth {}",
            self.root.path(),
            self.config.max_depth
        );
        if as_table {
            let rows: Vec<Vec<String>> = self
                .rows()?
                .into_iter()
                .map(DocumentRow::into_cells)
                .collect();
            output.output_table(&TABLE_HEADERS, &rows)?;
        } else {
            let mut segments = Vec::new();
            self.visit(self.root, 0, &mut segments, &mut |row| {
                output.output_line(&row.to_line())?;
                Ok(())
            })?;
        }
        Ok(())
    }

    /// All rows in visiting order.
    pub fn rows(&self) -> Result<Vec<DocumentRow>> {
        let mut rows = Vec::new();
        let mut segments = Vec::new();
        self.visit(self.root, 0, &mut segments, &mut |row| {
            rows.push(row);
            Ok(())
        })?;
        Ok(rows)
    }

    fn visit<F>(
        &self,
        node: &Node,
        depth: usize,
        segments: &mut Vec<String>,
        emit: &mut F,
    ) -> Result<()>
    where
        F: FnMut(DocumentRow) -> Result<()>,
    {
        segments.push(node.uri_path_segment()?);
        emit(DocumentRow {
            url: segments.join("/").replace(HOME_SEGMENT, ""),
            title: node.title()?,
            node_type: node.node_type().to_string(),
            path: self.trim_path(node.path()),
        })?;

        if depth < self.config.max_depth {
            for child in self.store.children_of_type(node, &self.config.documents)? {
                self.visit(child, depth + 1, segments, emit)?;
            }
        }
        segments.pop();
        Ok(())
    }

    /// Strip the start node's path from the front of `path`.
    fn trim_path(&self, path: &str) -> String {
        path.strip_prefix(self.root.path())
            .unwrap_or(path)
            .to_string()
    }
}
