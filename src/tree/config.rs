//! Configuration types for tree traversals

use crate::node_type::DOCUMENT;

use super::filter::NodeTypeFilter;

/// Default number of levels shown below the start node when listing.
pub const DEFAULT_LIST_DEPTH: usize = 1;

/// Configuration for the document tree printer.
#[derive(Debug, Clone)]
pub struct PrinterConfig {
    /// Deepest level that is still printed; 0 prints only the start node.
    pub max_depth: usize,
    /// Children passing this filter are treated as documents and descended into.
    pub documents: NodeTypeFilter,
}

impl PrinterConfig {
    pub fn with_depth(max_depth: usize) -> Self {
        Self {
            max_depth,
            ..Default::default()
        }
    }
}

impl Default for PrinterConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_LIST_DEPTH,
            documents: NodeTypeFilter::of_type(DOCUMENT),
        }
    }
}
