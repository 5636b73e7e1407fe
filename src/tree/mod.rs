//! Document tree traversal
//!
//! This module provides the two read-only views over a node store:
//!
//! - `DocumentWalker`: post-order (leaves first) collection, optionally capped
//! - `DocumentTreePrinter`: depth-bounded pre-order listing as a table or as lines

mod config;
mod filter;
mod printer;
mod row;
mod walker;

// Re-export public types
pub use config::{DEFAULT_LIST_DEPTH, PrinterConfig};
pub use filter::NodeTypeFilter;
pub use printer::DocumentTreePrinter;
pub use row::{DocumentRow, TABLE_HEADERS};
pub use walker::DocumentWalker;
