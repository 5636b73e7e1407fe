//! crtools - list, create, update and remove content repository nodes

pub mod commands;
pub mod config;
pub mod error;
pub mod node;
pub mod node_type;
pub mod output;
pub mod store;
pub mod tree;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use config::ToolConfig;
pub use error::{CrError, Result};
pub use node::{Node, NodeId};
pub use node_type::NodeTypeRegistry;
pub use output::{BufferedOutput, ConsoleOutput, OutputConfig, StreamingFormatter};
pub use store::{MemoryStore, NodeStore, NodeStoreMut};
pub use tree::{DocumentTreePrinter, DocumentWalker, NodeTypeFilter};
