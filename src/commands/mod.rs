//! Command handlers
//!
//! Each handler works against any `NodeStoreMut` and writes through a
//! `ConsoleOutput`, so the CLI and the tests drive the same code.

pub mod content;
pub mod node;
pub mod page;

use crate::config::ToolConfig;
use crate::error::{CrError, Result};
use crate::node::{Node, NodeId};
use crate::output::ConsoleOutput;
use crate::store::NodeStore;

/// Everything a command needs for one invocation.
pub struct CommandContext<'a, S: ?Sized, O: ?Sized> {
    pub store: &'a mut S,
    pub config: &'a ToolConfig,
    pub output: &'a mut O,
}

impl<'a, S: ?Sized, O: ConsoleOutput + ?Sized> CommandContext<'a, S, O> {
    pub fn new(store: &'a mut S, config: &'a ToolConfig, output: &'a mut O) -> Self {
        Self {
            store,
            config,
            output,
        }
    }

    pub(crate) fn line(&mut self, line: impl AsRef<str>) -> Result<()> {
        self.output.output_line(line.as_ref())?;
        Ok(())
    }
}

/// How a command ended when it did not fail outright.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    /// The store was changed and should be saved.
    pub modified: bool,
    /// Exit status 0 when true, 1 otherwise.
    pub success: bool,
}

impl Outcome {
    pub fn unchanged() -> Self {
        Self {
            modified: false,
            success: true,
        }
    }

    pub fn modified() -> Self {
        Self {
            modified: true,
            success: true,
        }
    }

    pub fn failed() -> Self {
        Self {
            modified: false,
            success: false,
        }
    }
}

/// Validate a count-like argument that must not be negative.
pub fn non_negative(flag: &str, value: i64) -> Result<usize> {
    usize::try_from(value).map_err(|_| {
        CrError::MalformedInput(format!("{} must not be negative, got {}", flag, value))
    })
}

pub(crate) fn node_of<S: NodeStore + ?Sized>(store: &S, id: NodeId) -> Result<&Node> {
    store
        .node(id)
        .ok_or_else(|| CrError::not_found("node no longer exists in the store"))
}

pub(crate) fn require_node_type<S: NodeStore + ?Sized>(store: &S, node_type: &str) -> Result<()> {
    if store.has_node_type(node_type) {
        Ok(())
    } else {
        Err(CrError::UnknownNodeType(node_type.to_string()))
    }
}
