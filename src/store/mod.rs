//! Node store capability traits and the JSON-backed in-memory implementation
//!
//! Everything above this module talks to the content repository through
//! `NodeStore` (reads) and `NodeStoreMut` (writes). `MemoryStore` implements
//! both on top of a single site document file.

mod lookup;
mod memory;
pub mod naming;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;
use crate::node::{Node, NodeId};
use crate::node_type::NodeTypeRegistry;
use crate::tree::NodeTypeFilter;

pub use lookup::{node_for_path, node_for_url, node_path_for_url, set_node_properties};
pub use memory::{MemoryStore, NodeRecord, SiteDocument};

/// The site a store serves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Site {
    pub name: String,
    pub node_name: String,
}

impl Site {
    /// Absolute path of the site's root node.
    pub fn path(&self) -> String {
        format!("/sites/{}", self.node_name)
    }
}

/// Read access to a content repository.
pub trait NodeStore {
    fn site(&self) -> &Site;

    fn node_types(&self) -> &NodeTypeRegistry;

    /// The site root node.
    fn root(&self) -> &Node;

    fn node(&self, id: NodeId) -> Option<&Node>;

    fn node_at_path(&self, path: &str) -> Option<&Node>;

    fn node_by_identifier(&self, identifier: &str) -> Option<&Node>;

    fn parent(&self, node: &Node) -> Option<&Node>;

    /// All children of `node` in order, regardless of type.
    fn children(&self, node: &Node) -> Result<Vec<&Node>>;

    /// Children of `node` whose type passes `filter`, in order.
    fn children_of_type(&self, node: &Node, filter: &NodeTypeFilter) -> Result<Vec<&Node>> {
        let registry = self.node_types();
        Ok(self
            .children(node)?
            .into_iter()
            .filter(|child| filter.matches(registry, child.node_type()))
            .collect())
    }

    fn named_child(&self, node: &Node, name: &str) -> Result<Option<&Node>> {
        Ok(self.children(node)?.into_iter().find(|child| child.name() == name))
    }

    fn is_of_type(&self, node: &Node, type_name: &str) -> bool {
        self.node_types().is_of_type(node.node_type(), type_name)
    }

    fn has_node_type(&self, type_name: &str) -> bool {
        self.node_types().has_node_type(type_name)
    }

    /// A child name for `parent` that no existing child uses.
    fn generate_unique_name(&self, parent: &Node, desired: Option<&str>) -> Result<String> {
        let taken: Vec<String> = self
            .children(parent)?
            .into_iter()
            .map(|child| child.name().to_string())
            .collect();
        Ok(naming::generate_unique_name(desired, |candidate| {
            taken.iter().any(|name| name == candidate)
        }))
    }
}

/// Write access to a content repository.
pub trait NodeStoreMut: NodeStore {
    fn create_node(&mut self, parent: NodeId, name: &str, node_type: &str) -> Result<NodeId>;

    /// Remove a node together with everything below it.
    fn remove_node(&mut self, id: NodeId) -> Result<()>;

    fn set_property(&mut self, id: NodeId, name: &str, value: Value) -> Result<()>;

    fn remove_property(&mut self, id: NodeId, name: &str) -> Result<()>;

    fn set_name(&mut self, id: NodeId, name: &str) -> Result<()>;

    fn set_hidden(&mut self, id: NodeId, hidden: bool) -> Result<()>;
}
