//! DocumentWalker - collects documents leaves first

use tracing::debug;

use crate::error::Result;
use crate::node::Node;
use crate::node_type::DOCUMENT;
use crate::store::NodeStore;

use super::filter::NodeTypeFilter;

/// Post-order walker over the document nodes below (and including) a start node.
///
/// Every node is returned after all of its document children, which makes the
/// result safe to delete front to back.
pub struct DocumentWalker<'s, S: NodeStore + ?Sized> {
    store: &'s S,
    root: &'s Node,
    documents: NodeTypeFilter,
}

impl<'s, S: NodeStore + ?Sized> DocumentWalker<'s, S> {
    pub fn new(store: &'s S, root: &'s Node) -> Self {
        Self {
            store,
            root,
            documents: NodeTypeFilter::of_type(DOCUMENT),
        }
    }

    pub fn with_filter(mut self, documents: NodeTypeFilter) -> Self {
        self.documents = documents;
        self
    }

    /// Walk the tree and return its documents leaves first.
    ///
    /// With `limit > 0` the walk stops as soon as `limit` nodes are collected:
    /// the limit is checked before each child is entered and again before a
    /// node is appended, and nothing is backfilled afterwards. A parent whose
    /// subtree was cut short is therefore never part of the result.
    pub fn nodes(&self, limit: usize) -> Result<Vec<&'s Node>> {
        let mut nodes = Vec::new();
        self.walk(self.root, limit, &mut nodes)?;
        debug!(
            "collected {} documents below {} (limit {})",
            nodes.len(),
            self.root.path(),
            limit
        );
        Ok(nodes)
    }

    fn walk(&self, node: &'s Node, limit: usize, nodes: &mut Vec<&'s Node>) -> Result<()> {
        for child in self.store.children_of_type(node, &self.documents)? {
            if limit_reached(limit, nodes.len()) {
                return Ok(());
            }
            self.walk(child, limit, nodes)?;
        }
        if limit_reached(limit, nodes.len()) {
            return Ok(());
        }
        nodes.push(node);
        Ok(())
    }
}

fn limit_reached(limit: usize, collected: usize) -> bool {
    limit > 0 && collected >= limit
}
