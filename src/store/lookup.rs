//! Path and URL based node resolution on top of `NodeStore`

use serde_json::Value;

use crate::error::{CrError, Result};
use crate::node::{Node, NodeId, URI_PATH_SEGMENT};
use crate::tree::NodeTypeFilter;

use super::{NodeStore, NodeStoreMut};

/// The node at `relative` below the site root; `""` is the root itself.
pub fn node_for_path<'s, S: NodeStore + ?Sized>(store: &'s S, relative: &str) -> Option<&'s Node> {
    let absolute = format!("{}{}", store.site().path(), relative);
    store.node_at_path(&absolute)
}

/// Follow `url` from `start` one `uriPathSegment` at a time and return the
/// node it ends at. Empty segments are skipped, so `"/"` resolves to `start`.
///
/// Sibling segments are assumed to be unique; if several documents match,
/// the last one in child order wins.
pub fn node_path_for_url<'s, S: NodeStore + ?Sized>(
    store: &'s S,
    start: &'s Node,
    url: &str,
    documents: &NodeTypeFilter,
) -> Result<&'s Node> {
    let mut current = start;
    for segment in url.split('/').filter(|s| !s.is_empty()) {
        let mut found = None;
        for child in store.children_of_type(current, documents)? {
            if child.property(URI_PATH_SEGMENT) == Some(&Value::String(segment.to_string())) {
                found = Some(child);
            }
        }
        current = found.ok_or_else(|| {
            CrError::not_found(format!(
                "Could not find any child document for URL path segment: \"{}\" on \"{}\"",
                segment,
                current.path()
            ))
        })?;
    }
    Ok(current)
}

/// Resolve a site-relative URL such as `/news/my-news`.
pub fn node_for_url<'s, S: NodeStore + ?Sized>(
    store: &'s S,
    url: &str,
    documents: &NodeTypeFilter,
) -> Result<&'s Node> {
    node_path_for_url(store, store.root(), url, documents)
}

/// Apply a JSON object of properties to a node. `null` values remove the property.
pub fn set_node_properties<S: NodeStoreMut + ?Sized>(
    store: &mut S,
    id: NodeId,
    properties_json: &str,
) -> Result<()> {
    let value: Value = serde_json::from_str(properties_json)?;
    let Value::Object(properties) = value else {
        return Err(CrError::MalformedInput(
            "node properties must be a JSON object".to_string(),
        ));
    };
    for (name, value) in properties {
        if value.is_null() {
            store.remove_property(id, &name)?;
        } else {
            store.set_property(id, &name, value)?;
        }
    }
    Ok(())
}
