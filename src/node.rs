//! Content repository node model

use std::fmt;

use serde_json::{Map, Value};

use crate::error::{CrError, Result};

/// Property bag of a node, in declaration order.
pub type Properties = Map<String, Value>;

pub const TITLE: &str = "title";
pub const URI_PATH_SEGMENT: &str = "uriPathSegment";

/// Store-local handle of a node. Only meaningful for the store that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

/// A node as seen through a `NodeStore`.
///
/// Traversals only ever borrow nodes; all changes go through `NodeStoreMut`.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub(crate) id: NodeId,
    pub(crate) identifier: String,
    pub(crate) name: String,
    pub(crate) path: String,
    pub(crate) node_type: String,
    pub(crate) hidden: bool,
    pub(crate) properties: Properties,
}

impl Node {
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn node_type(&self) -> &str {
        &self.node_type
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn properties(&self) -> &Properties {
        &self.properties
    }

    /// Raw property value, `None` when the property is absent.
    pub fn property(&self, name: &str) -> Option<&Value> {
        self.properties.get(name)
    }

    /// Property rendered as display text.
    ///
    /// Absent and `null` values render empty, scalars render as their JSON text.
    /// Arrays and objects have no text form and fail with `PropertyAccess`.
    pub fn text_property(&self, name: &str) -> Result<String> {
        match self.properties.get(name) {
            None | Some(Value::Null) => Ok(String::new()),
            Some(Value::String(s)) => Ok(s.clone()),
            Some(Value::Bool(b)) => Ok(b.to_string()),
            Some(Value::Number(n)) => Ok(n.to_string()),
            Some(Value::Array(_)) | Some(Value::Object(_)) => Err(CrError::property(
                name,
                &self.path,
                "is not a scalar value",
            )),
        }
    }

    pub fn title(&self) -> Result<String> {
        self.text_property(TITLE)
    }

    pub fn uri_path_segment(&self) -> Result<String> {
        self.text_property(URI_PATH_SEGMENT)
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Node {} [{}]", self.path, self.node_type)
    }
}
