//! Node type registry with super type inheritance

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

pub const NODE: &str = "Neos.Neos:Node";
pub const UNSTRUCTURED: &str = "unstructured";
pub const DOCUMENT: &str = "Neos.Neos:Document";
pub const CONTENT: &str = "Neos.Neos:Content";
pub const CONTENT_COLLECTION: &str = "Neos.Neos:ContentCollection";
pub const SHORTCUT: &str = "Neos.Neos:Shortcut";
pub const PAGE: &str = "Neos.NodeTypes:Page";
pub const TEXT: &str = "Neos.NodeTypes:Text";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeTypeDefinition {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub super_types: Vec<String>,
    #[serde(default, rename = "abstract", skip_serializing_if = "std::ops::Not::not")]
    pub is_abstract: bool,
}

impl NodeTypeDefinition {
    pub fn with_super_types(super_types: &[&str]) -> Self {
        Self {
            super_types: super_types.iter().map(|s| s.to_string()).collect(),
            is_abstract: false,
        }
    }

    fn abstract_type(super_types: &[&str]) -> Self {
        Self {
            is_abstract: true,
            ..Self::with_super_types(super_types)
        }
    }
}

/// Known node types. Built-in types are always present; site documents may add more.
#[derive(Debug, Clone)]
pub struct NodeTypeRegistry {
    types: BTreeMap<String, NodeTypeDefinition>,
}

impl NodeTypeRegistry {
    pub fn new() -> Self {
        let mut types = BTreeMap::new();
        types.insert(NODE.to_string(), NodeTypeDefinition::abstract_type(&[]));
        types.insert(UNSTRUCTURED.to_string(), NodeTypeDefinition::default());
        types.insert(DOCUMENT.to_string(), NodeTypeDefinition::abstract_type(&[NODE]));
        types.insert(CONTENT.to_string(), NodeTypeDefinition::abstract_type(&[NODE]));
        types.insert(
            CONTENT_COLLECTION.to_string(),
            NodeTypeDefinition::with_super_types(&[NODE]),
        );
        types.insert(SHORTCUT.to_string(), NodeTypeDefinition::with_super_types(&[DOCUMENT]));
        types.insert(PAGE.to_string(), NodeTypeDefinition::with_super_types(&[DOCUMENT]));
        types.insert(TEXT.to_string(), NodeTypeDefinition::with_super_types(&[CONTENT]));
        Self { types }
    }

    /// Register additional types; later definitions replace earlier ones.
    pub fn extend<I>(&mut self, definitions: I)
    where
        I: IntoIterator<Item = (String, NodeTypeDefinition)>,
    {
        self.types.extend(definitions);
    }

    pub fn has_node_type(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&NodeTypeDefinition> {
        self.types.get(name)
    }

    /// True if `name` is `ancestor` or inherits from it through super types.
    /// Unknown type names only match themselves.
    pub fn is_of_type(&self, name: &str, ancestor: &str) -> bool {
        let mut seen = HashSet::new();
        let mut pending = vec![name];
        while let Some(current) = pending.pop() {
            if current == ancestor {
                return true;
            }
            if !seen.insert(current) {
                continue;
            }
            if let Some(definition) = self.types.get(current) {
                pending.extend(definition.super_types.iter().map(String::as_str));
            }
        }
        false
    }
}

impl Default for NodeTypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}
