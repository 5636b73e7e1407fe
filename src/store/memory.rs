//! MemoryStore - a whole site document held in memory
//!
//! The document is read once, mutated in place and written back on `save`.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

use crate::error::{CrError, Result};
use crate::node::{Node, NodeId, Properties};
use crate::node_type::{NodeTypeDefinition, NodeTypeRegistry};

use super::{NodeStore, NodeStoreMut, Site};

/// On-disk shape of a site.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteDocument {
    pub site: Site,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub node_types: BTreeMap<String, NodeTypeDefinition>,
    pub root: NodeRecord,
}

/// On-disk shape of one node and its subtree.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeRecord {
    /// Ignored for the root, which is always named after the site node.
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    pub node_type: String,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub hidden: bool,
    #[serde(default, skip_serializing_if = "Properties::is_empty")]
    pub properties: Properties,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NodeRecord>,
}

impl NodeRecord {
    pub fn new(name: &str, node_type: &str) -> Self {
        Self {
            name: name.to_string(),
            identifier: None,
            node_type: node_type.to_string(),
            hidden: false,
            properties: Properties::new(),
            children: Vec::new(),
        }
    }

    pub fn with_property(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.properties.insert(name.to_string(), value.into());
        self
    }

    pub fn with_child(mut self, child: NodeRecord) -> Self {
        self.children.push(child);
        self
    }
}

#[derive(Debug, Clone)]
struct Entry {
    node: Node,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// JSON-file backed node store.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    site: Site,
    custom_types: BTreeMap<String, NodeTypeDefinition>,
    node_types: NodeTypeRegistry,
    entries: HashMap<NodeId, Entry>,
    by_path: HashMap<String, NodeId>,
    by_identifier: HashMap<String, NodeId>,
    root: NodeId,
    next_id: usize,
}

impl MemoryStore {
    pub fn open(path: &Path) -> Result<Self> {
        debug!("loading site document from {}", path.display());
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                CrError::not_found(format!("store file \"{}\" does not exist", path.display()))
            } else {
                CrError::Io(e)
            }
        })?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let document: SiteDocument = serde_json::from_str(content)?;
        Self::from_document(document)
    }

    pub fn from_document(document: SiteDocument) -> Result<Self> {
        if !is_valid_name(&document.site.node_name) {
            return Err(CrError::MalformedInput(format!(
                "invalid site node name \"{}\"",
                document.site.node_name
            )));
        }

        let mut node_types = NodeTypeRegistry::new();
        node_types.extend(document.node_types.clone());

        let mut store = Self {
            site: document.site,
            custom_types: document.node_types,
            node_types,
            entries: HashMap::new(),
            by_path: HashMap::new(),
            by_identifier: HashMap::new(),
            root: NodeId(0),
            next_id: 0,
        };

        let root_name = store.site.node_name.clone();
        let root_path = store.site.path();
        store.root = store.insert_record(None, &root_name, root_path, document.root)?;
        info!(
            "loaded site \"{}\" with {} nodes",
            store.site.name,
            store.entries.len()
        );
        Ok(store)
    }

    /// Snapshot of the current state in its on-disk shape.
    pub fn to_document(&self) -> Result<SiteDocument> {
        Ok(SiteDocument {
            site: self.site.clone(),
            node_types: self.custom_types.clone(),
            root: self.record_for(self.root)?,
        })
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.to_document()?)?)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let json = self.to_json()?;
        fs::write(path, json + "\n")?;
        info!("saved site document to {}", path.display());
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn allocate_id(&mut self) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Insert a record and its subtree below `parent`, iteratively.
    fn insert_record(
        &mut self,
        parent: Option<NodeId>,
        name: &str,
        path: String,
        record: NodeRecord,
    ) -> Result<NodeId> {
        let top = self.insert_single(parent, name, path, &record)?;
        let mut pending: Vec<(NodeId, Vec<NodeRecord>)> = vec![(top, record.children)];

        while let Some((parent_id, children)) = pending.pop() {
            let parent_path = self.entry(parent_id)?.node.path.clone();
            for mut child in children {
                if !is_valid_name(&child.name) {
                    return Err(CrError::MalformedInput(format!(
                        "invalid node name \"{}\" below {}",
                        child.name, parent_path
                    )));
                }
                let child_path = format!("{}/{}", parent_path, child.name);
                let grandchildren = std::mem::take(&mut child.children);
                let child_name = child.name.clone();
                let child_id =
                    self.insert_single(Some(parent_id), &child_name, child_path, &child)?;
                pending.push((child_id, grandchildren));
            }
        }
        Ok(top)
    }

    fn insert_single(
        &mut self,
        parent: Option<NodeId>,
        name: &str,
        path: String,
        record: &NodeRecord,
    ) -> Result<NodeId> {
        if self.by_path.contains_key(&path) {
            return Err(CrError::MalformedInput(format!(
                "node \"{}\" already exists",
                path
            )));
        }
        let identifier = record
            .identifier
            .clone()
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
        if self.by_identifier.contains_key(&identifier) {
            return Err(CrError::MalformedInput(format!(
                "duplicate node identifier \"{}\"",
                identifier
            )));
        }

        let id = self.allocate_id();
        let node = Node {
            id,
            identifier: identifier.clone(),
            name: name.to_string(),
            path: path.clone(),
            node_type: record.node_type.clone(),
            hidden: record.hidden,
            properties: record.properties.clone(),
        };
        self.entries.insert(
            id,
            Entry {
                node,
                parent,
                children: Vec::new(),
            },
        );
        self.by_path.insert(path, id);
        self.by_identifier.insert(identifier, id);
        if let Some(parent_id) = parent {
            self.entry_mut(parent_id)?.children.push(id);
        }
        Ok(id)
    }

    /// Rebuild the record tree below `id`, children before parents.
    fn record_for(&self, id: NodeId) -> Result<NodeRecord> {
        let mut built: HashMap<NodeId, NodeRecord> = HashMap::new();
        let mut pending = vec![(id, false)];
        while let Some((current, expanded)) = pending.pop() {
            let entry = self.entry(current)?;
            if !expanded {
                pending.push((current, true));
                pending.extend(entry.children.iter().rev().map(|c| (*c, false)));
                continue;
            }
            let children = entry
                .children
                .iter()
                .map(|c| {
                    built
                        .remove(c)
                        .ok_or_else(|| CrError::not_found("node no longer exists in the store"))
                })
                .collect::<Result<Vec<_>>>()?;
            built.insert(
                current,
                NodeRecord {
                    name: entry.node.name.clone(),
                    identifier: Some(entry.node.identifier.clone()),
                    node_type: entry.node.node_type.clone(),
                    hidden: entry.node.hidden,
                    properties: entry.node.properties.clone(),
                    children,
                },
            );
        }
        built
            .remove(&id)
            .ok_or_else(|| CrError::not_found("node no longer exists in the store"))
    }

    fn entry(&self, id: NodeId) -> Result<&Entry> {
        self.entries
            .get(&id)
            .ok_or_else(|| CrError::not_found("node no longer exists in the store"))
    }

    fn entry_mut(&mut self, id: NodeId) -> Result<&mut Entry> {
        self.entries
            .get_mut(&id)
            .ok_or_else(|| CrError::not_found("node no longer exists in the store"))
    }

    fn sibling_has_name(&self, parent: NodeId, name: &str, except: Option<NodeId>) -> Result<bool> {
        let entry = self.entry(parent)?;
        Ok(entry
            .children
            .iter()
            .filter(|c| Some(**c) != except)
            .filter_map(|c| self.entries.get(c))
            .any(|c| c.node.name == name))
    }

    /// Rewrite the paths of `id` and its subtree after a rename.
    fn repath(&mut self, id: NodeId, new_path: String) -> Result<()> {
        let mut pending = vec![(id, new_path)];
        while let Some((current, path)) = pending.pop() {
            let entry = self.entry_mut(current)?;
            let old_path = std::mem::replace(&mut entry.node.path, path.clone());
            let children = entry.children.clone();
            self.by_path.remove(&old_path);
            self.by_path.insert(path.clone(), current);
            for child in children {
                let child_name = self.entry(child)?.node.name.clone();
                pending.push((child, format!("{}/{}", path, child_name)));
            }
        }
        Ok(())
    }
}

fn is_valid_name(name: &str) -> bool {
    !name.is_empty() && !name.contains('/')
}

impl NodeStore for MemoryStore {
    fn site(&self) -> &Site {
        &self.site
    }

    fn node_types(&self) -> &NodeTypeRegistry {
        &self.node_types
    }

    fn root(&self) -> &Node {
        &self.entries[&self.root].node
    }

    fn node(&self, id: NodeId) -> Option<&Node> {
        self.entries.get(&id).map(|e| &e.node)
    }

    fn node_at_path(&self, path: &str) -> Option<&Node> {
        let normalized = path.trim_end_matches('/');
        self.by_path.get(normalized).and_then(|id| self.node(*id))
    }

    fn node_by_identifier(&self, identifier: &str) -> Option<&Node> {
        self.by_identifier.get(identifier).and_then(|id| self.node(*id))
    }

    fn parent(&self, node: &Node) -> Option<&Node> {
        self.entries
            .get(&node.id)
            .and_then(|e| e.parent)
            .and_then(|p| self.node(p))
    }

    fn children(&self, node: &Node) -> Result<Vec<&Node>> {
        let entry = self.entry(node.id)?;
        entry
            .children
            .iter()
            .map(|c| self.entry(*c).map(|e| &e.node))
            .collect()
    }
}

impl NodeStoreMut for MemoryStore {
    fn create_node(&mut self, parent: NodeId, name: &str, node_type: &str) -> Result<NodeId> {
        if !self.node_types.has_node_type(node_type) {
            return Err(CrError::UnknownNodeType(node_type.to_string()));
        }
        let parent_path = self.entry(parent)?.node.path.clone();
        if !is_valid_name(name) {
            return Err(CrError::MalformedInput(format!(
                "invalid node name \"{}\" below {}",
                name, parent_path
            )));
        }
        let path = format!("{}/{}", parent_path, name);
        let record = NodeRecord::new(name, node_type);
        let id = self.insert_single(Some(parent), name, path.clone(), &record)?;
        debug!("created {} [{}]", path, node_type);
        Ok(id)
    }

    fn remove_node(&mut self, id: NodeId) -> Result<()> {
        if id == self.root {
            return Err(CrError::MalformedInput(
                "the site root node cannot be removed".to_string(),
            ));
        }
        let parent = self.entry(id)?.parent;
        if let Some(parent_id) = parent {
            self.entry_mut(parent_id)?.children.retain(|c| *c != id);
        }

        let mut pending = vec![id];
        while let Some(current) = pending.pop() {
            if let Some(entry) = self.entries.remove(&current) {
                debug!("removed {}", entry.node.path);
                self.by_path.remove(&entry.node.path);
                self.by_identifier.remove(&entry.node.identifier);
                pending.extend(entry.children);
            }
        }
        Ok(())
    }

    fn set_property(&mut self, id: NodeId, name: &str, value: Value) -> Result<()> {
        self.entry_mut(id)?
            .node
            .properties
            .insert(name.to_string(), value);
        Ok(())
    }

    fn remove_property(&mut self, id: NodeId, name: &str) -> Result<()> {
        self.entry_mut(id)?.node.properties.shift_remove(name);
        Ok(())
    }

    fn set_name(&mut self, id: NodeId, name: &str) -> Result<()> {
        let entry = self.entry(id)?;
        let Some(parent) = entry.parent else {
            return Err(CrError::MalformedInput(
                "the site root node cannot be renamed".to_string(),
            ));
        };
        if !is_valid_name(name) {
            return Err(CrError::MalformedInput(format!("invalid node name \"{}\"", name)));
        }
        if self.sibling_has_name(parent, name, Some(id))? {
            return Err(CrError::MalformedInput(format!(
                "a sibling named \"{}\" already exists",
                name
            )));
        }
        let parent_path = self.entry(parent)?.node.path.clone();
        self.entry_mut(id)?.node.name = name.to_string();
        self.repath(id, format!("{}/{}", parent_path, name))
    }

    fn set_hidden(&mut self, id: NodeId, hidden: bool) -> Result<()> {
        self.entry_mut(id)?.node.hidden = hidden;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::node_type::{CONTENT_COLLECTION, PAGE, TEXT};

    fn sample_json() -> &'static str {
        r#"{
            "site": { "name": "Demo Site", "nodeName": "demo" },
            "nodeTypes": { "Demo:Blog": { "superTypes": ["Neos.Neos:Document"] } },
            "root": {
                "nodeType": "Neos.NodeTypes:Page",
                "identifier": "root-id",
                "properties": { "title": "Home", "uriPathSegment": "home" },
                "children": [
                    { "name": "news", "nodeType": "Demo:Blog", "identifier": "news-id",
                      "properties": { "title": "News", "uriPathSegment": "news" },
                      "children": [
                        { "name": "item1", "nodeType": "Neos.NodeTypes:Page",
                          "properties": { "title": "Item 1", "uriPathSegment": "item1" } }
                      ] },
                    { "name": "main", "nodeType": "Neos.Neos:ContentCollection" }
                ]
            }
        }"#
    }

    #[test]
    fn test_load_builds_paths_and_indexes() {
        let store = MemoryStore::from_json(sample_json()).unwrap();
        assert_eq!(store.len(), 4);
        assert_eq!(store.root().path(), "/sites/demo");
        let item = store.node_at_path("/sites/demo/news/item1").unwrap();
        assert_eq!(item.name(), "item1");
        assert!(!item.identifier().is_empty());
        let news = store.node_by_identifier("news-id").unwrap();
        assert_eq!(store.parent(item).unwrap().path(), news.path());
        assert!(store.is_of_type(news, crate::node_type::DOCUMENT));
    }

    #[test]
    fn test_children_keep_document_order() {
        let store = MemoryStore::from_json(sample_json()).unwrap();
        let names: Vec<&str> = store
            .children(store.root())
            .unwrap()
            .iter()
            .map(|n| n.name())
            .collect();
        assert_eq!(names, vec!["news", "main"]);
    }

    #[test]
    fn test_duplicate_sibling_names_are_rejected() {
        let doc = SiteDocument {
            site: Site {
                name: "Demo".to_string(),
                node_name: "demo".to_string(),
            },
            node_types: BTreeMap::new(),
            root: NodeRecord::new("", PAGE)
                .with_child(NodeRecord::new("a", PAGE))
                .with_child(NodeRecord::new("a", PAGE)),
        };
        let err = MemoryStore::from_document(doc).unwrap_err();
        assert!(matches!(err, CrError::MalformedInput(_)));
    }

    #[test]
    fn test_create_rename_and_remove() {
        let mut store = MemoryStore::from_json(sample_json()).unwrap();
        let root = store.root().id();
        let collection = store.node_at_path("/sites/demo/main").unwrap().id();
        let text = store.create_node(collection, "text-1", TEXT).unwrap();
        store.set_property(text, "text", json!("Hello")).unwrap();
        assert_eq!(store.node(text).unwrap().path(), "/sites/demo/main/text-1");

        let news = store.node_by_identifier("news-id").unwrap().id();
        store.set_name(news, "blog").unwrap();
        assert!(store.node_at_path("/sites/demo/news/item1").is_none());
        assert!(store.node_at_path("/sites/demo/blog/item1").is_some());

        store.remove_node(news).unwrap();
        assert!(store.node_at_path("/sites/demo/blog/item1").is_none());
        assert!(store.node_by_identifier("news-id").is_none());
        assert_eq!(store.children(store.root()).unwrap().len(), 1);

        let err = store.remove_node(root).unwrap_err();
        assert!(matches!(err, CrError::MalformedInput(_)));
    }

    #[test]
    fn test_create_rejects_unknown_type_and_taken_name() {
        let mut store = MemoryStore::from_json(sample_json()).unwrap();
        let root = store.root().id();
        assert!(matches!(
            store.create_node(root, "x", "Vendor:Nope").unwrap_err(),
            CrError::UnknownNodeType(_)
        ));
        assert!(matches!(
            store.create_node(root, "main", CONTENT_COLLECTION).unwrap_err(),
            CrError::MalformedInput(_)
        ));
    }

    #[test]
    fn test_generate_unique_name_avoids_existing_children() {
        let store = MemoryStore::from_json(sample_json()).unwrap();
        let root = store.root();
        assert_eq!(store.generate_unique_name(root, Some("About Us")).unwrap(), "about-us");
        let generated = store.generate_unique_name(root, Some("News")).unwrap();
        assert!(generated.starts_with("node-"));
    }

    #[test]
    fn test_document_round_trip_keeps_identifiers_and_types() {
        let store = MemoryStore::from_json(sample_json()).unwrap();
        let reloaded = MemoryStore::from_json(&store.to_json().unwrap()).unwrap();
        assert_eq!(reloaded.len(), store.len());
        assert!(reloaded.node_by_identifier("news-id").is_some());
        assert!(reloaded.has_node_type("Demo:Blog"));
    }

    #[test]
    fn test_save_fails_on_dangling_child() {
        let mut store = MemoryStore::from_json(sample_json()).unwrap();
        let root = store.root;
        store.entries.get_mut(&root).unwrap().children.push(NodeId(999));
        let err = store.to_json().unwrap_err();
        assert!(matches!(err, CrError::NotFound(_)));
    }

    #[test]
    fn test_document_keeps_child_order() {
        let store = MemoryStore::from_json(sample_json()).unwrap();
        let document = store.to_document().unwrap();
        let names: Vec<&str> = document.root.children.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["news", "main"]);
        assert_eq!(document.root.children[0].children[0].name, "item1");
    }

    #[test]
    fn test_remove_property() {
        let mut store = MemoryStore::from_json(sample_json()).unwrap();
        let news = store.node_by_identifier("news-id").unwrap().id();
        store.remove_property(news, "title").unwrap();
        assert!(store.node(news).unwrap().property("title").is_none());
    }
}
