//! Test utilities for building sites and temporary store files.
//!
//! This module is only compiled for tests and benchmarks.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::node_type::{CONTENT_COLLECTION, PAGE, TEXT};
use crate::store::naming::render_valid_node_name;
use crate::store::{MemoryStore, NodeRecord, Site, SiteDocument};

/// Identifier of the text element in `sample_site`'s root collection.
pub const WELCOME_TEXT_ID: &str = "7f0c2b1e-welcome";

/// A page record named after its title.
pub fn page(title: &str, uri_path_segment: &str) -> NodeRecord {
    NodeRecord::new(&render_valid_node_name(title), PAGE)
        .with_property("title", title)
        .with_property("uriPathSegment", uri_path_segment)
}

pub fn text(name: &str, text: &str) -> NodeRecord {
    NodeRecord::new(name, TEXT).with_property("text", text)
}

pub fn collection(name: &str) -> NodeRecord {
    NodeRecord::new(name, CONTENT_COLLECTION)
}

/// A "Demo Site" document (site node `demo`) around `root`.
pub fn demo_site(root: NodeRecord) -> SiteDocument {
    SiteDocument {
        site: Site {
            name: "Demo Site".to_string(),
            node_name: "demo".to_string(),
        },
        node_types: Default::default(),
        root,
    }
}

pub fn site_store(root: NodeRecord) -> MemoryStore {
    MemoryStore::from_document(demo_site(root)).expect("Failed to build site store")
}

/// Home with news (two items), about, and a root collection holding one text.
///
/// ```text
/// /sites/demo                 "Home"     home
/// ├── news                    "News"     news
/// │   ├── item-1              "Item 1"   item1
/// │   └── item-2              "Item 2"   item2
/// ├── about                   "About"    about
/// └── main (collection)
///     └── welcome (text)
/// ```
pub fn sample_site() -> SiteDocument {
    let mut welcome = text("welcome", "Welcome!");
    welcome.identifier = Some(WELCOME_TEXT_ID.to_string());
    demo_site(
        page("Home", "home")
            .with_child(
                page("News", "news")
                    .with_child(page("Item 1", "item1"))
                    .with_child(page("Item 2", "item2")),
            )
            .with_child(page("About", "about"))
            .with_child(collection("main").with_child(welcome)),
    )
}

pub fn sample_store() -> MemoryStore {
    MemoryStore::from_document(sample_site()).expect("Failed to build sample store")
}

/// A temporary directory holding a site document file.
///
/// The directory is removed when dropped.
pub struct TestSite {
    dir: TempDir,
    store_path: PathBuf,
}

impl TestSite {
    /// Write `document` to `site.json` in a new temporary directory.
    pub fn new(document: &SiteDocument) -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let store_path = dir.path().join("site.json");
        let json = serde_json::to_string_pretty(document).expect("Failed to serialize site");
        fs::write(&store_path, json).expect("Failed to write site document");
        Self { dir, store_path }
    }

    pub fn sample() -> Self {
        Self::new(&sample_site())
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn store_path(&self) -> &Path {
        &self.store_path
    }

    /// Read the site document back from disk.
    pub fn load(&self) -> MemoryStore {
        MemoryStore::open(&self.store_path).expect("Failed to load site document")
    }

    /// Write a file relative to the temporary directory.
    pub fn add_file(&self, path: &str, content: &str) -> PathBuf {
        let full_path = self.dir.path().join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        fs::write(&full_path, content).expect("Failed to write file");
        full_path
    }
}

impl Default for TestSite {
    fn default() -> Self {
        Self::sample()
    }
}
