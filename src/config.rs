//! Tool configuration: defaults, optional TOML file, environment override

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::error::Result;
use crate::node_type::{CONTENT, CONTENT_COLLECTION, DOCUMENT, PAGE, TEXT};
use crate::tree::NodeTypeFilter;

/// File looked up in the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "crtools.toml";
/// Site document used when neither config nor environment name one.
pub const DEFAULT_STORE_FILE: &str = "site.json";
/// Environment variable overriding the configured store file.
pub const STORE_ENV: &str = "CRTOOLS_STORE";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ToolConfig {
    /// Site document file.
    pub store: PathBuf,
    /// Filter string selecting document (page) nodes.
    pub document_type: String,
    /// Type a node must inherit from to be updated by `content update`.
    pub content_type: String,
    /// Type of collection nodes created on demand by `content create`.
    pub collection_type: String,
    pub default_page_type: String,
    pub default_content_type: String,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            store: PathBuf::from(DEFAULT_STORE_FILE),
            document_type: DOCUMENT.to_string(),
            content_type: CONTENT.to_string(),
            collection_type: CONTENT_COLLECTION.to_string(),
            default_page_type: PAGE.to_string(),
            default_content_type: TEXT.to_string(),
        }
    }
}

impl ToolConfig {
    /// Load the configuration.
    ///
    /// An explicitly named file must exist; the default file is optional.
    /// Relative store paths are resolved against the config file's directory.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut config = match explicit {
            Some(path) => Self::from_file(path)?,
            None if Path::new(DEFAULT_CONFIG_FILE).is_file() => {
                Self::from_file(Path::new(DEFAULT_CONFIG_FILE))?
            }
            None => Self::default(),
        };
        config.apply_store_override(std::env::var_os(STORE_ENV).map(PathBuf::from));
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("reading configuration from {}", path.display());
        let content = fs::read_to_string(path)?;
        let mut config = Self::from_toml(&content)?;
        if config.store.is_relative() {
            if let Some(dir) = path.parent() {
                config.store = dir.join(&config.store);
            }
        }
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Environment override for the store file; empty values are ignored.
    pub fn apply_store_override(&mut self, store: Option<PathBuf>) {
        if let Some(store) = store.filter(|s| !s.as_os_str().is_empty()) {
            debug!("store file overridden by {}: {}", STORE_ENV, store.display());
            self.store = store;
        }
    }

    /// Parsed document filter.
    pub fn documents(&self) -> Result<NodeTypeFilter> {
        NodeTypeFilter::parse(&self.document_type)
    }
}
