//! Error types shared by the store, the tree traversals and the commands

use std::io;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CrError {
    /// A path, URL, identifier or named child did not resolve to a node.
    #[error("{0}")]
    NotFound(String),

    /// A property exists but cannot be used the way the caller needs it.
    #[error("property \"{name}\" of node {path} {reason}")]
    PropertyAccess {
        name: String,
        path: String,
        reason: String,
    },

    #[error("invalid input: {0}")]
    MalformedInput(String),

    #[error("node type \"{0}\" is not valid")]
    UnknownNodeType(String),

    #[error("could not decode JSON data: {0}")]
    Json(#[from] serde_json::Error),

    #[error("could not read configuration: {0}")]
    Config(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl CrError {
    pub fn not_found(message: impl Into<String>) -> Self {
        CrError::NotFound(message.into())
    }

    pub fn property(name: &str, path: &str, reason: impl Into<String>) -> Self {
        CrError::PropertyAccess {
            name: name.to_string(),
            path: path.to_string(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CrError>;
