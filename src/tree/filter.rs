//! Node type filtering for child lookups

use std::fmt;

use crate::error::{CrError, Result};
use crate::node_type::NodeTypeRegistry;

/// Node type constraint parsed from a filter string such as
/// `"Neos.Neos:Document,!Neos.Neos:Shortcut"`.
///
/// A type passes if it inherits from none of the excluded types and from at
/// least one included type. An empty include list accepts every type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeTypeFilter {
    include: Vec<String>,
    exclude: Vec<String>,
}

impl NodeTypeFilter {
    pub fn parse(filter: &str) -> Result<Self> {
        let mut include = Vec::new();
        let mut exclude = Vec::new();
        for part in filter.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            match part.strip_prefix('!') {
                Some(negated) if negated.trim().is_empty() => {
                    return Err(CrError::MalformedInput(format!(
                        "empty negation in node type filter \"{}\"",
                        filter
                    )));
                }
                Some(negated) => exclude.push(negated.trim().to_string()),
                None => include.push(part.to_string()),
            }
        }
        Ok(Self { include, exclude })
    }

    /// Filter matching a single type and its subtypes.
    pub fn of_type(name: &str) -> Self {
        Self {
            include: vec![name.to_string()],
            exclude: Vec::new(),
        }
    }

    /// Filter accepting every node.
    pub fn any() -> Self {
        Self {
            include: Vec::new(),
            exclude: Vec::new(),
        }
    }

    pub fn matches(&self, registry: &NodeTypeRegistry, node_type: &str) -> bool {
        if self.exclude.iter().any(|t| registry.is_of_type(node_type, t)) {
            return false;
        }
        self.include.is_empty() || self.include.iter().any(|t| registry.is_of_type(node_type, t))
    }
}

impl fmt::Display for NodeTypeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .include
            .iter()
            .cloned()
            .chain(self.exclude.iter().map(|t| format!("!{}", t)))
            .collect();
        write!(f, "{}", parts.join(","))
    }
}
