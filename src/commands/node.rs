//! `node` commands: inspect a single node

use clap::Subcommand;
use serde::Serialize;

use crate::error::{CrError, Result};
use crate::node::{Node, Properties};
use crate::output::{ConsoleOutput, print_json};
use crate::store::{NodeStoreMut, node_for_path, node_for_url};

use super::{CommandContext, Outcome};

#[derive(Subcommand, Debug)]
pub enum NodeCommand {
    /// Print a node as one line of JSON
    Dump {
        /// URL of the node, e.g. /news
        #[arg(long, group = "selector")]
        url: Option<String>,

        /// Site-relative path of the node, e.g. /news/main
        #[arg(long, group = "selector")]
        path: Option<String>,

        /// Node identifier
        #[arg(long, group = "selector")]
        identifier: Option<String>,
    },
}

/// JSON shape of `node dump`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeDump<'a> {
    pub identifier: &'a str,
    pub name: &'a str,
    #[serde(rename = "type")]
    pub node_type: &'a str,
    pub is_hidden: bool,
    pub properties: &'a Properties,
}

impl<'a> From<&'a Node> for NodeDump<'a> {
    fn from(node: &'a Node) -> Self {
        Self {
            identifier: node.identifier(),
            name: node.name(),
            node_type: node.node_type(),
            is_hidden: node.is_hidden(),
            properties: node.properties(),
        }
    }
}

pub fn run<S, O>(command: NodeCommand, ctx: &mut CommandContext<'_, S, O>) -> Result<Outcome>
where
    S: NodeStoreMut + ?Sized,
    O: ConsoleOutput + ?Sized,
{
    match command {
        NodeCommand::Dump {
            url,
            path,
            identifier,
        } => dump(ctx, url.as_deref(), path.as_deref(), identifier.as_deref()),
    }
}

pub fn dump<S, O>(
    ctx: &mut CommandContext<'_, S, O>,
    url: Option<&str>,
    path: Option<&str>,
    identifier: Option<&str>,
) -> Result<Outcome>
where
    S: NodeStoreMut + ?Sized,
    O: ConsoleOutput + ?Sized,
{
    let documents = ctx.config.documents()?;
    let store = &*ctx.store;
    let node = match (url, path, identifier) {
        (Some(url), _, _) => Some(node_for_url(store, url, &documents)?),
        (None, Some(path), _) => node_for_path(store, path),
        (None, None, Some(identifier)) => store.node_by_identifier(identifier),
        (None, None, None) => {
            return Err(CrError::MalformedInput(
                "At least --url, --path or --identifier must be supplied".to_string(),
            ));
        }
    };
    let node = node.ok_or_else(|| CrError::not_found("not found"))?;
    print_json(&NodeDump::from(node), &mut *ctx.output)?;
    Ok(Outcome::unchanged())
}
