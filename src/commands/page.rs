//! `page` commands: list, remove, resolve and create documents

use clap::Subcommand;
use tracing::info;

use crate::error::{CrError, Result};
use crate::node::{TITLE, URI_PATH_SEGMENT};
use crate::output::ConsoleOutput;
use crate::store::{
    NodeStoreMut, naming::render_valid_node_name, node_for_path, node_for_url, set_node_properties,
};
use crate::tree::{DEFAULT_LIST_DEPTH, DocumentTreePrinter, DocumentWalker, PrinterConfig};

use super::{CommandContext, Outcome, node_of, non_negative, require_node_type};

#[derive(Subcommand, Debug)]
pub enum PageCommand {
    /// Show the site served by the store
    Info,

    /// List documents below a path
    List {
        /// Levels to descend below the start document (0 = start document only)
        #[arg(long, default_value_t = DEFAULT_LIST_DEPTH as i64, allow_negative_numbers = true)]
        depth: i64,

        /// Site-relative node path, e.g. /news (without the /sites/<site> prefix)
        #[arg(long, default_value = "")]
        path: String,

        /// One line per document instead of a table
        #[arg(long)]
        plain: bool,
    },

    /// Remove documents leaves first. Exits 1 if nothing was removed.
    Remove {
        /// Site-relative node path, e.g. /news
        #[arg(long, default_value = "")]
        path: String,

        /// Resolve the start document by URL instead of by path
        #[arg(long, conflicts_with = "path")]
        url: Option<String>,

        /// Remove at most this many documents (0 = no limit)
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        limit: i64,
    },

    /// Print the node path a URL resolves to
    ResolveUrl {
        /// URL to resolve, e.g. /news/my-news
        url: String,
    },

    /// Create a document below an existing one
    Create {
        /// URL of the parent document, e.g. /news
        parent_url: String,

        /// Node name; also used as URL path segment and initial title
        name: String,

        /// Node type, defaults to the configured page type
        #[arg(long = "type")]
        node_type: Option<String>,

        /// Node properties as a JSON object, e.g. '{"title":"My Fancy Title"}'
        #[arg(long)]
        properties: Option<String>,

        /// Update an existing child of that name instead of creating a new node
        #[arg(long)]
        overwrite_existing: bool,
    },
}

pub fn run<S, O>(command: PageCommand, ctx: &mut CommandContext<'_, S, O>) -> Result<Outcome>
where
    S: NodeStoreMut + ?Sized,
    O: ConsoleOutput + ?Sized,
{
    match command {
        PageCommand::Info => info_site(ctx),
        PageCommand::List { depth, path, plain } => list(ctx, depth, &path, plain),
        PageCommand::Remove { path, url, limit } => remove(ctx, &path, url.as_deref(), limit),
        PageCommand::ResolveUrl { url } => resolve_url(ctx, &url),
        PageCommand::Create {
            parent_url,
            name,
            node_type,
            properties,
            overwrite_existing,
        } => create(
            ctx,
            &parent_url,
            &name,
            node_type.as_deref(),
            properties.as_deref(),
            overwrite_existing,
        ),
    }
}

fn info_site<S, O>(ctx: &mut CommandContext<'_, S, O>) -> Result<Outcome>
where
    S: NodeStoreMut + ?Sized,
    O: ConsoleOutput + ?Sized,
{
    let site = ctx.store.site();
    let rows = vec![
        vec!["Current Site Name".to_string(), site.name.clone()],
        vec!["Site node name".to_string(), site.node_name.clone()],
        vec!["Site path".to_string(), site.path()],
        vec![
            "Store file".to_string(),
            ctx.config.store.display().to_string(),
        ],
    ];
    ctx.output.output_table(&["Key", "Value"], &rows)?;
    Ok(Outcome::unchanged())
}

pub fn list<S, O>(
    ctx: &mut CommandContext<'_, S, O>,
    depth: i64,
    path: &str,
    plain: bool,
) -> Result<Outcome>
where
    S: NodeStoreMut + ?Sized,
    O: ConsoleOutput + ?Sized,
{
    let config = PrinterConfig {
        max_depth: non_negative("--depth", depth)?,
        documents: ctx.config.documents()?,
    };
    let store = &*ctx.store;
    let root = node_for_path(store, path).ok_or_else(|| {
        CrError::not_found(format!("Could not find any node on path \"{}\"", path))
    })?;
    DocumentTreePrinter::with_config(store, root, config).print_tree(&mut *ctx.output, !plain)?;
    Ok(Outcome::unchanged())
}

pub fn remove<S, O>(
    ctx: &mut CommandContext<'_, S, O>,
    path: &str,
    url: Option<&str>,
    limit: i64,
) -> Result<Outcome>
where
    S: NodeStoreMut + ?Sized,
    O: ConsoleOutput + ?Sized,
{
    let limit = non_negative("--limit", limit)?;
    let documents = ctx.config.documents()?;

    let doomed: Vec<_> = {
        let store = &*ctx.store;
        let root = match url.filter(|u| !u.is_empty()) {
            Some(url) => node_for_url(store, url, &documents)?,
            None => node_for_path(store, path).ok_or_else(|| {
                CrError::not_found(format!("Could not find any node on path \"{}\"", path))
            })?,
        };
        // The site root is never removed, only what lies below it.
        let site_root = store.root().id();
        DocumentWalker::new(store, root)
            .with_filter(documents)
            .nodes(limit)?
            .into_iter()
            .filter(|node| node.id() != site_root)
            .map(|node| (node.id(), node.to_string()))
            .collect()
    };

    let mut rows = Vec::with_capacity(doomed.len());
    for (id, label) in doomed {
        ctx.store.remove_node(id)?;
        info!("removed {}", label);
        rows.push(vec![label]);
    }
    ctx.output.output_table(&["Deleted Pages"], &rows)?;

    if rows.is_empty() {
        Ok(Outcome::failed())
    } else {
        Ok(Outcome::modified())
    }
}

pub fn resolve_url<S, O>(ctx: &mut CommandContext<'_, S, O>, url: &str) -> Result<Outcome>
where
    S: NodeStoreMut + ?Sized,
    O: ConsoleOutput + ?Sized,
{
    let documents = ctx.config.documents()?;
    let path = node_for_url(&*ctx.store, url, &documents)?.path().to_string();
    ctx.line(path)?;
    Ok(Outcome::unchanged())
}

pub fn create<S, O>(
    ctx: &mut CommandContext<'_, S, O>,
    parent_url: &str,
    name: &str,
    node_type: Option<&str>,
    properties: Option<&str>,
    overwrite_existing: bool,
) -> Result<Outcome>
where
    S: NodeStoreMut + ?Sized,
    O: ConsoleOutput + ?Sized,
{
    let node_type = node_type.unwrap_or(&ctx.config.default_page_type).to_string();
    require_node_type(&*ctx.store, &node_type)?;
    let documents = ctx.config.documents()?;

    let (parent_id, existing, unique_name) = {
        let store = &*ctx.store;
        let parent = node_for_url(store, parent_url, &documents)?;
        let existing = store
            .named_child(parent, &render_valid_node_name(name))?
            .map(|n| (n.id(), n.to_string()));
        let unique_name = store.generate_unique_name(parent, Some(name))?;
        (parent.id(), existing, unique_name)
    };

    let id = match existing {
        Some((id, label)) if overwrite_existing => {
            ctx.line(format!("{} already exists, updating properties... .", label))?;
            id
        }
        _ => {
            let id = ctx.store.create_node(parent_id, &unique_name, &node_type)?;
            ctx.store
                .set_property(id, URI_PATH_SEGMENT, unique_name.clone().into())?;
            ctx.store.set_property(id, TITLE, name.into())?;
            let label = node_of(&*ctx.store, id)?.to_string();
            info!("created {}", label);
            ctx.line(format!("{} created.", label))?;
            id
        }
    };

    if let Some(properties) = properties.filter(|p| !p.is_empty()) {
        set_node_properties(&mut *ctx.store, id, properties)?;
    }
    Ok(Outcome::modified())
}
