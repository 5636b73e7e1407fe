//! `content` commands: list, create and update content elements of a page

use clap::Subcommand;
use tracing::{debug, info};

use crate::error::{CrError, Result};
use crate::node::NodeId;
use crate::node_type::UNSTRUCTURED;
use crate::output::ConsoleOutput;
use crate::store::{NodeStoreMut, naming::render_valid_node_name, node_for_url, set_node_properties};

use super::{CommandContext, Outcome, node_of, require_node_type};

const DEFAULT_COLLECTION: &str = "main";

#[derive(Subcommand, Debug)]
pub enum ContentCommand {
    /// List the content elements of a page's collection
    List {
        /// URL of the page, e.g. /news
        url: String,

        /// Collection node name
        #[arg(long, default_value = DEFAULT_COLLECTION)]
        collection: String,
    },

    /// Create a content element on a page
    Create {
        /// URL of the page the element is inserted into
        url: String,

        /// Node properties as a JSON object, e.g. '{"text":"Hello"}'
        #[arg(long)]
        properties: Option<String>,

        /// Node type, defaults to the configured content type
        #[arg(long = "type")]
        node_type: Option<String>,

        /// Collection node name; created when missing
        #[arg(long, default_value = DEFAULT_COLLECTION)]
        collection: String,

        /// Node name; a random name is generated when omitted
        #[arg(long)]
        name: Option<String>,

        /// Nested path inside the collection, e.g. column0/inner; missing segments are created
        #[arg(long)]
        component_path: Option<String>,

        /// Update an existing element of that name instead of creating a new node
        #[arg(long)]
        overwrite_existing: bool,
    },

    /// Update properties, name or hidden state of a content element
    Update {
        /// Node identifier of the content element
        identifier: String,

        /// Node properties as a JSON object
        #[arg(long)]
        properties: Option<String>,

        /// New node name
        #[arg(long)]
        name: Option<String>,

        /// Hide (true) or show (false) the element
        #[arg(long, value_parser = clap::builder::BoolishValueParser::new())]
        hide: Option<bool>,
    },
}

/// Options of `content create`.
#[derive(Debug, Clone, Default)]
pub struct CreateContent {
    pub url: String,
    pub properties: Option<String>,
    pub node_type: Option<String>,
    pub collection: String,
    pub name: Option<String>,
    pub component_path: Option<String>,
    pub overwrite_existing: bool,
}

pub fn run<S, O>(command: ContentCommand, ctx: &mut CommandContext<'_, S, O>) -> Result<Outcome>
where
    S: NodeStoreMut + ?Sized,
    O: ConsoleOutput + ?Sized,
{
    match command {
        ContentCommand::List { url, collection } => list(ctx, &url, &collection),
        ContentCommand::Create {
            url,
            properties,
            node_type,
            collection,
            name,
            component_path,
            overwrite_existing,
        } => create(
            ctx,
            CreateContent {
                url,
                properties,
                node_type,
                collection,
                name,
                component_path,
                overwrite_existing,
            },
        ),
        ContentCommand::Update {
            identifier,
            properties,
            name,
            hide,
        } => update(ctx, &identifier, properties.as_deref(), name.as_deref(), hide),
    }
}

pub fn list<S, O>(
    ctx: &mut CommandContext<'_, S, O>,
    url: &str,
    collection: &str,
) -> Result<Outcome>
where
    S: NodeStoreMut + ?Sized,
    O: ConsoleOutput + ?Sized,
{
    let documents = ctx.config.documents()?;
    let lines: Vec<String> = {
        let store = &*ctx.store;
        let page = node_for_url(store, url, &documents)?;
        let collection_node = store.named_child(page, collection)?.ok_or_else(|| {
            CrError::not_found(format!("page has no collection node named \"{}\"", collection))
        })?;
        store
            .children(collection_node)?
            .into_iter()
            .map(|child| child.to_string())
            .collect()
    };
    for line in lines {
        ctx.line(line)?;
    }
    Ok(Outcome::unchanged())
}

pub fn create<S, O>(ctx: &mut CommandContext<'_, S, O>, options: CreateContent) -> Result<Outcome>
where
    S: NodeStoreMut + ?Sized,
    O: ConsoleOutput + ?Sized,
{
    let node_type = options
        .node_type
        .as_deref()
        .unwrap_or(&ctx.config.default_content_type)
        .to_string();
    require_node_type(&*ctx.store, &node_type)?;
    let documents = ctx.config.documents()?;

    let (page_id, collection_id) = {
        let store = &*ctx.store;
        let page = node_for_url(store, &options.url, &documents)?;
        let collection = store.named_child(page, &options.collection)?.map(|n| n.id());
        (page.id(), collection)
    };

    let collection_id = match collection_id {
        Some(id) => id,
        None => {
            ctx.line(format!(
                "Could not find collection '{}', creating... .",
                options.collection
            ))?;
            let collection_type = ctx.config.collection_type.clone();
            ctx.store
                .create_node(page_id, &options.collection, &collection_type)?
        }
    };

    let mut segment_id = collection_id;
    if let Some(component_path) = options.component_path.as_deref() {
        for segment in component_path.trim_matches('/').split('/').filter(|s| !s.is_empty()) {
            segment_id = child_or_create(ctx, segment_id, segment)?;
        }
    }

    let (existing, unique_name) = {
        let store = &*ctx.store;
        let parent = node_of(store, segment_id)?;
        let existing = match options.name.as_deref() {
            Some(name) => store
                .named_child(parent, &render_valid_node_name(name))?
                .map(|n| (n.id(), n.to_string())),
            None => None,
        };
        let unique_name = store.generate_unique_name(parent, options.name.as_deref())?;
        (existing, unique_name)
    };

    let id = match existing {
        Some((id, label)) if options.overwrite_existing => {
            ctx.line(format!("{} already exists, updating properties... .", label))?;
            id
        }
        _ => {
            let id = ctx.store.create_node(segment_id, &unique_name, &node_type)?;
            let label = node_of(&*ctx.store, id)?.to_string();
            info!("created {}", label);
            ctx.line(format!("{} created.", label))?;
            id
        }
    };

    if let Some(properties) = options.properties.as_deref().filter(|p| !p.is_empty()) {
        set_node_properties(&mut *ctx.store, id, properties)?;
    }
    Ok(Outcome::modified())
}

fn child_or_create<S, O>(
    ctx: &mut CommandContext<'_, S, O>,
    parent: NodeId,
    name: &str,
) -> Result<NodeId>
where
    S: NodeStoreMut + ?Sized,
    O: ConsoleOutput + ?Sized,
{
    let existing = {
        let store = &*ctx.store;
        store.named_child(node_of(store, parent)?, name)?.map(|n| n.id())
    };
    match existing {
        Some(id) => Ok(id),
        None => {
            debug!("creating component segment \"{}\"", name);
            ctx.store.create_node(parent, name, UNSTRUCTURED)
        }
    }
}

pub fn update<S, O>(
    ctx: &mut CommandContext<'_, S, O>,
    identifier: &str,
    properties: Option<&str>,
    name: Option<&str>,
    hide: Option<bool>,
) -> Result<Outcome>
where
    S: NodeStoreMut + ?Sized,
    O: ConsoleOutput + ?Sized,
{
    let found = {
        let store = &*ctx.store;
        store
            .node_by_identifier(identifier)
            .map(|node| (node.id(), store.is_of_type(node, &ctx.config.content_type)))
    };
    let id = match found {
        None => {
            ctx.line("Unable to find node.")?;
            return Ok(Outcome::failed());
        }
        Some((_, false)) => {
            ctx.line("The found node is not a content element.")?;
            return Ok(Outcome::failed());
        }
        Some((id, true)) => id,
    };

    if let Some(properties) = properties {
        set_node_properties(&mut *ctx.store, id, properties)?;
        ctx.line("Updated properties.")?;
    }

    if let Some(name) = name.filter(|n| !n.is_empty()) {
        let unique_name = {
            let store = &*ctx.store;
            let node = node_of(store, id)?;
            let parent = store
                .parent(node)
                .ok_or_else(|| CrError::not_found(format!("{} has no parent", node)))?;
            store.generate_unique_name(parent, Some(name))?
        };
        ctx.store.set_name(id, &unique_name)?;
        ctx.line(format!("Updated node name: \"{}\"", unique_name))?;
    }

    if let Some(hide) = hide {
        ctx.store.set_hidden(id, hide)?;
        ctx.line(format!("Hidden state set to {}.", hide))?;
    }

    Ok(Outcome::modified())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::config::ToolConfig;
    use crate::output::BufferedOutput;
    use crate::store::{MemoryStore, NodeStore};
    use crate::test_utils::{WELCOME_TEXT_ID, sample_store};

    fn with_ctx<F>(store: &mut MemoryStore, f: F) -> (Result<Outcome>, BufferedOutput)
    where
        F: FnOnce(&mut CommandContext<'_, MemoryStore, BufferedOutput>) -> Result<Outcome>,
    {
        let config = ToolConfig::default();
        let mut output = BufferedOutput::new();
        let result = {
            let mut ctx = CommandContext::new(store, &config, &mut output);
            f(&mut ctx)
        };
        (result, output)
    }

    fn create_options(url: &str) -> CreateContent {
        CreateContent {
            url: url.to_string(),
            collection: DEFAULT_COLLECTION.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_list_collection_children() {
        let mut store = sample_store();
        let (result, output) = with_ctx(&mut store, |ctx| list(ctx, "/", "main"));
        result.unwrap();
        assert_eq!(
            output.lines(),
            &["Node /sites/demo/main/welcome [Neos.NodeTypes:Text]".to_string()]
        );
    }

    #[test]
    fn test_list_missing_collection() {
        let mut store = sample_store();
        let (result, _) = with_ctx(&mut store, |ctx| list(ctx, "/news", "main"));
        assert_eq!(
            result.unwrap_err().to_string(),
            "page has no collection node named \"main\""
        );
    }

    #[test]
    fn test_create_makes_collection_and_component_path() {
        let mut store = sample_store();
        let options = CreateContent {
            name: Some("Intro".to_string()),
            component_path: Some("/column0/inner/".to_string()),
            properties: Some(r#"{"text":"Hi"}"#.to_string()),
            ..create_options("/news")
        };
        let (result, output) = with_ctx(&mut store, |ctx| create(ctx, options));
        assert_eq!(result.unwrap(), Outcome::modified());
        assert_eq!(
            output.lines(),
            &[
                "Could not find collection 'main', creating... .".to_string(),
                "Node /sites/demo/news/main/column0/inner/intro [Neos.NodeTypes:Text] created."
                    .to_string(),
            ]
        );
        let collection = store.node_at_path("/sites/demo/news/main").unwrap();
        assert_eq!(collection.node_type(), "Neos.Neos:ContentCollection");
        let segment = store.node_at_path("/sites/demo/news/main/column0").unwrap();
        assert_eq!(segment.node_type(), "unstructured");
        let intro = store
            .node_at_path("/sites/demo/news/main/column0/inner/intro")
            .unwrap();
        assert_eq!(intro.property("text"), Some(&json!("Hi")));
    }

    #[test]
    fn test_create_without_name_generates_one() {
        let mut store = sample_store();
        let (result, output) = with_ctx(&mut store, |ctx| create(ctx, create_options("/")));
        result.unwrap();
        assert!(output.lines()[0].starts_with("Node /sites/demo/main/node-"));
    }

    #[test]
    fn test_create_overwrite_existing() {
        let mut store = sample_store();
        let options = CreateContent {
            name: Some("welcome".to_string()),
            overwrite_existing: true,
            properties: Some(r#"{"text":"Changed"}"#.to_string()),
            ..create_options("/")
        };
        let (result, output) = with_ctx(&mut store, |ctx| create(ctx, options));
        result.unwrap();
        assert!(output.lines()[0].contains("already exists"));
        let welcome = store.node_by_identifier(WELCOME_TEXT_ID).unwrap();
        assert_eq!(welcome.property("text"), Some(&json!("Changed")));
    }

    #[test]
    fn test_update_properties_name_and_hidden() {
        let mut store = sample_store();
        let (result, output) = with_ctx(&mut store, |ctx| {
            update(
                ctx,
                WELCOME_TEXT_ID,
                Some(r#"{"text":"Bye"}"#),
                Some("Farewell"),
                Some(true),
            )
        });
        assert_eq!(result.unwrap(), Outcome::modified());
        assert_eq!(
            output.lines(),
            &[
                "Updated properties.".to_string(),
                "Updated node name: \"farewell\"".to_string(),
                "Hidden state set to true.".to_string(),
            ]
        );
        let node = store.node_by_identifier(WELCOME_TEXT_ID).unwrap();
        assert_eq!(node.path(), "/sites/demo/main/farewell");
        assert!(node.is_hidden());
    }

    #[test]
    fn test_update_unknown_or_non_content_node_fails() {
        let mut store = sample_store();
        let (result, output) =
            with_ctx(&mut store, |ctx| update(ctx, "missing", None, None, None));
        assert_eq!(result.unwrap(), Outcome::failed());
        assert_eq!(output.lines(), &["Unable to find node.".to_string()]);

        let page_id = store.root().identifier().to_string();
        let (result, output) = with_ctx(&mut store, |ctx| update(ctx, &page_id, None, None, None));
        assert_eq!(result.unwrap(), Outcome::failed());
        assert_eq!(
            output.lines(),
            &["The found node is not a content element.".to_string()]
        );
    }
}
