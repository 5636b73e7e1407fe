//! Integration tests for crtools


use crtools::{NodeStore, node_type};
use harness::{TestSite, WELCOME_TEXT_ID, run_crtools, run_crtools_in};
use serde_json::Value;

#[test]
fn test_page_list_table() {
    let site = TestSite::sample();

    let (stdout, _stderr, success) = run_crtools(&site, &["page", "list"]);
    assert!(success, "crtools should succeed");
    assert!(
        stdout.contains("| URL path | Page Title | Node Type"),
        "should print table headers: {}",
        stdout
    );
    assert!(stdout.contains("Neos Node Path"));
    assert!(stdout.contains("| news "), "should list news: {}", stdout);
    assert!(stdout.contains("| about "), "should list about: {}", stdout);
    assert!(
        !stdout.contains("news/item1"),
        "default depth stops below the first level: {}",
        stdout
    );
}

#[test]
fn test_page_list_plain_with_depth() {
    let site = TestSite::sample();

    let (stdout, _stderr, success) =
        run_crtools(&site, &["page", "list", "--plain", "--depth", "2", "--path", "/news"]);
    assert!(success);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(
        lines,
        vec![
            "news \"News\" {Neos.NodeTypes:Page} []",
            "news/item1 \"Item 1\" {Neos.NodeTypes:Page} [/item-1]",
            "news/item2 \"Item 2\" {Neos.NodeTypes:Page} [/item-2]",
        ]
    );
}

#[test]
fn test_page_list_depth_zero_shows_start_only() {
    let site = TestSite::sample();

    let (stdout, _stderr, success) =
        run_crtools(&site, &["page", "list", "--plain", "--depth", "0"]);
    assert!(success);
    assert_eq!(stdout.lines().count(), 1, "only the root: {}", stdout);
    assert!(stdout.contains("\"Home\""));
}

#[test]
fn test_page_info() {
    let site = TestSite::sample();

    let (stdout, _stderr, success) = run_crtools(&site, &["page", "info"]);
    assert!(success);
    assert!(stdout.contains("Demo Site"));
    assert!(stdout.contains("/sites/demo"));
}

#[test]
fn test_resolve_url() {
    let site = TestSite::sample();

    let (stdout, _stderr, success) = run_crtools(&site, &["page", "resolve-url", "/news/item2"]);
    assert!(success);
    assert_eq!(stdout.trim(), "/sites/demo/news/item-2");
}

#[test]
fn test_resolve_unknown_url_fails() {
    let site = TestSite::sample();

    let (stdout, stderr, success) = run_crtools(&site, &["page", "resolve-url", "/news/nope"]);
    assert!(!success, "unknown URL should fail");
    assert!(stdout.is_empty());
    assert!(
        stderr.contains(
            "ERROR: Could not find any child document for URL path segment: \"nope\" on \"/sites/demo/news\""
        ),
        "should explain the failing segment: {}",
        stderr
    );
}

#[test]
fn test_page_create_is_saved() {
    let site = TestSite::sample();

    let (stdout, _stderr, success) = run_crtools(
        &site,
        &[
            "page",
            "create",
            "/news",
            "Breaking News",
            "--properties",
            r#"{"title":"Extra! Extra!"}"#,
        ],
    );
    assert!(success);
    assert_eq!(
        stdout.trim(),
        "Node /sites/demo/news/breaking-news [Neos.NodeTypes:Page] created."
    );

    let store = site.load();
    let node = store
        .node_at_path("/sites/demo/news/breaking-news")
        .expect("created page should be stored");
    assert_eq!(node.title().unwrap(), "Extra! Extra!");
    assert_eq!(node.uri_path_segment().unwrap(), "breaking-news");

    let (stdout, _stderr, success) =
        run_crtools(&site, &["page", "resolve-url", "/news/breaking-news"]);
    assert!(success);
    assert_eq!(stdout.trim(), "/sites/demo/news/breaking-news");
}

#[test]
fn test_page_create_overwrite_existing() {
    let site = TestSite::sample();

    let (stdout, _stderr, success) = run_crtools(
        &site,
        &[
            "page",
            "create",
            "/",
            "About",
            "--overwrite-existing",
            "--properties",
            r#"{"title":"About us"}"#,
        ],
    );
    assert!(success);
    assert!(
        stdout.contains("already exists, updating properties"),
        "should update in place: {}",
        stdout
    );

    let store = site.load();
    let about = store.node_at_path("/sites/demo/about").unwrap();
    assert_eq!(about.title().unwrap(), "About us");
    assert_eq!(store.children(store.root()).unwrap().len(), 3);
}

#[test]
fn test_page_remove_with_limit() {
    let site = TestSite::sample();

    let (stdout, _stderr, success) =
        run_crtools(&site, &["page", "remove", "--path", "/news", "--limit", "1"]);
    assert!(success);
    assert!(stdout.contains("Deleted Pages"));
    assert!(stdout.contains("/sites/demo/news/item-1"));

    let store = site.load();
    assert!(store.node_at_path("/sites/demo/news/item-1").is_none());
    assert!(store.node_at_path("/sites/demo/news/item-2").is_some());
    assert!(store.node_at_path("/sites/demo/news").is_some());
}

#[test]
fn test_page_remove_subtree_by_url() {
    let site = TestSite::sample();

    let (stdout, _stderr, success) = run_crtools(&site, &["page", "remove", "--url", "/news"]);
    assert!(success);
    assert!(stdout.contains("Node /sites/demo/news [Neos.NodeTypes:Page]"));

    let store = site.load();
    assert!(store.node_at_path("/sites/demo/news").is_none());
    assert!(store.node_at_path("/sites/demo/about").is_some());
}

#[test]
fn test_content_create_update_and_list() {
    let site = TestSite::sample();

    let (stdout, _stderr, success) = run_crtools(
        &site,
        &[
            "content",
            "create",
            "/about",
            "--name",
            "intro",
            "--properties",
            r#"{"text":"Hello"}"#,
        ],
    );
    assert!(success);
    assert!(
        stdout.contains("Could not find collection 'main', creating... ."),
        "collection is created on demand: {}",
        stdout
    );
    assert!(stdout.contains("Node /sites/demo/about/main/intro [Neos.NodeTypes:Text] created."));

    let identifier = {
        let store = site.load();
        let intro = store.node_at_path("/sites/demo/about/main/intro").unwrap();
        assert_eq!(intro.text_property("text").unwrap(), "Hello");
        intro.identifier().to_string()
    };

    let (stdout, _stderr, success) = run_crtools(
        &site,
        &[
            "content",
            "update",
            &identifier,
            "--properties",
            r#"{"text":"Hello again"}"#,
            "--name",
            "Greeting",
            "--hide",
            "true",
        ],
    );
    assert!(success);
    assert!(stdout.contains("Updated properties."));
    assert!(stdout.contains("Updated node name: \"greeting\""));
    assert!(stdout.contains("Hidden state set to true."));

    let (stdout, _stderr, success) = run_crtools(&site, &["content", "list", "/about"]);
    assert!(success);
    assert_eq!(
        stdout.trim(),
        "Node /sites/demo/about/main/greeting [Neos.NodeTypes:Text]"
    );

    let store = site.load();
    let greeting = store.node_by_identifier(&identifier).unwrap();
    assert!(greeting.is_hidden());
    assert_eq!(greeting.text_property("text").unwrap(), "Hello again");
}

#[test]
fn test_content_update_unknown_identifier_exits_nonzero() {
    let site = TestSite::sample();

    let (stdout, _stderr, success) = run_crtools(&site, &["content", "update", "missing-id"]);
    assert!(!success);
    assert_eq!(stdout.trim(), "Unable to find node.");
}

#[test]
fn test_content_update_rejects_documents() {
    let site = TestSite::sample();
    let identifier = site
        .load()
        .node_at_path("/sites/demo/news")
        .unwrap()
        .identifier()
        .to_string();

    let (stdout, _stderr, success) = run_crtools(&site, &["content", "update", &identifier]);
    assert!(!success);
    assert_eq!(stdout.trim(), "The found node is not a content element.");
}

#[test]
fn test_node_dump() {
    let site = TestSite::sample();

    let (stdout, _stderr, success) =
        run_crtools(&site, &["node", "dump", "--identifier", WELCOME_TEXT_ID]);
    assert!(success);
    assert_eq!(stdout.lines().count(), 1, "dump is a single JSON line");
    let value: Value = serde_json::from_str(stdout.trim()).unwrap();
    assert_eq!(value["name"], "welcome");
    assert_eq!(value["type"], node_type::TEXT);
    assert_eq!(value["properties"]["text"], "Welcome!");
}

#[test]
fn test_config_file_names_store() {
    let site = TestSite::sample();
    site.add_file("crtools.toml", "store = \"site.json\"\n");

    let (stdout, _stderr, success) =
        run_crtools_in(site.path(), &["page", "resolve-url", "/about"], None);
    assert!(success, "default config file should be picked up");
    assert_eq!(stdout.trim(), "/sites/demo/about");
}

#[test]
fn test_store_flag_overrides_environment() {
    let site = TestSite::sample();
    let other = TestSite::sample();
    let store = other.store_path().to_string_lossy().to_string();

    let (_stdout, _stderr, success) = run_crtools(
        &site,
        &["page", "create", "/", "Contact", "--store", &store],
    );
    assert!(success);
    assert!(other.load().node_at_path("/sites/demo/contact").is_some());
    assert!(site.load().node_at_path("/sites/demo/contact").is_none());
}

#[test]
fn test_read_only_commands_leave_store_untouched() {
    let site = TestSite::sample();
    let before = std::fs::read_to_string(site.store_path()).unwrap();

    let (_stdout, _stderr, success) = run_crtools(&site, &["page", "list", "--depth", "5"]);
    assert!(success);
    let after = std::fs::read_to_string(site.store_path()).unwrap();
    assert_eq!(before, after);
}
