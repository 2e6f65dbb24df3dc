use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::SeedableRng;

use feedbricks::app::{AppContext, FeedbricksError, Result};
use feedbricks::config::PipelineConfig;
use feedbricks::fetcher::Fetcher;
use feedbricks::render::{Renderer, TemplateRenderer};

/// Answers by URL substring; unmatched URLs fail like a refused connection.
struct ScriptedFetcher {
    routes: Vec<(&'static str, String)>,
    requested: Mutex<Vec<String>>,
}

impl ScriptedFetcher {
    fn new(routes: Vec<(&'static str, String)>) -> Arc<Self> {
        Arc::new(Self {
            routes,
            requested: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl Fetcher for ScriptedFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        self.requested.lock().unwrap().push(url.to_string());
        self.routes
            .iter()
            .find(|(needle, _)| url.contains(needle))
            .map(|(_, body)| body.clone().into_bytes())
            .ok_or_else(|| FeedbricksError::Other(format!("connection refused: {url}")))
    }
}

fn facebook_posts(dates: &[&str]) -> String {
    let posts: Vec<String> = dates
        .iter()
        .map(|d| {
            format!(
                r#"{{"message": "post from {d}", "from": {{"name": "Page"}}, "created_time": "{d}T00:00:00+0000"}}"#
            )
        })
        .collect();
    format!(r#"{{"data": [{}]}}"#, posts.join(","))
}

const RSS_FEED: &str = r#"<?xml version="1.0"?>
<rss version="2.0"><channel><title>Blog</title>
  <item>
    <title>The quick brown fox jumps</title>
    <link>https://blog.example/fox</link>
    <pubDate>Tue, 05 Mar 2024 10:00:00 GMT</pubDate>
    <description>&lt;p&gt;Over the &lt;b&gt;lazy&lt;/b&gt; dog&lt;/p&gt;</description>
  </item>
</channel></rss>"#;

async fn run(
    config_toml: &str,
    fetcher: Arc<ScriptedFetcher>,
) -> Result<Vec<feedbricks::domain::Item>> {
    let config: PipelineConfig = toml::from_str(config_toml).expect("test config parses");
    let ctx = AppContext::with_fetcher(&config, fetcher);
    ctx.pipeline.run(&config, &mut StdRng::seed_from_u64(1)).await
}

#[tokio::test]
async fn ranks_top_items_while_failed_network_contributes_nothing() {
    let fetcher = ScriptedFetcher::new(vec![(
        "graph.facebook.com",
        facebook_posts(&["2024-01-01", "2024-03-01", "2024-02-01"]),
    )]);

    let items = run(
        r#"
max_items = 2
sort_direction = "desc"
date_format = "%Y-%m-%d"

[[networks]]
name = "facebook"
access_token = "token"

[[networks]]
name = "twitter"
username = "nobody"
"#,
        fetcher.clone(),
    )
    .await
    .unwrap();

    let dates: Vec<&str> = items.iter().map(|i| i.date.as_str()).collect();
    assert_eq!(dates, vec!["2024-03-01", "2024-02-01"]);
    assert!(items.iter().all(|i| i.source == "Facebook"));

    // Both networks were attempted.
    assert_eq!(fetcher.requested.lock().unwrap().len(), 2);
}

#[tokio::test]
async fn zero_budget_yields_nothing() {
    let fetcher = ScriptedFetcher::new(vec![
        ("graph.facebook.com", facebook_posts(&["2024-01-01"])),
        ("blog.example", RSS_FEED.to_string()),
    ]);

    let items = run(
        r#"
max_items = 0

[[networks]]
name = "facebook"
access_token = "token"

[[networks]]
name = "rss"
url = "https://blog.example/feed.xml"
"#,
        fetcher,
    )
    .await
    .unwrap();

    assert!(items.is_empty());
}

#[tokio::test]
async fn titles_are_cut_at_word_boundaries() {
    let fetcher = ScriptedFetcher::new(vec![("blog.example", RSS_FEED.to_string())]);

    let items = run(
        r#"
max_title_length = 10

[[networks]]
name = "rss"
url = "https://blog.example/feed.xml"
"#,
        fetcher,
    )
    .await
    .unwrap();

    assert_eq!(items.len(), 1);
    assert_eq!(items[0].title, "The quick…");
    assert_eq!(items[0].body, "Over the lazy dog");
}

#[tokio::test]
async fn malformed_and_misconfigured_networks_are_isolated() {
    let fetcher = ScriptedFetcher::new(vec![
        ("api.twitter.com", "<html>rate limited</html>".to_string()),
        ("blog.example", RSS_FEED.to_string()),
    ]);

    let items = run(
        r#"
[[networks]]
name = "twitter"
username = "rustlang"

[[networks]]
name = "facebook"

[[networks]]
name = "friendster"

[[networks]]
name = "rss"
url = "blog.example/feed.xml"
"#,
        fetcher.clone(),
    )
    .await
    .unwrap();

    assert_eq!(items.len(), 1);
    assert_eq!(items[0].link.as_deref(), Some("https://blog.example/fox"));

    // facebook lacks access_token and friendster has no adapter: no requests.
    assert_eq!(fetcher.requested.lock().unwrap().len(), 2);
}

#[tokio::test]
async fn every_network_failing_renders_empty() {
    let fetcher = ScriptedFetcher::new(Vec::new());

    let items = run(
        r#"
template = "{{title}}"

[[networks]]
name = "rss"
url = "https://down.example/feed.xml"
"#,
        fetcher,
    )
    .await
    .unwrap();

    assert!(items.is_empty());
    assert_eq!(TemplateRenderer::new(Some("{{title}}")).render(&items).unwrap(), "");
}

#[tokio::test]
async fn security_preference_selects_scheme() {
    let fetcher = ScriptedFetcher::new(Vec::new());

    run(
        r#"
secure = false

[[networks]]
name = "rss"
url = "https://blog.example/feed.xml"
"#,
        fetcher.clone(),
    )
    .await
    .unwrap();

    assert_eq!(
        fetcher.requested.lock().unwrap().as_slice(),
        ["http://blog.example/feed.xml".to_string()]
    );
}

#[tokio::test]
async fn randomized_selection_is_subset_of_ranked_top() {
    let fetcher = ScriptedFetcher::new(vec![(
        "graph.facebook.com",
        facebook_posts(&[
            "2024-01-01",
            "2024-01-02",
            "2024-01-03",
            "2024-01-04",
            "2024-01-05",
        ]),
    )]);

    let items = run(
        r#"
max_items = 3
randomize = true
randomize_max_items = 2
date_format = "%Y-%m-%d"

[[networks]]
name = "facebook"
access_token = "token"
"#,
        fetcher,
    )
    .await
    .unwrap();

    assert_eq!(items.len(), 2);
    for item in &items {
        assert!(["2024-01-03", "2024-01-04", "2024-01-05"].contains(&item.date.as_str()));
    }
}

#[tokio::test]
async fn negative_budget_fails_before_fetching() {
    let fetcher = ScriptedFetcher::new(Vec::new());

    let result = run(
        r#"
max_items = -3

[[networks]]
name = "rss"
url = "https://blog.example/feed.xml"
"#,
        fetcher.clone(),
    )
    .await;

    assert!(matches!(result, Err(FeedbricksError::Config(_))));
    assert!(fetcher.requested.lock().unwrap().is_empty());
}

#[test]
fn context_registry_builds_configured_urls() {
    let config: PipelineConfig = toml::from_str(
        r#"
secure = true

[[networks]]
name = "rss"
url = "http://blog.example/feed.xml"
"#,
    )
    .unwrap();
    let ctx = AppContext::with_fetcher(&config, ScriptedFetcher::new(Vec::new()));

    let adapter = ctx.registry.resolve("rss").unwrap();
    let request = feedbricks::request::build(adapter, &config.networks[0], config.secure).unwrap();
    assert_eq!(request.url, "https://blog.example/feed.xml");
}
