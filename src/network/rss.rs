//! Syndication feeds: RSS 0.9x/1.0/2.0, Atom and JSON Feed via feed-rs.

use chrono::Utc;
use feed_rs::model::Entry;
use feed_rs::parser;

use crate::app::{FeedbricksError, Result};
use crate::domain::{Item, NetworkKind};
use crate::network::{NetworkAdapter, ParseOptions, PrepareFn};
use crate::text::{first_image_src, strip_html};

const PREPARE: &[(&str, PrepareFn)] = &[("url", strip_scheme)];

pub fn adapter() -> NetworkAdapter {
    NetworkAdapter {
        kind: NetworkKind::Rss,
        url_template: "{{protocol}}//{{url}}",
        defaults: &[("protocol", "http:")],
        required: &["url"],
        prepare: PREPARE,
        parse,
    }
}

/// Drop any scheme from the feed URL so the security preference picks it.
fn strip_scheme(url: &str) -> String {
    let url = url.trim();
    let lower = url.to_ascii_lowercase();
    for prefix in ["https://", "http://", "//"] {
        if lower.starts_with(prefix) {
            return url[prefix.len()..].to_string();
        }
    }
    url.to_string()
}

fn parse(body: &[u8], options: &ParseOptions) -> Result<Vec<Item>> {
    let feed = parser::parse(body)
        .map_err(|e| FeedbricksError::malformed(NetworkKind::Rss.as_str(), e))?;

    let items = feed
        .entries
        .into_iter()
        .map(|entry| normalize_entry(entry, options))
        .filter(Item::is_displayable)
        .collect();

    Ok(items)
}

fn normalize_entry(entry: Entry, options: &ParseOptions) -> Item {
    let mut item = Item::new(NetworkKind::Rss);

    let markup = entry
        .content
        .and_then(|c| c.body)
        .or_else(|| entry.summary.map(|s| s.content))
        .unwrap_or_default();

    item.title = options.title(&strip_html(
        entry.title.as_ref().map(|t| t.content.as_str()).unwrap_or_default(),
    ));
    item.body = options.body(&strip_html(&markup));
    item.link = entry.links.first().map(|l| l.href.clone());
    item.author = entry
        .authors
        .first()
        .map(|a| a.name.clone())
        .unwrap_or_default();
    item.image = first_image_src(&markup).or_else(|| {
        entry
            .media
            .iter()
            .flat_map(|m| m.thumbnails.iter())
            .map(|t| t.image.uri.clone())
            .next()
    });

    let published = entry
        .published
        .or(entry.updated)
        .map(|dt| dt.with_timezone(&Utc));
    options.stamp(&mut item, published);

    item
}
