//! Per-network adapters and the registry that resolves them by name.
//!
//! An adapter is plain data: a URL template, default and required
//! parameters, parameter transforms and a response parser. Adding a network
//! means writing one of these and registering it; nothing downstream of the
//! registry knows which networks exist.

pub mod facebook;
pub mod rss;
pub mod twitter;

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::app::{FeedbricksError, Result};
use crate::domain::{Item, NetworkKind};
use crate::text::truncate;

/// Transform applied to one parameter before it is substituted.
pub type PrepareFn = fn(&str) -> String;

/// Converts a raw response body into normalized items.
pub type ParseFn = fn(&[u8], &ParseOptions) -> Result<Vec<Item>>;

#[derive(Debug, Clone)]
pub struct NetworkAdapter {
    pub kind: NetworkKind,
    /// `{{name}}` placeholders refer to resolved parameter names.
    pub url_template: &'static str,
    pub defaults: &'static [(&'static str, &'static str)],
    pub required: &'static [&'static str],
    pub prepare: &'static [(&'static str, PrepareFn)],
    pub parse: ParseFn,
}

/// Text limits and date pattern every parser applies.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    pub max_title_length: usize,
    pub max_body_length: usize,
    pub date_format: String,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            max_title_length: 50,
            max_body_length: 200,
            date_format: crate::config::DEFAULT_DATE_FORMAT.to_string(),
        }
    }
}

impl ParseOptions {
    pub fn title(&self, text: &str) -> String {
        truncate(text, self.max_title_length)
    }

    pub fn body(&self, text: &str) -> String {
        truncate(text, self.max_body_length)
    }

    /// Set `rank_key` and the display `date` from a timestamp.
    pub fn stamp(&self, item: &mut Item, at: Option<DateTime<Utc>>) {
        item.rank_key = at;
        item.date = at
            .map(|dt| dt.format(&self.date_format).to_string())
            .unwrap_or_default();
    }
}

/// Parse the timestamp shapes the supported networks emit.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    DateTime::parse_from_rfc3339(raw)
        .or_else(|_| DateTime::parse_from_rfc2822(raw))
        // Graph API: 2024-01-01T12:00:00+0000
        .or_else(|_| DateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%z"))
        // Twitter v1.1: Wed Aug 27 13:08:45 +0000 2008
        .or_else(|_| DateTime::parse_from_str(raw, "%a %b %d %H:%M:%S %z %Y"))
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
}

/// Percent-encode a value for use inside a URL.
pub fn percent_encode(value: &str) -> String {
    url::form_urlencoded::byte_serialize(value.as_bytes()).collect()
}

/// Holds one adapter per network kind.
pub struct AdapterRegistry {
    adapters: BTreeMap<NetworkKind, NetworkAdapter>,
}

impl AdapterRegistry {
    pub fn empty() -> Self {
        Self {
            adapters: BTreeMap::new(),
        }
    }

    /// Registry with every built-in adapter.
    pub fn builtin() -> Self {
        let mut registry = Self::empty();
        registry.register(facebook::adapter());
        registry.register(twitter::adapter());
        registry.register(rss::adapter());
        registry
    }

    /// Add an adapter, replacing any previous one for the same kind.
    pub fn register(&mut self, adapter: NetworkAdapter) {
        self.adapters.insert(adapter.kind, adapter);
    }

    pub fn resolve(&self, name: &str) -> Result<&NetworkAdapter> {
        let kind: NetworkKind = name.parse()?;
        self.adapters
            .get(&kind)
            .ok_or_else(|| FeedbricksError::UnknownNetwork(name.to_string()))
    }

    pub fn adapters(&self) -> impl Iterator<Item = &NetworkAdapter> {
        self.adapters.values()
    }
}

impl Default for AdapterRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
