//! Display output for the final item list.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::app::{FeedbricksError, Result};
use crate::domain::Item;
use crate::template;

/// Used when the configuration carries no template.
pub const DEFAULT_TEMPLATE: &str = "[{{source}}] {{title}}\n{{body}}\n{{author}} | {{date}} | {{link}}\n";

pub trait Renderer {
    fn render(&self, items: &[Item]) -> Result<String>;
}

/// Applies a `{{field}}` template to each item and joins the results.
pub struct TemplateRenderer {
    template: String,
}

impl TemplateRenderer {
    pub fn new(template: Option<&str>) -> Self {
        Self {
            template: template.unwrap_or(DEFAULT_TEMPLATE).to_string(),
        }
    }
}

impl Default for TemplateRenderer {
    fn default() -> Self {
        Self::new(None)
    }
}

impl Renderer for TemplateRenderer {
    fn render(&self, items: &[Item]) -> Result<String> {
        Ok(items
            .iter()
            .map(|item| template::render(&self.template, &fields(item)))
            .collect::<Vec<_>>()
            .join("\n"))
    }
}

fn fields(item: &Item) -> BTreeMap<String, String> {
    [
        ("network", item.network.to_string()),
        ("title", item.title.clone()),
        ("body", item.body.clone()),
        ("link", item.link.clone().unwrap_or_default()),
        ("author", item.author.clone()),
        ("source", item.source.clone()),
        ("date", item.date.clone()),
        ("image", item.image.clone().unwrap_or_default()),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v))
    .collect()
}

#[derive(Serialize)]
struct RenderContext<'a> {
    items: &'a [Item],
}

/// Emits `{ "items": [...] }`.
pub struct JsonRenderer;

impl Renderer for JsonRenderer {
    fn render(&self, items: &[Item]) -> Result<String> {
        serde_json::to_string_pretty(&RenderContext { items })
            .map_err(|e| FeedbricksError::Render(e.to_string()))
    }
}
