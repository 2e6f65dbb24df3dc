use std::cmp::Ordering;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::NetworkKind;

/// A post normalized from any network.
///
/// `rank_key` is `None` when the network's timestamp was missing or could not
/// be parsed; such items rank as the oldest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub network: NetworkKind,
    pub title: String,
    pub body: String,
    pub link: Option<String>,
    pub author: String,
    pub source: String,
    pub date: String,
    pub image: Option<String>,
    pub rank_key: Option<DateTime<Utc>>,
}

impl Item {
    pub fn new(network: NetworkKind) -> Self {
        Self {
            network,
            title: String::new(),
            body: String::new(),
            link: None,
            author: String::new(),
            source: network.label().to_string(),
            date: String::new(),
            image: None,
            rank_key: None,
        }
    }

    /// Items with neither a title nor a body have nothing to show.
    pub fn is_displayable(&self) -> bool {
        !(self.title.trim().is_empty() && self.body.trim().is_empty())
    }

    pub fn compare_by(&self, other: &Item, field: SortField) -> Ordering {
        match field {
            SortField::RankKey => self.rank_key.cmp(&other.rank_key),
            SortField::Date => self.date.cmp(&other.date),
            SortField::Title => self.title.cmp(&other.title),
            SortField::Body => self.body.cmp(&other.body),
            SortField::Author => self.author.cmp(&other.author),
            SortField::Source => self.source.cmp(&other.source),
            SortField::Network => self.network.as_str().cmp(other.network.as_str()),
            SortField::Link => self.link.cmp(&other.link),
            SortField::Image => self.image.cmp(&other.image),
        }
    }
}

/// Item field usable as a sort key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    #[default]
    RankKey,
    Date,
    Title,
    Body,
    Author,
    Source,
    Network,
    Link,
    Image,
}

impl FromStr for SortField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rank_key" | "_raw_date" | "timestamp" => Ok(SortField::RankKey),
            "date" => Ok(SortField::Date),
            "title" => Ok(SortField::Title),
            "body" => Ok(SortField::Body),
            "author" => Ok(SortField::Author),
            "source" => Ok(SortField::Source),
            "network" => Ok(SortField::Network),
            "link" => Ok(SortField::Link),
            "image" => Ok(SortField::Image),
            other => Err(format!("unknown sort key '{}'", other)),
        }
    }
}
