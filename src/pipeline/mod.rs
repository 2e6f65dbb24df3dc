//! Fetch, parse, merge, rank and trim.

use std::sync::Arc;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::app::Result;
use crate::config::{PipelineConfig, SortDirection, SortKey};
use crate::domain::{Item, SortField};
use crate::fetcher::parallel::{FetchOutcome, ParallelFetcher};
use crate::network::{AdapterRegistry, ParseOptions};

/// Validated ranking and display-budget settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregateOptions {
    pub max_items: usize,
    pub sort_key: SortKey,
    pub sort_direction: SortDirection,
    pub randomize: bool,
    /// Applied after the shuffle; equals `max_items` unless configured.
    pub randomize_max_items: usize,
}

impl Default for AggregateOptions {
    fn default() -> Self {
        let max_items = crate::config::DEFAULT_MAX_ITEMS as usize;
        Self {
            max_items,
            sort_key: SortKey::default(),
            sort_direction: SortDirection::Desc,
            randomize: false,
            randomize_max_items: max_items,
        }
    }
}

/// Combine per-network results into the final display list.
///
/// Absent results contribute nothing. Items are stably sorted unless sorting
/// is disabled, cut to `max_items`, and when randomizing, the surviving top
/// items are shuffled with `rng` and cut again to `randomize_max_items`.
pub fn aggregate<R: Rng + ?Sized>(
    sequences: Vec<Option<Vec<Item>>>,
    options: &AggregateOptions,
    rng: &mut R,
) -> Vec<Item> {
    let mut items: Vec<Item> = sequences.into_iter().flatten().flatten().collect();

    if let SortKey::Field(field) = options.sort_key {
        sort_items(&mut items, field, options.sort_direction);
    }

    items.truncate(options.max_items);

    if options.randomize {
        items.shuffle(rng);
        items.truncate(options.randomize_max_items);
    }

    items
}

/// Stable sort; equal keys keep their input order in both directions.
pub fn sort_items(items: &mut [Item], field: SortField, direction: SortDirection) {
    items.sort_by(|a, b| {
        let ord = a.compare_by(b, field);
        match direction {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        }
    });
}

pub struct Pipeline {
    registry: Arc<AdapterRegistry>,
    fetcher: ParallelFetcher,
}

impl Pipeline {
    pub fn new(registry: Arc<AdapterRegistry>, fetcher: ParallelFetcher) -> Self {
        Self { registry, fetcher }
    }

    /// Run one full cycle for `config`.
    ///
    /// Fails only when the configuration itself is invalid; per-network
    /// failures just leave that network's items out.
    pub async fn run<R: Rng + ?Sized>(
        &self,
        config: &PipelineConfig,
        rng: &mut R,
    ) -> Result<Vec<Item>> {
        let options = config.aggregate_options()?;
        let parse_options = config.parse_options();

        let outcomes = self
            .fetcher
            .fetch_all(&self.registry, &config.networks, config.secure)
            .await;

        let sequences: Vec<Option<Vec<Item>>> = outcomes
            .into_iter()
            .map(|outcome| self.parse_outcome(outcome, &parse_options))
            .collect();

        let answered = sequences.iter().filter(|s| s.is_some()).count();
        let items = aggregate(sequences, &options, rng);

        tracing::info!(
            "Aggregated {} items from {}/{} networks",
            items.len(),
            answered,
            config.networks.len()
        );

        Ok(items)
    }

    fn parse_outcome(&self, outcome: FetchOutcome, options: &ParseOptions) -> Option<Vec<Item>> {
        let body = outcome.body?;
        let adapter = self.registry.resolve(&outcome.network).ok()?;

        match (adapter.parse)(&body, options) {
            Ok(items) => {
                tracing::debug!("Parsed {} items from {}", items.len(), adapter.kind);
                Some(items)
            }
            Err(e) => {
                tracing::warn!("Discarding {} response: {}", adapter.kind, e);
                None
            }
        }
    }
}
