//! # feedbricks
//!
//! Aggregates posts from several social networks into one normalized,
//! ranked, size-bounded list.
//!
//! ## Architecture
//!
//! ```text
//! Registry → URL builder → Parallel fetcher → Parsers → Aggregation → Renderer
//! ```
//!
//! Every network is fetched concurrently. A network that is misconfigured,
//! unreachable, slow or returns garbage simply contributes no items; it
//! never fails the run.
//!
//! ## Quick Start
//!
//! ```bash
//! # Write ~/.config/feedbricks/config.toml
//! feedbricks init
//!
//! # Show the URLs that would be requested
//! feedbricks urls
//!
//! # Fetch, rank and print
//! feedbricks fetch
//! feedbricks fetch --json --seed 7
//! ```

/// Application context and error types.
pub mod app;

/// Command-line interface using clap.
///
/// - `fetch [--json] [--seed N]` - Run the pipeline and print the result
/// - `urls` - Show the request URL for each configured network
/// - `networks` - List supported networks
/// - `init` - Write a default config file
pub mod cli;

/// Pipeline configuration loaded from TOML.
pub mod config;

/// Core domain models.
///
/// - [`Item`](domain::Item): a post normalized from any network
/// - [`NetworkKind`](domain::NetworkKind): supported networks
pub mod domain;

/// Concurrent fetching.
///
/// - [`Fetcher`](fetcher::Fetcher): Async trait for the transport
/// - [`HttpFetcher`](fetcher::http_fetcher::HttpFetcher): reqwest-based implementation
/// - [`ParallelFetcher`](fetcher::parallel::ParallelFetcher): settle-all fan-out with semaphore
pub mod fetcher;

/// Per-network adapters (URL template, parameters, parser) and their registry.
pub mod network;

/// Merge, rank, truncate and optional random thinning.
pub mod pipeline;

/// Template and JSON output.
pub mod render;

/// Request URL construction.
pub mod request;

pub mod template;

/// HTML stripping and word-boundary truncation.
pub mod text;
