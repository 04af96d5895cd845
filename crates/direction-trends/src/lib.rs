//! Direction Trends
//!
//! Aggregation and ranking engine for per-year publication counts across a
//! catalog of AI research directions, served as an MCP server and a small
//! REST API.
//!
//! # Features
//!
//! - **Pluggable sources**: object store, dashboard API, static index, local file
//! - **Partial results**: one failing direction never blanks the rest
//! - **Cached**: per `(direction, range)` series with TTL
//! - **Stale-safe**: superseded board selections are discarded
//!
//! # Example
//!
//! ```no_run
//! use direction_trends::{config::Config, dashboard::Dashboard, source::build_source};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let dashboard = Dashboard::new(build_source(&config)?, &config);
//!
//!     let ranking = dashboard.rankings(None, 10).await;
//!     println!("{} directions ranked for {}", ranking.entries.len(), ranking.year);
//!     Ok(())
//! }
//! ```

pub mod aggregate;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod formatters;
pub mod models;
pub mod server;
pub mod source;
pub mod tools;

pub use config::Config;
pub use dashboard::Dashboard;
pub use error::{DataUnavailable, SourceError, ToolError};
