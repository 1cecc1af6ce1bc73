//! # emonsim
//!
//! An in-memory, Emoncms-compatible feed simulator. It synthesizes realistic
//! household electricity usage and serves it over emoncms-style
//! `feed/*.json` endpoints, so energy-monitoring dashboards can be developed
//! and tested without a real backend.
//!
//! ## Features
//!
//! - **Feed engine**: fixed-interval bucketed series with gap back-filling
//!   on ingest and rounding-based sampling on query
//! - **Chart utilities**: k-way timestamp merge and cumulative-to-delta
//!   conversion with left padding
//! - **Usage synthesizer**: seeded, reproducible household demand curves
//! - **HTTP facade**: emoncms-style JSON API with Axum
//!
//! ## Modules
//!
//! - [`engine`]: The in-memory feed store
//! - [`chart`]: Pure chart-preparation transforms
//! - [`synth`]: Synthetic usage generation
//! - [`api`]: HTTP server exposing the simulator
//! - [`config`]: TOML + environment configuration
//!
//! ## Quick Start
//!
//! ```rust
//! use emonsim::{cumulative_deltas, FeedEngine};
//!
//! let mut engine = FeedEngine::new();
//! engine.create("kwh", 10.0);
//!
//! engine.post("kwh", 15.0, 1.0);
//! engine.post("kwh", 25.0, 2.5);
//! engine.post("kwh", 35.0, 4.5);
//!
//! // query range is in milliseconds
//! let points = engine.get_data("kwh", 0.0, 40_000.0, 10_000.0);
//! let bars = cumulative_deltas(&points, 4, 10.0);
//! assert_eq!(bars.len(), 4);
//! ```

pub mod api;
pub mod chart;
pub mod config;
pub mod engine;
pub mod synth;

// Re-export top-level types for convenience
pub use engine::{Bucket, DataPoint, FeedEngine, FeedMeta, FeedStorage};

pub use chart::{cumulative_deltas, merge};

pub use api::{
    build_router, serve, ApiConfig, ApiError, ApiResult, AppState, FeedInfo, SimState,
};

pub use config::{
    Config, ConfigError, LoggingConfig, SimulatorConfig, ApiConfig as ConfigApiConfig,
};

pub use synth::{backfill, UsageProfile, UsageSimulator};
