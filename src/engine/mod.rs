//! Synthetic feed engine
//!
//! In-memory emulation of an emoncms feed store, used to stand in for a real
//! telemetry backend during dashboard testing and demos:
//!
//! - **types**: Core data structures (DataPoint, Bucket, FeedMeta)
//! - **feed**: Per-feed fixed-interval bucket storage
//! - **registry**: The engine owning all feeds, keyed by opaque string id
//!
//! Internal storage runs on epoch seconds; the ranged query
//! ([`FeedEngine::get_data`]) takes milliseconds, matching the emoncms
//! `feed/data` API boundary.
//!
//! The engine holds mutable state and is not thread-safe. Confine it to a
//! single task, or guard it externally the way [`crate::api`] does with a
//! `tokio::sync::RwLock`.
//!
//! # Example
//!
//! ```rust
//! use emonsim::engine::FeedEngine;
//!
//! let mut engine = FeedEngine::new();
//! engine.create("1", 10.0);
//!
//! engine.post("1", 15.0, 250.0);
//! engine.post("1", 25.0, 300.0);
//!
//! let points = engine.get_data("1", 0.0, 30_000.0, 10_000.0);
//! assert_eq!(points.len(), 1);
//! ```

pub mod feed;
pub mod registry;
pub mod types;

// Re-export commonly used types
pub use feed::FeedStorage;
pub use registry::FeedEngine;
pub use types::{Bucket, DataPoint, FeedMeta};
