//! Core data types for the feed engine
//!
//! This module defines the fundamental types shared by the engine and the
//! chart utilities:
//! - `DataPoint`: A single time-series sample
//! - `Bucket`: One fixed-interval slot in a feed's storage
//! - `FeedMeta`: Per-feed metadata (interval, first-sample time)

use serde::{Deserialize, Serialize};

/// A single time-series sample: a timestamp paired with a value.
///
/// Timestamps are Unix epoch seconds. The type is generic over the value so
/// the same shape serves plain samples (`f64`), samples with gaps
/// (`Option<f64>`), and merged rows (`Vec<f64>`). Two points are equal when
/// both fields are equal; there is no identity beyond that.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DataPoint<V = f64> {
    /// Unix timestamp in seconds
    pub time: f64,
    /// The sampled value
    pub value: V,
}

impl<V> DataPoint<V> {
    /// Create a new data point
    pub fn new(time: f64, value: V) -> Self {
        Self { time, value }
    }
}

/// One fixed-interval slot in a feed's storage.
///
/// A `None` value marks a gap: an interval that passed without a sample.
/// Gap buckets keep index arithmetic against the feed's start time valid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bucket {
    /// Bucketed timestamp in seconds (a multiple of the feed interval)
    pub time: f64,
    /// Sampled value, or `None` for a missed interval
    pub value: Option<f64>,
}

/// Feed metadata as reported by [`crate::engine::FeedEngine::meta`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FeedMeta {
    /// Fixed sampling interval in seconds
    pub interval: f64,
    /// Time of the first recorded sample; `None` until the first post
    pub start_time: Option<f64>,
}
