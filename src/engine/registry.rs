//! Feed registry
//!
//! Owns every simulated feed, keyed by an opaque string id. This is the
//! single entry point the rest of the crate talks to. The contract is
//! permissive throughout: operations on unknown ids return `None` or an
//! empty collection instead of erroring, which is the behavior a test
//! fixture standing in for a real backend wants.

use std::collections::HashMap;

use crate::engine::feed::FeedStorage;
use crate::engine::types::{DataPoint, FeedMeta};

/// In-memory registry of simulated feeds.
///
/// An explicit, injectable collection - no global state. Not thread-safe;
/// confine it to one task or guard it externally.
#[derive(Debug, Default)]
pub struct FeedEngine {
    feeds: HashMap<String, FeedStorage>,
}

impl FeedEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new empty feed, replacing any existing feed with this id
    pub fn create(&mut self, id: impl Into<String>, interval: f64) {
        self.feeds.insert(id.into(), FeedStorage::new(interval));
    }

    /// Remove a feed. No-op if absent.
    pub fn delete(&mut self, id: &str) {
        self.feeds.remove(id);
    }

    /// Whether a feed with this id exists
    pub fn contains(&self, id: &str) -> bool {
        self.feeds.contains_key(id)
    }

    /// Ids of all registered feeds, in no particular order
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.feeds.keys().map(String::as_str)
    }

    /// Number of registered feeds
    pub fn len(&self) -> usize {
        self.feeds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.feeds.is_empty()
    }

    /// Interval and first-sample time, or `None` for an unknown id
    pub fn meta(&self, id: &str) -> Option<FeedMeta> {
        self.feeds.get(id).map(FeedStorage::meta)
    }

    /// Stored bucket count (gap buckets included), or `None` for an unknown id
    pub fn n_points(&self, id: &str) -> Option<usize> {
        self.feeds.get(id).map(FeedStorage::len)
    }

    /// Record a sample on a feed. No-op for an unknown id.
    pub fn post(&mut self, id: &str, time: f64, value: f64) {
        if let Some(feed) = self.feeds.get_mut(id) {
            feed.post(time, value);
        }
    }

    /// Overwrite (or append) a sample on a feed. No-op for an unknown id.
    pub fn update(&mut self, id: &str, time: f64, value: f64) {
        if let Some(feed) = self.feeds.get_mut(id) {
            feed.update(time, value);
        }
    }

    /// The most recently stored bucket of a feed, or `None` when the feed is
    /// unknown or empty
    pub fn last_value(&self, id: &str) -> Option<DataPoint<Option<f64>>> {
        self.feeds.get(id).and_then(FeedStorage::last_value)
    }

    /// Sample a feed over `[start, end)` at `interval` spacing, all in
    /// milliseconds. Empty for an unknown id.
    pub fn get_data(&self, id: &str, start: f64, end: f64, interval: f64) -> Vec<DataPoint> {
        self.feeds
            .get(id)
            .map(|feed| feed.get_data(start, end, interval))
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_id_is_permissive() {
        let mut engine = FeedEngine::new();

        assert_eq!(engine.meta("nope"), None);
        assert_eq!(engine.n_points("nope"), None);
        assert_eq!(engine.last_value("nope"), None);
        assert!(engine.get_data("nope", 0.0, 1_000.0, 100.0).is_empty());

        // mutations on unknown ids do nothing
        engine.post("nope", 100.0, 1.0);
        engine.update("nope", 100.0, 1.0);
        engine.delete("nope");
        assert!(engine.is_empty());
    }

    #[test]
    fn test_create_is_idempotent_register() {
        let mut engine = FeedEngine::new();
        engine.create("1", 10.0);
        engine.post("1", 15.0, 1.0);
        assert_eq!(engine.n_points("1"), Some(1));

        // re-creating replaces the series wholesale
        engine.create("1", 30.0);
        assert_eq!(engine.n_points("1"), Some(0));
        assert_eq!(
            engine.meta("1"),
            Some(FeedMeta {
                interval: 30.0,
                start_time: None
            })
        );
    }

    #[test]
    fn test_delete_removes_feed() {
        let mut engine = FeedEngine::new();
        engine.create("1", 10.0);
        engine.create("2", 10.0);
        assert_eq!(engine.len(), 2);

        engine.delete("1");
        assert_eq!(engine.len(), 1);
        assert!(!engine.contains("1"));
        assert!(engine.contains("2"));
    }

    #[test]
    fn test_n_points_counts_gap_buckets() {
        let mut engine = FeedEngine::new();
        engine.create("power", 10.0);

        engine.post("power", 15.0, 100.0);
        engine.post("power", 65.0, 200.0);

        // buckets 10, [20..50 gaps], 60
        assert_eq!(engine.n_points("power"), Some(6));
        assert_eq!(
            engine.last_value("power"),
            Some(DataPoint::new(60.0, Some(200.0)))
        );
    }

    #[test]
    fn test_last_value_empty_feed() {
        let mut engine = FeedEngine::new();
        engine.create("f", 10.0);
        assert_eq!(engine.last_value("f"), None);
    }
}
