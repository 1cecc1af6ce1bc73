//! Chart data preparation
//!
//! Pure transformations over already-fetched samples, used to shape feed
//! data for chart rendering:
//!
//! - **merge**: k-way inner join of independently sampled series on timestamp
//! - **delta**: cumulative-energy series to per-interval deltas with left
//!   padding
//!
//! Neither function touches the engine; both take plain slices and are
//! deterministic for identical inputs.

pub mod delta;
pub mod merge;

pub use delta::cumulative_deltas;
pub use merge::merge;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::FeedEngine;

    #[test]
    fn test_sampled_feed_through_both_transforms_is_stable() {
        // the full dashboard pipeline: engine query -> delta bars / merged rows
        let mut engine = FeedEngine::new();
        engine.create("power", 10.0);
        engine.create("kwh", 10.0);

        for i in 0..20 {
            let t = 15.0 + i as f64 * 10.0;
            engine.post("power", t, 200.0 + (i % 5) as f64 * 40.0);
            engine.post("kwh", t, i as f64 * 0.05);
        }

        let power = engine.get_data("power", 0.0, 220_000.0, 10_000.0);
        let kwh = engine.get_data("kwh", 0.0, 220_000.0, 10_000.0);
        assert!(!power.is_empty());
        assert!(!kwh.is_empty());

        let bars_a = cumulative_deltas(&kwh, 30, 10.0);
        let bars_b = cumulative_deltas(&kwh, 30, 10.0);
        assert_eq!(bars_a, bars_b);

        let series = vec![power, kwh];
        let rows_a = merge(&series, |_, _, _| {});
        let rows_b = merge(&series, |_, _, _| {});
        assert!(!rows_a.is_empty());
        assert_eq!(rows_a, rows_b);
    }
}
