//! Cumulative-to-delta conversion with left padding
//!
//! Bar charts of daily energy usage want one bar per interval, even when the
//! backend has less history than the chart is wide. This takes a cumulative
//! series (a running kWh total) and produces per-interval deltas, padded on
//! the left so the output always reaches the requested width.

use crate::engine::DataPoint;

/// Convert a cumulative series into per-interval deltas, left-padded with
/// zero-valued points spaced `interval` apart until the output holds
/// `pad_to` entries.
///
/// The final padded point carries the first real input's value (not zero) so
/// the padding bridges into the delta sequence. When the input already spans
/// `pad_to` intervals no padding is added. An empty input yields an empty
/// output regardless of `pad_to`.
///
/// The input is expected to be non-decreasing; a decreasing stretch (e.g. an
/// upstream counter reset) passes through as negative deltas, unclamped.
pub fn cumulative_deltas(points: &[DataPoint], pad_to: usize, interval: f64) -> Vec<DataPoint> {
    let Some(first) = points.first() else {
        return Vec::new();
    };

    let mut out = Vec::new();

    let extra = pad_to as i64 - (points.len() as i64 - 1);
    for i in 0..extra {
        let time = first.time - (extra - i) as f64 * interval;
        let value = if i == extra - 1 { first.value } else { 0.0 };
        out.push(DataPoint::new(time, value));
    }

    for pair in points.windows(2) {
        out.push(DataPoint::new(pair[1].time, pair[1].value - pair[0].value));
    }

    out
}
