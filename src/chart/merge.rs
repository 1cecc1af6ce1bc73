//! K-way time-aligned merge
//!
//! Chart widgets often need several independently fetched feeds (power,
//! cumulative energy, per-phase breakdowns) lined up row by row. This is an
//! inner join over timestamps: a row is emitted only for times present in
//! every input series.

use crate::engine::DataPoint;

/// Merge N individually sorted series into rows keyed by common timestamps.
///
/// Each input must be sorted ascending by time. One cursor per series walks
/// forward; whenever the cursors disagree, the one at the minimum timestamp
/// advances (ties between minima resolve over subsequent iterations). When
/// all cursors agree, a row carrying every series' value at that timestamp
/// is emitted and all cursors advance. Merging stops as soon as any series
/// is exhausted.
///
/// `visit` is called once per emitted row with the time delta from the
/// previously emitted row (0 for the first), the row's timestamp, and its
/// values in input order.
///
/// With no input series the result is empty.
pub fn merge<F>(series: &[Vec<DataPoint>], mut visit: F) -> Vec<DataPoint<Vec<f64>>>
where
    F: FnMut(f64, f64, &[f64]),
{
    if series.is_empty() {
        return Vec::new();
    }

    let mut cursors = vec![0usize; series.len()];
    let mut merged = Vec::new();
    let mut last_emitted: Option<f64> = None;

    loop {
        if cursors.iter().zip(series).any(|(&c, s)| c >= s.len()) {
            break;
        }

        let times: Vec<f64> = cursors
            .iter()
            .zip(series)
            .map(|(&c, s)| s[c].time)
            .collect();
        let min_time = times.iter().copied().fold(f64::INFINITY, f64::min);

        if times.iter().any(|&t| t != min_time) {
            if let Some(lagging) = times.iter().position(|&t| t == min_time) {
                cursors[lagging] += 1;
            }
            continue;
        }

        let values: Vec<f64> = cursors
            .iter()
            .zip(series)
            .map(|(&c, s)| s[c].value)
            .collect();
        let delta = last_emitted.map_or(0.0, |t| min_time - t);
        visit(delta, min_time, &values);
        merged.push(DataPoint::new(min_time, values));
        last_emitted = Some(min_time);

        for cursor in cursors.iter_mut() {
            *cursor += 1;
        }
    }

    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    fn points(pairs: &[(f64, f64)]) -> Vec<DataPoint> {
        pairs.iter().map(|&(t, v)| DataPoint::new(t, v)).collect()
    }

    #[test]
    fn test_merge_inner_joins_on_time() {
        let series = vec![
            points(&[(0.0, 1.0), (10.0, 2.0)]),
            points(&[(0.0, 10.0), (10.0, 20.0)]),
            points(&[(0.0, 100.0), (5.0, 999.0), (10.0, 200.0)]),
        ];

        let merged = merge(&series, |_, _, _| {});

        // t=5 exists only in the third series and is skipped
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0], DataPoint::new(0.0, vec![1.0, 10.0, 100.0]));
        assert_eq!(merged[1], DataPoint::new(10.0, vec![2.0, 20.0, 200.0]));
    }

    #[test]
    fn test_merge_callback_reports_deltas() {
        let series = vec![
            points(&[(0.0, 1.0), (30.0, 2.0), (45.0, 3.0)]),
            points(&[(0.0, 4.0), (30.0, 5.0), (45.0, 6.0)]),
        ];

        let mut deltas = Vec::new();
        merge(&series, |delta, _, _| deltas.push(delta));

        assert_eq!(deltas, vec![0.0, 30.0, 15.0]);
    }

    #[test]
    fn test_merge_no_series() {
        let merged = merge(&[], |_, _, _| panic!("nothing to visit"));
        assert!(merged.is_empty());
    }

    #[test]
    fn test_merge_stops_at_shortest_series() {
        let series = vec![
            points(&[(0.0, 1.0), (10.0, 2.0), (20.0, 3.0)]),
            points(&[(0.0, 4.0)]),
        ];

        let merged = merge(&series, |_, _, _| {});
        assert_eq!(merged, vec![DataPoint::new(0.0, vec![1.0, 4.0])]);
    }

    #[test]
    fn test_merge_with_empty_series() {
        let series = vec![points(&[(0.0, 1.0)]), points(&[])];
        assert!(merge(&series, |_, _, _| {}).is_empty());
    }

    #[test]
    fn test_merge_single_series_passthrough() {
        let series = vec![points(&[(0.0, 1.0), (10.0, 2.0)])];
        let merged = merge(&series, |_, _, _| {});

        assert_eq!(
            merged,
            vec![
                DataPoint::new(0.0, vec![1.0]),
                DataPoint::new(10.0, vec![2.0]),
            ]
        );
    }

    #[test]
    fn test_merge_disjoint_series() {
        let series = vec![
            points(&[(0.0, 1.0), (20.0, 2.0)]),
            points(&[(10.0, 3.0), (30.0, 4.0)]),
        ];
        assert!(merge(&series, |_, _, _| {}).is_empty());
    }

    #[test]
    fn test_merge_is_deterministic() {
        let series = vec![
            points(&[(0.0, 1.0), (10.0, 2.0), (20.0, 3.0)]),
            points(&[(5.0, 9.0), (10.0, 8.0), (20.0, 7.0)]),
        ];

        let first = merge(&series, |_, _, _| {});
        let second = merge(&series, |_, _, _| {});
        assert_eq!(first, second);
    }
}
