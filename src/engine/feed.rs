//! Per-feed bucket storage
//!
//! A feed is an append-only sequence of fixed-interval buckets. Ingestion
//! (`post`) back-fills skipped intervals with gap buckets so that bucket
//! index `i` always addresses `start_time + i * interval`; querying
//! (`get_data`) samples buckets by rounding and silently skips gaps instead
//! of padding. Both paths are covered by tests - they are intentionally not
//! symmetric.

use crate::engine::types::{Bucket, DataPoint, FeedMeta};

/// Fixed-interval, in-memory storage for a single feed.
///
/// Holds mutable state and is not thread-safe: confine it to one task or
/// guard it externally (the HTTP layer wraps the whole registry in a
/// `tokio::sync::RwLock`).
#[derive(Debug, Clone)]
pub struct FeedStorage {
    /// Sampling interval in seconds, immutable after creation
    interval: f64,
    /// Raw time of the first post; all bucket indices are relative to this
    start_time: Option<f64>,
    /// Buckets in increasing time order
    data: Vec<Bucket>,
}

impl FeedStorage {
    /// Create an empty feed with the given sampling interval (seconds)
    pub fn new(interval: f64) -> Self {
        Self {
            interval,
            start_time: None,
            data: Vec::new(),
        }
    }

    /// The feed's fixed sampling interval in seconds
    pub fn interval(&self) -> f64 {
        self.interval
    }

    /// Time of the first recorded sample, if any
    pub fn start_time(&self) -> Option<f64> {
        self.start_time
    }

    /// Interval and first-sample time
    pub fn meta(&self) -> FeedMeta {
        FeedMeta {
            interval: self.interval,
            start_time: self.start_time,
        }
    }

    /// Number of stored buckets, gap buckets included
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Record a sample.
    ///
    /// The time is floored onto the feed's interval grid. The first post
    /// fixes `start_time` to the raw post time (not the bucketed time).
    /// Later posts whose bucketed time is at or before `start_time` are
    /// silently dropped. Intervals skipped between the last stored bucket
    /// and the new one are back-filled with gap buckets.
    pub fn post(&mut self, time: f64, value: f64) {
        let bucketed = (time / self.interval).floor() * self.interval;

        let Some(start_time) = self.start_time else {
            self.start_time = Some(time);
            self.data.push(Bucket {
                time: bucketed,
                value: Some(value),
            });
            return;
        };

        if bucketed <= start_time {
            return;
        }

        if let Some(last) = self.data.last() {
            let mut next = last.time + self.interval;
            while next < bucketed {
                self.data.push(Bucket {
                    time: next,
                    value: None,
                });
                next += self.interval;
            }
        }

        self.data.push(Bucket {
            time: bucketed,
            value: Some(value),
        });
    }

    /// Overwrite the bucket addressed by `time`.
    ///
    /// The target index is computed from `start_time` and the interval. An
    /// in-bounds index overwrites that bucket's time and value in place; an
    /// out-of-bounds index falls back to [`FeedStorage::post`]. A feed with
    /// no samples yet is left untouched.
    pub fn update(&mut self, time: f64, value: f64) {
        let Some(start_time) = self.start_time else {
            return;
        };

        let index = ((time - start_time) / self.interval).floor();
        if index >= 0.0 && (index as usize) < self.data.len() {
            let bucketed = (time / self.interval).floor() * self.interval;
            self.data[index as usize] = Bucket {
                time: bucketed,
                value: Some(value),
            };
        } else {
            self.post(time, value);
        }
    }

    /// The most recently stored bucket; its value may be absent
    pub fn last_value(&self) -> Option<DataPoint<Option<f64>>> {
        self.data.last().map(|b| DataPoint::new(b.time, b.value))
    }

    /// Sample stored buckets over `[start, end)` at `interval` spacing.
    ///
    /// `start`, `end` and `interval` are in MILLISECONDS - the query
    /// boundary matches the emoncms `feed/data` API - while storage is in
    /// seconds; the /1000 scaling happens here. Each output step maps to the
    /// nearest bucket by rounding; steps that land out of range, on bucket
    /// zero, or on a gap bucket are skipped rather than padded. Returns the
    /// stored points (bucket time in seconds, bucket value).
    pub fn get_data(&self, start: f64, end: f64, interval: f64) -> Vec<DataPoint> {
        if start >= end || interval <= 0.0 {
            return Vec::new();
        }
        let Some(start_time) = self.start_time else {
            return Vec::new();
        };

        let mut points = Vec::new();
        let mut t = start;
        while t < end {
            let index = ((t / 1000.0 - start_time) / self.interval).round();
            if index > 0.0 && (index as usize) < self.data.len() {
                let bucket = &self.data[index as usize];
                if let Some(value) = bucket.value {
                    points.push(DataPoint::new(bucket.time, value));
                }
            }
            t += interval;
        }
        points
    }
}
