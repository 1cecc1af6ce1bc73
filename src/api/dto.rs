//! Data Transfer Objects
//!
//! Query-parameter and response types for the emoncms-style endpoints.
//! Emoncms passes everything as GET query strings (`?id=1&start=...`), so
//! requests deserialize from query parameters rather than JSON bodies.

use serde::{Deserialize, Serialize};

// ============================================
// FEED MANAGEMENT DTOs
// ============================================

/// Parameters naming a single feed
#[derive(Debug, Deserialize)]
pub struct FeedIdParams {
    pub id: String,
}

/// Parameters for `feed/create.json`
#[derive(Debug, Deserialize)]
pub struct CreateFeedParams {
    /// Feed name (e.g. "use", "use_kwh")
    pub name: String,
    /// Grouping tag
    #[serde(default)]
    pub tag: String,
    /// Sampling interval in seconds
    #[serde(default = "default_interval")]
    pub interval: f64,
}

fn default_interval() -> f64 {
    10.0
}

/// Response for `feed/create.json`
#[derive(Debug, Serialize)]
pub struct CreateFeedResponse {
    pub success: bool,
    pub feedid: String,
}

/// Generic success acknowledgement
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub success: bool,
}

/// One entry of `feed/list.json`
#[derive(Debug, Serialize)]
pub struct FeedListItem {
    pub id: String,
    pub name: String,
    pub tag: String,
    pub interval: f64,
    /// Time of the last stored bucket, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<f64>,
    /// Value of the last stored bucket, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
}

/// Response for `feed/getmeta.json`
#[derive(Debug, Serialize)]
pub struct FeedMetaResponse {
    pub id: String,
    pub interval: f64,
    pub start_time: Option<f64>,
    pub npoints: usize,
}

/// Response for `feed/timevalue.json`
#[derive(Debug, Serialize)]
pub struct TimeValueResponse {
    pub time: f64,
    pub value: Option<f64>,
}

// ============================================
// DATA QUERY DTOs
// ============================================

/// Parameters for `feed/data.json`; start/end/interval in milliseconds
#[derive(Debug, Deserialize)]
pub struct DataParams {
    pub id: String,
    pub start: f64,
    pub end: f64,
    pub interval: f64,
}

/// Parameters for `feed/deltas.json`
#[derive(Debug, Deserialize)]
pub struct DeltasParams {
    pub id: String,
    pub start: f64,
    pub end: f64,
    pub interval: f64,
    /// Minimum number of bars in the output; 0 means no padding
    #[serde(default)]
    pub padto: usize,
}

/// Parameters for `feed/merged.json`
#[derive(Debug, Deserialize)]
pub struct MergedParams {
    /// Comma-separated feed ids
    pub ids: String,
    pub start: f64,
    pub end: f64,
    pub interval: f64,
}

/// One inner-joined row of `feed/merged.json`
#[derive(Debug, Serialize)]
pub struct MergedRow {
    pub time: f64,
    /// One value per requested feed, in request order
    pub values: Vec<f64>,
}

// ============================================
// WRITE DTOs
// ============================================

/// Parameters for `feed/insert.json` and `feed/update.json`; time in seconds
#[derive(Debug, Deserialize)]
pub struct WriteParams {
    pub id: String,
    pub time: f64,
    pub value: f64,
}

// ============================================
// HEALTH DTOs
// ============================================

/// Full health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Overall status: healthy
    pub status: String,
    /// Number of registered feeds
    pub feeds: usize,
    /// Server uptime in seconds
    pub uptime_seconds: u64,
    /// Application version
    pub version: String,
}
