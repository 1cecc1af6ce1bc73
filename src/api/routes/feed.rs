//! Feed Routes
//!
//! Emoncms-style feed endpoints. Management and write endpoints 404 when
//! they name an unknown feed; data queries stay as permissive as the engine
//! underneath and return empty arrays instead.
//!
//! - GET /feed/list.json - All feeds with their last time/value
//! - GET /feed/create.json - Register a feed
//! - GET /feed/delete.json - Remove a feed
//! - GET /feed/getmeta.json - Interval, start time, bucket count
//! - GET /feed/timevalue.json - Last stored time/value
//! - GET /feed/data.json - Ranged samples
//! - GET /feed/deltas.json - Ranged samples as per-interval deltas
//! - GET /feed/merged.json - Several feeds inner-joined on timestamp
//! - GET /feed/insert.json - Record a sample
//! - GET /feed/update.json - Overwrite a sample

use axum::{
    extract::{Query, State},
    Json,
};
use std::sync::Arc;

use crate::api::dto::{
    CreateFeedParams, CreateFeedResponse, DataParams, DeltasParams, FeedIdParams, FeedListItem,
    FeedMetaResponse, MergedParams, MergedRow, StatusResponse, TimeValueResponse, WriteParams,
};
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::chart;

/// GET /feed/list.json
///
/// List all feeds with their metadata and most recent sample, sorted by id.
pub async fn list_feeds(State(state): State<Arc<AppState>>) -> Json<Vec<FeedListItem>> {
    let sim = state.sim.read().await;

    let mut items: Vec<FeedListItem> = sim
        .infos
        .values()
        .map(|info| {
            let interval = sim
                .engine
                .meta(&info.id)
                .map(|m| m.interval)
                .unwrap_or_default();
            let last = sim.engine.last_value(&info.id);

            FeedListItem {
                id: info.id.clone(),
                name: info.name.clone(),
                tag: info.tag.clone(),
                interval,
                time: last.map(|p| p.time),
                value: last.and_then(|p| p.value),
            }
        })
        .collect();

    items.sort_by_key(|item| item.id.parse::<u64>().unwrap_or(u64::MAX));

    Json(items)
}

/// GET /feed/create.json?name=use&tag=sim&interval=10
pub async fn create_feed(
    State(state): State<Arc<AppState>>,
    Query(params): Query<CreateFeedParams>,
) -> ApiResult<Json<CreateFeedResponse>> {
    if params.name.is_empty() {
        return Err(ApiError::Validation("Feed name cannot be empty".to_string()));
    }
    if params.interval <= 0.0 {
        return Err(ApiError::Validation(format!(
            "Feed interval must be positive, got {}",
            params.interval
        )));
    }

    let mut sim = state.sim.write().await;
    let id = sim.create_feed(&params.name, &params.tag, params.interval);

    tracing::info!(feed_id = %id, name = %params.name, interval = params.interval, "Created feed");

    Ok(Json(CreateFeedResponse {
        success: true,
        feedid: id,
    }))
}

/// GET /feed/delete.json?id=1
///
/// Removing an unknown feed is a no-op, like the engine underneath.
pub async fn delete_feed(
    State(state): State<Arc<AppState>>,
    Query(params): Query<FeedIdParams>,
) -> Json<StatusResponse> {
    let mut sim = state.sim.write().await;
    sim.delete_feed(&params.id);

    tracing::info!(feed_id = %params.id, "Deleted feed");

    Json(StatusResponse { success: true })
}

/// GET /feed/getmeta.json?id=1
pub async fn get_meta(
    State(state): State<Arc<AppState>>,
    Query(params): Query<FeedIdParams>,
) -> ApiResult<Json<FeedMetaResponse>> {
    let sim = state.sim.read().await;

    let meta = sim
        .engine
        .meta(&params.id)
        .ok_or_else(|| ApiError::UnknownFeed(params.id.clone()))?;
    let npoints = sim.engine.n_points(&params.id).unwrap_or(0);

    Ok(Json(FeedMetaResponse {
        id: params.id,
        interval: meta.interval,
        start_time: meta.start_time,
        npoints,
    }))
}

/// GET /feed/timevalue.json?id=1
///
/// The last stored time/value, or JSON `null` for a feed with no samples.
pub async fn time_value(
    State(state): State<Arc<AppState>>,
    Query(params): Query<FeedIdParams>,
) -> ApiResult<Json<Option<TimeValueResponse>>> {
    let sim = state.sim.read().await;

    if !sim.engine.contains(&params.id) {
        return Err(ApiError::UnknownFeed(params.id));
    }

    let last = sim
        .engine
        .last_value(&params.id)
        .map(|p| TimeValueResponse {
            time: p.time,
            value: p.value,
        });

    Ok(Json(last))
}

/// GET /feed/data.json?id=1&start=0&end=60000&interval=10000
///
/// Ranged samples as `[[time, value], ...]` pairs. Start, end and interval
/// are in milliseconds; returned times are in seconds. Unknown feeds and
/// degenerate ranges yield an empty array.
pub async fn get_data(
    State(state): State<Arc<AppState>>,
    Query(params): Query<DataParams>,
) -> Json<Vec<(f64, f64)>> {
    let sim = state.sim.read().await;

    let pairs = sim
        .engine
        .get_data(&params.id, params.start, params.end, params.interval)
        .into_iter()
        .map(|p| (p.time, p.value))
        .collect();

    Json(pairs)
}

/// GET /feed/deltas.json?id=2&start=0&end=60000&interval=10000&padto=7
///
/// Ranged samples of a cumulative feed converted to per-interval deltas,
/// left-padded to at least `padto` entries. The padding step is the query
/// interval converted to seconds, matching the returned timestamps.
pub async fn get_deltas(
    State(state): State<Arc<AppState>>,
    Query(params): Query<DeltasParams>,
) -> Json<Vec<(f64, f64)>> {
    let sim = state.sim.read().await;

    let points = sim
        .engine
        .get_data(&params.id, params.start, params.end, params.interval);
    let deltas = chart::cumulative_deltas(&points, params.padto, params.interval / 1000.0);

    Json(deltas.into_iter().map(|p| (p.time, p.value)).collect())
}

/// GET /feed/merged.json?ids=1,2&start=0&end=60000&interval=10000
///
/// Several feeds sampled over the same range and inner-joined on timestamp.
/// Rows only appear for times present in every requested feed.
pub async fn get_merged(
    State(state): State<Arc<AppState>>,
    Query(params): Query<MergedParams>,
) -> ApiResult<Json<Vec<MergedRow>>> {
    let ids: Vec<&str> = params
        .ids
        .split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .collect();
    if ids.is_empty() {
        return Err(ApiError::Validation("No feed ids given".to_string()));
    }

    let sim = state.sim.read().await;

    let series: Vec<_> = ids
        .iter()
        .map(|id| {
            sim.engine
                .get_data(id, params.start, params.end, params.interval)
        })
        .collect();

    let rows = chart::merge(&series, |_, _, _| {})
        .into_iter()
        .map(|p| MergedRow {
            time: p.time,
            values: p.value,
        })
        .collect();

    Ok(Json(rows))
}

/// GET /feed/insert.json?id=1&time=15&value=250
///
/// Record a sample; time is in seconds. Out-of-order samples are silently
/// dropped by the engine, so this always reports success for a known feed.
pub async fn insert(
    State(state): State<Arc<AppState>>,
    Query(params): Query<WriteParams>,
) -> ApiResult<Json<StatusResponse>> {
    let mut sim = state.sim.write().await;

    if !sim.engine.contains(&params.id) {
        return Err(ApiError::UnknownFeed(params.id));
    }
    sim.engine.post(&params.id, params.time, params.value);

    Ok(Json(StatusResponse { success: true }))
}

/// GET /feed/update.json?id=1&time=15&value=250
///
/// Overwrite the bucket addressed by `time`, or append when it does not
/// exist yet; time is in seconds.
pub async fn update(
    State(state): State<Arc<AppState>>,
    Query(params): Query<WriteParams>,
) -> ApiResult<Json<StatusResponse>> {
    let mut sim = state.sim.write().await;

    if !sim.engine.contains(&params.id) {
        return Err(ApiError::UnknownFeed(params.id));
    }
    sim.engine.update(&params.id, params.time, params.value);

    Ok(Json(StatusResponse { success: true }))
}
