//! emonsim HTTP API
//!
//! Emoncms-style JSON API over the simulated feeds, built with Axum. Every
//! endpoint is a GET with query parameters, matching how emoncms clients
//! talk to a real server.
//!
//! # Endpoints
//!
//! ## Feeds
//! - `GET /feed/list.json` - All feeds with their last time/value
//! - `GET /feed/create.json?name&tag&interval` - Register a feed
//! - `GET /feed/delete.json?id` - Remove a feed
//! - `GET /feed/getmeta.json?id` - Interval, start time, bucket count
//! - `GET /feed/timevalue.json?id` - Last stored time/value
//!
//! ## Data
//! - `GET /feed/data.json?id&start&end&interval` - Ranged samples (ms range)
//! - `GET /feed/deltas.json?id&start&end&interval&padto` - Per-interval deltas
//! - `GET /feed/merged.json?ids&start&end&interval` - Feeds joined on time
//!
//! ## Writes
//! - `GET /feed/insert.json?id&time&value` - Record a sample (time in seconds)
//! - `GET /feed/update.json?id&time&value` - Overwrite a sample
//!
//! ## Health
//! - `GET /health/live` - Liveness probe
//! - `GET /health/ready` - Readiness probe
//! - `GET /health` - Full health status
//!
//! # Example
//!
//! ```rust,ignore
//! use emonsim::api::{serve, ApiConfig, AppState, SimState};
//! use std::sync::Arc;
//! use tokio::sync::RwLock;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let sim = Arc::new(RwLock::new(SimState::new()));
//!     let config = ApiConfig::default();
//!
//!     let state = AppState::new(sim, config.clone());
//!     serve(state, &config).await?;
//!
//!     Ok(())
//! }
//! ```

pub mod dto;
pub mod error;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use state::{ApiConfig, AppState, FeedInfo, SimState};

use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Build the API router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let feed_routes = Router::new()
        .route("/list.json", get(routes::feed::list_feeds))
        .route("/create.json", get(routes::feed::create_feed))
        .route("/delete.json", get(routes::feed::delete_feed))
        .route("/getmeta.json", get(routes::feed::get_meta))
        .route("/timevalue.json", get(routes::feed::time_value))
        .route("/data.json", get(routes::feed::get_data))
        .route("/deltas.json", get(routes::feed::get_deltas))
        .route("/merged.json", get(routes::feed::get_merged))
        .route("/insert.json", get(routes::feed::insert))
        .route("/update.json", get(routes::feed::update));

    let health_routes = Router::new()
        .route("/live", get(routes::health::liveness))
        .route("/ready", get(routes::health::readiness))
        .route("/", get(routes::health::full_health));

    let shared_state = Arc::new(state);

    Router::new()
        .nest("/feed", feed_routes)
        .nest("/health", health_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(shared_state)
}

/// Start the API server
pub async fn serve(state: AppState, config: &ApiConfig) -> Result<(), ApiError> {
    let router = build_router(state);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("emonsim API listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ApiError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("emonsim API shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use http_body_util::BodyExt;
    use tokio::sync::RwLock;
    use tower::util::ServiceExt;

    fn create_test_app() -> Router {
        let sim = Arc::new(RwLock::new(SimState::new()));
        let state = AppState::new(sim, ApiConfig::default());
        build_router(state)
    }

    async fn get_json(app: &Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = app
            .clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, value)
    }

    #[tokio::test]
    async fn test_health_live() {
        let app = create_test_app();
        let (status, _) = get_json(&app, "/health/live").await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health_ready() {
        let app = create_test_app();
        let (status, _) = get_json(&app, "/health/ready").await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health_full() {
        let app = create_test_app();
        let (status, body) = get_json(&app, "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["feeds"], 0);
    }

    #[tokio::test]
    async fn test_list_feeds_empty() {
        let app = create_test_app();
        let (status, body) = get_json(&app, "/feed/list.json").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, serde_json::json!([]));
    }

    #[tokio::test]
    async fn test_create_and_list_feed() {
        let app = create_test_app();

        let (status, body) =
            get_json(&app, "/feed/create.json?name=use&tag=sim&interval=10").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["feedid"], "1");

        let (_, list) = get_json(&app, "/feed/list.json").await;
        assert_eq!(list.as_array().unwrap().len(), 1);
        assert_eq!(list[0]["name"], "use");
        assert_eq!(list[0]["interval"], 10.0);
    }

    #[tokio::test]
    async fn test_create_feed_rejects_bad_interval() {
        let app = create_test_app();
        let (status, _) = get_json(&app, "/feed/create.json?name=use&interval=0").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_insert_then_query_data() {
        let app = create_test_app();

        get_json(&app, "/feed/create.json?name=use&interval=10").await;
        get_json(&app, "/feed/insert.json?id=1&time=15&value=250").await;
        get_json(&app, "/feed/insert.json?id=1&time=25&value=300").await;

        let (status, body) =
            get_json(&app, "/feed/data.json?id=1&start=0&end=30000&interval=10000").await;
        assert_eq!(status, StatusCode::OK);
        // bucket 10 is index 0 and never sampled; bucket 20 comes back
        assert_eq!(body, serde_json::json!([[20.0, 300.0]]));
    }

    #[tokio::test]
    async fn test_getmeta_unknown_feed_is_404() {
        let app = create_test_app();
        let (status, body) = get_json(&app, "/feed/getmeta.json?id=99").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["success"], false);
        assert_eq!(body["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_timevalue_empty_feed_is_null() {
        let app = create_test_app();
        get_json(&app, "/feed/create.json?name=use&interval=10").await;

        let (status, body) = get_json(&app, "/feed/timevalue.json?id=1").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, serde_json::Value::Null);
    }

    #[tokio::test]
    async fn test_insert_unknown_feed_is_404() {
        let app = create_test_app();
        let (status, _) = get_json(&app, "/feed/insert.json?id=99&time=15&value=1").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_data_unknown_feed_is_empty() {
        let app = create_test_app();
        let (status, body) =
            get_json(&app, "/feed/data.json?id=99&start=0&end=1000&interval=100").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, serde_json::json!([]));
    }

    #[tokio::test]
    async fn test_delete_feed() {
        let app = create_test_app();
        get_json(&app, "/feed/create.json?name=use&interval=10").await;

        let (status, body) = get_json(&app, "/feed/delete.json?id=1").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);

        let (status, _) = get_json(&app, "/feed/getmeta.json?id=1").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_merged_requires_ids() {
        let app = create_test_app();
        let (status, _) =
            get_json(&app, "/feed/merged.json?ids=&start=0&end=1000&interval=100").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_merged_joins_two_feeds() {
        let app = create_test_app();
        get_json(&app, "/feed/create.json?name=use&interval=10").await;
        get_json(&app, "/feed/create.json?name=use_kwh&interval=10").await;

        for (t, power, kwh) in [(15, 250, 1), (25, 300, 2), (35, 280, 3)] {
            get_json(
                &app,
                &format!("/feed/insert.json?id=1&time={}&value={}", t, power),
            )
            .await;
            get_json(
                &app,
                &format!("/feed/insert.json?id=2&time={}&value={}", t, kwh),
            )
            .await;
        }

        let (status, body) = get_json(
            &app,
            "/feed/merged.json?ids=1,2&start=0&end=40000&interval=10000",
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let rows = body.as_array().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["time"], 20.0);
        assert_eq!(rows[0]["values"], serde_json::json!([300.0, 2.0]));
    }
}
