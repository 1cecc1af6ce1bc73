//! Application State
//!
//! Shared state accessible by all API handlers. The feed engine itself is
//! not thread-safe, so all mutable simulator state sits behind a single
//! `tokio::sync::RwLock`; handlers take the lock for the duration of one
//! operation.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::RwLock;

use crate::engine::FeedEngine;

/// Descriptive fields for a feed, kept alongside the engine.
///
/// The engine only knows opaque string ids; names and tags are an API-level
/// concern, like the feed table of a real emoncms instance.
#[derive(Debug, Clone)]
pub struct FeedInfo {
    pub id: String,
    pub name: String,
    pub tag: String,
}

/// Mutable simulator state behind one lock: the engine plus the API-side
/// feed registry and id counter.
#[derive(Debug)]
pub struct SimState {
    pub engine: FeedEngine,
    pub infos: HashMap<String, FeedInfo>,
    next_id: u64,
}

impl SimState {
    pub fn new() -> Self {
        Self {
            engine: FeedEngine::new(),
            infos: HashMap::new(),
            next_id: 1,
        }
    }

    /// Register a feed under a freshly allocated numeric id and return it
    pub fn create_feed(&mut self, name: &str, tag: &str, interval: f64) -> String {
        let id = self.next_id.to_string();
        self.next_id += 1;

        self.engine.create(id.clone(), interval);
        self.infos.insert(
            id.clone(),
            FeedInfo {
                id: id.clone(),
                name: name.to_string(),
                tag: tag.to_string(),
            },
        );
        id
    }

    /// Remove a feed and its descriptive record. No-op if absent.
    pub fn delete_feed(&mut self, id: &str) {
        self.engine.delete(id);
        self.infos.remove(id);
    }
}

impl Default for SimState {
    fn default() -> Self {
        Self::new()
    }
}

/// Shared application state for all handlers
#[derive(Clone)]
pub struct AppState {
    /// Simulator state (engine + feed registry), guarded by one lock
    pub sim: Arc<RwLock<SimState>>,
    /// API configuration
    pub config: Arc<ApiConfig>,
    /// Server start time for uptime tracking
    pub start_time: Instant,
}

impl AppState {
    pub fn new(sim: Arc<RwLock<SimState>>, config: ApiConfig) -> Self {
        Self {
            sim,
            config: Arc::new(config),
            start_time: Instant::now(),
        }
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}

/// API server configuration
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl ApiConfig {
    /// Create config with custom host and port
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// Get the socket address string
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
