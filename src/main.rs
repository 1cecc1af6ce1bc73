//! emonsim server
//!
//! Boots the simulator, backfills synthetic household usage into a power
//! feed and its cumulative kWh companion, then serves the emoncms-style
//! HTTP API. With `--no-live` the feeds are frozen after backfill, which
//! keeps responses fully reproducible for a given seed.
//!
//! Configuration comes from a TOML file (`--config`, or the default search
//! paths), `EMONSIM_*` environment variables, and CLI flags, in that order
//! of precedence.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use emonsim::api::{serve, ApiConfig, AppState, SimState};
use emonsim::config::{generate_default_config, Config};
use emonsim::synth::{backfill, UsageProfile, UsageSimulator};

#[derive(Parser)]
#[command(name = "emonsim")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "In-memory emoncms-compatible feed simulator")]
struct Cli {
    /// Path to a TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Host to bind to (overrides config)
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Days of history to backfill (overrides config)
    #[arg(long)]
    history_days: Option<u32>,

    /// RNG seed for the usage synthesizer (overrides config)
    #[arg(long)]
    seed: Option<u64>,

    /// Freeze the feeds after backfill instead of posting live samples
    #[arg(long)]
    no_live: bool,

    /// Print a default config file to stdout and exit
    #[arg(long)]
    print_config: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.print_config {
        print!("{}", generate_default_config());
        return Ok(());
    }

    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    if let Some(host) = cli.host {
        config.api.host = host;
    }
    if let Some(port) = cli.port {
        config.api.port = port;
    }
    if let Some(days) = cli.history_days {
        config.simulator.history_days = days;
    }
    if let Some(seed) = cli.seed {
        config.simulator.seed = seed;
    }
    if cli.no_live {
        config.simulator.live = false;
    }

    init_tracing(&config);

    tracing::info!("emonsim v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        seed = config.simulator.seed,
        history_days = config.simulator.history_days,
        live = config.simulator.live,
        "Simulator configuration"
    );

    // Seed the engine with synthetic history
    let interval = config.simulator.feed_interval_secs;
    let now = chrono::Utc::now().timestamp() as f64;
    let from = now - config.simulator.history_days as f64 * 86_400.0;

    let mut sim_state = SimState::new();
    let power_id = sim_state.create_feed("use", "sim", interval);
    let kwh_id = sim_state.create_feed("use_kwh", "sim", interval);

    let profile = UsageProfile {
        base_load_watts: config.simulator.base_load_watts,
        daytime_swing_watts: config.simulator.daytime_swing_watts,
        ..Default::default()
    };
    let mut usage = UsageSimulator::new(profile, config.simulator.seed);

    backfill(
        &mut sim_state.engine,
        &mut usage,
        &power_id,
        &kwh_id,
        from,
        now,
        interval,
    );
    tracing::info!(
        power_points = sim_state.engine.n_points(&power_id).unwrap_or(0),
        kwh_points = sim_state.engine.n_points(&kwh_id).unwrap_or(0),
        "Backfilled synthetic history"
    );

    let sim = Arc::new(RwLock::new(sim_state));

    // Keep the feeds moving while the server runs
    let ticker = if config.simulator.live {
        Some(start_live_ticker(
            Arc::clone(&sim),
            usage,
            power_id,
            kwh_id,
            interval,
        ))
    } else {
        None
    };

    let api_config = ApiConfig::new(config.api.host.clone(), config.api.port);
    let state = AppState::new(Arc::clone(&sim), api_config.clone());

    serve(state, &api_config).await?;

    if let Some(handle) = ticker {
        handle.abort();
    }
    tracing::info!("emonsim stopped");
    Ok(())
}

/// Initialize the tracing subscriber from logging config
fn init_tracing(config: &Config) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("emonsim={},tower_http=debug", config.logging.level).into()
    });

    if config.logging.format == "json" {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

/// Post a fresh sample pair on every feed interval
fn start_live_ticker(
    sim: Arc<RwLock<SimState>>,
    mut usage: UsageSimulator,
    power_id: String,
    kwh_id: String,
    interval: f64,
) -> tokio::task::JoinHandle<()> {
    // sub-second intervals make no sense for these feeds
    let tick = Duration::from_secs_f64(interval.max(1.0));

    tokio::spawn(async move {
        let mut ticker = tokio::time::interval_at(tokio::time::Instant::now() + tick, tick);

        loop {
            ticker.tick().await;

            let now = chrono::Utc::now().timestamp() as f64;
            let (watts, kwh) = usage.step(now);

            let mut sim = sim.write().await;
            sim.engine.post(&power_id, now, watts);
            sim.engine.post(&kwh_id, now, kwh);

            tracing::trace!(watts, kwh, "Posted live sample");
        }
    })
}
