//! newswatch — Binary Entrypoint
//! Boots the polling worker and the Axum HTTP server on one runtime.

use std::net::SocketAddr;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use newswatch::api::{self, AppState};
use newswatch::config::AppConfig;
use newswatch::feed::HttpFeedSource;
use newswatch::notify::ConsoleNotifier;
use newswatch::poller::{request_stop, spawn_poller, Pipeline, PollerCfg};
use newswatch::remote::{HfClassifier, ZeroShotClassifier};
use newswatch::store::{CityCell, NewsStore};

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("newswatch=info,warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env in local/dev; no-op when absent.
    let _ = dotenvy::dotenv();
    init_tracing();

    let cfg = AppConfig::from_env();
    tracing::info!(
        rss = %cfg.rss_url,
        city = %cfg.city,
        refresh_secs = cfg.refresh_interval.as_secs(),
        "newswatch starting"
    );

    let store = Arc::new(NewsStore::new());
    let city = Arc::new(CityCell::new(&cfg.city));

    let remote: Option<Arc<dyn ZeroShotClassifier>> = if cfg.remote.is_active() {
        Some(Arc::new(HfClassifier::new(
            &cfg.remote.api_url,
            &cfg.remote.api_key,
            cfg.remote.timeout,
        )))
    } else {
        tracing::info!("remote classification disabled or unconfigured");
        None
    };

    let pipeline = Pipeline {
        feed: Arc::new(HttpFeedSource::new(&cfg.rss_url)),
        remote,
        notifier: Arc::new(ConsoleNotifier::new(cfg.sound_enable, &cfg.sound_file)),
        store: store.clone(),
        city: city.clone(),
        threshold: cfg.remote.score_threshold,
        budget_per_cycle: cfg.remote.max_per_cycle,
    };

    let stop = Arc::new(AtomicBool::new(false));
    let worker = spawn_poller(pipeline, PollerCfg::from(&cfg), stop.clone());

    let state = AppState::new(store, city);
    let router = api::create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], cfg.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "serving http api");
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal(stop))
        .await?;

    // Let the worker observe the flag and finish its cycle.
    let _ = worker.await;
    Ok(())
}

async fn shutdown_signal(stop: Arc<AtomicBool>) {
    let trigger = tokio::signal::ctrl_c().await;
    request_stop(&stop, trigger);
}
