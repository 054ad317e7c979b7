// src/poller.rs
// Background cycle runner: fetch → dedup/classify → publish snapshot →
// sleep, until the stop flag is observed.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use metrics::{counter, describe_counter, describe_gauge, gauge};
use once_cell::sync::OnceCell;
use tokio::task::JoinHandle;

use crate::classify::classify_title;
use crate::config::{AppConfig, ALARM_KEYWORDS};
use crate::dedup::BoundedDedup;
use crate::feed::FeedSource;
use crate::notify::Notifier;
use crate::remote::ZeroShotClassifier;
use crate::store::{CityCell, ClassifiedItem, NewsStore, Snapshot};

/// One-time metrics registration (series show up once an exporter is wired).
fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!("poll_cycles_total", "Completed polling cycles.");
        describe_counter!("poll_items_total", "New items published across cycles.");
        describe_counter!("poll_important_total", "Items flagged important.");
        describe_counter!("poll_fetch_errors_total", "Feed fetch/parse failures.");
        describe_counter!(
            "poll_remote_errors_total",
            "Remote classification call failures (transport/status/body)."
        );
        describe_gauge!("poll_last_cycle_ts", "Unix ts of the last completed cycle.");
    });
}

fn now_str() -> String {
    chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

#[derive(Debug, Clone, Copy)]
pub struct CycleStats {
    pub total_fetched: usize,
    pub published: usize,
    pub important: usize,
}

/// The pipeline's collaborators, shared with the HTTP layer where noted.
/// The dedup window is deliberately *not* here: it is single-writer state
/// owned by the polling task and threaded through `run_cycle` by the caller.
pub struct Pipeline {
    pub feed: Arc<dyn FeedSource>,
    pub remote: Option<Arc<dyn ZeroShotClassifier>>,
    pub notifier: Arc<dyn Notifier>,
    pub store: Arc<NewsStore>,
    pub city: Arc<CityCell>,
    pub threshold: f32,
    pub budget_per_cycle: u32,
}

impl Pipeline {
    /// One fetch-classify-publish pass. Returns `Err` only when the fetch
    /// itself fails. A failed or empty fetch publishes nothing and the
    /// previous snapshot keeps serving; a non-empty fetch always publishes,
    /// even if every item was a duplicate.
    pub async fn run_cycle(&self, dedup: &mut BoundedDedup, cycle: u64) -> anyhow::Result<CycleStats> {
        let items = self.feed.fetch().await?;
        if items.is_empty() {
            tracing::debug!(target: "poller", cycle, "feed empty; previous results kept");
            return Ok(CycleStats {
                total_fetched: 0,
                published: 0,
                important: 0,
            });
        }

        // Read the city once per pass; a mid-cycle update applies next cycle.
        let city = self.city.get();
        let mut budget = self.budget_per_cycle;
        let mut news: Vec<ClassifiedItem> = Vec::new();
        let mut important: Vec<ClassifiedItem> = Vec::new();

        for item in &items {
            if item.title.trim().is_empty() || dedup.seen(&item.title) {
                continue;
            }
            let relevance = classify_title(
                &item.title,
                &city,
                ALARM_KEYWORDS,
                self.remote.as_deref(),
                self.threshold,
                &mut budget,
            )
            .await;

            let classified = ClassifiedItem {
                title: item.title.clone(),
                link: item.link.clone(),
                category: relevance.category,
                score: relevance.score,
                time: now_str(),
                is_important: relevance.is_important,
            };
            news.push(classified.clone());
            if classified.is_important {
                important.push(classified.clone());
                self.notifier.notify(&classified);
            }
        }

        let stats = CycleStats {
            total_fetched: items.len(),
            published: news.len(),
            important: important.len(),
        };
        self.store.publish(Snapshot {
            news,
            important,
            cycle,
        });
        Ok(stats)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct PollerCfg {
    pub refresh_interval: Duration,
    pub seen_capacity: usize,
    pub show_cycle_summary: bool,
}

impl From<&AppConfig> for PollerCfg {
    fn from(cfg: &AppConfig) -> Self {
        Self {
            refresh_interval: cfg.refresh_interval,
            seen_capacity: cfg.seen_capacity,
            show_cycle_summary: cfg.show_cycle_summary,
        }
    }
}

/// Mark the stop flag once the shutdown trigger resolves. The flag is set
/// whether or not the signal handler itself failed; the worker must not
/// outlive the server.
pub fn request_stop(stop: &AtomicBool, trigger: std::io::Result<()>) {
    match trigger {
        Ok(()) => tracing::info!("ctrl-c received; stopping after current cycle"),
        Err(e) => tracing::warn!(error = ?e, "ctrl-c handler failed; stopping anyway"),
    }
    stop.store(true, Ordering::Relaxed);
}

/// Spawn the long-lived polling task. Cooperative stop: the flag is checked
/// once per loop iteration, so shutdown waits out at most one sleep plus any
/// in-flight work.
pub fn spawn_poller(pipeline: Pipeline, cfg: PollerCfg, stop: Arc<AtomicBool>) -> JoinHandle<()> {
    tokio::spawn(async move {
        ensure_metrics_described();
        let mut dedup = BoundedDedup::new(cfg.seen_capacity);
        let mut cycle: u64 = 0;

        loop {
            cycle += 1;
            match pipeline.run_cycle(&mut dedup, cycle).await {
                Ok(stats) => {
                    counter!("poll_cycles_total").increment(1);
                    counter!("poll_items_total").increment(stats.published as u64);
                    counter!("poll_important_total").increment(stats.important as u64);
                    gauge!("poll_last_cycle_ts").set(chrono::Utc::now().timestamp() as f64);
                    if cfg.show_cycle_summary {
                        tracing::info!(
                            target: "poller",
                            cycle,
                            important = stats.important,
                            total = stats.total_fetched,
                            "cycle complete"
                        );
                    }
                }
                Err(e) => {
                    counter!("poll_fetch_errors_total").increment(1);
                    tracing::warn!(
                        target: "poller",
                        error = ?e,
                        cycle,
                        "feed fetch failed; previous results kept"
                    );
                }
            }

            tokio::time::sleep(cfg.refresh_interval).await;
            if stop.load(Ordering::Relaxed) {
                break;
            }
        }
        tracing::info!(target: "poller", "stop signal observed; poller exiting");
    })
}
