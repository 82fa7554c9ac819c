//! Paste Cache - demo workload
//!
//! Runs the read / conditionally upload / write pattern from many concurrent
//! tasks against one shared cache and reports the resulting statistics.

use std::time::Duration;

use anyhow::Context;
use chrono::{DateTime, Utc};
use tokio::task::JoinSet;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use paste_cache::{Config, PasteRecord, SharedCache};

/// Main entry point.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load and validate configuration from environment variables
/// 3. Create the shared cache
/// 4. Spawn one task per worker, each handling a stream of events
/// 5. Print final statistics as JSON
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "paste_cache=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    config.validate().context("invalid configuration")?;
    info!(
        "Configuration loaded: capacity={}, workers={}, events_per_worker={}, key_space={}",
        config.capacity, config.workers, config.events_per_worker, config.key_space
    );

    let cache: SharedCache<u64, PasteRecord> =
        SharedCache::new(config.capacity).context("failed to create cache")?;

    let mut workers = JoinSet::new();
    for worker in 0..config.workers {
        workers.spawn(run_worker(cache.clone(), worker, config.clone()));
    }

    let mut uploads = 0usize;
    while let Some(result) = workers.join_next().await {
        uploads += result.context("worker task failed")?;
    }

    let stats = cache.snapshot_stats();
    info!(
        "Workload finished: uploads={}, resident={}, hit_rate={:.2}",
        uploads,
        cache.len(),
        stats.hit_rate()
    );
    println!("{}", serde_json::to_string_pretty(&stats)?);

    Ok(())
}

/// Handles one worker's events and returns how many uploads it performed.
async fn run_worker(cache: SharedCache<u64, PasteRecord>, worker: usize, config: Config) -> usize {
    let mut uploads = 0;

    for event in 0..config.events_per_worker {
        let key = event_key(worker, event, config.key_space);
        // Every fifth event reports that the source message was edited.
        let edited_at = (event % 5 == 4).then(Utc::now);

        if handle_event(&cache, key, edited_at).await {
            uploads += 1;
        }
    }

    uploads
}

/// Reuses the cached paste for `key` unless it is missing or older than
/// `edited_at`. Returns true when an upload was performed.
async fn handle_event(
    cache: &SharedCache<u64, PasteRecord>,
    key: u64,
    edited_at: Option<DateTime<Utc>>,
) -> bool {
    if let Some(record) = cache.get(&key) {
        if record.is_current_for(edited_at) {
            debug!(key, paste_id = %record.paste_id, "reusing existing paste");
            return false;
        }
        debug!(key, paste_id = %record.paste_id, "source edited, re-uploading");
    }

    // Stand-in for the outbound upload; the cache lock is not held here.
    tokio::time::sleep(Duration::from_millis(1)).await;
    let mut record = PasteRecord::new(format!("paste-{key:08x}"));
    record.last_modified = edited_at;
    cache.set(key, record);
    true
}

/// Deterministic spread of event keys over the key space.
fn event_key(worker: usize, event: usize, key_space: u64) -> u64 {
    ((worker as u64) * 31 + (event as u64) * 17) % key_space
}
