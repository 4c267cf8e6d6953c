use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::service::LanguageService;

/// Periodic refresh of the supported language list.
///
/// Scheduling happens at most once per scheduler; the first run syncs right
/// away when the cache is empty.
pub struct SyncScheduler {
    service: Arc<LanguageService>,
    interval: Duration,
    scheduled: AtomicBool,
    cancel_token: CancellationToken,
}

impl SyncScheduler {
    pub fn new(service: Arc<LanguageService>, interval: Duration) -> Self {
        Self {
            service,
            interval,
            scheduled: AtomicBool::new(false),
            cancel_token: CancellationToken::new(),
        }
    }

    /// Spawn the sync task unless it already runs.
    ///
    /// Returns the task handle on the first call and `None` afterwards.
    /// Must be called from within a tokio runtime.
    pub fn ensure_scheduled(&self) -> Option<JoinHandle<()>> {
        if self
            .scheduled
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            tracing::debug!("Language sync already scheduled");
            return None;
        }

        tracing::info!("Scheduling language sync every {:?}", self.interval);

        Some(tokio::spawn(sync_loop(
            Arc::clone(&self.service),
            self.interval,
            self.cancel_token.child_token(),
        )))
    }

    pub fn is_scheduled(&self) -> bool {
        self.scheduled.load(Ordering::Acquire)
    }

    pub fn shutdown(&self) {
        self.cancel_token.cancel();
    }
}

async fn sync_loop(service: Arc<LanguageService>, interval: Duration, cancel: CancellationToken) {
    let needs_immediate = match service.cache().is_empty() {
        Ok(empty) => empty,
        Err(e) => {
            tracing::warn!("Cannot inspect language cache: {e}");
            true
        }
    };

    if needs_immediate {
        tracing::info!("Language cache empty, syncing now");
        run_sync(&service).await;
    }

    let mut ticker = tokio::time::interval_at(Instant::now() + interval, interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Language sync stopped");
                break;
            }
            _ = ticker.tick() => run_sync(&service).await,
        }
    }
}

async fn run_sync(service: &LanguageService) {
    match service.sync().await {
        Ok(pairs) => tracing::info!("Language sync done, {} pairs", pairs.len()),
        Err(e) => tracing::error!("Language sync failed: {e}"),
    }
}
