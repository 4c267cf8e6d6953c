use std::sync::Arc;
use std::time::Duration;

use tokio::time::timeout;
use yatr_types::LangPair;

use super::support::MockApi;
use crate::cache::LanguageCache;
use crate::service::LanguageService;
use crate::storage::MemoryStorage;
use crate::sync::SyncScheduler;

fn scheduler(api: Arc<MockApi>, interval: Duration) -> SyncScheduler {
    let cache = LanguageCache::new(Arc::new(MemoryStorage::new()));
    SyncScheduler::new(Arc::new(LanguageService::new(api, cache)), interval)
}

async fn wait_for_calls(api: &MockApi, calls: usize) {
    let result = timeout(Duration::from_secs(2), async {
        while api.language_calls() < calls {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await;

    assert!(result.is_ok(), "Timeout waiting for {calls} language fetches");
}

#[tokio::test]
async fn test_schedules_once() {
    let api = Arc::new(MockApi::new());
    let scheduler = scheduler(api, Duration::from_secs(3600));

    assert!(!scheduler.is_scheduled());
    let first = scheduler.ensure_scheduled();
    let second = scheduler.ensure_scheduled();

    assert!(first.is_some());
    assert!(second.is_none());
    assert!(scheduler.is_scheduled());

    scheduler.shutdown();
    timeout(Duration::from_secs(1), first.unwrap())
        .await
        .unwrap()
        .unwrap();
}

#[tokio::test]
async fn test_empty_cache_syncs_immediately() {
    let api = Arc::new(MockApi::new());
    let cache = LanguageCache::new(Arc::new(MemoryStorage::new()));
    let service = Arc::new(LanguageService::new(api.clone(), cache.clone()));
    let scheduler = SyncScheduler::new(service, Duration::from_secs(3600));

    scheduler.ensure_scheduled();
    wait_for_calls(&api, 1).await;

    // The fetch is counted before the refresh lands
    let filled = timeout(Duration::from_secs(2), async {
        while cache.is_empty().unwrap() {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await;
    assert!(filled.is_ok());
    assert_eq!(cache.load().unwrap().len(), 4);

    scheduler.shutdown();
}

#[tokio::test]
async fn test_warm_cache_waits_for_interval() {
    let api = Arc::new(MockApi::new());
    let cache = LanguageCache::new(Arc::new(MemoryStorage::new()));
    cache
        .refresh(&[LangPair::new("de", "en", "German", "English")])
        .unwrap();
    let service = Arc::new(LanguageService::new(api.clone(), cache));
    let scheduler = SyncScheduler::new(service, Duration::from_millis(300));

    let handle = scheduler.ensure_scheduled().unwrap();
    tokio::time::sleep(Duration::from_millis(20)).await;
    assert_eq!(api.language_calls(), 0);

    wait_for_calls(&api, 1).await;

    scheduler.shutdown();
    timeout(Duration::from_secs(1), handle).await.unwrap().unwrap();
}

#[tokio::test]
async fn test_failed_sync_keeps_running() {
    let api = Arc::new(MockApi::new());
    api.set_languages(Err(500));
    let scheduler = scheduler(api.clone(), Duration::from_millis(20));

    let handle = scheduler.ensure_scheduled().unwrap();
    wait_for_calls(&api, 3).await;

    assert!(!handle.is_finished());
    scheduler.shutdown();
}
