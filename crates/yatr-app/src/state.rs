use std::sync::Arc;

use yatr_config::Config;
use yatr_core::{
    LanguageCache, LanguageService, MemoryStorage, RedbStorage, Storage, SyncScheduler,
    TranslateResolver, TranslationHistoryStore,
};
use yatr_translator::{ProviderMetadata, TranslationApi, YandexTranslator};

pub struct AppState {
    pub config: Config,
    pub languages: Arc<LanguageService>,
    pub resolver: TranslateResolver,
    pub scheduler: SyncScheduler,
}

impl AppState {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let api: Arc<dyn TranslationApi> =
            Arc::new(YandexTranslator::from_config(&config.translator)?);

        let storage = open_storage(&config);

        Ok(Self::with_parts(config, storage, api))
    }

    /// Wire the services around an existing storage and remote
    pub fn with_parts(config: Config, storage: Arc<dyn Storage>, api: Arc<dyn TranslationApi>) -> Self {
        let provider = api.metadata();
        tracing::info!("Translation provider: {}", provider.name);
        if missing_api_key(&config, &provider) {
            tracing::warn!("{} requires an API key, set YATR_API_KEY", provider.name);
        }

        let languages = Arc::new(LanguageService::new(
            Arc::clone(&api),
            LanguageCache::new(Arc::clone(&storage)),
        ));
        let history = Arc::new(TranslationHistoryStore::new(storage));
        let resolver = TranslateResolver::new(api, history);
        let scheduler = SyncScheduler::new(Arc::clone(&languages), config.sync.interval());

        Self {
            config,
            languages,
            resolver,
            scheduler,
        }
    }
}

/// File storage from config, in-memory if the file cannot be opened
fn open_storage(config: &Config) -> Arc<dyn Storage> {
    let path = config.storage.db_path();

    match RedbStorage::open(&path) {
        Ok(storage) => Arc::new(storage),
        Err(e) => {
            tracing::error!(
                "Failed to open store at {}: {e}; history will not be kept",
                path.display()
            );
            Arc::new(MemoryStorage::new())
        }
    }
}

pub fn missing_api_key(config: &Config, provider: &ProviderMetadata) -> bool {
    provider.requires_api_key && config.translator.api_key.trim().is_empty()
}
