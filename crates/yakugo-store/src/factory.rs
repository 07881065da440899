use std::path::PathBuf;
use std::sync::Arc;

use yakugo_core::{CustomTranslationStore, ProviderCacheStore, RepositoryFactory, Result};

use crate::custom::MemoryCustomStore;
use crate::provider_cache::MemoryProviderCache;
use crate::snapshot::JsonSnapshot;

/// Shares one custom store and one provider cache across every resolver call
#[derive(Debug, Clone, Default)]
pub struct MemoryRepositoryFactory {
    custom: Arc<MemoryCustomStore>,
    cache: Arc<MemoryProviderCache>,
}

impl MemoryRepositoryFactory {
    pub fn new(custom: Arc<MemoryCustomStore>, cache: Arc<MemoryProviderCache>) -> Self {
        Self { custom, cache }
    }

    /// Stores backed by snapshot files; a `None` path keeps that store in memory only
    pub fn open(custom_path: Option<PathBuf>, cache_path: Option<PathBuf>) -> Result<Self> {
        let custom = match custom_path {
            Some(path) => MemoryCustomStore::open(JsonSnapshot::new(path))?,
            None => MemoryCustomStore::new(),
        };
        let cache = match cache_path {
            Some(path) => MemoryProviderCache::open(JsonSnapshot::new(path))?,
            None => MemoryProviderCache::new(),
        };

        Ok(Self::new(Arc::new(custom), Arc::new(cache)))
    }
}

impl RepositoryFactory for MemoryRepositoryFactory {
    fn custom_translation_store(&self) -> Arc<dyn CustomTranslationStore> {
        self.custom.clone()
    }

    fn provider_cache_store(&self) -> Arc<dyn ProviderCacheStore> {
        self.cache.clone()
    }
}
