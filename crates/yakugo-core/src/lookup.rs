use std::sync::Arc;

use chrono::Utc;
use tokio_util::sync::CancellationToken;
use yakugo_translator::DictionaryClient;
use yakugo_types::{Lang2, Translation, WordPos};

use crate::admin::require_text;
use crate::cancel::guard;
use crate::error::{Error, Result};
use crate::merge::{MergeSet, select_max_confidence};
use crate::store::{CachedCandidates, RepositoryFactory};

/// End-user dictionary lookup.
///
/// Resolution order per call:
/// 1. custom store entries for the text, if any
/// 2. provider candidates, from the provider cache or a live provider call
///    (non-empty live results are written back to the cache)
/// 3. the most confident candidate per part of speech fills every pos the
///    custom store does not answer
#[derive(Clone)]
pub struct LookupResolver {
    factory: Arc<dyn RepositoryFactory>,
    client: Arc<dyn DictionaryClient>,
}

impl LookupResolver {
    pub fn new(factory: Arc<dyn RepositoryFactory>, client: Arc<dyn DictionaryClient>) -> Self {
        Self { factory, client }
    }

    /// All translations of `text`, one per part of speech, sorted by pos
    pub async fn dictionary_lookup(
        &self,
        cancel: &CancellationToken,
        from: Lang2,
        to: Lang2,
        text: &str,
    ) -> Result<Vec<Translation>> {
        require_text(text)?;

        let custom_results = self.custom_lookup(cancel, to, text).await?;
        let provider = self.provider_lookup(cancel, from, to, text).await?;

        let mut merged = MergeSet::new();
        merged.extend_authoritative(custom_results);

        for (pos, candidate) in select_max_confidence(&provider.candidates) {
            if merged.contains(text, pos) {
                tracing::debug!("{text:?} ({pos}) answered by custom store");
                continue;
            }
            merged.extend_missing([candidate.to_translation(from, text, provider.fetched_at)?]);
        }

        Ok(merged.into_sorted_by_pos())
    }

    /// Full lookup narrowed to one part of speech
    pub async fn dictionary_lookup_with_pos(
        &self,
        cancel: &CancellationToken,
        from: Lang2,
        to: Lang2,
        text: &str,
        pos: WordPos,
    ) -> Result<Translation> {
        self.dictionary_lookup(cancel, from, to, text)
            .await?
            .into_iter()
            .find(|translation| translation.pos() == pos)
            .ok_or(Error::TranslationNotFound)
    }

    async fn custom_lookup(
        &self,
        cancel: &CancellationToken,
        to: Lang2,
        text: &str,
    ) -> Result<Vec<Translation>> {
        let custom = self.factory.custom_translation_store();

        if !guard(cancel, custom.contains(to, text)).await? {
            tracing::debug!("{text:?} [{to}] not in custom store");
            return Ok(Vec::new());
        }

        guard(cancel, custom.find_by_text(to, text)).await
    }

    async fn provider_lookup(
        &self,
        cancel: &CancellationToken,
        from: Lang2,
        to: Lang2,
        text: &str,
    ) -> Result<CachedCandidates> {
        let cache = self.factory.provider_cache_store();

        if guard(cancel, cache.contains(to, text)).await? {
            tracing::debug!("{text:?} [{to}] served from provider cache");
            return guard(cancel, cache.find(to, text)).await;
        }

        tracing::debug!("{text:?} [{from} -> {to}] not cached, calling provider");
        let candidates = guard(cancel, async {
            self.client
                .dictionary_lookup(text, from, to)
                .await
                .map_err(Error::from)
        })
        .await?;
        let fetched = CachedCandidates::new(candidates, Utc::now());

        // An empty answer may be a provider gap, keep asking next time
        if fetched.candidates.is_empty() {
            tracing::debug!("provider returned no candidates for {text:?}, not caching");
            return Ok(fetched);
        }

        match guard(cancel, cache.add(to, text, &fetched)).await {
            Ok(()) => {
                tracing::info!(
                    "cached {} provider candidates for {text:?} [{to}]",
                    fetched.candidates.len()
                );
            }
            Err(Error::CacheEntryAlreadyExists) => {
                tracing::warn!("{text:?} [{to}] was cached concurrently, keeping fetched candidates");
            }
            Err(e) => return Err(e),
        }

        Ok(fetched)
    }
}
