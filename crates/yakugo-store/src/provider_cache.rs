use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use yakugo_core::store::validate_first_letter;
use yakugo_core::{CachedCandidates, Error, ProviderCacheStore, Result};
use yakugo_types::{Lang2, Translation, WordPos};

use crate::snapshot::JsonSnapshot;
use crate::table::Table;

type RowKey = (Lang2, String);

/// One cached provider answer. `result` is the candidate list as JSON text.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ProviderCacheRow {
    text: String,
    lang2: Lang2,
    result: String,
    created_at: DateTime<Utc>,
}

impl ProviderCacheRow {
    fn key(&self) -> RowKey {
        (self.lang2, self.text.clone())
    }

    fn cached(&self) -> Result<CachedCandidates> {
        let candidates = serde_json::from_str(&self.result).map_err(|e| {
            Error::storage(
                format!("failed to decode cached result for {:?} [{}]", self.text, self.lang2),
                e,
            )
        })?;
        Ok(CachedCandidates::new(candidates, self.created_at))
    }

    fn translations(&self) -> Result<Vec<Translation>> {
        self.cached()?.to_translations(self.lang2, &self.text)
    }
}

/// Provider answers held in memory, optionally mirrored to a JSON file
#[derive(Debug, Default)]
pub struct MemoryProviderCache {
    rows: Table<RowKey, ProviderCacheRow>,
}

impl MemoryProviderCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(snapshot: JsonSnapshot) -> Result<Self> {
        let loaded: Vec<ProviderCacheRow> = snapshot.load()?;
        tracing::info!(
            "loaded {} cached provider answers from {}",
            loaded.len(),
            snapshot.path().display()
        );

        Ok(Self {
            rows: Table::mirrored(snapshot, loaded, ProviderCacheRow::key),
        })
    }

    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }

    async fn row(&self, lang: Lang2, text: &str) -> Result<ProviderCacheRow> {
        self.rows
            .read()
            .await
            .get(&(lang, text.to_string()))
            .cloned()
            .ok_or(Error::TranslationNotFound)
    }
}

#[async_trait::async_trait]
impl ProviderCacheStore for MemoryProviderCache {
    async fn contains(&self, lang: Lang2, text: &str) -> Result<bool> {
        Ok(self
            .rows
            .read()
            .await
            .contains_key(&(lang, text.to_string())))
    }

    async fn find(&self, lang: Lang2, text: &str) -> Result<CachedCandidates> {
        self.row(lang, text).await?.cached()
    }

    async fn find_by_text_and_pos(
        &self,
        lang: Lang2,
        text: &str,
        pos: WordPos,
    ) -> Result<Translation> {
        self.row(lang, text)
            .await?
            .translations()?
            .into_iter()
            .find(|t| t.pos() == pos)
            .ok_or(Error::TranslationNotFound)
    }

    async fn find_by_text(&self, lang: Lang2, text: &str) -> Result<Vec<Translation>> {
        self.row(lang, text).await?.translations()
    }

    async fn find_by_first_letter(&self, lang: Lang2, letter: &str) -> Result<Vec<Translation>> {
        let letter = validate_first_letter(letter)?;
        let rows = self.rows.read().await;

        let mut results = Vec::new();
        for row in rows.values().filter(|row| {
            row.lang2 == lang
                && row
                    .text
                    .chars()
                    .next()
                    .is_some_and(|first| first.eq_ignore_ascii_case(&letter))
        }) {
            results.extend(row.translations()?);
        }
        Ok(results)
    }

    async fn add(&self, lang: Lang2, text: &str, cached: &CachedCandidates) -> Result<()> {
        let row = ProviderCacheRow {
            text: text.to_string(),
            lang2: lang,
            result: serde_json::to_string(&cached.candidates)
                .map_err(|e| Error::storage("failed to encode provider result", e))?,
            created_at: cached.fetched_at,
        };

        self.rows
            .apply(row.key(), |slot| {
                if slot.is_some() {
                    return Err(Error::CacheEntryAlreadyExists);
                }
                *slot = Some(row);
                Ok(())
            })
            .await
    }
}
