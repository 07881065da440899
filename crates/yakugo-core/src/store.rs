use std::sync::{Arc, LazyLock};

use chrono::{DateTime, Utc};
use regex::Regex;
use yakugo_translator::AzureTranslationCandidate;
use yakugo_types::{
    Lang2, Translation, TranslationAddParameter, TranslationUpdateParameter, WordPos,
};

use crate::error::{Error, Result};

static FIRST_LETTER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("^[a-zA-Z]$").expect("first letter pattern is valid"));

/// Check a first-letter filter: exactly one ASCII letter
pub fn validate_first_letter(letter: &str) -> Result<char> {
    match letter.chars().next() {
        Some(c) if FIRST_LETTER.is_match(letter) => Ok(c),
        _ => Err(Error::InvalidArgument(format!(
            "first letter must be a single ASCII letter, got {letter:?}"
        ))),
    }
}

/// Editorially curated translations. Authoritative over provider results.
#[async_trait::async_trait]
pub trait CustomTranslationStore: Send + Sync {
    /// Whether any entry exists for `text`, whatever its part of speech
    async fn contains(&self, lang: Lang2, text: &str) -> Result<bool>;

    async fn find_by_text(&self, lang: Lang2, text: &str) -> Result<Vec<Translation>>;

    /// `Error::TranslationNotFound` when absent
    async fn find_by_text_and_pos(
        &self,
        lang: Lang2,
        text: &str,
        pos: WordPos,
    ) -> Result<Translation>;

    /// Case-insensitive prefix match on a single ASCII letter
    async fn find_by_first_letter(&self, lang: Lang2, letter: &str) -> Result<Vec<Translation>>;

    /// `Error::TranslationAlreadyExists` if the (lang, text, pos) triple is taken
    async fn add(&self, param: &TranslationAddParameter) -> Result<()>;

    /// `Error::TranslationNotFound` when absent
    async fn update(
        &self,
        lang: Lang2,
        text: &str,
        pos: WordPos,
        param: &TranslationUpdateParameter,
    ) -> Result<()>;

    /// `Error::TranslationNotFound` when absent
    async fn remove(&self, lang: Lang2, text: &str, pos: WordPos) -> Result<()>;
}

/// A provider answer as held by the cache
#[derive(Debug, Clone, PartialEq)]
pub struct CachedCandidates {
    pub candidates: Vec<AzureTranslationCandidate>,
    /// When the provider answered; every translation built from it carries this time
    pub fetched_at: DateTime<Utc>,
}

impl CachedCandidates {
    pub fn new(candidates: Vec<AzureTranslationCandidate>, fetched_at: DateTime<Utc>) -> Self {
        Self {
            candidates,
            fetched_at,
        }
    }

    pub fn to_translations(&self, lang: Lang2, text: &str) -> Result<Vec<Translation>> {
        self.candidates
            .iter()
            .map(|c| c.to_translation(lang, text, self.fetched_at).map_err(Error::from))
            .collect()
    }
}

/// Previously fetched provider candidate lists, keyed by (lang, text)
#[async_trait::async_trait]
pub trait ProviderCacheStore: Send + Sync {
    async fn contains(&self, lang: Lang2, text: &str) -> Result<bool>;

    /// `Error::TranslationNotFound` when nothing is cached for `text`
    async fn find(&self, lang: Lang2, text: &str) -> Result<CachedCandidates>;

    async fn find_by_text_and_pos(
        &self,
        lang: Lang2,
        text: &str,
        pos: WordPos,
    ) -> Result<Translation>;

    async fn find_by_text(&self, lang: Lang2, text: &str) -> Result<Vec<Translation>>;

    async fn find_by_first_letter(&self, lang: Lang2, letter: &str) -> Result<Vec<Translation>>;

    /// `Error::CacheEntryAlreadyExists` if `text` is already cached
    async fn add(&self, lang: Lang2, text: &str, cached: &CachedCandidates) -> Result<()>;
}

/// Hands out the store adapters used by a resolution call
pub trait RepositoryFactory: Send + Sync {
    fn custom_translation_store(&self) -> Arc<dyn CustomTranslationStore>;

    fn provider_cache_store(&self) -> Arc<dyn ProviderCacheStore>;
}
