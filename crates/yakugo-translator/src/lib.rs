use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use yakugo_types::{Lang2, Translation, TypeError, WordPos};

/// Provider label of translations synthesized from dictionary candidates
pub const AZURE_PROVIDER: &str = "azure";

/// Dictionary lookup provider interface
#[async_trait::async_trait]
pub trait DictionaryClient: Send + Sync {
    /// Look up every translation candidate of `text`, across all parts of speech
    async fn dictionary_lookup(
        &self,
        text: &str,
        from: Lang2,
        to: Lang2,
    ) -> Result<Vec<AzureTranslationCandidate>, TranslateError>;

    /// Provider metadata
    fn metadata(&self) -> ProviderMetadata;
}

/// One provider answer for a word: translated text, POS and how sure the provider is.
///
/// Field names match the JSON layout persisted in the provider cache.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AzureTranslationCandidate {
    pub pos: WordPos,
    pub target: String,
    pub confidence: f64,
}

impl AzureTranslationCandidate {
    pub fn new(pos: WordPos, target: impl Into<String>, confidence: f64) -> Self {
        Self {
            pos,
            target: target.into(),
            confidence,
        }
    }

    /// Version 1 entry stamped with the time the provider answered
    pub fn to_translation(
        &self,
        lang: Lang2,
        text: &str,
        fetched_at: DateTime<Utc>,
    ) -> Result<Translation, TypeError> {
        Translation::new(
            1,
            fetched_at,
            fetched_at,
            text,
            self.pos,
            lang,
            self.target.clone(),
            AZURE_PROVIDER,
        )
    }
}

#[derive(Debug, Clone)]
pub struct ProviderMetadata {
    pub name: String,
    pub requires_api_key: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum TranslateError {
    #[error("API error: {0}")]
    ApiError(String),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Unsupported language pair: {from} -> {to}")]
    UnsupportedLanguagePair { from: String, to: String },

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("Authentication error")]
    AuthenticationError,
}
