use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use yakugo_types::{
    Lang2, Translation, TranslationAddParameter, TranslationUpdateParameter, WordPos,
};

use crate::cancel::guard;
use crate::error::{Error, Result};
use crate::merge::MergeSet;
use crate::store::{RepositoryFactory, validate_first_letter};

/// Curation view over the custom store and the provider cache.
///
/// Custom entries always win; cached provider entries fill the gaps.
#[derive(Clone)]
pub struct AdminResolver {
    factory: Arc<dyn RepositoryFactory>,
}

impl AdminResolver {
    pub fn new(factory: Arc<dyn RepositoryFactory>) -> Self {
        Self { factory }
    }

    /// Every known translation whose text starts with `letter`, sorted by text
    pub async fn find_by_first_letter(
        &self,
        cancel: &CancellationToken,
        lang: Lang2,
        letter: &str,
    ) -> Result<Vec<Translation>> {
        validate_first_letter(letter)?;

        let custom = self.factory.custom_translation_store();
        let custom_results = guard(cancel, custom.find_by_first_letter(lang, letter)).await?;

        let cache = self.factory.provider_cache_store();
        let cached_results =
            or_empty(guard(cancel, cache.find_by_first_letter(lang, letter)).await)?;

        let mut merged = MergeSet::new();
        merged.extend_authoritative(custom_results);
        let filled = merged.extend_missing(cached_results);
        tracing::debug!(
            "first letter {letter:?}: {} entries, {filled} from provider cache",
            merged.len()
        );

        Ok(merged.into_sorted_by_text())
    }

    /// All parts of speech known for `text`, sorted by pos
    pub async fn find_by_text(
        &self,
        cancel: &CancellationToken,
        lang: Lang2,
        text: &str,
    ) -> Result<Vec<Translation>> {
        require_text(text)?;

        let custom = self.factory.custom_translation_store();
        let custom_results = guard(cancel, custom.find_by_text(lang, text)).await?;

        let cache = self.factory.provider_cache_store();
        let cached_results = or_empty(guard(cancel, cache.find_by_text(lang, text)).await)?;

        let mut merged = MergeSet::new();
        merged.extend_authoritative(custom_results);
        let filled = merged.extend_missing(cached_results);
        tracing::debug!(
            "text {text:?}: {} entries, {filled} from provider cache",
            merged.len()
        );

        Ok(merged.into_sorted_by_pos())
    }

    pub async fn find_by_text_and_pos(
        &self,
        cancel: &CancellationToken,
        lang: Lang2,
        text: &str,
        pos: WordPos,
    ) -> Result<Translation> {
        require_text(text)?;

        let custom = self.factory.custom_translation_store();
        match guard(cancel, custom.find_by_text_and_pos(lang, text, pos)).await {
            Ok(translation) => return Ok(translation),
            Err(Error::TranslationNotFound) => {
                tracing::debug!("{text:?} ({pos}) not in custom store, trying provider cache");
            }
            Err(e) => return Err(e),
        }

        let cache = self.factory.provider_cache_store();
        guard(cancel, cache.find_by_text_and_pos(lang, text, pos)).await
    }

    pub async fn add(
        &self,
        cancel: &CancellationToken,
        param: &TranslationAddParameter,
    ) -> Result<()> {
        let custom = self.factory.custom_translation_store();
        guard(cancel, custom.add(param)).await?;

        tracing::info!(
            "added custom translation {:?} ({}) [{}]",
            param.text(),
            param.pos(),
            param.lang()
        );
        Ok(())
    }

    /// Overwrite the custom entry, creating it when the custom store lacks it
    pub async fn update(
        &self,
        cancel: &CancellationToken,
        lang: Lang2,
        text: &str,
        pos: WordPos,
        param: &TranslationUpdateParameter,
    ) -> Result<()> {
        require_text(text)?;

        let custom = self.factory.custom_translation_store();
        let found = match guard(cancel, custom.find_by_text_and_pos(lang, text, pos)).await {
            Ok(_) => true,
            Err(Error::TranslationNotFound) => false,
            Err(e) => return Err(e),
        };

        if found {
            guard(cancel, custom.update(lang, text, pos, param)).await?;
            tracing::info!("updated custom translation {text:?} ({pos}) [{lang}]");
        } else {
            let add = TranslationAddParameter::new(text, pos, lang, param.translated())?;
            guard(cancel, custom.add(&add)).await?;
            tracing::info!("created custom translation {text:?} ({pos}) [{lang}] on update");
        }

        Ok(())
    }

    pub async fn remove(
        &self,
        cancel: &CancellationToken,
        lang: Lang2,
        text: &str,
        pos: WordPos,
    ) -> Result<()> {
        let custom = self.factory.custom_translation_store();
        guard(cancel, custom.remove(lang, text, pos)).await?;

        tracing::info!("removed custom translation {text:?} ({pos}) [{lang}]");
        Ok(())
    }
}

pub(crate) fn require_text(text: &str) -> Result<()> {
    if text.is_empty() {
        return Err(Error::InvalidArgument("text is required".to_string()));
    }
    Ok(())
}

/// A provider cache miss is an empty tier, not a failure
fn or_empty(result: Result<Vec<Translation>>) -> Result<Vec<Translation>> {
    match result {
        Err(Error::TranslationNotFound) => Ok(Vec::new()),
        other => other,
    }
}
