use serde::{Deserialize, Serialize};
use yakugo_translator::AzureTranslationCandidate;
use yakugo_types::WordPos;

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct LookupInput<'a> {
    pub text: &'a str,
}

/// One entry of the lookup response, one per input text
#[derive(Debug, Deserialize)]
pub(crate) struct DictionaryLookupResult {
    #[serde(default)]
    translations: Option<Vec<DictionaryTranslation>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DictionaryTranslation {
    display_target: Option<String>,
    pos_tag: Option<String>,
    confidence: Option<f64>,
}

/// Flatten every translation of every result into candidates, in response order
pub(crate) fn into_candidates(
    text: &str,
    results: Vec<DictionaryLookupResult>,
) -> Vec<AzureTranslationCandidate> {
    results
        .into_iter()
        .flat_map(|result| result.translations.unwrap_or_default())
        .map(|t| {
            let tag = t.pos_tag.unwrap_or_default();
            let pos = WordPos::parse(&tag);
            if pos == WordPos::Other {
                tracing::warn!("unmapped pos tag {tag:?} for {text:?}");
            }

            AzureTranslationCandidate::new(
                pos,
                t.display_target.unwrap_or_default(),
                t.confidence.unwrap_or_default(),
            )
        })
        .collect()
}
