use std::collections::BTreeMap;

use yakugo_translator::AzureTranslationCandidate;
use yakugo_types::{Translation, WordPos};

/// Call-scoped translation set keyed by (text, pos).
///
/// Authoritative entries overwrite, gap fillers only land on free keys.
#[derive(Debug, Default)]
pub(crate) struct MergeSet {
    entries: BTreeMap<(String, WordPos), Translation>,
}

impl MergeSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn extend_authoritative(&mut self, translations: impl IntoIterator<Item = Translation>) {
        for translation in translations {
            self.entries.insert(key(&translation), translation);
        }
    }

    /// Returns how many entries were added
    pub fn extend_missing(&mut self, translations: impl IntoIterator<Item = Translation>) -> usize {
        let mut added = 0;
        for translation in translations {
            if let std::collections::btree_map::Entry::Vacant(slot) =
                self.entries.entry(key(&translation))
            {
                slot.insert(translation);
                added += 1;
            }
        }
        added
    }

    pub fn contains(&self, text: &str, pos: WordPos) -> bool {
        self.entries.contains_key(&(text.to_string(), pos))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Ascending by text (byte-wise), ties by pos
    pub fn into_sorted_by_text(self) -> Vec<Translation> {
        self.entries.into_values().collect()
    }

    /// Ascending by pos, ties by text
    pub fn into_sorted_by_pos(self) -> Vec<Translation> {
        let mut results: Vec<Translation> = self.entries.into_values().collect();
        results.sort_by_key(Translation::pos);
        results
    }
}

fn key(translation: &Translation) -> (String, WordPos) {
    (translation.text().to_string(), translation.pos())
}

/// Keep the most confident candidate of every part of speech.
///
/// A candidate replaces the current best only with a strictly higher
/// confidence, so ties keep the first one seen. NaN never beats a number.
pub fn select_max_confidence(
    candidates: &[AzureTranslationCandidate],
) -> BTreeMap<WordPos, &AzureTranslationCandidate> {
    let mut best: BTreeMap<WordPos, &AzureTranslationCandidate> = BTreeMap::new();

    for candidate in candidates {
        let replace = best
            .get(&candidate.pos)
            .is_none_or(|current| beats(candidate.confidence, current.confidence));
        if replace {
            best.insert(candidate.pos, candidate);
        }
    }

    best
}

fn beats(challenger: f64, current: f64) -> bool {
    challenger > current || (current.is_nan() && !challenger.is_nan())
}
