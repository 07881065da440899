use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use yakugo_core::store::validate_first_letter;
use yakugo_core::{CustomTranslationStore, Error, Result};
use yakugo_types::{
    Lang2, Translation, TranslationAddParameter, TranslationUpdateParameter, WordPos,
};

use crate::snapshot::JsonSnapshot;
use crate::table::Table;

pub const CUSTOM_PROVIDER: &str = "custom";

type RowKey = (Lang2, String, WordPos);

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CustomTranslationRow {
    version: u32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    text: String,
    pos: WordPos,
    lang2: Lang2,
    translated: String,
}

impl CustomTranslationRow {
    fn key(&self) -> RowKey {
        (self.lang2, self.text.clone(), self.pos)
    }

    fn to_translation(&self) -> Result<Translation> {
        Ok(Translation::new(
            self.version,
            self.created_at,
            self.updated_at,
            &self.text,
            self.pos,
            self.lang2,
            &self.translated,
            CUSTOM_PROVIDER,
        )?)
    }
}

/// Custom translations held in memory, optionally mirrored to a JSON file
#[derive(Debug, Default)]
pub struct MemoryCustomStore {
    rows: Table<RowKey, CustomTranslationRow>,
}

impl MemoryCustomStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load rows from `snapshot` and write every later change back to it
    pub fn open(snapshot: JsonSnapshot) -> Result<Self> {
        let loaded: Vec<CustomTranslationRow> = snapshot.load()?;
        tracing::info!(
            "loaded {} custom translations from {}",
            loaded.len(),
            snapshot.path().display()
        );

        Ok(Self {
            rows: Table::mirrored(snapshot, loaded, CustomTranslationRow::key),
        })
    }

    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.rows.read().await.is_empty()
    }

    async fn select<P>(&self, mut predicate: P) -> Result<Vec<Translation>>
    where
        P: FnMut(&CustomTranslationRow) -> bool,
    {
        self.rows
            .read()
            .await
            .values()
            .filter(|row| predicate(row))
            .map(CustomTranslationRow::to_translation)
            .collect()
    }
}

#[async_trait::async_trait]
impl CustomTranslationStore for MemoryCustomStore {
    async fn contains(&self, lang: Lang2, text: &str) -> Result<bool> {
        Ok(self
            .rows
            .read()
            .await
            .values()
            .any(|row| row.lang2 == lang && row.text == text))
    }

    async fn find_by_text(&self, lang: Lang2, text: &str) -> Result<Vec<Translation>> {
        self.select(|row| row.lang2 == lang && row.text == text)
            .await
    }

    async fn find_by_text_and_pos(
        &self,
        lang: Lang2,
        text: &str,
        pos: WordPos,
    ) -> Result<Translation> {
        self.rows
            .read()
            .await
            .get(&(lang, text.to_string(), pos))
            .ok_or(Error::TranslationNotFound)?
            .to_translation()
    }

    async fn find_by_first_letter(&self, lang: Lang2, letter: &str) -> Result<Vec<Translation>> {
        let letter = validate_first_letter(letter)?;
        self.select(|row| {
            row.lang2 == lang
                && row
                    .text
                    .chars()
                    .next()
                    .is_some_and(|first| first.eq_ignore_ascii_case(&letter))
        })
        .await
    }

    async fn add(&self, param: &TranslationAddParameter) -> Result<()> {
        let now = Utc::now();
        let row = CustomTranslationRow {
            version: 1,
            created_at: now,
            updated_at: now,
            text: param.text().to_string(),
            pos: param.pos(),
            lang2: param.lang(),
            translated: param.translated().to_string(),
        };

        self.rows
            .apply(row.key(), |slot| {
                if slot.is_some() {
                    return Err(Error::TranslationAlreadyExists);
                }
                *slot = Some(row);
                Ok(())
            })
            .await
    }

    async fn update(
        &self,
        lang: Lang2,
        text: &str,
        pos: WordPos,
        param: &TranslationUpdateParameter,
    ) -> Result<()> {
        self.rows
            .apply((lang, text.to_string(), pos), |slot| {
                let row = slot.as_mut().ok_or(Error::TranslationNotFound)?;
                row.version += 1;
                row.updated_at = Utc::now();
                row.translated = param.translated().to_string();
                Ok(())
            })
            .await
    }

    async fn remove(&self, lang: Lang2, text: &str, pos: WordPos) -> Result<()> {
        self.rows
            .apply((lang, text.to_string(), pos), |slot| {
                slot.take().map(|_| ()).ok_or(Error::TranslationNotFound)
            })
            .await
    }
}
