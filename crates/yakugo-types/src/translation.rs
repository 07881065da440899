use chrono::{DateTime, Utc};

use crate::{Lang2, TypeError, WordPos};

/// Resolved translation of one (lang, text, pos) entry.
///
/// Never mutated after construction; editing an entry means building a new one.
#[derive(Debug, Clone, PartialEq)]
pub struct Translation {
    version: u32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    text: String,
    pos: WordPos,
    lang: Lang2,
    translated: String,
    provider: String,
}

impl Translation {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        version: u32,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
        text: impl Into<String>,
        pos: WordPos,
        lang: Lang2,
        translated: impl Into<String>,
        provider: impl Into<String>,
    ) -> Result<Self, TypeError> {
        let text = text.into();

        if version < 1 {
            return Err(TypeError::InvalidArgument(format!(
                "translation version must be >= 1, got {version}"
            )));
        }
        if text.is_empty() {
            return Err(TypeError::InvalidArgument(
                "translation text is required".to_string(),
            ));
        }

        Ok(Self {
            version,
            created_at,
            updated_at,
            text,
            pos,
            lang,
            translated: translated.into(),
            provider: provider.into(),
        })
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn pos(&self) -> WordPos {
        self.pos
    }

    pub fn lang(&self) -> Lang2 {
        self.lang
    }

    pub fn translated(&self) -> &str {
        &self.translated
    }

    pub fn provider(&self) -> &str {
        &self.provider
    }
}

/// New custom dictionary entry
#[derive(Debug, Clone, PartialEq)]
pub struct TranslationAddParameter {
    text: String,
    pos: WordPos,
    lang: Lang2,
    translated: String,
}

impl TranslationAddParameter {
    pub fn new(
        text: impl Into<String>,
        pos: WordPos,
        lang: Lang2,
        translated: impl Into<String>,
    ) -> Result<Self, TypeError> {
        let text = text.into();
        if text.is_empty() {
            return Err(TypeError::InvalidArgument("text is required".to_string()));
        }

        Ok(Self {
            text,
            pos,
            lang,
            translated: translated.into(),
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn pos(&self) -> WordPos {
        self.pos
    }

    pub fn lang(&self) -> Lang2 {
        self.lang
    }

    pub fn translated(&self) -> &str {
        &self.translated
    }
}

/// Replacement translated text for an existing entry
#[derive(Debug, Clone, PartialEq)]
pub struct TranslationUpdateParameter {
    translated: String,
}

impl TranslationUpdateParameter {
    pub fn new(translated: impl Into<String>) -> Result<Self, TypeError> {
        let translated = translated.into();
        if translated.is_empty() {
            return Err(TypeError::InvalidArgument(
                "translated text is required".to_string(),
            ));
        }

        Ok(Self { translated })
    }

    pub fn translated(&self) -> &str {
        &self.translated
    }
}
