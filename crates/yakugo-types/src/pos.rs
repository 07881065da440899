use std::fmt;

use serde::{Deserialize, Serialize};

use crate::TypeError;

/// Part of speech attached to a translation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
#[repr(i32)]
pub enum WordPos {
    Adjective = 1,
    Adverb = 2,
    Conjunction = 3,
    Determiner = 4,
    Modal = 5,
    Noun = 6,
    Preposition = 7,
    Pronoun = 8,
    Verb = 9,
    Other = 99,
}

impl WordPos {
    pub const ALL: [WordPos; 10] = [
        WordPos::Adjective,
        WordPos::Adverb,
        WordPos::Conjunction,
        WordPos::Determiner,
        WordPos::Modal,
        WordPos::Noun,
        WordPos::Preposition,
        WordPos::Pronoun,
        WordPos::Verb,
        WordPos::Other,
    ];

    /// Parse a provider POS tag (`NOUN`, `adj`, ...). Unknown tags map to `Other`.
    pub fn parse(tag: &str) -> Self {
        match tag.to_lowercase().as_str() {
            "adj" => WordPos::Adjective,
            "adv" => WordPos::Adverb,
            "conj" => WordPos::Conjunction,
            "det" => WordPos::Determiner,
            "modal" => WordPos::Modal,
            "noun" => WordPos::Noun,
            "prep" => WordPos::Preposition,
            "pron" => WordPos::Pronoun,
            "verb" => WordPos::Verb,
            _ => WordPos::Other,
        }
    }

    pub fn code(self) -> i32 {
        self as i32
    }

    pub fn as_str(self) -> &'static str {
        match self {
            WordPos::Adjective => "adjective",
            WordPos::Adverb => "adverb",
            WordPos::Conjunction => "conjunction",
            WordPos::Determiner => "determiner",
            WordPos::Modal => "modal",
            WordPos::Noun => "noun",
            WordPos::Preposition => "preposition",
            WordPos::Pronoun => "pronoun",
            WordPos::Verb => "verb",
            WordPos::Other => "other",
        }
    }
}

impl TryFrom<i32> for WordPos {
    type Error = TypeError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        WordPos::ALL
            .into_iter()
            .find(|pos| pos.code() == value)
            .ok_or_else(|| TypeError::InvalidArgument(format!("invalid word pos: {value}")))
    }
}

impl From<WordPos> for i32 {
    fn from(value: WordPos) -> Self {
        value.code()
    }
}

impl fmt::Display for WordPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
