use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::TypeError;

pub const LANG2_LEN: usize = 2;
pub const LANG3_LEN: usize = 3;
pub const LANG5_LEN: usize = 5;

/// Two letter language code (ISO 639-1), e.g. `en`, `ja`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Lang2([u8; LANG2_LEN]);

impl Lang2 {
    pub const EN: Lang2 = Lang2(*b"en");
    pub const JA: Lang2 = Lang2(*b"ja");

    pub fn new(code: &str) -> Result<Self, TypeError> {
        letters(code).map(Self)
    }

    pub fn as_str(&self) -> &str {
        std::str::from_utf8(&self.0).unwrap_or_default()
    }

    /// Three letter form, `___` for codes outside the mapping table
    pub fn to_lang3(&self) -> &'static str {
        match &self.0 {
            b"en" => "eng",
            b"ja" => "jpn",
            _ => "___",
        }
    }
}

/// Three letter language code (ISO 639-2), e.g. `eng`, `jpn`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Lang3([u8; LANG3_LEN]);

impl Lang3 {
    pub const ENG: Lang3 = Lang3(*b"eng");
    pub const JPN: Lang3 = Lang3(*b"jpn");

    pub fn new(code: &str) -> Result<Self, TypeError> {
        letters(code).map(Self)
    }

    pub fn as_str(&self) -> &str {
        std::str::from_utf8(&self.0).unwrap_or_default()
    }

    pub fn to_lang2(&self) -> Option<Lang2> {
        match &self.0 {
            b"eng" => Some(Lang2::EN),
            b"jpn" => Some(Lang2::JA),
            _ => None,
        }
    }
}

/// Language tag with region, e.g. `en-US`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Lang5([u8; LANG5_LEN]);

impl Lang5 {
    pub const EN_US: Lang5 = Lang5(*b"en-US");

    pub fn new(code: &str) -> Result<Self, TypeError> {
        let bytes: [u8; LANG5_LEN] = code
            .as_bytes()
            .try_into()
            .map_err(|_| TypeError::InvalidLanguageCode(code.to_string()))?;

        if !bytes.iter().all(|b| b.is_ascii_alphanumeric() || *b == b'-') {
            return Err(TypeError::InvalidLanguageCode(code.to_string()));
        }

        Ok(Self(bytes))
    }

    pub fn as_str(&self) -> &str {
        std::str::from_utf8(&self.0).unwrap_or_default()
    }

    /// Language subtag of `xx-YY`
    pub fn to_lang2(&self) -> Option<Lang2> {
        if self.0[2] != b'-' {
            return None;
        }
        Lang2::new(&self.as_str()[..LANG2_LEN]).ok()
    }
}

fn letters<const N: usize>(code: &str) -> Result<[u8; N], TypeError> {
    let bytes: [u8; N] = code
        .as_bytes()
        .try_into()
        .map_err(|_| TypeError::InvalidLanguageCode(code.to_string()))?;

    if !bytes.iter().all(u8::is_ascii_lowercase) {
        return Err(TypeError::InvalidLanguageCode(code.to_string()));
    }

    Ok(bytes)
}

macro_rules! impl_code_conversions {
    ($($ty:ident),*) => {$(
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = TypeError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }

        impl TryFrom<String> for $ty {
            type Error = TypeError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(&value)
            }
        }

        impl From<$ty> for String {
            fn from(value: $ty) -> Self {
                value.as_str().to_string()
            }
        }
    )*};
}

impl_code_conversions!(Lang2, Lang3, Lang5);

/// Registry of the language codes the service works with.
///
/// Built once at startup and handed to whoever needs to resolve
/// user supplied codes.
#[derive(Debug, Clone)]
pub struct Languages {
    pub en: Lang2,
    pub ja: Lang2,
    pub eng: Lang3,
    pub jpn: Lang3,
    pub en_us: Lang5,
}

impl Languages {
    pub fn new() -> Result<Self, TypeError> {
        Ok(Self {
            en: Lang2::new("en")?,
            ja: Lang2::new("ja")?,
            eng: Lang3::new("eng")?,
            jpn: Lang3::new("jpn")?,
            en_us: Lang5::new("en-US")?,
        })
    }

    pub fn supported(&self) -> [Lang2; 2] {
        [self.en, self.ja]
    }

    /// Resolve a user supplied code to a supported two letter code.
    ///
    /// Case is ignored. Besides `en`/`ja` this accepts the registered
    /// three letter forms (`eng`, `jpn`) and regional tag (`en-US`).
    pub fn resolve(&self, code: &str) -> Result<Lang2, TypeError> {
        let lowered = code.to_ascii_lowercase();
        let lang = match code.len() {
            LANG3_LEN => Lang3::new(&lowered)
                .ok()
                .filter(|lang3| [self.eng, self.jpn].contains(lang3))
                .and_then(|lang3| lang3.to_lang2()),
            LANG5_LEN => Lang5::new(code)
                .ok()
                .filter(|lang5| lang5.as_str().eq_ignore_ascii_case(self.en_us.as_str()))
                .and_then(|_| self.en_us.to_lang2()),
            _ => Lang2::new(&lowered).ok(),
        };

        lang.filter(|lang| self.supported().contains(lang))
            .ok_or_else(|| TypeError::InvalidLanguageCode(code.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lang2_requires_two_letters() {
        assert_eq!(Lang2::new("ja").unwrap(), Lang2::JA);

        for bad in ["", "j", "jpn", "j1", "EN", "Ja"] {
            assert_eq!(
                Lang2::new(bad),
                Err(TypeError::InvalidLanguageCode(bad.to_string()))
            );
        }
    }

    #[test]
    fn lang2_maps_to_lang3() {
        assert_eq!(Lang2::EN.to_lang3(), "eng");
        assert_eq!(Lang2::JA.to_lang3(), "jpn");
        assert_eq!(Lang2::new("fr").unwrap().to_lang3(), "___");
    }

    #[test]
    fn lang3_and_lang5_back_to_lang2() {
        assert_eq!(Lang3::new("jpn").unwrap().to_lang2(), Some(Lang2::JA));
        assert_eq!(Lang3::new("fra").unwrap().to_lang2(), None);
        assert!(Lang3::new("en").is_err());
        assert!(Lang3::new("ENG").is_err());

        assert_eq!(Lang5::EN_US.to_lang2(), Some(Lang2::EN));
        assert_eq!(Lang5::new("en0US").unwrap().to_lang2(), None);
        assert!(Lang5::new("en-USA").is_err());
    }

    #[test]
    fn lang2_serializes_as_string() {
        let json = serde_json::to_string(&Lang2::JA).unwrap();
        assert_eq!(json, "\"ja\"");

        let back: Lang2 = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Lang2::JA);
        assert!(serde_json::from_str::<Lang2>("\"jpn\"").is_err());
    }

    #[test]
    fn registry_resolves_supported_codes() {
        let languages = Languages::new().unwrap();
        assert_eq!(languages.resolve("ja").unwrap(), Lang2::JA);
        assert_eq!(languages.resolve("EN").unwrap(), Lang2::EN);
        assert_eq!(languages.resolve("jpn").unwrap(), Lang2::JA);
        assert_eq!(languages.resolve("Eng").unwrap(), Lang2::EN);
        assert_eq!(languages.resolve("en-US").unwrap(), Lang2::EN);
        assert_eq!(languages.resolve("EN-us").unwrap(), Lang2::EN);

        for bad in ["fr", "fra", "ja-JP", "en_US", "e", ""] {
            assert_eq!(
                languages.resolve(bad),
                Err(TypeError::InvalidLanguageCode(bad.to_string()))
            );
        }
    }
}
