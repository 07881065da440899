use serde::Serialize;
use yakugo_types::{Lang2, Translation};

use crate::handler::Output;

#[derive(Debug, Serialize)]
struct TranslationView<'a> {
    lang2: Lang2,
    text: &'a str,
    pos: i32,
    translated: &'a str,
    provider: &'a str,
}

impl<'a> From<&'a Translation> for TranslationView<'a> {
    fn from(t: &'a Translation) -> Self {
        Self {
            lang2: t.lang(),
            text: t.text(),
            pos: t.pos().code(),
            translated: t.translated(),
            provider: t.provider(),
        }
    }
}

#[derive(Serialize)]
struct ResultsView<'a> {
    results: Vec<TranslationView<'a>>,
}

/// JSON for stdout; `None` when the command has nothing to print
pub fn render(output: &Output) -> serde_json::Result<Option<String>> {
    let json = match output {
        Output::Many(translations) => serde_json::to_string_pretty(&ResultsView {
            results: translations.iter().map(TranslationView::from).collect(),
        })?,
        Output::One(translation) => serde_json::to_string_pretty(&TranslationView::from(translation))?,
        Output::Done => return Ok(None),
    };
    Ok(Some(json))
}
