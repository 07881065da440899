use tokio_util::sync::CancellationToken;
use yakugo_core::Result;
use yakugo_types::{Translation, TranslationAddParameter, TranslationUpdateParameter, WordPos};

use crate::cli::{AdminCommand, Command};
use crate::preprocess::normalize;
use crate::state::AppState;

/// What a command produced, before presentation
#[derive(Debug)]
pub enum Output {
    Many(Vec<Translation>),
    One(Translation),
    Done,
}

pub async fn execute(
    state: &AppState,
    cancel: &CancellationToken,
    command: Command,
) -> Result<Output> {
    match command {
        Command::Lookup { text, pos } => lookup(state, cancel, &normalize(&text), pos).await,
        Command::Admin { command } => admin(state, cancel, command).await,
    }
}

async fn lookup(
    state: &AppState,
    cancel: &CancellationToken,
    text: &str,
    pos: Option<WordPos>,
) -> Result<Output> {
    let resolver = &state.lookup;

    match pos {
        Some(pos) => resolver
            .dictionary_lookup_with_pos(cancel, state.from, state.to, text, pos)
            .await
            .map(Output::One),
        None => resolver
            .dictionary_lookup(cancel, state.from, state.to, text)
            .await
            .map(Output::Many),
    }
}

async fn admin(
    state: &AppState,
    cancel: &CancellationToken,
    command: AdminCommand,
) -> Result<Output> {
    let resolver = &state.admin;
    let lang = state.to;

    match command {
        AdminCommand::Letter { letter } => resolver
            .find_by_first_letter(cancel, lang, &letter)
            .await
            .map(Output::Many),
        AdminCommand::Find { text, pos: None } => resolver
            .find_by_text(cancel, lang, &normalize(&text))
            .await
            .map(Output::Many),
        AdminCommand::Find {
            text,
            pos: Some(pos),
        } => resolver
            .find_by_text_and_pos(cancel, lang, &normalize(&text), pos)
            .await
            .map(Output::One),
        AdminCommand::Add {
            text,
            pos,
            translated,
        } => {
            let param = TranslationAddParameter::new(normalize(&text), pos, lang, translated)?;
            resolver.add(cancel, &param).await?;
            Ok(Output::Done)
        }
        AdminCommand::Update {
            text,
            pos,
            translated,
        } => {
            let param = TranslationUpdateParameter::new(translated)?;
            resolver
                .update(cancel, lang, &normalize(&text), pos, &param)
                .await?;
            Ok(Output::Done)
        }
        AdminCommand::Remove { text, pos } => {
            resolver.remove(cancel, lang, &normalize(&text), pos).await?;
            Ok(Output::Done)
        }
    }
}
