use std::future::{pending, ready};
use std::sync::Arc;
use std::time::Duration;

use yakugo_config::Config;
use yakugo_core::Error;
use yakugo_translator::AzureTranslationCandidate;
use yakugo_types::WordPos;

use super::{ScriptedClient, app, app_with};
use crate::cli::{AdminCommand, Command};
use crate::handler::Output;
use crate::run;

fn lookup(text: &str, pos: Option<WordPos>) -> Command {
    Command::Lookup {
        text: text.to_string(),
        pos,
    }
}

fn admin(command: AdminCommand) -> Command {
    Command::Admin { command }
}

fn row(
    text: &str,
    pos: WordPos,
    translated: &str,
    provider: &str,
) -> (String, WordPos, String, String) {
    (
        text.to_string(),
        pos,
        translated.to_string(),
        provider.to_string(),
    )
}

fn many(output: Output) -> Vec<(String, WordPos, String, String)> {
    match output {
        Output::Many(results) => results
            .iter()
            .map(|t| row(t.text(), t.pos(), t.translated(), t.provider()))
            .collect(),
        other => panic!("expected a result list, got {other:?}"),
    }
}

#[tokio::test]
async fn lookup_normalizes_query_and_caches_provider_answer() {
    let client = Arc::new(ScriptedClient::returning(vec![
        AzureTranslationCandidate::new(WordPos::Noun, "本", 0.9),
        AzureTranslationCandidate::new(WordPos::Verb, "予約する", 0.3),
    ]));
    let state = app(client.clone());

    let first = run(&state, lookup("  ｂｏｏｋ ", None), pending()).await.unwrap();
    assert_eq!(
        many(first),
        vec![
            row("book", WordPos::Noun, "本", "azure"),
            row("book", WordPos::Verb, "予約する", "azure"),
        ]
    );

    run(&state, lookup("book", None), pending()).await.unwrap();
    assert_eq!(client.call_count(), 1);

    // cached entries are visible to the admin view too
    let found = run(
        &state,
        admin(AdminCommand::Find {
            text: "book".into(),
            pos: None,
        }),
        pending(),
    )
    .await
    .unwrap();
    assert_eq!(many(found).len(), 2);
}

#[tokio::test]
async fn custom_entry_overrides_provider_in_lookup() {
    let client = Arc::new(ScriptedClient::returning(vec![AzureTranslationCandidate::new(
        WordPos::Noun,
        "本",
        1.0,
    )]));
    let state = app(client);

    let added = run(
        &state,
        admin(AdminCommand::Add {
            text: "book".into(),
            pos: WordPos::Noun,
            translated: "書籍".into(),
        }),
        pending(),
    )
    .await
    .unwrap();
    assert!(matches!(added, Output::Done));

    let noun = run(&state, lookup("book", Some(WordPos::Noun)), pending())
        .await
        .unwrap();
    match noun {
        Output::One(t) => {
            assert_eq!(t.translated(), "書籍");
            assert_eq!(t.provider(), "custom");
        }
        other => panic!("expected one result, got {other:?}"),
    }
}

#[tokio::test]
async fn admin_update_then_remove() {
    let state = app(Arc::new(ScriptedClient::default()));

    run(
        &state,
        admin(AdminCommand::Update {
            text: "run".into(),
            pos: WordPos::Verb,
            translated: "走る".into(),
        }),
        pending(),
    )
    .await
    .unwrap();

    let letter = run(
        &state,
        admin(AdminCommand::Letter { letter: "R".into() }),
        pending(),
    )
    .await
    .unwrap();
    assert_eq!(
        many(letter),
        vec![row("run", WordPos::Verb, "走る", "custom")]
    );

    let remove = || {
        admin(AdminCommand::Remove {
            text: "run".into(),
            pos: WordPos::Verb,
        })
    };
    run(&state, remove(), pending()).await.unwrap();

    let again = run(&state, remove(), pending()).await.unwrap_err();
    assert!(matches!(
        again.downcast_ref::<Error>(),
        Some(Error::TranslationNotFound)
    ));
}

#[tokio::test]
async fn blank_query_is_invalid() {
    let client = Arc::new(ScriptedClient::default());
    let state = app(client.clone());

    let error = run(&state, lookup(" \n", None), pending()).await.unwrap_err();
    assert!(matches!(
        error.downcast_ref::<Error>(),
        Some(Error::InvalidArgument(_))
    ));
    assert_eq!(client.call_count(), 0);
}

#[tokio::test]
async fn shutdown_before_start_cancels_without_provider_call() {
    let client = Arc::new(ScriptedClient::returning(vec![AzureTranslationCandidate::new(
        WordPos::Noun,
        "本",
        1.0,
    )]));
    let state = app(client.clone());

    let error = run(&state, lookup("book", None), ready(())).await.unwrap_err();
    assert!(matches!(error.downcast_ref::<Error>(), Some(Error::Cancelled)));
    assert_eq!(client.call_count(), 0);
}

#[tokio::test]
async fn shutdown_interrupts_hanging_provider() {
    let client = Arc::new(ScriptedClient::hanging());
    let state = app(client.clone());

    let shutdown = tokio::time::sleep(Duration::from_millis(20));
    let error = run(&state, lookup("book", None), shutdown).await.unwrap_err();

    assert!(matches!(error.downcast_ref::<Error>(), Some(Error::Cancelled)));
    assert_eq!(client.call_count(), 1);
}

#[tokio::test]
async fn deadline_cancels_hanging_provider() {
    let client = Arc::new(ScriptedClient::hanging());
    let config = Config {
        timeout_seconds: 0,
        ..Config::default()
    };
    let state = app_with(config, client);

    let error = run(&state, lookup("book", None), pending()).await.unwrap_err();
    assert!(matches!(error.downcast_ref::<Error>(), Some(Error::Cancelled)));
}
