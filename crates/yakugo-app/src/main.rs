use std::future::Future;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tokio::signal;
use tokio_util::sync::CancellationToken;
use tracing::Instrument;
use uuid::Uuid;
use yakugo_config::Config;

pub mod cli;
pub mod exit;
pub mod handler;
pub mod logging;
pub mod preprocess;
pub mod presenter;
pub mod state;

#[cfg(test)]
mod tests;

use self::cli::{Cli, Command};
use self::handler::Output;
use self::state::AppState;

#[tokio::main]
async fn main() -> ExitCode {
    let dotenv = dotenvy::dotenv();
    let cli = Cli::parse();
    let config = Config::new();
    logging::init(&config.log);

    match dotenv {
        Ok(path) => tracing::debug!("loaded {}", path.display()),
        Err(e) if e.not_found() => {}
        Err(e) => tracing::warn!("failed to read .env: {e}"),
    }

    let result: anyhow::Result<Option<String>> = async {
        let state = AppState::new(config)?;

        // Ctrl+C
        let shutdown = async {
            if let Err(e) = signal::ctrl_c().await {
                tracing::error!("failed to listen for ctrl+c: {e}");
                std::future::pending::<()>().await;
            }
        };

        let output = run(&state, cli.command, shutdown).await?;
        presenter::render(&output).context("failed to encode output")
    }
    .await;

    match result {
        Ok(Some(json)) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Ok(None) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e:#}");
            exit::exit_code(&e)
        }
    }
}

/// Run one command, cancelling it on `shutdown` or when the configured deadline passes
pub async fn run(
    state: &AppState,
    command: Command,
    shutdown: impl Future<Output = ()>,
) -> anyhow::Result<Output> {
    let cancel = CancellationToken::new();
    let timeout = state.command_timeout();

    let span = tracing::info_span!("command", request_id = %Uuid::new_v4());
    let command = handler::execute(state, &cancel, command).instrument(span);
    tokio::pin!(command);
    tokio::pin!(shutdown);

    let result = tokio::select! {
        biased;
        _ = &mut shutdown => {
            tracing::warn!("shutdown requested, cancelling command");
            cancel.cancel();
            command.await
        }
        _ = tokio::time::sleep(timeout) => {
            tracing::warn!("command exceeded {timeout:?}, cancelling");
            cancel.cancel();
            command.await
        }
        result = &mut command => result,
    };

    Ok(result?)
}
