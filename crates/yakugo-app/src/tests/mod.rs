mod run_tests;

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use yakugo_config::Config;
use yakugo_store::MemoryRepositoryFactory;
use yakugo_translator::{
    AzureTranslationCandidate, DictionaryClient, ProviderMetadata, TranslateError,
};
use yakugo_types::Lang2;

use crate::state::AppState;

/// Answers every lookup with the same candidates, or never answers at all
#[derive(Default)]
pub struct ScriptedClient {
    candidates: Vec<AzureTranslationCandidate>,
    hang: bool,
    calls: AtomicUsize,
}

impl ScriptedClient {
    pub fn returning(candidates: Vec<AzureTranslationCandidate>) -> Self {
        Self {
            candidates,
            ..Default::default()
        }
    }

    pub fn hanging() -> Self {
        Self {
            hang: true,
            ..Default::default()
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl DictionaryClient for ScriptedClient {
    async fn dictionary_lookup(
        &self,
        _text: &str,
        _from: Lang2,
        _to: Lang2,
    ) -> Result<Vec<AzureTranslationCandidate>, TranslateError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.hang {
            std::future::pending::<()>().await;
        }
        Ok(self.candidates.clone())
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "scripted".to_string(),
            requires_api_key: false,
        }
    }
}

pub fn app(client: Arc<ScriptedClient>) -> AppState {
    app_with(Config::default(), client)
}

pub fn app_with(config: Config, client: Arc<ScriptedClient>) -> AppState {
    AppState::with_parts(config, Arc::new(MemoryRepositoryFactory::default()), client).unwrap()
}
