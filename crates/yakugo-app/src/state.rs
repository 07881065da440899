use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use yakugo_config::Config;
use yakugo_core::{AdminResolver, LookupResolver, RepositoryFactory};
use yakugo_provider_azure::AzureDictionaryClient;
use yakugo_store::MemoryRepositoryFactory;
use yakugo_translator::{DictionaryClient, ProviderMetadata};
use yakugo_types::{Lang2, Languages};

pub struct AppState {
    pub config: Config,
    /// Language of looked up words
    pub from: Lang2,
    /// Language of translations and of every custom entry
    pub to: Lang2,
    pub lookup: LookupResolver,
    pub admin: AdminResolver,
}

impl AppState {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let factory = MemoryRepositoryFactory::open(
            config.store.custom_store_path.clone(),
            config.store.provider_cache_path.clone(),
        )
        .context("failed to open translation stores")?;

        let azure = &config.azure;
        let client = AzureDictionaryClient::new(
            azure.subscription_key.clone(),
            azure.endpoint.clone(),
            azure.region.clone(),
            Duration::from_secs(azure.timeout_seconds),
        )
        .context("failed to build Azure client")?;

        Self::with_parts(config, Arc::new(factory), Arc::new(client))
    }

    pub fn with_parts(
        config: Config,
        factory: Arc<dyn RepositoryFactory>,
        client: Arc<dyn DictionaryClient>,
    ) -> anyhow::Result<Self> {
        let languages = Languages::new()?;
        let from = languages
            .resolve(&config.from_lang)
            .context("unsupported YAKUGO_FROM_LANG")?;
        let to = languages
            .resolve(&config.to_lang)
            .context("unsupported YAKUGO_TO_LANG")?;

        let provider = client.metadata();
        if missing_api_key(&config, &provider) {
            tracing::warn!(
                "{} needs YAKUGO_AZURE_SUBSCRIPTION_KEY, provider lookups will fail",
                provider.name
            );
        }
        tracing::debug!("resolving {from} -> {to} with provider {}", provider.name);

        Ok(Self {
            config,
            from,
            to,
            lookup: LookupResolver::new(factory.clone(), client),
            admin: AdminResolver::new(factory),
        })
    }

    pub fn command_timeout(&self) -> Duration {
        Duration::from_secs(self.config.timeout_seconds)
    }
}

fn missing_api_key(config: &Config, provider: &ProviderMetadata) -> bool {
    provider.requires_api_key && config.azure.subscription_key.is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider(requires_api_key: bool) -> ProviderMetadata {
        ProviderMetadata {
            name: "test".to_string(),
            requires_api_key,
        }
    }

    #[test]
    fn api_key_is_only_missing_when_the_provider_needs_one() {
        let mut config = Config::default();
        assert!(missing_api_key(&config, &provider(true)));
        assert!(!missing_api_key(&config, &provider(false)));

        config.azure.subscription_key = "key".to_string();
        assert!(!missing_api_key(&config, &provider(true)));
    }

    #[test]
    fn azure_client_requires_a_key() {
        let config = Config::default();
        let client =
            AzureDictionaryClient::new("", &config.azure.endpoint, None, Duration::from_secs(1))
                .unwrap();
        assert!(missing_api_key(&config, &client.metadata()));
    }
}
