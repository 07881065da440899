use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use yakugo_translator::{
    AzureTranslationCandidate, DictionaryClient, ProviderMetadata, TranslateError,
};
use yakugo_types::Lang2;

use crate::response::{DictionaryLookupResult, LookupInput, into_candidates};

pub const DEFAULT_ENDPOINT: &str = "https://api.cognitive.microsofttranslator.com";

const API_VERSION: &str = "3.0";

#[derive(Clone)]
pub struct AzureDictionaryClient {
    client: reqwest::Client,
    subscription_key: String,
    endpoint: String,
    region: Option<String>,
}

impl AzureDictionaryClient {
    pub fn new(
        subscription_key: impl Into<String>,
        endpoint: impl Into<String>,
        region: Option<String>,
        timeout: Duration,
    ) -> Result<Self, TranslateError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            subscription_key: subscription_key.into(),
            endpoint: endpoint.into(),
            region: region.filter(|r| !r.is_empty()),
        })
    }

    fn lookup_url(&self) -> String {
        format!("{}/dictionary/lookup", self.endpoint.trim_end_matches('/'))
    }
}

#[async_trait]
impl DictionaryClient for AzureDictionaryClient {
    async fn dictionary_lookup(
        &self,
        text: &str,
        from: Lang2,
        to: Lang2,
    ) -> Result<Vec<AzureTranslationCandidate>, TranslateError> {
        if self.subscription_key.is_empty() {
            return Err(TranslateError::AuthenticationError);
        }
        if from == to {
            return Err(TranslateError::UnsupportedLanguagePair {
                from: from.to_string(),
                to: to.to_string(),
            });
        }

        let mut request = self
            .client
            .post(self.lookup_url())
            .query(&[
                ("api-version", API_VERSION),
                ("from", from.as_str()),
                ("to", to.as_str()),
            ])
            .header("Ocp-Apim-Subscription-Key", &self.subscription_key)
            .json(&[LookupInput { text }]);
        if let Some(region) = &self.region {
            request = request.header("Ocp-Apim-Subscription-Region", region);
        }

        tracing::debug!("dictionary lookup {text:?} [{from} -> {to}]");
        let response = request.send().await?;

        match response.status() {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                return Err(TranslateError::AuthenticationError);
            }
            StatusCode::TOO_MANY_REQUESTS => return Err(TranslateError::RateLimitExceeded),
            status if !status.is_success() => {
                let body = response.text().await.unwrap_or_default();
                return Err(TranslateError::ApiError(format!("HTTP {status}: {body}")));
            }
            _ => {}
        }

        let results: Vec<DictionaryLookupResult> = response.json().await.map_err(|e| {
            TranslateError::ApiError(format!("Failed to parse response: {e}"))
        })?;

        Ok(into_candidates(text, results))
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "Azure Translator".to_string(),
            requires_api_key: true,
        }
    }
}
