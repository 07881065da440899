use std::fmt;

use serde::{Deserialize, Serialize};

use crate::Vars;

fn default_endpoint() -> String {
    "https://api.cognitive.microsofttranslator.com".to_string()
}

fn default_timeout_seconds() -> u64 {
    10
}

#[derive(Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct AzureConfig {
    /// Empty when unset; lookups then fail with an authentication error
    #[serde(default, skip_serializing)]
    pub subscription_key: String,
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl Default for AzureConfig {
    fn default() -> Self {
        Self {
            subscription_key: String::new(),
            endpoint: default_endpoint(),
            region: None,
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

impl fmt::Debug for AzureConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let key = if self.subscription_key.is_empty() {
            ""
        } else {
            "<redacted>"
        };
        f.debug_struct("AzureConfig")
            .field("subscription_key", &key)
            .field("endpoint", &self.endpoint)
            .field("region", &self.region)
            .field("timeout_seconds", &self.timeout_seconds)
            .finish()
    }
}

impl AzureConfig {
    pub(crate) fn from_vars(vars: &Vars) -> Self {
        Self {
            subscription_key: vars.get("YAKUGO_AZURE_SUBSCRIPTION_KEY").unwrap_or_default(),
            endpoint: vars
                .get("YAKUGO_AZURE_ENDPOINT")
                .unwrap_or_else(default_endpoint),
            region: vars.get("YAKUGO_AZURE_REGION"),
            timeout_seconds: vars
                .parse("YAKUGO_AZURE_TIMEOUT_SECONDS")
                .unwrap_or_else(default_timeout_seconds),
        }
    }
}
