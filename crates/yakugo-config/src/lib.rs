use std::env;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use self::azure::AzureConfig;
use self::log::LogConfig;
use self::store::StoreConfig;

pub mod azure;
pub mod log;
pub mod store;

fn default_from_lang() -> String {
    "en".to_string()
}

fn default_to_lang() -> String {
    "ja".to_string()
}

fn default_timeout_seconds() -> u64 {
    30
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct Config {
    pub azure: AzureConfig,
    pub store: StoreConfig,
    pub log: LogConfig,

    /// Language of the looked up text
    #[serde(default = "default_from_lang")]
    pub from_lang: String,
    /// Language of custom entries and provider results
    #[serde(default = "default_to_lang")]
    pub to_lang: String,
    /// Deadline of one command, after which it is cancelled
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            azure: AzureConfig::default(),
            store: StoreConfig::default(),
            log: LogConfig::default(),
            from_lang: default_from_lang(),
            to_lang: default_to_lang(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

impl Config {
    /// Read every setting from the process environment
    pub fn new() -> Self {
        Self::from_vars(|key| env::var(key).ok())
    }

    pub fn from_vars(get: impl Fn(&str) -> Option<String> + 'static) -> Self {
        let vars = Vars(Box::new(get));

        Config {
            azure: AzureConfig::from_vars(&vars),
            store: StoreConfig::from_vars(&vars),
            log: LogConfig::from_vars(&vars),

            from_lang: vars.get("YAKUGO_FROM_LANG").unwrap_or_else(default_from_lang),
            to_lang: vars.get("YAKUGO_TO_LANG").unwrap_or_else(default_to_lang),
            timeout_seconds: vars
                .parse("YAKUGO_TIMEOUT_SECONDS")
                .unwrap_or_else(default_timeout_seconds),
        }
    }
}

/// Variable source; blank values count as unset
pub(crate) struct Vars(Box<dyn Fn(&str) -> Option<String>>);

impl Vars {
    pub(crate) fn get(&self, key: &str) -> Option<String> {
        (self.0)(key)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    pub(crate) fn parse<T: FromStr>(&self, key: &str) -> Option<T> {
        self.get(key).and_then(|v| v.parse().ok())
    }
}
