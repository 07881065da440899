use serde::{Deserialize, Serialize};

use crate::Vars;

fn default_level() -> String {
    "info".to_string()
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct LogConfig {
    /// Filter used when `RUST_LOG` is not set
    #[serde(default = "default_level")]
    pub level: String,
    #[serde(default)]
    pub json: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            json: false,
        }
    }
}

impl LogConfig {
    pub(crate) fn from_vars(vars: &Vars) -> Self {
        Self {
            level: vars.get("YAKUGO_LOG_LEVEL").unwrap_or_else(default_level),
            json: vars.parse("YAKUGO_LOG_JSON").unwrap_or(false),
        }
    }
}
