use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::Vars;

/// Snapshot files of the two stores. `None` keeps a store in memory only.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(default)]
pub struct StoreConfig {
    pub custom_store_path: Option<PathBuf>,
    pub provider_cache_path: Option<PathBuf>,
}

impl StoreConfig {
    pub(crate) fn from_vars(vars: &Vars) -> Self {
        Self {
            custom_store_path: vars.get("YAKUGO_CUSTOM_STORE_PATH").map(PathBuf::from),
            provider_cache_path: vars.get("YAKUGO_PROVIDER_CACHE_PATH").map(PathBuf::from),
        }
    }
}
