// Runtime configuration, read once at startup from localStorage.
use serde::{Deserialize, Serialize};
use tracing::level_filters::LevelFilter;

use crate::store::{HttpEntryStore, MemoryEntryStore, Store};

pub const CONFIG_KEY: &str = "ib_config";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreKind {
    #[default]
    Http,
    /// Entries live only as long as the page.
    Memory,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub api_base: String,
    pub store: StoreKind,
    pub log_level: String,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            api_base: "/api".to_string(),
            store: StoreKind::Http,
            log_level: "info".to_string(),
        }
    }
}

impl BoardConfig {
    pub fn from_json(raw: &str) -> Self {
        serde_json::from_str(raw).unwrap_or_default()
    }

    pub fn load() -> Self {
        if let Some(win) = web_sys::window() {
            if let Ok(Some(store)) = win.local_storage() {
                if let Ok(Some(raw)) = store.get_item(CONFIG_KEY) {
                    return Self::from_json(&raw);
                }
            }
        }
        Self::default()
    }

    pub fn max_level(&self) -> LevelFilter {
        self.log_level.parse().unwrap_or(LevelFilter::INFO)
    }

    pub fn build_store(&self) -> Store {
        match self.store {
            StoreKind::Http => Store::Http(HttpEntryStore::new(&self.api_base)),
            StoreKind::Memory => Store::Memory(MemoryEntryStore::default()),
        }
    }
}
