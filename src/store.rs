//! Entry store clients.
//!
//! The board only ever lists every entry and creates new ones. `HttpEntryStore`
//! talks to the `/text-entries` REST collection; `MemoryEntryStore` keeps
//! entries in-process for offline sessions and tests.

use std::cell::RefCell;
use std::rc::Rc;

use chrono::Utc;
use gloo_net::http::Request;
use serde::Deserialize;
use thiserror::Error;

use crate::model::{NewTextEntry, TextEntry};

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("entry store unavailable: {0}")]
    Unavailable(String),
    #[error("invalid entry: {0}")]
    Validation(String),
}

#[allow(async_fn_in_trait)]
pub trait EntryStore {
    async fn fetch_all(&self) -> Result<Vec<TextEntry>, StoreError>;
    async fn create(&self, entry: NewTextEntry) -> Result<TextEntry, StoreError>;
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpEntryStore {
    base: String,
}

impl HttpEntryStore {
    pub fn new(api_base: &str) -> Self {
        Self {
            base: api_base.trim_end_matches('/').to_string(),
        }
    }

    pub fn collection_url(&self) -> String {
        format!("{}/text-entries", self.base)
    }
}

fn unavailable(err: impl std::fmt::Display) -> StoreError {
    StoreError::Unavailable(err.to_string())
}

impl EntryStore for HttpEntryStore {
    async fn fetch_all(&self) -> Result<Vec<TextEntry>, StoreError> {
        let resp = Request::get(&self.collection_url())
            .send()
            .await
            .map_err(unavailable)?;
        if !resp.ok() {
            return Err(StoreError::Unavailable(format!("HTTP {}", resp.status())));
        }
        resp.json::<Vec<TextEntry>>().await.map_err(unavailable)
    }

    async fn create(&self, entry: NewTextEntry) -> Result<TextEntry, StoreError> {
        entry.validate()?;
        let resp = Request::post(&self.collection_url())
            .json(&entry)
            .map_err(unavailable)?
            .send()
            .await
            .map_err(unavailable)?;
        match resp.status() {
            200 | 201 => resp.json::<TextEntry>().await.map_err(unavailable),
            400 => {
                let msg = resp
                    .json::<ErrorBody>()
                    .await
                    .map(|b| b.error)
                    .unwrap_or_else(|_| "rejected by server".to_string());
                Err(StoreError::Validation(msg))
            }
            status => Err(StoreError::Unavailable(format!("HTTP {status}"))),
        }
    }
}

#[derive(Debug, Default)]
struct MemoryInner {
    entries: Vec<TextEntry>,
    next_id: u64,
}

/// Process-local store. Clones share the same entries.
#[derive(Debug, Clone, Default)]
pub struct MemoryEntryStore {
    inner: Rc<RefCell<MemoryInner>>,
}

impl MemoryEntryStore {
    pub fn entries(&self) -> Vec<TextEntry> {
        self.inner.borrow().entries.clone()
    }

    pub fn insert(&self, entry: NewTextEntry) -> Result<TextEntry, StoreError> {
        entry.validate()?;
        let mut inner = self.inner.borrow_mut();
        inner.next_id += 1;
        let created = TextEntry {
            id: format!("mem-{}", inner.next_id),
            content: entry.content,
            x: entry.x,
            y: entry.y,
            created_at: Utc::now(),
        };
        inner.entries.push(created.clone());
        Ok(created)
    }
}

impl EntryStore for MemoryEntryStore {
    async fn fetch_all(&self) -> Result<Vec<TextEntry>, StoreError> {
        Ok(self.entries())
    }

    async fn create(&self, entry: NewTextEntry) -> Result<TextEntry, StoreError> {
        self.insert(entry)
    }
}

/// The store picked by configuration.
#[derive(Debug, Clone)]
pub enum Store {
    Http(HttpEntryStore),
    Memory(MemoryEntryStore),
}

impl EntryStore for Store {
    async fn fetch_all(&self) -> Result<Vec<TextEntry>, StoreError> {
        match self {
            Store::Http(s) => s.fetch_all().await,
            Store::Memory(s) => s.fetch_all().await,
        }
    }

    async fn create(&self, entry: NewTextEntry) -> Result<TextEntry, StoreError> {
        match self {
            Store::Http(s) => s.create(entry).await,
            Store::Memory(s) => s.create(entry).await,
        }
    }
}

impl PartialEq for Store {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Store::Http(a), Store::Http(b)) => a == b,
            (Store::Memory(a), Store::Memory(b)) => Rc::ptr_eq(&a.inner, &b.inner),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::WorldPos;

    #[test]
    fn memory_store_assigns_ids_and_keeps_entries() {
        let store = MemoryEntryStore::default();
        let a = store.insert(NewTextEntry::at(WorldPos::new(1, 2), "a")).unwrap();
        let b = store.insert(NewTextEntry::at(WorldPos::new(-3, 4), "b")).unwrap();
        assert_ne!(a.id, b.id);
        assert_eq!(b.position(), WorldPos::new(-3, 4));

        let shared = store.clone();
        assert_eq!(shared.entries().len(), 2);
    }

    #[test]
    fn memory_store_rejects_empty_content() {
        let store = MemoryEntryStore::default();
        let err = store.insert(NewTextEntry::at(WorldPos::default(), "  ")).unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));
        assert!(store.entries().is_empty());
    }

    #[test]
    fn collection_url_ignores_trailing_slash() {
        assert_eq!(HttpEntryStore::new("/api/").collection_url(), "/api/text-entries");
        assert_eq!(
            HttpEntryStore::new("https://board.example/api").collection_url(),
            "https://board.example/api/text-entries"
        );
    }
}
