//! In-memory store for tests: counts calls, can be switched to fail or hang.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use super::{merge_fields, Document, DocumentStore, Fields};
use crate::errors::AppError;

#[derive(Default)]
pub(crate) struct MemoryStore {
    collections: Mutex<BTreeMap<String, Vec<Document>>>,
    next_id: AtomicUsize,
    calls: AtomicUsize,
    failing: AtomicBool,
    hanging: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of store operations issued so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Make every call wait forever, like an unresponsive backend.
    pub fn set_hanging(&self, hanging: bool) {
        self.hanging.store(hanging, Ordering::SeqCst);
    }

    /// Raw snapshot of a collection.
    pub fn snapshot(&self, collection: &str) -> Vec<Document> {
        self.collections
            .lock()
            .unwrap()
            .get(collection)
            .cloned()
            .unwrap_or_default()
    }

    async fn enter(&self) -> Result<(), AppError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.hanging.load(Ordering::SeqCst) {
            std::future::pending::<()>().await;
        }
        if self.failing.load(Ordering::SeqCst) {
            return Err(AppError::StoreUnavailable("store offline".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn list(&self, collection: &str) -> Result<Vec<Document>, AppError> {
        self.enter().await?;
        Ok(self.snapshot(collection))
    }

    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, AppError> {
        self.enter().await?;
        Ok(self.snapshot(collection).into_iter().find(|d| d.id == id))
    }

    async fn insert(&self, collection: &str, mut fields: Fields) -> Result<String, AppError> {
        self.enter().await?;
        let id = format!("doc-{}", self.next_id.fetch_add(1, Ordering::SeqCst));
        fields.remove("id");
        self.collections
            .lock()
            .unwrap()
            .entry(collection.to_string())
            .or_default()
            .push(Document {
                id: id.clone(),
                fields,
            });
        Ok(id)
    }

    async fn update(&self, collection: &str, id: &str, fields: Fields) -> Result<(), AppError> {
        self.enter().await?;
        let mut collections = self.collections.lock().unwrap();
        let doc = collections
            .get_mut(collection)
            .and_then(|docs| docs.iter_mut().find(|d| d.id == id))
            .ok_or_else(|| AppError::NotFound(format!("Document {}/{} not found", collection, id)))?;
        merge_fields(&mut doc.fields, fields);
        Ok(())
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<bool, AppError> {
        self.enter().await?;
        let mut collections = self.collections.lock().unwrap();
        let Some(docs) = collections.get_mut(collection) else {
            return Ok(false);
        };
        let before = docs.len();
        docs.retain(|d| d.id != id);
        Ok(docs.len() != before)
    }

    async fn set_merge(&self, collection: &str, id: &str, fields: Fields) -> Result<(), AppError> {
        self.enter().await?;
        let mut collections = self.collections.lock().unwrap();
        let docs = collections.entry(collection.to_string()).or_default();
        match docs.iter_mut().find(|d| d.id == id) {
            Some(doc) => merge_fields(&mut doc.fields, fields),
            None => docs.push(Document {
                id: id.to_string(),
                fields,
            }),
        }
        Ok(())
    }
}
