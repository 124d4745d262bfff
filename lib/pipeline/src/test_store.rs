//! In-memory vectorizer store for pipeline unit tests

use parking_lot::RwLock;
use std::collections::HashMap;
use vendx_core::{
    Error, Result, TfidfVectorizer, VectorStore, VectorizerKey, VectorizerLocator,
};

#[derive(Default)]
pub struct MemoryVectorStore {
    blobs: RwLock<HashMap<String, TfidfVectorizer>>,
    pub fail_reads: RwLock<bool>,
}

impl MemoryVectorStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.blobs.read().len()
    }

    /// Drop a persisted blob so its locator dangles
    pub fn remove(&self, locator: &VectorizerLocator) {
        self.blobs.write().remove(locator.as_str());
    }

    /// Make every subsequent `get` fail as if the store were down
    pub fn set_fail_reads(&self, fail: bool) {
        *self.fail_reads.write() = fail;
    }
}

impl VectorStore for MemoryVectorStore {
    fn put(&self, key: &VectorizerKey, vectorizer: &TfidfVectorizer) -> Result<VectorizerLocator> {
        if !vectorizer.is_fitted() {
            return Err(Error::UnfittedVectorizer(key.file_name()));
        }
        let name = key.file_name();
        self.blobs.write().insert(name.clone(), vectorizer.clone());
        Ok(VectorizerLocator::new(name))
    }

    fn get(&self, locator: &VectorizerLocator) -> Result<TfidfVectorizer> {
        if *self.fail_reads.read() {
            return Err(Error::Storage("store unreachable".to_string()));
        }
        self.blobs
            .read()
            .get(locator.as_str())
            .cloned()
            .ok_or_else(|| Error::VectorizerNotFound(locator.to_string()))
    }
}
