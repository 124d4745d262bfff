//! File-backed persisted vectorizer store
//!
//! One bincode blob per fitted vectorizer, published atomically
//! (write-to-temporary-then-rename) so a concurrent reader never
//! observes a partial write. Locators are paths relative to the store
//! root.

use atomicwrites::{AtomicFile, OverwriteBehavior};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;
use vendx_core::{
    Error, Result, TfidfVectorizer, VectorStore, VectorizerKey, VectorizerLocator,
};

/// Persisted vectorizer store rooted at a directory
pub struct FsVectorStore {
    root: PathBuf,
}

impl FsVectorStore {
    /// Open (creating if needed) a store rooted at `root`
    pub fn new<P: AsRef<Path>>(root: P) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        std::fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    #[inline]
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn blob_path(&self, locator: &VectorizerLocator) -> PathBuf {
        self.root.join(locator.as_str())
    }
}

impl VectorStore for FsVectorStore {
    fn put(&self, key: &VectorizerKey, vectorizer: &TfidfVectorizer) -> Result<VectorizerLocator> {
        if !vectorizer.is_fitted() {
            return Err(Error::UnfittedVectorizer(format!(
                "refusing to persist empty vocabulary for {}",
                key.file_name()
            )));
        }

        let blob = bincode::serialize(vectorizer).map_err(|e| Error::Serialization(e.to_string()))?;

        let locator = VectorizerLocator::new(key.file_name());
        let path = self.blob_path(&locator);
        AtomicFile::new(&path, OverwriteBehavior::AllowOverwrite)
            .write(|file| file.write_all(&blob))
            .map_err(|e| Error::Storage(e.to_string()))?;

        debug!(locator = %locator, bytes = blob.len(), "vectorizer persisted");
        Ok(locator)
    }

    fn get(&self, locator: &VectorizerLocator) -> Result<TfidfVectorizer> {
        let path = self.blob_path(locator);
        let blob = match std::fs::read(&path) {
            Ok(blob) => blob,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(Error::VectorizerNotFound(locator.to_string()));
            }
            Err(e) => return Err(Error::Storage(e.to_string())),
        };

        let vectorizer: TfidfVectorizer =
            bincode::deserialize(&blob).map_err(|e| Error::Serialization(e.to_string()))?;

        if !vectorizer.is_fitted() {
            return Err(Error::UnfittedVectorizer(locator.to_string()));
        }

        Ok(vectorizer)
    }
}
