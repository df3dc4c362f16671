use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use matchaway_core::{Error, Result};
use serde_json::Value;
use tracing::debug;

use crate::config::StoreConfig;
use crate::lock::{CollectionLock, LockConfig};

/// Updater callback passed through the object-safe [`CollectionStore`]
/// surface. Receives the current snapshot (`Value::Null` when the
/// collection file does not exist yet) and returns the snapshot to
/// commit, or an error to abort without writing.
pub type UpdateFn = Box<dyn FnOnce(Value) -> Result<Value> + Send>;

/// Backend seam for the repositories. The file store below is the only
/// implementation today; a real database can be substituted here
/// without touching repository logic.
#[async_trait]
pub trait CollectionStore: Send + Sync {
    async fn read(&self, collection: &str) -> Result<Value>;
    async fn update(&self, collection: &str, updater: UpdateFn) -> Result<Value>;
}

/// File-backed document store: one JSON file per named collection,
/// serialized writers via a sentinel lock file, atomic visibility via
/// write-to-temp-then-rename. Single process only.
pub struct DocumentStore {
    dir: PathBuf,
    lock: LockConfig,
}

impl DocumentStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            lock: LockConfig::default(),
        }
    }

    pub fn with_lock_config(dir: impl Into<PathBuf>, lock: LockConfig) -> Self {
        Self {
            dir: dir.into(),
            lock,
        }
    }

    pub fn open(config: &StoreConfig) -> Self {
        Self::with_lock_config(config.data_dir.clone(), config.lock_config())
    }

    fn file_path(&self, collection: &str) -> PathBuf {
        self.dir.join(format!("{collection}.json"))
    }

    /// Unsynchronized single read of the current snapshot. Concurrent
    /// writers may commit just before or just after, but the rename
    /// protocol guarantees this never observes a partial document.
    pub async fn read(&self, collection: &str) -> Result<Value> {
        let path = self.file_path(collection);
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(Error::NotFound(format!("collection '{collection}'")));
            }
            Err(e) => {
                return Err(Error::io(format!("reading collection '{collection}'"), e));
            }
        };
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Locked read-modify-write. The updater sees the current snapshot
    /// and its return value becomes the next committed snapshot. An
    /// updater error aborts the transaction with nothing written; the
    /// lock is released on every exit path short of a process crash.
    pub async fn update<F>(&self, collection: &str, updater: F) -> Result<Value>
    where
        F: FnOnce(Value) -> Result<Value> + Send,
    {
        let path = self.file_path(collection);
        let lock = CollectionLock::acquire(&path, collection, &self.lock).await?;

        let outcome = self.run_locked(collection, &path, updater).await;
        let released = lock.release().await;

        match outcome {
            Ok(value) => {
                released?;
                Ok(value)
            }
            Err(e) => Err(e),
        }
    }

    async fn run_locked<F>(&self, collection: &str, path: &PathBuf, updater: F) -> Result<Value>
    where
        F: FnOnce(Value) -> Result<Value> + Send,
    {
        let current = match tokio::fs::read(path).await {
            Ok(bytes) => serde_json::from_slice(&bytes)?,
            // First write against a fresh data directory: hand the
            // updater the collection's empty form.
            Err(e) if e.kind() == ErrorKind::NotFound => Value::Null,
            Err(e) => {
                return Err(Error::io(format!("reading collection '{collection}'"), e));
            }
        };

        let next = updater(current)?;
        self.write_atomic(collection, path, &next).await?;
        Ok(next)
    }

    async fn write_atomic(&self, collection: &str, path: &PathBuf, value: &Value) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(value)?;
        let tmp = path.with_extension("json.tmp");

        tokio::fs::write(&tmp, &bytes).await.map_err(|e| {
            Error::io(format!("writing temp file for collection '{collection}'"), e)
        })?;
        tokio::fs::rename(&tmp, path).await.map_err(|e| {
            Error::io(format!("committing collection '{collection}'"), e)
        })?;

        debug!(collection, bytes = bytes.len(), "collection snapshot committed");
        Ok(())
    }
}

#[async_trait]
impl CollectionStore for DocumentStore {
    async fn read(&self, collection: &str) -> Result<Value> {
        DocumentStore::read(self, collection).await
    }

    async fn update(&self, collection: &str, updater: UpdateFn) -> Result<Value> {
        DocumentStore::update(self, collection, updater).await
    }
}
