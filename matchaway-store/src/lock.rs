use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

use matchaway_core::{Error, Result};
use tracing::{debug, warn};

/// Lock polling parameters. With the defaults a writer waits at most
/// five seconds for a contended collection before giving up.
#[derive(Debug, Clone)]
pub struct LockConfig {
    pub retry_interval: Duration,
    pub max_attempts: u32,
}

impl Default for LockConfig {
    fn default() -> Self {
        Self {
            retry_interval: Duration::from_millis(50),
            max_attempts: 100,
        }
    }
}

/// Held lock on one collection file, backed by a zero-content sentinel
/// at `<collection>.json.lock`. Exclusive creation of the sentinel is
/// the acquisition; deleting it is the release. A process crash while
/// the sentinel exists leaves the collection locked until the file is
/// cleared by hand.
pub(crate) struct CollectionLock {
    path: PathBuf,
    collection: String,
}

impl CollectionLock {
    pub(crate) async fn acquire(
        target: &Path,
        collection: &str,
        config: &LockConfig,
    ) -> Result<Self> {
        let mut os = target.as_os_str().to_owned();
        os.push(".lock");
        let path = PathBuf::from(os);

        for attempt in 0..config.max_attempts {
            match tokio::fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&path)
                .await
            {
                Ok(_) => {
                    if attempt > 0 {
                        debug!(collection, attempt, "acquired lock after contention");
                    }
                    return Ok(Self {
                        path,
                        collection: collection.to_string(),
                    });
                }
                Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                    tokio::time::sleep(config.retry_interval).await;
                }
                Err(e) => {
                    return Err(Error::io(
                        format!("creating lock file for collection '{collection}'"),
                        e,
                    ));
                }
            }
        }

        warn!(collection, "gave up waiting for collection lock");
        Err(Error::LockTimeout(collection.to_string()))
    }

    /// Idempotent: a sentinel that is already gone counts as released.
    pub(crate) async fn release(self) -> Result<()> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Error::io(
                format!("releasing lock file for collection '{}'", self.collection),
                e,
            )),
        }
    }
}
