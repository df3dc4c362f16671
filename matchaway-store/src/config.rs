use std::env;
use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

use crate::lock::LockConfig;

#[derive(Debug, Deserialize, Clone)]
pub struct StoreConfig {
    pub data_dir: PathBuf,
    #[serde(default = "default_lock_retry_ms")]
    pub lock_retry_ms: u64,
    #[serde(default = "default_lock_max_attempts")]
    pub lock_max_attempts: u32,
}

fn default_lock_retry_ms() -> u64 {
    50
}

fn default_lock_max_attempts() -> u32 {
    100
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            lock_retry_ms: default_lock_retry_ms(),
            lock_max_attempts: default_lock_max_attempts(),
        }
    }
}

impl StoreConfig {
    /// Layered load: `config/default`, then `config/{RUN_MODE}`, then
    /// `config/local`, then `MATCHAWAY__`-prefixed environment
    /// variables. All file sources are optional.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            .set_default("data_dir", "data")?
            .set_default("lock_retry_ms", default_lock_retry_ms())?
            .set_default("lock_max_attempts", u64::from(default_lock_max_attempts()))?
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(config::Environment::with_prefix("MATCHAWAY").separator("__"))
            .build()?;

        s.try_deserialize()
    }

    pub fn lock_config(&self) -> LockConfig {
        LockConfig {
            retry_interval: Duration::from_millis(self.lock_retry_ms),
            max_attempts: self.lock_max_attempts,
        }
    }
}
