pub mod collection;
pub mod config;
pub mod lock;
pub mod store;

pub use collection::{mutate, read_snapshot, CollectionKind, Snapshot};
pub use config::StoreConfig;
pub use lock::LockConfig;
pub use store::{CollectionStore, DocumentStore, UpdateFn};
