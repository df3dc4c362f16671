use chrono::{DateTime, Utc};
use matchaway_core::{Error, Result, Validate};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};

use crate::store::CollectionStore;

/// Static description of one named collection: the file stem, the JSON
/// key holding the entity array, and the entity type it deserializes
/// into. Each repository owns exactly one of these.
pub trait CollectionKind {
    const NAME: &'static str;
    const ENTITY_KEY: &'static str;
    type Entity: Serialize + DeserializeOwned + Validate + Clone + Send + Sync + 'static;
}

/// Full in-memory content of a collection at a point in time.
pub struct Snapshot<K: CollectionKind> {
    pub entities: Vec<K::Entity>,
    pub updated_at: DateTime<Utc>,
}

impl<K: CollectionKind> std::fmt::Debug for Snapshot<K>
where
    K::Entity: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Snapshot")
            .field("entities", &self.entities)
            .field("updated_at", &self.updated_at)
            .finish()
    }
}

impl<K: CollectionKind> Snapshot<K> {
    pub fn empty() -> Self {
        Self {
            entities: Vec::new(),
            updated_at: Utc::now(),
        }
    }

    /// Decode and validate a raw store value. `Null` (missing file) is
    /// the empty collection.
    pub fn decode(value: Value) -> Result<Self> {
        if value.is_null() {
            return Ok(Self::empty());
        }

        let obj = value.as_object().ok_or_else(|| {
            Error::validation(K::NAME, "collection document is not a JSON object")
        })?;
        let rows = obj.get(K::ENTITY_KEY).cloned().ok_or_else(|| {
            Error::validation(
                format!("{}.{}", K::NAME, K::ENTITY_KEY),
                "missing entity array",
            )
        })?;
        let entities: Vec<K::Entity> = serde_json::from_value(rows)?;

        let updated_at = obj
            .get("meta")
            .and_then(|meta| meta.get("updatedAt"))
            .and_then(Value::as_str)
            .and_then(|s| s.parse().ok())
            .unwrap_or_else(Utc::now);

        let snapshot = Self {
            entities,
            updated_at,
        };
        snapshot.validate()?;
        Ok(snapshot)
    }

    /// Validate and serialize for persistence, stamping `meta.updatedAt`.
    pub fn encode(&self) -> Result<Value> {
        self.validate()?;
        Ok(json!({
            K::ENTITY_KEY: serde_json::to_value(&self.entities)?,
            "meta": { "updatedAt": Utc::now().to_rfc3339() },
        }))
    }

    pub fn validate(&self) -> Result<()> {
        for entity in &self.entities {
            entity.validate()?;
        }
        Ok(())
    }
}

/// Validated read of a whole collection. `NotFound` if the file is
/// missing.
pub async fn read_snapshot<K, S>(store: &S) -> Result<Snapshot<K>>
where
    K: CollectionKind,
    S: CollectionStore + ?Sized,
{
    let value = store.read(K::NAME).await?;
    Snapshot::decode(value)
}

/// Typed read-modify-write: decode, apply `f`, re-validate, commit.
/// Either the whole result is validated and persisted or nothing
/// changes.
pub async fn mutate<K, S, F>(store: &S, f: F) -> Result<Snapshot<K>>
where
    K: CollectionKind + 'static,
    S: CollectionStore + ?Sized,
    F: FnOnce(Snapshot<K>) -> Result<Snapshot<K>> + Send + 'static,
{
    let value = store
        .update(
            K::NAME,
            Box::new(move |current| {
                let snapshot = Snapshot::<K>::decode(current)?;
                let next = f(snapshot)?;
                next.encode()
            }),
        )
        .await?;
    Snapshot::decode(value)
}
