use std::sync::Arc;

use matchaway_core::{Error, Result, Validate};
use matchaway_store::{mutate, read_snapshot, CollectionStore};
use uuid::Uuid;

use crate::collections::Faqs;
use crate::faq::{Faq, FaqPatch};

/// Marketing-page FAQ entries in `faqs.json`.
pub struct FaqRepository {
    store: Arc<dyn CollectionStore>,
}

impl FaqRepository {
    pub fn new(store: Arc<dyn CollectionStore>) -> Self {
        Self { store }
    }

    pub async fn create(&self, faq: Faq) -> Result<Faq> {
        faq.validate()?;
        let created = faq.clone();

        mutate::<Faqs, _, _>(self.store.as_ref(), move |mut snapshot| {
            snapshot.entities.push(faq);
            Ok(snapshot)
        })
        .await?;

        Ok(created)
    }

    /// Entries sorted by display position.
    pub async fn list(&self) -> Result<Vec<Faq>> {
        let mut faqs = match read_snapshot::<Faqs, _>(self.store.as_ref()).await {
            Ok(snapshot) => snapshot.entities,
            Err(Error::NotFound(_)) => Vec::new(),
            Err(e) => return Err(e),
        };
        faqs.sort_by_key(|f| f.position);
        Ok(faqs)
    }

    pub async fn update(&self, id: Uuid, patch: FaqPatch) -> Result<Faq> {
        let snapshot = mutate::<Faqs, _, _>(self.store.as_ref(), move |mut snapshot| {
            let faq = snapshot
                .entities
                .iter_mut()
                .find(|f| f.id == id)
                .ok_or_else(|| Error::NotFound(format!("faq '{id}'")))?;
            patch.apply(faq);
            Ok(snapshot)
        })
        .await?;

        snapshot
            .entities
            .into_iter()
            .find(|f| f.id == id)
            .ok_or_else(|| Error::NotFound(format!("faq '{id}'")))
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        mutate::<Faqs, _, _>(self.store.as_ref(), move |mut snapshot| {
            let before = snapshot.entities.len();
            snapshot.entities.retain(|f| f.id != id);
            if snapshot.entities.len() == before {
                return Err(Error::NotFound(format!("faq '{id}'")));
            }
            Ok(snapshot)
        })
        .await?;
        Ok(())
    }
}
