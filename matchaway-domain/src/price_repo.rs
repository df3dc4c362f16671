use std::sync::Arc;

use matchaway_core::{Error, Result, Validate};
use matchaway_store::{mutate, read_snapshot, CollectionStore};
use tracing::info;
use uuid::Uuid;

use crate::collections::StartingPrices;
use crate::prices::{Sport, StartingPrice, StartingPricePatch};

/// Admin-managed base price tables in `starting-prices.json`.
pub struct StartingPriceRepository {
    store: Arc<dyn CollectionStore>,
}

impl StartingPriceRepository {
    pub fn new(store: Arc<dyn CollectionStore>) -> Self {
        Self { store }
    }

    pub async fn create(&self, row: StartingPrice) -> Result<StartingPrice> {
        row.validate()?;
        let created = row.clone();

        mutate::<StartingPrices, _, _>(self.store.as_ref(), move |mut snapshot| {
            snapshot.entities.push(row);
            Ok(snapshot)
        })
        .await?;

        info!(sport = created.sport.as_str(), "starting price created");
        Ok(created)
    }

    pub async fn list(&self) -> Result<Vec<StartingPrice>> {
        match read_snapshot::<StartingPrices, _>(self.store.as_ref()).await {
            Ok(snapshot) => Ok(snapshot.entities),
            Err(Error::NotFound(_)) => Ok(Vec::new()),
            Err(e) => Err(e),
        }
    }

    /// The active base price row for a sport, if any. The pricing
    /// engine falls back to the static default table when this is
    /// `None`.
    pub async fn active_for_sport(&self, sport: Sport) -> Result<Option<StartingPrice>> {
        Ok(self
            .list()
            .await?
            .into_iter()
            .find(|row| row.is_active && row.sport == sport))
    }

    pub async fn update(&self, id: Uuid, patch: StartingPricePatch) -> Result<StartingPrice> {
        let snapshot = mutate::<StartingPrices, _, _>(self.store.as_ref(), move |mut snapshot| {
            let row = snapshot
                .entities
                .iter_mut()
                .find(|r| r.id == id)
                .ok_or_else(|| Error::NotFound(format!("starting price '{id}'")))?;
            patch.apply(row);
            Ok(snapshot)
        })
        .await?;

        snapshot
            .entities
            .into_iter()
            .find(|r| r.id == id)
            .ok_or_else(|| Error::NotFound(format!("starting price '{id}'")))
    }
}
