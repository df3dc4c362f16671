use std::sync::Arc;

use chrono::NaiveDate;
use matchaway_core::{Error, Result, Validate};
use matchaway_store::{mutate, read_snapshot, CollectionStore};
use tracing::info;
use uuid::Uuid;

use crate::collections::DateOverrides;
use crate::overrides::{DateOverride, DateOverridePatch};
use crate::prices::{PackageTier, Sport};

/// Per-date price overrides in `date-overrides.json`. Unlike bookings
/// these are plain admin rows, so delete is a hard removal.
pub struct DateOverrideRepository {
    store: Arc<dyn CollectionStore>,
}

impl DateOverrideRepository {
    pub fn new(store: Arc<dyn CollectionStore>) -> Self {
        Self { store }
    }

    pub async fn create(&self, row: DateOverride) -> Result<DateOverride> {
        row.validate()?;
        let created = row.clone();

        mutate::<DateOverrides, _, _>(self.store.as_ref(), move |mut snapshot| {
            snapshot.entities.push(row);
            Ok(snapshot)
        })
        .await?;

        info!(date = %created.date, sport = created.sport.as_str(), "date override created");
        Ok(created)
    }

    pub async fn list(&self) -> Result<Vec<DateOverride>> {
        match read_snapshot::<DateOverrides, _>(self.store.as_ref()).await {
            Ok(snapshot) => Ok(snapshot.entities),
            Err(Error::NotFound(_)) => Ok(Vec::new()),
            Err(e) => Err(e),
        }
    }

    /// The override row for an exact (date, sport, package), if any.
    pub async fn find(
        &self,
        date: NaiveDate,
        sport: Sport,
        package: PackageTier,
    ) -> Result<Option<DateOverride>> {
        Ok(self
            .list()
            .await?
            .into_iter()
            .find(|row| row.date == date && row.sport == sport && row.package == package))
    }

    pub async fn update(&self, id: Uuid, patch: DateOverridePatch) -> Result<DateOverride> {
        let snapshot = mutate::<DateOverrides, _, _>(self.store.as_ref(), move |mut snapshot| {
            let row = snapshot
                .entities
                .iter_mut()
                .find(|r| r.id == id)
                .ok_or_else(|| Error::NotFound(format!("date override '{id}'")))?;
            patch.apply(row);
            Ok(snapshot)
        })
        .await?;

        snapshot
            .entities
            .into_iter()
            .find(|r| r.id == id)
            .ok_or_else(|| Error::NotFound(format!("date override '{id}'")))
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        mutate::<DateOverrides, _, _>(self.store.as_ref(), move |mut snapshot| {
            let before = snapshot.entities.len();
            snapshot.entities.retain(|r| r.id != id);
            if snapshot.entities.len() == before {
                return Err(Error::NotFound(format!("date override '{id}'")));
            }
            Ok(snapshot)
        })
        .await?;

        info!(override_id = %id, "date override deleted");
        Ok(())
    }
}
