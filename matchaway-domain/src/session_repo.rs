use std::sync::Arc;

use chrono::Utc;
use matchaway_core::{Error, Result, Validate};
use matchaway_store::{mutate, read_snapshot, CollectionStore};
use uuid::Uuid;

use crate::admin::Session;
use crate::collections::Sessions;

/// Login sessions in `sessions.json`, on the same store primitive as
/// everything else.
pub struct SessionRepository {
    store: Arc<dyn CollectionStore>,
}

impl SessionRepository {
    pub fn new(store: Arc<dyn CollectionStore>) -> Self {
        Self { store }
    }

    pub async fn create(&self, session: Session) -> Result<Session> {
        session.validate()?;
        let created = session.clone();

        mutate::<Sessions, _, _>(self.store.as_ref(), move |mut snapshot| {
            snapshot.entities.push(session);
            Ok(snapshot)
        })
        .await?;

        Ok(created)
    }

    /// Look up a live session; expired rows are treated as absent.
    pub async fn find_by_token(&self, token: &str) -> Result<Option<Session>> {
        let now = Utc::now();
        let sessions = match read_snapshot::<Sessions, _>(self.store.as_ref()).await {
            Ok(snapshot) => snapshot.entities,
            Err(Error::NotFound(_)) => Vec::new(),
            Err(e) => return Err(e),
        };
        Ok(sessions
            .into_iter()
            .find(|s| s.token == token && !s.is_expired(now)))
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        mutate::<Sessions, _, _>(self.store.as_ref(), move |mut snapshot| {
            let before = snapshot.entities.len();
            snapshot.entities.retain(|s| s.id != id);
            if snapshot.entities.len() == before {
                return Err(Error::NotFound(format!("session '{id}'")));
            }
            Ok(snapshot)
        })
        .await?;
        Ok(())
    }

    /// Drop every expired session in one transaction.
    pub async fn purge_expired(&self) -> Result<()> {
        let now = Utc::now();
        mutate::<Sessions, _, _>(self.store.as_ref(), move |mut snapshot| {
            snapshot.entities.retain(|s| !s.is_expired(now));
            Ok(snapshot)
        })
        .await?;
        Ok(())
    }
}
