use std::sync::Arc;

use matchaway_core::{Error, Result, Validate};
use matchaway_store::{mutate, read_snapshot, CollectionStore};

use crate::admin::Admin;
use crate::collections::Admins;

/// Operator accounts in `admins.json`. Credential checks belong to the
/// auth collaborator; this layer only persists rows.
pub struct AdminRepository {
    store: Arc<dyn CollectionStore>,
}

impl AdminRepository {
    pub fn new(store: Arc<dyn CollectionStore>) -> Self {
        Self { store }
    }

    pub async fn create(&self, admin: Admin) -> Result<Admin> {
        admin.validate()?;
        let created = admin.clone();
        let email = admin.email.clone();

        mutate::<Admins, _, _>(self.store.as_ref(), move |mut snapshot| {
            if snapshot.entities.iter().any(|a| a.email == email) {
                return Err(Error::validation("email", "an admin with this email exists"));
            }
            snapshot.entities.push(admin);
            Ok(snapshot)
        })
        .await?;

        Ok(created)
    }

    pub async fn list(&self) -> Result<Vec<Admin>> {
        match read_snapshot::<Admins, _>(self.store.as_ref()).await {
            Ok(snapshot) => Ok(snapshot.entities),
            Err(Error::NotFound(_)) => Ok(Vec::new()),
            Err(e) => Err(e),
        }
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<Admin>> {
        Ok(self.list().await?.into_iter().find(|a| a.email == email))
    }
}
