use chrono::{DateTime, Utc};
use matchaway_core::{Error, Result, Validate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Dashboard operator account. Password hashing and session issuance
/// live with the auth collaborator; this layer only persists the rows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Admin {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Admin {
    pub fn new(email: String, password_hash: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            email,
            password_hash,
            created_at: now,
            updated_at: now,
        }
    }
}

impl Validate for Admin {
    fn validate(&self) -> Result<()> {
        if self.email.trim().is_empty() {
            return Err(Error::validation("email", "must not be empty"));
        }
        if self.password_hash.is_empty() {
            return Err(Error::validation("password_hash", "must not be empty"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: Uuid,
    pub token: String,
    pub admin_id: Uuid,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl Session {
    pub fn new(token: String, admin_id: Uuid, expires_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            token,
            admin_id,
            expires_at,
            created_at: Utc::now(),
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

impl Validate for Session {
    fn validate(&self) -> Result<()> {
        if self.token.trim().is_empty() {
            return Err(Error::validation("token", "must not be empty"));
        }
        Ok(())
    }
}
