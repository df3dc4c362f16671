use chrono::{DateTime, NaiveDate, Utc};
use matchaway_core::{Error, Result, Validate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::prices::{PackageTier, Sport, MAX_NIGHTS, MIN_NIGHTS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApproveStatus {
    Pending,
    Approved,
    Rejected,
}

/// Admin-set price override for one calendar date. A `price` of `None`
/// means the row carries only workflow state and the base price still
/// applies. The reveal fields mirror the booking approval workflow.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DateOverride {
    pub id: Uuid,
    pub date: NaiveDate,
    pub sport: Sport,
    pub package: PackageTier,
    pub nights: u8,
    pub price: Option<i64>,
    pub approve_status: ApproveStatus,
    pub destination_city: Option<String>,
    pub assigned_match: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DateOverride {
    pub fn new(
        date: NaiveDate,
        sport: Sport,
        package: PackageTier,
        nights: u8,
        price: Option<i64>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            date,
            sport,
            package,
            nights,
            price,
            approve_status: ApproveStatus::Pending,
            destination_city: None,
            assigned_match: None,
            created_at: now,
            updated_at: now,
        }
    }
}

impl Validate for DateOverride {
    fn validate(&self) -> Result<()> {
        if !(MIN_NIGHTS..=MAX_NIGHTS).contains(&self.nights) {
            return Err(Error::validation(
                "nights",
                format!("must be within {MIN_NIGHTS}..={MAX_NIGHTS}"),
            ));
        }
        if matches!(self.price, Some(p) if p < 0) {
            return Err(Error::validation("price", "must not be negative"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DateOverridePatch {
    pub price: Option<i64>,
    pub approve_status: Option<ApproveStatus>,
    pub destination_city: Option<String>,
    pub assigned_match: Option<String>,
}

impl DateOverridePatch {
    pub fn apply(&self, row: &mut DateOverride) {
        if let Some(price) = self.price {
            row.price = Some(price);
        }
        if let Some(status) = self.approve_status {
            row.approve_status = status;
        }
        if let Some(city) = &self.destination_city {
            row.destination_city = Some(city.clone());
        }
        if let Some(assigned_match) = &self.assigned_match {
            row.assigned_match = Some(assigned_match.clone());
        }
        row.updated_at = Utc::now();
    }
}
