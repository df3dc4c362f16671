use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use matchaway_core::{Error, Result, Validate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const MIN_NIGHTS: u8 = 1;
pub const MAX_NIGHTS: u8 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sport {
    Football,
    Basketball,
    Combined,
}

impl Sport {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sport::Football => "football",
            Sport::Basketball => "basketball",
            Sport::Combined => "combined",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageTier {
    Standard,
    Premium,
}

impl PackageTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            PackageTier::Standard => "standard",
            PackageTier::Premium => "premium",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeagueType {
    Domestic,
    European,
}

/// Base price for one night-count, split by package tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierPrices {
    pub standard: i64,
    pub premium: i64,
}

impl TierPrices {
    pub fn for_tier(&self, tier: PackageTier) -> i64 {
        match tier {
            PackageTier::Standard => self.standard,
            PackageTier::Premium => self.premium,
        }
    }
}

/// Base price table for one sport, keyed by night count (1..=4).
/// Mutated only by admin price management.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartingPrice {
    pub id: Uuid,
    pub sport: Sport,
    pub prices_by_duration: BTreeMap<u8, TierPrices>,
    pub currency: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl StartingPrice {
    pub fn new(sport: Sport, prices_by_duration: BTreeMap<u8, TierPrices>, currency: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            sport,
            prices_by_duration,
            currency,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn price_for(&self, nights: u8, tier: PackageTier) -> Option<i64> {
        self.prices_by_duration
            .get(&nights)
            .map(|tiers| tiers.for_tier(tier))
    }
}

impl Validate for StartingPrice {
    fn validate(&self) -> Result<()> {
        if self.currency.trim().is_empty() {
            return Err(Error::validation("currency", "must not be empty"));
        }
        for (nights, tiers) in &self.prices_by_duration {
            if !(MIN_NIGHTS..=MAX_NIGHTS).contains(nights) {
                return Err(Error::validation(
                    "prices_by_duration",
                    format!("night count {nights} is outside {MIN_NIGHTS}..={MAX_NIGHTS}"),
                ));
            }
            if tiers.standard < 0 || tiers.premium < 0 {
                return Err(Error::validation(
                    format!("prices_by_duration.{nights}"),
                    "prices must not be negative",
                ));
            }
        }
        Ok(())
    }
}

/// Fields admin price management may change on an existing row.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StartingPricePatch {
    pub prices_by_duration: Option<BTreeMap<u8, TierPrices>>,
    pub currency: Option<String>,
    pub is_active: Option<bool>,
}

impl StartingPricePatch {
    pub fn apply(&self, row: &mut StartingPrice) {
        if let Some(prices) = &self.prices_by_duration {
            row.prices_by_duration = prices.clone();
        }
        if let Some(currency) = &self.currency {
            row.currency = currency.clone();
        }
        if let Some(is_active) = self.is_active {
            row.is_active = is_active;
        }
        row.updated_at = Utc::now();
    }
}
