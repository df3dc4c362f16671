use std::sync::Arc;

use chrono::NaiveDate;
use matchaway_core::Result;
use matchaway_domain::{
    DateOverrideRepository, PackageTier, Sport, StartingPriceRepository,
};
use matchaway_store::CollectionStore;

use crate::engine::{quote, PriceBreakdown, QuoteInput};
use crate::resolve;

/// Pricing entry point for the booking wizard and admin calendar. One
/// unlocked read of the price collections per call, then pure
/// arithmetic; this service never mutates storage.
pub struct PricingService {
    prices: StartingPriceRepository,
    overrides: DateOverrideRepository,
}

impl PricingService {
    pub fn new(store: Arc<dyn CollectionStore>) -> Self {
        Self {
            prices: StartingPriceRepository::new(Arc::clone(&store)),
            overrides: DateOverrideRepository::new(store),
        }
    }

    pub async fn calculate_price(&self, input: &QuoteInput) -> Result<PriceBreakdown> {
        let prices = self.prices.list().await?;
        quote(input, &prices)
    }

    pub async fn effective_price(
        &self,
        date: NaiveDate,
        sport: Sport,
        package: PackageTier,
        nights: u8,
    ) -> Result<i64> {
        let overrides = self.overrides.list().await?;
        let prices = self.prices.list().await?;
        resolve::effective_price(date, sport, package, nights, &overrides, &prices)
    }
}
