use chrono::NaiveDate;
use matchaway_core::Result;
use matchaway_domain::{DateOverride, PackageTier, Sport, StartingPrice};

use crate::engine::base_package_price;

/// Effective price for one calendar date: an override row for the
/// exact (date, sport, package) with a price set wins; otherwise the
/// base price for (sport, package, nights) applies. Two levels, not a
/// rules engine.
pub fn effective_price(
    date: NaiveDate,
    sport: Sport,
    package: PackageTier,
    nights: u8,
    overrides: &[DateOverride],
    prices: &[StartingPrice],
) -> Result<i64> {
    let overridden = overrides
        .iter()
        .find(|row| row.date == date && row.sport == sport && row.package == package)
        .and_then(|row| row.price);

    if let Some(price) = overridden {
        return Ok(price);
    }

    base_package_price(sport, package, nights, prices).map(|(amount, _)| amount)
}
