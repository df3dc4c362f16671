//! Cost constants and fallback base prices. This module is the single
//! source of truth for every number the engine charges; nothing else
//! may carry its own copy of a base price.

use std::collections::BTreeMap;

use matchaway_domain::{Sport, TierPrices};

/// Flat surcharge for a European-league selection.
pub const EUROPEAN_LEAGUE_SURCHARGE: i64 = 50;

/// Per-person cost of each league removal beyond the free allowance.
pub const LEAGUE_REMOVAL_COST: i64 = 20;

/// Removals included in every package.
pub const FREE_LEAGUE_REMOVALS: u32 = 1;

/// Cost per slot-index step away from the default flight window.
pub const FLIGHT_STEP_COST: i64 = 20;

/// Allowed drift between a server quote and the client-echoed total
/// before the reconciliation check flags it.
pub const CLIENT_PRICE_TOLERANCE: i64 = 5;

pub const DEFAULT_CURRENCY: &str = "EUR";

/// Minute-of-day boundaries of the selectable departure windows,
/// identical for every sport.
pub const DEPARTURE_SLOTS: [u16; 6] = [360, 480, 600, 720, 840, 960];

/// Minute-of-day boundaries of the selectable arrival windows.
pub const ARRIVAL_SLOTS: [u16; 6] = [600, 720, 840, 960, 1080, 1200];

/// (start, end) slot indices of the window that costs nothing.
pub const DEFAULT_DEPARTURE_WINDOW: (usize, usize) = (1, 3);
pub const DEFAULT_ARRIVAL_WINDOW: (usize, usize) = (1, 3);

/// Fallback base prices used when no active StartingPrice row exists
/// for a sport, keyed by night count.
pub fn default_prices(sport: Sport) -> BTreeMap<u8, TierPrices> {
    let rows: [(u8, i64, i64); 4] = match sport {
        Sport::Football => [(1, 99, 149), (2, 169, 239), (3, 259, 349), (4, 329, 449)],
        Sport::Basketball => [(1, 89, 139), (2, 159, 219), (3, 239, 329), (4, 309, 419)],
        Sport::Combined => [(1, 129, 189), (2, 219, 299), (3, 329, 449), (4, 419, 569)],
    };
    rows.into_iter()
        .map(|(nights, standard, premium)| (nights, TierPrices { standard, premium }))
        .collect()
}
