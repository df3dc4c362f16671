use chrono::NaiveDate;
use matchaway_core::{Error, Result};
use matchaway_domain::{LeagueType, PackageTier, SelectedExtra, Sport, StartingPrice};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::defaults::{
    default_prices, ARRIVAL_SLOTS, CLIENT_PRICE_TOLERANCE, DEFAULT_ARRIVAL_WINDOW,
    DEFAULT_CURRENCY, DEFAULT_DEPARTURE_WINDOW, DEPARTURE_SLOTS, EUROPEAN_LEAGUE_SURCHARGE,
    FLIGHT_STEP_COST, FREE_LEAGUE_REMOVALS, LEAGUE_REMOVAL_COST,
};

/// Chosen boundaries of a departure or arrival window, as minutes of
/// the day. A missing boundary contributes nothing to the flight
/// preference cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start_minute: Option<u16>,
    pub end_minute: Option<u16>,
}

/// Everything the engine needs to price a booking request. Extras are
/// echoed by the client but charged only through their server-known
/// prices; the client-submitted total is never an input here.
#[derive(Debug, Clone, Deserialize)]
pub struct QuoteInput {
    pub sport: Sport,
    pub package: PackageTier,
    pub league: LeagueType,
    pub departure_date: NaiveDate,
    pub return_date: NaiveDate,
    pub adults: u32,
    pub children: u32,
    pub extras: Vec<SelectedExtra>,
    pub has_removed_leagues: bool,
    pub removed_league_count: u32,
    pub departure_window: Option<TimeWindow>,
    pub arrival_window: Option<TimeWindow>,
}

impl QuoteInput {
    /// Saturating: people counts come straight from the client.
    pub fn total_people(&self) -> u32 {
        self.adults.saturating_add(self.children)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineItem {
    pub label: String,
    pub amount: i64,
}

/// Itemized authoritative cost: every non-zero component as a labelled
/// line, summing exactly to `total`. Doubles as the audit trail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PriceBreakdown {
    pub items: Vec<LineItem>,
    pub total: i64,
    pub currency: String,
}

/// Trip length in nights, clamped to the bookable 1..=4 range.
pub fn nights_between(departure: NaiveDate, return_date: NaiveDate) -> u8 {
    (return_date - departure).num_days().unsigned_abs().clamp(1, 4) as u8
}

/// Base package cost and currency for a sport/tier/night-count, from
/// the active StartingPrice row or the static default table. A missing
/// entry is a hard error, never a silent zero.
pub(crate) fn base_package_price(
    sport: Sport,
    package: PackageTier,
    nights: u8,
    prices: &[StartingPrice],
) -> Result<(i64, String)> {
    let missing = || Error::PricingDataMissing {
        sport: sport.as_str().to_string(),
        nights,
    };

    match prices.iter().find(|row| row.is_active && row.sport == sport) {
        Some(row) => {
            let amount = row.price_for(nights, package).ok_or_else(missing)?;
            Ok((amount, row.currency.clone()))
        }
        None => {
            let amount = default_prices(sport)
                .get(&nights)
                .map(|tiers| tiers.for_tier(package))
                .ok_or_else(missing)?;
            Ok((amount, DEFAULT_CURRENCY.to_string()))
        }
    }
}

/// Compute the authoritative price for a booking request. Pure: the
/// same input and price rows always produce the same breakdown.
pub fn quote(input: &QuoteInput, prices: &[StartingPrice]) -> Result<PriceBreakdown> {
    let nights = nights_between(input.departure_date, input.return_date);
    let (package_cost, currency) =
        base_package_price(input.sport, input.package, nights, prices)?;

    let mut items = vec![LineItem {
        label: format!(
            "{} {} package, {} nights",
            input.sport.as_str(),
            input.package.as_str(),
            nights
        ),
        amount: package_cost,
    }];

    let surcharge = if input.league == LeagueType::European {
        EUROPEAN_LEAGUE_SURCHARGE
    } else {
        0
    };
    push_nonzero(&mut items, "European league surcharge", surcharge);

    push_nonzero(&mut items, "Selected extras", extras_cost(&input.extras));
    push_nonzero(
        &mut items,
        "League removals",
        league_removal_cost(
            input.has_removed_leagues,
            input.removed_league_count,
            input.total_people(),
        ),
    );
    push_nonzero(
        &mut items,
        "Flight time preferences",
        flight_preference_cost(input.departure_window.as_ref(), input.arrival_window.as_ref()),
    );

    let total = items.iter().map(|item| item.amount).sum();
    Ok(PriceBreakdown {
        items,
        total,
        currency,
    })
}

fn push_nonzero(items: &mut Vec<LineItem>, label: &str, amount: i64) {
    if amount != 0 {
        items.push(LineItem {
            label: label.to_string(),
            amount,
        });
    }
}

/// Included or free extras contribute nothing, regardless of quantity.
pub fn extras_cost(extras: &[SelectedExtra]) -> i64 {
    extras
        .iter()
        .filter(|extra| extra.is_selected && extra.price > 0)
        .map(|extra| extra.price * i64::from(extra.quantity))
        .sum()
}

/// Removals beyond the free allowance cost a fixed amount per person.
pub fn league_removal_cost(has_removed_leagues: bool, removed_count: u32, total_people: u32) -> i64 {
    if !has_removed_leagues || removed_count == 0 {
        return 0;
    }
    i64::from(removed_count.saturating_sub(FREE_LEAGUE_REMOVALS))
        * LEAGUE_REMOVAL_COST
        * i64::from(total_people)
}

fn nearest_slot(minute: u16, slots: &[u16]) -> usize {
    slots
        .iter()
        .enumerate()
        .min_by_key(|(_, slot)| slot.abs_diff(minute))
        .map(|(index, _)| index)
        .unwrap_or(0)
}

fn window_steps(window: Option<&TimeWindow>, slots: &[u16], default: (usize, usize)) -> usize {
    let Some(window) = window else { return 0 };
    let start = window
        .start_minute
        .map(|minute| nearest_slot(minute, slots).abs_diff(default.0))
        .unwrap_or(0);
    let end = window
        .end_minute
        .map(|minute| nearest_slot(minute, slots).abs_diff(default.1))
        .unwrap_or(0);
    start + end
}

/// Each slot-index step away from the default departure and arrival
/// windows costs a fixed amount; both legs are summed.
pub fn flight_preference_cost(
    departure: Option<&TimeWindow>,
    arrival: Option<&TimeWindow>,
) -> i64 {
    let steps = window_steps(departure, &DEPARTURE_SLOTS, DEFAULT_DEPARTURE_WINDOW)
        + window_steps(arrival, &ARRIVAL_SLOTS, DEFAULT_ARRIVAL_WINDOW);
    steps as i64 * FLIGHT_STEP_COST
}

/// Reconciliation report for a client-echoed total. Advisory by
/// design: it never fails, callers decide whether a mismatch blocks
/// the booking or only logs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PriceValidation {
    pub is_valid: bool,
    pub difference: i64,
    pub server_price: i64,
    pub client_price: i64,
}

pub fn validate_client_price(
    server_price: i64,
    client_price: i64,
    tolerance: Option<i64>,
) -> PriceValidation {
    let tolerance = tolerance.unwrap_or(CLIENT_PRICE_TOLERANCE);
    let difference = (server_price - client_price).abs();
    let is_valid = difference <= tolerance;

    if !is_valid {
        warn!(server_price, client_price, difference, "client price mismatch");
    }

    PriceValidation {
        is_valid,
        difference,
        server_price,
        client_price,
    }
}
