use chrono::{DateTime, NaiveDate, Utc};
use matchaway_core::{Error, Result, Validate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::prices::{LeagueType, PackageTier, Sport};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Completed,
    Rejected,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Unpaid,
    Paid,
    Failed,
}

/// One extra chosen in the booking wizard. Prices are echoed from the
/// client for display, but the pricing engine only ever charges from
/// the server-known catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedExtra {
    pub id: String,
    pub name: String,
    pub price: i64,
    pub quantity: u32,
    pub is_selected: bool,
    pub is_included: bool,
}

/// A travel reservation request. The surprise destination
/// (`destination_city`, `assigned_match`) stays unset until an admin
/// approves the booking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub id: Uuid,
    pub status: BookingStatus,
    pub payment_status: PaymentStatus,
    pub sport: Sport,
    pub package: PackageTier,
    pub league: LeagueType,
    pub adults: u32,
    pub children: u32,
    pub departure_date: NaiveDate,
    pub return_date: NaiveDate,
    pub extras: Vec<SelectedExtra>,
    pub total_cost: i64,
    pub currency: String,
    pub contact_email: String,
    pub destination_city: Option<String>,
    pub assigned_match: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Booking {
    /// Saturating: hostile counts must not overflow before validation
    /// gets a chance to reject them.
    pub fn total_people(&self) -> u32 {
        self.adults.saturating_add(self.children)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateBookingRequest {
    pub sport: Sport,
    pub package: PackageTier,
    pub league: LeagueType,
    pub adults: u32,
    pub children: u32,
    pub departure_date: NaiveDate,
    pub return_date: NaiveDate,
    pub extras: Vec<SelectedExtra>,
    pub total_cost: i64,
    pub currency: String,
    pub contact_email: String,
}

impl Booking {
    /// Every booking starts pending and unpaid; the destination reveal
    /// fields stay empty until approval.
    pub fn from_request(request: CreateBookingRequest) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            status: BookingStatus::Pending,
            payment_status: PaymentStatus::Unpaid,
            sport: request.sport,
            package: request.package,
            league: request.league,
            adults: request.adults,
            children: request.children,
            departure_date: request.departure_date,
            return_date: request.return_date,
            extras: request.extras,
            total_cost: request.total_cost,
            currency: request.currency,
            contact_email: request.contact_email,
            destination_city: None,
            assigned_match: None,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }
}

impl Validate for Booking {
    fn validate(&self) -> Result<()> {
        if self.total_people() == 0 {
            return Err(Error::validation("adults", "at least one traveller is required"));
        }
        if self.return_date < self.departure_date {
            return Err(Error::validation(
                "return_date",
                "must not be before the departure date",
            ));
        }
        if self.total_cost < 0 {
            return Err(Error::validation("total_cost", "must not be negative"));
        }
        if self.currency.trim().is_empty() {
            return Err(Error::validation("currency", "must not be empty"));
        }
        if self.contact_email.trim().is_empty() {
            return Err(Error::validation("contact_email", "must not be empty"));
        }
        for (i, extra) in self.extras.iter().enumerate() {
            if extra.price < 0 {
                return Err(Error::validation(
                    format!("extras[{i}].price"),
                    "must not be negative",
                ));
            }
        }
        Ok(())
    }
}

/// Checkout-session-shaped projection handed to the payment
/// collaborator after a booking is created.
#[derive(Debug, Clone, Serialize)]
pub struct CheckoutRef {
    pub booking_id: Uuid,
    pub amount: i64,
    pub currency: String,
}

/// The only fields an admin or the payment webhook may change on an
/// existing booking. Anything not listed here cannot be overwritten by
/// a partial update.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookingPatch {
    pub status: Option<BookingStatus>,
    pub payment_status: Option<PaymentStatus>,
    pub destination_city: Option<String>,
    pub assigned_match: Option<String>,
}

impl BookingPatch {
    /// Patch the payment webhook sends on a successful checkout.
    pub fn payment_succeeded() -> Self {
        Self {
            status: Some(BookingStatus::Completed),
            payment_status: Some(PaymentStatus::Paid),
            ..Self::default()
        }
    }

    /// Patch the payment webhook sends on a failed checkout.
    pub fn payment_failed() -> Self {
        Self {
            payment_status: Some(PaymentStatus::Failed),
            ..Self::default()
        }
    }

    /// Admin approval: confirm and reveal the destination.
    pub fn approve(destination_city: String, assigned_match: String) -> Self {
        Self {
            status: Some(BookingStatus::Confirmed),
            destination_city: Some(destination_city),
            assigned_match: Some(assigned_match),
            ..Self::default()
        }
    }

    pub fn apply(&self, booking: &mut Booking) {
        if let Some(status) = self.status {
            booking.status = status;
        }
        if let Some(payment_status) = self.payment_status {
            booking.payment_status = payment_status;
        }
        if let Some(city) = &self.destination_city {
            booking.destination_city = Some(city.clone());
        }
        if let Some(assigned_match) = &self.assigned_match {
            booking.assigned_match = Some(assigned_match.clone());
        }
        booking.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> CreateBookingRequest {
        CreateBookingRequest {
            sport: Sport::Football,
            package: PackageTier::Standard,
            league: LeagueType::Domestic,
            adults: 2,
            children: 1,
            departure_date: NaiveDate::from_ymd_opt(2025, 6, 6).unwrap(),
            return_date: NaiveDate::from_ymd_opt(2025, 6, 8).unwrap(),
            extras: vec![],
            total_cost: 338,
            currency: "EUR".into(),
            contact_email: "fan@example.com".into(),
        }
    }

    #[test]
    fn new_bookings_start_pending_and_unpaid() {
        let booking = Booking::from_request(request());
        assert_eq!(booking.status, BookingStatus::Pending);
        assert_eq!(booking.payment_status, PaymentStatus::Unpaid);
        assert!(booking.destination_city.is_none());
        assert!(booking.deleted_at.is_none());
        assert_eq!(booking.total_people(), 3);
    }

    #[test]
    fn payment_succeeded_patch_completes_and_marks_paid() {
        let mut booking = Booking::from_request(request());
        BookingPatch::payment_succeeded().apply(&mut booking);
        assert_eq!(booking.status, BookingStatus::Completed);
        assert_eq!(booking.payment_status, PaymentStatus::Paid);
    }

    #[test]
    fn patch_cannot_touch_unlisted_fields() {
        let mut booking = Booking::from_request(request());
        let cost_before = booking.total_cost;
        BookingPatch::approve("Madrid".into(), "Real Madrid vs Sevilla".into())
            .apply(&mut booking);
        assert_eq!(booking.total_cost, cost_before);
        assert_eq!(booking.status, BookingStatus::Confirmed);
        assert_eq!(booking.destination_city.as_deref(), Some("Madrid"));
    }

    #[test]
    fn absurd_people_counts_saturate_instead_of_overflowing() {
        let mut req = request();
        req.adults = u32::MAX;
        req.children = 1;
        let booking = Booking::from_request(req);
        assert_eq!(booking.total_people(), u32::MAX);
    }

    #[test]
    fn zero_travellers_fails_validation() {
        let mut req = request();
        req.adults = 0;
        req.children = 0;
        assert!(Booking::from_request(req).validate().is_err());
    }

    #[test]
    fn inverted_dates_fail_validation() {
        let mut req = request();
        req.return_date = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        assert!(Booking::from_request(req).validate().is_err());
    }
}
