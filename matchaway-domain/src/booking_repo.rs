use std::sync::Arc;

use matchaway_core::{Error, Result, Validate};
use matchaway_store::{mutate, read_snapshot, CollectionStore};
use tracing::info;
use uuid::Uuid;

use crate::booking::{Booking, BookingPatch, CheckoutRef, CreateBookingRequest};
use crate::collections::Bookings;

/// Typed CRUD over `bookings.json`. Every mutation runs as one locked
/// read-modify-write transaction; either the whole change validates
/// and persists or nothing changes.
pub struct BookingRepository {
    store: Arc<dyn CollectionStore>,
}

impl BookingRepository {
    pub fn new(store: Arc<dyn CollectionStore>) -> Self {
        Self { store }
    }

    /// Create a pending, unpaid booking and return the projection the
    /// payment collaborator needs to build a checkout redirect.
    pub async fn create(&self, request: CreateBookingRequest) -> Result<CheckoutRef> {
        let booking = Booking::from_request(request);
        booking.validate()?;

        let reference = CheckoutRef {
            booking_id: booking.id,
            amount: booking.total_cost,
            currency: booking.currency.clone(),
        };

        mutate::<Bookings, _, _>(self.store.as_ref(), move |mut snapshot| {
            snapshot.entities.push(booking);
            Ok(snapshot)
        })
        .await?;

        info!(booking_id = %reference.booking_id, "booking created");
        Ok(reference)
    }

    /// All live bookings. Soft-deleted rows are kept on disk for audit
    /// but never listed. A collection file that does not exist yet is
    /// an empty list, not an error.
    pub async fn list(&self) -> Result<Vec<Booking>> {
        match read_snapshot::<Bookings, _>(self.store.as_ref()).await {
            Ok(snapshot) => Ok(snapshot
                .entities
                .into_iter()
                .filter(|b| b.deleted_at.is_none())
                .collect()),
            Err(Error::NotFound(_)) => Ok(Vec::new()),
            Err(e) => Err(e),
        }
    }

    /// Partial update through the explicit patch type. Used by admin
    /// approval/rejection and by the payment webhook. `NotFound` if the
    /// id is unknown; the webhook caller must tolerate that without
    /// crashing.
    pub async fn update(&self, id: Uuid, patch: BookingPatch) -> Result<Booking> {
        let snapshot = mutate::<Bookings, _, _>(self.store.as_ref(), move |mut snapshot| {
            let booking = snapshot
                .entities
                .iter_mut()
                .find(|b| b.id == id && b.deleted_at.is_none())
                .ok_or_else(|| Error::NotFound(format!("booking '{id}'")))?;
            patch.apply(booking);
            Ok(snapshot)
        })
        .await?;

        snapshot
            .entities
            .into_iter()
            .find(|b| b.id == id)
            .ok_or_else(|| Error::NotFound(format!("booking '{id}'")))
    }

    /// Soft delete: the row stays in the collection with `deleted_at`
    /// stamped, and disappears from `list`.
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        mutate::<Bookings, _, _>(self.store.as_ref(), move |mut snapshot| {
            let booking = snapshot
                .entities
                .iter_mut()
                .find(|b| b.id == id && b.deleted_at.is_none())
                .ok_or_else(|| Error::NotFound(format!("booking '{id}'")))?;
            let now = chrono::Utc::now();
            booking.deleted_at = Some(now);
            booking.updated_at = now;
            Ok(snapshot)
        })
        .await?;

        info!(booking_id = %id, "booking deleted");
        Ok(())
    }
}
