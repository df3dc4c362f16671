use std::sync::Arc;

use chrono::NaiveDate;
use matchaway_core::Error;
use matchaway_domain::{
    Admin, AdminRepository, ApproveStatus, Booking, BookingPatch, BookingRepository,
    BookingStatus, CreateBookingRequest, DateOverride, DateOverridePatch, DateOverrideRepository,
    Faq, FaqRepository, LeagueType, PackageTier, PaymentStatus, Session, SessionRepository,
    Sport, StartingPrice, StartingPricePatch, StartingPriceRepository, TierPrices,
};
use matchaway_store::{CollectionStore, DocumentStore};
use uuid::Uuid;

fn store_in(dir: &tempfile::TempDir) -> Arc<dyn CollectionStore> {
    Arc::new(DocumentStore::new(dir.path()))
}

fn booking_request() -> CreateBookingRequest {
    CreateBookingRequest {
        sport: Sport::Football,
        package: PackageTier::Premium,
        league: LeagueType::European,
        adults: 2,
        children: 0,
        departure_date: NaiveDate::from_ymd_opt(2025, 10, 3).unwrap(),
        return_date: NaiveDate::from_ymd_opt(2025, 10, 5).unwrap(),
        extras: vec![],
        total_cost: 289,
        currency: "EUR".into(),
        contact_email: "fan@example.com".into(),
    }
}

fn price_table() -> std::collections::BTreeMap<u8, TierPrices> {
    (1..=4)
        .map(|n| {
            (
                n,
                TierPrices {
                    standard: 100 * n as i64,
                    premium: 150 * n as i64,
                },
            )
        })
        .collect()
}

#[tokio::test]
async fn created_booking_appears_in_list_with_checkout_ref() {
    let dir = tempfile::tempdir().unwrap();
    let repo = BookingRepository::new(store_in(&dir));

    let reference = repo.create(booking_request()).await.unwrap();
    assert_eq!(reference.amount, 289);
    assert_eq!(reference.currency, "EUR");

    let bookings = repo.list().await.unwrap();
    assert_eq!(bookings.len(), 1);
    assert_eq!(bookings[0].id, reference.booking_id);
    assert_eq!(bookings[0].status, BookingStatus::Pending);
    assert_eq!(bookings[0].payment_status, PaymentStatus::Unpaid);
}

#[tokio::test]
async fn payment_webhook_patch_completes_the_booking() {
    let dir = tempfile::tempdir().unwrap();
    let repo = BookingRepository::new(store_in(&dir));

    let reference = repo.create(booking_request()).await.unwrap();
    let updated = repo
        .update(reference.booking_id, BookingPatch::payment_succeeded())
        .await
        .unwrap();

    assert_eq!(updated.status, BookingStatus::Completed);
    assert_eq!(updated.payment_status, PaymentStatus::Paid);
}

#[tokio::test]
async fn webhook_update_for_unknown_booking_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let repo = BookingRepository::new(store_in(&dir));
    repo.create(booking_request()).await.unwrap();

    let err = repo
        .update(Uuid::new_v4(), BookingPatch::payment_succeeded())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));
}

#[tokio::test]
async fn approval_reveals_destination_without_touching_cost() {
    let dir = tempfile::tempdir().unwrap();
    let repo = BookingRepository::new(store_in(&dir));

    let reference = repo.create(booking_request()).await.unwrap();
    let updated = repo
        .update(
            reference.booking_id,
            BookingPatch::approve("Lisbon".into(), "Benfica vs Porto".into()),
        )
        .await
        .unwrap();

    assert_eq!(updated.status, BookingStatus::Confirmed);
    assert_eq!(updated.destination_city.as_deref(), Some("Lisbon"));
    assert_eq!(updated.total_cost, 289);
}

#[tokio::test]
async fn deleted_booking_disappears_from_list_but_stays_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);
    let repo = BookingRepository::new(Arc::clone(&store));

    let kept = repo.create(booking_request()).await.unwrap();
    let dropped = repo.create(booking_request()).await.unwrap();

    repo.delete(dropped.booking_id).await.unwrap();

    let bookings = repo.list().await.unwrap();
    assert_eq!(bookings.len(), 1);
    assert_eq!(bookings[0].id, kept.booking_id);

    // Soft delete keeps the row in the snapshot for audit.
    let raw = store.read("bookings").await.unwrap();
    let rows: Vec<Booking> = serde_json::from_value(raw["bookings"].clone()).unwrap();
    assert_eq!(rows.len(), 2);
    let tombstone = rows.iter().find(|b| b.id == dropped.booking_id).unwrap();
    assert!(tombstone.deleted_at.is_some());
}

#[tokio::test]
async fn invalid_booking_is_rejected_before_anything_persists() {
    let dir = tempfile::tempdir().unwrap();
    let repo = BookingRepository::new(store_in(&dir));

    let mut request = booking_request();
    request.adults = 0;
    request.children = 0;

    let err = repo.create(request).await.unwrap_err();
    assert!(matches!(err, Error::Validation { .. }));
    assert!(repo.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn starting_price_crud_and_active_lookup() {
    let dir = tempfile::tempdir().unwrap();
    let repo = StartingPriceRepository::new(store_in(&dir));

    let row = repo
        .create(StartingPrice::new(Sport::Football, price_table(), "EUR".into()))
        .await
        .unwrap();

    let active = repo.active_for_sport(Sport::Football).await.unwrap().unwrap();
    assert_eq!(active.id, row.id);
    assert!(repo.active_for_sport(Sport::Basketball).await.unwrap().is_none());

    repo.update(
        row.id,
        StartingPricePatch {
            is_active: Some(false),
            ..StartingPricePatch::default()
        },
    )
    .await
    .unwrap();
    assert!(repo.active_for_sport(Sport::Football).await.unwrap().is_none());
}

#[tokio::test]
async fn date_override_find_and_hard_delete() {
    let dir = tempfile::tempdir().unwrap();
    let repo = DateOverrideRepository::new(store_in(&dir));
    let date = NaiveDate::from_ymd_opt(2025, 12, 6).unwrap();

    let row = repo
        .create(DateOverride::new(
            date,
            Sport::Football,
            PackageTier::Premium,
            2,
            Some(299),
        ))
        .await
        .unwrap();

    let found = repo
        .find(date, Sport::Football, PackageTier::Premium)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.price, Some(299));

    let approved = repo
        .update(
            row.id,
            DateOverridePatch {
                approve_status: Some(ApproveStatus::Approved),
                ..DateOverridePatch::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(approved.approve_status, ApproveStatus::Approved);

    repo.delete(row.id).await.unwrap();
    assert!(repo
        .find(date, Sport::Football, PackageTier::Premium)
        .await
        .unwrap()
        .is_none());
    assert!(matches!(
        repo.delete(row.id).await.unwrap_err(),
        Error::NotFound(_)
    ));
}

#[tokio::test]
async fn faqs_list_in_display_order() {
    let dir = tempfile::tempdir().unwrap();
    let repo = FaqRepository::new(store_in(&dir));

    repo.create(Faq::new("How do refunds work?".into(), "Within 14 days.".into(), 2))
        .await
        .unwrap();
    repo.create(Faq::new(
        "When is the destination revealed?".into(),
        "Two days before departure.".into(),
        1,
    ))
    .await
    .unwrap();

    let faqs = repo.list().await.unwrap();
    assert_eq!(faqs[0].position, 1);
    assert_eq!(faqs[1].position, 2);
}

#[tokio::test]
async fn duplicate_admin_email_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let repo = AdminRepository::new(store_in(&dir));

    repo.create(Admin::new("ops@matchaway.test".into(), "$argon2$x".into()))
        .await
        .unwrap();
    let err = repo
        .create(Admin::new("ops@matchaway.test".into(), "$argon2$y".into()))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Validation { .. }));

    let found = repo.find_by_email("ops@matchaway.test").await.unwrap();
    assert!(found.is_some());
}

#[tokio::test]
async fn expired_sessions_are_invisible_and_purgeable() {
    let dir = tempfile::tempdir().unwrap();
    let repo = SessionRepository::new(store_in(&dir));
    let admin_id = Uuid::new_v4();

    let live = repo
        .create(Session::new(
            "tok-live".into(),
            admin_id,
            chrono::Utc::now() + chrono::Duration::hours(1),
        ))
        .await
        .unwrap();
    repo.create(Session::new(
        "tok-stale".into(),
        admin_id,
        chrono::Utc::now() - chrono::Duration::hours(1),
    ))
    .await
    .unwrap();

    assert!(repo.find_by_token("tok-live").await.unwrap().is_some());
    assert!(repo.find_by_token("tok-stale").await.unwrap().is_none());

    repo.purge_expired().await.unwrap();
    repo.delete(live.id).await.unwrap();
    assert!(repo.find_by_token("tok-live").await.unwrap().is_none());
}
