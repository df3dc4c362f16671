//! Bindings between entity types and their collection files. Each
//! repository exclusively owns one of these; no entity is shared-write
//! across repositories.

use matchaway_store::CollectionKind;

use crate::admin::{Admin, Session};
use crate::booking::Booking;
use crate::faq::Faq;
use crate::overrides::DateOverride;
use crate::prices::StartingPrice;

pub struct Bookings;

impl CollectionKind for Bookings {
    const NAME: &'static str = "bookings";
    const ENTITY_KEY: &'static str = "bookings";
    type Entity = Booking;
}

pub struct StartingPrices;

impl CollectionKind for StartingPrices {
    const NAME: &'static str = "starting-prices";
    const ENTITY_KEY: &'static str = "startingPrices";
    type Entity = StartingPrice;
}

pub struct DateOverrides;

impl CollectionKind for DateOverrides {
    const NAME: &'static str = "date-overrides";
    const ENTITY_KEY: &'static str = "dateOverrides";
    type Entity = DateOverride;
}

pub struct Faqs;

impl CollectionKind for Faqs {
    const NAME: &'static str = "faqs";
    const ENTITY_KEY: &'static str = "faqs";
    type Entity = Faq;
}

pub struct Admins;

impl CollectionKind for Admins {
    const NAME: &'static str = "admins";
    const ENTITY_KEY: &'static str = "admins";
    type Entity = Admin;
}

pub struct Sessions;

impl CollectionKind for Sessions {
    const NAME: &'static str = "sessions";
    const ENTITY_KEY: &'static str = "sessions";
    type Entity = Session;
}
