pub mod admin;
pub mod booking;
pub mod collections;
pub mod faq;
pub mod overrides;
pub mod prices;

pub mod admin_repo;
pub mod booking_repo;
pub mod faq_repo;
pub mod override_repo;
pub mod price_repo;
pub mod session_repo;

pub use admin::{Admin, Session};
pub use booking::{
    Booking, BookingPatch, BookingStatus, CheckoutRef, CreateBookingRequest, PaymentStatus,
    SelectedExtra,
};
pub use faq::{Faq, FaqPatch};
pub use overrides::{ApproveStatus, DateOverride, DateOverridePatch};
pub use prices::{LeagueType, PackageTier, Sport, StartingPrice, StartingPricePatch, TierPrices};

pub use admin_repo::AdminRepository;
pub use booking_repo::BookingRepository;
pub use faq_repo::FaqRepository;
pub use override_repo::DateOverrideRepository;
pub use price_repo::StartingPriceRepository;
pub use session_repo::SessionRepository;
