pub mod defaults;
pub mod engine;
pub mod resolve;
pub mod service;

pub use engine::{
    nights_between, quote, validate_client_price, LineItem, PriceBreakdown, PriceValidation,
    QuoteInput, TimeWindow,
};
pub use resolve::effective_price;
pub use service::PricingService;
