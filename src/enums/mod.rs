//! Enumerated types.

mod confirmation_method;
mod trade_offer_state;

pub use confirmation_method::ConfirmationMethod;
pub use trade_offer_state::TradeOfferState;
