//! Models for responses.

mod accepted_offer;
mod asset;
mod classinfo;
mod time_tip;
mod trade_offer;

pub use accepted_offer::AcceptedOffer;
pub use asset::Asset;
pub use classinfo::{ClassInfo, Description, Tag, Color};
pub use time_tip::TimeTip;
pub use trade_offer::{TradeOffer, TradeOffers};
