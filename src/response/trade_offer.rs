use super::Asset;
use crate::enums::{ConfirmationMethod, TradeOfferState};
use crate::types::{ServerTime, TradeOfferId, TradeId};
use std::fmt;
use steamid_ng::SteamID;

/// A trade offer.
#[derive(Debug, Clone, PartialEq)]
pub struct TradeOffer {
    /// The ID for this offer.
    pub tradeofferid: TradeOfferId,
    /// The trade ID for this offer. This should be present when the `trade_offer_state` of this
    /// offer is [`TradeOfferState::Accepted`].
    pub tradeid: Option<TradeId>,
    /// The [`SteamID`] of our partner.
    pub partner: SteamID,
    /// The message included in the offer.
    pub message: Option<String>,
    /// The items we're receiving in this offer.
    pub items_to_receive: Vec<Asset>,
    /// The items we're giving in this offer.
    pub items_to_give: Vec<Asset>,
    /// Whether this offer was created by us or not.
    pub is_our_offer: bool,
    /// Whether this offer originated from a real time trade.
    pub from_real_time_trade: bool,
    /// The time before the offer expires if it has not been acted on.
    pub expiration_time: ServerTime,
    /// The time this offer was created.
    pub time_created: ServerTime,
    /// The time this offer last had an action e.g. accepting or declining the offer.
    pub time_updated: ServerTime,
    /// The state of this offer.
    pub trade_offer_state: TradeOfferState,
    /// The end date if this trade is in escrow.
    pub escrow_end_date: Option<ServerTime>,
    /// The confirmation method for this offer.
    pub confirmation_method: ConfirmationMethod,
}

impl TradeOffer {
    /// Whether this offer is active and can be acted on.
    pub fn is_active(&self) -> bool {
        self.trade_offer_state == TradeOfferState::Active
    }

    /// Names of the items we are receiving, skipping items which have no description.
    pub fn received_item_names(&self) -> impl Iterator<Item = &str> {
        self.items_to_receive
            .iter()
            .filter_map(|item| item.name())
    }
}

impl fmt::Display for TradeOffer {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[{}]", self.tradeofferid)
    }
}

/// Trade offers from a single request, split into the offers we sent and the offers we received.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TradeOffers {
    /// Offers we sent.
    pub sent: Vec<TradeOffer>,
    /// Offers we received.
    pub received: Vec<TradeOffer>,
}
