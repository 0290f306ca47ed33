//! Raw responses from Steam before they are converted into the public models.

use crate::response::{Asset, ClassInfo, TradeOffer, TradeOffers};
use crate::enums::{ConfirmationMethod, TradeOfferState};
use crate::serialize::{
    string,
    option_string,
    option_string_0_as_none,
    empty_string_is_none,
    into_bool,
};
use crate::time::{timestamp_to_server_time, ServerTime};
use crate::types::*;
use std::sync::Arc;
use chrono::serde::ts_seconds;
use serde::Deserialize;
use steamid_ng::SteamID;

/// Most Web API responses are wrapped in a `response` object.
#[derive(Deserialize, Debug)]
pub struct ApiResponse<T> {
    pub response: T,
}

#[derive(Deserialize, Debug)]
pub struct RawAsset {
    pub appid: AppId,
    #[serde(with = "string")]
    pub contextid: ContextId,
    #[serde(with = "string")]
    pub assetid: AssetId,
    #[serde(with = "string")]
    pub classid: ClassId,
    #[serde(default)]
    #[serde(with = "option_string_0_as_none")]
    pub instanceid: InstanceId,
    #[serde(with = "string")]
    pub amount: Amount,
    #[serde(default)]
    #[serde(deserialize_with = "into_bool")]
    pub missing: bool,
}

impl RawAsset {
    fn into_asset(self, map: &ClassInfoMap) -> Asset {
        let classinfo = map
            .get(&(self.appid, self.classid, self.instanceid))
            .map(Arc::clone);

        Asset {
            appid: self.appid,
            contextid: self.contextid,
            assetid: self.assetid,
            classid: self.classid,
            instanceid: self.instanceid,
            amount: self.amount,
            missing: self.missing,
            classinfo,
        }
    }
}

#[derive(Deserialize, Debug)]
pub struct RawTradeOffer {
    #[serde(with = "string")]
    pub tradeofferid: TradeOfferId,
    #[serde(default)]
    #[serde(with = "option_string")]
    pub tradeid: Option<TradeId>,
    pub accountid_other: u32,
    #[serde(default)]
    #[serde(deserialize_with = "empty_string_is_none")]
    pub message: Option<String>,
    #[serde(default)]
    pub items_to_receive: Vec<RawAsset>,
    #[serde(default)]
    pub items_to_give: Vec<RawAsset>,
    #[serde(default)]
    pub is_our_offer: bool,
    #[serde(default)]
    pub from_real_time_trade: bool,
    #[serde(with = "ts_seconds")]
    pub expiration_time: ServerTime,
    #[serde(with = "ts_seconds")]
    pub time_created: ServerTime,
    #[serde(with = "ts_seconds")]
    pub time_updated: ServerTime,
    pub trade_offer_state: TradeOfferState,
    #[serde(default)]
    pub escrow_end_date: i64,
    #[serde(default)]
    pub confirmation_method: ConfirmationMethod,
}

impl RawTradeOffer {
    /// Combines this offer with the descriptions from the response. Items without a
    /// description are kept with no classinfo.
    pub fn into_trade_offer(self, map: &ClassInfoMap) -> TradeOffer {
        let escrow_end_date = match self.escrow_end_date {
            0 => None,
            timestamp => Some(timestamp_to_server_time(timestamp)),
        };

        TradeOffer {
            tradeofferid: self.tradeofferid,
            tradeid: self.tradeid,
            partner: steamid_from_accountid(self.accountid_other),
            message: self.message,
            items_to_receive: self.items_to_receive
                .into_iter()
                .map(|asset| asset.into_asset(map))
                .collect(),
            items_to_give: self.items_to_give
                .into_iter()
                .map(|asset| asset.into_asset(map))
                .collect(),
            is_our_offer: self.is_our_offer,
            from_real_time_trade: self.from_real_time_trade,
            expiration_time: self.expiration_time,
            time_created: self.time_created,
            time_updated: self.time_updated,
            trade_offer_state: self.trade_offer_state,
            escrow_end_date,
            confirmation_method: self.confirmation_method,
        }
    }
}

fn steamid_from_accountid(accountid: u32) -> SteamID {
    SteamID::new(
        accountid,
        steamid_ng::Instance::Desktop,
        steamid_ng::AccountType::Individual,
        steamid_ng::Universe::Public,
    )
}

#[derive(Deserialize, Debug, Default)]
pub struct GetTradeOffersResponseBody {
    #[serde(default)]
    pub trade_offers_sent: Vec<RawTradeOffer>,
    #[serde(default)]
    pub trade_offers_received: Vec<RawTradeOffer>,
    #[serde(default)]
    pub descriptions: Vec<ClassInfo>,
    pub next_cursor: Option<u32>,
}

impl GetTradeOffersResponseBody {
    fn classinfo_map(descriptions: Vec<ClassInfo>) -> ClassInfoMap {
        descriptions
            .into_iter()
            .filter_map(|classinfo| {
                let appid = classinfo.appid?;

                Some(((appid, classinfo.classid, classinfo.instanceid), Arc::new(classinfo)))
            })
            .collect()
    }

    /// Combines pages of responses into [`TradeOffers`], preserving the order Steam gave them.
    pub fn combine(bodies: Vec<Self>) -> TradeOffers {
        let mut offers = TradeOffers::default();

        for body in bodies {
            let map = Self::classinfo_map(body.descriptions);

            offers.sent.extend(body.trade_offers_sent
                .into_iter()
                .map(|offer| offer.into_trade_offer(&map)));
            offers.received.extend(body.trade_offers_received
                .into_iter()
                .map(|offer| offer.into_trade_offer(&map)));
        }

        offers
    }
}

pub type GetTradeOffersResponse = ApiResponse<GetTradeOffersResponseBody>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_get_trade_offers_response() {
        let body: GetTradeOffersResponse = serde_json::from_str(include_str!("fixtures/get_trade_offers.json")).unwrap();
        let offers = GetTradeOffersResponseBody::combine(vec![body.response]);

        assert!(offers.sent.is_empty());
        assert_eq!(offers.received.len(), 2);

        let offer = &offers.received[0];

        assert_eq!(offer.tradeofferid, 6123456789);
        assert_eq!(offer.trade_offer_state, TradeOfferState::Active);
        assert_eq!(offer.partner.account_id(), 39734272);
        assert_eq!(offer.message.as_deref(), Some("for you"));
        assert_eq!(offer.escrow_end_date, None);
        assert_eq!(offer.items_to_receive.len(), 2);
        assert_eq!(offer.received_item_names().collect::<Vec<_>>(), vec!["Mann Co. Supply Crate Key"]);

        let expired = &offers.received[1];

        assert_eq!(expired.trade_offer_state, TradeOfferState::Expired);
        assert_eq!(expired.message, None);
    }
}
