use crate::error::Result;
use crate::request::{Credentials, GetTradeOffersOptions};
use crate::response::{AcceptedOffer, TimeTip, TradeOffer, TradeOffers};
use async_trait::async_trait;

/// The calls the poller makes against Steam.
///
/// [`crate::api::SteamSession`] implements this over HTTP. Anything else implementing it can
/// stand in for Steam, which is how the polling behavior is tested.
#[async_trait]
pub trait TradeSession: Send + Sync {
    /// Gets Steam's current time along with sync hints.
    async fn get_time_tip(&self) -> Result<TimeTip>;

    /// Logs in. `time_offset` is how many seconds the local clock is behind Steam's and is used
    /// to generate two-factor codes.
    async fn login(
        &mut self,
        credentials: &Credentials,
        time_offset: i64,
    ) -> Result<()>;

    /// Gets the account's Steam Web API key.
    async fn get_web_api_key(&self) -> Result<String>;

    /// Gets trade offers.
    async fn get_trade_offers(
        &self,
        options: &GetTradeOffersOptions,
    ) -> Result<TradeOffers>;

    /// Accepts an offer. Offers that need confirmation must still be confirmed on the mobile app
    /// or by email.
    async fn accept_offer(
        &self,
        offer: &TradeOffer,
    ) -> Result<AcceptedOffer>;
}
