//! The Steam session used by the poller. Logs in, then makes Web API and community requests
//! with the resulting session.

mod builder;
mod helpers;
mod login;
mod response;

pub use builder::SteamSessionBuilder;

use login::AuthPolling;
use response::{ApiResponse, GetTradeOffersResponse, GetTradeOffersResponseBody};
use crate::error::{Error, Result};
use crate::helpers::parses_response;
use crate::request::{Credentials, GetTradeOffersOptions};
use crate::response::{AcceptedOffer, TimeTip, TradeOffer, TradeOffers};
use crate::serialize::{string, steamid_as_string};
use crate::session::Session;
use crate::time::get_system_time;
use crate::trade_session::TradeSession;
use crate::types::{HttpClient, TradeOfferId};
use std::collections::HashSet;
use std::sync::Arc;
use async_trait::async_trait;
use reqwest::cookie::Jar;
use reqwest::header::REFERER;
use serde::Serialize;
use steamid_ng::SteamID;
use url::Url;

const ONE_YEAR_SECS: u64 = 31536000;

/// A session with Steam.
#[derive(Debug)]
pub struct SteamSession {
    /// The client for making requests.
    client: HttpClient,
    /// The cookies to make requests with. Since the requests are made with the provided client,
    /// the cookies should be the same as what the client uses.
    cookies: Arc<Jar>,
    /// The language for item descriptions.
    language: String,
    /// Base URL for community requests.
    community_url: Url,
    /// Base URL for Web API requests.
    api_url: Url,
    /// How the auth session is polled when logging in.
    auth_polling: AuthPolling,
    /// The session. Not present until logged in.
    session: Option<Session>,
}

impl SteamSession {
    /// Builder for constructing a [`SteamSession`].
    pub fn builder() -> SteamSessionBuilder {
        SteamSessionBuilder::new()
    }

    /// Creates a [`SteamSession`] with the default client. The language is for item
    /// descriptions, an empty string uses `english`.
    pub fn new<T>(language: T) -> Result<Self>
    where
        T: Into<String>,
    {
        Self::builder()
            .language(language)
            .build()
    }

    fn get_url(&self, pathname: &str) -> String {
        helpers::join_url(&self.community_url, pathname)
    }

    fn get_api_url(
        &self,
        interface: &str,
        method: &str,
        version: usize,
    ) -> String {
        helpers::api_method_url(&self.api_url, interface, method, version)
    }

    /// The session, if logged in.
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// The SteamID of the logged in account.
    pub fn steamid(&self) -> Option<SteamID> {
        self.session
            .as_ref()
            .map(|session| SteamID::from(session.steamid))
    }

    fn require_session(&self) -> Result<&Session> {
        self.session
            .as_ref()
            .ok_or(Error::NotLoggedIn)
    }

    fn set_session(&mut self, session: Session) {
        for cookie_str in session.cookies() {
            self.cookies.add_cookie_str(&cookie_str, &self.community_url);
        }

        self.session = Some(session);
    }

    /// Gets Steam's current time.
    pub async fn get_time_tip(&self) -> Result<TimeTip> {
        #[derive(Serialize)]
        struct Form {
            steamid: u64,
        }

        let uri = self.get_api_url("ITwoFactorService", "QueryTime", 1);
        let response = self.client.post(&uri)
            .form(&Form {
                steamid: 0,
            })
            .send()
            .await?;
        let body: ApiResponse<TimeTip> = parses_response(response).await?;

        Ok(body.response)
    }

    /// Logs in using a password and, if the account has a mobile authenticator, a two-factor
    /// code generated from the shared secret.
    pub async fn login(
        &mut self,
        credentials: &Credentials,
        time_offset: i64,
    ) -> Result<()> {
        let session = login::login(
            &self.client,
            &self.api_url,
            credentials,
            time_offset,
            self.auth_polling,
        ).await?;

        log::debug!("Logged in as {}", session.steamid);
        self.set_session(session);

        Ok(())
    }

    /// Gets the account's Steam Web API key. If the account does not have an API key, one will
    /// be created using `localhost` as the domain. By calling this method you are agreeing to the
    /// [Steam Web API Terms of Use](https://steamcommunity.com/dev/apiterms).
    pub async fn get_web_api_key(&self) -> Result<String> {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct CreateAPIKey<'a> {
            domain: &'static str,
            agree_to_terms: &'static str,
            sessionid: &'a str,
            submit: &'static str,
        }

        let session = self.require_session()?;

        match self.try_get_web_api_key().await {
            Err(error) if helpers::is_missing_api_key(&error) => {
                log::debug!("No API key registered, registering one");

                let uri = self.get_url("/dev/registerkey");
                let _response = self.client.post(&uri)
                    .form(&CreateAPIKey {
                        domain: "localhost",
                        agree_to_terms: "agreed",
                        sessionid: &session.sessionid,
                        submit: "Register",
                    })
                    .send()
                    .await?;

                self.try_get_web_api_key().await
            },
            result => result,
        }
    }

    async fn try_get_web_api_key(&self) -> Result<String> {
        let uri = self.get_url("/dev/apikey");
        let response = self.client.get(&uri)
            .send()
            .await?;
        let body = crate::helpers::check_response(response).await?;

        helpers::parse_api_key(&String::from_utf8_lossy(&body))
    }

    /// Gets trade offers. Follows the cursor until Steam returns no cursor or one that was
    /// already fetched.
    pub async fn get_trade_offers(
        &self,
        options: &GetTradeOffersOptions,
    ) -> Result<TradeOffers> {
        #[derive(Serialize, Debug)]
        struct Query<'a> {
            access_token: &'a str,
            language: &'a str,
            active_only: bool,
            historical_only: bool,
            get_sent_offers: bool,
            get_received_offers: bool,
            get_descriptions: bool,
            time_historical_cutoff: u64,
            cursor: u32,
        }

        let session = self.require_session()?;
        let time_historical_cutoff = match options.historical_cutoff {
            Some(cutoff) => cutoff.timestamp().max(0) as u64,
            None => get_system_time() + ONE_YEAR_SECS,
        };
        let uri = self.get_api_url("IEconService", "GetTradeOffers", 1);
        let mut cursor = 0;
        let mut fetched_cursors = HashSet::new();
        let mut bodies: Vec<GetTradeOffersResponseBody> = Vec::new();

        loop {
            let response = self.client.get(&uri)
                .query(&Query {
                    access_token: &session.access_token,
                    language: &self.language,
                    active_only: options.active_only,
                    historical_only: options.historical_only,
                    get_sent_offers: options.get_sent_offers,
                    get_received_offers: options.get_received_offers,
                    get_descriptions: options.get_descriptions,
                    time_historical_cutoff,
                    cursor,
                })
                .send()
                .await?;
            let body: GetTradeOffersResponse = parses_response(response).await?;
            let next_cursor = body.response.next_cursor.unwrap_or(0);

            bodies.push(body.response);
            fetched_cursors.insert(cursor);

            if next_cursor == 0 || fetched_cursors.contains(&next_cursor) {
                break;
            }

            cursor = next_cursor;
        }

        Ok(GetTradeOffersResponseBody::combine(bodies))
    }

    /// Accepts an offer by ID. `partner` is the account that sent the offer.
    pub async fn accept_offer_id(
        &self,
        tradeofferid: TradeOfferId,
        partner: SteamID,
    ) -> Result<AcceptedOffer> {
        #[derive(Serialize, Debug)]
        struct AcceptOfferParams<'a> {
            sessionid: &'a str,
            serverid: u32,
            #[serde(with = "string")]
            tradeofferid: TradeOfferId,
            captcha: &'static str,
            #[serde(serialize_with = "steamid_as_string")]
            partner: SteamID,
        }

        let session = self.require_session()?;
        let referer = helpers::offer_url(&self.community_url, tradeofferid);
        let uri = self.get_url(&format!("/tradeoffer/{tradeofferid}/accept"));
        let response = self.client.post(&uri)
            .header(REFERER, referer)
            .form(&AcceptOfferParams {
                sessionid: &session.sessionid,
                serverid: 1,
                tradeofferid,
                captcha: "",
                partner,
            })
            .send()
            .await?;
        let body: AcceptedOffer = parses_response(response).await?;

        Ok(body)
    }
}

#[async_trait]
impl TradeSession for SteamSession {
    async fn get_time_tip(&self) -> Result<TimeTip> {
        SteamSession::get_time_tip(self).await
    }

    async fn login(
        &mut self,
        credentials: &Credentials,
        time_offset: i64,
    ) -> Result<()> {
        SteamSession::login(self, credentials, time_offset).await
    }

    async fn get_web_api_key(&self) -> Result<String> {
        SteamSession::get_web_api_key(self).await
    }

    async fn get_trade_offers(
        &self,
        options: &GetTradeOffersOptions,
    ) -> Result<TradeOffers> {
        SteamSession::get_trade_offers(self, options).await
    }

    async fn accept_offer(
        &self,
        offer: &TradeOffer,
    ) -> Result<AcceptedOffer> {
        self.accept_offer_id(offer.tradeofferid, offer.partner).await
    }
}
