//! A [`TradeSession`] that records calls and replays scripted results.

use crate::enums::TradeOfferState;
use crate::error::{Error, LoginError, Result, TradeOfferError};
use crate::request::{Credentials, GetTradeOffersOptions};
use crate::response::{AcceptedOffer, Asset, ClassInfo, TimeTip, TradeOffer, TradeOffers};
use crate::time::{get_system_time, timestamp_to_server_time};
use crate::trade_session::TradeSession;
use crate::types::TradeOfferId;
use std::cell::RefCell;
use std::collections::{HashSet, VecDeque};
use std::future::Future;
use std::sync::{Arc, Mutex, Once};
use async_trait::async_trait;
use log::{Level, LevelFilter, Metadata, Record};
use reqwest::StatusCode;
use steamid_ng::SteamID;

pub const API_KEY: &str = "0123456789ABCDEF0123456789ABCDEF";

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    GetTimeTip,
    Login(String),
    GetWebApiKey,
    GetTradeOffers(GetTradeOffersOptions),
    AcceptOffer(TradeOfferId),
}

#[derive(Debug, Default)]
struct State {
    calls: Vec<Call>,
    server_time: Option<u64>,
    login_time_offset: Option<i64>,
    fail_time_tip: bool,
    fail_login: bool,
    fail_api_key: bool,
    // None fails the poll.
    polls: VecDeque<Option<Vec<TradeOffer>>>,
    failing_accepts: HashSet<TradeOfferId>,
    needs_mobile_confirmation: bool,
}

#[derive(Debug, Clone, Default)]
pub struct TestSession {
    state: Arc<Mutex<State>>,
}

impl TestSession {
    fn with_state<T>(&self, f: impl FnOnce(&mut State) -> T) -> T {
        let mut state = self.state.lock().unwrap();

        f(&mut state)
    }

    pub fn calls(&self) -> Vec<Call> {
        self.with_state(|state| state.calls.clone())
    }

    pub fn accepted(&self) -> Vec<TradeOfferId> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::AcceptOffer(tradeofferid) => Some(tradeofferid),
                _ => None,
            })
            .collect()
    }

    pub fn fetch_options(&self) -> Vec<GetTradeOffersOptions> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::GetTradeOffers(options) => Some(options),
                _ => None,
            })
            .collect()
    }

    pub fn login_time_offset(&self) -> Option<i64> {
        self.with_state(|state| state.login_time_offset)
    }

    pub fn set_server_time(&self, server_time: u64) {
        self.with_state(|state| state.server_time = Some(server_time));
    }

    pub fn fail_time_tip(&self) {
        self.with_state(|state| state.fail_time_tip = true);
    }

    pub fn fail_login(&self) {
        self.with_state(|state| state.fail_login = true);
    }

    pub fn fail_api_key(&self) {
        self.with_state(|state| state.fail_api_key = true);
    }

    pub fn fail_accept(&self, tradeofferid: TradeOfferId) {
        self.with_state(|state| state.failing_accepts.insert(tradeofferid));
    }

    pub fn require_mobile_confirmation(&self) {
        self.with_state(|state| state.needs_mobile_confirmation = true);
    }

    /// Offers returned by the next unscripted poll.
    pub fn push_offers(&self, offers: Vec<TradeOffer>) {
        self.with_state(|state| state.polls.push_back(Some(offers)));
    }

    pub fn push_failed_poll(&self) {
        self.with_state(|state| state.polls.push_back(None));
    }
}

#[async_trait]
impl TradeSession for TestSession {
    async fn get_time_tip(&self) -> Result<TimeTip> {
        self.with_state(|state| {
            state.calls.push(Call::GetTimeTip);

            if state.fail_time_tip {
                return Err(Error::Http(StatusCode::SERVICE_UNAVAILABLE));
            }

            let server_time = state.server_time.unwrap_or_else(get_system_time);

            Ok(serde_json::from_value(serde_json::json!({
                "server_time": server_time.to_string(),
            }))?)
        })
    }

    async fn login(
        &mut self,
        credentials: &Credentials,
        time_offset: i64,
    ) -> Result<()> {
        self.with_state(|state| {
            state.calls.push(Call::Login(credentials.username.clone()));

            if state.fail_login {
                return Err(LoginError::EResult(5).into());
            }

            state.login_time_offset = Some(time_offset);
            Ok(())
        })
    }

    async fn get_web_api_key(&self) -> Result<String> {
        self.with_state(|state| {
            state.calls.push(Call::GetWebApiKey);

            if state.fail_api_key {
                return Err(Error::NotLoggedIn);
            }

            Ok(API_KEY.into())
        })
    }

    async fn get_trade_offers(
        &self,
        options: &GetTradeOffersOptions,
    ) -> Result<TradeOffers> {
        self.with_state(|state| {
            state.calls.push(Call::GetTradeOffers(options.clone()));

            match state.polls.pop_front() {
                Some(None) => Err(Error::Http(StatusCode::SERVICE_UNAVAILABLE)),
                Some(Some(received)) => Ok(TradeOffers {
                    sent: Vec::new(),
                    received,
                }),
                None => Ok(TradeOffers::default()),
            }
        })
    }

    async fn accept_offer(
        &self,
        offer: &TradeOffer,
    ) -> Result<AcceptedOffer> {
        self.with_state(|state| {
            state.calls.push(Call::AcceptOffer(offer.tradeofferid));

            if state.failing_accepts.contains(&offer.tradeofferid) {
                return Err(TradeOfferError::InvalidState.into());
            }

            Ok(AcceptedOffer {
                needs_mobile_confirmation: state.needs_mobile_confirmation,
                ..AcceptedOffer::default()
            })
        })
    }
}

/// A received offer. Each entry in `items` is an item to receive, with a description carrying
/// the name if one is given.
pub fn offer(
    tradeofferid: TradeOfferId,
    trade_offer_state: TradeOfferState,
    items: &[Option<&str>],
) -> TradeOffer {
    let time = timestamp_to_server_time(1_700_000_000);
    let items_to_receive = items
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let classid = 100 + i as u64;
            let classinfo = name.map(|name| {
                let classinfo: ClassInfo = serde_json::from_value(serde_json::json!({
                    "appid": 440,
                    "classid": classid.to_string(),
                    "instanceid": "0",
                    "name": name,
                })).unwrap();

                Arc::new(classinfo)
            });

            Asset {
                appid: 440,
                contextid: 2,
                assetid: 1000 + i as u64,
                classid,
                instanceid: None,
                amount: 1,
                missing: false,
                classinfo,
            }
        })
        .collect();

    TradeOffer {
        tradeofferid,
        tradeid: None,
        partner: SteamID::from(76561198000000000),
        message: None,
        items_to_receive,
        items_to_give: Vec::new(),
        is_our_offer: false,
        from_real_time_trade: false,
        expiration_time: time,
        time_created: time,
        time_updated: time,
        trade_offer_state,
        escrow_end_date: None,
        confirmation_method: Default::default(),
    }
}

thread_local! {
    static LOGS: RefCell<Vec<String>> = const { RefCell::new(Vec::new()) };
}

/// Collects info level and above messages logged on the current thread.
struct CaptureLogger;

impl log::Log for CaptureLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= Level::Info
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            LOGS.with(|logs| logs.borrow_mut().push(record.args().to_string()));
        }
    }

    fn flush(&self) {}
}

static LOGGER: CaptureLogger = CaptureLogger;
static INIT_LOGGER: Once = Once::new();

/// Runs `future` and returns its output with the messages it logged. Tasks spawned onto a
/// current thread runtime are captured too.
pub async fn capture_logs<F>(future: F) -> (F::Output, Vec<String>)
where
    F: Future,
{
    INIT_LOGGER.call_once(|| {
        let _ = log::set_logger(&LOGGER);
        log::set_max_level(LevelFilter::Info);
    });
    LOGS.with(|logs| logs.borrow_mut().clear());

    let output = future.await;
    let logs = LOGS.with(|logs| std::mem::take(&mut *logs.borrow_mut()));

    (output, logs)
}
