//! Polls Steam for received trade offers and accepts the active ones.
//!
//! Startup syncs time with Steam, logs in and fetches the account's web API key. After that an
//! [`OfferPoller`] fetches active received offers on an interval, logging each offer and
//! accepting those which are active.
//!
//! All calls against Steam go through the [`TradeSession`] trait. [`SteamSession`] implements it
//! over HTTP.
//!
//! # Usage
//! ```no_run
//! use steam_tradeoffer_poller::{establish_session, Credentials, OfferPoller, PollOptions, SteamSession};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), steam_tradeoffer_poller::error::Error> {
//!     let credentials = Credentials::new("username", "password", "shared_secret");
//!     let session = establish_session(SteamSession::new("english")?, &credentials).await?;
//!
//!     OfferPoller::new(session, PollOptions::default()).run().await;
//!     Ok(())
//! }
//! ```

mod api;
mod config;
mod helpers;
mod polling;
mod serialize;
mod session;
mod trade_session;

pub mod enums;
pub mod error;
pub mod logging;
pub mod request;
pub mod response;
pub mod time;
pub mod types;

pub use api::{SteamSession, SteamSessionBuilder};
pub use config::Config;
pub use polling::{establish_session, OfferOutcome, OfferPoller, PollOptions, PollSummary};
pub use request::{Credentials, GetTradeOffersOptions};
pub use session::Session;
pub use trade_session::TradeSession;
pub use steamid_ng::SteamID;
