//! Polling for received trade offers and accepting the active ones.

mod poller;
#[cfg(test)]
mod test_session;

pub use poller::{OfferPoller, OfferOutcome, PollSummary};

use crate::error::Result;
use crate::request::Credentials;
use crate::time::get_system_time;
use crate::trade_session::TradeSession;
use chrono::Duration;

/// Options for polling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollOptions {
    /// Interval to poll at. Default is 10 seconds.
    pub poll_interval: Duration,
    /// Only offers updated within this duration before each poll are fetched. Default is
    /// 5 minutes.
    pub offer_cutoff: Duration,
}

impl Default for PollOptions {
    fn default() -> Self {
        Self {
            poll_interval: Duration::seconds(10),
            offer_cutoff: Duration::minutes(5),
        }
    }
}

/// Syncs time with Steam, logs in and fetches the web API key. Any failure is returned and
/// nothing after the failed step is attempted.
pub async fn establish_session<S>(
    mut session: S,
    credentials: &Credentials,
) -> Result<S>
where
    S: TradeSession,
{
    let time_tip = session.get_time_tip().await?;
    let time_offset = time_tip.time_offset(get_system_time());

    log::debug!("Time offset from Steam is {time_offset}s");

    session.login(credentials, time_offset).await?;
    log::info!("Login successful");

    let key = session.get_web_api_key().await?;

    log::info!("Key: {key}");

    Ok(session)
}
