use super::PollOptions;
use crate::error::Result;
use crate::request::GetTradeOffersOptions;
use crate::response::{AcceptedOffer, TradeOffer};
use crate::time::{self, ServerTime};
use crate::trade_session::TradeSession;
use crate::types::TradeOfferId;
use tokio::time::{Instant, MissedTickBehavior};

const DEFAULT_POLL_INTERVAL: std::time::Duration = std::time::Duration::from_secs(10);

/// What was done with an offer during a poll.
#[derive(Debug, Clone, PartialEq)]
pub enum OfferOutcome {
    /// The offer is not active so nothing was done.
    Ignored,
    /// The offer was accepted.
    Accepted(AcceptedOffer),
    /// Accepting the offer failed.
    AcceptFailed,
}

/// The outcome for each received offer in a poll, in the order Steam returned them.
pub type PollSummary = Vec<(TradeOfferId, OfferOutcome)>;

/// Polls for received offers on an interval and accepts the active ones.
#[derive(Debug)]
pub struct OfferPoller<S> {
    session: S,
    options: PollOptions,
}

impl<S> OfferPoller<S>
where
    S: TradeSession,
{
    pub fn new(session: S, options: PollOptions) -> Self {
        Self {
            session,
            options,
        }
    }

    /// The session used for requests.
    pub fn session(&self) -> &S {
        &self.session
    }

    /// Options for getting offers updated within the cutoff before `now`.
    pub fn get_trade_offers_options(&self, now: ServerTime) -> GetTradeOffersOptions {
        GetTradeOffersOptions::active_received_since(now - self.options.offer_cutoff)
    }

    /// Fetches received offers updated within the cutoff before `now` and handles each in
    /// order. An error is returned only if the offers could not be fetched.
    pub async fn poll(&self, now: ServerTime) -> Result<PollSummary> {
        let options = self.get_trade_offers_options(now);
        let offers = self.session.get_trade_offers(&options).await?;
        let mut summary = Vec::with_capacity(offers.received.len());

        for offer in &offers.received {
            let outcome = self.process_offer(offer).await;

            summary.push((offer.tradeofferid, outcome));
        }

        Ok(summary)
    }

    /// Performs a poll, logging the error if the offers could not be fetched.
    pub async fn tick(&self, now: ServerTime) -> Option<PollSummary> {
        match self.poll(now).await {
            Ok(summary) => Some(summary),
            Err(error) => {
                log::error!("error getting trade offers: {error}");
                None
            },
        }
    }

    /// Logs the offer and accepts it if it is active.
    pub async fn process_offer(&self, offer: &TradeOffer) -> OfferOutcome {
        log::info!("Offer id: {}, Offer state: {}", offer.tradeofferid, offer.trade_offer_state);

        if !offer.is_active() {
            return OfferOutcome::Ignored;
        }

        for name in offer.received_item_names() {
            log::info!("{name}");
        }

        match self.session.accept_offer(offer).await {
            Ok(accepted) => {
                log::info!("accept request sent");

                if accepted.needs_mobile_confirmation {
                    log::info!("Offer {offer} needs mobile confirmation");
                } else if accepted.needs_email_confirmation {
                    log::info!(
                        "Offer {offer} needs email confirmation{}",
                        accepted.email_domain
                            .as_deref()
                            .map(|domain| format!(" ({domain})"))
                            .unwrap_or_default(),
                    );
                }

                OfferOutcome::Accepted(accepted)
            },
            Err(error) => {
                log::error!("error accepting offer: {error}");
                OfferOutcome::AcceptFailed
            },
        }
    }

    /// Polls forever. The first poll happens one interval after calling this. Ticks missed
    /// while a poll is running are skipped.
    pub async fn run(self) {
        let period = self.options.poll_interval
            .to_std()
            .ok()
            .filter(|period| !period.is_zero())
            .unwrap_or(DEFAULT_POLL_INTERVAL);
        let mut interval = tokio::time::interval_at(Instant::now() + period, period);

        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            interval.tick().await;
            self.tick(time::get_server_time_now()).await;
        }
    }
}
