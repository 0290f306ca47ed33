//! Models for making requests.

use crate::types::ServerTime;
use std::fmt;

/// Options for getting trade offers.
#[derive(Debug, Clone, PartialEq)]
pub struct GetTradeOffersOptions {
    /// Whether to get only active trade offers.
    pub active_only: bool,
    /// Whether to get only historical trade offers.
    pub historical_only: bool,
    /// Whether to get sent trade offers.
    pub get_sent_offers: bool,
    /// Whether to get received trade offers.
    pub get_received_offers: bool,
    /// Whether to get descriptions for items in the trade offers.
    pub get_descriptions: bool,
    /// Only offers updated after this time are returned. When `None` no cutoff is applied.
    pub historical_cutoff: Option<ServerTime>,
}

impl GetTradeOffersOptions {
    /// Active offers we received which were updated after `cutoff`, with item descriptions.
    pub fn active_received_since(cutoff: ServerTime) -> Self {
        Self {
            active_only: true,
            historical_only: false,
            get_sent_offers: false,
            get_received_offers: true,
            get_descriptions: true,
            historical_cutoff: Some(cutoff),
        }
    }
}

/// Credentials used to log in.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    /// The account name.
    pub username: String,
    /// The account password.
    pub password: String,
    /// The shared secret used to generate two-factor codes. May be empty if the account does not
    /// use a mobile authenticator.
    pub shared_secret: String,
}

impl Credentials {
    pub fn new<T, U, V>(username: T, password: U, shared_secret: V) -> Self
    where
        T: Into<String>,
        U: Into<String>,
        V: Into<String>,
    {
        Self {
            username: username.into(),
            password: password.into(),
            shared_secret: shared_secret.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("shared_secret", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::timestamp_to_server_time;

    #[test]
    fn builds_active_received_options() {
        let cutoff = timestamp_to_server_time(1_700_000_000);
        let options = GetTradeOffersOptions::active_received_since(cutoff);

        assert!(options.active_only);
        assert!(options.get_received_offers);
        assert!(options.get_descriptions);
        assert!(!options.get_sent_offers);
        assert!(!options.historical_only);
        assert_eq!(options.historical_cutoff, Some(cutoff));
    }

    #[test]
    fn credentials_debug_hides_secrets() {
        let credentials = Credentials::new("user", "hunter2", "c2VjcmV0");
        let debug = format!("{credentials:?}");

        assert!(debug.contains("user"));
        assert!(!debug.contains("hunter2"));
        assert!(!debug.contains("c2VjcmV0"));
    }
}
