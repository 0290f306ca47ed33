//! Command line options.

use crate::polling::PollOptions;
use crate::request::Credentials;
use clap::Parser;
use chrono::Duration;

/// Polls for received trade offers and accepts the active ones.
#[derive(Parser, Clone, PartialEq, Eq)]
#[command(name = "tradeofferpolling", version)]
pub struct Config {
    /// Steam account name.
    #[arg(long, env = "STEAM_USERNAME", default_value = "", hide_env_values = true)]
    pub username: String,
    /// Steam account password.
    #[arg(long, env = "STEAM_PASSWORD", default_value = "", hide_env_values = true)]
    pub password: String,
    /// Shared secret of the mobile authenticator, base64 encoded.
    #[arg(long, env = "STEAM_SHARED_SECRET", default_value = "", hide_env_values = true)]
    pub shared_secret: String,
    /// Seconds between polls.
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u32).range(1..))]
    pub poll_interval: u32,
    /// Only offers updated within this many seconds before a poll are fetched.
    #[arg(long, default_value_t = 300)]
    pub offer_cutoff: u32,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("credentials", &self.credentials())
            .field("poll_interval", &self.poll_interval)
            .field("offer_cutoff", &self.offer_cutoff)
            .finish()
    }
}

impl Config {
    pub fn credentials(&self) -> Credentials {
        Credentials::new(
            self.username.as_str(),
            self.password.as_str(),
            self.shared_secret.as_str(),
        )
    }

    pub fn poll_options(&self) -> PollOptions {
        PollOptions {
            poll_interval: Duration::seconds(self.poll_interval.into()),
            offer_cutoff: Duration::seconds(self.offer_cutoff.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_flags() {
        let config = Config::try_parse_from([
            "tradeofferpolling",
            "--username", "user",
            "--password", "hunter2",
            "--shared-secret", "c2VjcmV0",
        ]).unwrap();

        assert_eq!(config.credentials(), Credentials::new("user", "hunter2", "c2VjcmV0"));
        assert_eq!(config.poll_options(), PollOptions::default());
    }

    #[test]
    fn overrides_poll_options() {
        let config = Config::try_parse_from([
            "tradeofferpolling",
            "--poll-interval", "30",
            "--offer-cutoff", "60",
        ]).unwrap();
        let options = config.poll_options();

        assert_eq!(options.poll_interval, Duration::seconds(30));
        assert_eq!(options.offer_cutoff, Duration::minutes(1));
    }

    #[test]
    fn rejects_zero_interval() {
        assert!(Config::try_parse_from(["tradeofferpolling", "--poll-interval", "0"]).is_err());
    }

    #[test]
    fn debug_hides_secrets() {
        let config = Config::try_parse_from([
            "tradeofferpolling",
            "--password", "hunter2",
        ]).unwrap();

        assert!(!format!("{config:?}").contains("hunter2"));
    }
}
