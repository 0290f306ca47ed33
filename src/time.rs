//! Time helpers. Steam reports times as unix timestamps in seconds.

use std::time::{SystemTime, UNIX_EPOCH};
use chrono::{DateTime, Utc};

pub type ServerTime = DateTime<Utc>;

/// Converts a unix timestamp into a [`ServerTime`]. Out of range timestamps become the epoch.
pub fn timestamp_to_server_time(timestamp: i64) -> ServerTime {
    DateTime::from_timestamp(timestamp, 0)
        .unwrap_or_default()
}

pub fn get_server_time_now() -> ServerTime {
    ServerTime::from(SystemTime::now())
}

pub fn get_system_time() -> u64 {
    match SystemTime::now().duration_since(UNIX_EPOCH) {
        Ok(n) => n.as_secs(),
        // should never occur
        Err(_) => 0,
    }
}

/// How many seconds the local clock is behind the server's clock. Negative when the local
/// clock is ahead.
pub fn time_offset(server_time: u64, local_time: u64) -> i64 {
    server_time as i64 - local_time as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn computes_time_offset_in_both_directions() {
        assert_eq!(time_offset(1_700_000_030, 1_700_000_000), 30);
        assert_eq!(time_offset(1_700_000_000, 1_700_000_030), -30);
        assert_eq!(time_offset(1_700_000_000, 1_700_000_000), 0);
    }

    #[test]
    fn converts_timestamps() {
        let time = timestamp_to_server_time(1_700_000_000);

        assert_eq!(time.timestamp(), 1_700_000_000);
    }
}
