use crate::serialize::string_or_number;
use serde::Deserialize;

/// Steam's reported time along with hints on how often to sync against it.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct TimeTip {
    /// The server's time as a unix timestamp in seconds.
    #[serde(deserialize_with = "string_or_number")]
    pub server_time: u64,
    #[serde(default)]
    #[serde(deserialize_with = "string_or_number")]
    pub skew_tolerance_seconds: u64,
    #[serde(default)]
    #[serde(deserialize_with = "string_or_number")]
    pub large_time_jink: u64,
    #[serde(default)]
    pub probe_frequency_seconds: u32,
    #[serde(default)]
    pub adjusted_time_probe_frequency_seconds: u32,
    #[serde(default)]
    pub hint_probe_frequency_seconds: u32,
    #[serde(default)]
    pub sync_timeout: u32,
    #[serde(default)]
    pub try_again_seconds: u32,
    #[serde(default)]
    pub max_attempts: u32,
}

impl TimeTip {
    /// How many seconds the local clock is behind the server at `local_time`.
    pub fn time_offset(&self, local_time: u64) -> i64 {
        crate::time::time_offset(self.server_time, local_time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_time_tip() {
        let tip: TimeTip = serde_json::from_str(r#"{
            "server_time": "1700000030",
            "skew_tolerance_seconds": "60",
            "large_time_jink": "86400",
            "probe_frequency_seconds": 3600,
            "adjusted_time_probe_frequency_seconds": 300,
            "hint_probe_frequency_seconds": 60,
            "sync_timeout": 60,
            "try_again_seconds": 900,
            "max_attempts": 3
        }"#).unwrap();

        assert_eq!(tip.server_time, 1700000030);
        assert_eq!(tip.max_attempts, 3);
        assert_eq!(tip.time_offset(1700000000), 30);
    }
}
