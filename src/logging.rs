//! Log output for the binary. Each line is an RFC 3339 timestamp, the level, the `file:line` of
//! the call and the message.

use std::io::{self, Write};
use chrono::{DateTime, SecondsFormat, Utc};
use env_logger::{Builder, Env};

/// Writes one log record at `now`.
pub fn write_record<W>(buf: &mut W, now: DateTime<Utc>, record: &log::Record) -> io::Result<()>
where
    W: Write,
{
    writeln!(
        buf,
        "{} {} {}:{} {}",
        now.to_rfc3339_opts(SecondsFormat::Secs, true),
        record.level(),
        record.file().unwrap_or("unknown"),
        record.line().unwrap_or(0),
        record.args(),
    )
}

/// Installs the global logger. The filter comes from `RUST_LOG` and defaults to `info`.
pub fn setup_logger() {
    Builder::from_env(Env::default().default_filter_or("info"))
        .format(|buf, record| write_record(buf, Utc::now(), record))
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::{Level, Record};

    #[test]
    fn formats_record_with_location() {
        let now = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        let mut buf = Vec::new();

        write_record(
            &mut buf,
            now,
            &Record::builder()
                .args(format_args!("Login successful"))
                .level(Level::Info)
                .file(Some("src/polling/mod.rs"))
                .line(Some(49))
                .build(),
        ).unwrap();

        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "2023-11-14T22:13:20Z INFO src/polling/mod.rs:49 Login successful\n",
        );
    }

    #[test]
    fn formats_record_without_location() {
        let now = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        let mut buf = Vec::new();

        write_record(
            &mut buf,
            now,
            &Record::builder()
                .args(format_args!("error getting trade offers: timed out"))
                .level(Level::Error)
                .build(),
        ).unwrap();

        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "2023-11-14T22:13:20Z ERROR unknown:0 error getting trade offers: timed out\n",
        );
    }
}
