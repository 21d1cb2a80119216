//! Single log lines
//!
//! A line holds three tab-separated fields:
//!
//! ```text
//! 2016-03-01 10:00:00.250000<TAB>00:1A:7D:DA:71:13<TAB>-61
//! ```

use chrono::NaiveDateTime;
use rssi_core::{Error, Result, Sample, Timestamp};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Timestamp layout; the fractional part may be missing
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// Whether a timestamp carried sub-second digits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimestampPrecision {
    Fractional,
    /// Fractional seconds were missing; the reading may be up to 1 s early
    WholeSeconds,
}

/// One parsed log line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    pub timestamp: Timestamp,
    pub address: String,
    pub rssi: i32,
    pub precision: TimestampPrecision,
}

impl LogRecord {
    /// Parse a line on its own; errors report it as line 1
    pub fn parse(line: &str) -> Result<Self> {
        Self::parse_line(1, line)
    }

    /// Parse line number `number` (1-based) of a log
    pub fn parse_line(number: usize, line: &str) -> Result<Self> {
        let invalid = |reason: String| Error::InvalidRecord { line: number, reason };

        let fields: Vec<&str> = line.trim_end_matches(['\r', '\n']).split('\t').collect();
        let [time, address, rssi] = fields.as_slice() else {
            return Err(invalid(format!(
                "expected 3 tab-separated fields, got {}",
                fields.len()
            )));
        };

        let time = time.trim();
        let timestamp = NaiveDateTime::parse_from_str(time, TIMESTAMP_FORMAT)
            .map_err(|e| invalid(format!("bad timestamp '{time}': {e}")))?;
        let precision = if time.contains('.') {
            TimestampPrecision::Fractional
        } else {
            warn!(line = number, %timestamp, "timestamp without fractional seconds");
            TimestampPrecision::WholeSeconds
        };

        let rssi = rssi
            .trim()
            .parse::<i32>()
            .map_err(|_| invalid(format!("RSSI '{}' is not an integer", rssi.trim())))?;

        Ok(Self {
            timestamp,
            address: address.trim().to_string(),
            rssi,
            precision,
        })
    }

    pub fn sample(&self) -> Sample {
        Sample::new(self.timestamp, self.rssi)
    }
}
