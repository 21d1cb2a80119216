//! RSSI log parsing
//!
//! Turns tab-separated `timestamp, address, rssi` lines into one
//! [`Series`](rssi_core::Series) per device:
//!
//! ```rust
//! use rssi_log::{DeviceLog, DeviceSummary, LogSelection};
//!
//! let lines = [
//!     "2016-03-01 10:00:00.100000\tAA:BB\t-60",
//!     "2016-03-01 10:00:00.600000\tAA:BB\t-64",
//! ];
//! let log = DeviceLog::from_lines(lines, &LogSelection::device("aa:bb")).unwrap();
//! let summary = DeviceSummary::of(log.device("AA:BB").unwrap());
//! assert_eq!(summary.mean, -62.0);
//! ```

pub mod device_log;
pub mod record;
pub mod summary;

pub use device_log::{DeviceLog, LogSelection};
pub use record::{LogRecord, TimestampPrecision, TIMESTAMP_FORMAT};
pub use summary::DeviceSummary;
