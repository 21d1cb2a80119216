//! # rssi-events
//!
//! Event detection on Bluetooth RSSI logs. A person or obstacle passing
//! between a transmitter and a receiver shows up as a drop or a burst of
//! variance in the received signal strength; the filters here make those
//! moments stand out.
//!
//! ## Crates
//!
//! - [`rssi_core`]: series, windows, running accumulator, error type, traits
//! - [`rssi_filters`]: centered-window filters over irregular time and the
//!   causal event detector
//! - [`rssi_detectors`]: published detectors and the cascade detectors
//! - [`rssi_log`]: log-line parsing into per-device series
//!
//! This crate re-exports all of them and adds the [`Registry`], which builds
//! any filter from its name and parameter string.
//!
//! ## Example
//!
//! ```rust
//! use rssi_events::{registry, DeviceLog, LogSelection, Polarity};
//!
//! let lines = [
//!     "2016-03-01 10:00:00.0\tAA:BB\t-60",
//!     "2016-03-01 10:00:01.0\tAA:BB\t-60",
//!     "2016-03-01 10:00:02.0\tAA:BB\t-30",
//!     "2016-03-01 10:00:03.0\tAA:BB\t-60",
//!     "2016-03-01 10:00:04.0\tAA:BB\t-60",
//! ];
//! let log = DeviceLog::from_lines(lines, &LogSelection::default()).unwrap();
//! let series = log.device("AA:BB").unwrap();
//!
//! let events = registry().events("windowed_variance", series, "1,2,1,1").unwrap();
//! assert_eq!(events.len(), 1);
//! assert_eq!(events[0].start_index, 2);
//! assert_eq!(registry().polarity("windowed_variance").unwrap(), Polarity::Positive);
//! ```

pub mod registry;

pub use registry::{registry, FilterFactory, Registry};

pub use rssi_core::{
    self, centered_ranges, event_intervals, BatchFilter, Calibration, ConfigurableFilter, Error,
    EventInterval, FilterOutput, FilterProperties, FilterResult, OnlineDetector, ParamFields,
    ParseParameters, Polarity, Push, Result, RunningAccumulator, Sample, Series, Timestamp,
    Window, WindowIndexer,
};
pub use rssi_detectors::{
    self, OutputForm, RelativeRatio, ThresholdDifference, VarianceExceedance, VarianceTraining,
    WindowedAverageDetector, WindowedAverageState, WindowedVarianceDetector,
    WindowedVarianceState,
};
pub use rssi_filters::{
    self, CausalMaEvent, Difference, MovingAverage, MovingAverageEvent, MovingEnvelope,
    MovingMinimum, MovingVariance, Passthrough,
};
pub use rssi_log::{self, DeviceLog, DeviceSummary, LogRecord, LogSelection, TimestampPrecision};
