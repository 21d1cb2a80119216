//! Core types and primitives for RSSI event detection
//!
//! This crate holds everything the filter crates share:
//!
//! - [`Series`], [`Window`] and [`FilterResult`], the data model
//! - [`WindowIndexer`], the two-pointer centered window over irregular time
//! - [`RunningAccumulator`], the O(1) rolling mean/variance used by the
//!   cascade detectors
//! - [`ParamFields`], parsing of comma-separated parameter strings
//! - the [`BatchFilter`] / [`OnlineDetector`] traits
//! - [`event_intervals`], grouping detector output into events
//!
//! # Example
//!
//! ```rust
//! use rssi_core::{RunningAccumulator, Result};
//!
//! fn main() -> Result<()> {
//!     let mut acc = RunningAccumulator::new(3)?;
//!     for v in [-60.0, -61.0, -59.0] {
//!         acc.push(v);
//!     }
//!     assert!((acc.mean() + 60.0).abs() < 1e-12);
//!     Ok(())
//! }
//! ```

pub mod accumulator;
pub mod error;
pub mod events;
pub mod kernels;
pub mod params;
pub mod traits;
pub mod types;
pub mod window;

pub use accumulator::{Push, RunningAccumulator};
pub use error::{Error, Result};
pub use events::{event_intervals, EventInterval};
pub use params::{ParamFields, ParseParameters};
pub use traits::{BatchFilter, ConfigurableFilter, FilterProperties, OnlineDetector};
pub use types::{
    Calibration, FilterOutput, FilterResult, Polarity, Sample, Series, Timestamp, Window,
};
pub use window::{centered_ranges, WindowIndexer};
