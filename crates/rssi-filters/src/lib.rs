//! Batch filters for irregularly sampled RSSI series
//!
//! # Filters
//!
//! ## Centered windows
//! - **moving_average**, **moving_variance**, **moving_minimum**,
//!   **moving_envelope**: one statistic per sample over the samples within
//!   half a window (in seconds) on either side
//! - **moving_average_event**: event-window mean minus background-window mean
//!
//! ## Causal
//! - **causal_ma_event**: backwards-looking event/background comparison whose
//!   output is never above zero
//!
//! ## Basic
//! - **passthrough** and **difference**
//!
//! Slice-level kernels (`moving_average(timestamps, values, window)` etc.) are
//! exported alongside the filter structs for callers that don't hold a
//! [`Series`](rssi_core::Series).
//!
//! ## Usage
//!
//! ```rust
//! use rssi_core::{BatchFilter, Series};
//! use rssi_filters::MovingAverage;
//!
//! let series = Series::default();
//! let filter = MovingAverage::from_params("2.5").unwrap();
//! assert!(filter.apply(&series).unwrap().is_empty());
//! ```

pub mod basic;
pub mod causal;
pub mod moving;

pub use basic::{Difference, Passthrough};
pub use causal::{causal_ma_event, CausalMaEvent};
pub use moving::{
    map_centered_windows, moving_average, moving_average_event, moving_envelope, moving_minimum,
    moving_variance, EventWindowParameters, MovingAverage, MovingAverageEvent, MovingEnvelope,
    MovingMinimum, MovingVariance, WindowParameters,
};
