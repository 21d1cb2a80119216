//! Obstacle detectors for RSSI series
//!
//! # Published detectors
//!
//! Each comes in a margin form (positive means obstacle) and a flags form.
//!
//! - **wang2013**: threshold on the first difference ([`ThresholdDifference`])
//! - **youssef2007a**: relative moving-average ratio ([`RelativeRatio`])
//! - **youssef2007b**: windowed variance against calibrated constants
//!   ([`VarianceExceedance`]), with a training mode ([`VarianceTraining`])
//!
//! These work in sample counts, not seconds.
//!
//! # Cascade detectors
//!
//! Streaming detectors built from chained
//! [`RunningAccumulator`](rssi_core::RunningAccumulator)s. Each has a state
//! type implementing [`OnlineDetector`](rssi_core::OnlineDetector) and a batch
//! form that runs a fresh state over a series.
//!
//! - **windowed_variance**: [`WindowedVarianceState`] / [`WindowedVarianceDetector`]
//! - **windowed_average**: [`WindowedAverageState`] / [`WindowedAverageDetector`]
//!
//! ```rust
//! use rssi_core::OnlineDetector;
//! use rssi_detectors::{WindowedVarianceParameters, WindowedVarianceState};
//!
//! let mut state = WindowedVarianceState::new(WindowedVarianceParameters {
//!     wbase: 30,
//!     winstant: 5,
//!     r: 3.0,
//!     std_min: 1.0,
//! })
//! .unwrap();
//! let out = state.process_sample(-61.0);
//! assert!(out <= 0.0);
//! ```

pub mod form;
pub mod relative_ratio;
pub mod threshold_difference;
pub mod variance_exceedance;
pub mod windowed_average;
pub mod windowed_variance;

pub use form::OutputForm;
pub use relative_ratio::{relative_ratio_margins, RelativeRatio, RelativeRatioParameters};
pub use threshold_difference::{
    threshold_difference_margins, ThresholdDifference, ThresholdDifferenceParameters,
};
pub use variance_exceedance::{
    variance_exceedance_margins, windowed_variances, VarianceExceedance,
    VarianceExceedanceParameters, VarianceTraining,
};
pub use windowed_average::{
    WindowedAverageDetector, WindowedAverageParameters, WindowedAverageState,
    WARMUP_BASELINE_VARIANCE,
};
pub use windowed_variance::{
    WindowedVarianceDetector, WindowedVarianceParameters, WindowedVarianceState,
};
