//! Core traits for filters and detectors
//!
//! Every filter is one struct holding its parsed parameters. Batch use goes
//! through [`BatchFilter::apply`]; detectors that can run one sample at a
//! time also expose an [`OnlineDetector`] state.

use crate::error::Result;
use crate::types::{FilterResult, Polarity, Series};

/// Properties of a filter that don't depend on the input
pub trait FilterProperties {
    /// Registry name of the filter
    fn filter_name(&self) -> &'static str;

    /// Sign convention of the output
    fn polarity(&self) -> Polarity {
        Polarity::Positive
    }
}

/// A transform from one series to an aligned output
pub trait BatchFilter: FilterProperties + Send + Sync {
    /// Apply to a complete series; the output has one entry per sample
    fn apply(&self, series: &Series) -> Result<FilterResult>;
}

/// Filters configured by a parameter struct
pub trait ConfigurableFilter {
    type Parameters;

    fn with_parameters(params: Self::Parameters) -> Self;
    fn parameters(&self) -> &Self::Parameters;
    fn set_parameters(&mut self, params: Self::Parameters);
}

/// Detectors that keep state between samples
pub trait OnlineDetector {
    /// Feed one value and get the detector output for it
    fn process_sample(&mut self, value: f64) -> f64;

    /// Return to the freshly constructed state
    fn reset(&mut self);

    /// Number of samples processed since construction or reset
    fn current_index(&self) -> usize;
}
