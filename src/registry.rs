//! Name-based lookup of filters
//!
//! The registry maps each filter name to a factory that parses the filter's
//! parameter string. It is built once and never changes afterwards:
//!
//! ```rust
//! use rssi_events::{registry, FilterProperties};
//!
//! let filter = registry().build("moving_average", "2.5").unwrap();
//! assert_eq!(filter.filter_name(), "moving_average");
//! assert!(registry().build("no_such_filter", "").is_err());
//! ```

use lazy_static::lazy_static;
use rssi_core::{
    event_intervals, BatchFilter, Error, EventInterval, FilterResult, Polarity, Result, Series,
};
use rssi_detectors::{
    OutputForm, RelativeRatio, ThresholdDifference, VarianceExceedance, VarianceTraining,
    WindowedAverageDetector, WindowedVarianceDetector,
};
use rssi_filters::{
    CausalMaEvent, Difference, MovingAverage, MovingAverageEvent, MovingEnvelope, MovingMinimum,
    MovingVariance, Passthrough,
};
use std::collections::BTreeMap;
use std::fmt;
use tracing::{debug, instrument};

/// Builds a filter from its parameter string
pub type FilterFactory = fn(&str) -> Result<Box<dyn BatchFilter>>;

#[derive(Clone, Copy)]
struct Entry {
    factory: FilterFactory,
    polarity: Polarity,
}

/// Immutable map from filter name to factory
pub struct Registry {
    entries: BTreeMap<&'static str, Entry>,
}

lazy_static! {
    static ref STANDARD: Registry = Registry::standard();
}

/// The shared registry of every built-in filter
pub fn registry() -> &'static Registry {
    &STANDARD
}

fn boxed<F: BatchFilter + 'static>(filter: F) -> Box<dyn BatchFilter> {
    Box::new(filter)
}

impl Registry {
    /// All built-in filters
    pub fn standard() -> Self {
        use Polarity::{DeficitOnly, Positive};

        let table: [(&'static str, Polarity, FilterFactory); 17] = [
            (Passthrough::NAME, Positive, |_| Ok(boxed(Passthrough))),
            (Difference::NAME, Positive, |_| Ok(boxed(Difference))),
            (MovingAverage::NAME, Positive, |p| MovingAverage::from_params(p).map(boxed)),
            (MovingVariance::NAME, Positive, |p| MovingVariance::from_params(p).map(boxed)),
            (MovingMinimum::NAME, Positive, |p| MovingMinimum::from_params(p).map(boxed)),
            (MovingEnvelope::NAME, Positive, |p| MovingEnvelope::from_params(p).map(boxed)),
            (MovingAverageEvent::NAME, Positive, |p| {
                MovingAverageEvent::from_params(p).map(boxed)
            }),
            (CausalMaEvent::NAME, DeficitOnly, |p| CausalMaEvent::from_params(p).map(boxed)),
            (ThresholdDifference::NAME, Positive, |p| {
                ThresholdDifference::from_params(p, OutputForm::Margin).map(boxed)
            }),
            (ThresholdDifference::FLAGS_NAME, Positive, |p| {
                ThresholdDifference::from_params(p, OutputForm::Flags).map(boxed)
            }),
            (RelativeRatio::NAME, Positive, |p| {
                RelativeRatio::from_params(p, OutputForm::Margin).map(boxed)
            }),
            (RelativeRatio::FLAGS_NAME, Positive, |p| {
                RelativeRatio::from_params(p, OutputForm::Flags).map(boxed)
            }),
            (VarianceExceedance::NAME, Positive, |p| {
                VarianceExceedance::from_params(p, OutputForm::Margin).map(boxed)
            }),
            (VarianceExceedance::FLAGS_NAME, Positive, |p| {
                VarianceExceedance::from_params(p, OutputForm::Flags).map(boxed)
            }),
            (VarianceTraining::NAME, Positive, |p| VarianceTraining::from_params(p).map(boxed)),
            (WindowedVarianceDetector::NAME, Positive, |p| {
                WindowedVarianceDetector::from_params(p).map(boxed)
            }),
            (WindowedAverageDetector::NAME, Positive, |p| {
                WindowedAverageDetector::from_params(p).map(boxed)
            }),
        ];

        let entries = table
            .into_iter()
            .map(|(name, polarity, factory)| (name, Entry { factory, polarity }))
            .collect();
        Self { entries }
    }

    /// Registered names in alphabetical order
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.keys().copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn entry(&self, name: &str) -> Result<&Entry> {
        self.entries
            .get(name)
            .ok_or_else(|| Error::FilterNotFound(name.to_string()))
    }

    /// Parse `params` and build the named filter
    pub fn build(&self, name: &str, params: &str) -> Result<Box<dyn BatchFilter>> {
        (self.entry(name)?.factory)(params)
    }

    /// Sign convention of the named filter's output
    pub fn polarity(&self, name: &str) -> Result<Polarity> {
        Ok(self.entry(name)?.polarity)
    }

    /// Build the named filter and run it over `series`
    #[instrument(skip(self, series), fields(samples = series.len()))]
    pub fn apply(&self, name: &str, series: &Series, params: &str) -> Result<FilterResult> {
        let filter = self.build(name, params)?;
        let result = filter.apply(series)?;
        debug!(output = result.len(), "filter applied");
        Ok(result)
    }

    /// Run the named filter and group its output into event intervals
    pub fn events(&self, name: &str, series: &Series, params: &str) -> Result<Vec<EventInterval>> {
        let polarity = self.polarity(name)?;
        let result = self.apply(name, series, params)?;
        event_intervals(series.timestamps(), &result, polarity)
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("names", &self.entries.keys().collect::<Vec<_>>())
            .finish()
    }
}
