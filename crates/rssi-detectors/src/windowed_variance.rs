//! Cascaded running-variance detector
//!
//! Three running accumulators are chained:
//!
//! - `instant` (capacity `winstant`) over the raw signal
//! - `baseline` (capacity `wbase`) over the samples `instant` evicts, so it
//!   trails the instantaneous window
//! - `spread` (capacity `wbase`) over the baseline's variance estimates
//!
//! The output is the instantaneous variance above the typical baseline
//! variance, less `r` times the spread of that baseline variance:
//!
//! ```text
//! out = var(instant) - max(0, mean(spread)) - r * max(std_min, sqrt(var(spread)))
//! ```

use rssi_core::{
    BatchFilter, ConfigurableFilter, FilterProperties, FilterResult, OnlineDetector,
    ParamFields, ParseParameters, Result, RunningAccumulator, Series,
};
use tracing::{debug, instrument, trace};

/// Parameters: `wbase,winstant,r,std_min`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowedVarianceParameters {
    /// Baseline window, in samples
    pub wbase: usize,
    /// Instantaneous window, in samples
    pub winstant: usize,
    /// Threshold multiplier on the baseline spread
    pub r: f64,
    /// Floor for the baseline spread
    pub std_min: f64,
}

impl ParseParameters for WindowedVarianceParameters {
    fn parse_parameters(raw: &str) -> Result<Self> {
        let fields = ParamFields::parse(WindowedVarianceDetector::NAME, raw, 4)?;
        Ok(Self {
            wbase: fields.count(0)?,
            winstant: fields.count(1)?,
            r: fields.non_negative(2)?,
            std_min: fields.non_negative(3)?,
        })
    }
}

/// Streaming state of the cascade
#[derive(Debug, Clone)]
pub struct WindowedVarianceState {
    params: WindowedVarianceParameters,
    instant: RunningAccumulator,
    baseline: RunningAccumulator,
    spread: RunningAccumulator,
    index: usize,
}

impl WindowedVarianceState {
    pub fn new(params: WindowedVarianceParameters) -> Result<Self> {
        Ok(Self {
            params,
            instant: RunningAccumulator::new(params.winstant)?,
            baseline: RunningAccumulator::new(params.wbase)?,
            spread: RunningAccumulator::new(params.wbase)?,
            index: 0,
        })
    }

    pub fn parameters(&self) -> &WindowedVarianceParameters {
        &self.params
    }

    /// Feed one sample and return the detector output for it
    pub fn push(&mut self, value: f64) -> f64 {
        let instant = self.instant.push(value);
        let baseline = self.baseline.push(instant.evicted);
        let spread = self.spread.push(baseline.variance);

        let typical = self.spread.mean().max(0.0);
        let deviation = spread.variance.sqrt().max(self.params.std_min);
        let mut out = instant.variance - typical - self.params.r * deviation;

        // The instantaneous window still holds seed zeros
        if self.index + 1 < self.params.winstant {
            out = out.min(0.0);
        }
        trace!(index = self.index, variance = instant.variance, out, "windowed variance step");
        self.index += 1;
        out
    }
}

impl OnlineDetector for WindowedVarianceState {
    fn process_sample(&mut self, value: f64) -> f64 {
        self.push(value)
    }

    fn reset(&mut self) {
        self.instant.reset();
        self.baseline.reset();
        self.spread.reset();
        self.index = 0;
    }

    fn current_index(&self) -> usize {
        self.index
    }
}

/// Batch form: runs the series through a fresh [`WindowedVarianceState`]
#[derive(Debug, Clone)]
pub struct WindowedVarianceDetector {
    params: WindowedVarianceParameters,
}

impl WindowedVarianceDetector {
    pub const NAME: &'static str = "windowed_variance";

    pub fn new(wbase: usize, winstant: usize, r: f64, std_min: f64) -> Self {
        Self::with_parameters(WindowedVarianceParameters { wbase, winstant, r, std_min })
    }

    pub fn from_params(raw: &str) -> Result<Self> {
        Ok(Self::with_parameters(WindowedVarianceParameters::parse_parameters(raw)?))
    }

    pub fn state(&self) -> Result<WindowedVarianceState> {
        WindowedVarianceState::new(self.params)
    }
}

impl FilterProperties for WindowedVarianceDetector {
    fn filter_name(&self) -> &'static str {
        Self::NAME
    }
}

impl ConfigurableFilter for WindowedVarianceDetector {
    type Parameters = WindowedVarianceParameters;

    fn with_parameters(params: Self::Parameters) -> Self {
        Self { params }
    }

    fn parameters(&self) -> &Self::Parameters {
        &self.params
    }

    fn set_parameters(&mut self, params: Self::Parameters) {
        self.params = params;
    }
}

impl BatchFilter for WindowedVarianceDetector {
    #[instrument(skip(self, series), fields(filter = Self::NAME, samples = series.len()))]
    fn apply(&self, series: &Series) -> Result<FilterResult> {
        debug!(params = ?self.params, "running variance cascade");
        let mut state = self.state()?;
        let out = series
            .values()
            .iter()
            .map(|&v| state.push(f64::from(v)))
            .collect();
        Ok(FilterResult::values(Self::NAME, out))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::series_every_second;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_single_spike() {
        let series = series_every_second(&[-60, -60, -30, -60, -60]);
        let out = WindowedVarianceDetector::from_params("1,2,1,1")
            .unwrap()
            .apply(&series)
            .unwrap();
        let v = out.as_values().unwrap();

        // First sample shares the window with a seed zero
        assert!(v[0] <= 0.0);
        assert_abs_diff_eq!(v[1], -1.0, epsilon = 1e-9);
        assert_abs_diff_eq!(v[2], 224.0, epsilon = 1e-9);
        assert_abs_diff_eq!(v[3], 224.0, epsilon = 1e-9);
        assert_abs_diff_eq!(v[4], -1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_warmup_never_fires_on_flat_signal() {
        let mut state = WindowedVarianceState::new(WindowedVarianceParameters {
            wbase: 4,
            winstant: 3,
            r: 0.0,
            std_min: 0.0,
        })
        .unwrap();
        for _ in 0..20 {
            assert!(state.push(-72.0) <= 0.0);
        }
        assert_eq!(state.current_index(), 20);
    }

    #[test]
    fn test_reset_matches_fresh_state() {
        let params = WindowedVarianceParameters { wbase: 3, winstant: 2, r: 2.0, std_min: 0.5 };
        let input = [-60.0, -61.0, -75.0, -62.0, -60.0, -59.0];

        let mut fresh = WindowedVarianceState::new(params).unwrap();
        let expected: Vec<f64> = input.iter().map(|&v| fresh.process_sample(v)).collect();

        let mut reused = WindowedVarianceState::new(params).unwrap();
        reused.process_sample(-10.0);
        reused.process_sample(-99.0);
        reused.reset();
        assert_eq!(reused.current_index(), 0);
        let again: Vec<f64> = input.iter().map(|&v| reused.process_sample(v)).collect();
        assert_eq!(expected, again);
    }

    #[test]
    fn test_parameters() {
        let detector = WindowedVarianceDetector::from_params("30, 5, 3, 1.5").unwrap();
        assert_eq!(
            *detector.parameters(),
            WindowedVarianceParameters { wbase: 30, winstant: 5, r: 3.0, std_min: 1.5 }
        );
        assert!(WindowedVarianceDetector::from_params("30,5,3").is_err());
        assert!(WindowedVarianceDetector::from_params("30,0,3,1").is_err());
        assert!(WindowedVarianceDetector::from_params("30,5,x,1").is_err());
    }
}
