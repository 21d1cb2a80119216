//! Running-average detector with a frozen baseline
//!
//! The instantaneous mean over `winstant` samples is compared with a baseline
//! built from the samples the instantaneous window evicts:
//!
//! ```text
//! out = -(mean(instant) - mean(baseline)) - r * sqrt(baseline variance)
//! ```
//!
//! A drop in signal gives a positive output. While the baseline is still
//! filling the output is clamped to at most zero. After warm-up the baseline
//! only moves while the output is negative, so it holds still during an
//! event. It is never resynchronized; a lasting level change keeps it stale.

use rssi_core::{
    BatchFilter, ConfigurableFilter, FilterProperties, FilterResult, OnlineDetector,
    ParamFields, ParseParameters, Result, RunningAccumulator, Series,
};
use tracing::{debug, instrument, trace};

/// Baseline variance assumed until the baseline window has filled (dBm²)
pub const WARMUP_BASELINE_VARIANCE: f64 = 10_000.0;

/// Parameters: `wbase,winstant,r`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowedAverageParameters {
    pub wbase: usize,
    pub winstant: usize,
    pub r: f64,
}

impl ParseParameters for WindowedAverageParameters {
    fn parse_parameters(raw: &str) -> Result<Self> {
        let fields = ParamFields::parse(WindowedAverageDetector::NAME, raw, 3)?;
        Ok(Self {
            wbase: fields.count(0)?,
            winstant: fields.count(1)?,
            r: fields.non_negative(2)?,
        })
    }
}

#[derive(Debug, Clone)]
pub struct WindowedAverageState {
    params: WindowedAverageParameters,
    instant: RunningAccumulator,
    baseline: RunningAccumulator,
    index: usize,
}

impl WindowedAverageState {
    pub fn new(params: WindowedAverageParameters) -> Result<Self> {
        Ok(Self {
            params,
            instant: RunningAccumulator::new(params.winstant)?,
            baseline: RunningAccumulator::new(params.wbase)?,
            index: 0,
        })
    }

    pub fn parameters(&self) -> &WindowedAverageParameters {
        &self.params
    }

    /// Whether the baseline is still filling
    pub fn warming_up(&self) -> bool {
        self.index < self.params.wbase + self.params.winstant
    }

    pub fn baseline_mean(&self) -> f64 {
        self.baseline.mean()
    }

    pub fn push(&mut self, value: f64) -> f64 {
        let instant = self.instant.push(value);
        let warming_up = self.warming_up();
        let variance = if warming_up {
            WARMUP_BASELINE_VARIANCE
        } else {
            self.baseline.variance()
        };

        let mut out =
            -(self.instant.mean() - self.baseline.mean()) - self.params.r * variance.sqrt();
        if warming_up {
            // Baseline still holds seed zeros
            self.baseline.push(instant.evicted);
            out = out.min(0.0);
        } else if out < 0.0 {
            self.baseline.push(instant.evicted);
        }
        trace!(index = self.index, out, baseline = self.baseline.mean(), "windowed average step");
        self.index += 1;
        out
    }
}

impl OnlineDetector for WindowedAverageState {
    fn process_sample(&mut self, value: f64) -> f64 {
        self.push(value)
    }

    fn reset(&mut self) {
        self.instant.reset();
        self.baseline.reset();
        self.index = 0;
    }

    fn current_index(&self) -> usize {
        self.index
    }
}

#[derive(Debug, Clone)]
pub struct WindowedAverageDetector {
    params: WindowedAverageParameters,
}

impl WindowedAverageDetector {
    pub const NAME: &'static str = "windowed_average";

    pub fn new(wbase: usize, winstant: usize, r: f64) -> Self {
        Self::with_parameters(WindowedAverageParameters { wbase, winstant, r })
    }

    pub fn from_params(raw: &str) -> Result<Self> {
        Ok(Self::with_parameters(WindowedAverageParameters::parse_parameters(raw)?))
    }

    pub fn state(&self) -> Result<WindowedAverageState> {
        WindowedAverageState::new(self.params)
    }
}

impl FilterProperties for WindowedAverageDetector {
    fn filter_name(&self) -> &'static str {
        Self::NAME
    }
}

impl ConfigurableFilter for WindowedAverageDetector {
    type Parameters = WindowedAverageParameters;

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

impl BatchFilter for WindowedAverageDetector {
    #[instrument(skip(self, series), fields(filter = Self::NAME, samples = series.len()))]
    fn apply(&self, series: &Series) -> Result<FilterResult> {
        debug!(params = ?self.params, "running average cascade");
        let mut state = self.state()?;
        let out = series
            .values()
            .iter()
            .map(|&v| state.push(f64::from(v)))
            .collect();
        Ok(FilterResult::values(Self::NAME, out))
    }
}
