//! Types shared by every filter and detector

use crate::error::{Error, Result};
use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Wall-clock instant of a measurement, microsecond resolution
pub type Timestamp = NaiveDateTime;

/// A single RSSI measurement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sample {
    /// When the advertisement was received
    pub timestamp: Timestamp,
    /// Received signal strength in dBm (typically -100..0)
    pub value: i32,
}

impl Sample {
    pub fn new(timestamp: Timestamp, value: i32) -> Self {
        Self { timestamp, value }
    }
}

/// Ordered measurements of one device
///
/// Timestamps are non-decreasing; both arrays always have the same length.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Series {
    timestamps: Vec<Timestamp>,
    values: Vec<i32>,
}

impl Series {
    /// Build a series from parallel arrays, validating length and order
    pub fn new(timestamps: Vec<Timestamp>, values: Vec<i32>) -> Result<Self> {
        if timestamps.len() != values.len() {
            return Err(Error::LengthMismatch {
                timestamps: timestamps.len(),
                values: values.len(),
            });
        }
        if let Some(index) = timestamps.windows(2).position(|pair| pair[1] < pair[0]) {
            return Err(Error::UnorderedTimestamps { index: index + 1 });
        }
        Ok(Self { timestamps, values })
    }

    /// Build a series from samples in time order
    pub fn from_samples<I: IntoIterator<Item = Sample>>(samples: I) -> Result<Self> {
        let mut series = Self::default();
        for sample in samples {
            series.push(sample)?;
        }
        Ok(series)
    }

    /// Append a sample; it must not be older than the last one
    pub fn push(&mut self, sample: Sample) -> Result<()> {
        if let Some(&last) = self.timestamps.last() {
            if sample.timestamp < last {
                return Err(Error::UnorderedTimestamps {
                    index: self.timestamps.len(),
                });
            }
        }
        self.timestamps.push(sample.timestamp);
        self.values.push(sample.value);
        Ok(())
    }

    pub fn timestamps(&self) -> &[Timestamp] {
        &self.timestamps
    }

    pub fn values(&self) -> &[i32] {
        &self.values
    }

    /// Values widened to `f64` for arithmetic
    pub fn values_f64(&self) -> Vec<f64> {
        self.values.iter().map(|&v| f64::from(v)).collect()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Sample> {
        Some(Sample::new(*self.timestamps.get(index)?, *self.values.get(index)?))
    }

    pub fn samples(&self) -> impl Iterator<Item = Sample> + '_ {
        self.timestamps
            .iter()
            .zip(&self.values)
            .map(|(&timestamp, &value)| Sample::new(timestamp, value))
    }
}

/// A positive time span used for window membership
///
/// Membership depends on elapsed time, not on index distance, because
/// advertisements arrive irregularly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Window(Duration);

impl Window {
    /// Window from a number of seconds, rounded to microseconds
    pub fn from_secs_f64(seconds: f64) -> Result<Self> {
        let micros = (seconds * 1e6).round();
        if !micros.is_finite() || micros < 1.0 || micros >= i64::MAX as f64 {
            return Err(Error::invalid_window(seconds));
        }
        Ok(Self(Duration::microseconds(micros as i64)))
    }

    pub fn from_duration(duration: Duration) -> Result<Self> {
        if duration <= Duration::zero() {
            return Err(Error::invalid_window(duration.num_milliseconds() as f64 / 1e3));
        }
        Ok(Self(duration))
    }

    pub fn duration(&self) -> Duration {
        self.0
    }

    /// Half the span, the reach of a centered window on either side
    pub fn half(&self) -> Duration {
        self.0 / 2
    }

    pub fn as_secs_f64(&self) -> f64 {
        self.0.num_microseconds().map_or(f64::INFINITY, |us| us as f64 / 1e6)
    }
}

impl fmt::Display for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}s", self.as_secs_f64())
    }
}

/// Sign convention of a filter's output
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Polarity {
    /// Output above zero marks an event
    #[default]
    Positive,
    /// Output is never above zero; below zero marks an event
    DeficitOnly,
}

impl Polarity {
    /// Whether a real-valued output marks an event. NaN never does.
    pub fn is_event(self, value: f64) -> bool {
        match self {
            Polarity::Positive => value > 0.0,
            Polarity::DeficitOnly => value < 0.0,
        }
    }
}

/// Calibration constants for the variance-exceedance detector
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Calibration {
    /// Mean of the windowed variances
    pub vtbar: f64,
    /// Population standard deviation of the windowed variances
    pub sigmav: f64,
    /// Window length in samples
    pub window: usize,
    /// Number of full windows the constants were computed from
    pub windows: usize,
}

impl fmt::Display for Calibration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "vtbar = {}, sigmav = {} (w = {}, {} windows)",
            self.vtbar, self.sigmav, self.window, self.windows
        )
    }
}

/// Output samples of a filter, aligned 1:1 with the input series
#[derive(Debug, Clone, PartialEq)]
pub enum FilterOutput {
    /// Real values; NaN marks an empty window
    Values(Vec<f64>),
    /// Real values; `None` marks an index without enough history
    Margins(Vec<Option<f64>>),
    /// Detector decisions; `None` marks an index without enough history
    Flags(Vec<Option<bool>>),
}

impl FilterOutput {
    pub fn len(&self) -> usize {
        match self {
            FilterOutput::Values(v) => v.len(),
            FilterOutput::Margins(v) => v.len(),
            FilterOutput::Flags(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Result of applying one filter to one series
#[derive(Debug, Clone, PartialEq)]
pub struct FilterResult {
    algorithm: String,
    output: FilterOutput,
    calibration: Option<Calibration>,
}

impl FilterResult {
    pub fn new(algorithm: impl Into<String>, output: FilterOutput) -> Self {
        Self {
            algorithm: algorithm.into(),
            output,
            calibration: None,
        }
    }

    pub fn values(algorithm: impl Into<String>, values: Vec<f64>) -> Self {
        Self::new(algorithm, FilterOutput::Values(values))
    }

    pub fn margins(algorithm: impl Into<String>, margins: Vec<Option<f64>>) -> Self {
        Self::new(algorithm, FilterOutput::Margins(margins))
    }

    pub fn flags(algorithm: impl Into<String>, flags: Vec<Option<bool>>) -> Self {
        Self::new(algorithm, FilterOutput::Flags(flags))
    }

    /// Attach calibration constants computed alongside the output
    pub fn with_calibration(mut self, calibration: Calibration) -> Self {
        self.calibration = Some(calibration);
        self
    }

    /// Name of the filter that produced this result
    pub fn algorithm(&self) -> &str {
        &self.algorithm
    }

    pub fn output(&self) -> &FilterOutput {
        &self.output
    }

    pub fn into_output(self) -> FilterOutput {
        self.output
    }

    pub fn calibration(&self) -> Option<&Calibration> {
        self.calibration.as_ref()
    }

    pub fn len(&self) -> usize {
        self.output.len()
    }

    pub fn is_empty(&self) -> bool {
        self.output.is_empty()
    }

    /// Real-valued output, if this result is of that shape
    pub fn as_values(&self) -> Option<&[f64]> {
        match &self.output {
            FilterOutput::Values(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_margins(&self) -> Option<&[Option<f64>]> {
        match &self.output {
            FilterOutput::Margins(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_flags(&self) -> Option<&[Option<bool>]> {
        match &self.output {
            FilterOutput::Flags(v) => Some(v),
            _ => None,
        }
    }

    /// Whether the sample at `index` marks an event under `polarity`
    ///
    /// Missing data and NaN are never events. Flags ignore the polarity.
    pub fn is_event(&self, index: usize, polarity: Polarity) -> bool {
        match &self.output {
            FilterOutput::Values(v) => v.get(index).is_some_and(|&x| polarity.is_event(x)),
            FilterOutput::Margins(v) => v
                .get(index)
                .copied()
                .flatten()
                .is_some_and(|x| polarity.is_event(x)),
            FilterOutput::Flags(v) => v.get(index).copied().flatten().unwrap_or(false),
        }
    }

    /// Output as plain floats for display: no data becomes NaN, flags 1.0/0.0
    pub fn to_plot_values(&self) -> Vec<f64> {
        match &self.output {
            FilterOutput::Values(v) => v.clone(),
            FilterOutput::Margins(v) => v.iter().map(|m| m.unwrap_or(f64::NAN)).collect(),
            FilterOutput::Flags(v) => v
                .iter()
                .map(|flag| match flag {
                    Some(true) => 1.0,
                    Some(false) => 0.0,
                    None => f64::NAN,
                })
                .collect(),
        }
    }
}

impl fmt::Display for FilterResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Filter Result:")?;
        writeln!(f, "  Algorithm: {}", self.algorithm)?;
        writeln!(f, "  Samples: {}", self.len())?;
        if let Some(calibration) = &self.calibration {
            writeln!(f, "  Calibration: {calibration}")?;
        }
        Ok(())
    }
}
