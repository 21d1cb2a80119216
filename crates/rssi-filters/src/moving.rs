//! Centered moving-window filters
//!
//! Each output sample summarizes the samples within half a window on either
//! side of it, found with [`WindowIndexer`]. Window membership is by elapsed
//! time, so the number of samples per window varies. An empty window yields
//! NaN.

use num_traits::ToPrimitive;
use rssi_core::kernels;
use rssi_core::{
    BatchFilter, ConfigurableFilter, Error, FilterProperties, FilterResult, ParamFields,
    ParseParameters, Result, Series, Timestamp, Window, WindowIndexer,
};
use std::ops::Range;
use tracing::{debug, instrument};

/// Evaluate `f` on the centered window range of every sample
pub fn map_centered_windows<F>(timestamps: &[Timestamp], window: Window, mut f: F) -> Vec<f64>
where
    F: FnMut(Range<usize>) -> f64,
{
    let mut indexer = WindowIndexer::new(timestamps, window);
    timestamps.iter().map(|&t| f(indexer.range(t))).collect()
}

pub(crate) fn check_lengths<T>(timestamps: &[Timestamp], values: &[T]) -> Result<()> {
    if timestamps.len() != values.len() {
        return Err(Error::LengthMismatch {
            timestamps: timestamps.len(),
            values: values.len(),
        });
    }
    Ok(())
}

// The slice kernels below return `Error::LengthMismatch` unless `timestamps`
// and `values` have the same length.

/// Centered mean using prefix sums, O(N) overall
pub fn moving_average<T: ToPrimitive>(
    timestamps: &[Timestamp],
    values: &[T],
    window: Window,
) -> Result<Vec<f64>> {
    check_lengths(timestamps, values)?;
    let sums = kernels::prefix_sums(values);
    Ok(map_centered_windows(timestamps, window, |r| {
        if r.is_empty() {
            f64::NAN
        } else {
            (sums[r.end] - sums[r.start]) / r.len() as f64
        }
    }))
}

/// Centered population variance, recomputed for every window
pub fn moving_variance<T: ToPrimitive>(
    timestamps: &[Timestamp],
    values: &[T],
    window: Window,
) -> Result<Vec<f64>> {
    check_lengths(timestamps, values)?;
    Ok(map_centered_windows(timestamps, window, |r| {
        kernels::population_variance(&values[r])
    }))
}

/// Centered minimum
pub fn moving_minimum<T: ToPrimitive>(
    timestamps: &[Timestamp],
    values: &[T],
    window: Window,
) -> Result<Vec<f64>> {
    check_lengths(timestamps, values)?;
    Ok(map_centered_windows(timestamps, window, |r| {
        kernels::min_max(&values[r]).map_or(f64::NAN, |(lo, _)| lo)
    }))
}

/// Centered envelope width, `max - min`
pub fn moving_envelope<T: ToPrimitive>(
    timestamps: &[Timestamp],
    values: &[T],
    window: Window,
) -> Result<Vec<f64>> {
    check_lengths(timestamps, values)?;
    Ok(map_centered_windows(timestamps, window, |r| {
        kernels::min_max(&values[r]).map_or(f64::NAN, |(lo, hi)| hi - lo)
    }))
}

/// Event-window mean minus background-window mean, both centered
pub fn moving_average_event<T: ToPrimitive>(
    timestamps: &[Timestamp],
    values: &[T],
    background: Window,
    event: Window,
) -> Result<Vec<f64>> {
    let background_mean = moving_average(timestamps, values, background)?;
    let event_mean = moving_average(timestamps, values, event)?;
    Ok(event_mean
        .into_iter()
        .zip(background_mean)
        .map(|(ev, bg)| ev - bg)
        .collect())
}

/// Parameters of the single-window filters: `window_seconds`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowParameters {
    pub window: Window,
}

macro_rules! single_window_filter {
    ($(#[$doc:meta])* $ty:ident, $name:literal, $kernel:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone)]
        pub struct $ty {
            params: WindowParameters,
        }

        impl $ty {
            pub const NAME: &'static str = $name;

            pub fn new(window: Window) -> Self {
                Self { params: WindowParameters { window } }
            }

            /// Build from a parameter string such as `"2.5"`
            pub fn from_params(raw: &str) -> Result<Self> {
                Ok(Self::with_parameters(WindowParameters::parse_for(Self::NAME, raw)?))
            }
        }

        impl FilterProperties for $ty {
            fn filter_name(&self) -> &'static str {
                Self::NAME
            }
        }

        impl ConfigurableFilter for $ty {
            type Parameters = WindowParameters;

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

        impl BatchFilter for $ty {
            #[instrument(skip(self, series), fields(filter = $name, samples = series.len()))]
            fn apply(&self, series: &Series) -> Result<FilterResult> {
                debug!(window = %self.params.window, "applying centered window filter");
                let out = $kernel(series.timestamps(), series.values(), self.params.window)?;
                Ok(FilterResult::values(Self::NAME, out))
            }
        }
    };
}

impl WindowParameters {
    fn parse_for(filter: &'static str, raw: &str) -> Result<Self> {
        let fields = ParamFields::parse(filter, raw, 1)?;
        Ok(Self { window: fields.window(0)? })
    }
}

impl ParseParameters for WindowParameters {
    fn parse_parameters(raw: &str) -> Result<Self> {
        Self::parse_for("moving window", raw)
    }
}

single_window_filter!(
    /// Centered moving average
    MovingAverage,
    "moving_average",
    moving_average
);
single_window_filter!(
    /// Centered moving population variance
    MovingVariance,
    "moving_variance",
    moving_variance
);
single_window_filter!(
    /// Centered moving minimum
    MovingMinimum,
    "moving_minimum",
    moving_minimum
);
single_window_filter!(
    /// Centered moving envelope (`max - min`)
    MovingEnvelope,
    "moving_envelope",
    moving_envelope
);

/// Parameters of [`MovingAverageEvent`]: `background_seconds,event_seconds`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EventWindowParameters {
    pub background: Window,
    pub event: Window,
}

impl EventWindowParameters {
    pub(crate) fn parse_for(filter: &'static str, raw: &str) -> Result<Self> {
        let fields = ParamFields::parse(filter, raw, 2)?;
        Ok(Self {
            background: fields.window(0)?,
            event: fields.window(1)?,
        })
    }
}

impl ParseParameters for EventWindowParameters {
    fn parse_parameters(raw: &str) -> Result<Self> {
        Self::parse_for(MovingAverageEvent::NAME, raw)
    }
}

/// Centered event-window mean minus centered background-window mean
///
/// Positive output means the short-term level sits above the background.
#[derive(Debug, Clone)]
pub struct MovingAverageEvent {
    params: EventWindowParameters,
}

impl MovingAverageEvent {
    pub const NAME: &'static str = "moving_average_event";

    pub fn new(background: Window, event: Window) -> Self {
        Self { params: EventWindowParameters { background, event } }
    }

    pub fn from_params(raw: &str) -> Result<Self> {
        Ok(Self::with_parameters(EventWindowParameters::parse_parameters(raw)?))
    }
}

impl FilterProperties for MovingAverageEvent {
    fn filter_name(&self) -> &'static str {
        Self::NAME
    }
}

impl ConfigurableFilter for MovingAverageEvent {
    type Parameters = EventWindowParameters;

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

impl BatchFilter for MovingAverageEvent {
    #[instrument(skip(self, series), fields(filter = Self::NAME, samples = series.len()))]
    fn apply(&self, series: &Series) -> Result<FilterResult> {
        debug!(
            background = %self.params.background,
            event = %self.params.event,
            "applying background/event difference"
        );
        let out = moving_average_event(
            series.timestamps(),
            series.values(),
            self.params.background,
            self.params.event,
        )?;
        Ok(FilterResult::values(Self::NAME, out))
    }
}
