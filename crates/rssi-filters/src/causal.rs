//! One-pass causal background/event comparison
//!
//! Unlike the centered filters this only looks backwards: the event window
//! covers the `event` seconds before the current sample (excluding it), and
//! the background window covers the `background` seconds before that. The
//! output is a deficit: it is never above zero.

use crate::moving::{check_lengths, EventWindowParameters};
use num_traits::ToPrimitive;
use rssi_core::kernels;
use rssi_core::{
    BatchFilter, ConfigurableFilter, FilterProperties, FilterResult, Polarity, Result, Series,
    Timestamp, Window,
};
use tracing::{debug, instrument};

/// `min(0, mean(event) - mean(background))` for every sample, else `0`
///
/// Three pointers only move forward, so the pass is linear apart from the
/// per-sample means. Fails with `Error::LengthMismatch` when the slices
/// differ in length.
pub fn causal_ma_event<T: ToPrimitive>(
    timestamps: &[Timestamp],
    values: &[T],
    background: Window,
    event: Window,
) -> Result<Vec<f64>> {
    check_lengths(timestamps, values)?;
    let mut event_start = 0usize;
    let mut background_start = 0usize;
    let mut out = Vec::with_capacity(values.len());

    for (end, &t) in timestamps.iter().enumerate() {
        if let Some(limit) = t.checked_sub_signed(event.duration()) {
            while timestamps[event_start] < limit {
                event_start += 1;
            }
        }
        if let Some(limit) = timestamps[event_start].checked_sub_signed(background.duration()) {
            while timestamps[background_start] < limit {
                background_start += 1;
            }
        }

        let deficit = if end > event_start && event_start > background_start {
            let ev = kernels::mean(&values[event_start..end]);
            let bg = kernels::mean(&values[background_start..event_start]);
            // f64::min ignores NaN, keeping the output at or below zero
            0.0f64.min(ev - bg)
        } else {
            0.0
        };
        out.push(deficit);
    }
    Ok(out)
}

/// Causal moving-average event detector, `background_seconds,event_seconds`
///
/// Output is `<= 0`; events show as negative values ([`Polarity::DeficitOnly`]).
#[derive(Debug, Clone)]
pub struct CausalMaEvent {
    params: EventWindowParameters,
}

impl CausalMaEvent {
    pub const NAME: &'static str = "causal_ma_event";

    pub fn new(background: Window, event: Window) -> Self {
        Self { params: EventWindowParameters { background, event } }
    }

    pub fn from_params(raw: &str) -> Result<Self> {
        Ok(Self::with_parameters(EventWindowParameters::parse_for(Self::NAME, raw)?))
    }
}

impl FilterProperties for CausalMaEvent {
    fn filter_name(&self) -> &'static str {
        Self::NAME
    }

    fn polarity(&self) -> Polarity {
        Polarity::DeficitOnly
    }
}

impl ConfigurableFilter for CausalMaEvent {
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

impl BatchFilter for CausalMaEvent {
    #[instrument(skip(self, series), fields(filter = Self::NAME, samples = series.len()))]
    fn apply(&self, series: &Series) -> Result<FilterResult> {
        debug!(
            background = %self.params.background,
            event = %self.params.event,
            "applying causal background/event comparison"
        );
        let out = causal_ma_event(
            series.timestamps(),
            series.values(),
            self.params.background,
            self.params.event,
        )?;
        Ok(FilterResult::values(Self::NAME, out))
    }
}
