//! Relative moving-average ratio (Youssef et al., 2007, first detector)
//!
//! Compares a long average `alk` with the short average `ask` of the samples
//! that directly follow it. For output index `i` the short window ends at `i`:
//!
//! ```text
//! k   = i - wl - ws + 1
//! alk = mean(values[k .. k + wl])
//! ask = mean(values[k + wl .. k + wl + ws])
//! margin = |alk - ask| / |alk| - tau
//! ```
//!
//! Indices where `k < 0` have no margin.

use crate::form::OutputForm;
use num_traits::ToPrimitive;
use rssi_core::kernels;
use rssi_core::{
    BatchFilter, ConfigurableFilter, FilterProperties, FilterResult, ParamFields,
    ParseParameters, Result, Series,
};
use tracing::{debug, instrument};

/// Margin for every index, `None` until `wl + ws` samples exist
///
/// A zero long average gives a NaN margin rather than an error.
pub fn relative_ratio_margins<T: ToPrimitive>(
    values: &[T],
    wl: usize,
    ws: usize,
    tau: f64,
) -> Vec<Option<f64>> {
    let sums = kernels::prefix_sums(values);
    let span = wl + ws;
    (0..values.len())
        .map(|i| {
            let k = (i + 1).checked_sub(span)?;
            let alk = (sums[k + wl] - sums[k]) / wl as f64;
            let ask = (sums[k + span] - sums[k + wl]) / ws as f64;
            let ratio = if alk == 0.0 {
                f64::NAN
            } else {
                (alk - ask).abs() / alk.abs()
            };
            Some(ratio - tau)
        })
        .collect()
}

/// Parameters: `wl,ws,tau`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RelativeRatioParameters {
    /// Long window, in samples
    pub wl: usize,
    /// Short window, in samples
    pub ws: usize,
    /// Relative change that counts as an obstacle
    pub tau: f64,
}

impl ParseParameters for RelativeRatioParameters {
    fn parse_parameters(raw: &str) -> Result<Self> {
        let fields = ParamFields::parse(RelativeRatio::NAME, raw, 3)?;
        Ok(Self {
            wl: fields.count(0)?,
            ws: fields.count(1)?,
            tau: fields.float(2)?,
        })
    }
}

#[derive(Debug, Clone)]
pub struct RelativeRatio {
    params: RelativeRatioParameters,
    form: OutputForm,
}

impl RelativeRatio {
    pub const NAME: &'static str = "youssef2007a";
    pub const FLAGS_NAME: &'static str = "youssef2007a_flags";

    pub fn new(wl: usize, ws: usize, tau: f64, form: OutputForm) -> Self {
        Self { params: RelativeRatioParameters { wl, ws, tau }, form }
    }

    pub fn from_params(raw: &str, form: OutputForm) -> Result<Self> {
        let params = RelativeRatioParameters::parse_parameters(raw)?;
        Ok(Self { params, form })
    }
}

impl FilterProperties for RelativeRatio {
    fn filter_name(&self) -> &'static str {
        match self.form {
            OutputForm::Margin => Self::NAME,
            OutputForm::Flags => Self::FLAGS_NAME,
        }
    }
}

impl ConfigurableFilter for RelativeRatio {
    type Parameters = RelativeRatioParameters;

    fn with_parameters(params: Self::Parameters) -> Self {
        Self { params, form: OutputForm::Margin }
    }

    fn parameters(&self) -> &Self::Parameters {
        &self.params
    }

    fn set_parameters(&mut self, params: Self::Parameters) {
        self.params = params;
    }
}

impl BatchFilter for RelativeRatio {
    #[instrument(skip(self, series), fields(filter = self.filter_name(), samples = series.len()))]
    fn apply(&self, series: &Series) -> Result<FilterResult> {
        let RelativeRatioParameters { wl, ws, tau } = self.params;
        debug!(wl, ws, tau, "applying relative moving-average ratio");
        let margins = relative_ratio_margins(series.values(), wl, ws, tau);
        Ok(self.form.package(self.filter_name(), margins))
    }
}
