//! Variance exceedance (Youssef et al., 2007, second detector)
//!
//! The population variance `vt` of the last `w` samples is compared with the
//! calibrated mean `vtbar` and spread `sigmav` of that statistic on an
//! undisturbed recording:
//!
//! ```text
//! margin = vt - vtbar - r * sigmav
//! ```
//!
//! [`VarianceTraining`] computes `vtbar` and `sigmav` from such a recording.

use crate::form::OutputForm;
use num_traits::ToPrimitive;
use rssi_core::kernels::to_f64;
use rssi_core::{
    BatchFilter, Calibration, ConfigurableFilter, FilterProperties, FilterResult, ParamFields,
    ParseParameters, Result, RunningAccumulator, Series,
};
use statrs::statistics::Statistics;
use tracing::{debug, info, instrument};

/// Population variance of every full window of `w` consecutive values
///
/// Entry `j` covers `values[j..j + w]`; the result is empty when there are
/// fewer than `w` values. `w` must be at least 1.
pub fn windowed_variances<T: ToPrimitive>(values: &[T], w: usize) -> Result<Vec<f64>> {
    let mut acc = RunningAccumulator::new(w)?;
    let mut out = Vec::with_capacity((values.len() + 1).saturating_sub(w));
    for (i, v) in values.iter().enumerate() {
        let push = acc.push(to_f64(v));
        // Only the seed zeros are left once i + 1 >= w
        if i + 1 >= w {
            out.push(push.variance);
        }
    }
    Ok(out)
}

/// `vt - vtbar - r * sigmav` for every index with a full window behind it
pub fn variance_exceedance_margins<T: ToPrimitive>(
    values: &[T],
    params: &VarianceExceedanceParameters,
) -> Result<Vec<Option<f64>>> {
    let threshold = params.vtbar + params.r * params.sigmav;
    let vt = windowed_variances(values, params.w)?;
    let lead = values.len() - vt.len();
    let margins = std::iter::repeat(None)
        .take(lead)
        .chain(vt.into_iter().map(|v| Some(v - threshold)))
        .collect();
    Ok(margins)
}

/// Parameters: `w,vtbar,sigmav,r`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VarianceExceedanceParameters {
    /// Window length in samples
    pub w: usize,
    /// Mean windowed variance on quiet data
    pub vtbar: f64,
    /// Standard deviation of the windowed variance on quiet data
    pub sigmav: f64,
    /// Number of `sigmav` above `vtbar` that counts as an obstacle
    pub r: f64,
}

impl VarianceExceedanceParameters {
    /// Use a training run's constants
    pub fn from_calibration(calibration: &Calibration, r: f64) -> Self {
        Self {
            w: calibration.window,
            vtbar: calibration.vtbar,
            sigmav: calibration.sigmav,
            r,
        }
    }
}

impl ParseParameters for VarianceExceedanceParameters {
    fn parse_parameters(raw: &str) -> Result<Self> {
        let fields = ParamFields::parse(VarianceExceedance::NAME, raw, 4)?;
        Ok(Self {
            w: fields.count(0)?,
            vtbar: fields.float(1)?,
            sigmav: fields.non_negative(2)?,
            r: fields.float(3)?,
        })
    }
}

#[derive(Debug, Clone)]
pub struct VarianceExceedance {
    params: VarianceExceedanceParameters,
    form: OutputForm,
}

impl VarianceExceedance {
    pub const NAME: &'static str = "youssef2007b";
    pub const FLAGS_NAME: &'static str = "youssef2007b_flags";

    pub fn new(params: VarianceExceedanceParameters, form: OutputForm) -> Self {
        Self { params, form }
    }

    pub fn from_params(raw: &str, form: OutputForm) -> Result<Self> {
        let params = VarianceExceedanceParameters::parse_parameters(raw)?;
        Ok(Self { params, form })
    }
}

impl FilterProperties for VarianceExceedance {
    fn filter_name(&self) -> &'static str {
        match self.form {
            OutputForm::Margin => Self::NAME,
            OutputForm::Flags => Self::FLAGS_NAME,
        }
    }
}

impl ConfigurableFilter for VarianceExceedance {
    type Parameters = VarianceExceedanceParameters;

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

impl BatchFilter for VarianceExceedance {
    #[instrument(skip(self, series), fields(filter = self.filter_name(), samples = series.len()))]
    fn apply(&self, series: &Series) -> Result<FilterResult> {
        debug!(params = ?self.params, "applying variance exceedance");
        let margins = variance_exceedance_margins(series.values(), &self.params)?;
        Ok(self.form.package(self.filter_name(), margins))
    }
}

/// Training mode: derive `vtbar` and `sigmav` from a quiet recording
///
/// As a filter it passes the series through unchanged and attaches the
/// [`Calibration`] to the result.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VarianceTraining {
    w: usize,
}

impl VarianceTraining {
    pub const NAME: &'static str = "youssef2007b_training";

    pub fn new(w: usize) -> Self {
        Self { w }
    }

    pub fn from_params(raw: &str) -> Result<Self> {
        let fields = ParamFields::parse(Self::NAME, raw, 1)?;
        Ok(Self::new(fields.count(0)?))
    }

    pub fn window(&self) -> usize {
        self.w
    }

    /// Mean and population standard deviation of every full window's variance
    ///
    /// With fewer than `w` values both constants are NaN and `windows` is 0.
    pub fn calibrate<T: ToPrimitive>(&self, values: &[T]) -> Result<Calibration> {
        let vt = windowed_variances(values, self.w)?;
        let (vtbar, sigmav) = if vt.is_empty() {
            (f64::NAN, f64::NAN)
        } else {
            (vt.iter().mean(), vt.iter().population_std_dev())
        };
        Ok(Calibration {
            vtbar,
            sigmav,
            window: self.w,
            windows: vt.len(),
        })
    }
}

impl FilterProperties for VarianceTraining {
    fn filter_name(&self) -> &'static str {
        Self::NAME
    }
}

impl BatchFilter for VarianceTraining {
    #[instrument(skip(self, series), fields(filter = Self::NAME, samples = series.len()))]
    fn apply(&self, series: &Series) -> Result<FilterResult> {
        let calibration = self.calibrate(series.values())?;
        info!(
            vtbar = calibration.vtbar,
            sigmav = calibration.sigmav,
            w = calibration.window,
            windows = calibration.windows,
            "variance calibration"
        );
        Ok(FilterResult::values(Self::NAME, series.values_f64()).with_calibration(calibration))
    }
}
