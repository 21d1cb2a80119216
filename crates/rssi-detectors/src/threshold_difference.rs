//! Threshold on the first difference (Wang et al., 2013)
//!
//! An obstacle is reported when the RSSI drops by more than `2·sigma`
//! between consecutive samples. `sigma` is the standard deviation of the
//! undisturbed signal, e.g. 1.6 for a quiet night recording or 4.75 during
//! the day.

use crate::form::OutputForm;
use num_traits::ToPrimitive;
use rssi_core::kernels;
use rssi_core::{
    BatchFilter, ConfigurableFilter, FilterProperties, FilterResult, ParamFields,
    ParseParameters, Result, Series,
};
use tracing::{debug, instrument};

/// `-2·sigma - diff[i]`; positive when the drop exceeds `2·sigma`
pub fn threshold_difference_margins<T: ToPrimitive>(values: &[T], sigma: f64) -> Vec<f64> {
    kernels::difference(values)
        .into_iter()
        .map(|diff| -2.0 * sigma - diff)
        .collect()
}

/// Parameters: `sigma`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThresholdDifferenceParameters {
    pub sigma: f64,
}

impl ParseParameters for ThresholdDifferenceParameters {
    fn parse_parameters(raw: &str) -> Result<Self> {
        let fields = ParamFields::parse(ThresholdDifference::NAME, raw, 1)?;
        Ok(Self { sigma: fields.float(0)? })
    }
}

#[derive(Debug, Clone)]
pub struct ThresholdDifference {
    params: ThresholdDifferenceParameters,
    form: OutputForm,
}

impl ThresholdDifference {
    pub const NAME: &'static str = "wang2013";
    pub const FLAGS_NAME: &'static str = "wang2013_flags";

    pub fn new(sigma: f64, form: OutputForm) -> Self {
        Self { params: ThresholdDifferenceParameters { sigma }, form }
    }

    pub fn from_params(raw: &str, form: OutputForm) -> Result<Self> {
        let params = ThresholdDifferenceParameters::parse_parameters(raw)?;
        Ok(Self { params, form })
    }

    pub fn form(&self) -> OutputForm {
        self.form
    }
}

impl FilterProperties for ThresholdDifference {
    fn filter_name(&self) -> &'static str {
        match self.form {
            OutputForm::Margin => Self::NAME,
            OutputForm::Flags => Self::FLAGS_NAME,
        }
    }
}

impl ConfigurableFilter for ThresholdDifference {
    type Parameters = ThresholdDifferenceParameters;

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

impl BatchFilter for ThresholdDifference {
    #[instrument(skip(self, series), fields(filter = self.filter_name(), samples = series.len()))]
    fn apply(&self, series: &Series) -> Result<FilterResult> {
        debug!(sigma = self.params.sigma, "applying difference threshold");
        let margins = threshold_difference_margins(series.values(), self.params.sigma);
        Ok(match self.form {
            OutputForm::Margin => FilterResult::values(self.filter_name(), margins),
            OutputForm::Flags => self
                .form
                .package(self.filter_name(), margins.into_iter().map(Some).collect()),
        })
    }
}
