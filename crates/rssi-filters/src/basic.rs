//! Parameterless filters: identity and first difference

use rssi_core::kernels;
use rssi_core::{BatchFilter, FilterProperties, FilterResult, Result, Series};

/// Identity filter; shows the raw series through the filter interface
#[derive(Debug, Clone, Copy, Default)]
pub struct Passthrough;

impl Passthrough {
    pub const NAME: &'static str = "passthrough";
}

impl FilterProperties for Passthrough {
    fn filter_name(&self) -> &'static str {
        Self::NAME
    }
}

impl BatchFilter for Passthrough {
    fn apply(&self, series: &Series) -> Result<FilterResult> {
        Ok(FilterResult::values(Self::NAME, series.values_f64()))
    }
}

/// First-order discrete derivative, `out[0] = 0`
#[derive(Debug, Clone, Copy, Default)]
pub struct Difference;

impl Difference {
    pub const NAME: &'static str = "difference";
}

impl FilterProperties for Difference {
    fn filter_name(&self) -> &'static str {
        Self::NAME
    }
}

impl BatchFilter for Difference {
    fn apply(&self, series: &Series) -> Result<FilterResult> {
        Ok(FilterResult::values(Self::NAME, kernels::difference(series.values())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::series_at_seconds;

    #[test]
    fn test_passthrough_is_identity() {
        let series = series_at_seconds(&[(0.0, -60), (0.5, -70), (3.0, -65)]);
        let result = Passthrough.apply(&series).unwrap();
        assert_eq!(result.as_values().unwrap(), &[-60.0, -70.0, -65.0]);
        assert_eq!(result.algorithm(), "passthrough");
    }

    #[test]
    fn test_difference() {
        let series = series_at_seconds(&[(0.0, -60), (1.0, -70), (2.0, -65), (2.5, -65)]);
        let result = Difference.apply(&series).unwrap();
        assert_eq!(result.as_values().unwrap(), &[0.0, -10.0, 5.0, 0.0]);
    }

    #[test]
    fn test_empty_series() {
        let series = Series::default();
        assert!(Passthrough.apply(&series).unwrap().is_empty());
        assert!(Difference.apply(&series).unwrap().is_empty());
    }
}
