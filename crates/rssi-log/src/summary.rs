//! Per-device signal summary

use rssi_core::Series;
use serde::{Deserialize, Serialize};
use statrs::statistics::{Data, Median, Statistics};
use std::fmt;

/// Median, mean and population variance of a device's RSSI
///
/// All three are NaN for an empty series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DeviceSummary {
    pub samples: usize,
    pub median: f64,
    pub mean: f64,
    pub variance: f64,
}

impl DeviceSummary {
    pub fn of(series: &Series) -> Self {
        let values = series.values_f64();
        if values.is_empty() {
            return Self {
                samples: 0,
                median: f64::NAN,
                mean: f64::NAN,
                variance: f64::NAN,
            };
        }
        Self {
            samples: values.len(),
            mean: values.iter().mean(),
            variance: values.iter().population_variance(),
            median: Data::new(values).median(),
        }
    }
}

impl fmt::Display for DeviceSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "median: {}, mean: {} dBm, variance: {} dB^2 ({} samples)",
            self.median, self.mean, self.variance, self.samples
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::{Duration, NaiveDate};
    use rssi_core::Sample;

    fn series(values: &[i32]) -> Series {
        let t0 = NaiveDate::from_ymd_opt(2016, 3, 1)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .unwrap();
        Series::from_samples(
            values
                .iter()
                .enumerate()
                .map(|(i, &v)| Sample::new(t0 + Duration::seconds(i as i64), v)),
        )
        .unwrap()
    }

    #[test]
    fn test_summary() {
        let s = DeviceSummary::of(&series(&[-60, -70, -62, -64]));
        assert_eq!(s.samples, 4);
        assert_relative_eq!(s.median, -63.0);
        assert_relative_eq!(s.mean, -64.0);
        assert_relative_eq!(s.variance, 14.0);
        assert!(s.to_string().starts_with("median: -63"));
    }

    #[test]
    fn test_empty_summary() {
        let s = DeviceSummary::of(&Series::default());
        assert_eq!(s.samples, 0);
        assert!(s.median.is_nan() && s.mean.is_nan() && s.variance.is_nan());
    }

    #[test]
    fn test_serializes() {
        let s = DeviceSummary::of(&series(&[-60]));
        let json = serde_json::to_string(&s).unwrap();
        assert!(json.contains("\"median\":-60.0"));
    }
}
