//! Common test utilities for rssi-detectors tests

use chrono::{Duration, NaiveDate};
use rand::prelude::*;
use rand_distr::Normal;
use rssi_core::{Sample, Series};

/// Series with one sample per second starting at `t0`
pub fn series_every_second(values: &[i32]) -> Series {
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

/// Rounded gaussian RSSI readings
#[allow(dead_code)]
pub fn noisy_values(n: usize, mean: f64, std: f64, seed: u64) -> Vec<i32> {
    let mut rng = StdRng::seed_from_u64(seed);
    let normal = Normal::new(mean, std).unwrap();
    (0..n).map(|_| normal.sample(&mut rng).round() as i32).collect()
}
