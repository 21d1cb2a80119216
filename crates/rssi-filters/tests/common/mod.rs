//! Common test utilities for rssi-filters tests

use chrono::{Duration, NaiveDate};
use rssi_core::{Sample, Series};

/// Series from `(milliseconds since previous sample, rssi)` pairs
pub fn series_from_gaps(samples: &[(u32, i32)]) -> Series {
    let mut t = NaiveDate::from_ymd_opt(2016, 3, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap();
    Series::from_samples(samples.iter().map(|&(gap, v)| {
        t += Duration::milliseconds(i64::from(gap));
        Sample::new(t, v)
    }))
    .unwrap()
}
