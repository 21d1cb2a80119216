//! Per-device series assembled from log lines

use crate::record::{LogRecord, TimestampPrecision};
use rssi_core::{Result, Series, Timestamp};
use std::collections::BTreeMap;
use std::io::BufRead;
use tracing::{debug, info, instrument};

/// Which records to keep
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogSelection {
    /// Only this address, compared case-insensitively
    pub device: Option<String>,
    /// Inclusive lower bound
    pub start: Option<Timestamp>,
    /// Inclusive upper bound
    pub end: Option<Timestamp>,
}

impl LogSelection {
    pub fn device(address: impl Into<String>) -> Self {
        Self { device: Some(address.into()), ..Self::default() }
    }

    pub fn between(mut self, start: Timestamp, end: Timestamp) -> Self {
        self.start = Some(start);
        self.end = Some(end);
        self
    }

    /// Whether records from `address` can be selected at all
    pub fn accepts_address(&self, address: &str) -> bool {
        self.device
            .as_ref()
            .map_or(true, |device| device.eq_ignore_ascii_case(address.trim()))
    }

    pub fn accepts(&self, record: &LogRecord) -> bool {
        if !self.accepts_address(&record.address) {
            return false;
        }
        self.start.map_or(true, |start| record.timestamp >= start)
            && self.end.map_or(true, |end| record.timestamp <= end)
    }
}

/// Accepted records grouped by device address
#[derive(Debug, Clone, Default)]
pub struct DeviceLog {
    devices: BTreeMap<String, Series>,
    whole_second_timestamps: usize,
}

impl DeviceLog {
    /// Parse and group `lines`, skipping blank ones
    ///
    /// Lines whose address field names an unselected device are dropped
    /// before parsing. Any other malformed line fails the whole log, as does
    /// a device whose timestamps go backwards.
    #[instrument(skip(lines, selection))]
    pub fn from_lines<I, S>(lines: I, selection: &LogSelection) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut log = Self::default();
        let mut skipped = 0usize;
        for (i, line) in lines.into_iter().enumerate() {
            let line = line.as_ref();
            if line.trim().is_empty() {
                continue;
            }
            if let Some(address) = line.split('\t').nth(1) {
                if !selection.accepts_address(address) {
                    skipped += 1;
                    continue;
                }
            }
            let record = LogRecord::parse_line(i + 1, line)?;
            if !selection.accepts(&record) {
                skipped += 1;
                continue;
            }
            log.insert(&record)?;
        }
        debug!(skipped, "records outside the selection");
        info!(
            devices = log.devices.len(),
            whole_second_timestamps = log.whole_second_timestamps,
            "log assembled"
        );
        Ok(log)
    }

    /// Like [`DeviceLog::from_lines`], reading from `reader`
    pub fn from_reader<R: BufRead>(reader: R, selection: &LogSelection) -> Result<Self> {
        let lines = reader.lines().collect::<std::io::Result<Vec<String>>>()?;
        Self::from_lines(lines, selection)
    }

    fn insert(&mut self, record: &LogRecord) -> Result<()> {
        if record.precision == TimestampPrecision::WholeSeconds {
            self.whole_second_timestamps += 1;
        }
        self.devices
            .entry(record.address.clone())
            .or_default()
            .push(record.sample())
    }

    pub fn addresses(&self) -> impl Iterator<Item = &str> + '_ {
        self.devices.keys().map(String::as_str)
    }

    /// Series of one device, matching the address case-insensitively
    pub fn device(&self, address: &str) -> Option<&Series> {
        self.devices
            .iter()
            .find(|(a, _)| a.eq_ignore_ascii_case(address))
            .map(|(_, series)| series)
    }

    pub fn devices(&self) -> impl Iterator<Item = (&str, &Series)> + '_ {
        self.devices.iter().map(|(a, s)| (a.as_str(), s))
    }

    pub fn into_devices(self) -> BTreeMap<String, Series> {
        self.devices
    }

    /// Number of accepted records whose timestamp lacked fractional seconds
    pub fn whole_second_timestamps(&self) -> usize {
        self.whole_second_timestamps
    }

    pub fn len(&self) -> usize {
        self.devices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rssi_core::Error;

    const LOG: &str = "\
2016-03-01 10:00:00.100000\tAA:BB:CC:00:00:01\t-60
2016-03-01 10:00:00.200000\taa:bb:cc:00:00:02\t-75

2016-03-01 10:00:01\tAA:BB:CC:00:00:01\t-62
2016-03-01 10:00:02.500000\tAA:BB:CC:00:00:01\t-58
";

    fn at(h: u32, m: u32, s: u32) -> Timestamp {
        NaiveDate::from_ymd_opt(2016, 3, 1)
            .and_then(|d| d.and_hms_opt(h, m, s))
            .unwrap()
    }

    #[test]
    fn test_groups_by_device() {
        let log = DeviceLog::from_lines(LOG.lines(), &LogSelection::default()).unwrap();
        assert_eq!(log.len(), 2);
        assert_eq!(
            log.addresses().collect::<Vec<_>>(),
            vec!["AA:BB:CC:00:00:01", "aa:bb:cc:00:00:02"]
        );
        assert_eq!(log.device("AA:BB:CC:00:00:01").unwrap().values(), &[-60, -62, -58]);
        assert_eq!(log.whole_second_timestamps(), 1);
    }

    #[test]
    fn test_device_selection_ignores_case() {
        let selection = LogSelection::device("AA:BB:CC:00:00:02");
        let log = DeviceLog::from_lines(LOG.lines(), &selection).unwrap();
        assert_eq!(log.len(), 1);
        assert_eq!(log.device("aa:bb:cc:00:00:02").unwrap().values(), &[-75]);
    }

    #[test]
    fn test_time_bounds_are_inclusive() {
        let selection = LogSelection::default().between(at(10, 0, 1), at(10, 0, 2));
        let log = DeviceLog::from_lines(LOG.lines(), &selection).unwrap();
        // 10:00:01 is kept, 10:00:02.5 is past the end
        assert_eq!(log.device("AA:BB:CC:00:00:01").unwrap().values(), &[-62]);
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn test_out_of_order_device_is_rejected() {
        let lines = [
            "2016-03-01 10:00:05.0\tAA\t-60",
            "2016-03-01 10:00:04.0\tAA\t-60",
        ];
        let err = DeviceLog::from_lines(lines, &LogSelection::default()).unwrap_err();
        assert!(matches!(err, Error::UnorderedTimestamps { .. }));
    }

    #[test]
    fn test_bad_line_reports_position() {
        let lines = ["2016-03-01 10:00:05.0\tAA\t-60", "garbage"];
        let err = DeviceLog::from_lines(lines, &LogSelection::default()).unwrap_err();
        assert!(matches!(err, Error::InvalidRecord { line: 2, .. }));
    }

    #[test]
    fn test_unselected_device_lines_are_not_parsed() {
        let lines = [
            "2016-03-01 10:00:05.0\tAA\t-60",
            "not a time\tBB\tloud",
            "2016-03-01 10:00:06.0\tAA\t-61",
        ];
        let log = DeviceLog::from_lines(lines, &LogSelection::device("AA")).unwrap();
        assert_eq!(log.device("AA").unwrap().values(), &[-60, -61]);

        // Without a device filter the same line is an error
        let err = DeviceLog::from_lines(lines, &LogSelection::default()).unwrap_err();
        assert!(matches!(err, Error::InvalidRecord { line: 2, .. }));
    }

    #[test]
    fn test_from_reader() {
        let log = DeviceLog::from_reader(LOG.as_bytes(), &LogSelection::default()).unwrap();
        assert_eq!(log.into_devices().len(), 2);
    }
}
