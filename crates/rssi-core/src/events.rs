//! Contiguous event intervals from filter output

use crate::error::{Error, Result};
use crate::types::{FilterResult, Polarity, Timestamp};
use serde::{Deserialize, Serialize};

/// One maximal run of event samples
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventInterval {
    /// First sample of the run
    pub start_index: usize,
    /// First sample after the run, or the last sample if the run reaches the end
    pub end_index: usize,
    pub start: Timestamp,
    pub end: Timestamp,
}

impl EventInterval {
    pub fn duration(&self) -> chrono::Duration {
        self.end - self.start
    }
}

/// Group event samples of `result` into intervals
///
/// `polarity` adapts the sign convention: deficit-only filters mark events
/// below zero. Missing data and NaN end a run.
pub fn event_intervals(
    timestamps: &[Timestamp],
    result: &FilterResult,
    polarity: Polarity,
) -> Result<Vec<EventInterval>> {
    if timestamps.len() != result.len() {
        return Err(Error::LengthMismatch {
            timestamps: timestamps.len(),
            values: result.len(),
        });
    }

    let mut intervals = Vec::new();
    let mut open: Option<usize> = None;
    for (i, &t) in timestamps.iter().enumerate() {
        match (open, result.is_event(i, polarity)) {
            (None, true) => open = Some(i),
            (Some(start_index), false) => {
                intervals.push(EventInterval {
                    start_index,
                    end_index: i,
                    start: timestamps[start_index],
                    end: t,
                });
                open = None;
            }
            _ => {}
        }
    }
    if let (Some(start_index), Some(&end)) = (open, timestamps.last()) {
        intervals.push(EventInterval {
            start_index,
            end_index: timestamps.len() - 1,
            start: timestamps[start_index],
            end,
        });
    }
    Ok(intervals)
}
