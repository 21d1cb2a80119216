//! Centered time windows over irregularly sampled series
//!
//! [`WindowIndexer`] keeps its start and end pointers between calls, so a
//! sweep over all samples in time order costs O(N) in total.

use crate::types::{Timestamp, Window};
use chrono::Duration;
use std::ops::Range;

/// Two-pointer indexer for centered windows
///
/// Calls to [`range`](Self::range) must use non-decreasing center times.
/// This is a precondition and is not checked.
#[derive(Debug, Clone)]
pub struct WindowIndexer<'a> {
    timestamps: &'a [Timestamp],
    half: Duration,
    start: usize,
    end: usize,
}

impl<'a> WindowIndexer<'a> {
    pub fn new(timestamps: &'a [Timestamp], window: Window) -> Self {
        Self {
            timestamps,
            half: window.half(),
            start: 0,
            end: 0,
        }
    }

    /// Index range `[start, end)` of the window centered on `center`
    ///
    /// The end pointer never passes the last index, so the final sample is
    /// never inside a window and windows near the tail are right-censored.
    /// The returned range may be empty.
    pub fn range(&mut self, center: Timestamp) -> Range<usize> {
        let n = self.timestamps.len();
        if n == 0 {
            return 0..0;
        }

        if let Some(lower) = center.checked_sub_signed(self.half) {
            while self.start < n - 1 && self.timestamps[self.start] < lower {
                self.start += 1;
            }
        }

        match center.checked_add_signed(self.half) {
            Some(upper) => {
                while self.end < n - 1 && self.timestamps[self.end] < upper {
                    self.end += 1;
                }
            }
            None => self.end = n - 1,
        }

        self.start..self.end.max(self.start)
    }
}

/// One centered window range per sample, in series order
pub fn centered_ranges(timestamps: &[Timestamp], window: Window) -> Vec<Range<usize>> {
    let mut indexer = WindowIndexer::new(timestamps, window);
    timestamps.iter().map(|&t| indexer.range(t)).collect()
}
