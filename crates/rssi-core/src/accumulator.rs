//! Fixed-capacity running mean and variance

use crate::error::{Error, Result};

/// Outcome of one [`RunningAccumulator::push`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Push {
    /// Population variance of the buffer after the push, never negative
    pub variance: f64,
    /// Value that left the buffer to make room
    pub evicted: f64,
}

/// Ring buffer of the most recent `W` inputs with running sum and sum of squares
///
/// The buffer starts out holding `W` zeros, so the first `W` results mix real
/// samples with zero padding. Cascade detectors depend on that padding to stay
/// quiet while they warm up.
#[derive(Debug, Clone)]
pub struct RunningAccumulator {
    buffer: Vec<f64>,
    head: usize,
    sum: f64,
    sum_sq: f64,
}

impl RunningAccumulator {
    /// Create an accumulator holding `capacity` zeros
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(Error::zero_capacity("Running accumulator"));
        }
        Ok(Self {
            buffer: vec![0.0; capacity],
            head: 0,
            sum: 0.0,
            sum_sq: 0.0,
        })
    }

    /// Replace the oldest value with `value` in O(1)
    pub fn push(&mut self, value: f64) -> Push {
        let evicted = std::mem::replace(&mut self.buffer[self.head], value);
        self.head = (self.head + 1) % self.buffer.len();
        self.sum += value - evicted;
        self.sum_sq += value * value - evicted * evicted;
        Push {
            variance: self.variance(),
            evicted,
        }
    }

    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    pub fn sum(&self) -> f64 {
        self.sum
    }

    pub fn mean(&self) -> f64 {
        self.sum / self.capacity() as f64
    }

    /// Population variance, clamped at zero against cancellation
    pub fn variance(&self) -> f64 {
        let w = self.capacity() as f64;
        let mean = self.sum / w;
        (self.sum_sq / w - mean * mean).max(0.0)
    }

    /// Buffer contents from oldest to newest
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        let (newer, older) = self.buffer.split_at(self.head);
        older.iter().chain(newer).copied()
    }

    /// Refill with zeros, as after construction
    pub fn reset(&mut self) {
        self.buffer.fill(0.0);
        self.head = 0;
        self.sum = 0.0;
        self.sum_sq = 0.0;
    }
}
