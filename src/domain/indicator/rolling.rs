//! Fixed-capacity ring buffer of the most recent values.
//!
//! Aggregates are recomputed over the buffer in oldest-to-newest order on
//! every call rather than maintained as running totals: a value that leaves
//! the window leaves no rounding residue behind, so a window of zeros sums to
//! exactly 0.0 and results never depend on how much history preceded the
//! window.
//!
//! Storage grows with the values pushed, never past the capacity, so a window
//! longer than the input costs only the input's length.

use std::collections::VecDeque;

#[derive(Debug, Clone)]
pub struct RollingWindow {
    capacity: usize,
    values: VecDeque<f64>,
}

impl RollingWindow {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            values: VecDeque::new(),
        }
    }

    /// Append a value, evicting and returning the oldest one once full.
    pub fn push(&mut self, value: f64) -> Option<f64> {
        if self.capacity == 0 {
            return None;
        }
        self.values.push_back(value);
        if self.values.len() > self.capacity {
            self.values.pop_front()
        } else {
            None
        }
    }

    pub fn is_full(&self) -> bool {
        self.capacity > 0 && self.values.len() == self.capacity
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn oldest(&self) -> Option<f64> {
        self.values.front().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.values.iter().copied()
    }

    pub fn sum(&self) -> f64 {
        self.values.iter().sum()
    }

    /// Mean of a full window, `None` before then.
    pub fn mean(&self) -> Option<f64> {
        if !self.is_full() {
            return None;
        }
        Some(self.sum() / self.capacity as f64)
    }
}
