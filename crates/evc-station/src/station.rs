//! A single charging station.

use std::collections::VecDeque;

use tracing::error;

use evc_core::{GridPos, StationId};

use crate::{StationError, StationResult};

// ── UsageWindow ───────────────────────────────────────────────────────────────

/// Rolling mean over the last `capacity` samples.
///
/// Keeps a running sum so `mean()` is O(1); the sum is rebuilt whenever the
/// window wraps to stop floating-point drift from accumulating over long runs.
#[derive(Clone, Debug)]
pub struct UsageWindow {
    samples:  VecDeque<f64>,
    capacity: usize,
    sum:      f64,
}

impl UsageWindow {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self { samples: VecDeque::with_capacity(capacity), capacity, sum: 0.0 }
    }

    pub fn push(&mut self, sample: f64) {
        if self.samples.len() == self.capacity {
            self.samples.pop_front();
            self.samples.push_back(sample);
            self.sum = self.samples.iter().sum();
        } else {
            self.samples.push_back(sample);
            self.sum += sample;
        }
    }

    /// Mean of the retained samples; 0 before the first sample.
    pub fn mean(&self) -> f64 {
        if self.samples.is_empty() {
            0.0
        } else {
            self.sum / self.samples.len() as f64
        }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

// ── ChargeStation ─────────────────────────────────────────────────────────────

/// A fixed-capacity charging station at one grid cell.
///
/// Invariant: `0 <= free_sockets <= capacity`.
#[derive(Clone, Debug)]
pub struct ChargeStation {
    pub id:   StationId,
    pub pos:  GridPos,
    capacity: u32,
    free:     u32,
    usage:    UsageWindow,
}

impl ChargeStation {
    /// A station with all sockets free.
    pub fn new(id: StationId, pos: GridPos, capacity: u32, usage_window: usize) -> Self {
        Self { id, pos, capacity, free: capacity, usage: UsageWindow::new(usage_window) }
    }

    #[inline]
    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    #[inline]
    pub fn free_sockets(&self) -> u32 {
        self.free
    }

    /// Sockets currently in use.
    #[inline]
    pub fn occupied(&self) -> u32 {
        self.capacity - self.free
    }

    #[inline]
    pub fn has_free_socket(&self) -> bool {
        self.free > 0
    }

    /// Take one socket if any is free.  No state change on failure.
    pub fn try_occupy(&mut self) -> bool {
        if self.free == 0 {
            return false;
        }
        self.free -= 1;
        true
    }

    /// Return one socket.
    ///
    /// # Errors
    ///
    /// [`StationError::OverRelease`] if every socket was already free; the
    /// count stays at `capacity`.
    pub fn release(&mut self) -> StationResult<()> {
        if self.free >= self.capacity {
            error!(station = %self.id, capacity = self.capacity, "socket released on an idle station");
            self.free = self.capacity;
            return Err(StationError::OverRelease(self.id));
        }
        self.free += 1;
        Ok(())
    }

    /// Append this tick's in-use fraction to the usage window.
    pub fn record_usage_sample(&mut self) {
        let in_use = if self.capacity == 0 {
            0.0
        } else {
            f64::from(self.occupied()) / f64::from(self.capacity)
        };
        self.usage.push(in_use);
    }

    /// Mean in-use fraction over the usage window.
    pub fn average_usage(&self) -> f64 {
        self.usage.mean()
    }

    pub fn usage_samples(&self) -> usize {
        self.usage.len()
    }
}
