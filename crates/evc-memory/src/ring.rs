//! Fixed-length outcome memory with an explicit decay clock.

/// Entries kept per station (and per strategy).
pub const MEMORY_LEN: usize = 10;

/// Per-clock-step weight multiplier of an old observation.
pub const DECAY_RATE: f64 = 0.98;

/// Weight of an observation made `gap` clock steps ago.
#[inline]
pub fn decay_weight(gap: u64) -> f64 {
    // powi takes i32; beyond that the weight is zero to f64 precision anyway.
    match i32::try_from(gap) {
        Ok(g) => DECAY_RATE.powi(g),
        Err(_) => 0.0,
    }
}

/// What the agent saw at a station.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// At least one socket was free.
    Free,
    /// Every socket was taken.
    Full,
}

impl Outcome {
    #[inline]
    pub fn value(self) -> f64 {
        match self {
            Outcome::Free => 1.0,
            Outcome::Full => -1.0,
        }
    }
}

/// Circular buffer of the last [`MEMORY_LEN`] outcomes, each with the clock
/// value at which it was observed.
///
/// Unfilled slots count as a neutral outcome.
#[derive(Clone, Debug, Default)]
pub struct OutcomeRing {
    slots: [(f64, u64); MEMORY_LEN],
    head:  usize,
    len:   usize,
}

impl OutcomeRing {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `outcome` observed at clock `stamp`, evicting the oldest entry
    /// once the ring is full.
    pub fn push(&mut self, outcome: Outcome, stamp: u64) {
        self.head = (self.head + 1) % MEMORY_LEN;
        self.slots[self.head] = (outcome.value(), stamp);
        self.len = (self.len + 1).min(MEMORY_LEN);
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Stored `(outcome, stamp)` pairs, most recent first.
    pub fn iter_recent(&self) -> impl Iterator<Item = (f64, u64)> + '_ {
        (0..self.len).map(move |k| self.slots[(self.head + MEMORY_LEN - k) % MEMORY_LEN])
    }

    /// Decayed outcomes at clock `now`, most recent first, zero-padded.
    pub fn decayed(&self, now: u64) -> [f64; MEMORY_LEN] {
        let mut out = [0.0; MEMORY_LEN];
        for (slot, (value, stamp)) in out.iter_mut().zip(self.iter_recent()) {
            *slot = value * decay_weight(now.saturating_sub(stamp));
        }
        out
    }

    /// Sum of [`decayed`](Self::decayed).
    pub fn decayed_sum(&self, now: u64) -> f64 {
        self.decayed(now).iter().sum()
    }
}
