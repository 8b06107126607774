//! Short-term exclusion lists.

use std::collections::VecDeque;

use evc_core::StationId;

/// Length of the off-limits FIFO.
pub const OFF_LIMITS_LEN: usize = 4;

/// Ticks during which a newly observed station is not written again.
pub const SIGHTING_WINDOW: usize = 3;

/// Stations recently found full, newest first.
///
/// Excluded from target selection until the agent finishes a charge.
#[derive(Clone, Debug, Default)]
pub struct OffLimits {
    stations: VecDeque<StationId>,
}

impl OffLimits {
    pub fn new() -> Self {
        Self { stations: VecDeque::with_capacity(OFF_LIMITS_LEN) }
    }

    /// Prepend `station`, dropping the oldest entry when full.
    pub fn push(&mut self, station: StationId) {
        if self.stations.len() == OFF_LIMITS_LEN {
            self.stations.pop_back();
        }
        self.stations.push_front(station);
    }

    pub fn contains(&self, station: StationId) -> bool {
        self.stations.contains(&station)
    }

    pub fn clear(&mut self) {
        self.stations.clear();
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    /// Newest first.
    pub fn iter(&self) -> impl Iterator<Item = StationId> + '_ {
        self.stations.iter().copied()
    }
}

/// Stations written to memory during the last [`SIGHTING_WINDOW`] scans.
///
/// A station still parked next to the agent would otherwise be written once
/// per tick and swamp the ring with one stretch of road.
#[derive(Clone, Debug, Default)]
pub struct RecentSightings {
    ticks: VecDeque<Vec<StationId>>,
}

impl RecentSightings {
    pub fn new() -> Self {
        Self { ticks: VecDeque::with_capacity(SIGHTING_WINDOW) }
    }

    pub fn contains(&self, station: StationId) -> bool {
        self.ticks.iter().any(|t| t.contains(&station))
    }

    /// Close one scan: `written` becomes the newest entry and the oldest one
    /// falls out of the window.  An empty scan still occupies a slot.
    pub fn push_scan(&mut self, written: Vec<StationId>) {
        if self.ticks.len() == SIGHTING_WINDOW {
            self.ticks.pop_back();
        }
        self.ticks.push_front(written);
    }
}
