//! All stations of a run, plus the socket handle agents hold while charging.

use tracing::error;

use evc_core::{GridPos, StationId};

use crate::{ChargeStation, StationError, StationResult};

/// Proof that the holder occupies one socket of `station`.
///
/// Not `Clone`/`Copy`: the only way to get one is a successful
/// [`StationStore::try_occupy`], and the only way to dispose of it is
/// [`StationStore::release`], which consumes it.  An agent that is removed
/// while charging hands its handle back through the same call.
#[must_use = "a dropped SocketHandle leaks a station socket"]
#[derive(Debug, PartialEq, Eq)]
pub struct SocketHandle {
    station: StationId,
}

impl SocketHandle {
    #[inline]
    pub fn station(&self) -> StationId {
        self.station
    }
}

/// Stations indexed by `StationId`.
#[derive(Clone, Debug, Default)]
pub struct StationStore {
    stations: Vec<ChargeStation>,
}

impl StationStore {
    /// One station per position, with IDs assigned in order.
    pub fn new(positions: &[GridPos], capacity: u32, usage_window: usize) -> Self {
        let stations = positions
            .iter()
            .enumerate()
            .map(|(i, &pos)| ChargeStation::new(StationId(i as u32), pos, capacity, usage_window))
            .collect();
        Self { stations }
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    #[inline]
    pub fn get(&self, id: StationId) -> Option<&ChargeStation> {
        self.stations.get(id.index())
    }

    pub fn iter(&self) -> impl Iterator<Item = &ChargeStation> {
        self.stations.iter()
    }

    /// Free sockets at `id`; 0 for unknown stations.
    pub fn free_sockets(&self, id: StationId) -> u32 {
        self.get(id).map_or(0, ChargeStation::free_sockets)
    }

    /// Take a socket at `id`.  `None` if the station is full or unknown.
    pub fn try_occupy(&mut self, id: StationId) -> Option<SocketHandle> {
        let station = self.stations.get_mut(id.index())?;
        if station.try_occupy() {
            debug_assert!(station.free_sockets() <= station.capacity());
            Some(SocketHandle { station: id })
        } else {
            None
        }
    }

    /// Give a socket back.
    pub fn release(&mut self, handle: SocketHandle) -> StationResult<()> {
        let id = handle.station;
        match self.stations.get_mut(id.index()) {
            Some(station) => station.release(),
            None => {
                error!(station = %id, "socket handle refers to an unknown station");
                Err(StationError::UnknownStation(id))
            }
        }
    }

    /// Record one usage sample on every station.  Called once per tick.
    pub fn record_usage_samples(&mut self) {
        for station in &mut self.stations {
            station.record_usage_sample();
        }
    }

    /// Mean of the per-station average usage; 0 with no stations.
    pub fn mean_usage(&self) -> f64 {
        if self.stations.is_empty() {
            return 0.0;
        }
        self.stations.iter().map(ChargeStation::average_usage).sum::<f64>() / self.stations.len() as f64
    }
}
