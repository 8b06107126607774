//! Cell occupants.

use evc_core::{AgentId, StationId};

/// Anything that can stand in a grid cell.  A cell may hold several
/// occupants at once (a station plus the vehicles plugged into it).
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Occupant {
    Station(StationId),
    Agent(AgentId),
}

impl Occupant {
    #[inline]
    pub fn station(self) -> Option<StationId> {
        match self {
            Occupant::Station(id) => Some(id),
            Occupant::Agent(_) => None,
        }
    }

    #[inline]
    pub fn agent(self) -> Option<AgentId> {
        match self {
            Occupant::Agent(id) => Some(id),
            Occupant::Station(_) => None,
        }
    }
}
