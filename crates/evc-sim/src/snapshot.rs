//! Read-only views handed to observers.

use evc_agent::{AgentState, EvAgent};
use evc_core::{AgentId, GridPos, StationId};
use evc_station::ChargeStation;

/// One agent at one tick.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentSnapshot {
    pub id:               AgentId,
    pub pos:              GridPos,
    pub battery:          f64,
    pub max_battery:      f64,
    pub state:            AgentState,
    pub age:              u64,
    pub attempts_success: u64,
    pub attempts_failed:  u64,
}

impl From<&EvAgent> for AgentSnapshot {
    fn from(a: &EvAgent) -> Self {
        Self {
            id:               a.id(),
            pos:              a.pos(),
            battery:          a.battery(),
            max_battery:      a.max_battery(),
            state:            a.state(),
            age:              a.age(),
            attempts_success: a.attempts_success(),
            attempts_failed:  a.attempts_failed(),
        }
    }
}

/// One station at one tick.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StationSnapshot {
    pub id:            StationId,
    pub pos:           GridPos,
    /// Sockets in use.
    pub occupied:      u32,
    pub capacity:      u32,
    pub average_usage: f64,
}

impl From<&ChargeStation> for StationSnapshot {
    fn from(s: &ChargeStation) -> Self {
        Self {
            id:            s.id,
            pos:           s.pos,
            occupied:      s.occupied(),
            capacity:      s.capacity(),
            average_usage: s.average_usage(),
        }
    }
}
