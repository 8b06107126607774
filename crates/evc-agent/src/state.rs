//! What an agent is doing and where it is heading.

use evc_core::StationId;

/// Activity of an agent this tick.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AgentState {
    AtHome,
    Working,
    Shopping,
    /// En route to the target.
    Traveling,
    /// Exploring a random cell because no remembered station qualified.
    Searching,
    /// Plugged in at a station.
    Charging,
}

impl AgentState {
    /// `true` for the states that hold the agent in place for a sampled dwell.
    #[inline]
    pub fn is_dwelling(self) -> bool {
        matches!(self, AgentState::AtHome | AgentState::Working | AgentState::Shopping)
    }
}

/// Where an agent is heading.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Target {
    Home,
    Work,
    Shop,
    ChargePole(StationId),
    /// Exploring a random cell in the hope of finding stations.
    Searching,
}

impl Target {
    /// Home, work or shop.
    #[inline]
    pub fn is_routine(self) -> bool {
        matches!(self, Target::Home | Target::Work | Target::Shop)
    }

    #[inline]
    pub fn station(self) -> Option<StationId> {
        match self {
            Target::ChargePole(id) => Some(id),
            _ => None,
        }
    }

    /// The stop after this one in the daily routine.  Non-routine targets
    /// fall back to home.
    pub fn next_routine(self) -> Target {
        match self {
            Target::Home => Target::Work,
            Target::Work => Target::Shop,
            Target::Shop | Target::ChargePole(_) | Target::Searching => Target::Home,
        }
    }

    /// The state entered on arriving at a routine target.
    pub fn dwell_state(self) -> Option<AgentState> {
        match self {
            Target::Home => Some(AgentState::AtHome),
            Target::Work => Some(AgentState::Working),
            Target::Shop => Some(AgentState::Shopping),
            Target::ChargePole(_) | Target::Searching => None,
        }
    }
}
