//! The `EvAgent` struct and its read accessors.

use evc_core::{AgentId, AgentRng, GridPos, NormalParams};
use evc_memory::{MemoryEngine, OffLimits, RecentSightings};
use evc_mobility::{Direction, StepCost};
use evc_station::SocketHandle;

use crate::{AgentState, Target};

/// Dwell and charge-time distributions an agent samples from at state entry.
#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) struct Durations {
    pub work:   NormalParams,
    pub shop:   NormalParams,
    pub home:   NormalParams,
    pub charge: NormalParams,
}

impl Durations {
    pub fn for_state(&self, state: AgentState) -> Option<NormalParams> {
        match state {
            AgentState::Working => Some(self.work),
            AgentState::Shopping => Some(self.shop),
            AgentState::AtHome => Some(self.home),
            AgentState::Charging => Some(self.charge),
            AgentState::Traveling | AgentState::Searching => None,
        }
    }
}

/// One electric vehicle.
///
/// Built by [`AgentFactory`](crate::AgentFactory); advanced once per tick by
/// [`EvAgent::step`].
///
/// Invariant: `0 <= battery <= max_battery`.
#[derive(Debug)]
pub struct EvAgent {
    pub(crate) id: AgentId,
    pub(crate) pos: GridPos,

    pub(crate) home_pos:   GridPos,
    pub(crate) work_pos:   GridPos,
    pub(crate) center_pos: GridPos,

    pub(crate) battery:     f64,
    pub(crate) max_battery: f64,

    pub(crate) state:         AgentState,
    pub(crate) time_in_state: u32,
    /// Ticks the current dwelling or charging state lasts at least.
    pub(crate) state_length:  f64,

    pub(crate) target:      Target,
    pub(crate) target_pos:  GridPos,
    pub(crate) direction:   Direction,
    /// Routine stop interrupted by the hunt for a station.
    pub(crate) prev_target: Option<(Target, GridPos)>,

    pub(crate) look_threshold:   f64,
    pub(crate) critical_battery: f64,
    pub(crate) charge_speed:     f64,
    pub(crate) step_cost:        StepCost,
    pub(crate) vision:           u32,
    pub(crate) initial_bravery:  f64,
    pub(crate) durations:        Durations,

    pub(crate) memory:     MemoryEngine,
    pub(crate) off_limits: OffLimits,
    pub(crate) sightings:  RecentSightings,
    pub(crate) socket:     Option<SocketHandle>,

    pub(crate) age:              u64,
    pub(crate) attempts_success: u64,
    pub(crate) attempts_failed:  u64,

    pub(crate) rng: AgentRng,
}

impl EvAgent {
    #[inline]
    pub fn id(&self) -> AgentId {
        self.id
    }

    #[inline]
    pub fn pos(&self) -> GridPos {
        self.pos
    }

    pub fn home_pos(&self) -> GridPos {
        self.home_pos
    }

    pub fn work_pos(&self) -> GridPos {
        self.work_pos
    }

    /// Wrap-aware midpoint of home and work; shopping trips centre on it.
    pub fn center_pos(&self) -> GridPos {
        self.center_pos
    }

    #[inline]
    pub fn battery(&self) -> f64 {
        self.battery
    }

    #[inline]
    pub fn max_battery(&self) -> f64 {
        self.max_battery
    }

    #[inline]
    pub fn state(&self) -> AgentState {
        self.state
    }

    pub fn time_in_state(&self) -> u32 {
        self.time_in_state
    }

    #[inline]
    pub fn target(&self) -> Target {
        self.target
    }

    #[inline]
    pub fn target_pos(&self) -> GridPos {
        self.target_pos
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn prev_target(&self) -> Option<(Target, GridPos)> {
        self.prev_target
    }

    /// Battery level below which the agent goes looking for a station.
    pub fn look_threshold(&self) -> f64 {
        self.look_threshold
    }

    /// Battery level below which any free station in sight is taken.
    pub fn critical_battery(&self) -> f64 {
        self.critical_battery
    }

    pub fn vision(&self) -> u32 {
        self.vision
    }

    pub fn initial_bravery(&self) -> f64 {
        self.initial_bravery
    }

    pub fn memory(&self) -> &MemoryEngine {
        &self.memory
    }

    pub fn off_limits(&self) -> &OffLimits {
        &self.off_limits
    }

    /// `true` while the agent holds a station socket.
    pub fn is_plugged_in(&self) -> bool {
        self.socket.is_some()
    }

    pub fn socket(&self) -> Option<&SocketHandle> {
        self.socket.as_ref()
    }

    /// Ticks lived.
    #[inline]
    pub fn age(&self) -> u64 {
        self.age
    }

    pub fn attempts_success(&self) -> u64 {
        self.attempts_success
    }

    pub fn attempts_failed(&self) -> u64 {
        self.attempts_failed
    }

    // ── Mutation ──────────────────────────────────────────────────────────

    /// Overwrite the battery level, clamped to `[0, max_battery]`.
    pub fn set_battery(&mut self, level: f64) {
        self.battery = if level.is_nan() { 0.0 } else { level.clamp(0.0, self.max_battery) };
    }

    /// Overwrite the look-for-station and critical thresholds.  The critical
    /// level is capped at the look-for level.
    pub fn set_thresholds(&mut self, look_threshold: f64, critical_battery: f64) {
        self.look_threshold = look_threshold.max(0.0);
        self.critical_battery = critical_battery.clamp(0.0, self.look_threshold);
    }

    /// Hand back the held socket, if any.  Used when the agent is removed.
    pub fn take_socket(&mut self) -> Option<SocketHandle> {
        self.socket.take()
    }

    /// Draw a duration for `state` from its distribution, clamped at zero.
    pub(crate) fn sample_length(&mut self, state: AgentState) -> f64 {
        match self.durations.for_state(state) {
            Some(p) => self.rng.normal(p.mean, p.std_dev).max(0.0),
            None => 0.0,
        }
    }
}
