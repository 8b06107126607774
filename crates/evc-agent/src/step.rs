//! The per-tick state machine.

use tracing::{debug, trace};

use evc_core::GridPos;
use evc_grid::{GridWorld, StationIndex};
use evc_memory::Outcome;
use evc_mobility::next_step;
use evc_station::StationStore;

use crate::{AgentError, AgentResult, AgentState, EvAgent, Target};

/// Everything an agent may look at or touch during its step.
///
/// Only the stations are mutable: taking and returning sockets is the one
/// interaction between agents, and it happens immediately so later agents
/// in the same tick see it.
pub struct StepContext<'a> {
    pub world:    &'a GridWorld,
    pub index:    &'a StationIndex,
    pub stations: &'a mut StationStore,
}

/// What the simulation has to apply to the grid after a step.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// The agent did not move.
    Stayed,
    /// The agent moved one cell.
    Moved { from: GridPos, to: GridPos },
    /// The battery ran out.  `pos` is the cell the agent occupied on the grid
    /// before the step; any socket it held has already been returned.
    Died { pos: GridPos },
}

impl EvAgent {
    /// Advance this agent by one tick.
    ///
    /// # Errors
    ///
    /// [`AgentError::Socket`] if returning a socket fails, which means the
    /// station bookkeeping is already inconsistent.
    pub fn step(&mut self, ctx: &mut StepContext<'_>) -> AgentResult<StepOutcome> {
        self.age += 1;

        if self.state.is_dwelling() {
            if f64::from(self.time_in_state) < self.state_length {
                self.time_in_state += 1;
                return Ok(StepOutcome::Stayed);
            }
            self.time_in_state = 0;
            // Agents that start the run dwelling away from their target
            // first finish the trip they were on.
            if self.pos == self.target_pos {
                self.advance_routine(ctx.world);
            }
            self.state = AgentState::Traveling;
        }

        if self.state == AgentState::Charging && !self.charge(ctx)? {
            return Ok(StepOutcome::Stayed);
        }

        if self.battery < self.look_threshold
            && self.target.station().is_none()
            && self.target != Target::Searching
        {
            self.choose_target_pole(ctx.world, ctx.stations);
        }

        if self.pos == self.target_pos {
            match self.target {
                Target::Home | Target::Work | Target::Shop => {
                    self.enter_dwell();
                    return Ok(StepOutcome::Stayed);
                }
                Target::Searching => self.choose_target_pole(ctx.world, ctx.stations),
                Target::ChargePole(station) => match ctx.stations.try_occupy(station) {
                    Some(handle) => {
                        self.socket = Some(handle);
                        self.attempts_success += 1;
                        self.state = AgentState::Charging;
                        self.time_in_state = 0;
                        self.state_length = self.sample_length(AgentState::Charging);
                        trace!(agent = %self.id, %station, "plugged in");
                        self.charge(ctx)?;
                        return Ok(StepOutcome::Stayed);
                    }
                    None => {
                        self.attempts_failed += 1;
                        self.off_limits.push(station);
                        trace!(agent = %self.id, %station, "station full on arrival");
                        self.choose_target_pole(ctx.world, ctx.stations);
                    }
                },
            }
        }

        self.scan(ctx);
        self.state = if self.target == Target::Searching {
            AgentState::Searching
        } else {
            AgentState::Traveling
        };
        let from = self.pos;
        self.travel(ctx.world);

        if self.battery <= 0.0 {
            self.battery = 0.0;
            if let Some(handle) = self.socket.take() {
                ctx.stations
                    .release(handle)
                    .map_err(|source| AgentError::Socket { agent: self.id, source })?;
            }
            debug!(agent = %self.id, age = self.age, pos = %self.pos, "battery depleted");
            return Ok(StepOutcome::Died { pos: from });
        }

        if self.pos == from {
            Ok(StepOutcome::Stayed)
        } else {
            Ok(StepOutcome::Moved { from, to: self.pos })
        }
    }

    fn enter_dwell(&mut self) {
        if let Some(state) = self.target.dwell_state() {
            self.state = state;
            self.time_in_state = 0;
            self.state_length = self.sample_length(state);
        }
    }

    /// One tick plugged in.  Returns `true` once charging is over and the
    /// socket has been returned.
    fn charge(&mut self, ctx: &mut StepContext<'_>) -> AgentResult<bool> {
        self.time_in_state += 1;
        if f64::from(self.time_in_state) < self.state_length || self.battery < self.max_battery {
            self.battery = (self.battery + self.charge_speed).min(self.max_battery);
            return Ok(false);
        }

        debug_assert!(self.socket.is_some(), "charging agent holds no socket");
        if let Some(handle) = self.socket.take() {
            ctx.stations
                .release(handle)
                .map_err(|source| AgentError::Socket { agent: self.id, source })?;
        }
        let (target, pos) = self.prev_target.take().unwrap_or((Target::Home, self.home_pos));
        self.set_target(ctx.world, target, pos);
        self.off_limits.clear();
        self.memory.clear_strategy();
        self.state = AgentState::Traveling;
        self.time_in_state = 0;
        trace!(agent = %self.id, battery = self.battery, "charge complete");
        Ok(true)
    }

    /// Observe every station within vision and write each one not seen in
    /// the last few scans to memory.
    ///
    /// A free station is taken on the spot when the battery is critical (the
    /// first such station this scan) or when the agent is low and not yet
    /// heading for a station.  A full station seen while low is put off
    /// limits.
    fn scan(&mut self, ctx: &mut StepContext<'_>) {
        let mut written = Vec::new();
        let mut grabbed = false;

        for station in ctx.index.within(ctx.world, self.pos, self.vision) {
            if self.sightings.contains(station) {
                continue;
            }
            let Some((station_pos, free)) =
                ctx.stations.get(station).map(|s| (s.pos, s.has_free_socket()))
            else {
                continue;
            };
            written.push(station);
            let is_target = self.target == Target::ChargePole(station);

            if free {
                self.memory.record(station, Outcome::Free, is_target);
                let critical = self.battery < self.critical_battery && !grabbed;
                let low = self.battery < self.look_threshold && self.target.station().is_none();
                if critical || low {
                    self.stash_routine();
                    self.set_target(ctx.world, Target::ChargePole(station), station_pos);
                    grabbed = true;
                }
            } else {
                self.memory.record(station, Outcome::Full, is_target);
                if self.battery < self.look_threshold {
                    self.off_limits.push(station);
                }
            }
        }
        self.sightings.push_scan(written);
    }

    /// Take one step towards the target and pay for it.
    fn travel(&mut self, world: &GridWorld) {
        if self.pos == self.target_pos {
            return;
        }
        let next = next_step(world, self.pos, self.target_pos, self.direction, &mut self.rng);
        let cost = self.step_cost.draw(world, self.pos, next, &mut self.rng);
        self.pos = next;
        self.battery = (self.battery - cost).max(0.0);
        debug_assert!(self.battery <= self.max_battery);
    }
}
