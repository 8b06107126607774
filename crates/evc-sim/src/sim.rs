//! The `Sim` struct and its tick loop.

use tracing::{debug, info};

use evc_agent::{AgentFactory, EvAgent, StepContext, StepOutcome};
use evc_core::{AgentId, GridPos, ModelConfig, SimClock, SimRng, Tick};
use evc_grid::{GridWorld, Occupant, StationIndex};
use evc_station::StationStore;

use crate::stats::RetiredTotals;
use crate::{AgentSnapshot, ModelStats, SimObserver, SimResult, StationSnapshot};

/// The main simulation runner.
///
/// Holds the grid, the stations and the agent population, and drives the
/// tick loop described in the [crate docs](crate).
///
/// Agents live in slots indexed by `AgentId`; a removed agent leaves an empty
/// slot and replacements get fresh ids at the end, so an id is never reused.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim {
    /// Sanitized configuration of this run.
    pub config: ModelConfig,

    /// Current tick.
    pub clock: SimClock,

    /// Grid occupancy (stations and agents).
    pub world: GridWorld,

    /// Station lookup by position.  Stations never move.
    pub index: StationIndex,

    /// Socket state and usage of every station.
    pub stations: StationStore,

    pub(crate) agents:  Vec<Option<EvAgent>>,
    pub(crate) live:    usize,
    pub(crate) factory: AgentFactory,
    pub(crate) rng:     SimRng,
    pub(crate) retired: RetiredTotals,
}

impl Sim {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run the simulation from the current tick to `config.total_ticks`.
    ///
    /// Calls observer hooks at every tick boundary.  Use
    /// [`NoopObserver`][crate::NoopObserver] if you don't need callbacks.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        let end = Tick(self.config.total_ticks);
        info!(from = %self.clock, to = %end, agents = self.live, "run started");
        while self.clock.current_tick < end {
            self.tick(observer)?;
        }
        observer.on_sim_end(self.clock.current_tick);

        let stats = self.stats();
        info!(
            tick = %self.clock,
            agents = stats.agent_count,
            mean_battery = stats.mean_battery,
            mean_usage = stats.mean_usage,
            percentage_failed = stats.percentage_failed,
            removed = stats.removed_agents,
            "run finished"
        );
        Ok(())
    }

    /// Run exactly `n` ticks from the current position (ignores
    /// `total_ticks`).
    ///
    /// Useful for tests and incremental stepping.
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            self.tick(observer)?;
        }
        Ok(())
    }

    // ── Reads ─────────────────────────────────────────────────────────────

    /// The live agent with this id.
    pub fn agent(&self, id: AgentId) -> Option<&EvAgent> {
        self.agents.get(id.index())?.as_ref()
    }

    /// Mutable access to a live agent, for scenario set-up between ticks.
    pub fn agent_mut(&mut self, id: AgentId) -> Option<&mut EvAgent> {
        self.agents.get_mut(id.index())?.as_mut()
    }

    /// Every live agent in id order.
    pub fn agents(&self) -> impl Iterator<Item = &EvAgent> + '_ {
        self.agents.iter().flatten()
    }

    pub fn live_count(&self) -> usize {
        self.live
    }

    /// Ids handed out so far, live or removed.
    pub fn ids_issued(&self) -> usize {
        self.agents.len()
    }

    pub fn agent_snapshots(&self) -> Vec<AgentSnapshot> {
        self.agents().map(AgentSnapshot::from).collect()
    }

    pub fn station_snapshots(&self) -> Vec<StationSnapshot> {
        self.stations.iter().map(StationSnapshot::from).collect()
    }

    /// Model reporters over the current state.
    pub fn stats(&self) -> ModelStats {
        ModelStats::collect(self.agents(), &self.stations, &self.retired)
    }

    // ── Population ────────────────────────────────────────────────────────

    /// Spawn agents on empty cells until the population is back at
    /// `config.agent_count`.  Returns the number spawned; fewer when the grid
    /// has no empty cell left.
    pub fn maintain_population(&mut self) -> SimResult<usize> {
        let mut spawned = 0;
        while self.live < self.config.agent_count {
            let Some(home) = self.world.find_empty(&mut self.rng) else {
                debug!("no empty cell for a replacement home");
                break;
            };
            let work = self.world.find_empty(&mut self.rng).unwrap_or(home);
            let Ok(id) = AgentId::try_from(self.agents.len()) else {
                debug!("agent id space exhausted");
                break;
            };
            self.world.place(home, Occupant::Agent(id))?;
            self.agents.push(Some(self.factory.build(id, home, work, &self.world)));
            self.live += 1;
            spawned += 1;
        }
        Ok(spawned)
    }

    // ── Core tick processing ──────────────────────────────────────────────

    fn tick<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        let now = self.clock.current_tick;
        observer.on_tick_start(now);
        let active = self.process_tick(now, observer)?;
        observer.on_tick_end(now, active);
        if self.clock.is_interval(self.config.snapshot_interval_ticks) {
            observer.on_snapshot(now, &self.agent_snapshots(), &self.station_snapshots());
        }
        self.clock.advance();
        Ok(())
    }

    fn process_tick<O: SimObserver>(&mut self, now: Tick, observer: &mut O) -> SimResult<usize> {
        // ── Phase 1: activation order ─────────────────────────────────────
        let mut order: Vec<usize> = self
            .agents
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|_| i))
            .collect();
        self.rng.shuffle(&mut order);
        let active = order.len();

        // ── Phase 2: step every agent ─────────────────────────────────────
        //
        // Agents read the grid only for geometry and station lookups, so the
        // grid moves can wait until everyone has acted.
        let mut outcomes = Vec::with_capacity(active);
        {
            let mut ctx = StepContext {
                world:    &self.world,
                index:    &self.index,
                stations: &mut self.stations,
            };
            for i in order {
                if let Some(agent) = self.agents[i].as_mut() {
                    let outcome = agent.step(&mut ctx)?;
                    outcomes.push((i, agent.id(), outcome));
                }
            }
        }

        // ── Phase 3: apply moves and removals ─────────────────────────────
        for (slot, id, outcome) in outcomes {
            match outcome {
                StepOutcome::Stayed => {}
                StepOutcome::Moved { from, to } => {
                    self.world.move_occupant(from, to, Occupant::Agent(id))?;
                }
                StepOutcome::Died { pos } => self.remove_agent(slot, pos, now, observer)?,
            }
        }

        // ── Phase 4: usage sampling and population ────────────────────────
        self.stations.record_usage_samples();
        if self.config.maintain_population {
            self.maintain_population()?;
        }

        debug_assert!(self.stations.iter().all(|s| s.free_sockets() <= s.capacity()));
        debug_assert!(self.agents().all(|a| a.battery() >= 0.0 && a.battery() <= a.max_battery()));
        Ok(active)
    }

    fn remove_agent<O: SimObserver>(
        &mut self,
        slot:     usize,
        pos:      GridPos,
        now:      Tick,
        observer: &mut O,
    ) -> SimResult<()> {
        let Some(mut agent) = self.agents[slot].take() else {
            return Ok(());
        };
        self.world.remove(pos, Occupant::Agent(agent.id()))?;
        if let Some(handle) = agent.take_socket() {
            self.stations.release(handle)?;
        }
        self.retired.record(&agent);
        self.live -= 1;
        debug!(agent = %agent.id(), age = agent.age(), %now, "agent removed");
        // The agent's own position already holds the step it could not pay for.
        let mut snapshot = AgentSnapshot::from(&agent);
        snapshot.pos = pos;
        observer.on_agent_removed(now, &snapshot);
        Ok(())
    }
}
