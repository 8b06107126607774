//! Simulation observer trait for progress reporting and data collection.

use evc_core::Tick;

use crate::{AgentSnapshot, StationSnapshot};

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] at key points in the
/// tick loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.  Observers only ever see read-only views;
/// collecting data cannot change the run.
///
/// # Example — battery logger
///
/// ```rust,ignore
/// struct MeanBattery(Vec<f64>);
///
/// impl SimObserver for MeanBattery {
///     fn on_snapshot(&mut self, _tick: Tick, agents: &[AgentSnapshot], _: &[StationSnapshot]) {
///         let sum: f64 = agents.iter().map(|a| a.battery).sum();
///         self.0.push(sum / agents.len().max(1) as f64);
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each tick, before any agent acts.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called at the end of each tick.
    ///
    /// `active` is the number of agents that were stepped this tick.
    fn on_tick_end(&mut self, _tick: Tick, _active: usize) {}

    /// Called at snapshot intervals (every `config.snapshot_interval_ticks`
    /// ticks) after the population top-up.
    fn on_snapshot(
        &mut self,
        _tick:     Tick,
        _agents:   &[AgentSnapshot],
        _stations: &[StationSnapshot],
    ) {}

    /// Called once for each agent removed because its battery ran out,
    /// with its final state.
    fn on_agent_removed(&mut self, _tick: Tick, _agent: &AgentSnapshot) {}

    /// Called once after the final tick completes.
    fn on_sim_end(&mut self, _final_tick: Tick) {}
}

/// A [`SimObserver`] that does nothing.  Use when you need to call `run` but
/// don't want callbacks.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
