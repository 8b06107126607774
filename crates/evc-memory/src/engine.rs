//! Per-agent memory over stations and strategies.

use rustc_hash::FxHashMap;
use tracing::trace;

use evc_core::{AgentRng, StationId};

use crate::{Cpf, Outcome, OutcomeRing, Strategy};

/// What one agent remembers about one station.
#[derive(Clone, Debug, Default)]
pub struct StationMemory {
    pub ring:   OutcomeRing,
    /// One score per [`Strategy`], as of the last write to `ring`.
    pub scores: [f64; Strategy::COUNT],
}

impl StationMemory {
    #[inline]
    pub fn score(&self, strategy: Strategy) -> f64 {
        self.scores[strategy.index()]
    }
}

/// An agent's station memory, strategy memory and current strategy.
#[derive(Clone, Debug, Default)]
pub struct MemoryEngine {
    stations:         FxHashMap<StationId, StationMemory>,
    strategy_rings:   [OutcomeRing; Strategy::COUNT],
    cpf:              Cpf,
    pole_count:       u64,
    current_strategy: Option<Strategy>,
}

impl MemoryEngine {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Reads ─────────────────────────────────────────────────────────────

    /// The decay clock: number of observations recorded so far.
    #[inline]
    pub fn pole_count(&self) -> u64 {
        self.pole_count
    }

    #[inline]
    pub fn cpf(&self) -> &Cpf {
        &self.cpf
    }

    #[inline]
    pub fn current_strategy(&self) -> Option<Strategy> {
        self.current_strategy
    }

    pub fn known_count(&self) -> usize {
        self.stations.len()
    }

    pub fn station(&self, station: StationId) -> Option<&StationMemory> {
        self.stations.get(&station)
    }

    /// Every remembered station with its memory.  Unordered.
    pub fn known(&self) -> impl Iterator<Item = (StationId, &StationMemory)> + '_ {
        self.stations.iter().map(|(&id, m)| (id, m))
    }

    pub fn strategy_ring(&self, strategy: Strategy) -> &OutcomeRing {
        &self.strategy_rings[strategy.index()]
    }

    // ── Writes ────────────────────────────────────────────────────────────

    /// Record `outcome` at `station`.
    ///
    /// Advances the decay clock, then appends to the station ring.  When the
    /// station is the one the current strategy sent the agent to, the
    /// outcome is also credited to that strategy.  The station's scores and
    /// the strategy lottery are recomputed afterwards.
    pub fn record(&mut self, station: StationId, outcome: Outcome, is_current_target: bool) {
        self.pole_count += 1;
        let now = self.pole_count;

        let memory = self.stations.entry(station).or_default();
        memory.ring.push(outcome, now);
        let decayed = memory.ring.decayed(now);
        for s in Strategy::ALL {
            memory.scores[s.index()] = s.score(&decayed);
        }

        if is_current_target && let Some(s) = self.current_strategy {
            self.strategy_rings[s.index()].push(outcome, now);
        }
        self.recompute_cpf();
        trace!(%station, ?outcome, pole_count = now, "memory written");
    }

    fn recompute_cpf(&mut self) {
        let now = self.pole_count;
        let sums = std::array::from_fn(|i| self.strategy_rings[i].decayed_sum(now));
        self.cpf = Cpf::from_sums(sums);
    }

    /// Draw a strategy from the lottery and make it current.
    pub fn choose_strategy(&mut self, rng: &mut AgentRng) -> Strategy {
        let u: f64 = rng.random();
        let s = self.cpf.choose(u);
        self.current_strategy = Some(s);
        s
    }

    /// Forget the current strategy (after a completed charge).
    pub fn clear_strategy(&mut self) {
        self.current_strategy = None;
    }
}
