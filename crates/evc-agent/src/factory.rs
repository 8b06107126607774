//! Randomized construction of agents.
//!
//! # Usage
//!
//! ```rust,ignore
//! let factory = AgentFactory::new(config.agent.clone(), config.seed);
//! let agent = factory.build(AgentId(0), home, work, &world);
//! assert!(agent.battery() <= agent.max_battery());
//! ```

use evc_core::{AgentId, AgentParams, AgentRng, GridPos};
use evc_grid::GridWorld;
use evc_memory::{MemoryEngine, OffLimits, RecentSightings};
use evc_mobility::{Direction, StepCost};

use crate::agent::Durations;
use crate::{AgentState, EvAgent, Target};

/// States an agent may start the run in.
const INITIAL_STATES: [AgentState; 4] = [
    AgentState::Working,
    AgentState::Shopping,
    AgentState::AtHome,
    AgentState::Traveling,
];

/// Targets an agent may start the run with.
const INITIAL_TARGETS: [Target; 3] = [Target::Work, Target::Home, Target::Shop];

/// Exclusive upper bound of the initial `time_in_state`.
const INITIAL_TIME_SPREAD: u32 = 30;

/// Half-width of the max-battery draw around the configured size.
const BATTERY_SPREAD: f64 = 5.0;

/// Spread of the per-agent bravery draw.
const BRAVERY_STD_DEV: f64 = 5.0;

/// Builds agents with per-agent attributes drawn from [`AgentParams`].
///
/// Every draw comes from the new agent's own [`AgentRng`], so an agent's
/// attributes depend only on the run seed and its id.
#[derive(Clone, Debug)]
pub struct AgentFactory {
    params: AgentParams,
    seed:   u64,
}

impl AgentFactory {
    pub fn new(params: AgentParams, seed: u64) -> Self {
        Self { params, seed }
    }

    /// A new agent standing at `home`.
    ///
    /// Its state, time in state and target are randomized so that a fresh
    /// population does not move in lockstep.
    pub fn build(&self, id: AgentId, home: GridPos, work: GridPos, world: &GridWorld) -> EvAgent {
        let p = &self.params;
        let mut rng = AgentRng::new(self.seed, id);

        let lo = (p.battery_size - BATTERY_SPREAD).round() as i64;
        let hi = (p.battery_size + BATTERY_SPREAD).round() as i64;
        let max_battery = rng.gen_range(lo..hi.max(lo + 1)) as f64;
        let battery = rng.gen_range(max_battery * 2.0 / 3.0..max_battery);

        let look_threshold = rng.normal(p.look_for_station.mean, p.look_for_station.std_dev).abs();
        let critical_battery = rng
            .normal(p.critical_battery.mean, p.critical_battery.std_dev)
            .abs()
            .min(look_threshold);
        let initial_bravery = rng.normal(p.initial_bravery, BRAVERY_STD_DEV).round().abs();

        let state = rng.choose(&INITIAL_STATES).copied().unwrap_or(AgentState::AtHome);
        let time_in_state = rng.gen_range(0..INITIAL_TIME_SPREAD);
        let target = rng.choose(&INITIAL_TARGETS).copied().unwrap_or(Target::Home);

        let mut agent = EvAgent {
            id,
            pos:              home,
            home_pos:         home,
            work_pos:         work,
            center_pos:       world.midpoint(home, work),
            battery,
            max_battery,
            state,
            time_in_state,
            state_length:     0.0,
            target,
            target_pos:       home,
            direction:        Direction::STILL,
            prev_target:      None,
            look_threshold,
            critical_battery,
            charge_speed:     p.charge_speed,
            step_cost:        StepCost::new(p.min_cost_per_unit, p.max_cost_per_unit),
            vision:           p.vision,
            initial_bravery,
            durations:        Durations {
                work:   p.work_dwell,
                shop:   p.shop_dwell,
                home:   p.home_dwell,
                charge: p.charge_duration,
            },
            memory:           MemoryEngine::new(),
            off_limits:       OffLimits::new(),
            sightings:        RecentSightings::new(),
            socket:           None,
            age:              0,
            attempts_success: 0,
            attempts_failed:  0,
            rng,
        };

        let target_pos = match target {
            Target::Work => work,
            Target::Shop => agent.shop_position(world),
            _ => home,
        };
        agent.set_target(world, target, target_pos);
        agent.state_length = agent.sample_length(state);
        agent
    }
}
