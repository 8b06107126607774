//! Target resolution: routine stops, shopping destinations and the choice
//! of a charging station.

use std::cmp::Ordering;

use tracing::debug;

use evc_core::{GridPos, StationId};
use evc_grid::GridWorld;
use evc_memory::Strategy;
use evc_mobility::Direction;
use evc_station::StationStore;

use crate::{EvAgent, Target};

/// Distance (in cells) at which a station's attractiveness has fallen to
/// zero for an agent with a full battery.
pub const DISTANCE_HORIZON: f64 = 50.0;

/// A station that passed the candidate filters, with its ranking inputs.
#[derive(Copy, Clone, Debug)]
pub(crate) struct Candidate {
    pub station:  StationId,
    pub pos:      GridPos,
    pub distance: f64,
    pub combined: f64,
}

impl Candidate {
    /// Higher combined score wins; ties go to the nearer station, then the
    /// lower id.
    fn beats(&self, other: &Candidate) -> bool {
        match self.combined.partial_cmp(&other.combined).unwrap_or(Ordering::Equal) {
            Ordering::Greater => true,
            Ordering::Less => false,
            Ordering::Equal => match self.distance.partial_cmp(&other.distance).unwrap_or(Ordering::Equal) {
                Ordering::Less => true,
                Ordering::Greater => false,
                Ordering::Equal => self.station < other.station,
            },
        }
    }
}

impl EvAgent {
    /// Point the agent at `pos` and recompute its heading.
    pub(crate) fn set_target(&mut self, world: &GridWorld, target: Target, pos: GridPos) {
        self.target = target;
        self.target_pos = pos;
        self.direction = Direction::towards(world, self.pos, pos);
    }

    /// Remember the routine stop so it can be resumed after charging.
    /// Station and searching targets are never stashed.
    pub(crate) fn stash_routine(&mut self) {
        if self.target.is_routine() {
            self.prev_target = Some((self.target, self.target_pos));
        }
    }

    /// Head for the stop after the current one: home → work → shop → home.
    pub(crate) fn advance_routine(&mut self, world: &GridWorld) {
        let next = self.target.next_routine();
        let pos = match next {
            Target::Work => self.work_pos,
            Target::Shop => self.shop_position(world),
            _ => self.home_pos,
        };
        self.set_target(world, next, pos);
    }

    /// Draw a shopping destination around `center_pos`.
    ///
    /// The radius is exponentially distributed with mean
    /// `initial_bravery / max(1, known stations)`, so agents that already
    /// know many stations shop closer to their usual route.  The destination
    /// is one of the four corners of the square of that radius.
    pub fn shop_position(&mut self, world: &GridWorld) -> GridPos {
        let known = self.memory.known_count().max(1) as f64;
        let radius = self.rng.exponential(self.initial_bravery / known).round();
        if radius < 1.0 {
            return self.center_pos;
        }
        let r = radius.min(f64::from(world.width.max(world.height))) as i32;
        let dx = if self.rng.gen_bool(0.5) { r } else { -r };
        let dy = if self.rng.gen_bool(0.5) { r } else { -r };
        world.wrap_or_clamp(self.center_pos.offset(dx, dy))
    }

    /// Stations the agent would consider under `strategy`, best first.
    ///
    /// A remembered station is a candidate unless it is off limits or the
    /// worst-case cost of reaching it exceeds the battery.  Its combined
    /// score is the strategy score weighted by
    /// `max(0, 1 - d/H - pressure * d/H)`, where `d` is the octile distance,
    /// `H` the [`DISTANCE_HORIZON`] and `pressure = 1 - battery/max_battery`.
    pub(crate) fn candidates(
        &self,
        world:    &GridWorld,
        stations: &StationStore,
        strategy: Strategy,
    ) -> Vec<Candidate> {
        let pressure = if self.max_battery > 0.0 { 1.0 - self.battery / self.max_battery } else { 1.0 };
        let mut out: Vec<Candidate> = self
            .memory
            .known()
            .filter(|(id, _)| !self.off_limits.contains(*id))
            .filter_map(|(id, mem)| {
                let pos = stations.get(id)?.pos;
                let distance = world.octile_distance(self.pos, pos);
                if self.step_cost.worst_case(distance) > self.battery {
                    return None;
                }
                let ratio = distance / DISTANCE_HORIZON;
                let weight = (1.0 - ratio - pressure * ratio).max(0.0);
                Some(Candidate { station: id, pos, distance, combined: weight * mem.score(strategy) })
            })
            .collect();
        out.sort_by(|a, b| {
            if a.beats(b) {
                Ordering::Less
            } else if b.beats(a) {
                Ordering::Greater
            } else {
                Ordering::Equal
            }
        });
        out
    }

    /// Pick a station to drive to, or a random cell to explore if no
    /// remembered station qualifies.
    pub(crate) fn choose_target_pole(&mut self, world: &GridWorld, stations: &StationStore) {
        self.stash_routine();
        let strategy = self.memory.choose_strategy(&mut self.rng);

        match self.candidates(world, stations, strategy).first().copied() {
            Some(best) => {
                debug!(
                    agent = %self.id,
                    station = %best.station,
                    ?strategy,
                    score = best.combined,
                    "targeting station"
                );
                self.set_target(world, Target::ChargePole(best.station), best.pos);
            }
            None => {
                let cell = world.random_cell(&mut self.rng);
                debug!(agent = %self.id, ?strategy, %cell, "no reachable station; searching");
                self.set_target(world, Target::Searching, cell);
            }
        }
    }
}
