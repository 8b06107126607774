//! One movement step and its energy cost.

use evc_core::{AgentRng, GridPos};
use evc_grid::GridWorld;

use crate::Direction;

/// The cell an agent at `pos` heading for `target` moves to this tick.
///
/// `heading` is the agent's stored [`Direction`]; if it no longer agrees
/// with the remaining delta on some axis (the target moved under it) the
/// fresh sign is used for that axis.  Returns `pos` when already there.
pub fn next_step(
    world:   &GridWorld,
    pos:     GridPos,
    target:  GridPos,
    heading: Direction,
    rng:     &mut AgentRng,
) -> GridPos {
    let (dx, dy) = world.wrap_delta(pos, target);
    let (ax, ay) = (dx.abs(), dy.abs());
    if ax == 0 && ay == 0 {
        return pos;
    }
    let sx = if heading.dx == dx.signum() { heading.dx } else { dx.signum() };
    let sy = if heading.dy == dy.signum() { heading.dy } else { dy.signum() };

    let (long, short) = (ax.max(ay), ax.min(ay));
    let take_short = short > 0 && rng.gen_bool(f64::from(short) / f64::from(long));

    // Ties count x as the long axis; with short == long the draw always
    // succeeds, giving a diagonal step.
    let (mx, my) = if ax >= ay {
        (sx, if take_short { sy } else { 0 })
    } else {
        (if take_short { sx } else { 0 }, sy)
    };
    world.wrap_or_clamp(pos.offset(mx, my))
}

/// Per-unit energy cost range of one step.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct StepCost {
    pub min_per_unit: f64,
    pub max_per_unit: f64,
}

impl StepCost {
    pub fn new(min_per_unit: f64, max_per_unit: f64) -> Self {
        Self { min_per_unit, max_per_unit }
    }

    /// Energy used moving from `from` to `to`: wrap-aware Euclidean length
    /// times a uniform draw from `[min_per_unit, max_per_unit)`.
    pub fn draw(&self, world: &GridWorld, from: GridPos, to: GridPos, rng: &mut AgentRng) -> f64 {
        let length = world.distance(from, to);
        if length == 0.0 {
            return 0.0;
        }
        let per_unit = if self.max_per_unit > self.min_per_unit {
            rng.gen_range(self.min_per_unit..self.max_per_unit)
        } else {
            self.min_per_unit
        };
        length * per_unit
    }

    /// Worst-case energy to cover `distance`.
    #[inline]
    pub fn worst_case(&self, distance: f64) -> f64 {
        distance * self.max_per_unit
    }
}
