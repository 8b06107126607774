//! Unit tests for evc-mobility.

use evc_core::{AgentId, AgentRng, GridPos, Topology};
use evc_grid::GridWorld;

use crate::{Direction, StepCost, next_step};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn rng(seed: u64) -> AgentRng {
    AgentRng::new(seed, AgentId(0))
}

fn world(topology: Topology) -> GridWorld {
    GridWorld::new(20, 20, topology).unwrap()
}

/// Walk until arrival, returning the number of steps.
fn walk(world: &GridWorld, mut pos: GridPos, target: GridPos, rng: &mut AgentRng) -> usize {
    let mut steps = 0;
    while pos != target {
        let heading = Direction::towards(world, pos, target);
        pos = next_step(world, pos, target, heading, rng);
        steps += 1;
        assert!(steps < 1_000, "never arrived");
    }
    steps
}

// ── Direction ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod direction {
    use super::*;

    #[test]
    fn signs_follow_delta() {
        let w = world(Topology::Bounded);
        assert_eq!(
            Direction::towards(&w, GridPos::new(5, 5), GridPos::new(2, 9)),
            Direction { dx: -1, dy: 1 }
        );
        assert_eq!(Direction::towards(&w, GridPos::new(3, 3), GridPos::new(3, 3)), Direction::STILL);
    }

    #[test]
    fn torus_heads_across_edge() {
        let w = world(Topology::Toroidal);
        assert_eq!(
            Direction::towards(&w, GridPos::new(1, 10), GridPos::new(18, 10)),
            Direction { dx: -1, dy: 0 }
        );
    }
}

// ── Stepping ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod stepping {
    use super::*;

    #[test]
    fn step_reduces_remaining_distance() {
        for topology in [Topology::Bounded, Topology::Toroidal] {
            let w = world(topology);
            let mut r = rng(9);
            let mut cells = rng(10);
            for _ in 0..300 {
                let from = w.random_cell(&mut cells);
                let to = w.random_cell(&mut cells);
                let heading = Direction::towards(&w, from, to);
                let next = next_step(&w, from, to, heading, &mut r);
                if from == to {
                    assert_eq!(next, from);
                    continue;
                }
                let (bx, by) = w.wrap_delta(from, to);
                let (ax, ay) = w.wrap_delta(next, to);
                assert!(ax.abs() <= bx.abs() && ay.abs() <= by.abs());
                assert!(ax.abs() < bx.abs() || ay.abs() < by.abs());
                assert!(w.contains(next));
            }
        }
    }

    #[test]
    fn diagonal_route_takes_chebyshev_steps() {
        let w = world(Topology::Bounded);
        let mut r = rng(1);
        assert_eq!(walk(&w, GridPos::new(0, 0), GridPos::new(7, 7), &mut r), 7);
    }

    #[test]
    fn straight_route_stays_on_axis() {
        let w = world(Topology::Bounded);
        let mut r = rng(2);
        let mut pos = GridPos::new(2, 4);
        let target = GridPos::new(12, 4);
        while pos != target {
            pos = next_step(&w, pos, target, Direction::towards(&w, pos, target), &mut r);
            assert_eq!(pos.y, 4);
        }
    }

    #[test]
    fn any_route_takes_long_axis_steps() {
        let w = world(Topology::Bounded);
        let mut r = rng(3);
        assert_eq!(walk(&w, GridPos::new(1, 2), GridPos::new(15, 6), &mut r), 14);
    }

    #[test]
    fn torus_wraps_at_edge() {
        let w = world(Topology::Toroidal);
        let mut r = rng(4);
        let from = GridPos::new(0, 5);
        let to = GridPos::new(17, 5);
        let next = next_step(&w, from, to, Direction::towards(&w, from, to), &mut r);
        assert_eq!(next, GridPos::new(19, 5));
        assert_eq!(walk(&w, from, to, &mut r), 3);
    }

    #[test]
    fn stale_heading_is_corrected() {
        let w = world(Topology::Bounded);
        let mut r = rng(5);
        let stale = Direction { dx: 1, dy: 1 };
        let next = next_step(&w, GridPos::new(5, 5), GridPos::new(0, 5), stale, &mut r);
        assert_eq!(next, GridPos::new(4, 5));
    }
}

// ── Energy cost ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod cost {
    use super::*;

    #[test]
    fn cost_within_range_times_length() {
        let w = world(Topology::Bounded);
        let c = StepCost::new(0.08, 0.30);
        let mut r = rng(6);
        for _ in 0..200 {
            let straight = c.draw(&w, GridPos::new(3, 3), GridPos::new(4, 3), &mut r);
            assert!((0.08..0.30).contains(&straight));
            let diag = c.draw(&w, GridPos::new(3, 3), GridPos::new(4, 4), &mut r);
            let sqrt2 = std::f64::consts::SQRT_2;
            assert!(diag >= 0.08 * sqrt2 && diag < 0.30 * sqrt2);
        }
    }

    #[test]
    fn standing_still_is_free() {
        let w = world(Topology::Bounded);
        let mut r = rng(7);
        assert_eq!(StepCost::new(0.08, 0.30).draw(&w, GridPos::new(1, 1), GridPos::new(1, 1), &mut r), 0.0);
    }

    #[test]
    fn degenerate_range_uses_min() {
        let w = world(Topology::Bounded);
        let mut r = rng(8);
        let c = StepCost::new(0.2, 0.2);
        assert!((c.draw(&w, GridPos::new(0, 0), GridPos::new(1, 0), &mut r) - 0.2).abs() < 1e-12);
        assert!((c.worst_case(10.0) - 2.0).abs() < 1e-12);
    }
}
