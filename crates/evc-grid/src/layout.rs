//! Station placement and distinct-cell draws.
//!
//! Every layout returns distinct cells.  Geometric layouts (rings, Latin
//! hypercube) can collide when the grid is coarse relative to the station
//! count; colliding slots are refilled with uniformly random unused cells so
//! the requested count is always met when the grid has room.

use std::collections::HashSet;
use std::f64::consts::TAU;

use tracing::warn;

use evc_core::{GridPos, SimRng, StationLayout};

use crate::GridWorld;

/// Ring radius as a fraction of the shorter grid side.
const RING_RADIUS_FRACTION: f64 = 0.25;

/// Outer-ring radius as a fraction of the shorter grid side.
const OUTER_RING_RADIUS_FRACTION: f64 = 0.45;

/// Positions for `count` stations on `world` using `layout`.
///
/// `count` is capped at the number of cells (with a warning).
pub fn station_positions(
    layout: StationLayout,
    count:  usize,
    world:  &GridWorld,
    rng:    &mut SimRng,
) -> Vec<GridPos> {
    let count = if count > world.cell_count() {
        warn!(
            requested = count,
            cells = world.cell_count(),
            "more stations than cells; placing one per cell"
        );
        world.cell_count()
    } else {
        count
    };

    let proposed = match layout {
        StationLayout::Uniform => return distinct_cells(world, count, &HashSet::new(), rng),
        StationLayout::Ring => ring(world, count, RING_RADIUS_FRACTION),
        StationLayout::OuterRing => ring(world, count, OUTER_RING_RADIUS_FRACTION),
        StationLayout::LatinHypercube => latin_hypercube(world, count, rng),
    };

    let mut used = HashSet::with_capacity(count);
    let mut positions: Vec<GridPos> = proposed.into_iter().filter(|p| used.insert(*p)).collect();
    if positions.len() < count {
        let refill = distinct_cells(world, count - positions.len(), &used, rng);
        positions.extend(refill);
    }
    positions
}

/// Up to `count` distinct uniformly random cells not in `exclude`.
///
/// Returns fewer than `count` only when the grid runs out of cells.
pub fn distinct_cells(
    world:   &GridWorld,
    count:   usize,
    exclude: &HashSet<GridPos>,
    rng:     &mut SimRng,
) -> Vec<GridPos> {
    let mut cells: Vec<GridPos> = world.all_cells().filter(|c| !exclude.contains(c)).collect();
    rng.shuffle(&mut cells);
    cells.truncate(count);
    cells
}

/// `count` points evenly spaced on a circle around the grid centre.
fn ring(world: &GridWorld, count: usize, fraction: f64) -> Vec<GridPos> {
    let cx = f64::from(world.width - 1) / 2.0;
    let cy = f64::from(world.height - 1) / 2.0;
    let radius = fraction * f64::from(world.width.min(world.height));
    (0..count)
        .map(|i| {
            let angle = TAU * i as f64 / count as f64;
            let p = GridPos::new(
                (cx + radius * angle.cos()).round() as i32,
                (cy + radius * angle.sin()).round() as i32,
            );
            world.wrap_or_clamp(p)
        })
        .collect()
}

/// Latin hypercube sample: the x axis and the y axis are each cut into
/// `count` strata; station `i` lands in x-stratum `i` and a randomly permuted
/// y-stratum, at a uniform offset inside each.
fn latin_hypercube(world: &GridWorld, count: usize, rng: &mut SimRng) -> Vec<GridPos> {
    if count == 0 {
        return Vec::new();
    }
    let mut y_strata: Vec<usize> = (0..count).collect();
    rng.shuffle(&mut y_strata);

    let n = count as f64;
    let (w, h) = (f64::from(world.width), f64::from(world.height));
    y_strata
        .into_iter()
        .enumerate()
        .map(|(i, j)| {
            let u: f64 = rng.random();
            let v: f64 = rng.random();
            let x = ((i as f64 + u) / n * w).floor() as i32;
            let y = ((j as f64 + v) / n * h).floor() as i32;
            world.wrap_or_clamp(GridPos::new(x, y))
        })
        .collect()
}
