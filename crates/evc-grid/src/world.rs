//! The `GridWorld` — cell storage and grid geometry.
//!
//! # Geometry
//!
//! All "how far apart are two cells" questions go through [`GridWorld::wrap_delta`],
//! which on a toroidal grid picks the shorter of the direct and the wrapped
//! route per axis.  Movement, reachability checks and the home/work midpoint
//! all build on it, so the bounded and toroidal cases differ in exactly one
//! place.

use evc_core::{AgentRng, GridPos, SimRng, Topology};

use crate::{GridError, GridResult, Occupant};

/// Largest supported grid side.  Keeps `width * height` and every delta
/// comfortably inside `i32`.
const MAX_SIDE: u32 = 1 << 15;

/// A `width x height` multi-occupancy grid.
///
/// Cells are stored row-major; `cells[y * width + x]` lists everything at
/// `(x, y)`.
#[derive(Clone, Debug)]
pub struct GridWorld {
    pub width:    i32,
    pub height:   i32,
    pub topology: Topology,
    cells:        Vec<Vec<Occupant>>,
}

impl GridWorld {
    /// Create an empty grid.
    ///
    /// # Errors
    ///
    /// [`GridError::EmptyGrid`] if either side is zero, [`GridError::TooLarge`]
    /// if either side exceeds 32 768 cells.
    pub fn new(width: u32, height: u32, topology: Topology) -> GridResult<Self> {
        if width == 0 || height == 0 {
            return Err(GridError::EmptyGrid { width, height });
        }
        for side in [width, height] {
            if side > MAX_SIDE {
                return Err(GridError::TooLarge(side));
            }
        }
        let (w, h) = (width as i32, height as i32);
        Ok(Self {
            width: w,
            height: h,
            topology,
            cells: vec![Vec::new(); (w * h) as usize],
        })
    }

    // ── Dimensions ────────────────────────────────────────────────────────

    #[inline]
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn contains(&self, pos: GridPos) -> bool {
        (0..self.width).contains(&pos.x) && (0..self.height).contains(&pos.y)
    }

    /// Map `pos` onto the grid: modulo the sides on a torus, `None` if out of
    /// range on a bounded grid.
    pub fn wrap(&self, pos: GridPos) -> Option<GridPos> {
        if self.contains(pos) {
            return Some(pos);
        }
        match self.topology {
            Topology::Toroidal => Some(GridPos::new(
                pos.x.rem_euclid(self.width),
                pos.y.rem_euclid(self.height),
            )),
            Topology::Bounded => None,
        }
    }

    /// Map `pos` onto the grid, clamping to the nearest edge cell on a
    /// bounded grid instead of rejecting it.
    pub fn wrap_or_clamp(&self, pos: GridPos) -> GridPos {
        self.wrap(pos).unwrap_or_else(|| {
            GridPos::new(pos.x.clamp(0, self.width - 1), pos.y.clamp(0, self.height - 1))
        })
    }

    /// Every cell, row-major.
    pub fn all_cells(&self) -> impl Iterator<Item = GridPos> + '_ {
        (0..self.height).flat_map(move |y| (0..self.width).map(move |x| GridPos::new(x, y)))
    }

    #[inline]
    fn cell_index(&self, pos: GridPos) -> GridResult<usize> {
        if !self.contains(pos) {
            return Err(GridError::OutOfBounds(pos));
        }
        Ok((pos.y * self.width + pos.x) as usize)
    }

    // ── Occupancy ─────────────────────────────────────────────────────────

    /// Everything currently at `pos`.  Empty for out-of-range positions.
    pub fn occupants(&self, pos: GridPos) -> &[Occupant] {
        match self.cell_index(pos) {
            Ok(i) => &self.cells[i],
            Err(_) => &[],
        }
    }

    #[inline]
    pub fn is_cell_empty(&self, pos: GridPos) -> bool {
        self.occupants(pos).is_empty()
    }

    pub fn place(&mut self, pos: GridPos, occupant: Occupant) -> GridResult<()> {
        let i = self.cell_index(pos)?;
        self.cells[i].push(occupant);
        Ok(())
    }

    pub fn remove(&mut self, pos: GridPos, occupant: Occupant) -> GridResult<()> {
        let i = self.cell_index(pos)?;
        let cell = &mut self.cells[i];
        match cell.iter().position(|&o| o == occupant) {
            Some(at) => {
                cell.swap_remove(at);
                Ok(())
            }
            None => Err(GridError::OccupantNotFound { pos, occupant }),
        }
    }

    /// Move `occupant` from `from` to `to`.  On error the grid is unchanged.
    pub fn move_occupant(&mut self, from: GridPos, to: GridPos, occupant: Occupant) -> GridResult<()> {
        self.cell_index(to)?;
        self.remove(from, occupant)?;
        self.place(to, occupant)
    }

    // ── Neighbourhood queries ─────────────────────────────────────────────

    /// All cells within Chebyshev distance `radius` of `pos` (a Moore
    /// neighbourhood), optionally including `pos` itself.
    ///
    /// On a bounded grid out-of-range cells are dropped; on a torus they are
    /// wrapped, and each cell appears once even if the square overlaps itself.
    pub fn neighborhood(&self, pos: GridPos, radius: u32, include_center: bool) -> Vec<GridPos> {
        // Beyond the longer side a larger radius adds no cells.
        let r = radius.min(self.width.max(self.height) as u32) as i32;
        let span = (2 * r + 1) as usize;
        let mut cells = Vec::with_capacity(span * span);
        for dy in -r..=r {
            for dx in -r..=r {
                if dx == 0 && dy == 0 && !include_center {
                    continue;
                }
                if let Some(cell) = self.wrap(pos.offset(dx, dy)) {
                    cells.push(cell);
                }
            }
        }
        if 2 * r + 1 > self.width || 2 * r + 1 > self.height {
            cells.sort_unstable();
            cells.dedup();
            if !include_center {
                cells.retain(|&c| c != pos);
            }
        }
        cells
    }

    /// All occupants of the Moore neighbourhood of `pos`.
    pub fn neighbors(&self, pos: GridPos, radius: u32, include_center: bool) -> Vec<Occupant> {
        self.neighborhood(pos, radius, include_center)
            .into_iter()
            .flat_map(|cell| self.occupants(cell).iter().copied())
            .collect()
    }

    /// A uniformly random cell with no occupants, or `None` if every cell is
    /// taken.
    pub fn find_empty(&self, rng: &mut SimRng) -> Option<GridPos> {
        let empty: Vec<GridPos> = self.all_cells().filter(|&c| self.is_cell_empty(c)).collect();
        if empty.is_empty() {
            return None;
        }
        Some(empty[rng.gen_range(0..empty.len())])
    }

    /// A uniformly random cell.
    pub fn random_cell(&self, rng: &mut AgentRng) -> GridPos {
        GridPos::new(rng.gen_range(0..self.width), rng.gen_range(0..self.height))
    }

    // ── Geometry ──────────────────────────────────────────────────────────

    /// Signed per-axis delta from `from` to `to`.
    ///
    /// On a torus each axis takes the shorter way round; an exact half-grid
    /// tie resolves to the positive direction.
    pub fn wrap_delta(&self, from: GridPos, to: GridPos) -> (i32, i32) {
        let dx = to.x - from.x;
        let dy = to.y - from.y;
        match self.topology {
            Topology::Bounded => (dx, dy),
            Topology::Toroidal => (shortest(dx, self.width), shortest(dy, self.height)),
        }
    }

    /// Euclidean length of [`wrap_delta`](Self::wrap_delta).
    pub fn distance(&self, from: GridPos, to: GridPos) -> f64 {
        let (dx, dy) = self.wrap_delta(from, to);
        f64::from(dx).hypot(f64::from(dy))
    }

    /// Octile distance: `max + (√2 − 1) · min` of the absolute wrap deltas.
    ///
    /// The length of the cheapest 8-connected path; used as the worst-case
    /// route length when checking whether a station is reachable.
    pub fn octile_distance(&self, from: GridPos, to: GridPos) -> f64 {
        let (dx, dy) = self.wrap_delta(from, to);
        let (ax, ay) = (f64::from(dx.abs()), f64::from(dy.abs()));
        ax.max(ay) + (std::f64::consts::SQRT_2 - 1.0) * ax.min(ay)
    }

    /// Cell halfway from `a` to `b` along the wrap-aware delta.
    pub fn midpoint(&self, a: GridPos, b: GridPos) -> GridPos {
        let (dx, dy) = self.wrap_delta(a, b);
        self.wrap_or_clamp(a.offset(dx / 2, dy / 2))
    }
}

/// The shorter signed route round a ring of `side` cells, in
/// `(-side/2, side/2]`.
#[inline]
fn shortest(d: i32, side: i32) -> i32 {
    let d = d.rem_euclid(side);
    if 2 * d > side { d - side } else { d }
}
