//! Integer grid coordinates and grid topology.

use std::fmt;

/// Edge behaviour of the grid.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Topology {
    /// Edges are walls; coordinates outside the grid do not exist.
    #[default]
    Bounded,
    /// Each edge wraps to the opposite edge.
    Toroidal,
}

impl Topology {
    #[inline]
    pub fn is_toroidal(self) -> bool {
        matches!(self, Topology::Toroidal)
    }
}

/// A cell coordinate on the simulation grid.
///
/// Signed so that intermediate arithmetic (deltas, out-of-range neighbours
/// before wrapping) needs no casts.  Positions stored in the world are always
/// within `[0, width) x [0, height)`.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridPos {
    pub x: i32,
    pub y: i32,
}

impl GridPos {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Component-wise offset.
    #[inline]
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self { x: self.x + dx, y: self.y + dy }
    }
}

impl fmt::Display for GridPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(i32, i32)> for GridPos {
    #[inline]
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}
