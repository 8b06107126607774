//! Heading towards a target.

use evc_core::GridPos;
use evc_grid::GridWorld;

/// Unit heading: the sign of the wrap-aware delta on each axis.
///
/// Recomputed whenever the target changes.  `(0, 0)` means "at target".
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Direction {
    pub dx: i32,
    pub dy: i32,
}

impl Direction {
    pub const STILL: Direction = Direction { dx: 0, dy: 0 };

    /// Heading from `from` to `to` on `world`.
    pub fn towards(world: &GridWorld, from: GridPos, to: GridPos) -> Self {
        let (dx, dy) = world.wrap_delta(from, to);
        Self { dx: dx.signum(), dy: dy.signum() }
    }
}
