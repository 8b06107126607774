//! Spatial index over station positions.
//!
//! Stations never move, so the R-tree is bulk-loaded once at setup and only
//! queried afterwards.  A vision query is a square envelope (the Moore
//! neighbourhood of the agent); on a torus the envelope is repeated at the
//! eight wrapped offsets so stations just across an edge are found too.

use rstar::{AABB, RTree, RTreeObject};

use evc_core::{GridPos, StationId};

use crate::GridWorld;

/// Entry stored in the R-tree: a station's cell and identity.
#[derive(Clone, Debug)]
struct StationEntry {
    point: [i32; 2],
    id:    StationId,
}

impl RTreeObject for StationEntry {
    type Envelope = AABB<[i32; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

/// Read-only lookup of stations by position.
pub struct StationIndex {
    tree:  RTree<StationEntry>,
    count: usize,
}

impl StationIndex {
    /// Bulk-load the index from `(id, position)` pairs.
    pub fn new(stations: impl IntoIterator<Item = (StationId, GridPos)>) -> Self {
        let entries: Vec<StationEntry> = stations
            .into_iter()
            .map(|(id, pos)| StationEntry { point: [pos.x, pos.y], id })
            .collect();
        let count = entries.len();
        Self { tree: RTree::bulk_load(entries), count }
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Stations within Chebyshev distance `radius` of `center` (centre cell
    /// included), sorted by `StationId` so callers iterate deterministically.
    pub fn within(&self, world: &GridWorld, center: GridPos, radius: u32) -> Vec<StationId> {
        let r = radius.min(world.width.max(world.height) as u32) as i32;
        let shifts: &[i32] = if world.topology.is_toroidal() { &[-1, 0, 1] } else { &[0] };

        let mut found = Vec::new();
        for &sy in shifts {
            for &sx in shifts {
                let cx = center.x + sx * world.width;
                let cy = center.y + sy * world.height;
                let envelope = AABB::from_corners([cx - r, cy - r], [cx + r, cy + r]);
                found.extend(self.tree.locate_in_envelope(&envelope).map(|e| e.id));
            }
        }
        found.sort_unstable();
        found.dedup();
        found
    }
}
