// Neighbor generation: which cells are reachable in one search step.
//
// For each planar cardinal direction and each vertical offset in
// {-1, 0, +1}, the adjacent cell is a candidate. A cell is moveable if
// it is solid terrain with empty headroom directly above — the agent
// stands ON solid cells. Moveable candidates map the vertical offset to
// an action: level = Walk, up = Jump, down = Fall. When a candidate is
// not moveable (a gap), one further step in the same direction is
// probed as a gap-jump landing, provided both the origin's headroom
// cell and the cell over the gap are clear so the jump arc fits.
//
// Each direction/offset pair yields at most one candidate; a gap-jump
// bypasses the immediate neighbor entirely.
//
// See also: `search.rs` which relaxes each candidate, `world.rs` for
// the occupancy queries.

use crate::types::{Action, GridCoord, PathNode};
use crate::world::GridWorld;
use smallvec::SmallVec;

/// Planar cardinal directions as (dx, dz): east, west, south, north.
const LATERAL_DIRECTIONS: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// Candidates reachable from one origin: 4 directions x 3 vertical
/// offsets, one candidate each at most.
pub type Candidates = SmallVec<[PathNode; 12]>;

/// Solid footing with headroom above.
pub fn is_moveable(world: &GridWorld, coord: GridCoord) -> bool {
    world.occupancy(coord) > 0 && world.occupancy(coord.offset(0, 1, 0)) == 0
}

fn is_cell_empty(world: &GridWorld, coord: GridCoord) -> bool {
    world.occupancy(coord) == 0
}

/// Enumerate every (cell, action) pair reachable from `origin` in one
/// search step.
pub fn adjacent(world: &GridWorld, origin: GridCoord) -> Candidates {
    let mut candidates = Candidates::new();

    for &(dx, dz) in &LATERAL_DIRECTIONS {
        for dy in -1..=1 {
            let cell = origin.offset(dx, dy, dz);

            if is_moveable(world, cell) {
                let action = match dy {
                    0 => Action::Walk,
                    1 => Action::Jump,
                    _ => Action::Fall,
                };
                candidates.push(PathNode::new(cell, action));
            } else {
                // A gap: probe one further step for a landing spot. The
                // arc needs clear air above the origin and above the
                // skipped cell.
                let landing = cell.offset(dx, 0, dz);
                if is_moveable(world, landing)
                    && is_cell_empty(world, origin.offset(0, 1, 0))
                    && is_cell_empty(world, cell.offset(0, 1, 0))
                {
                    candidates.push(PathNode::new(landing, Action::GapJump));
                }
            }
        }
    }

    candidates
}
