// Core types shared across the pathfinder.
//
// Defines the integer grid coordinate, the movement action vocabulary,
// and the two node flavors: `PathNode` (internal bookkeeping, coordinate
// plus the action that reached it) and `PathStep` (delivered output,
// world position plus action). All public types derive `Serialize` and
// `Deserialize` so hosts can persist or replay routes.
//
// See also: `world.rs` for the grid the coordinates index into,
// `search.rs` which keys its cost and parent arenas by `GridCoord`.

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Spatial types
// ---------------------------------------------------------------------------

/// A position in the 3D grid. Each component is in cell units.
///
/// The coordinate system is right-handed, y-up:
/// - X: east  (positive) / west  (negative)
/// - Y: up    (positive) / down  (negative)
/// - Z: south (positive) / north (negative)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridCoord {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl GridCoord {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// This coordinate shifted by the given per-axis deltas.
    pub const fn offset(self, dx: i32, dy: i32, dz: i32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.z + dz)
    }

    /// Manhattan distance between two coordinates.
    pub fn manhattan_distance(self, other: Self) -> u32 {
        (self.x - other.x).unsigned_abs()
            + (self.y - other.y).unsigned_abs()
            + (self.z - other.z).unsigned_abs()
    }

    /// Planar (x/z) Manhattan distance, ignoring height. The fallback
    /// closest-node tracker measures proximity to the goal with this,
    /// so a node directly above the goal counts as distance zero.
    pub fn flat_distance(self, other: Self) -> u32 {
        (self.x - other.x).unsigned_abs() + (self.z - other.z).unsigned_abs()
    }

    /// Per-axis absolute difference as an f32 vector.
    pub fn abs_delta(self, other: Self) -> [f32; 3] {
        [
            (self.x - other.x).abs() as f32,
            (self.y - other.y).abs() as f32,
            (self.z - other.z).abs() as f32,
        ]
    }
}

impl fmt::Display for GridCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

// ---------------------------------------------------------------------------
// Movement actions
// ---------------------------------------------------------------------------

/// The action required to reach a cell from its predecessor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Lateral move on level ground. The only action eligible for
    /// line-of-sight shortcutting.
    Walk,
    /// Lateral move one cell up.
    Jump,
    /// Lateral move one cell down.
    Fall,
    /// Leap over a single missing floor cell to the landing spot beyond it.
    GapJump,
}

// ---------------------------------------------------------------------------
// Path nodes
// ---------------------------------------------------------------------------

/// Internal search node: a coordinate plus the action used to reach it.
///
/// Identity in the frontier and the cost/parent arenas is the coordinate
/// alone; the action is carried metadata. At most one live cost and one
/// parent entry exists per coordinate.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct PathNode {
    pub coord: GridCoord,
    pub action: Action,
}

impl PathNode {
    pub const fn new(coord: GridCoord, action: Action) -> Self {
        Self { coord, action }
    }
}

impl fmt::Display for PathNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {:?}]", self.coord, self.action)
    }
}

/// One step of a delivered route: a world-space position and the action
/// needed to arrive there from the previous step.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PathStep {
    pub pos: [f32; 3],
    pub action: Action,
}
