// Dense 3D grid world the search runs against.
//
// Occupancy is stored as a flat `Vec<u8>` indexed by
// `x + z * size_x + y * size_x * size_z`, giving O(1) read/write
// access: 0 = empty, anything greater = solid terrain, with
// `GOAL_CONTACT` distinguishing cells that query setup may snap a
// start/goal onto. A parallel `Vec<f32>` holds per-cell terrain cost
// penalties. Out-of-bounds reads return empty / zero; out-of-bounds
// writes are no-ops — the search fails closed at the world's edge.
//
// Also provides `raycast_hits_solid()`, a 3D DDA (Amanatides & Woo)
// traversal testing whether any solid cell lies between two world
// positions. `los.rs` uses it as the geometric half of the visibility
// oracle.
//
// The grid is populated by the host before any search begins and is
// read-only to the pathfinder; it carries no serde support because
// hosts regenerate it rather than persist it.
//
// See also: `types.rs` for `GridCoord`, `los.rs` for the visibility
// oracle built on top, `search.rs` whose cost/parent arenas reuse this
// grid's linear indexing.

use crate::error::SetupError;
use crate::types::GridCoord;

/// Occupancy value marking a cell as a contact surface: a solid cell
/// that query setup accepts as a start or goal footing.
pub const GOAL_CONTACT: u8 = 2;

/// Dense 3D grid of occupancy values and terrain costs.
#[derive(Clone, Debug, Default)]
pub struct GridWorld {
    /// Flat storage: index = x + z * size_x + y * size_x * size_z.
    occupancy: Vec<u8>,
    /// Per-cell movement cost penalty, same indexing.
    terrain_cost: Vec<f32>,
    pub size_x: u32,
    pub size_y: u32,
    pub size_z: u32,
}

impl GridWorld {
    /// Create a new world with every cell empty and zero terrain cost.
    pub fn new(size_x: u32, size_y: u32, size_z: u32) -> Self {
        let total = (size_x as usize) * (size_y as usize) * (size_z as usize);
        Self {
            occupancy: vec![0; total],
            terrain_cost: vec![0.0; total],
            size_x,
            size_y,
            size_z,
        }
    }

    /// Total cell count. The search sizes its cost/parent arenas to this.
    pub fn len(&self) -> usize {
        self.occupancy.len()
    }

    pub fn is_empty(&self) -> bool {
        self.occupancy.is_empty()
    }

    /// Check whether a coordinate is within bounds.
    pub fn in_bounds(&self, coord: GridCoord) -> bool {
        coord.x >= 0
            && coord.y >= 0
            && coord.z >= 0
            && (coord.x as u32) < self.size_x
            && (coord.y as u32) < self.size_y
            && (coord.z as u32) < self.size_z
    }

    /// Convert a coordinate to a flat index. Returns `None` if out of
    /// bounds. Shared with the search engine's arena tables.
    pub(crate) fn index(&self, coord: GridCoord) -> Option<usize> {
        if self.in_bounds(coord) {
            let x = coord.x as usize;
            let y = coord.y as usize;
            let z = coord.z as usize;
            let sx = self.size_x as usize;
            let sz = self.size_z as usize;
            Some(x + z * sx + y * sx * sz)
        } else {
            None
        }
    }

    /// Read a cell's occupancy. Returns 0 (empty) out of bounds.
    pub fn occupancy(&self, coord: GridCoord) -> u8 {
        self.index(coord).map(|i| self.occupancy[i]).unwrap_or(0)
    }

    /// Write a cell's occupancy. No-op out of bounds.
    pub fn set_occupancy(&mut self, coord: GridCoord, value: u8) {
        if let Some(i) = self.index(coord) {
            self.occupancy[i] = value;
        }
    }

    /// Read a cell's terrain cost penalty. Returns 0 out of bounds.
    pub fn terrain_cost(&self, coord: GridCoord) -> f32 {
        self.index(coord).map(|i| self.terrain_cost[i]).unwrap_or(0.0)
    }

    /// Write a cell's terrain cost penalty. No-op out of bounds.
    pub fn set_terrain_cost(&mut self, coord: GridCoord, cost: f32) {
        if let Some(i) = self.index(coord) {
            self.terrain_cost[i] = cost;
        }
    }

    // -----------------------------------------------------------------------
    // Coordinate <-> world mapping
    // -----------------------------------------------------------------------

    /// World-space position of a cell's center. Cells are unit cubes.
    pub fn to_world(&self, coord: GridCoord) -> [f32; 3] {
        [
            coord.x as f32 + 0.5,
            coord.y as f32 + 0.5,
            coord.z as f32 + 0.5,
        ]
    }

    /// The cell containing a world-space position.
    pub fn nearest_coord(&self, pos: [f32; 3]) -> GridCoord {
        GridCoord::new(
            pos[0].floor() as i32,
            pos[1].floor() as i32,
            pos[2].floor() as i32,
        )
    }

    /// Euclidean world-space distance between two cell centers.
    pub fn world_distance(&self, a: GridCoord, b: GridCoord) -> f32 {
        let pa = self.to_world(a);
        let pb = self.to_world(b);
        let dx = pa[0] - pb[0];
        let dy = pa[1] - pb[1];
        let dz = pa[2] - pb[2];
        (dx * dx + dy * dy + dz * dz).sqrt()
    }

    // -----------------------------------------------------------------------
    // Query setup
    // -----------------------------------------------------------------------

    /// Snap a world position to the nearest contact surface in its
    /// column: drop to the floor and scan upward for a `GOAL_CONTACT`
    /// cell. This is the query-setup validation — the search engine
    /// itself never receives a coordinate this has not vetted.
    pub fn goal_contact(&self, pos: [f32; 3]) -> Result<GridCoord, SetupError> {
        let mut coord = self.nearest_coord(pos);
        coord.y = 0;
        if !self.in_bounds(coord) {
            return Err(SetupError::OutsideGrid { x: coord.x, z: coord.z });
        }
        while (coord.y as u32) < self.size_y {
            if self.occupancy(coord) == GOAL_CONTACT {
                return Ok(coord);
            }
            coord = coord.offset(0, 1, 0);
        }
        Err(SetupError::NoContactSurface { x: coord.x, z: coord.z })
    }

    // -----------------------------------------------------------------------
    // Raycast
    // -----------------------------------------------------------------------

    /// 3D DDA raycast: returns `true` if any solid cell lies on the
    /// segment from `from` to `to` (world-space positions).
    ///
    /// Uses the Amanatides & Woo traversal. Stops when a solid cell is
    /// found, the segment ends, or the ray leaves the grid. The
    /// destination cell itself is NOT tested, so an endpoint resting on
    /// a surface does not self-occlude.
    pub fn raycast_hits_solid(&self, from: [f32; 3], to: [f32; 3]) -> bool {
        let dir = [to[0] - from[0], to[1] - from[1], to[2] - from[2]];

        let mut cell = [
            from[0].floor() as i32,
            from[1].floor() as i32,
            from[2].floor() as i32,
        ];
        let end_cell = [
            to[0].floor() as i32,
            to[1].floor() as i32,
            to[2].floor() as i32,
        ];

        // Per-axis step direction and the t values at which the ray
        // crosses the next cell boundary on each axis.
        let mut step = [0i32; 3];
        let mut t_max = [f32::INFINITY; 3];
        let mut t_delta = [f32::INFINITY; 3];
        for axis in 0..3 {
            if dir[axis] > 0.0 {
                step[axis] = 1;
                t_delta[axis] = 1.0 / dir[axis];
                t_max[axis] = ((cell[axis] as f32 + 1.0) - from[axis]) / dir[axis];
            } else if dir[axis] < 0.0 {
                step[axis] = -1;
                t_delta[axis] = 1.0 / (-dir[axis]);
                t_max[axis] = (from[axis] - cell[axis] as f32) / (-dir[axis]);
            }
            // A zero component never advances its axis.
        }

        loop {
            if cell == end_cell {
                return false;
            }

            if self.occupancy(GridCoord::new(cell[0], cell[1], cell[2])) > 0 {
                return true;
            }

            // Advance along the axis whose boundary is crossed first.
            let axis = if t_max[0] <= t_max[1] && t_max[0] <= t_max[2] {
                0
            } else if t_max[1] <= t_max[2] {
                1
            } else {
                2
            };

            // Past t = 1 the segment has ended without an obstruction.
            if t_max[axis] > 1.0 {
                return false;
            }

            cell[axis] += step[axis];
            t_max[axis] += t_delta[axis];
        }
    }
}
