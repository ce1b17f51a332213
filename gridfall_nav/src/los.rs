// Line-of-sight oracle for the any-angle shortcut.
//
// Visibility between two cells requires BOTH of:
// 1. Ground continuity — the segment between the cell centers, sampled
//    at half the cast radius, must cross only cells with solid ground.
//    An agent walking the shortcut must never step over a hole.
// 2. An unobstructed cast — a DDA raycast between the two positions,
//    lifted by the configured clearance to approximate the agent's
//    body, must hit no solid cell over the full travel distance.
//
// Failing either check forfeits the shortcut. Out-of-bounds cells read
// as empty, so any segment leaving the grid fails the ground check —
// the oracle fails closed.
//
// Only Walk relaxations consult this oracle; see `search.rs`.

use crate::config::NavConfig;
use crate::types::GridCoord;
use crate::world::GridWorld;

/// Visibility query parameters, fixed per session.
#[derive(Clone, Copy, Debug)]
pub struct LineOfSight {
    cast_radius: f32,
    clearance: f32,
}

impl LineOfSight {
    pub fn from_config(config: &NavConfig) -> Self {
        Self {
            cast_radius: config.cast_radius,
            clearance: config.los_clearance,
        }
    }

    /// Whether an agent can travel in a straight line from `from` to
    /// `to` without stepping over a hole or clipping geometry.
    pub fn has_line_of_sight(&self, world: &GridWorld, from: GridCoord, to: GridCoord) -> bool {
        self.ground_is_continuous(world, from, to) && !self.cast_is_obstructed(world, from, to)
    }

    /// Sample the segment between the two cell centers and require
    /// solid ground at every sample, endpoints included.
    fn ground_is_continuous(&self, world: &GridWorld, from: GridCoord, to: GridCoord) -> bool {
        let a = world.to_world(from);
        let b = world.to_world(to);
        let length = world.world_distance(from, to);

        // Sub-cell sampling at half the cast radius. Identical cells
        // degenerate to a single sample of the shared cell.
        let spacing = (self.cast_radius * 0.5).max(1e-3);
        let samples = (length / spacing).ceil() as u32;

        for i in 0..=samples {
            let t = if samples == 0 { 0.0 } else { i as f32 / samples as f32 };
            let point = [
                a[0] + (b[0] - a[0]) * t,
                a[1] + (b[1] - a[1]) * t,
                a[2] + (b[2] - a[2]) * t,
            ];
            if world.occupancy(world.nearest_coord(point)) == 0 {
                return false;
            }
        }
        true
    }

    /// Raycast between the clearance-lifted positions.
    fn cast_is_obstructed(&self, world: &GridWorld, from: GridCoord, to: GridCoord) -> bool {
        let mut a = world.to_world(from);
        let mut b = world.to_world(to);
        a[1] += self.clearance;
        b[1] += self.clearance;
        world.raycast_hits_solid(a, b)
    }
}
