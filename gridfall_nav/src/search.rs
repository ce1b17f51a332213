// The any-angle search engine and its resumable session.
//
// A `PathSession` is one start -> goal query: it owns the cost and
// parent arenas (dense, sized to the grid, indexed by the grid's own
// linear mapping), the frontier, and the closest-node fallback tracker.
// The host advances it with `step()` once per tick; each call performs
// a bounded batch of node expansions and suspends, so a long search
// never stalls a frame. All partial state stays inside the session —
// discarding one mid-search needs no cleanup.
//
// The relaxation rule is the Theta* any-angle step: a Walk neighbor may
// adopt the expanded node's own parent as its parent when the
// line-of-sight oracle confirms straight-line travel, letting path
// segments skip over grid cells entirely. Jump, Fall and GapJump are
// committed moves with fixed configured costs and no shortcutting.
//
// Closed-set policy: a coordinate is closed once its cost is finite (or
// it is the start), and is never reopened even if a cheaper route
// appears later. With the inflated heuristic this trades strict
// optimality for fast convergence — a deliberate approximation, not a
// reopening A* variant.
//
// See also: `neighbors.rs` for candidate generation, `los.rs` for the
// visibility oracle, `heap.rs` for the frontier, `config.rs` for every
// tunable this module reads.

use crate::config::NavConfig;
use crate::heap::IndexedHeap;
use crate::los::LineOfSight;
use crate::neighbors;
use crate::types::{Action, GridCoord, PathNode, PathStep};
use crate::world::GridWorld;
use log::{debug, trace};

/// Where a session is in its lifecycle. `step()` reports this after
/// every batch; once terminal it never changes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchStatus {
    /// The frontier still holds work; call `step()` again.
    Running,
    /// The goal was reached; the reconstructed path awaits `take_path()`.
    Completed,
    /// The frontier emptied without reaching the goal; the path to the
    /// closest node seen awaits `take_path()`. Callers can compare the
    /// final step against the intended goal to detect the degraded
    /// result.
    Exhausted,
}

/// All mutable state for one start -> goal query.
pub struct PathSession {
    start: GridCoord,
    goal: GridCoord,
    /// Per-axis |start - goal|, fixed for the session; the heuristic's
    /// cross-track term measures deviation from this axis.
    start_goal_delta: [f32; 3],
    /// Best known movement cost per cell, +inf when undiscovered. A
    /// finite entry marks the cell closed; the sentinel never leaves
    /// this table.
    costs: Vec<f32>,
    /// Best known parent per cell; only meaningful where `costs` is
    /// finite. Defaults to the start node so every chain terminates.
    parents: Vec<PathNode>,
    frontier: IndexedHeap,
    los: LineOfSight,
    /// Node with the smallest planar distance to the goal seen so far —
    /// the fallback target when the goal proves unreachable.
    closest: Option<PathNode>,
    closest_distance: u32,
    expansions: u64,
    status: SearchStatus,
    result: Option<Vec<PathStep>>,
    path_cost: Option<f32>,
}

impl PathSession {
    /// Begin a query. The start and goal are assumed to have been
    /// vetted by query setup (`GridWorld::goal_contact`); a start equal
    /// to the goal completes immediately with the trivial path.
    pub fn new(world: &GridWorld, config: &NavConfig, start: GridCoord, goal: GridCoord) -> Self {
        let mut session = Self {
            start,
            goal,
            start_goal_delta: start.abs_delta(goal),
            costs: vec![f32::INFINITY; world.len()],
            parents: vec![PathNode::new(start, Action::Walk); world.len()],
            frontier: IndexedHeap::with_capacity(256),
            los: LineOfSight::from_config(config),
            closest: None,
            closest_distance: u32::MAX,
            expansions: 0,
            status: SearchStatus::Running,
            result: None,
            path_cost: None,
        };
        debug!("path session {start} -> {goal}");

        if start == goal {
            session.finish(world, SearchStatus::Completed, PathNode::new(start, Action::Walk));
            return session;
        }

        let start_node = PathNode::new(start, Action::Walk);
        if let Some(idx) = world.index(start) {
            session.costs[idx] = 0.0;
            session.parents[idx] = start_node;
            session.frontier.insert(start_node, 0.0);
        } else {
            // Setup never hands us an out-of-grid start; fail closed if
            // it somehow does.
            session.finish(world, SearchStatus::Exhausted, start_node);
        }
        session
    }

    pub fn status(&self) -> SearchStatus {
        self.status
    }

    pub fn start(&self) -> GridCoord {
        self.start
    }

    pub fn goal(&self) -> GridCoord {
        self.goal
    }

    /// Total node expansions performed so far.
    pub fn expansions(&self) -> u64 {
        self.expansions
    }

    /// Movement cost of the delivered path's final node. `None` while
    /// still running.
    pub fn path_cost(&self) -> Option<f32> {
        self.path_cost
    }

    /// Take the reconstructed path. Delivered exactly once: subsequent
    /// calls (and calls before a terminal status) return `None`.
    pub fn take_path(&mut self) -> Option<Vec<PathStep>> {
        self.result.take()
    }

    /// Advance the search by one batch of node expansions
    /// (`config.expansions_per_step`), then suspend. Returns the
    /// session status; terminal statuses are sticky and further calls
    /// are no-ops.
    pub fn step(&mut self, world: &GridWorld, config: &NavConfig) -> SearchStatus {
        if self.status != SearchStatus::Running {
            return self.status;
        }

        let mut batch = 0u32;
        loop {
            let Some(current) = self.frontier.pop_min() else {
                // The goal was not on the connected component; deliver
                // the best-effort path to the closest node seen, or the
                // trivial start-only path if nothing was ever reachable.
                let terminal = self.closest.unwrap_or(PathNode::new(self.start, Action::Walk));
                self.finish(world, SearchStatus::Exhausted, terminal);
                return self.status;
            };
            batch += 1;
            self.expansions += 1;

            for neighbor in neighbors::adjacent(world, current.coord) {
                if self.is_closed(world, neighbor.coord) {
                    continue;
                }

                self.relax(world, config, current, neighbor);

                if neighbor.coord == self.goal {
                    self.finish(world, SearchStatus::Completed, neighbor);
                    return self.status;
                }

                let distance = neighbor.coord.flat_distance(self.goal);
                if distance < self.closest_distance {
                    self.closest_distance = distance;
                    self.closest = Some(neighbor);
                }
            }

            if batch >= config.expansions_per_step {
                trace!(
                    "suspending after {batch} expansions, frontier {}",
                    self.frontier.len()
                );
                return SearchStatus::Running;
            }
        }
    }

    /// Drive `step()` until the session is terminal. Hosts with a tick
    /// loop call `step()` directly; tests and one-shot callers use this.
    pub fn run_to_completion(&mut self, world: &GridWorld, config: &NavConfig) -> SearchStatus {
        while self.step(world, config) == SearchStatus::Running {}
        self.status
    }

    // -----------------------------------------------------------------------
    // Relaxation
    // -----------------------------------------------------------------------

    /// A coordinate is closed once its cost is finite, or when it is
    /// the start. Closed coordinates are never re-relaxed. Coordinates
    /// outside the grid count as closed (fail closed).
    fn is_closed(&self, world: &GridWorld, coord: GridCoord) -> bool {
        coord == self.start
            || world
                .index(coord)
                .is_none_or(|idx| self.costs[idx].is_finite())
    }

    /// Try to improve `neighbor` through `current`. Walk neighbors may
    /// shortcut through `current`'s own parent when line of sight
    /// permits; the committed actions keep `current` as parent and pay
    /// their fixed cost.
    fn relax(&mut self, world: &GridWorld, config: &NavConfig, current: PathNode, neighbor: PathNode) {
        let (Some(current_idx), Some(neighbor_idx)) =
            (world.index(current.coord), world.index(neighbor.coord))
        else {
            return;
        };

        let (parent, cost) = match neighbor.action {
            Action::Walk => {
                let grandparent = self.parents[current_idx];
                let via = if self
                    .los
                    .has_line_of_sight(world, grandparent.coord, neighbor.coord)
                {
                    grandparent
                } else {
                    current
                };
                let Some(via_idx) = world.index(via.coord) else {
                    return;
                };
                let cost = self.costs[via_idx]
                    + world.world_distance(via.coord, neighbor.coord)
                    + world.terrain_cost(neighbor.coord);
                (via, cost)
            }
            Action::Jump => (current, self.costs[current_idx] + config.jump_cost),
            Action::Fall => (current, self.costs[current_idx] + config.fall_cost),
            Action::GapJump => (current, self.costs[current_idx] + config.gap_jump_cost),
        };

        if cost < self.costs[neighbor_idx] {
            self.costs[neighbor_idx] = cost;
            self.parents[neighbor_idx] = parent;
            let f = cost + self.heuristic(config, neighbor.coord);
            self.frontier.decrease_or_insert(neighbor, f);
        }
    }

    /// Estimated remaining cost from a cell to the goal: a weighted
    /// blend of the per-axis component sum and a cross-track penalty
    /// against the session's start-goal axis. Inflated by
    /// `heuristic_weight`, so not admissible by design.
    fn heuristic(&self, config: &NavConfig, cell: GridCoord) -> f32 {
        let delta = cell.abs_delta(self.goal);
        let cross = cross_magnitude(delta, self.start_goal_delta);
        let component_sum = delta[0] + delta[1] + delta[2];
        config.heuristic_weight
            * (config.straightness * cross + (1.0 - config.straightness) * component_sum)
    }

    // -----------------------------------------------------------------------
    // Reconstruction
    // -----------------------------------------------------------------------

    /// Seal the session: record the terminal status and reconstruct the
    /// route from `terminal` back to the start.
    fn finish(&mut self, world: &GridWorld, status: SearchStatus, terminal: PathNode) {
        self.status = status;

        let mut steps = Vec::new();
        let mut node = terminal;
        loop {
            steps.push(PathStep {
                pos: world.to_world(node.coord),
                action: node.action,
            });
            if node.coord == self.start {
                break;
            }
            let Some(idx) = world.index(node.coord) else {
                break;
            };
            node = self.parents[idx];
        }
        steps.reverse();

        let terminal_cost = world
            .index(terminal.coord)
            .map(|idx| self.costs[idx])
            .unwrap_or(f32::INFINITY);
        self.path_cost = Some(if terminal_cost.is_finite() {
            terminal_cost
        } else {
            0.0
        });
        self.result = Some(steps);

        debug!(
            "path session {} -> {} finished {status:?} after {} expansions, cost {:?}",
            self.start, self.goal, self.expansions, self.path_cost
        );
    }
}

/// Magnitude of the cross product of two vectors.
fn cross_magnitude(a: [f32; 3], b: [f32; 3]) -> f32 {
    let cx = a[1] * b[2] - a[2] * b[1];
    let cy = a[2] * b[0] - a[0] * b[2];
    let cz = a[0] * b[1] - a[1] * b[0];
    (cx * cx + cy * cy + cz * cz).sqrt()
}
