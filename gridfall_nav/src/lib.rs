// gridfall_nav — incremental any-angle pathfinding over a 3D grid.
//
// A Theta*-style search for agents that walk, jump, fall, and leap
// single-cell gaps across a voxel-like world. Paths are improved by
// line-of-sight shortcutting: a segment may skip any number of grid
// cells when an unobstructed straight line of travel exists. The search
// runs as a resumable session, performing a bounded batch of node
// expansions per host tick so pathfinding never stalls a frame.
//
// Module overview:
// - `types.rs`:     GridCoord, Action, PathNode, PathStep.
// - `config.rs`:    NavConfig — every tunable (action costs, batch size,
//                   heuristic blend/weight, cast radius, clearance).
// - `world.rs`:     GridWorld — dense occupancy + terrain-cost grid,
//                   coordinate/world mapping, DDA raycast, goal-contact
//                   query setup.
// - `los.rs`:       LineOfSight — ground continuity + obstruction cast.
// - `heap.rs`:      IndexedHeap — frontier with O(1) membership and
//                   in-place decrease-key.
// - `neighbors.rs`: candidate generation (walk/jump/fall/gap-jump).
// - `search.rs`:    PathSession — the resumable Theta* loop, heuristic,
//                   path reconstruction.
// - `error.rs`:     SetupError — query-setup failures.
//
// The grid is supplied populated and static before a query begins; the
// pathfinder never mutates it. Concurrent queries each own their own
// `PathSession`; sessions sharing a read-only `GridWorld` is safe.

pub mod config;
pub mod error;
pub mod heap;
pub mod los;
pub mod neighbors;
pub mod search;
pub mod types;
pub mod world;

pub use config::NavConfig;
pub use error::SetupError;
pub use search::{PathSession, SearchStatus};
pub use types::{Action, GridCoord, PathNode, PathStep};
pub use world::{GridWorld, GOAL_CONTACT};
