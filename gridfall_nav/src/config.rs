// Data-driven pathfinder configuration.
//
// All tunable search parameters live here in `NavConfig`, loadable from
// JSON so hosts can retune costs and the heuristic without
// recompilation. The search never uses magic numbers — it reads from
// the config.
//
// See also: `search.rs` which reads the action costs, batch size, and
// heuristic parameters every relaxation; `los.rs` which reads the cast
// radius and clearance.

use serde::{Deserialize, Serialize};

/// Tunable parameters for the any-angle search.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NavConfig {
    /// Fixed cost of a one-cell-up lateral move.
    pub jump_cost: f32,
    /// Fixed cost of a one-cell-down lateral move.
    pub fall_cost: f32,
    /// Fixed cost of leaping a one-cell gap. The most expensive action:
    /// a gap jump commits the agent with no mid-air correction.
    pub gap_jump_cost: f32,
    /// Node expansions performed per `PathSession::step` call before the
    /// search suspends back to the host tick.
    pub expansions_per_step: u32,
    /// Blend in [0, 1] between the cross-track penalty (1.0) and the
    /// per-axis component sum (0.0) in the heuristic. Small values keep
    /// the Manhattan-style term dominant while still discouraging
    /// zig-zags away from the start-goal axis.
    pub straightness: f32,
    /// Heuristic inflation factor, >= 1. Values above 1 trade strict
    /// optimality for faster, greedier convergence.
    pub heuristic_weight: f32,
    /// Radius in world units of the obstruction cast; the ground
    /// continuity check samples the line at half this spacing.
    pub cast_radius: f32,
    /// Upward offset in world units applied to both endpoints of the
    /// obstruction cast, approximating the agent's body height.
    pub los_clearance: f32,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            jump_cost: 3.5,
            fall_cost: 1.5,
            gap_jump_cost: 4.0,
            expansions_per_step: 2,
            straightness: 0.01,
            heuristic_weight: 1.0 + 1.0 / 20.0,
            cast_radius: 0.3,
            los_clearance: 1.0,
        }
    }
}

impl NavConfig {
    /// Parse a config from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize the config to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
