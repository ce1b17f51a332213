// Error types for query setup.
//
// Only the setup phase can fail: a start or goal that cannot be snapped
// onto traversable terrain is rejected before any search begins. The
// running engine never errors — inconsistent world or oracle data reads
// as "not moveable" / "no line of sight" and the search continues.

use thiserror::Error;

/// A start/goal position could not be turned into a valid query.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SetupError {
    #[error("column ({x}, {z}) has no contact surface to stand on")]
    NoContactSurface { x: i32, z: i32 },

    #[error("position ({x}, {z}) lies outside the grid")]
    OutsideGrid { x: i32, z: i32 },
}
