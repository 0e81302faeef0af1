//! # block_pathfinding
//!
//! Pathfinding for a player token walking over a rectangular map of blocks, some of which
//! cannot be entered. Routes are computed with
//! [A*](https://en.wikipedia.org/wiki/A*_search_algorithm) under 4-directional movement with
//! uniform step cost and the
//! [Manhattan distance](https://en.wikipedia.org/wiki/Taxicab_geometry) as heuristic. Ties
//! between equally promising blocks are broken by discovery order, so a given map, start and
//! goal always produce the same route.
//!
//! [BlockMap] holds the walkability of every block and tracks
//! [connected components](https://en.wikipedia.org/wiki/Component_(graph_theory)).
//! [Walker] drives a token along computed routes one block per tick.
mod astar;
mod block_map;
mod coords;
mod error;
mod walker;

pub use astar::{find_path, is_valid_path, path_cost, Walkability};
pub use block_map::BlockMap;
pub use coords::{Coords, Direction};
pub use error::{PathError, PathResult};
pub use walker::{PathStep, WalkStatus, Walker};

/// Default number of block rows of a map.
pub const DEFAULT_ROWS: usize = 18;
/// Default number of block columns of a map.
pub const DEFAULT_COLS: usize = 32;
