//! A* search over a 4-connected grid with unit edge costs and the Manhattan distance as
//! heuristic.
//!
//! The open set is an insertion-ordered [IndexSet] of arena indices. The node expanded next is
//! the one with the smallest `f = g + h`; among equal `f` the one inserted into the open set
//! first wins, and removal keeps the remaining nodes in order. This makes the returned route a
//! pure function of the grid, start and goal.
//!
//! Closed nodes are never reopened. With a consistent heuristic on a uniform-cost graph the
//! first expansion of a node already carries its optimal cost; this would not hold for an
//! inconsistent heuristic or non-uniform edge costs.
use fxhash::FxBuildHasher;
use indexmap::IndexSet;
use itertools::Itertools;

use crate::coords::Coords;
use crate::error::{PathError, PathResult};

type FxIndexSet<K> = IndexSet<K, FxBuildHasher>;

/// Read-only view of a rectangular walkability field, indexed by (row, col).
pub trait Walkability {
    fn rows(&self) -> usize;
    fn cols(&self) -> usize;
    /// Whether the in-bounds cell at (`row`, `col`) can be entered.
    fn walkable_at(&self, row: usize, col: usize) -> bool;

    fn in_bounds(&self, coords: Coords) -> bool {
        coords.row >= 0
            && coords.col >= 0
            && (coords.row as usize) < self.rows()
            && (coords.col as usize) < self.cols()
    }

    /// Out-of-bounds cells are never walkable.
    fn is_walkable(&self, coords: Coords) -> bool {
        self.in_bounds(coords) && self.walkable_at(coords.row as usize, coords.col as usize)
    }

    fn check_bounds(&self, coords: Coords) -> PathResult<()> {
        if self.in_bounds(coords) {
            Ok(())
        } else {
            Err(PathError::InvalidCoordinate {
                coords,
                rows: self.rows(),
                cols: self.cols(),
            })
        }
    }

    /// See [find_path].
    fn find_path(&self, start: Coords, goal: Coords) -> PathResult<Vec<Coords>> {
        find_path(self, start, goal)
    }
}

/// Row-major rows of equal length; a missing cell in a short row counts as blocked.
impl Walkability for Vec<Vec<bool>> {
    fn rows(&self) -> usize {
        self.len()
    }
    fn cols(&self) -> usize {
        self.first().map_or(0, Vec::len)
    }
    fn walkable_at(&self, row: usize, col: usize) -> bool {
        self[row].get(col).copied().unwrap_or(false)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum NodeState {
    Unseen,
    Open,
    Closed,
}

#[derive(Clone, Debug)]
struct SearchNode {
    coords: Coords,
    walkable: bool,
    /// Only meaningful once the node has left [NodeState::Unseen].
    g: i32,
    h: i32,
    parent: Option<usize>,
    state: NodeState,
}

impl SearchNode {
    fn f(&self) -> i32 {
        self.g + self.h
    }
}

/// Per-call search state: one node per cell plus the ordered frontier.
struct Search {
    cols: usize,
    nodes: Vec<SearchNode>,
    open: FxIndexSet<usize>,
}

impl Search {
    fn new<G: Walkability + ?Sized>(grid: &G, goal: Coords) -> Search {
        let (rows, cols) = (grid.rows(), grid.cols());
        let nodes = (0..rows)
            .cartesian_product(0..cols)
            .map(|(row, col)| {
                let coords = Coords::new(row as i32, col as i32);
                SearchNode {
                    coords,
                    walkable: grid.walkable_at(row, col),
                    g: 0,
                    h: coords.manhattan_distance(&goal),
                    parent: None,
                    state: NodeState::Unseen,
                }
            })
            .collect::<Vec<_>>();
        Search {
            cols,
            nodes,
            open: FxIndexSet::default(),
        }
    }

    fn index_of(&self, coords: Coords) -> Option<usize> {
        if coords.row < 0 || coords.col < 0 || coords.col as usize >= self.cols {
            return None;
        }
        let ix = coords.row as usize * self.cols + coords.col as usize;
        (ix < self.nodes.len()).then_some(ix)
    }

    /// Removes the open node with the smallest `f`, earliest inserted on ties, and closes it.
    fn close_best(&mut self) -> Option<usize> {
        let nodes = &self.nodes;
        let position = self.open.iter().position_min_by_key(|&&ix| nodes[ix].f())?;
        let ix = self.open.shift_remove_index(position)?;
        self.nodes[ix].state = NodeState::Closed;
        Some(ix)
    }

    /// Discovers or relaxes `ix` through `parent`.
    fn visit(&mut self, parent: usize, ix: usize) {
        let g = self.nodes[parent].g + 1;
        let node = &mut self.nodes[ix];
        if !node.walkable {
            return;
        }
        match node.state {
            NodeState::Closed => {}
            NodeState::Unseen => {
                node.state = NodeState::Open;
                node.parent = Some(parent);
                node.g = g;
                self.open.insert(ix);
            }
            NodeState::Open => {
                if g < node.g {
                    node.parent = Some(parent);
                    node.g = g;
                }
            }
        }
    }

    /// Expands nodes until `goal` is discovered or the open set runs dry.
    fn run(&mut self, start: usize, goal: usize) -> bool {
        self.nodes[start].state = NodeState::Open;
        self.open.insert(start);
        while let Some(current) = self.close_best() {
            for neighbour in self.nodes[current].coords.neumann_neighbourhood() {
                let Some(ix) = self.index_of(neighbour) else {
                    continue;
                };
                self.visit(current, ix);
                if ix == goal {
                    return true;
                }
            }
        }
        false
    }

    fn reconstruct(&self, goal: usize) -> Vec<Coords> {
        let mut path = std::iter::successors(Some(goal), |&ix| {
            let parent = self.nodes[ix].parent;
            debug_assert!(parent.map_or(true, |p| self.nodes[p].g + 1 == self.nodes[ix].g));
            parent
        })
        .map(|ix| self.nodes[ix].coords)
        .collect::<Vec<_>>();
        path.reverse();
        path
    }
}

/// Computes a shortest 4-connected path from `start` to `goal`, both included.
///
/// Fails with [PathError::InvalidCoordinate] if either point is outside the grid, with
/// [PathError::GoalUnreachable] if the goal is blocked and with [PathError::StartBlocked] if the
/// start is blocked, all before any search is run. When `start == goal` the single-element path
/// is returned. The search stops as soon as the goal is first discovered.
pub fn find_path<G: Walkability + ?Sized>(
    grid: &G,
    start: Coords,
    goal: Coords,
) -> PathResult<Vec<Coords>> {
    grid.check_bounds(start)?;
    grid.check_bounds(goal)?;
    if !grid.is_walkable(goal) {
        return Err(PathError::GoalUnreachable(goal));
    }
    if !grid.is_walkable(start) {
        return Err(PathError::StartBlocked(start));
    }
    if start == goal {
        return Ok(vec![start]);
    }

    let mut search = Search::new(grid, goal);
    let (Some(start_ix), Some(goal_ix)) = (search.index_of(start), search.index_of(goal)) else {
        return Err(PathError::NoPath { start, goal });
    };
    if search.run(start_ix, goal_ix) {
        Ok(search.reconstruct(goal_ix))
    } else {
        Err(PathError::NoPath { start, goal })
    }
}

/// Number of unit steps along `path`.
pub fn path_cost(path: &[Coords]) -> usize {
    path.len().saturating_sub(1)
}

/// Checks that `path` is non-empty, stays on walkable cells and only makes orthogonal unit
/// steps.
pub fn is_valid_path<G: Walkability + ?Sized>(grid: &G, path: &[Coords]) -> bool {
    !path.is_empty()
        && path.iter().all(|&p| grid.is_walkable(p))
        && path.iter().tuple_windows().all(|(a, b)| a.is_adjacent(b))
}
