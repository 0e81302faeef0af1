use core::fmt;
use std::str::FromStr;

use log::debug;
use petgraph::unionfind::UnionFind;

use crate::astar::Walkability;
use crate::coords::Coords;
use crate::error::{PathError, PathResult};
use crate::{DEFAULT_COLS, DEFAULT_ROWS};

/// [BlockMap] stores which blocks of a `rows` x `cols` map can be walked on and maintains
/// information about 4-connected components using a [UnionFind] structure, which answers
/// reachability queries without searching.
#[derive(Clone, Debug)]
pub struct BlockMap {
    rows: usize,
    cols: usize,
    walkable: Vec<bool>,
    pub components: UnionFind<usize>,
    pub components_dirty: bool,
}

impl Default for BlockMap {
    fn default() -> BlockMap {
        BlockMap::new(DEFAULT_ROWS, DEFAULT_COLS, true)
    }
}

impl BlockMap {
    /// Creates a map with every block set to `walkable`, components already generated.
    pub fn new(rows: usize, cols: usize, walkable: bool) -> BlockMap {
        let mut map = BlockMap {
            rows,
            cols,
            walkable: vec![walkable; rows * cols],
            components: UnionFind::new(rows * cols),
            components_dirty: false,
        };
        map.generate_components();
        map
    }

    fn get_ix(&self, coords: Coords) -> usize {
        coords.row as usize * self.cols + coords.col as usize
    }

    /// Changes a single block. Joins newly connected components eagerly and flags the
    /// components as dirty if they are (potentially) broken apart into multiple.
    pub fn set_walkable(&mut self, coords: Coords, walkable: bool) -> PathResult<()> {
        self.check_bounds(coords)?;
        let ix = self.get_ix(coords);
        if self.walkable[ix] && !walkable {
            self.components_dirty = true;
        } else if walkable {
            for n in coords.neumann_neighbourhood() {
                if self.is_walkable(n) {
                    let n_ix = self.get_ix(n);
                    self.components.union(ix, n_ix);
                }
            }
        }
        self.walkable[ix] = walkable;
        Ok(())
    }

    /// Resets every block to `walkable`.
    pub fn clear(&mut self, walkable: bool) {
        self.walkable.fill(walkable);
        self.generate_components();
    }

    /// All walkable blocks, ordered by row and then column.
    pub fn walkable_cells(&self) -> impl Iterator<Item = Coords> + '_ {
        self.walkable
            .iter()
            .enumerate()
            .filter(|(_, w)| **w)
            .map(|(ix, _)| Coords::new((ix / self.cols) as i32, (ix % self.cols) as i32))
    }

    /// Regenerates the components if they are marked as dirty.
    pub fn update(&mut self) {
        if self.components_dirty {
            self.generate_components();
        }
    }

    /// Generates a new [UnionFind] structure and links up walkable neighbours to the same
    /// components.
    pub fn generate_components(&mut self) {
        debug!("Generating components for {}x{} map", self.rows, self.cols);
        self.components = UnionFind::new(self.rows * self.cols);
        self.components_dirty = false;
        for row in 0..self.rows as i32 {
            for col in 0..self.cols as i32 {
                let p = Coords::new(row, col);
                if !self.is_walkable(p) {
                    continue;
                }
                let p_ix = self.get_ix(p);
                // Up and right suffice, the other two links are made from the neighbour.
                for n in [Coords::new(row + 1, col), Coords::new(row, col + 1)] {
                    if self.is_walkable(n) {
                        let n_ix = self.get_ix(n);
                        self.components.union(p_ix, n_ix);
                    }
                }
            }
        }
    }

    /// Retrieves the component id a given in-bounds block belongs to.
    pub fn get_component(&self, coords: Coords) -> usize {
        self.components.find(self.get_ix(coords))
    }

    /// Checks if both blocks are walkable and on the same component. Only reliable while the
    /// components are not dirty, see [update](Self::update).
    pub fn reachable(&self, start: Coords, goal: Coords) -> bool {
        self.is_walkable(start)
            && self.is_walkable(goal)
            && self
                .components
                .equiv(self.get_ix(start), self.get_ix(goal))
    }

    pub fn unreachable(&self, start: Coords, goal: Coords) -> bool {
        !self.reachable(start, goal)
    }
}

impl Walkability for BlockMap {
    fn rows(&self) -> usize {
        self.rows
    }
    fn cols(&self) -> usize {
        self.cols
    }
    fn walkable_at(&self, row: usize, col: usize) -> bool {
        self.walkable[row * self.cols + col]
    }
}

/// Prints `.` for walkable and `#` for blocked blocks, highest row first.
impl fmt::Display for BlockMap {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in (0..self.rows).rev() {
            let line = (0..self.cols)
                .map(|col| if self.walkable_at(row, col) { '.' } else { '#' })
                .collect::<String>();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

/// Parses the [Display] form. `S` and `G` are accepted as walkable markers.
impl FromStr for BlockMap {
    type Err = PathError;

    fn from_str(s: &str) -> PathResult<BlockMap> {
        let lines = s
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>();
        let rows = lines.len();
        let cols = lines.first().map_or(0, |line| line.chars().count());
        if rows == 0 || cols == 0 {
            return Err(PathError::MalformedMap("map is empty".to_owned()));
        }
        let mut map = BlockMap::new(rows, cols, true);
        for (i, line) in lines.iter().enumerate() {
            let row = rows - 1 - i;
            if line.chars().count() != cols {
                return Err(PathError::MalformedMap(format!(
                    "line {} has {} blocks, expected {}",
                    i + 1,
                    line.chars().count(),
                    cols
                )));
            }
            for (col, c) in line.chars().enumerate() {
                map.walkable[row * cols + col] = match c {
                    '.' | 'S' | 'G' => true,
                    '#' => false,
                    other => {
                        return Err(PathError::MalformedMap(format!(
                            "unexpected block {:?} on line {}",
                            other,
                            i + 1
                        )))
                    }
                };
            }
        }
        map.generate_components();
        Ok(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Tests whether blocks are correctly mapped to different connected components
    #[test]
    fn test_component_generation() {
        //  ___
        // | # |
        // | # |
        //  ___
        let map: BlockMap = "\
            .#.
            .#.
        "
        .parse()
        .unwrap();
        let p1 = Coords::new(0, 0);
        let p2 = Coords::new(1, 1);
        let p3 = Coords::new(1, 0);
        let p4 = Coords::new(0, 2);
        assert_ne!(map.get_component(p1), map.get_component(p2));
        assert_eq!(map.get_component(p1), map.get_component(p3));
        assert_ne!(map.get_component(p1), map.get_component(p4));
        assert!(map.reachable(p1, p3));
        assert!(map.unreachable(p1, p2));
        assert!(map.unreachable(p1, p4));
    }

    /// Diagonally touching blocks are not connected on a 4-grid.
    #[test]
    fn diagonal_is_not_reachable() {
        //  __
        // |.#|
        // |#.|
        //  __
        let mut map = BlockMap::new(2, 2, false);
        map.set_walkable(Coords::new(0, 1), true).unwrap();
        map.set_walkable(Coords::new(1, 0), true).unwrap();
        assert!(map.unreachable(Coords::new(0, 1), Coords::new(1, 0)));
        map.set_walkable(Coords::new(1, 1), true).unwrap();
        assert!(!map.components_dirty);
        assert!(map.reachable(Coords::new(0, 1), Coords::new(1, 0)));
    }

    #[test]
    fn blocking_marks_components_dirty() {
        let mut map = BlockMap::new(3, 3, true);
        let start = Coords::new(0, 0);
        let goal = Coords::new(2, 2);
        for col in 0..3 {
            map.set_walkable(Coords::new(1, col), false).unwrap();
        }
        assert!(map.components_dirty);
        map.update();
        assert!(!map.components_dirty);
        assert!(map.unreachable(start, goal));
        assert_eq!(
            map.find_path(start, goal),
            Err(PathError::NoPath { start, goal })
        );
        map.clear(true);
        assert!(map.reachable(start, goal));
    }

    #[test]
    fn out_of_bounds() {
        let mut map = BlockMap::new(2, 3, true);
        assert!(!map.in_bounds(Coords::new(2, 0)));
        assert!(!map.is_walkable(Coords::new(0, 3)));
        assert_eq!(
            map.set_walkable(Coords::new(-1, 0), false),
            Err(PathError::InvalidCoordinate {
                coords: Coords::new(-1, 0),
                rows: 2,
                cols: 3
            })
        );
        assert!(map.unreachable(Coords::new(0, 0), Coords::new(5, 5)));
    }

    #[test]
    fn default_dimensions() {
        let map = BlockMap::default();
        assert_eq!((map.rows(), map.cols()), (DEFAULT_ROWS, DEFAULT_COLS));
        assert_eq!(map.walkable_cells().count(), DEFAULT_ROWS * DEFAULT_COLS);
    }

    #[test]
    fn parse_top_row_first() {
        let text = "G..\n.#.\nS..\n";
        let map: BlockMap = text.parse().unwrap();
        assert_eq!((map.rows(), map.cols()), (3, 3));
        assert!(!map.is_walkable(Coords::new(1, 1)));
        assert_eq!(map.walkable_cells().count(), 8);
        assert_eq!(map.to_string(), "...\n.#.\n...\n");

        let map: BlockMap = "##.\n...\n".parse().unwrap();
        assert!(!map.is_walkable(Coords::new(1, 0)));
        assert!(map.is_walkable(Coords::new(0, 0)));
        assert_eq!(map.to_string(), "##.\n...\n");
        assert_eq!(
            map.walkable_cells().collect::<Vec<_>>(),
            vec![
                Coords::new(0, 0),
                Coords::new(0, 1),
                Coords::new(0, 2),
                Coords::new(1, 2)
            ]
        );
    }

    #[test]
    fn parse_errors() {
        assert!(matches!(
            "".parse::<BlockMap>(),
            Err(PathError::MalformedMap(_))
        ));
        assert!(matches!(
            "...\n..\n".parse::<BlockMap>(),
            Err(PathError::MalformedMap(_))
        ));
        assert!(matches!(
            "..x\n".parse::<BlockMap>(),
            Err(PathError::MalformedMap(_))
        ));
    }

    #[test]
    fn path_on_parsed_map() {
        let map: BlockMap = "\
            ...G
            .##.
            S...
        "
        .parse()
        .unwrap();
        let path = map.find_path(Coords::new(0, 0), Coords::new(2, 3)).unwrap();
        assert_eq!(path.len(), 6);
        assert!(crate::is_valid_path(&map, &path));
    }
}
