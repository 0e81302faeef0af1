use core::fmt;
use std::ops::Add;

/// One of the four orthogonal moves on the grid. Up increases the row index and right increases
/// the column index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    /// The order in which neighbours are expanded during a search.
    pub const SEARCH_ORDER: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    /// (row, col) delta of a single step in this direction.
    pub fn offset(self) -> (i32, i32) {
        match self {
            Direction::Up => (1, 0),
            Direction::Right => (0, 1),
            Direction::Down => (-1, 0),
            Direction::Left => (0, -1),
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Right => Direction::Left,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
        }
    }
}

/// A cell position, indexed by row and column.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coords {
    pub row: i32,
    pub col: i32,
}

impl Coords {
    pub const fn new(row: i32, col: i32) -> Coords {
        Coords { row, col }
    }

    pub fn manhattan_distance(&self, other: &Coords) -> i32 {
        (self.row - other.row).abs() + (self.col - other.col).abs()
    }

    pub fn neighbour(&self, direction: Direction) -> Coords {
        *self + direction
    }

    /// The four orthogonal neighbours in [Direction::SEARCH_ORDER]. Bounds are not checked.
    pub fn neumann_neighbourhood(&self) -> [Coords; 4] {
        Direction::SEARCH_ORDER.map(|d| self.neighbour(d))
    }

    /// The direction leading from `self` to `other` if they are orthogonally adjacent.
    pub fn direction_to(&self, other: &Coords) -> Option<Direction> {
        Direction::SEARCH_ORDER
            .into_iter()
            .find(|&d| self.neighbour(d) == *other)
    }

    pub fn is_adjacent(&self, other: &Coords) -> bool {
        self.manhattan_distance(other) == 1
    }
}

impl Add<Direction> for Coords {
    type Output = Coords;

    fn add(self, direction: Direction) -> Coords {
        let (d_row, d_col) = direction.offset();
        Coords::new(self.row + d_row, self.col + d_col)
    }
}

impl From<(i32, i32)> for Coords {
    fn from((row, col): (i32, i32)) -> Coords {
        Coords::new(row, col)
    }
}

impl fmt::Display for Coords {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}
