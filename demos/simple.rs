use block_pathfinding::{BlockMap, Coords, Walkability};

// In this example a path is found on a 3x3 map with shape
//  ___
// |  E|
// | # |
// |S  |
//  ___
// where
// - # marks a block that cannot be entered
// - S marks the start
// - E marks the end
//
// Rows grow upwards, so S is (0, 0) and E is (2, 2).

fn main() {
    let mut map = BlockMap::new(3, 3, true);
    map.set_walkable(Coords::new(1, 1), false).unwrap();
    println!("{}", map);
    let start = Coords::new(0, 0);
    let end = Coords::new(2, 2);
    let path = map.find_path(start, end).unwrap();
    println!("Path:");
    for p in path {
        println!("{}", p);
    }
}
