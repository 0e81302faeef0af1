use block_pathfinding::{BlockMap, Coords, WalkStatus, Walker};

// Walks a token across a small map one block per tick, numbering the blocks it steps on.
// Run with RUST_LOG=debug to see the walker's log output.

fn main() {
    env_logger::init();
    let map: BlockMap = "\
        .....#..G
        .###.#.#.
        .#...#.#.
        .#.###.#.
        S#.....#.
    "
    .parse()
    .unwrap();
    println!("{}", map);

    let mut walker = Walker::spawn(&map, Coords::new(0, 0)).unwrap();
    if let Err(e) = walker.set_destination(&map, Coords::new(4, 8)) {
        println!("Path unavailable: {}", e);
        return;
    }
    while let Some(step) = walker.tick(&map) {
        match step.direction {
            Some(d) => println!("{:>3}: {} ({:?})", step.number, step.coords, d),
            None => println!("{:>3}: {}", step.number, step.coords),
        }
    }
    assert_eq!(walker.status(), &WalkStatus::Idle);

    // A blocked target leaves the token in place.
    if let Err(e) = walker.set_destination(&map, Coords::new(0, 1)) {
        println!("Path unavailable: {}", e);
    }
}
