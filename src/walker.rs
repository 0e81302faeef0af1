use std::collections::VecDeque;

use log::{debug, warn};

use crate::astar::{find_path, path_cost, Walkability};
use crate::coords::{Coords, Direction};
use crate::error::{PathError, PathResult};

/// What the walker is doing, as shown to the player.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WalkStatus {
    Idle,
    Walking,
    /// The last destination could not be pathed to.
    Unavailable(PathError),
    /// A block on the route stopped being walkable before it was reached.
    Blocked(Coords),
}

/// One tick of movement along a route. `number` counts from 1, the first step being the start
/// block itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PathStep {
    pub coords: Coords,
    pub number: usize,
    pub direction: Option<Direction>,
}

/// Moves a player token over a map, either along a computed route one block per tick or by
/// single manual steps.
#[derive(Clone, Debug)]
pub struct Walker {
    position: Coords,
    destination: Option<Coords>,
    route: VecDeque<Coords>,
    steps_taken: usize,
    status: WalkStatus,
}

impl Walker {
    /// Places the walker on a walkable block.
    pub fn spawn<G: Walkability + ?Sized>(map: &G, at: Coords) -> PathResult<Walker> {
        map.check_bounds(at)?;
        if !map.is_walkable(at) {
            return Err(PathError::StartBlocked(at));
        }
        Ok(Walker {
            position: at,
            destination: None,
            route: VecDeque::new(),
            steps_taken: 0,
            status: WalkStatus::Idle,
        })
    }

    pub fn position(&self) -> Coords {
        self.position
    }

    pub fn destination(&self) -> Option<Coords> {
        self.destination
    }

    pub fn status(&self) -> &WalkStatus {
        &self.status
    }

    /// Number of route blocks not yet stepped on.
    pub fn remaining(&self) -> usize {
        self.route.len()
    }

    pub fn is_walking(&self) -> bool {
        self.status == WalkStatus::Walking
    }

    /// Computes a route to `destination`, replacing any route in progress. Choosing the
    /// current position does nothing.
    pub fn set_destination<G: Walkability + ?Sized>(
        &mut self,
        map: &G,
        destination: Coords,
    ) -> PathResult<()> {
        if destination == self.position {
            return Ok(());
        }
        self.destination = Some(destination);
        self.route.clear();
        self.steps_taken = 0;
        match find_path(map, self.position, destination) {
            Ok(path) => {
                debug!(
                    "Walking {} blocks from {} to {}",
                    path_cost(&path),
                    self.position,
                    destination
                );
                self.route = path.into();
                self.status = WalkStatus::Walking;
                Ok(())
            }
            Err(e) => {
                debug!("Path unavailable: {}", e);
                self.status = WalkStatus::Unavailable(e.clone());
                Err(e)
            }
        }
    }

    /// Advances one block along the route. Returns [None] when there is nothing to walk.
    pub fn tick<G: Walkability + ?Sized>(&mut self, map: &G) -> Option<PathStep> {
        if !self.is_walking() {
            return None;
        }
        let Some(next) = self.route.pop_front() else {
            self.status = WalkStatus::Idle;
            return None;
        };
        if !map.is_walkable(next) {
            warn!("Route block {} is no longer walkable, stopping", next);
            self.route.clear();
            self.status = if self.destination == Some(next) {
                WalkStatus::Unavailable(PathError::GoalUnreachable(next))
            } else {
                WalkStatus::Blocked(next)
            };
            return None;
        }
        let direction = self.position.direction_to(&next);
        self.position = next;
        self.steps_taken += 1;
        if self.route.is_empty() {
            debug!("Arrived at {}", next);
            self.status = WalkStatus::Idle;
        }
        Some(PathStep {
            coords: next,
            number: self.steps_taken,
            direction,
        })
    }

    /// Ticks until the route is exhausted or interrupted.
    pub fn walk_to_end<G: Walkability + ?Sized>(&mut self, map: &G) -> Vec<PathStep> {
        std::iter::from_fn(|| self.tick(map)).collect()
    }

    /// Moves one block in `direction`. Ignored while a route is being walked or when the
    /// target block is outside the map or blocked.
    pub fn step<G: Walkability + ?Sized>(&mut self, map: &G, direction: Direction) -> bool {
        if self.is_walking() {
            return false;
        }
        let target = self.position + direction;
        if !map.is_walkable(target) {
            return false;
        }
        self.position = target;
        true
    }

    /// Drops any route and status and places the walker at `at`.
    pub fn reset<G: Walkability + ?Sized>(&mut self, map: &G, at: Coords) -> PathResult<()> {
        *self = Walker::spawn(map, at)?;
        Ok(())
    }
}
