use std::time::Instant;

use super::position::Position;
use super::spring::{AnimatedValue, Progress, SpringConfig};

/// A 2D offset animated as two independent springs
#[derive(Debug, Clone, PartialEq)]
pub struct AnimatedXY {
    x: AnimatedValue,
    y: AnimatedValue,
}

impl AnimatedXY {
    pub fn new(position: Position) -> Self {
        Self {
            x: AnimatedValue::new(position.x),
            y: AnimatedValue::new(position.y),
        }
    }

    pub fn position(&self) -> Position {
        Position::new(self.x.value(), self.y.value())
    }

    pub fn is_animating(&self) -> bool {
        self.x.is_animating() || self.y.is_animating()
    }

    pub fn animate_to(
        &mut self,
        to: Position,
        config: SpringConfig,
        now: Instant,
        generation: u64,
    ) {
        self.x.animate_to(to.x, config, now, generation);
        self.y.animate_to(to.y, config, now, generation);
    }

    pub fn set_position(&mut self, position: Position) {
        self.x.set_value(position.x);
        self.y.set_value(position.y);
    }

    /// Progress of the x and y axes, in that order
    pub fn advance(&mut self, now: Instant) -> [Progress; 2] {
        [self.x.advance(now), self.y.advance(now)]
    }
}

/// Fan-in over the members of one transition
///
/// Each member reports its own completion; the group completes once every
/// member has reported for the group's generation. Reports from other
/// generations are ignored so a superseded transition can never complete
/// the group that replaced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parallel {
    generation: u64,
    done: Vec<bool>,
    completed: bool,
}

impl Parallel {
    pub fn new(generation: u64, members: usize) -> Self {
        Self {
            generation,
            done: vec![false; members],
            completed: members == 0,
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_complete(&self) -> bool {
        self.completed
    }

    /// Record member progress. Returns true exactly once, when the last
    /// member finishes.
    pub fn report(&mut self, member: usize, progress: Progress) -> bool {
        if self.completed {
            return false;
        }
        if let Progress::Finished { generation } = progress {
            if generation == self.generation {
                if let Some(done) = self.done.get_mut(member) {
                    *done = true;
                }
            }
        }
        if self.done.iter().all(|done| *done) {
            self.completed = true;
            return true;
        }
        false
    }
}
