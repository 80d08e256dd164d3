use std::ops::Range;
use std::time::Duration;

use chrono::TimeDelta;

use crate::games::{RandomSource, SessionRng};
use super::catch_up::{Replay, owed_ticks};
use super::food::{FoodPlacer, random_free_cell};
use super::game_state::SnakeGameState;
use super::types::{Direction, FieldSize, Point};

/// Rules of one game: the field, its food placement cache and its random source.
pub struct SnakeEngine<R: RandomSource = SessionRng> {
    field: FieldSize,
    food_placer: FoodPlacer,
    rng: R,
}

impl<R: RandomSource> SnakeEngine<R> {
    pub fn new(field: FieldSize, rng: R) -> Self {
        Self {
            field,
            food_placer: FoodPlacer::new(),
            rng,
        }
    }

    pub fn field(&self) -> &FieldSize {
        &self.field
    }

    /// Fresh single-segment snake near the middle of the field plus a random
    /// starting direction.
    pub fn spawn(&mut self) -> (SnakeGameState, Direction) {
        let x = self.rng.random_range(middle_half(self.field.width));
        let y = self.rng.random_range(middle_half(self.field.height));
        let head = Point::new(x as i32, y as i32);
        let food = random_free_cell(&self.field, &[head], &mut self.rng);
        let direction = Direction::ALL[self.rng.random_range(0..Direction::ALL.len())];
        (SnakeGameState::new(vec![head], food), direction)
    }

    pub fn transition(&mut self, state: &SnakeGameState, direction: Direction) -> SnakeGameState {
        state.next(direction, &self.field, &mut self.food_placer, &mut self.rng)
    }

    /// Plays up to `turns` ticks in a fixed direction, stopping right after the
    /// first tick that ends the game.
    pub fn play_turns(
        &mut self,
        state: SnakeGameState,
        direction: Direction,
        turns: u64,
    ) -> Replay {
        let mut states = vec![state];
        let mut played = 0;
        // Without wraparound a straight run hits a wall within max_side ticks,
        // so this loop stays short even for a huge owed count.
        while played < turns {
            let current = &states[states.len() - 1];
            if current.status().is_terminal() {
                break;
            }
            let next = self.transition(current, direction);
            states.push(next);
            played += 1;
        }
        Replay::new(states)
    }

    pub fn catch_up(
        &mut self,
        state: SnakeGameState,
        direction: Direction,
        elapsed: TimeDelta,
        tick_period: Duration,
    ) -> Replay {
        let turns = owed_ticks(elapsed, tick_period);
        self.play_turns(state, direction, turns)
    }
}

/// `[len/4, 3*(len/4))`, or the whole axis when that is empty.
fn middle_half(len: usize) -> Range<usize> {
    let quarter = len / 4;
    if quarter * 3 > quarter {
        quarter..quarter * 3
    } else {
        0..len
    }
}
