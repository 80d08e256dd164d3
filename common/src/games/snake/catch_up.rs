use std::time::Duration;

use chrono::TimeDelta;

use super::game_state::SnakeGameState;

/// Number of whole ticks that fit into `elapsed`.
pub fn owed_ticks(elapsed: TimeDelta, tick_period: Duration) -> u64 {
    let period_ms = tick_period.as_millis();
    if period_ms == 0 {
        return 0;
    }
    let elapsed_ms = elapsed.num_milliseconds().max(0) as u128;
    (elapsed_ms / period_ms).min(u64::MAX as u128) as u64
}

/// The states visited while replaying owed ticks, starting with the state the
/// replay was seeded from. Never empty; the last entry is authoritative.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Replay {
    states: Vec<SnakeGameState>,
}

impl Replay {
    pub(super) fn new(states: Vec<SnakeGameState>) -> Self {
        assert!(!states.is_empty(), "a replay always holds its seed state");
        Self { states }
    }

    pub fn states(&self) -> &[SnakeGameState] {
        &self.states
    }

    pub fn final_state(&self) -> &SnakeGameState {
        &self.states[self.states.len() - 1]
    }

    /// Transitions actually applied; smaller than the owed count when the game ended early.
    pub fn ticks_played(&self) -> usize {
        self.states.len() - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::games::snake::types::Point;

    #[test]
    fn test_owed_ticks_floors() {
        let period = Duration::from_millis(500);
        assert_eq!(owed_ticks(TimeDelta::milliseconds(0), period), 0);
        assert_eq!(owed_ticks(TimeDelta::milliseconds(499), period), 0);
        assert_eq!(owed_ticks(TimeDelta::milliseconds(500), period), 1);
        assert_eq!(owed_ticks(TimeDelta::milliseconds(1499), period), 2);
        assert_eq!(owed_ticks(TimeDelta::seconds(60), period), 120);
    }

    #[test]
    fn test_owed_ticks_clamps_negative_elapsed() {
        let period = Duration::from_millis(500);
        assert_eq!(owed_ticks(TimeDelta::milliseconds(-2000), period), 0);
    }

    #[test]
    fn test_owed_ticks_zero_period() {
        assert_eq!(owed_ticks(TimeDelta::seconds(10), Duration::ZERO), 0);
    }

    #[test]
    fn test_replay_final_state() {
        let a = SnakeGameState::new(vec![Point::new(1, 1)], Point::new(0, 0));
        let b = SnakeGameState::new(vec![Point::new(2, 1)], Point::new(0, 0));
        let replay = Replay::new(vec![a, b.clone()]);
        assert_eq!(replay.ticks_played(), 1);
        assert_eq!(replay.final_state(), &b);
    }
}
