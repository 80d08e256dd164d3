use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::config::GameConfig;
use crate::games::{PublishError, RandomSource, SessionRng};
use crate::identifiers::GameMessageId;
use crate::render::{AnimationEncoder, AnimationError, FrameRenderer};
use super::controls::ControlToken;
use super::engine::SnakeEngine;
use super::game_state::SnakeGameState;
use super::types::{Direction, RunStatus};

#[derive(Debug)]
pub enum SessionError {
    UnrecognizedControl(String),
    SessionNotFound(GameMessageId),
    Animation(AnimationError),
    Publish(PublishError),
}

impl std::fmt::Display for SessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionError::UnrecognizedControl(token) => {
                write!(f, "Unrecognized control '{}'", token)
            }
            SessionError::SessionNotFound(id) => write!(f, "No game is shown in message {}", id),
            SessionError::Animation(e) => write!(f, "{}", e),
            SessionError::Publish(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for SessionError {}

impl From<AnimationError> for SessionError {
    fn from(e: AnimationError) -> Self {
        SessionError::Animation(e)
    }
}

impl From<PublishError> for SessionError {
    fn from(e: PublishError) -> Self {
        SessionError::Publish(e)
    }
}

/// Result of one button press.
#[derive(Debug)]
pub struct PressOutcome {
    pub animation: Vec<u8>,
    pub ticks_played: usize,
    pub frames: usize,
    pub status: RunStatus,
    pub facing: Direction,
}

/// Everything one game needs between two button presses.
///
/// The current state is a value that gets swapped for the replay's final
/// state on every press; the facing and last event time are the only other
/// mutable pieces.
pub struct SnakeSession<R: RandomSource = SessionRng> {
    engine: SnakeEngine<R>,
    renderer: FrameRenderer,
    encoder: AnimationEncoder,
    tick_period: Duration,
    state: SnakeGameState,
    facing: Direction,
    last_event_time: DateTime<Utc>,
}

impl<R: RandomSource> SnakeSession<R> {
    /// Spawns a new game and renders its first frame.
    pub fn start(
        config: &GameConfig,
        rng: R,
        started_at: DateTime<Utc>,
    ) -> Result<(Self, Vec<u8>), SessionError> {
        let mut engine = SnakeEngine::new(config.field_size(), rng);
        let (state, facing) = engine.spawn();

        let session = Self {
            engine,
            renderer: FrameRenderer::from_config(config),
            encoder: AnimationEncoder::from_config(config),
            tick_period: config.tick_period(),
            state,
            facing,
            last_event_time: started_at,
        };
        let animation = session.animate(std::slice::from_ref(&session.state))?;
        Ok((session, animation))
    }

    pub fn state(&self) -> &SnakeGameState {
        &self.state
    }

    pub fn facing(&self) -> Direction {
        self.facing
    }

    pub fn last_event_time(&self) -> DateTime<Utc> {
        self.last_event_time
    }

    /// Plays the ticks owed since the previous event with the old facing, then
    /// turns the snake as requested. Every replayed tick becomes a frame.
    pub fn press(
        &mut self,
        token: ControlToken,
        pressed_at: DateTime<Utc>,
    ) -> Result<PressOutcome, SessionError> {
        let elapsed = pressed_at.signed_duration_since(self.last_event_time);
        self.last_event_time = self.last_event_time.max(pressed_at);

        let replay = self
            .engine
            .catch_up(self.state.clone(), self.facing, elapsed, self.tick_period);
        if let Some(direction) = token.direction() {
            self.facing = direction;
        }
        self.state = replay.final_state().clone();

        let frames = self.renderer.frame_window(replay.states()).len();
        let animation = self.animate(replay.states())?;
        Ok(PressOutcome {
            animation,
            ticks_played: replay.ticks_played(),
            frames,
            status: self.state.status(),
            facing: self.facing,
        })
    }

    fn animate(&self, states: &[SnakeGameState]) -> Result<Vec<u8>, SessionError> {
        let frames = self.renderer.render_all(states);
        Ok(self.encoder.encode(&frames)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::TimeDelta;
    use crate::games::ScriptedRng;
    use crate::games::snake::Point;
    use image::buffer::ConvertBuffer;
    use image::codecs::gif::GifDecoder;
    use image::{AnimationDecoder, RgbaImage};
    use std::io::Cursor;

    fn t0() -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).unwrap()
    }

    fn frame_count(bytes: &[u8]) -> usize {
        decoded_frames(bytes).len()
    }

    fn decoded_frames(bytes: &[u8]) -> Vec<RgbaImage> {
        GifDecoder::new(Cursor::new(bytes))
            .unwrap()
            .into_frames()
            .collect_frames()
            .unwrap()
            .into_iter()
            .map(|frame| frame.into_buffer())
            .collect()
    }

    // Head (6,3), food (0,0), facing Right.
    fn started() -> (SnakeSession<ScriptedRng>, Vec<u8>) {
        SnakeSession::start(&GameConfig::default(), ScriptedRng::new([0, 0, 0, 1]), t0()).unwrap()
    }

    #[test]
    fn test_start_renders_single_frame() {
        let (session, animation) = started();
        assert_eq!(session.state().head(), Point::new(6, 3));
        assert_eq!(session.state().food(), Point::new(0, 0));
        assert_eq!(session.facing(), Direction::Right);
        assert_eq!(session.last_event_time(), t0());
        assert_eq!(frame_count(&animation), 1);
    }

    #[test]
    fn test_quick_press_only_turns() {
        let (mut session, _) = started();
        let outcome = session
            .press(ControlToken::Down, t0() + TimeDelta::milliseconds(300))
            .unwrap();

        assert_eq!(outcome.ticks_played, 0);
        assert_eq!(outcome.frames, 1);
        assert_eq!(outcome.facing, Direction::Down);
        assert_eq!(session.state().head(), Point::new(6, 3));
        assert_eq!(frame_count(&outcome.animation), 1);
    }

    #[test]
    fn test_owed_ticks_use_previous_facing() {
        let (mut session, _) = started();
        let outcome = session
            .press(ControlToken::Down, t0() + TimeDelta::milliseconds(1600))
            .unwrap();

        assert_eq!(outcome.ticks_played, 3);
        assert_eq!(outcome.frames, 4);
        assert_eq!(session.state().head(), Point::new(9, 3));
        assert_eq!(session.facing(), Direction::Down);
        assert_eq!(frame_count(&outcome.animation), 4);

        let outcome = session
            .press(ControlToken::NoOp, t0() + TimeDelta::milliseconds(2600))
            .unwrap();
        assert_eq!(outcome.ticks_played, 2);
        assert_eq!(session.state().head(), Point::new(9, 5));
        assert_eq!(session.facing(), Direction::Down);
    }

    #[test]
    fn test_long_wait_ends_at_wall() {
        let (mut session, _) = started();
        let outcome = session
            .press(ControlToken::Up, t0() + TimeDelta::hours(2))
            .unwrap();

        // From x=6 moving right the wall is 19 ticks away on a 25 wide board.
        assert_eq!(outcome.ticks_played, 19);
        assert_eq!(outcome.status, RunStatus::Lost);
        assert_eq!(outcome.frames, 20);
        assert_eq!(session.state().head(), Point::new(24, 3));
    }

    #[test]
    fn test_wall_to_wall_run_keeps_latest_frames() {
        let config = GameConfig::default();
        let (mut session, _) = started();
        session.press(ControlToken::Left, t0()).unwrap();
        let outcome = session
            .press(ControlToken::Right, t0() + TimeDelta::milliseconds(3000))
            .unwrap();
        assert_eq!(outcome.ticks_played, 6);
        assert_eq!(session.state().head(), Point::new(0, 3));

        let outcome = session
            .press(ControlToken::NoOp, t0() + TimeDelta::hours(2))
            .unwrap();
        assert_eq!(outcome.ticks_played, 25);
        assert_eq!(outcome.status, RunStatus::Lost);
        assert_eq!(outcome.frames, 25);

        let frames = decoded_frames(&outcome.animation);
        assert_eq!(frames.len(), 25);
        let lost: RgbaImage = FrameRenderer::from_config(&config)
            .render(session.state())
            .convert();
        assert_eq!(frames[24], lost);
        assert_ne!(frames[23], lost);
    }

    #[test]
    fn test_oversized_frame_cap_is_held_to_longer_side() {
        let mut config = GameConfig::default();
        config.board.width = 8;
        config.board.height = 4;
        config.animation.max_frames = Some(100);

        // Head (2,1), food (0,0), facing Right.
        let (mut session, _) =
            SnakeSession::start(&config, ScriptedRng::new([0, 0, 0, 1]), t0()).unwrap();
        assert_eq!(session.state().head(), Point::new(2, 1));
        session.press(ControlToken::Left, t0()).unwrap();
        session
            .press(ControlToken::Right, t0() + TimeDelta::milliseconds(1000))
            .unwrap();
        assert_eq!(session.state().head(), Point::new(0, 1));

        let outcome = session
            .press(ControlToken::NoOp, t0() + TimeDelta::hours(1))
            .unwrap();
        assert_eq!(outcome.ticks_played, 8);
        assert_eq!(outcome.status, RunStatus::Lost);
        assert_eq!(outcome.frames, 8);
        assert_eq!(frame_count(&outcome.animation), 8);
    }

    #[test]
    fn test_press_after_game_over_changes_nothing() {
        let (mut session, _) = started();
        session.press(ControlToken::NoOp, t0() + TimeDelta::hours(1)).unwrap();
        let lost = session.state().clone();

        let outcome = session
            .press(ControlToken::Left, t0() + TimeDelta::hours(2))
            .unwrap();
        assert_eq!(outcome.ticks_played, 0);
        assert_eq!(session.state(), &lost);
    }

    #[test]
    fn test_out_of_order_event_does_not_rewind_clock() {
        let (mut session, _) = started();
        session.press(ControlToken::NoOp, t0() + TimeDelta::milliseconds(1000)).unwrap();
        let outcome = session
            .press(ControlToken::NoOp, t0() + TimeDelta::milliseconds(200))
            .unwrap();
        assert_eq!(outcome.ticks_played, 0);
        assert_eq!(session.last_event_time(), t0() + TimeDelta::milliseconds(1000));
    }
}
