use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

use crate::config::GameConfig;
use crate::games::{GameMessage, GamePublisher, SessionRng};
use crate::identifiers::{ChannelId, GameMessageId};
use crate::log;
use super::controls::ControlToken;
use super::game_state::SnakeGameState;
use super::session::{SessionError, SnakeSession};
use super::types::{Direction, RunStatus};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PressSummary {
    pub ticks_played: usize,
    pub frames: usize,
    pub status: RunStatus,
    pub facing: Direction,
    pub published: bool,
}

/// Live games, keyed by the message each one is displayed in.
#[derive(Clone)]
pub struct SnakeGameManager<P: GamePublisher> {
    config: GameConfig,
    publisher: P,
    sessions: Arc<Mutex<HashMap<GameMessageId, Arc<Mutex<SnakeSession>>>>>,
}

impl<P: GamePublisher> SnakeGameManager<P> {
    pub fn new(config: GameConfig, publisher: P) -> Self {
        Self {
            config,
            publisher,
            sessions: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub async fn start_game(
        &self,
        channel_id: ChannelId,
        started_at: DateTime<Utc>,
    ) -> Result<GameMessageId, SessionError> {
        let rng = SessionRng::from_random();
        let seed = rng.seed();
        let (session, animation) = SnakeSession::start(&self.config, rng, started_at)?;
        let head = session.state().head();
        let facing = session.facing();

        let message_id = self
            .publisher
            .publish(channel_id, GameMessage::new(animation))
            .await?;

        self.sessions
            .lock()
            .await
            .insert(message_id, Arc::new(Mutex::new(session)));

        log!(
            "[game:{}] Started (seed {}), head at ({}, {}) facing {:?}",
            message_id,
            seed,
            head.x,
            head.y,
            facing
        );
        Ok(message_id)
    }

    /// Handles one button press. Presses for the same game are processed one
    /// at a time. The new state is kept even if updating the message fails.
    pub async fn press_button(
        &self,
        message_id: &GameMessageId,
        token: &str,
        pressed_at: DateTime<Utc>,
    ) -> Result<PressSummary, SessionError> {
        let token: ControlToken = token.parse().map_err(SessionError::UnrecognizedControl)?;

        let session = self
            .sessions
            .lock()
            .await
            .get(message_id)
            .cloned()
            .ok_or(SessionError::SessionNotFound(*message_id))?;
        let mut session = session.lock().await;

        let outcome = session.press(token, pressed_at)?;
        log!(
            "[game:{}] {} pressed, played {} tick(s), now {:?} facing {:?}",
            message_id,
            token.id(),
            outcome.ticks_played,
            outcome.status,
            outcome.facing
        );

        let published = match self
            .publisher
            .update_animation(message_id, outcome.animation)
            .await
        {
            Ok(()) => true,
            Err(e) => {
                log!("[game:{}] Failed to update animation: {}", message_id, e);
                false
            }
        };

        Ok(PressSummary {
            ticks_played: outcome.ticks_played,
            frames: outcome.frames,
            status: outcome.status,
            facing: outcome.facing,
            published,
        })
    }

    pub async fn snapshot(
        &self,
        message_id: &GameMessageId,
    ) -> Option<(SnakeGameState, Direction)> {
        let session = self.sessions.lock().await.get(message_id).cloned()?;
        let session = session.lock().await;
        Some((session.state().clone(), session.facing()))
    }

    pub async fn session_count(&self) -> usize {
        self.sessions.lock().await.len()
    }
}
