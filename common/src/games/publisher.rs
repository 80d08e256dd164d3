use std::future::Future;

use crate::identifiers::{ChannelId, GameMessageId};
use crate::render::ANIMATION_FILE_NAME;
use super::snake::{CONTROL_LAYOUT, ControlLayout};

/// Message posted when a game starts: the first animation plus the arrow pad.
#[derive(Clone, Debug)]
pub struct GameMessage {
    pub content: String,
    pub file_name: String,
    pub animation: Vec<u8>,
    pub controls: ControlLayout,
}

impl GameMessage {
    pub fn new(animation: Vec<u8>) -> Self {
        Self {
            content: "Game".to_string(),
            file_name: ANIMATION_FILE_NAME.to_string(),
            animation,
            controls: CONTROL_LAYOUT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishError {
    UnknownMessage(GameMessageId),
    Transport(String),
}

impl std::fmt::Display for PublishError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PublishError::UnknownMessage(id) => write!(f, "Message {} does not exist", id),
            PublishError::Transport(e) => write!(f, "Transport error: {}", e),
        }
    }
}

impl std::error::Error for PublishError {}

/// Where game messages live. Implementations own delivery and retries.
pub trait GamePublisher: Send + Sync + Clone + 'static {
    fn publish(
        &self,
        channel_id: ChannelId,
        message: GameMessage,
    ) -> impl Future<Output = Result<GameMessageId, PublishError>> + Send;

    /// Replaces the attached animation of an already published message.
    fn update_animation(
        &self,
        message_id: &GameMessageId,
        animation: Vec<u8>,
    ) -> impl Future<Output = Result<(), PublishError>> + Send;
}
