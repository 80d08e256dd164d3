use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use common::games::snake::ControlLayout;
use common::games::{GameMessage, GamePublisher, PublishError};
use common::{ChannelId, GameMessageId, MessageId};
use tokio::sync::Mutex;

#[derive(Clone, Debug)]
pub struct StoredMessage {
    pub content: String,
    pub file_name: String,
    pub animation: Vec<u8>,
    pub controls: ControlLayout,
    pub revision: u32,
}

/// In-memory stand-in for a chat channel: keeps every published game message
/// and its latest animation.
#[derive(Clone, Default)]
pub struct MessageBoard {
    messages: Arc<Mutex<HashMap<GameMessageId, StoredMessage>>>,
    next_message_id: Arc<AtomicU64>,
}

impl MessageBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, message_id: &GameMessageId) -> Option<StoredMessage> {
        self.messages.lock().await.get(message_id).cloned()
    }
}

impl GamePublisher for MessageBoard {
    async fn publish(
        &self,
        channel_id: ChannelId,
        message: GameMessage,
    ) -> Result<GameMessageId, PublishError> {
        let message_id = MessageId::new(self.next_message_id.fetch_add(1, Ordering::SeqCst) + 1);
        let id = GameMessageId::new(channel_id, message_id);
        let stored = StoredMessage {
            content: message.content,
            file_name: message.file_name,
            animation: message.animation,
            controls: message.controls,
            revision: 0,
        };
        self.messages.lock().await.insert(id, stored);
        Ok(id)
    }

    async fn update_animation(
        &self,
        message_id: &GameMessageId,
        animation: Vec<u8>,
    ) -> Result<(), PublishError> {
        let mut messages = self.messages.lock().await;
        let stored = messages
            .get_mut(message_id)
            .ok_or(PublishError::UnknownMessage(*message_id))?;
        stored.animation = animation;
        stored.revision += 1;
        Ok(())
    }
}
