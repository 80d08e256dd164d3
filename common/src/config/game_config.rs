use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::games::snake::FieldSize;
use super::Validate;

/// Fixed board and animation constants, read once at startup.
#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct GameConfig {
    pub board: BoardConfig,
    pub animation: AnimationConfig,
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct BoardConfig {
    pub width: u32,
    pub height: u32,
    pub tick_period_ms: u32,
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct AnimationConfig {
    pub tile_size: u32,
    /// Defaults to the longer board side when unset.
    #[serde(default)]
    pub max_frames: Option<u32>,
    #[serde(default)]
    pub looping: bool,
}

impl GameConfig {
    pub fn field_size(&self) -> FieldSize {
        FieldSize::new(self.board.width as usize, self.board.height as usize)
    }

    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.board.tick_period_ms as u64)
    }

    /// Frame cap per animation, never above the longer board side.
    pub fn max_frames(&self) -> usize {
        let max_side = self.field_size().max_side();
        match self.animation.max_frames {
            Some(max_frames) => (max_frames as usize).min(max_side),
            None => max_side,
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board: BoardConfig {
                width: 25,
                height: 15,
                tick_period_ms: 500,
            },
            animation: AnimationConfig {
                tile_size: 10,
                max_frames: None,
                looping: false,
            },
        }
    }
}

impl Validate for GameConfig {
    fn validate(&self) -> Result<(), String> {
        self.board.validate()?;
        self.animation.validate()?;
        let max_side = self.field_size().max_side();
        if let Some(max_frames) = self.animation.max_frames
            && max_frames as usize > max_side
        {
            return Err(format!(
                "max_frames must not exceed the longer board side ({})",
                max_side
            ));
        }
        Ok(())
    }
}

impl Validate for BoardConfig {
    fn validate(&self) -> Result<(), String> {
        if self.width < 2 || self.width > 100 {
            return Err("Board width must be between 2 and 100".to_string());
        }
        if self.height < 2 || self.height > 100 {
            return Err("Board height must be between 2 and 100".to_string());
        }
        if self.tick_period_ms < 50 || self.tick_period_ms > 10_000 {
            return Err("Tick period must be between 50ms and 10000ms".to_string());
        }
        Ok(())
    }
}

impl Validate for AnimationConfig {
    fn validate(&self) -> Result<(), String> {
        if self.tile_size < 1 || self.tile_size > 64 {
            return Err("Tile size must be between 1 and 64 pixels".to_string());
        }
        if self.max_frames == Some(0) {
            return Err("max_frames must be at least 1".to_string());
        }
        Ok(())
    }
}
