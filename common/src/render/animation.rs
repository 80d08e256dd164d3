use std::time::Duration;

use image::buffer::ConvertBuffer;
use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, Frame, ImageError, RgbImage, RgbaImage};

use crate::config::GameConfig;

pub const ANIMATION_FILE_NAME: &str = "game.gif";

#[derive(Debug)]
pub enum AnimationError {
    NoFrames,
    Image(ImageError),
}

impl std::fmt::Display for AnimationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnimationError::NoFrames => write!(f, "Animation needs at least one frame"),
            AnimationError::Image(e) => write!(f, "GIF encoding failed: {}", e),
        }
    }
}

impl std::error::Error for AnimationError {}

impl From<ImageError> for AnimationError {
    fn from(e: ImageError) -> Self {
        AnimationError::Image(e)
    }
}

/// Packs frames into a single GIF shown at a fixed pace.
#[derive(Clone, Debug)]
pub struct AnimationEncoder {
    frame_delay: Duration,
    looping: bool,
}

impl AnimationEncoder {
    pub fn new(frame_delay: Duration, looping: bool) -> Self {
        Self {
            frame_delay,
            looping,
        }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.tick_period(), config.animation.looping)
    }

    /// Without looping no repeat extension is written, so viewers play the
    /// frames once and stay on the last one.
    pub fn encode(&self, frames: &[RgbImage]) -> Result<Vec<u8>, AnimationError> {
        if frames.is_empty() {
            return Err(AnimationError::NoFrames);
        }

        let mut bytes = Vec::with_capacity(32 * 1024);
        {
            let mut encoder = GifEncoder::new(&mut bytes);
            if self.looping {
                encoder.set_repeat(Repeat::Infinite)?;
            }
            let delay = Delay::from_saturating_duration(self.frame_delay);
            for frame in frames {
                let rgba: RgbaImage = frame.convert();
                encoder.encode_frame(Frame::from_parts(rgba, 0, 0, delay))?;
            }
        }
        Ok(bytes)
    }
}
