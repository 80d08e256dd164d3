mod animation;
mod canvas;
mod frame_renderer;

pub use animation::{ANIMATION_FILE_NAME, AnimationEncoder, AnimationError};
pub use canvas::Canvas;
pub use frame_renderer::{
    BACKGROUND_COLOR, BODY_COLOR, FOOD_COLOR, FrameRenderer, HEAD_COLOR, LOST_CAPTION,
    LOST_CAPTION_COLOR, WON_CAPTION, WON_CAPTION_COLOR,
};
