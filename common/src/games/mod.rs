mod publisher;
mod session_rng;

pub mod snake;

pub use publisher::{GameMessage, GamePublisher, PublishError};
pub use session_rng::{RandomSource, ScriptedRng, SessionRng};
