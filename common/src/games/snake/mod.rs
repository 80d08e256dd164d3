mod catch_up;
mod controls;
mod engine;
mod food;
mod game_state;
mod manager;
mod session;
mod types;

pub use catch_up::{Replay, owed_ticks};
pub use controls::{CONTROL_LAYOUT, ControlLayout, ControlToken};
pub use engine::SnakeEngine;
pub use food::{CachedFood, FoodPlacer, random_free_cell};
pub use game_state::SnakeGameState;
pub use manager::{PressSummary, SnakeGameManager};
pub use session::{PressOutcome, SessionError, SnakeSession};
pub use types::{Direction, FieldSize, Point, RunStatus};
