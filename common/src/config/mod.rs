mod config_loader;
mod game_config;
mod validate;

pub use config_loader::{ConfigError, ConfigLoader};
pub use game_config::{AnimationConfig, BoardConfig, GameConfig};
pub use validate::Validate;
