pub const DEFAULT_CONFIG_FILE: &str = "snake_gif_server_config.yaml";
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:5000";
