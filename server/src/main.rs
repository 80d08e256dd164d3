mod message_board;
mod server_config;
mod web_server;

use clap::Parser;
use common::config::{ConfigLoader, GameConfig};
use common::{log, logger};
use server_config::{DEFAULT_BIND_ADDRESS, DEFAULT_CONFIG_FILE};
use web_server::{WebServerState, run_web_server};

#[derive(Parser)]
#[command(name = "snake_gif_server")]
struct Args {
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    config: String,

    #[arg(long, default_value = DEFAULT_BIND_ADDRESS)]
    bind: String,

    #[arg(long)]
    use_log_prefix: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let prefix = if args.use_log_prefix {
        Some("Server".to_string())
    } else {
        None
    };
    logger::init_logger(prefix);

    let config: GameConfig = ConfigLoader::new(&args.config).load()?;
    log!(
        "Loaded config from {}: {}x{} board, {}ms ticks, up to {} frames",
        args.config,
        config.board.width,
        config.board.height,
        config.board.tick_period_ms,
        config.max_frames()
    );

    run_web_server(WebServerState::new(config), &args.bind).await?;

    log!("Server shut down gracefully");
    Ok(())
}
