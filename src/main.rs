mod cli;
use cli::{CliMode, parse_cli_mode, run_print_mode, USAGE};
mod tui;
use tui::run_tui;

use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    setup_logging();

    let cli_mode = match parse_cli_mode() {
        Ok(mode) => mode,
        Err(err) => {
            eprintln!("Error: {}", err);
            println!("{}", USAGE);
            return Ok(());
        }
    };

    let result = match cli_mode {
        CliMode::Print(request) => run_print_mode(request).await,
        CliMode::Interactive { sample } => run_tui(sample).await,
    };

    if let Err(e) = &result {
        tracing::error!("mandarina failed: {:#}", e);
    }
    result
}

fn setup_logging() {
    let log_dir = mandarina::storage::config::config_dir();

    std::fs::create_dir_all(&log_dir).ok();

    let file_appender = tracing_appender::rolling::daily(log_dir, "mandarina.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(false)
        .init();

    std::mem::forget(_guard);

    tracing::info!("mandarina started");
}
