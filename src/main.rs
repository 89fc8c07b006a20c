use clap::Parser;
use ctlaunch::cli::{Cli, CommandHandler, OutputFormat, FORMATTER};
use ctlaunch::infrastructure::LaunchConfig;
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => LaunchConfig::load_from(path),
        None => LaunchConfig::load(),
    };
    let config = match config {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", FORMATTER.format_error(&e, OutputFormat::Text));
            process::exit(1);
        }
    };

    // RUST_LOG 优先于配置文件中的日志级别
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let handler = CommandHandler::new(config);
    match handler.handle_command(cli.command) {
        Ok(output) => print!("{}", output),
        Err(e) => {
            eprintln!("{}", FORMATTER.format_error(&e, OutputFormat::Text));
            process::exit(1);
        }
    }
}
