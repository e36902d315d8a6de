use std::process::ExitCode;

use clap::Parser;
use quizstore::adapter::inbound::cli::command::Cli;
use quizstore::adapter::inbound::cli::dispatch;
use quizstore::adapter::inbound::cli::output::{self, OutputConfig};
use quizstore::infrastructure::config::settings::Config;
use tracing::debug;

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    output::configure(OutputConfig::new(cli.json, cli.quiet, cli.verbose));

    let mut config = if dispatch::needs_config(&cli.command) {
        match Config::load_or_default(&cli.config) {
            Ok(config) => config,
            Err(e) => {
                output::error(&format!("Failed to load config: {e}"));
                return ExitCode::FAILURE;
            }
        }
    } else {
        Config::default()
    };

    match cli.verbose {
        0 => {}
        1 => config.logging.level = "debug".into(),
        _ => config.logging.level = "trace".into(),
    }
    config.init_logging();
    debug!(config = %cli.config.display(), "quizstore starting");

    match dispatch::execute(&cli, &config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::error(&e.to_string());
            ExitCode::FAILURE
        }
    }
}
