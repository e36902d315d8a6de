//! Routes parsed commands to their handlers.

use std::sync::Arc;

use crate::adapter::inbound::cli::command::{Cli, Commands, ConfigCommand};
use crate::adapter::inbound::cli::{classes, config, key, questions, topics, watch};
use crate::application::catalog::QuizCatalog;
use crate::error::Result;
use crate::infrastructure::bootstrap::build_store;
use crate::infrastructure::config::settings::Config;

/// Whether the command runs against the loaded configuration.
///
/// `config init` and `config validate` work on the file itself and must run
/// even when it does not load.
#[must_use]
pub fn needs_config(command: &Commands) -> bool {
    !matches!(
        command,
        Commands::Config(ConfigCommand::Init { .. } | ConfigCommand::Validate)
    )
}

fn catalog(config: &Config) -> Result<QuizCatalog> {
    Ok(QuizCatalog::new(Arc::new(build_store(config)?)))
}

/// Run one CLI command with the effective configuration.
pub async fn execute(cli: &Cli, config: &Config) -> Result<()> {
    match &cli.command {
        Commands::Get(args) => key::get(&build_store(config)?, &args.key).await,
        Commands::Set(args) => key::set(&build_store(config)?, &args.key, &args.value).await,
        Commands::Remove(args) => key::remove(&build_store(config)?, &args.key).await,
        Commands::Exists(args) => key::exists(&build_store(config)?, &args.key).await,
        Commands::Watch(args) => watch::execute(&build_store(config)?, &args.key).await,
        Commands::Classes(command) => classes::execute(&catalog(config)?, command).await,
        Commands::Topics(command) => topics::execute(&catalog(config)?, command).await,
        Commands::Questions(command) => questions::execute(&catalog(config)?, command).await,
        Commands::Config(ConfigCommand::Init { force }) => {
            config::execute_init(&cli.config, *force)
        }
        Commands::Config(ConfigCommand::Show) => config::execute_show(&cli.config, config),
        Commands::Config(ConfigCommand::Validate) => config::execute_validate(&cli.config),
    }
}
