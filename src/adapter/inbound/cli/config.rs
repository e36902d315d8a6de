//! Handler for the `config` command group.

use std::fs;
use std::path::Path;

use serde_json::json;

use crate::adapter::inbound::cli::output;
use crate::error::{ConfigError, Result};
use crate::infrastructure::config::local::LocalBackend;
use crate::infrastructure::config::settings::Config;

/// Default config template with documentation.
const CONFIG_TEMPLATE: &str = include_str!("../../../../quizstore.toml.example");

/// Execute `config init`.
pub fn execute_init(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(ConfigError::InvalidValue {
            field: "config",
            reason: "file already exists (use --force to overwrite)".to_string(),
        }
        .into());
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    fs::write(path, CONFIG_TEMPLATE)?;
    output::section("Config Initialized");
    output::report(
        "config.init",
        json!({ "path": path.display().to_string() }),
        "Created configuration file",
    );
    output::field("Path", path.display());
    output::section("Next Steps");
    output::note(&format!("1. Edit {} with your settings", path.display()));
    output::note("2. Set FIREBASE_DATABASE_URL and FIREBASE_AUTH_TOKEN to use the remote database");
    output::note(&format!(
        "3. Run: quizstore config validate -c {}",
        path.display()
    ));
    Ok(())
}

/// Execute `config show`.
pub fn execute_show(path: &Path, config: &Config) -> Result<()> {
    if output::is_json() {
        output::json(
            "config.show",
            json!({
                "path": path.display().to_string(),
                "exists": path.exists(),
                "config": config,
            }),
        );
        return Ok(());
    }

    output::section("Effective Configuration");
    output::field("Path", path.display());
    if !path.exists() {
        output::note("(file not found, using defaults)");
    }

    output::section("Logging");
    output::field("Level", &config.logging.level);
    output::field("Format", &config.logging.format);

    output::section("Local Storage");
    output::field("Backend", config.local.backend);
    if config.local.backend == LocalBackend::File {
        output::field("Path", config.local.resolved_path().display());
    }
    match config.local.quota_bytes {
        Some(quota) => output::field("Quota", format!("{quota} bytes")),
        None => output::field("Quota", "unlimited"),
    }

    output::section("Remote Database");
    output::field(
        "Enabled",
        if config.remote.enabled { "yes" } else { "no" },
    );
    if let Some(url) = &config.remote.database_url {
        output::field("URL", url);
    }
    if let Some(root) = &config.remote.root {
        output::field("Root", root);
    }
    output::field("Timeout", format!("{}ms", config.remote.timeout_ms));
    if config.remote.auth_token.is_some() {
        output::success("Auth token loaded from FIREBASE_AUTH_TOKEN");
    } else if config.remote.enabled {
        output::warning("Auth token not set");
    }

    output::section("Subscriptions");
    output::field(
        "Poll interval",
        format!("{}ms", config.subscription.poll_interval_ms),
    );

    Ok(())
}

/// Execute `config validate`.
pub fn execute_validate(path: &Path) -> Result<()> {
    let config = Config::load(path)?;

    if output::is_json() {
        output::json(
            "config.validate",
            json!({
                "path": path.display().to_string(),
                "valid": true,
                "remote": config.remote.enabled,
            }),
        );
        return Ok(());
    }

    output::section("Config Validation");
    output::field("Path", path.display());
    output::success("Config file is valid");
    if config.remote.enabled && config.remote.auth_token.is_none() {
        output::warning("Remote enabled without FIREBASE_AUTH_TOKEN; rules must allow public access");
    }
    output::hint(&format!(
        "quizstore config show -c {}",
        path.display()
    ));
    Ok(())
}
