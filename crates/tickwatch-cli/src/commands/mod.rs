mod cache;
mod classify;
mod market;
mod page;
mod validate;

use serde_json::{json, Value};
use tickwatch_core::{Failure, Settings};

use crate::cli::{Cli, Command};
use crate::error::CliError;

pub struct CommandResult {
    pub data: Value,
    /// The command ran but reported a user-facing failure.
    pub failed: bool,
}

impl CommandResult {
    pub fn ok(data: Value) -> Self {
        Self {
            data,
            failed: false,
        }
    }

    pub fn failed(data: Value) -> Self {
        Self { data, failed: true }
    }

    /// Report a failure the way the presentation layer would show it.
    pub fn from_failure(failure: &Failure) -> Self {
        let classification = failure.classify();
        classification.report();
        Self::failed(json!({
            "detail": failure.to_string(),
            "error": classification,
        }))
    }
}

pub async fn run(cli: &Cli) -> Result<CommandResult, CliError> {
    let settings = load_settings(cli)?;
    tracing::debug!(?settings, "settings loaded");

    match &cli.command {
        Command::Page(args) => page::run(args, &settings),
        Command::Classify(args) => classify::run(args),
        Command::Errors => classify::catalog(),
        Command::Validate(args) => validate::run(args),
        Command::Cache(args) => cache::run(args, &settings),
        Command::Market(args) => market::run(args, &settings).await,
        Command::Config => Ok(CommandResult::ok(serde_json::to_value(&settings)?)),
    }
}

fn load_settings(cli: &Cli) -> Result<Settings, CliError> {
    let settings = match &cli.config {
        Some(path) => Settings::from_file(path)?,
        None => Settings::default(),
    };
    Ok(settings.with_env_overrides()?)
}
