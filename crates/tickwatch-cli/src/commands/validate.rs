use serde_json::json;
use tickwatch_core::{Failure, Symbol, ValidationFailure, WatchlistName};

use crate::cli::{ValidateArgs, ValidateCommand};
use crate::error::CliError;

use super::CommandResult;

pub fn run(args: &ValidateArgs) -> Result<CommandResult, CliError> {
    let parsed = match &args.command {
        ValidateCommand::Symbol { input } => Symbol::parse(input).map(String::from),
        ValidateCommand::WatchlistName { input } => WatchlistName::parse(input).map(String::from),
    };
    Ok(into_result(parsed))
}

fn into_result(parsed: Result<String, ValidationFailure>) -> CommandResult {
    match parsed {
        Ok(value) => CommandResult::ok(json!({ "valid": true, "value": value })),
        Err(failure) => {
            let mut result = CommandResult::from_failure(&Failure::from(failure));
            result.data["valid"] = json!(false);
            result
        }
    }
}
