use tickwatch_core::{paginate, PageRequest, Settings};

use crate::cli::PageArgs;
use crate::error::CliError;

use super::CommandResult;

pub fn run(args: &PageArgs, settings: &Settings) -> Result<CommandResult, CliError> {
    let size = args.size.unwrap_or(settings.page_size);
    let page = paginate(&args.items, PageRequest::new(args.index, size));
    Ok(CommandResult::ok(serde_json::to_value(&page)?))
}
