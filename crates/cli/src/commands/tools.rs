use stockroom_agent::inventory_registry;

use crate::commands::{CommandResult, EXIT_AGENT_FAILURE};

pub fn run() -> CommandResult {
    let definitions = inventory_registry().definitions();
    match serde_json::to_string_pretty(&definitions) {
        Ok(output) => CommandResult::success(output),
        Err(error) => CommandResult::failure("serialization", error, EXIT_AGENT_FAILURE),
    }
}
