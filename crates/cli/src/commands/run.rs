use std::sync::Arc;

use stockroom_agent::{inventory_registry, AgentRuntime, OpenAiCompatibleClient, Session};
use stockroom_core::config::{AppConfig, LoadOptions};
use tracing::error;

use crate::commands::{CommandResult, EXIT_AGENT_FAILURE, EXIT_CONFIG_FAILURE};

pub const RESULT_HEADER: &str = "==== FINAL RESULT ====";
pub const RESULT_FOOTER: &str = "======================";

pub fn run(options: LoadOptions, instruction: &str) -> CommandResult {
    let config = match AppConfig::load(options) {
        Ok(config) => config,
        Err(error) => return CommandResult::failure("config_validation", error, EXIT_CONFIG_FAILURE),
    };
    crate::init_logging(&config);

    let client = match OpenAiCompatibleClient::from_config(&config.llm) {
        Ok(client) => client,
        Err(error) => return CommandResult::failure("llm_client", error, EXIT_AGENT_FAILURE),
    };
    let runtime = AgentRuntime::new(Arc::new(client), inventory_registry(), &config.llm.model)
        .with_max_turns(config.agent.max_turns);

    let executor = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
        Ok(executor) => executor,
        Err(error) => return CommandResult::failure("runtime", error, EXIT_AGENT_FAILURE),
    };

    let mut session = Session::new();
    match executor.block_on(runtime.run(&mut session, instruction)) {
        Ok(output) => CommandResult::success(render_result(&output.final_output)),
        Err(agent_error) => {
            error!(event_name = "agent.run.failed", error = %agent_error, "agent run failed");
            CommandResult::failure("agent", agent_error, EXIT_AGENT_FAILURE)
        }
    }
}

pub fn render_result(final_output: &str) -> String {
    format!("\n{RESULT_HEADER}\n{final_output}\n{RESULT_FOOTER}\n")
}
