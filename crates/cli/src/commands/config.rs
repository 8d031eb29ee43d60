use std::env;
use std::fs;
use std::path::Path;

use stockroom_core::config::{
    resolve_config_path, AppConfig, LoadOptions, API_KEY_ENV, API_KEY_ENV_ALIAS,
};
use toml::Value;

use crate::commands::{CommandResult, EXIT_CONFIG_FAILURE};

pub fn run(options: LoadOptions) -> CommandResult {
    let config_file_path = resolve_config_path(options.config_path.as_deref());
    let overrides = options.overrides.clone();
    let config = match AppConfig::load(options) {
        Ok(config) => config,
        Err(error) => {
            return CommandResult::failure("config_validation", error, EXIT_CONFIG_FAILURE)
        }
    };

    let config_file_doc = load_config_file_doc(config_file_path.as_deref());
    let source = |key_path: &str, from_cli: bool, env_keys: &[&str]| {
        field_source(
            key_path,
            from_cli,
            env_keys,
            config_file_doc.as_ref(),
            config_file_path.as_deref(),
        )
    };

    let mut lines =
        vec!["effective config (source precedence: cli > env > file > default):".to_string()];

    let api_key = if config.llm.api_key.is_some() { "<redacted>" } else { "<unset>" };
    lines.push(render_line(
        "llm.api_key",
        api_key,
        source("llm.api_key", overrides.llm_api_key.is_some(), &[API_KEY_ENV, API_KEY_ENV_ALIAS]),
    ));
    lines.push(render_line(
        "llm.base_url",
        &config.llm.base_url,
        source("llm.base_url", overrides.llm_base_url.is_some(), &["STOCKROOM_LLM_BASE_URL"]),
    ));
    lines.push(render_line(
        "llm.model",
        &config.llm.model,
        source("llm.model", overrides.llm_model.is_some(), &["STOCKROOM_LLM_MODEL"]),
    ));
    lines.push(render_line(
        "llm.timeout_secs",
        &config.llm.timeout_secs.to_string(),
        source("llm.timeout_secs", false, &["STOCKROOM_LLM_TIMEOUT_SECS"]),
    ));
    lines.push(render_line(
        "llm.max_retries",
        &config.llm.max_retries.to_string(),
        source("llm.max_retries", false, &["STOCKROOM_LLM_MAX_RETRIES"]),
    ));
    lines.push(render_line(
        "agent.max_turns",
        &config.agent.max_turns.to_string(),
        source("agent.max_turns", overrides.agent_max_turns.is_some(), &["STOCKROOM_AGENT_MAX_TURNS"]),
    ));
    lines.push(render_line(
        "logging.level",
        &config.logging.level,
        source("logging.level", overrides.log_level.is_some(), &["STOCKROOM_LOGGING_LEVEL", "STOCKROOM_LOG_LEVEL"]),
    ));
    lines.push(render_line(
        "logging.format",
        &format!("{:?}", config.logging.format),
        source("logging.format", false, &["STOCKROOM_LOGGING_FORMAT", "STOCKROOM_LOG_FORMAT"]),
    ));

    CommandResult::success(lines.join("\n"))
}

fn load_config_file_doc(path: Option<&Path>) -> Option<Value> {
    let path = path?;
    let raw = fs::read_to_string(path).ok()?;
    raw.parse::<Value>().ok()
}

fn field_source(
    key_path: &str,
    from_cli: bool,
    env_keys: &[&str],
    config_file_doc: Option<&Value>,
    config_file_path: Option<&Path>,
) -> String {
    if from_cli {
        return "cli".to_string();
    }

    if let Some(env_key) = env_keys.iter().find(|key| is_set(key)) {
        return format!("env ({env_key})");
    }

    if let Some(doc) = config_file_doc {
        if contains_path(doc, key_path) {
            let file_path = config_file_path
                .map(|path| path.display().to_string())
                .unwrap_or_else(|| "config file".to_string());
            return format!("file ({file_path})");
        }
    }

    "default".to_string()
}

fn is_set(key: &str) -> bool {
    env::var(key).map(|value| !value.trim().is_empty()).unwrap_or(false)
}

fn contains_path(root: &Value, key_path: &str) -> bool {
    let mut current = root;
    for key in key_path.split('.') {
        let Some(next) = current.get(key) else {
            return false;
        };
        current = next;
    }
    true
}

fn render_line(key: &str, value: &str, source: String) -> String {
    format!("- {key} = {value} (source: {source})")
}
