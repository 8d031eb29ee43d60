pub mod config;
pub mod run;
pub mod tools;

pub const EXIT_AGENT_FAILURE: u8 = 1;
pub const EXIT_CONFIG_FAILURE: u8 = 2;

#[derive(Debug, Clone)]
pub struct CommandResult {
    pub exit_code: u8,
    pub output: String,
}

impl CommandResult {
    pub fn success(output: impl Into<String>) -> Self {
        Self { exit_code: 0, output: output.into() }
    }

    pub fn failure(error_class: &str, message: impl std::fmt::Display, exit_code: u8) -> Self {
        Self { exit_code, output: format!("error [{error_class}]: {message}") }
    }
}
