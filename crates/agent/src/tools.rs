use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use stockroom_core::{InventoryError, InventoryStore};
use thiserror::Error;

use crate::chat::{FunctionDefinition, ToolDefinition};

#[derive(Debug, Error)]
pub enum ToolError {
    #[error("unknown tool `{0}`")]
    UnknownTool(String),
    #[error("invalid arguments for `{tool}`: {message}")]
    InvalidArguments { tool: String, message: String },
    #[error(transparent)]
    Rejected(#[from] InventoryError),
}

impl ToolError {
    pub fn error_class(&self) -> &'static str {
        match self {
            Self::UnknownTool(_) => "unknown_tool",
            Self::InvalidArguments { .. } => "invalid_arguments",
            Self::Rejected(error) => error.error_class(),
        }
    }
}

/// A synchronous operation the model can call by name with JSON arguments.
pub trait Tool: Send + Sync {
    fn name(&self) -> &'static str;
    fn description(&self) -> &'static str;
    /// JSON Schema for the argument object.
    fn parameters(&self) -> Value;
    fn execute(&self, store: &mut InventoryStore, arguments: Value) -> Result<String, ToolError>;
}

#[derive(Default)]
pub struct ToolRegistry {
    tools: IndexMap<String, Box<dyn Tool>>,
}

impl ToolRegistry {
    /// Adds `tool`, returning whichever tool previously held the same name.
    pub fn register<T>(&mut self, tool: T) -> Option<Box<dyn Tool>>
    where
        T: Tool + 'static,
    {
        self.tools.insert(tool.name().to_string(), Box::new(tool))
    }

    pub fn get(&self, name: &str) -> Option<&dyn Tool> {
        self.tools.get(name).map(|tool| tool.as_ref())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tools.keys().map(String::as_str)
    }

    /// Tool declarations in registration order, shaped for the `tools` request field.
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.tools
            .values()
            .map(|tool| ToolDefinition {
                kind: "function".to_string(),
                function: FunctionDefinition {
                    name: tool.name().to_string(),
                    description: tool.description().to_string(),
                    parameters: tool.parameters(),
                },
            })
            .collect()
    }

    /// Runs `name` with the raw JSON argument string a model produced.
    pub fn dispatch(
        &self,
        name: &str,
        raw_arguments: &str,
        store: &mut InventoryStore,
    ) -> Result<String, ToolError> {
        let tool = self.get(name).ok_or_else(|| ToolError::UnknownTool(name.to_string()))?;
        let arguments = parse_raw_arguments(name, raw_arguments)?;
        tool.execute(store, arguments)
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

fn parse_raw_arguments(tool: &str, raw_arguments: &str) -> Result<Value, ToolError> {
    if raw_arguments.trim().is_empty() {
        return Ok(Value::Object(Map::new()));
    }

    match serde_json::from_str::<Value>(raw_arguments) {
        Ok(Value::Null) => Ok(Value::Object(Map::new())),
        Ok(value @ Value::Object(_)) => Ok(value),
        Ok(other) => Err(ToolError::InvalidArguments {
            tool: tool.to_string(),
            message: format!("expected a JSON object, got `{other}`"),
        }),
        Err(error) => {
            Err(ToolError::InvalidArguments { tool: tool.to_string(), message: error.to_string() })
        }
    }
}

pub(crate) fn parse_arguments<T>(tool: &str, arguments: Value) -> Result<T, ToolError>
where
    T: DeserializeOwned,
{
    serde_json::from_value(arguments).map_err(|error| ToolError::InvalidArguments {
        tool: tool.to_string(),
        message: error.to_string(),
    })
}
