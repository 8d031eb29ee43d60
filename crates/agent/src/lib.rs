//! Agent runtime for the stockroom inventory assistant.
//!
//! The model is a planner, never a store. It only sees the inventory through
//! the tools registered here, and every mutation goes through
//! `stockroom_core::InventoryStore` on the caller's [`session::Session`].
//!
//! # Loop
//!
//! 1. **Request** - instructions, user input, and tool declarations go to an
//!    OpenAI-compatible endpoint (`openai`).
//! 2. **Tool calls** - requested calls run in order against the session store
//!    (`tools`, `inventory_tools`); results, including rejections, are sent back.
//! 3. **Answer** - the first reply without tool calls is the final output
//!    (`runtime`).

pub mod chat;
pub mod inventory_tools;
pub mod llm;
pub mod openai;
pub mod prompt;
pub mod runtime;
pub mod session;
pub mod tools;

pub use inventory_tools::inventory_registry;
pub use llm::{LlmClient, LlmError};
pub use openai::OpenAiCompatibleClient;
pub use runtime::{AgentError, AgentRuntime, RunOutput, ToolInvocation};
pub use session::Session;
pub use tools::{Tool, ToolError, ToolRegistry};
