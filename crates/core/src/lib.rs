//! Stockroom core: the session inventory store and its operations, plus the
//! configuration layer shared by the agent runtime and the CLI.

pub mod config;
pub mod errors;
pub mod inventory;

pub use errors::InventoryError;
pub use inventory::{
    positive_quantity, AddOutcome, DeleteOutcome, InventoryStore, EMPTY_INVENTORY_MESSAGE,
};
