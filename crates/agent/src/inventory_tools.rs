//! The three inventory tools advertised to the model.

use serde::Deserialize;
use serde_json::{json, Value};
use stockroom_core::{positive_quantity, InventoryStore};

use crate::tools::{parse_arguments, Tool, ToolError, ToolRegistry};

pub const ADD_ITEM: &str = "add_item";
pub const DELETE_ITEM: &str = "delete_item";
pub const LIST_INVENTORY: &str = "list_inventory";

pub struct AddItemTool;
pub struct DeleteItemTool;
pub struct ListInventoryTool;

#[derive(Debug, Deserialize)]
struct AddItemArgs {
    name: String,
    quantity: i64,
}

#[derive(Debug, Deserialize)]
struct DeleteItemArgs {
    name: String,
    #[serde(default)]
    quantity: Option<i64>,
}

/// Registry holding `add_item`, `delete_item` and `list_inventory`, in that order.
pub fn inventory_registry() -> ToolRegistry {
    let mut registry = ToolRegistry::default();
    registry.register(AddItemTool);
    registry.register(DeleteItemTool);
    registry.register(ListInventoryTool);
    registry
}

impl Tool for AddItemTool {
    fn name(&self) -> &'static str {
        ADD_ITEM
    }

    fn description(&self) -> &'static str {
        "Add item with given quantity to inventory."
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "name": {
                    "type": "string",
                    "description": "Item name, kept exactly as written"
                },
                "quantity": {
                    "type": "integer",
                    "minimum": 1,
                    "description": "Number of units to add"
                }
            },
            "required": ["name", "quantity"]
        })
    }

    fn execute(&self, store: &mut InventoryStore, arguments: Value) -> Result<String, ToolError> {
        let args: AddItemArgs = parse_arguments(ADD_ITEM, arguments)?;
        let quantity = positive_quantity(&args.name, args.quantity)?;
        let outcome = store.add_item(&args.name, quantity)?;
        Ok(outcome.to_string())
    }
}

impl Tool for DeleteItemTool {
    fn name(&self) -> &'static str {
        DELETE_ITEM
    }

    fn description(&self) -> &'static str {
        "Delete an item or reduce its quantity from inventory."
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "name": {
                    "type": "string",
                    "description": "Item name, kept exactly as written"
                },
                "quantity": {
                    "type": "integer",
                    "minimum": 1,
                    "description": "Units to remove; omit to delete the item entirely"
                }
            },
            "required": ["name"]
        })
    }

    fn execute(&self, store: &mut InventoryStore, arguments: Value) -> Result<String, ToolError> {
        let args: DeleteItemArgs = parse_arguments(DELETE_ITEM, arguments)?;
        let quantity =
            args.quantity.map(|quantity| positive_quantity(&args.name, quantity)).transpose()?;
        let outcome = store.delete_item(&args.name, quantity)?;
        Ok(outcome.to_string())
    }
}

impl Tool for ListInventoryTool {
    fn name(&self) -> &'static str {
        LIST_INVENTORY
    }

    fn description(&self) -> &'static str {
        "List all inventory items with quantities."
    }

    fn parameters(&self) -> Value {
        json!({"type": "object", "properties": {}})
    }

    fn execute(&self, store: &mut InventoryStore, _arguments: Value) -> Result<String, ToolError> {
        Ok(store.list_inventory())
    }
}
