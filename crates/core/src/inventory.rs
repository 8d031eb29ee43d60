use std::fmt;

use indexmap::IndexMap;

use crate::errors::InventoryError;

pub const EMPTY_INVENTORY_MESSAGE: &str = "Inventory is empty.";

/// Item name to quantity, in insertion order.
///
/// Every entry holds a quantity of at least one. Deleting down to zero removes
/// the entry, and re-adding a removed item appends it at the end.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InventoryStore {
    items: IndexMap<String, u64>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AddOutcome {
    pub name: String,
    pub added: u64,
    pub total: u64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DeleteOutcome {
    NotFound { name: String },
    Removed { name: String },
    Reduced { name: String, removed: u64, remaining: u64 },
}

impl InventoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_item(&mut self, name: &str, quantity: u64) -> Result<AddOutcome, InventoryError> {
        ensure_name(name)?;
        if quantity == 0 {
            return Err(InventoryError::NonPositiveQuantity { name: name.to_string(), quantity: 0 });
        }

        let current = self.items.get(name).copied().unwrap_or(0);
        let total = current
            .checked_add(quantity)
            .ok_or_else(|| InventoryError::QuantityOverflow { name: name.to_string() })?;
        self.items.insert(name.to_string(), total);

        Ok(AddOutcome { name: name.to_string(), added: quantity, total })
    }

    pub fn delete_item(
        &mut self,
        name: &str,
        quantity: Option<u64>,
    ) -> Result<DeleteOutcome, InventoryError> {
        if quantity == Some(0) {
            return Err(InventoryError::NonPositiveQuantity { name: name.to_string(), quantity: 0 });
        }

        let Some(current) = self.items.get(name).copied() else {
            return Ok(DeleteOutcome::NotFound { name: name.to_string() });
        };

        match quantity {
            Some(requested) if requested < current => {
                let remaining = current - requested;
                self.items.insert(name.to_string(), remaining);
                Ok(DeleteOutcome::Reduced { name: name.to_string(), removed: requested, remaining })
            }
            _ => {
                self.items.shift_remove(name);
                Ok(DeleteOutcome::Removed { name: name.to_string() })
            }
        }
    }

    pub fn list_inventory(&self) -> String {
        if self.items.is_empty() {
            return EMPTY_INVENTORY_MESSAGE.to_string();
        }

        self.items
            .iter()
            .map(|(name, quantity)| format!("- {name} : {quantity}"))
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn quantity(&self, name: &str) -> Option<u64> {
        self.items.get(name).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.items.iter().map(|(name, quantity)| (name.as_str(), *quantity))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Narrows a signed quantity coming from an untyped caller to a store quantity.
pub fn positive_quantity(name: &str, quantity: i64) -> Result<u64, InventoryError> {
    u64::try_from(quantity)
        .ok()
        .filter(|value| *value > 0)
        .ok_or_else(|| InventoryError::NonPositiveQuantity { name: name.to_string(), quantity })
}

fn ensure_name(name: &str) -> Result<(), InventoryError> {
    if name.trim().is_empty() {
        return Err(InventoryError::EmptyName);
    }
    Ok(())
}

impl fmt::Display for AddOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Added {} x {}", self.added, self.name)
    }
}

impl fmt::Display for DeleteOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { name } => write!(f, "{name} not found in inventory."),
            Self::Removed { name } => write!(f, "Deleted item {name}"),
            Self::Reduced { name, removed, remaining } => {
                write!(f, "Removed {removed} x {name} (Remaining: {remaining})")
            }
        }
    }
}
