use thiserror::Error;

/// Rejected inventory input. A rejected call leaves the store untouched.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum InventoryError {
    #[error("item name must not be empty")]
    EmptyName,
    #[error("quantity for `{name}` must be a positive integer, got {quantity}")]
    NonPositiveQuantity { name: String, quantity: i64 },
    #[error("quantity for `{name}` would exceed the supported maximum")]
    QuantityOverflow { name: String },
}

impl InventoryError {
    pub fn error_class(&self) -> &'static str {
        match self {
            Self::EmptyName => "empty_name",
            Self::NonPositiveQuantity { .. } => "non_positive_quantity",
            Self::QuantityOverflow { .. } => "quantity_overflow",
        }
    }
}
