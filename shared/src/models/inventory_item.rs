//! Inventory (ingredient stock) types

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::ErrorCode;

/// One stocked ingredient
///
/// `quantity` is fractional (0.5 kg of beans is a valid stock level) and is
/// never negative: every decrement goes through the guarded conditional
/// update in the order engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct InventoryItem {
    pub ingredient_id: i64,
    pub name: String,
    pub quantity: f64,
    pub unit: String,
    /// Per-unit purchase cost; used by leftover sorting
    pub price: f64,
}

/// Payload for creating or replacing an inventory item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryItemDraft {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub quantity: f64,
    #[serde(default)]
    pub unit: String,
    #[serde(default)]
    pub price: f64,
}

/// Why an inventory draft failed validation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InventoryValidationError {
    #[error("ingredient name is required")]
    NameRequired,
    #[error("ingredient quantity must not be negative")]
    NegativeQuantity,
    #[error("ingredient price must not be negative")]
    NegativePrice,
}

impl InventoryValidationError {
    pub fn error_code(&self) -> ErrorCode {
        match self {
            Self::NameRequired => ErrorCode::RequiredField,
            Self::NegativeQuantity | Self::NegativePrice => ErrorCode::ValueOutOfRange,
        }
    }
}

impl InventoryItemDraft {
    pub fn validate(&self) -> Result<(), InventoryValidationError> {
        if self.name.trim().is_empty() {
            return Err(InventoryValidationError::NameRequired);
        }
        if self.quantity < 0.0 {
            return Err(InventoryValidationError::NegativeQuantity);
        }
        if self.price < 0.0 {
            return Err(InventoryValidationError::NegativePrice);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_valid_draft() {
        let d = InventoryItemDraft {
            name: "Espresso beans".to_string(),
            quantity: 12.5,
            unit: "kg".to_string(),
            price: 18.0,
        };
        assert_eq!(d.validate(), Ok(()));
    }

    #[test]
    fn rejects_blank_name() {
        let d = InventoryItemDraft {
            name: " ".to_string(),
            quantity: 1.0,
            unit: "kg".to_string(),
            price: 0.0,
        };
        assert_eq!(d.validate(), Err(InventoryValidationError::NameRequired));
    }

    #[test]
    fn rejects_negative_quantity() {
        let d = InventoryItemDraft {
            name: "Milk".to_string(),
            quantity: -0.5,
            unit: "l".to_string(),
            price: 0.0,
        };
        assert_eq!(d.validate(), Err(InventoryValidationError::NegativeQuantity));
    }
}
