//! Menu catalog types

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::ErrorCode;

/// One recipe row: how much of an ingredient a single unit of the menu item
/// consumes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct MenuItemIngredient {
    pub ingredient_id: i64,
    pub quantity: f64,
}

/// A menu catalog entry with its recipe
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub image: String,
    pub ingredients: Vec<MenuItemIngredient>,
}

/// Payload for creating or replacing a menu item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItemDraft {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub ingredients: Vec<MenuItemIngredient>,
}

/// Why a menu item draft failed validation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MenuValidationError {
    #[error("menu item name is required")]
    NameRequired,
    #[error("menu item description is required")]
    DescriptionRequired,
    #[error("menu item price must not be negative")]
    NegativePrice,
    #[error("recipe quantity must not be negative (ingredient {ingredient_id})")]
    NegativeRecipeQuantity { ingredient_id: i64 },
}

impl MenuValidationError {
    pub fn error_code(&self) -> ErrorCode {
        match self {
            Self::NameRequired => ErrorCode::MenuItemNameRequired,
            Self::DescriptionRequired => ErrorCode::MenuItemDescriptionRequired,
            Self::NegativePrice => ErrorCode::MenuItemInvalidPrice,
            Self::NegativeRecipeQuantity { .. } => ErrorCode::RecipeQuantityInvalid,
        }
    }
}

impl MenuItemDraft {
    pub fn validate(&self) -> Result<(), MenuValidationError> {
        if self.name.trim().is_empty() {
            return Err(MenuValidationError::NameRequired);
        }
        if self.description.trim().is_empty() {
            return Err(MenuValidationError::DescriptionRequired);
        }
        if self.price < 0.0 {
            return Err(MenuValidationError::NegativePrice);
        }
        for ingredient in &self.ingredients {
            if ingredient.quantity < 0.0 {
                return Err(MenuValidationError::NegativeRecipeQuantity {
                    ingredient_id: ingredient.ingredient_id,
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> MenuItemDraft {
        MenuItemDraft {
            name: "Latte".to_string(),
            description: "Espresso with steamed milk".to_string(),
            price: 4.5,
            image: None,
            ingredients: vec![
                MenuItemIngredient {
                    ingredient_id: 1,
                    quantity: 0.03,
                },
                MenuItemIngredient {
                    ingredient_id: 2,
                    quantity: 0.2,
                },
            ],
        }
    }

    #[test]
    fn accepts_valid_draft() {
        assert_eq!(draft().validate(), Ok(()));
    }

    #[test]
    fn rejects_blank_name() {
        let mut d = draft();
        d.name = "  ".to_string();
        assert_eq!(d.validate(), Err(MenuValidationError::NameRequired));
    }

    #[test]
    fn rejects_blank_description() {
        let mut d = draft();
        d.description = String::new();
        assert_eq!(d.validate(), Err(MenuValidationError::DescriptionRequired));
    }

    #[test]
    fn rejects_negative_price() {
        let mut d = draft();
        d.price = -0.01;
        assert_eq!(d.validate(), Err(MenuValidationError::NegativePrice));
    }

    #[test]
    fn rejects_negative_recipe_quantity() {
        let mut d = draft();
        d.ingredients[1].quantity = -1.0;
        assert_eq!(
            d.validate(),
            Err(MenuValidationError::NegativeRecipeQuantity { ingredient_id: 2 })
        );
    }

    #[test]
    fn zero_price_and_empty_recipe_are_allowed() {
        let mut d = draft();
        d.price = 0.0;
        d.ingredients.clear();
        assert_eq!(d.validate(), Ok(()));
    }
}
