//! Order domain types
//!
//! An order is a customer name plus a list of product line items. It is
//! persisted `open` and transitions to `closed` exactly once; closed orders
//! reject any further mutation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

use crate::error::ErrorCode;

/// Lifecycle status of a persisted order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Open,
    Closed,
}

impl OrderStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
        }
    }
}

/// Error when parsing an order status from its stored form
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown order status: {0}")]
pub struct UnknownOrderStatus(pub String);

impl FromStr for OrderStatus {
    type Err = UnknownOrderStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "open" => Ok(Self::Open),
            "closed" => Ok(Self::Closed),
            other => Err(UnknownOrderStatus(other.to_string())),
        }
    }
}

/// One line of an order: a menu item and how many of it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub product_id: i64,
    pub quantity: i32,
}

/// A persisted order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    pub customer_name: String,
    pub items: Vec<OrderItem>,
    pub status: OrderStatus,
    /// Free-form notes; arbitrary JSON, stored opaquely
    pub notes: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

/// Incoming order payload, used for placement and update.
///
/// `items` is an `Option` so that a request missing the field entirely can be
/// told apart from one carrying an empty list; both are rejected by
/// [`OrderDraft::validate`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderDraft {
    #[serde(default)]
    pub customer_name: String,
    pub items: Option<Vec<OrderItem>>,
    #[serde(default)]
    pub notes: Option<serde_json::Value>,
}

/// Why an order draft failed structural validation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderValidationError {
    #[error("order must contain at least one item")]
    NoItems,
    #[error("customer name is required")]
    CustomerNameRequired,
    #[error("item quantity must be at least 1 (product {product_id})")]
    InvalidQuantity { product_id: i64 },
}

impl OrderValidationError {
    /// The error code this validation failure maps onto
    pub fn error_code(&self) -> ErrorCode {
        match self {
            Self::NoItems => ErrorCode::OrderEmpty,
            Self::CustomerNameRequired => ErrorCode::CustomerNameRequired,
            Self::InvalidQuantity { .. } => ErrorCode::InvalidQuantity,
        }
    }
}

impl OrderDraft {
    /// Structural validation, run before any storage side effect.
    ///
    /// Checks short-circuit in order: items present and non-empty, customer
    /// name non-blank, every quantity at least 1.
    pub fn validate(&self) -> Result<(), OrderValidationError> {
        let items = self.items.as_deref().unwrap_or(&[]);
        if items.is_empty() {
            return Err(OrderValidationError::NoItems);
        }
        if self.customer_name.trim().is_empty() {
            return Err(OrderValidationError::CustomerNameRequired);
        }
        for item in items {
            if item.quantity < 1 {
                return Err(OrderValidationError::InvalidQuantity {
                    product_id: item.product_id,
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(customer_name: &str, items: Option<Vec<OrderItem>>) -> OrderDraft {
        OrderDraft {
            customer_name: customer_name.to_string(),
            items,
            notes: None,
        }
    }

    #[test]
    fn accepts_valid_draft() {
        let d = draft(
            "Alice",
            Some(vec![OrderItem {
                product_id: 1,
                quantity: 2,
            }]),
        );
        assert_eq!(d.validate(), Ok(()));
    }

    #[test]
    fn rejects_missing_items_field() {
        let d = draft("Alice", None);
        assert_eq!(d.validate(), Err(OrderValidationError::NoItems));
    }

    #[test]
    fn rejects_empty_items_list() {
        let d = draft("Alice", Some(vec![]));
        assert_eq!(d.validate(), Err(OrderValidationError::NoItems));
    }

    #[test]
    fn rejects_blank_customer_name() {
        let d = draft(
            "   ",
            Some(vec![OrderItem {
                product_id: 1,
                quantity: 1,
            }]),
        );
        assert_eq!(d.validate(), Err(OrderValidationError::CustomerNameRequired));
    }

    #[test]
    fn missing_items_reported_before_missing_name() {
        // Checks short-circuit in declaration order
        let d = draft("", None);
        assert_eq!(d.validate(), Err(OrderValidationError::NoItems));
    }

    #[test]
    fn rejects_zero_and_negative_quantities() {
        for quantity in [0, -3] {
            let d = draft(
                "Bob",
                Some(vec![OrderItem {
                    product_id: 7,
                    quantity,
                }]),
            );
            assert_eq!(
                d.validate(),
                Err(OrderValidationError::InvalidQuantity { product_id: 7 })
            );
        }
    }

    #[test]
    fn validation_errors_map_to_codes() {
        assert_eq!(
            OrderValidationError::NoItems.error_code(),
            ErrorCode::OrderEmpty
        );
        assert_eq!(
            OrderValidationError::CustomerNameRequired.error_code(),
            ErrorCode::CustomerNameRequired
        );
        assert_eq!(
            OrderValidationError::InvalidQuantity { product_id: 1 }.error_code(),
            ErrorCode::InvalidQuantity
        );
    }

    #[test]
    fn status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&OrderStatus::Open).unwrap(),
            "\"open\""
        );
        assert_eq!(
            serde_json::to_string(&OrderStatus::Closed).unwrap(),
            "\"closed\""
        );
    }

    #[test]
    fn status_parses_from_stored_form() {
        assert_eq!("open".parse::<OrderStatus>(), Ok(OrderStatus::Open));
        assert_eq!("closed".parse::<OrderStatus>(), Ok(OrderStatus::Closed));
        assert!("accepted".parse::<OrderStatus>().is_err());
    }
}
