//! Shared types for the brew back-office
//!
//! Common types used across the workspace: domain models, the unified
//! error system, and response envelopes.

pub mod error;
pub mod models;
pub mod response;

// Re-exports
pub use axum::Json;
pub use http;
pub use serde::{Deserialize, Serialize};
