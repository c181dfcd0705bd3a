//! Multi-step coordination on top of the database layer

pub mod batch;
