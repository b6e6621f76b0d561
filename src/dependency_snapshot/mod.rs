//! Snapshot engine: immutable dependency snapshots and the update algorithm
//! that folds change sets into them.

pub mod domain;
pub mod filters;
pub mod services;
