//! Storage abstractions for the roster
//!
//! The roster is always read and written as a whole; implementations never
//! see partial updates.

pub mod json_list_store;

use models::StudentRecord;

use crate::errors::ServiceError;

pub use json_list_store::JsonFileStorage;

/// Whole-collection persistence for the roster.
/// Implementations can be file-backed or in-memory.
pub trait RosterStorage {
    /// Read the persisted roster; `Ok(None)` when nothing was ever written.
    fn read(&self) -> Result<Option<Vec<StudentRecord>>, ServiceError>;
    /// Replace the persisted roster with `records`, preserving order.
    fn write(&self, records: &[StudentRecord]) -> Result<(), ServiceError>;
    /// Human-readable location for log output.
    fn location(&self) -> String;
}
