//! Service layer for the student roster.
//! - `roster::RosterStore` owns the records and enforces key uniqueness.
//! - `storage` holds the whole-collection persistence seam and its JSON file implementation.
//! - Errors are typed per failure kind so callers can react to each.

pub mod errors;
pub mod roster;
pub mod storage;
#[cfg(test)]
pub mod test_support;

pub use errors::ServiceError;
pub use roster::RosterStore;
pub use storage::{JsonFileStorage, RosterStorage};
