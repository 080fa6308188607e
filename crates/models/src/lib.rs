//! Domain types for the student roster.
//!
//! Records carry no identity beyond their roll number; every lookup goes
//! through [`student::roll_matches`] so the key stays case-insensitive.

pub mod errors;
pub mod student;

pub use errors::ModelError;
pub use student::{roll_matches, StudentInput, StudentRecord};
