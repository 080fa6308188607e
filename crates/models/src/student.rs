use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

/// One row of the roster.
/// - name: display name, free text
/// - roll_number: unique key, compared case-insensitively, immutable after creation
/// - grade: free-form label such as `A` or `B+`
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct StudentRecord {
    pub name: String,
    pub roll_number: String,
    pub grade: String,
}

impl StudentRecord {
    pub fn new(name: impl Into<String>, roll_number: impl Into<String>, grade: impl Into<String>) -> Self {
        Self { name: name.into(), roll_number: roll_number.into(), grade: grade.into() }
    }

    /// Whether this record is keyed by `roll` (case-insensitive).
    pub fn has_roll(&self, roll: &str) -> bool {
        roll_matches(&self.roll_number, roll)
    }
}

impl fmt::Display for StudentRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Roll No: {} | Name: {} | Grade: {}", self.roll_number, self.name, self.grade)
    }
}

/// Case-insensitive roll number comparison used for every roster lookup.
/// Lowercases char by char, so `ΣΑΣ` and `σασ` are the same key.
pub fn roll_matches(a: &str, b: &str) -> bool {
    a == b || a.chars().flat_map(char::to_lowercase).eq(b.chars().flat_map(char::to_lowercase))
}

/// Caller-supplied field set for creating or editing a record.
/// Fields are trimmed on construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StudentInput {
    pub name: String,
    pub roll_number: String,
    pub grade: String,
}

impl StudentInput {
    pub fn new(name: &str, roll_number: &str, grade: &str) -> Self {
        Self {
            name: name.trim().to_string(),
            roll_number: roll_number.trim().to_string(),
            grade: grade.trim().to_string(),
        }
    }

    /// Reject the first empty required field.
    pub fn validate(&self) -> Result<(), ModelError> {
        validate_roll(&self.roll_number)?;
        if self.name.is_empty() {
            return Err(ModelError::Validation("name must not be empty".into()));
        }
        if self.grade.is_empty() {
            return Err(ModelError::Validation("grade must not be empty".into()));
        }
        Ok(())
    }

    pub fn into_record(self) -> StudentRecord {
        StudentRecord { name: self.name, roll_number: self.roll_number, grade: self.grade }
    }
}

/// Roll numbers used as lookup keys must be non-blank.
pub fn validate_roll(roll: &str) -> Result<(), ModelError> {
    if roll.trim().is_empty() {
        return Err(ModelError::Validation("roll number must not be empty".into()));
    }
    Ok(())
}
