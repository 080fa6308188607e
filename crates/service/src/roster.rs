use models::{student::validate_roll, StudentInput, StudentRecord};
use tracing::{info, warn};

use crate::{
    errors::ServiceError,
    storage::{JsonFileStorage, RosterStorage},
};

/// Ordered, in-memory student roster persisted as a whole on every change.
///
/// Roll numbers are unique under case-insensitive comparison. Records keep
/// insertion order. Every successful `add`/`edit`/`remove` rewrites the whole
/// roster through the storage; when that write fails the in-memory change is
/// undone so the roster always matches the last successful write.
///
/// The store is owned by its caller and is not synchronised; wrap it yourself
/// if it must be shared.
pub struct RosterStore<S = JsonFileStorage> {
    records: Vec<StudentRecord>,
    storage: S,
}

impl<S: RosterStorage> RosterStore<S> {
    /// Empty roster bound to `storage`. Nothing is read until [`load`](Self::load).
    pub fn new(storage: S) -> Self {
        Self { records: Vec::new(), storage }
    }

    /// Create a store and load it, failing if the persisted roster is unreadable.
    pub fn open(storage: S) -> Result<Self, ServiceError> {
        let mut store = Self::new(storage);
        store.load()?;
        Ok(store)
    }

    /// Replace the in-memory roster with the persisted one and return its size.
    ///
    /// Nothing persisted yet loads as an empty roster. On a read or parse
    /// failure the roster is left empty and the error is returned, so the
    /// caller can decide whether to carry on.
    pub fn load(&mut self) -> Result<usize, ServiceError> {
        self.records.clear();
        match self.storage.read() {
            Ok(Some(records)) => {
                self.records = records;
                info!(event = "roster_loaded", location = %self.storage.location(), records = self.records.len(), "roster loaded");
                Ok(self.records.len())
            }
            Ok(None) => {
                info!(event = "roster_missing", location = %self.storage.location(), "no persisted roster, starting empty");
                Ok(0)
            }
            Err(e) => {
                warn!(event = "roster_load_failed", location = %self.storage.location(), error = %e, "roster could not be loaded");
                Err(e)
            }
        }
    }

    /// Append a new record and persist.
    pub fn add(&mut self, name: &str, roll: &str, grade: &str) -> Result<StudentRecord, ServiceError> {
        let input = StudentInput::new(name, roll, grade);
        input.validate()?;
        if self.position(&input.roll_number).is_some() {
            warn!(event = "add_rejected", roll = %input.roll_number, "duplicate roll number");
            return Err(ServiceError::duplicate(&input.roll_number));
        }

        let record = input.into_record();
        self.records.push(record.clone());
        if let Err(e) = self.persist() {
            self.records.pop();
            return Err(e);
        }
        info!(event = "student_added", roll = %record.roll_number, total = self.records.len(), "student added");
        Ok(record)
    }

    /// Update name and grade of the record keyed by `roll` and persist.
    /// The roll number itself never changes.
    pub fn edit(&mut self, roll: &str, name: &str, grade: &str) -> Result<StudentRecord, ServiceError> {
        let input = StudentInput::new(name, roll, grade);
        input.validate()?;
        let idx = self.position(&input.roll_number).ok_or_else(|| {
            warn!(event = "edit_rejected", roll = %input.roll_number, "roll number not found");
            ServiceError::not_found(&input.roll_number)
        })?;

        let existing = &mut self.records[idx];
        let previous = (
            std::mem::replace(&mut existing.name, input.name),
            std::mem::replace(&mut existing.grade, input.grade),
        );
        if let Err(e) = self.persist() {
            let existing = &mut self.records[idx];
            existing.name = previous.0;
            existing.grade = previous.1;
            return Err(e);
        }
        let updated = self.records[idx].clone();
        info!(event = "student_updated", roll = %updated.roll_number, "student updated");
        Ok(updated)
    }

    /// Delete the first record keyed by `roll`, persist, and return it.
    pub fn remove(&mut self, roll: &str) -> Result<StudentRecord, ServiceError> {
        let roll = roll.trim();
        validate_roll(roll)?;
        let idx = self.position(roll).ok_or_else(|| {
            warn!(event = "remove_rejected", %roll, "roll number not found");
            ServiceError::not_found(roll)
        })?;

        let removed = self.records.remove(idx);
        if let Err(e) = self.persist() {
            self.records.insert(idx, removed);
            return Err(e);
        }
        info!(event = "student_removed", roll = %removed.roll_number, total = self.records.len(), "student removed");
        Ok(removed)
    }

    /// Look up the record keyed by `roll`.
    pub fn find(&self, roll: &str) -> Result<&StudentRecord, ServiceError> {
        let roll = roll.trim();
        validate_roll(roll)?;
        self.position(roll).map(|idx| &self.records[idx]).ok_or_else(|| ServiceError::not_found(roll))
    }

    /// All records in insertion order.
    pub fn list_all(&self) -> &[StudentRecord] {
        &self.records
    }

    /// Write the entire roster through the storage.
    pub fn persist(&self) -> Result<(), ServiceError> {
        self.storage.write(&self.records).map_err(|e| {
            warn!(event = "roster_persist_failed", location = %self.storage.location(), error = %e, "roster could not be saved");
            e
        })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    fn position(&self, roll: &str) -> Option<usize> {
        self.records.iter().position(|r| r.has_roll(roll))
    }
}
