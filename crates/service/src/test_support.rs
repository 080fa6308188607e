use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};

use models::StudentRecord;

use crate::{errors::ServiceError, storage::RosterStorage};

/// In-memory storage double. Clones share state so a test can keep a handle
/// after moving one into a store.
#[derive(Clone, Default)]
pub struct MemoryStorage {
    saved: Rc<RefCell<Option<Vec<StudentRecord>>>>,
    writes: Rc<Cell<usize>>,
    fail_reads: Rc<Cell<bool>>,
    fail_writes: Rc<Cell<bool>>,
}

impl MemoryStorage {
    pub fn with_records(records: Vec<StudentRecord>) -> Self {
        let storage = Self::default();
        *storage.saved.borrow_mut() = Some(records);
        storage
    }

    pub fn saved(&self) -> Option<Vec<StudentRecord>> {
        self.saved.borrow().clone()
    }

    pub fn writes(&self) -> usize {
        self.writes.get()
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.set(fail);
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }
}

impl RosterStorage for MemoryStorage {
    fn read(&self) -> Result<Option<Vec<StudentRecord>>, ServiceError> {
        if self.fail_reads.get() {
            return Err(ServiceError::persistence("simulated read failure"));
        }
        Ok(self.saved())
    }

    fn write(&self, records: &[StudentRecord]) -> Result<(), ServiceError> {
        if self.fail_writes.get() {
            return Err(ServiceError::persistence("simulated write failure"));
        }
        *self.saved.borrow_mut() = Some(records.to_vec());
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }

    fn location(&self) -> String {
        "memory".into()
    }
}
