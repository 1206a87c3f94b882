use super::{project, Filter, StoreError, StoreResult, StudentStore};
use crate::model::{StudentPatch, StudentRecord};
use serde_json::{Map, Value};
use std::cell::{Cell, RefCell};

/// In-process store for action tests. Counts every call so tests can assert
/// that a denied request never reached the store.
#[derive(Default)]
pub struct MemoryStore {
    records: RefCell<Vec<StudentRecord>>,
    calls: Cell<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<StudentRecord>) -> Self {
        Self {
            records: RefCell::new(records),
            calls: Cell::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.get()
    }

    fn touch(&self) {
        self.calls.set(self.calls.get() + 1);
    }
}

fn matches(filter: Filter, record: &StudentRecord) -> bool {
    match filter.level {
        Some(level) => record.level == Some(level),
        None => true,
    }
}

fn apply(patch: &StudentPatch, record: &mut StudentRecord) {
    if let Some(v) = &patch.name {
        record.name = v.clone();
    }
    if let Some(v) = &patch.email {
        record.email = Some(v.clone());
    }
    if let Some(v) = &patch.phone {
        record.phone = Some(v.clone());
    }
    if let Some(v) = &patch.address {
        record.address = Some(v.clone());
    }
    if let Some(v) = patch.current_semester {
        record.current_semester = Some(v);
    }
    if let Some(v) = patch.credits_completed {
        record.credits_completed = Some(v);
    }
}

impl StudentStore for MemoryStore {
    fn find_one(&self, student_id: &str) -> StoreResult<Option<StudentRecord>> {
        self.touch();
        Ok(self
            .records
            .borrow()
            .iter()
            .find(|r| r.student_id == student_id)
            .cloned())
    }

    fn find_many(&self, projection: Option<&[&str]>) -> StoreResult<Vec<Map<String, Value>>> {
        self.touch();
        let mut out = Vec::new();
        for rec in self.records.borrow().iter() {
            let doc = match serde_json::to_value(rec)? {
                Value::Object(m) => m,
                _ => Map::new(),
            };
            out.push(match projection {
                Some(fields) => project(doc, fields),
                None => doc,
            });
        }
        Ok(out)
    }

    fn count(&self, filter: Filter) -> StoreResult<u64> {
        self.touch();
        Ok(self
            .records
            .borrow()
            .iter()
            .filter(|r| matches(filter, r))
            .count() as u64)
    }

    fn insert_one(&self, record: &StudentRecord) -> StoreResult<()> {
        self.touch();
        let mut records = self.records.borrow_mut();
        if records.iter().any(|r| r.student_id == record.student_id) {
            return Err(StoreError::Duplicate(record.student_id.clone()));
        }
        records.push(record.clone());
        Ok(())
    }

    fn update_one(&self, student_id: &str, patch: &StudentPatch) -> StoreResult<u64> {
        self.touch();
        let mut records = self.records.borrow_mut();
        match records.iter_mut().find(|r| r.student_id == student_id) {
            Some(rec) => {
                apply(patch, rec);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    fn delete_one(&self, student_id: &str) -> StoreResult<u64> {
        self.touch();
        let mut records = self.records.borrow_mut();
        match records.iter().position(|r| r.student_id == student_id) {
            Some(idx) => {
                records.remove(idx);
                Ok(1)
            }
            None => Ok(0),
        }
    }
}
