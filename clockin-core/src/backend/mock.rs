use super::provider::{AttendanceBackend, CheckInReceipt, CheckOutReceipt};
use crate::{error::BackendError, staff::StaffRecord};
use chrono::Local;
use std::sync::Mutex;

/// Scripted backend for tests. Each call pops the next queued result (falling back to
/// a default) and records its argument.
#[derive(Default)]
pub struct MockBackend {
    pub staff: Vec<StaffRecord>,
    pub lookup_results: Mutex<Vec<Result<StaffRecord, BackendError>>>,
    pub check_in_results: Mutex<Vec<Result<CheckInReceipt, BackendError>>>,
    pub check_out_results: Mutex<Vec<Result<CheckOutReceipt, BackendError>>>,
    pub lookup_calls: Mutex<Vec<String>>,
    pub check_in_calls: Mutex<Vec<String>>,
    pub check_out_calls: Mutex<Vec<String>>,
}

impl MockBackend {
    pub fn with_staff(staff: Vec<StaffRecord>) -> Self {
        Self {
            staff,
            ..Default::default()
        }
    }

    pub fn push_lookup(&self, result: Result<StaffRecord, BackendError>) {
        self.lookup_results.lock().unwrap().insert(0, result);
    }

    pub fn push_check_in(&self, result: Result<CheckInReceipt, BackendError>) {
        self.check_in_results.lock().unwrap().insert(0, result);
    }

    pub fn push_check_out(&self, result: Result<CheckOutReceipt, BackendError>) {
        self.check_out_results.lock().unwrap().insert(0, result);
    }
}

impl AttendanceBackend for MockBackend {
    fn lookup(&self, identifier: &str) -> Result<StaffRecord, BackendError> {
        self.lookup_calls
            .lock()
            .unwrap()
            .push(identifier.to_string());
        if let Some(result) = self.lookup_results.lock().unwrap().pop() {
            return result;
        }
        self.staff
            .iter()
            .find(|s| s.national_id == identifier)
            .cloned()
            .ok_or(BackendError::NotFound)
    }

    fn check_in(&self, staff_id: &str) -> Result<CheckInReceipt, BackendError> {
        self.check_in_calls
            .lock()
            .unwrap()
            .push(staff_id.to_string());
        self.check_in_results
            .lock()
            .unwrap()
            .pop()
            .unwrap_or_else(|| {
                Ok(CheckInReceipt {
                    timestamp: Local::now(),
                })
            })
    }

    fn check_out(&self, staff_id: &str) -> Result<CheckOutReceipt, BackendError> {
        self.check_out_calls
            .lock()
            .unwrap()
            .push(staff_id.to_string());
        self.check_out_results
            .lock()
            .unwrap()
            .pop()
            .unwrap_or_else(|| {
                Ok(CheckOutReceipt {
                    timestamp: Local::now(),
                    total_hours: None,
                })
            })
    }

    fn describe(&self) -> String {
        "mock".to_string()
    }
}
