use crate::{error::BackendError, staff::StaffRecord};
use chrono::{DateTime, Local};

/// Successful time-in.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckInReceipt {
    pub timestamp: DateTime<Local>,
}

/// Successful time-out. `total_hours` is whatever the backend reports; backends that
/// cannot compute it leave it unset.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckOutReceipt {
    pub timestamp: DateTime<Local>,
    pub total_hours: Option<f64>,
}

pub trait AttendanceBackend: Send + Sync {
    /// Resolve an identifier (national id) to a staff record.
    fn lookup(&self, identifier: &str) -> Result<StaffRecord, BackendError>;
    fn check_in(&self, staff_id: &str) -> Result<CheckInReceipt, BackendError>;
    fn check_out(&self, staff_id: &str) -> Result<CheckOutReceipt, BackendError>;
    /// Short human-readable description used in logs.
    fn describe(&self) -> String;
    /// Base URL photos are resolved against, if the backend serves any.
    fn photo_base_url(&self) -> Option<&str> {
        None
    }
}
