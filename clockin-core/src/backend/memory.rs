use super::provider::{AttendanceBackend, CheckInReceipt, CheckOutReceipt};
use crate::{
    attendance::{AttendanceError, AttendanceStore},
    error::BackendError,
    staff::StaffRecord,
};
use chrono::{DateTime, Local, Utc};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// Backend answering from a fixed roster, recording attendance in an owned
/// [`AttendanceStore`]. Records are lost when the backend is dropped.
pub struct InMemoryBackend {
    roster: Vec<StaffRecord>,
    store: Mutex<AttendanceStore>,
    clock: Clock,
}

impl InMemoryBackend {
    pub fn new(roster: Vec<StaffRecord>) -> Self {
        Self {
            roster,
            store: Mutex::new(AttendanceStore::new()),
            clock: Arc::new(Utc::now),
        }
    }

    /// Replace the wall clock, for deterministic tests.
    #[must_use]
    pub fn with_clock(mut self, clock: impl Fn() -> DateTime<Utc> + Send + Sync + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    /// A small built-in roster used when no staff are configured.
    pub fn demo() -> Self {
        Self::new(demo_roster())
    }

    fn find_by_staff_id(&self, staff_id: &str) -> Option<&StaffRecord> {
        self.roster.iter().find(|s| s.staff_id == staff_id)
    }

    fn store(&self) -> MutexGuard<'_, AttendanceStore> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl AttendanceBackend for InMemoryBackend {
    fn lookup(&self, identifier: &str) -> Result<StaffRecord, BackendError> {
        let identifier = identifier.trim();
        self.roster
            .iter()
            .find(|s| {
                s.national_id == identifier || s.staff_id.eq_ignore_ascii_case(identifier)
            })
            .cloned()
            .ok_or(BackendError::NotFound)
    }

    fn check_in(&self, staff_id: &str) -> Result<CheckInReceipt, BackendError> {
        if self.find_by_staff_id(staff_id).is_none() {
            return Err(BackendError::rejected("Staff not found."));
        }
        let at = self
            .store()
            .check_in(staff_id, (self.clock)())
            .map_err(rejection)?;
        log::debug!("in-memory time in for {staff_id} at {at}");
        Ok(CheckInReceipt {
            timestamp: at.with_timezone(&Local),
        })
    }

    fn check_out(&self, staff_id: &str) -> Result<CheckOutReceipt, BackendError> {
        if self.find_by_staff_id(staff_id).is_none() {
            return Err(BackendError::rejected("Staff not found."));
        }
        let summary = self
            .store()
            .check_out(staff_id, (self.clock)())
            .map_err(rejection)?;
        log::debug!(
            "in-memory time out for {staff_id} at {} ({:.2}h)",
            summary.check_out,
            summary.total_hours
        );
        Ok(CheckOutReceipt {
            timestamp: summary.check_out.with_timezone(&Local),
            total_hours: Some(summary.total_hours),
        })
    }

    fn describe(&self) -> String {
        format!("in-memory ({} staff)", self.roster.len())
    }
}

fn rejection(err: AttendanceError) -> BackendError {
    if matches!(err, AttendanceError::ClockWentBackwards { .. }) {
        log::error!("attendance clock defect: {err}");
    }
    BackendError::rejected(err.to_string())
}

fn demo_roster() -> Vec<StaffRecord> {
    let staff = |staff_id: &str,
                 national_id: &str,
                 first: &str,
                 last: &str,
                 department: &str,
                 position: &str| StaffRecord {
        staff_id: staff_id.to_string(),
        national_id: national_id.to_string(),
        first_name: first.to_string(),
        last_name: last.to_string(),
        department: Some(department.to_string()),
        position: Some(position.to_string()),
        photo_path: None,
    };
    vec![
        staff("STF001", "12345678", "Grace", "Hopper", "Engineering", "Director"),
        staff("STF002", "23456789", "Alan", "Turing", "Research", "Scientist"),
        staff("STF003", "34567890", "Ada", "Lovelace", "Finance", "Analyst"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use std::sync::atomic::{AtomicI64, Ordering};

    fn backend_with_manual_clock() -> (InMemoryBackend, Arc<AtomicI64>) {
        let millis = Arc::new(AtomicI64::new(0));
        let handle = Arc::clone(&millis);
        let base = Utc.with_ymd_and_hms(2026, 3, 2, 8, 0, 0).unwrap();
        let backend = InMemoryBackend::demo().with_clock(move || {
            base + Duration::milliseconds(handle.load(Ordering::SeqCst))
        });
        (backend, millis)
    }

    #[test]
    fn lookup_by_national_id_trims_input() {
        let backend = InMemoryBackend::demo();
        let staff = backend.lookup("  12345678 ").unwrap();
        assert_eq!(staff.staff_id, "STF001");
    }

    #[test]
    fn lookup_by_staff_id_ignores_case() {
        let backend = InMemoryBackend::demo();
        assert_eq!(backend.lookup("stf002").unwrap().first_name, "Alan");
    }

    #[test]
    fn lookup_unknown_is_not_found() {
        let backend = InMemoryBackend::demo();
        assert_eq!(backend.lookup("99999999"), Err(BackendError::NotFound));
        assert_eq!(backend.lookup(""), Err(BackendError::NotFound));
    }

    #[test]
    fn double_check_in_is_rejected() {
        let backend = InMemoryBackend::demo();
        backend.check_in("STF001").unwrap();
        let err = backend.check_in("STF001").unwrap_err();
        assert_eq!(
            err,
            BackendError::rejected("You have already timed in today. Please time out first.")
        );
    }

    #[test]
    fn check_out_first_is_rejected() {
        let backend = InMemoryBackend::demo();
        let err = backend.check_out("STF002").unwrap_err();
        assert_eq!(
            err,
            BackendError::rejected("You have not timed in yet. Please time in first.")
        );
    }

    #[test]
    fn check_out_reports_total_hours() {
        let (backend, millis) = backend_with_manual_clock();
        backend.check_in("STF003").unwrap();
        millis.store(5_400_000, Ordering::SeqCst);
        let receipt = backend.check_out("STF003").unwrap();
        assert_eq!(receipt.total_hours.map(|h| format!("{h:.2}")).as_deref(), Some("1.50"));
    }

    #[test]
    fn mutations_for_unknown_staff_are_rejected() {
        let backend = InMemoryBackend::demo();
        assert!(matches!(
            backend.check_in("GHOST"),
            Err(BackendError::Rejected(Some(_)))
        ));
        assert!(matches!(
            backend.check_out("GHOST"),
            Err(BackendError::Rejected(Some(_)))
        ));
    }

    #[test]
    fn separate_backends_do_not_share_records() {
        let first = InMemoryBackend::demo();
        let second = InMemoryBackend::demo();
        first.check_in("STF001").unwrap();
        assert!(second.check_in("STF001").is_ok());
    }
}
