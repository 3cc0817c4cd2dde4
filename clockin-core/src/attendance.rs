use chrono::{DateTime, Utc};
use std::collections::HashMap;
use thiserror::Error;

const MILLIS_PER_HOUR: f64 = 3_600_000.0;

/// Rule violations raised by [`AttendanceStore`]. The display strings are shown to staff.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AttendanceError {
    #[error("You have already timed in today. Please time out first.")]
    AlreadyCheckedIn,

    #[error("You have not timed in yet. Please time in first.")]
    NotCheckedIn,

    #[error("Time out ({check_out}) is earlier than time in ({check_in}).")]
    ClockWentBackwards {
        check_in: DateTime<Utc>,
        check_out: DateTime<Utc>,
    },
}

/// One check-in/check-out cycle for a staff member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttendanceEvent {
    pub check_in: DateTime<Utc>,
    pub check_out: Option<DateTime<Utc>>,
}

impl AttendanceEvent {
    pub fn is_open(&self) -> bool {
        self.check_out.is_none()
    }

    /// Hours worked, once closed.
    pub fn total_hours(&self) -> Option<f64> {
        let check_out = self.check_out?;
        elapsed_hours(self.check_in, check_out).ok()
    }
}

/// Result of closing an attendance event.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckOutSummary {
    pub check_in: DateTime<Utc>,
    pub check_out: DateTime<Utc>,
    pub total_hours: f64,
}

/// Hours between two instants, rounded to two decimal places.
///
/// A check-out before its check-in can only come from a broken clock, so it is an error
/// rather than a negative duration.
#[allow(clippy::cast_precision_loss)]
pub fn elapsed_hours(
    check_in: DateTime<Utc>,
    check_out: DateTime<Utc>,
) -> Result<f64, AttendanceError> {
    let millis = (check_out - check_in).num_milliseconds();
    if millis < 0 {
        return Err(AttendanceError::ClockWentBackwards {
            check_in,
            check_out,
        });
    }
    Ok(round_to_hundredths(millis as f64 / MILLIS_PER_HOUR))
}

fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// In-memory attendance ledger keyed by staff id. Lives as long as its owner; nothing is
/// persisted.
#[derive(Debug, Default)]
pub struct AttendanceStore {
    events: HashMap<String, Vec<AttendanceEvent>>,
}

impl AttendanceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The unterminated event for `staff_id`, if any.
    pub fn open_event(&self, staff_id: &str) -> Option<&AttendanceEvent> {
        self.events
            .get(staff_id)
            .and_then(|events| events.last())
            .filter(|event| event.is_open())
    }

    /// All events recorded for `staff_id`, oldest first.
    pub fn history(&self, staff_id: &str) -> &[AttendanceEvent] {
        self.events.get(staff_id).map_or(&[], Vec::as_slice)
    }

    pub fn check_in(
        &mut self,
        staff_id: &str,
        at: DateTime<Utc>,
    ) -> Result<DateTime<Utc>, AttendanceError> {
        if self.open_event(staff_id).is_some() {
            return Err(AttendanceError::AlreadyCheckedIn);
        }
        self.events
            .entry(staff_id.to_string())
            .or_default()
            .push(AttendanceEvent {
                check_in: at,
                check_out: None,
            });
        Ok(at)
    }

    pub fn check_out(
        &mut self,
        staff_id: &str,
        at: DateTime<Utc>,
    ) -> Result<CheckOutSummary, AttendanceError> {
        let Some(event) = self
            .events
            .get_mut(staff_id)
            .and_then(|events| events.last_mut())
            .filter(|event| event.is_open())
        else {
            return Err(AttendanceError::NotCheckedIn);
        };

        // Validate before mutating so a bad clock leaves the event open.
        let total_hours = elapsed_hours(event.check_in, at)?;
        event.check_out = Some(at);
        Ok(CheckOutSummary {
            check_in: event.check_in,
            check_out: at,
            total_hours,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 2, 8, 0, 0).unwrap()
    }

    #[test]
    fn elapsed_hours_one_and_a_half() {
        let out = t0() + Duration::milliseconds(5_400_000);
        assert!((elapsed_hours(t0(), out).unwrap() - 1.5).abs() < f64::EPSILON);
        assert_eq!(format!("{:.2}", elapsed_hours(t0(), out).unwrap()), "1.50");
    }

    #[test]
    fn elapsed_hours_rounds_to_two_decimals() {
        // 1h 20m = 1.3333.. hours
        let out = t0() + Duration::minutes(80);
        assert!((elapsed_hours(t0(), out).unwrap() - 1.33).abs() < f64::EPSILON);
    }

    #[test]
    fn elapsed_hours_zero_is_allowed() {
        assert!(elapsed_hours(t0(), t0()).unwrap().abs() < f64::EPSILON);
    }

    #[test]
    fn elapsed_hours_negative_is_an_error() {
        let out = t0() - Duration::seconds(1);
        assert!(matches!(
            elapsed_hours(t0(), out),
            Err(AttendanceError::ClockWentBackwards { .. })
        ));
    }

    #[test]
    fn second_check_in_without_check_out_is_rejected() {
        let mut store = AttendanceStore::new();
        store.check_in("STF001", t0()).unwrap();
        assert_eq!(
            store.check_in("STF001", t0() + Duration::minutes(5)),
            Err(AttendanceError::AlreadyCheckedIn)
        );
        assert_eq!(store.history("STF001").len(), 1);
    }

    #[test]
    fn check_out_without_check_in_is_rejected() {
        let mut store = AttendanceStore::new();
        assert_eq!(
            store.check_out("STF001", t0()),
            Err(AttendanceError::NotCheckedIn)
        );
    }

    #[test]
    fn full_cycle_then_new_cycle() {
        let mut store = AttendanceStore::new();
        store.check_in("STF001", t0()).unwrap();
        let summary = store
            .check_out("STF001", t0() + Duration::milliseconds(5_400_000))
            .unwrap();
        assert!((summary.total_hours - 1.5).abs() < f64::EPSILON);
        assert!(store.open_event("STF001").is_none());

        // Closed cycle: a second check-out is rejected, a new check-in is allowed
        assert_eq!(
            store.check_out("STF001", t0() + Duration::hours(2)),
            Err(AttendanceError::NotCheckedIn)
        );
        store.check_in("STF001", t0() + Duration::hours(3)).unwrap();
        assert!(store.open_event("STF001").is_some());
        assert_eq!(store.history("STF001").len(), 2);
        assert_eq!(store.history("STF001")[0].total_hours(), Some(1.5));
    }

    #[test]
    fn backwards_clock_leaves_event_open() {
        let mut store = AttendanceStore::new();
        store.check_in("STF001", t0()).unwrap();
        let result = store.check_out("STF001", t0() - Duration::minutes(1));
        assert!(matches!(
            result,
            Err(AttendanceError::ClockWentBackwards { .. })
        ));
        assert!(store.open_event("STF001").is_some());
    }

    #[test]
    fn staff_are_tracked_independently() {
        let mut store = AttendanceStore::new();
        store.check_in("STF001", t0()).unwrap();
        store.check_in("STF002", t0()).unwrap();
        store.check_out("STF002", t0() + Duration::hours(1)).unwrap();
        assert!(store.open_event("STF001").is_some());
        assert!(store.open_event("STF002").is_none());
        assert!(store.history("nobody").is_empty());
    }
}
