use crate::{
    backend::{AttendanceBackend, CheckInReceipt, CheckOutReceipt},
    error::BackendError,
    input::InputBuffer,
    staff::StaffRecord,
    timer::{Deadline, Ticker},
};
use chrono::{DateTime, Local};
use std::{
    fmt::Write as _,
    time::{Duration, Instant},
};

pub const EMPTY_INPUT_MESSAGE: &str = "Please enter National ID";
pub const NOT_FOUND_MESSAGE: &str = "Staff not found. Please contact administrator.";
pub const CONNECTION_ERROR_MESSAGE: &str = "Connection error. Please try again.";
pub const TIME_IN_FAILED_MESSAGE: &str = "Time in failed. Please try again.";
pub const TIME_OUT_FAILED_MESSAGE: &str = "Time out failed. Please try again.";

pub const DEFAULT_AUTO_RESET: Duration = Duration::from_secs(5);
pub const CLOCK_PERIOD: Duration = Duration::from_secs(1);

/// The screen currently shown. Exactly one is active at a time.
#[derive(Debug, Clone, PartialEq)]
pub enum Screen {
    /// Waiting for an identifier
    Idle,
    /// A verified staff member choosing time in or time out
    Profile { staff: StaffRecord },
    Success {
        staff: StaffRecord,
        message: String,
    },
    /// `staff` is set when the failure happened after verification
    Error {
        staff: Option<StaffRecord>,
        message: String,
    },
}

impl Screen {
    pub fn name(&self) -> &'static str {
        match self {
            Screen::Idle => "idle",
            Screen::Profile { .. } => "profile",
            Screen::Success { .. } => "success",
            Screen::Error { .. } => "error",
        }
    }

    /// Success and Error reset themselves after a timeout.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Screen::Success { .. } | Screen::Error { .. })
    }

    pub fn staff(&self) -> Option<&StaffRecord> {
        match self {
            Screen::Idle => None,
            Screen::Profile { staff } | Screen::Success { staff, .. } => Some(staff),
            Screen::Error { staff, .. } => staff.as_ref(),
        }
    }
}

/// Identifies one backend round-trip. Responses carrying any other ticket than the one
/// the controller is waiting for are dropped.
pub type Ticket = u64;

/// Backend work the controller wants done.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    Lookup { ticket: Ticket, identifier: String },
    CheckIn { ticket: Ticket, staff_id: String },
    CheckOut { ticket: Ticket, staff_id: String },
}

impl Request {
    pub fn ticket(&self) -> Ticket {
        match self {
            Request::Lookup { ticket, .. }
            | Request::CheckIn { ticket, .. }
            | Request::CheckOut { ticket, .. } => *ticket,
        }
    }

    /// Run the request against `backend`. Blocks for as long as the backend does.
    pub fn execute(&self, backend: &dyn AttendanceBackend) -> Response {
        match self {
            Request::Lookup { ticket, identifier } => Response::Lookup {
                ticket: *ticket,
                result: backend.lookup(identifier),
            },
            Request::CheckIn { ticket, staff_id } => Response::CheckIn {
                ticket: *ticket,
                result: backend.check_in(staff_id),
            },
            Request::CheckOut { ticket, staff_id } => Response::CheckOut {
                ticket: *ticket,
                result: backend.check_out(staff_id),
            },
        }
    }
}

/// Outcome of a [`Request`].
#[derive(Debug, Clone, PartialEq)]
pub enum Response {
    Lookup {
        ticket: Ticket,
        result: Result<StaffRecord, BackendError>,
    },
    CheckIn {
        ticket: Ticket,
        result: Result<CheckInReceipt, BackendError>,
    },
    CheckOut {
        ticket: Ticket,
        result: Result<CheckOutReceipt, BackendError>,
    },
}

impl Response {
    pub fn ticket(&self) -> Ticket {
        match self {
            Response::Lookup { ticket, .. }
            | Response::CheckIn { ticket, .. }
            | Response::CheckOut { ticket, .. } => *ticket,
        }
    }
}

/// Time of day as shown in receipts, e.g. `9:05:03 AM`.
pub fn format_time(t: &DateTime<Local>) -> String {
    t.format("%-I:%M:%S %p").to_string()
}

/// Kiosk screen controller.
///
/// Owns all UI state and both timers. It never talks to the backend itself: operations
/// that need one return a [`Request`], and the host feeds the [`Response`] back through
/// [`Kiosk::apply`].
#[derive(Debug)]
pub struct Kiosk {
    screen: Screen,
    input: InputBuffer,
    notice: Option<String>,
    busy: bool,
    clock: DateTime<Local>,
    clock_ticker: Ticker,
    auto_reset: Deadline,
    auto_reset_after: Duration,
    next_ticket: Ticket,
    pending: Option<Ticket>,
}

impl Kiosk {
    pub fn new(now: Instant, wall: DateTime<Local>) -> Self {
        Self {
            screen: Screen::Idle,
            input: InputBuffer::new(),
            notice: None,
            busy: false,
            clock: wall,
            clock_ticker: Ticker::new(CLOCK_PERIOD, now),
            auto_reset: Deadline::default(),
            auto_reset_after: DEFAULT_AUTO_RESET,
            next_ticket: 1,
            pending: None,
        }
    }

    #[must_use]
    pub fn with_auto_reset(mut self, after: Duration) -> Self {
        self.auto_reset_after = after;
        self
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn staff(&self) -> Option<&StaffRecord> {
        self.screen.staff()
    }

    pub fn input(&self) -> &InputBuffer {
        &self.input
    }

    /// The input buffer, when it may be edited (idle and not waiting on the backend).
    pub fn input_mut(&mut self) -> Option<&mut InputBuffer> {
        (self.screen == Screen::Idle && !self.busy).then_some(&mut self.input)
    }

    /// The status message of the active screen, or the inline notice while idle.
    pub fn message(&self) -> Option<&str> {
        match &self.screen {
            Screen::Success { message, .. } | Screen::Error { message, .. } => Some(message),
            Screen::Idle | Screen::Profile { .. } => self.notice.as_deref(),
        }
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn clock(&self) -> DateTime<Local> {
        self.clock
    }

    /// Time left before the current terminal screen resets itself.
    pub fn auto_reset_remaining(&self, now: Instant) -> Option<Duration> {
        self.auto_reset.remaining(now)
    }

    /// Update the displayed clock.
    pub fn tick(&mut self, wall: DateTime<Local>) {
        self.clock = wall;
    }

    /// Drive both timers. Returns true when anything visible changed.
    pub fn poll(&mut self, now: Instant, wall: DateTime<Local>) -> bool {
        let mut changed = false;
        if self.clock_ticker.due(now) {
            self.tick(wall);
            changed = true;
        }
        if self.auto_reset.fire(now) {
            log::info!("auto-reset from {} screen", self.screen.name());
            self.reset();
            changed = true;
        }
        changed
    }

    /// Verify whatever is in the input buffer.
    pub fn submit_identifier(&mut self) -> Option<Request> {
        let input = self.input.as_str().to_owned();
        self.submit(&input)
    }

    /// Verify `input`. Blank input only sets the inline notice.
    pub fn submit(&mut self, input: &str) -> Option<Request> {
        if self.busy || matches!(self.screen, Screen::Profile { .. }) {
            return None;
        }
        let identifier = input.trim();
        if identifier.is_empty() {
            self.notice = Some(EMPTY_INPUT_MESSAGE.to_string());
            return None;
        }
        self.auto_reset.cancel();
        Some(self.begin(|ticket| Request::Lookup {
            ticket,
            identifier: identifier.to_string(),
        }))
    }

    pub fn record_check_in(&mut self) -> Option<Request> {
        let staff_id = self.profile_staff_id()?;
        Some(self.begin(|ticket| Request::CheckIn { ticket, staff_id }))
    }

    pub fn record_check_out(&mut self) -> Option<Request> {
        let staff_id = self.profile_staff_id()?;
        Some(self.begin(|ticket| Request::CheckOut { ticket, staff_id }))
    }

    fn profile_staff_id(&self) -> Option<String> {
        if self.busy {
            return None;
        }
        match &self.screen {
            Screen::Profile { staff } => Some(staff.staff_id.clone()),
            _ => None,
        }
    }

    fn begin(&mut self, make: impl FnOnce(Ticket) -> Request) -> Request {
        let ticket = self.next_ticket;
        self.next_ticket += 1;
        self.pending = Some(ticket);
        self.busy = true;
        make(ticket)
    }

    /// Back to Idle with everything cleared. Any in-flight response becomes stale.
    pub fn reset(&mut self) {
        if self.screen != Screen::Idle {
            log::info!("{} -> idle", self.screen.name());
        }
        self.screen = Screen::Idle;
        self.input.clear();
        self.notice = None;
        self.busy = false;
        self.pending = None;
        self.auto_reset.cancel();
    }

    /// Apply a backend response. Returns false when the response was stale and ignored.
    pub fn apply(&mut self, response: Response, now: Instant) -> bool {
        if self.pending != Some(response.ticket()) {
            log::debug!(
                "dropping stale response for ticket {} (waiting on {:?})",
                response.ticket(),
                self.pending
            );
            return false;
        }
        self.pending = None;
        self.busy = false;

        let next = match response {
            Response::Lookup { result, .. } => lookup_outcome(result),
            Response::CheckIn { result, .. } => {
                let Some(staff) = self.staff().cloned() else {
                    return false;
                };
                check_in_outcome(staff, result)
            }
            Response::CheckOut { result, .. } => {
                let Some(staff) = self.staff().cloned() else {
                    return false;
                };
                check_out_outcome(staff, result)
            }
        };
        self.transition(next, now);
        true
    }

    fn transition(&mut self, next: Screen, now: Instant) {
        log::info!("{} -> {}", self.screen.name(), next.name());
        self.notice = None;
        if next.is_terminal() {
            self.auto_reset.schedule(now, self.auto_reset_after);
        } else {
            self.auto_reset.cancel();
        }
        self.screen = next;
    }
}

fn lookup_outcome(result: Result<StaffRecord, BackendError>) -> Screen {
    match result {
        Ok(staff) => Screen::Profile { staff },
        Err(BackendError::Transport(e)) => {
            log::warn!("lookup failed: {e}");
            connection_error(None)
        }
        Err(e) => {
            log::info!("lookup: {e}");
            Screen::Error {
                staff: None,
                message: NOT_FOUND_MESSAGE.to_string(),
            }
        }
    }
}

fn check_in_outcome(staff: StaffRecord, result: Result<CheckInReceipt, BackendError>) -> Screen {
    match result {
        Ok(receipt) => Screen::Success {
            message: format!(
                "Welcome {}! Time in recorded at {}",
                staff.first_name,
                format_time(&receipt.timestamp)
            ),
            staff,
        },
        Err(e) => failure(staff, e, TIME_IN_FAILED_MESSAGE),
    }
}

fn check_out_outcome(staff: StaffRecord, result: Result<CheckOutReceipt, BackendError>) -> Screen {
    match result {
        Ok(receipt) => {
            let mut message = format!(
                "Goodbye {}! Time out recorded at {}",
                staff.first_name,
                format_time(&receipt.timestamp)
            );
            if let Some(hours) = receipt.total_hours {
                let _ = write!(message, ". Total hours: {hours:.2}");
            }
            Screen::Success { staff, message }
        }
        Err(e) => failure(staff, e, TIME_OUT_FAILED_MESSAGE),
    }
}

fn failure(staff: StaffRecord, err: BackendError, fallback: &str) -> Screen {
    log::warn!("attendance update for {} failed: {err}", staff.staff_id);
    match err {
        BackendError::Transport(_) => connection_error(Some(staff)),
        BackendError::Rejected(message) => Screen::Error {
            staff: Some(staff),
            message: message
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| fallback.to_string()),
        },
        BackendError::NotFound => Screen::Error {
            staff: Some(staff),
            message: NOT_FOUND_MESSAGE.to_string(),
        },
    }
}

fn connection_error(staff: Option<StaffRecord>) -> Screen {
    Screen::Error {
        staff,
        message: CONNECTION_ERROR_MESSAGE.to_string(),
    }
}
