use super::provider::{AttendanceBackend, CheckInReceipt, CheckOutReceipt};
use crate::{error::BackendError, staff::StaffRecord};
use chrono::{DateTime, Local};
use serde::Deserialize;
use serde_json::{Value, json};
use std::{fmt::Write as _, time::Duration};

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000/api";
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// Response envelope used by every attendance API endpoint.
#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    data: Option<Value>,
}

/// Attendance backend talking JSON over HTTP to the attendance API.
pub struct HttpBackend {
    base_url: String,
    agent: ureq::Agent,
}

impl HttpBackend {
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            agent: ureq::AgentBuilder::new().timeout(timeout).build(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn post(&self, path: &str, staff_id: &str) -> Result<Envelope, BackendError> {
        let url = format!("{}{path}", self.base_url);
        log::debug!("POST {url} staff_id={staff_id}");
        let resp = self
            .agent
            .post(&url)
            .set("Content-Type", "application/json")
            .send_json(json!({ "staff_id": staff_id }));
        read_envelope(&url, resp)
    }
}

impl AttendanceBackend for HttpBackend {
    fn lookup(&self, identifier: &str) -> Result<StaffRecord, BackendError> {
        let url = format!(
            "{}/staff/national-id/{}",
            self.base_url,
            encode_path_segment(identifier)
        );
        log::debug!("GET {url}");
        let envelope = read_envelope(&url, self.agent.get(&url).call())?;
        if !envelope.success {
            return Err(BackendError::NotFound);
        }
        let data = envelope
            .data
            .ok_or_else(|| BackendError::Transport("lookup response has no data".to_string()))?;
        serde_json::from_value(data).map_err(|e| {
            BackendError::Transport(format!("malformed staff record from {url}: {e}"))
        })
    }

    fn check_in(&self, staff_id: &str) -> Result<CheckInReceipt, BackendError> {
        let envelope = self.post("/attendance/time-in", staff_id)?;
        if !envelope.success {
            return Err(BackendError::Rejected(envelope.message));
        }
        let data = envelope.data.unwrap_or(Value::Null);
        Ok(CheckInReceipt {
            timestamp: timestamp_field(&data, "time_in"),
        })
    }

    fn check_out(&self, staff_id: &str) -> Result<CheckOutReceipt, BackendError> {
        let envelope = self.post("/attendance/time-out", staff_id)?;
        if !envelope.success {
            return Err(BackendError::Rejected(envelope.message));
        }
        let data = envelope.data.unwrap_or(Value::Null);
        let total_hours = hours_field(&data);
        if total_hours.is_none() {
            log::warn!("time-out response for {staff_id} carried no total_hours");
        }
        Ok(CheckOutReceipt {
            timestamp: timestamp_field(&data, "time_out"),
            total_hours,
        })
    }

    fn describe(&self) -> String {
        format!("http ({})", self.base_url)
    }

    fn photo_base_url(&self) -> Option<&str> {
        Some(self.base_url.as_str())
    }
}

/// Decode the JSON envelope from either a success or an error status. The API reports
/// business failures as `success: false` with a non-2xx status, so those bodies still
/// count as answers; anything unreadable is a transport failure.
fn read_envelope(
    url: &str,
    resp: Result<ureq::Response, ureq::Error>,
) -> Result<Envelope, BackendError> {
    match resp {
        Ok(r) => r
            .into_json::<Envelope>()
            .map_err(|e| BackendError::Transport(format!("invalid response from {url}: {e}"))),
        Err(ureq::Error::Status(code, r)) => r.into_json::<Envelope>().map_err(|_| {
            BackendError::Transport(format!("HTTP {code} from {url} without a JSON body"))
        }),
        Err(e) => Err(BackendError::Transport(format!("request to {url} failed: {e}"))),
    }
}

/// RFC 3339 timestamp at `data[field]`, or the local time of arrival when absent.
fn timestamp_field(data: &Value, field: &str) -> DateTime<Local> {
    data.get(field)
        .and_then(Value::as_str)
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map_or_else(Local::now, |t| t.with_timezone(&Local))
}

/// `total_hours` may arrive as a number or a numeric string.
fn hours_field(data: &Value) -> Option<f64> {
    match data.get("total_hours")? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn encode_path_segment(segment: &str) -> String {
    let mut out = String::with_capacity(segment.len());
    for byte in segment.bytes() {
        if byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'_' | b'.' | b'~') {
            out.push(char::from(byte));
        } else {
            let _ = write!(out, "%{byte:02X}");
        }
    }
    out
}
