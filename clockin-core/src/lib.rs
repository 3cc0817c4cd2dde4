pub mod action;
pub mod attendance;
pub mod backend;
pub mod config;
pub mod error;
pub mod event;
pub mod input;
pub mod kiosk;
pub mod staff;
pub mod timer;

// Re-export commonly used types at crate root
pub use action::Action;
pub use backend::{AttendanceBackend, HttpBackend, InMemoryBackend};
pub use config::Config;
pub use error::BackendError;
pub use event::AppEvent;
pub use kiosk::{Kiosk, Request, Response, Screen};
pub use staff::StaffRecord;
