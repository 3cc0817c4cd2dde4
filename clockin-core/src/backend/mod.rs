pub mod http;
pub mod memory;
pub mod mock;
pub mod provider;

pub use http::HttpBackend;
pub use memory::InMemoryBackend;
pub use provider::{AttendanceBackend, CheckInReceipt, CheckOutReceipt};

use crate::config::{BackendConfig, BackendKind};
use std::sync::Arc;

/// Construct the backend selected by `config`.
pub fn from_config(config: &BackendConfig) -> Arc<dyn AttendanceBackend> {
    let backend: Arc<dyn AttendanceBackend> = match config.kind {
        BackendKind::Http => Arc::new(HttpBackend::new(&config.base_url, config.timeout())),
        BackendKind::Memory if config.staff.is_empty() => Arc::new(InMemoryBackend::demo()),
        BackendKind::Memory => Arc::new(InMemoryBackend::new(config.staff.clone())),
    };
    log::info!("attendance backend: {}", backend.describe());
    backend
}
