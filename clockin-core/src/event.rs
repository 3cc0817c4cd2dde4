use crate::kiosk::Response;

/// Events that arrive from background threads.
/// These get merged into the main event loop alongside keyboard input.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// A backend request finished, successfully or not
    BackendResponded(Response),
}
