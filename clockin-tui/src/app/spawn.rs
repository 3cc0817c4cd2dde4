use clockin_core::{AttendanceBackend, Request, event::AppEvent};
use std::{
    sync::{Arc, atomic::Ordering},
    thread,
};

use super::EventSender;

/// Execute `request` on a background thread and post the response to the main loop.
pub(super) fn spawn_request(
    backend: &Arc<dyn AttendanceBackend>,
    sender: &EventSender,
    request: Request,
) {
    let backend = Arc::clone(backend);
    let sender = sender.clone();
    thread::spawn(move || {
        if sender.cancel.load(Ordering::Relaxed) {
            return;
        }
        log::debug!("dispatching {request:?} to {}", backend.describe());
        let response = request.execute(backend.as_ref());
        if sender.cancel.load(Ordering::Relaxed) {
            return;
        }
        sender.send(AppEvent::BackendResponded(response));
    });
}
