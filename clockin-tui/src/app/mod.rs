mod spawn;

use crate::{components, keymap, theme::Theme};
use clockin_core::{
    AttendanceBackend, Kiosk, Screen, action::Action, config::KioskConfig, event::AppEvent,
};
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Constraint, Layout},
};
use spawn::spawn_request;
use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
        mpsc,
    },
    time::{Duration, Instant},
};

/// Static presentation settings for the kiosk
pub struct KioskOptions {
    pub title: String,
}

impl KioskOptions {
    pub fn from_config(config: &KioskConfig) -> Self {
        Self {
            title: config.title.clone(),
        }
    }
}

/// Handle for dispatching background work
#[derive(Clone)]
pub struct EventSender {
    tx: mpsc::Sender<AppEvent>,
    cancel: Arc<AtomicBool>,
}

impl EventSender {
    /// Send an event from a background thread to the main loop
    pub fn send(&self, event: AppEvent) {
        let _ = self.tx.send(event);
    }
}

/// Run the kiosk until the user quits.
pub fn run(
    terminal: &mut DefaultTerminal,
    kiosk: &mut Kiosk,
    backend: &Arc<dyn AttendanceBackend>,
    theme: &Theme,
    options: &KioskOptions,
) -> anyhow::Result<()> {
    let (tx, rx) = mpsc::channel::<AppEvent>();
    let cancel = Arc::new(AtomicBool::new(false));
    let event_sender = EventSender {
        tx,
        cancel: Arc::clone(&cancel),
    };
    let started = Instant::now();

    loop {
        kiosk.poll(Instant::now(), chrono::Local::now());
        terminal.draw(|f| {
            draw(
                f,
                kiosk,
                backend.photo_base_url(),
                theme,
                options,
                started.elapsed().as_millis(),
            );
        })?;

        // Check background channel (non-blocking)
        if let Ok(app_event) = rx.try_recv() {
            process_app_event(app_event, kiosk);
            continue;
        }

        // Poll terminal events with a timeout so the clock and countdown keep moving
        if event::poll(Duration::from_millis(80))?
            && let Event::Key(key) = event::read()?
        {
            if key.kind != KeyEventKind::Press {
                continue;
            }

            if let Some(action) = keymap::resolve_action(key, kiosk)
                && process_action(action, kiosk, backend, &event_sender)
            {
                // Signal cancellation to background threads
                cancel.store(true, Ordering::Relaxed);
                return Ok(());
            }
        }
    }
}

fn draw(
    f: &mut Frame,
    kiosk: &Kiosk,
    photo_base: Option<&str>,
    theme: &Theme,
    options: &KioskOptions,
    elapsed_ms: u128,
) {
    let [header_area, body_area, footer_area] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Min(1),
        Constraint::Length(1),
    ])
    .areas(f.area());

    components::header::draw(f, header_area, &options.title, kiosk.clock(), theme);

    match kiosk.screen() {
        Screen::Idle => components::idle::draw(f, body_area, kiosk, theme, elapsed_ms),
        Screen::Profile { staff } => components::profile::draw(
            f,
            body_area,
            staff,
            kiosk.is_busy(),
            photo_base,
            theme,
            elapsed_ms,
        ),
        screen @ (Screen::Success { .. } | Screen::Error { .. }) => components::outcome::draw(
            f,
            body_area,
            screen,
            kiosk.auto_reset_remaining(Instant::now()),
            theme,
        ),
    }

    components::footer::draw(f, footer_area, kiosk.screen(), kiosk.is_busy(), theme);
}

/// Handle events from background tasks
fn process_app_event(event: AppEvent, kiosk: &mut Kiosk) {
    match event {
        AppEvent::BackendResponded(response) => {
            kiosk.apply(response, Instant::now());
        }
    }
}

fn edit_input(kiosk: &mut Kiosk, edit: impl FnOnce(&mut clockin_core::input::InputBuffer)) {
    if let Some(input) = kiosk.input_mut() {
        edit(input);
    }
}

/// Apply a user action. Returns true when the kiosk should exit.
fn process_action(
    action: Action,
    kiosk: &mut Kiosk,
    backend: &Arc<dyn AttendanceBackend>,
    sender: &EventSender,
) -> bool {
    match action {
        Action::Quit => return true,

        Action::InputPush(c) => {
            // Typing on a result screen starts over with the new identifier
            if kiosk.screen().is_terminal() {
                kiosk.reset();
            }
            edit_input(kiosk, |input| input.insert(c));
        }
        Action::InputPop => edit_input(kiosk, |input| {
            input.backspace();
        }),
        Action::InputDeleteWord => edit_input(kiosk, |input| input.delete_word()),
        Action::InputClear => edit_input(kiosk, |input| input.clear()),
        Action::CursorLeft => edit_input(kiosk, |input| input.cursor_left()),
        Action::CursorRight => edit_input(kiosk, |input| input.cursor_right()),
        Action::CursorStart => edit_input(kiosk, |input| input.cursor_start()),
        Action::CursorEnd => edit_input(kiosk, |input| input.cursor_end()),

        Action::Submit => {
            if let Some(request) = kiosk.submit_identifier() {
                spawn_request(backend, sender, request);
            }
        }
        Action::CheckIn => {
            if let Some(request) = kiosk.record_check_in() {
                spawn_request(backend, sender, request);
            }
        }
        Action::CheckOut => {
            if let Some(request) = kiosk.record_check_out() {
                spawn_request(backend, sender, request);
            }
        }
        Action::Reset => kiosk.reset(),
    }

    false
}
