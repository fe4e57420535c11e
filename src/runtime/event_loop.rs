use std::io::Stdout;
use std::sync::Arc;
use std::sync::mpsc::{Receiver, Sender};
use std::thread;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::debug;

use crate::app::{App, ViewMode};
use crate::config;
use crate::library::{DirectoryLister, Entry, ListError};
use crate::nav::NavRequest;
use crate::transport::{AudioDevice, DeviceMessage};
use crate::ui;

/// A finished listing coming back from a worker thread.
#[derive(Debug)]
pub struct ListingReply {
    pub token: u64,
    pub path: String,
    pub result: Result<Vec<Entry>, ListError>,
}

/// What the loop should do after a key press.
#[derive(Debug, PartialEq, Eq)]
pub enum Action {
    Continue,
    Navigate(NavRequest),
    Quit,
}

/// State tracked by the runtime event loop across iterations.
#[derive(Debug, Default)]
pub struct EventLoopState {
    /// Internal two-key prefix state used for `gg` handling.
    pub pending_gg: bool,
}

/// Run `request` on a short-lived worker thread and send the result to `tx`.
pub fn spawn_listing<L>(lister: &Arc<L>, request: NavRequest, tx: &Sender<ListingReply>)
where
    L: DirectoryLister + Send + Sync + 'static,
{
    let lister = Arc::clone(lister);
    let tx = tx.clone();
    thread::spawn(move || {
        let result = lister.list(&request.path);
        // The receiver is gone only during shutdown.
        let _ = tx.send(ListingReply {
            token: request.token,
            path: request.path,
            result,
        });
    });
}

/// Main terminal event loop: draws, drains the listing and device channels,
/// and handles input. Returns `Ok(())` when the user quits.
pub fn run<D, L>(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    settings: &config::Settings,
    app: &mut App<D>,
    lister: &Arc<L>,
    listings: (&Sender<ListingReply>, &Receiver<ListingReply>),
    device_events: &Receiver<DeviceMessage>,
    state: &mut EventLoopState,
) -> anyhow::Result<()>
where
    D: AudioDevice,
    L: DirectoryLister + Send + Sync + 'static,
{
    let (listing_tx, listing_rx) = listings;
    let notice_ttl = Duration::from_millis(settings.ui.notification_ms);

    loop {
        while let Ok(reply) = listing_rx.try_recv() {
            debug!(token = reply.token, path = %reply.path, "listing finished");
            app.apply_listing(reply.token, reply.result);
        }
        while let Ok((generation, event)) = device_events.try_recv() {
            app.handle_device_event(generation, event);
        }
        app.expire_notices(Instant::now(), notice_ttl);

        terminal.draw(|f| ui::draw(f, app, &settings.ui, &settings.controls))?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                let columns = ui::grid_columns(terminal.size()?.width.saturating_sub(2));
                match handle_key_event(key, settings, app, state, columns) {
                    Action::Continue => {}
                    Action::Navigate(request) => spawn_listing(lister, request, listing_tx),
                    Action::Quit => break,
                }
            }
        }
    }

    Ok(())
}

/// Apply one key press to `app`.
///
/// `columns` is the grid width in cells; vertical moves jump a whole grid row.
pub fn handle_key_event<D: AudioDevice>(
    key: KeyEvent,
    settings: &config::Settings,
    app: &mut App<D>,
    state: &mut EventLoopState,
    columns: usize,
) -> Action {
    if app.picker.is_some() {
        state.pending_gg = false;
        return handle_picker_key(key, app);
    }

    let row_step = match app.view {
        ViewMode::List => 1,
        ViewMode::Grid => columns.max(1) as isize,
    };
    let scrub = settings.controls.scrub_seconds as f64;
    let volume_step = settings.audio.volume_step;

    if key.code != KeyCode::Char('g') {
        state.pending_gg = false;
    }

    match key.code {
        KeyCode::Char('q') => return Action::Quit,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            return Action::Quit;
        }
        KeyCode::Char('j') | KeyCode::Down => app.move_selection(row_step),
        KeyCode::Char('k') | KeyCode::Up => app.move_selection(-row_step),
        KeyCode::Right if app.view == ViewMode::Grid => app.move_selection(1),
        KeyCode::Left if app.view == ViewMode::Grid => app.move_selection(-1),
        KeyCode::Char('g') => {
            if state.pending_gg {
                state.pending_gg = false;
                app.select_first();
            } else {
                state.pending_gg = true;
            }
        }
        KeyCode::Char('G') => app.select_last(),
        KeyCode::Enter => {
            if let Some(request) = app.activate_selected() {
                return Action::Navigate(request);
            }
        }
        KeyCode::Backspace => {
            if let Some(request) = app.go_up() {
                return Action::Navigate(request);
            }
        }
        KeyCode::Char('o') => app.open_picker(),
        KeyCode::Char('p') | KeyCode::Char(' ') => app.toggle_play_pause(),
        KeyCode::Char('s') => app.stop(),
        KeyCode::Char('l') => app.next_track(),
        KeyCode::Char('h') => app.previous_track(),
        KeyCode::Char('L') => app.seek_by(scrub),
        KeyCode::Char('H') => app.seek_by(-scrub),
        KeyCode::Char('+') | KeyCode::Char('=') => app.nudge_volume(volume_step),
        KeyCode::Char('-') => app.nudge_volume(-volume_step),
        KeyCode::Char('r') => {
            app.toggle_repeat();
        }
        KeyCode::Char('v') => app.toggle_view(),
        _ => {}
    }

    Action::Continue
}

fn handle_picker_key<D: AudioDevice>(key: KeyEvent, app: &mut App<D>) -> Action {
    match key.code {
        KeyCode::Esc => app.cancel_picker(),
        KeyCode::Backspace => app.picker_pop(),
        KeyCode::Enter => {
            if let Some(request) = app.confirm_picker() {
                return Action::Navigate(request);
            }
        }
        KeyCode::Char(c) if !c.is_control() => app.picker_push(c),
        _ => {}
    }
    Action::Continue
}
