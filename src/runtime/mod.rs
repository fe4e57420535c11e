use std::sync::Arc;
use std::sync::mpsc;

use anyhow::Context;
use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{info, warn};

use crate::audio::RodioDevice;
use crate::library::FsLister;
use crate::transport::DeviceMessage;

mod event_loop;
mod logging;
mod settings;
mod startup;

pub fn run() -> anyhow::Result<()> {
    let (settings, config_warning) = settings::load_settings();

    // Dropping the guard flushes the log file, so it lives until `run` returns.
    let _log_guard = match logging::init_logging(&settings.logging) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("riffle: logging disabled: {e:#}");
            None
        }
    };
    if let Some(warning) = config_warning {
        warn!("{warning}");
    }

    let (device_tx, device_rx) = mpsc::channel::<DeviceMessage>();
    let device = RodioDevice::spawn(device_tx, &settings.audio);
    let lister = Arc::new(FsLister::new(&settings.library));

    let mut app = startup::build_app(device, &settings);
    info!(home = app.nav.home(), "starting");

    let (listing_tx, listing_rx) = mpsc::channel::<event_loop::ListingReply>();
    let first = app.start();
    event_loop::spawn_listing(&lister, first, &listing_tx);

    enable_raw_mode().context("enabling raw mode")?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut state = event_loop::EventLoopState::default();
    let run_result = event_loop::run(
        &mut terminal,
        &settings,
        &mut app,
        &lister,
        (&listing_tx, &listing_rx),
        &device_rx,
        &mut state,
    );

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    app.transport.device_mut().shutdown();
    info!("shutdown");
    run_result
}
