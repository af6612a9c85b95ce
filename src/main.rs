//! Terminal lifecycle, event loop, and cleanup for the FixMySheet client.

mod actions;
mod app;
mod backend;
mod config;
mod dedupe;
mod error;
mod events;
mod state;
mod ui;

use std::fs::{self, File};
use std::io;
use std::path::Path;
use std::sync::Mutex;

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing_subscriber::EnvFilter;

use app::App;
use backend::BackendClient;
use config::{EndpointConfig, FileStore, KeyValueStore};
use events::{key_to_action, TICK_RATE};

const LOG_FILE: &str = "fixmysheet.log";

/// The log holds one session; it is truncated at startup.
fn open_log(dir: &Path) -> io::Result<File> {
    fs::create_dir_all(dir)?;
    File::create(dir.join(LOG_FILE))
}

/// Logs go to a file; the terminal belongs to the UI while it runs.
fn init_logging() -> Result<()> {
    let filter = EnvFilter::from_default_env().add_directive("fixmysheet_tui=info".parse()?);
    match open_log(&config::app_dir()) {
        Ok(file) => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .init(),
        Err(_) => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(io::stderr)
            .init(),
    }
    Ok(())
}

fn main() -> Result<()> {
    init_logging()?;

    let runtime = tokio::runtime::Runtime::new()?;
    let store = FileStore::open_default();
    tracing::info!("settings at {}", store.path().display());

    // Set up the terminal in raw / alternate-screen mode.
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, DisableMouseCapture)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    terminal.show_cursor()?;

    let mut app = App::new(BackendClient::new(), EndpointConfig::new(store), runtime.handle().clone());
    app.bootstrap();

    let result = run_loop(&mut terminal, &mut app);

    // Always restore the terminal, even on error.
    let _ = disable_raw_mode();
    let _ = execute!(terminal.backend_mut(), LeaveAlternateScreen);
    let _ = terminal.show_cursor();

    // In-flight requests are abandoned on quit.
    runtime.shutdown_background();
    result
}

fn run_loop<S: KeyValueStore>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App<S>,
) -> Result<()> {
    loop {
        app.tick = app.tick.wrapping_add(1);
        app.poll_results();

        if app.should_quit {
            return Ok(());
        }

        let tick = app.tick;
        terminal.draw(|frame| ui::render(frame, &app.state, tick))?;

        if event::poll(TICK_RATE)? {
            if let Event::Key(key) = event::read()? {
                if let Some(a) = key_to_action(&key, app.state.focus) {
                    app.dispatch(a);
                    if app.should_quit {
                        return Ok(());
                    }
                }
            }
        }
    }
}
