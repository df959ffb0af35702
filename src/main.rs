//! neonterm entrypoint: a matrix-rain fake terminal in your real terminal.
//!
//! # Architecture
//!
//! - Input thread: blocking crossterm reads, mapped to semantic events
//! - Main loop: selects between input events and a fixed-rate animation tick
//! - All state mutation happens on the main loop; effects are deadline-driven
//!   entries stepped from the tick

mod app;
mod args;
mod config;
mod dispatch;
mod effects;
mod games;
mod history;
mod input;
mod logging;
mod output;
mod prompt;
mod rain;
mod registry;
mod terminal;
mod theme;
mod ui;

use std::io;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use crossbeam_channel::bounded;
use crossterm::terminal::size as terminal_size;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing::debug;

use crate::app::App;
use crate::config::{render_font_listing, render_theme_listing, TermConfig};
use crate::input::spawn_input_thread;
use crate::logging::init_logging;
use crate::terminal::TerminalRestoreGuard;

/// Max pending input events before backpressure.
const INPUT_CHANNEL_CAPACITY: usize = 256;

const THREAD_JOIN_POLL_MS: u64 = 10;
const INPUT_SHUTDOWN_JOIN_TIMEOUT_MS: u64 = 100;

fn frame_interval(fps: u32) -> Duration {
    Duration::from_millis(u64::from(1000 / fps.max(1)))
}

fn join_thread_with_timeout(name: &str, handle: thread::JoinHandle<()>, timeout: Duration) {
    let deadline = Instant::now() + timeout;
    loop {
        if handle.is_finished() || Instant::now() >= deadline {
            break;
        }
        thread::sleep(Duration::from_millis(THREAD_JOIN_POLL_MS));
    }

    if handle.is_finished() {
        if let Err(err) = handle.join() {
            debug!("{name} thread panicked during shutdown: {err:?}");
        }
    } else {
        debug!(
            "{name} thread did not exit within {}ms; detaching",
            timeout.as_millis()
        );
    }
}

fn main() -> Result<()> {
    let config = TermConfig::parse();
    if config.list_themes {
        print!("{}", render_theme_listing());
        return Ok(());
    }
    if config.list_fonts {
        print!("{}", render_font_listing());
        return Ok(());
    }
    config.validate()?;
    init_logging(&config)?;
    debug!("log file: {:?}", logging::log_file_path());

    let guard = TerminalRestoreGuard::new();
    guard.enable_raw_mode()?;
    let mut stdout = io::stdout();
    guard.enter_alt_screen(&mut stdout)?;
    let mut term = Terminal::new(CrosstermBackend::new(stdout))?;

    let (cols, rows) = terminal_size()?;
    let mut rng = rand::thread_rng();
    let mut app = App::new(&config, cols, rows, &mut rng);

    let (input_tx, input_rx) = bounded(INPUT_CHANNEL_CAPACITY);
    let input_handle = spawn_input_thread(input_tx);
    let ticker = crossbeam_channel::tick(frame_interval(config.fps));

    while app.running {
        crossbeam_channel::select! {
            recv(input_rx) -> event => match event {
                Ok(event) => app.handle_event(event, Instant::now(), &mut rng),
                Err(_) => break,
            },
            recv(ticker) -> _ => {
                app.on_tick(Instant::now(), &mut rng);
                term.draw(|frame| ui::draw(frame, &app))?;
            }
        }
    }

    guard.restore();
    drop(input_rx);
    join_thread_with_timeout(
        "input",
        input_handle,
        Duration::from_millis(INPUT_SHUTDOWN_JOIN_TIMEOUT_MS),
    );
    debug!("=== neonterm exiting ===");
    Ok(())
}
