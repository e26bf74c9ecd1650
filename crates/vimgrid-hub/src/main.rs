mod app;
mod compare;
mod config;
mod exercises;
mod logging;

use std::io;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event, execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::info;

use app::App;
use config::HubConfig;
use exercises::EXERCISES;

fn main() -> Result<()> {
    let config = HubConfig::parse();
    let start = config.exercise_index(EXERCISES.len())?;

    let log_path = logging::init()?;
    info!(log = %log_path.display(), ?config, "vimgrid starting");

    let mut app = App::new(EXERCISES, start, config.width());

    // Setup terminal
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Main event loop
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        tracing::error!("event loop failed: {err:?}");
        eprintln!("Error: {err:?}");
    }

    Ok(())
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    const TICK_RATE: Duration = Duration::from_millis(50);

    loop {
        terminal.draw(|frame| {
            app.render(frame);
        })?;

        if app.should_quit {
            info!("quit requested");
            return Ok(());
        }

        if event::poll(TICK_RATE)? {
            let ev = event::read()?;
            app.handle_event(ev);
        }
    }
}
