mod app;
mod config;
mod logging;
mod raffle;
mod store;
mod ui;

use crate::app::action::Action;
use crate::app::event::AppEvent;
use crate::app::handler;
use crate::app::state::AppState;
use crate::app::timer::TokioScheduler;
use crate::logging::DrawLogger;
use crate::raffle::RaffleEngine;
use crate::store::FileStore;
use anyhow::{bail, Result};
use crossterm::{
    event::EventStream,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::prelude::*;
use std::io::{self, Write};
use std::path::PathBuf;
use tokio::sync::mpsc;

struct CliArgs {
    config_path: PathBuf,
    write_config: bool,
}

fn parse_args() -> Result<CliArgs> {
    let mut args = CliArgs {
        config_path: config::default_config_path(),
        write_config: false,
    };
    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--config" | "-c" => match iter.next() {
                Some(path) => args.config_path = PathBuf::from(path),
                None => bail!("--config needs a path"),
            },
            "--write-config" => args.write_config = true,
            "--help" | "-h" => {
                println!("usage: tombola [--config PATH] [--write-config]");
                std::process::exit(0);
            }
            other => bail!("unknown argument: {}", other),
        }
    }
    Ok(args)
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = parse_args()?;

    // Load config
    let cfg = config::load_config(&args.config_path)?;
    if args.write_config {
        config::save_config(&cfg, &args.config_path)?;
        println!("Wrote {}", args.config_path.display());
        return Ok(());
    }

    logging::init_tracing(&cfg.logging)?;
    tracing::info!(config = %args.config_path.display(), "starting tombola");

    // Install panic hook to restore terminal
    let prev_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = restore_terminal();
        prev_hook(info);
    }));

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let result = run_app(&mut terminal, cfg).await;

    // Restore terminal
    restore_terminal()?;

    if let Err(e) = result {
        tracing::error!(error = %e, "exiting after error");
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}

fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;
    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    cfg: config::AppConfig,
) -> Result<()> {
    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<AppEvent>();

    let store = FileStore::open(cfg.storage.path.clone());
    tracing::debug!(path = %store.path().display(), "raffle state store opened");

    let mut raffle = RaffleEngine::new(
        TokioScheduler::new(event_tx.clone()),
        Box::new(store),
        cfg.timing.to_timing(),
        &cfg.ui.timestamp_format,
    );
    let changed_tx = event_tx.clone();
    raffle.subscribe(move |_| {
        let _ = changed_tx.send(AppEvent::RaffleChanged);
    });
    let celebrate_tx = event_tx.clone();
    raffle.set_celebration(move || {
        let _ = celebrate_tx.send(AppEvent::Celebrate);
    });

    let mut state = AppState::new(cfg.clone());
    let mut draw_logger = DrawLogger::new(&cfg.logging);

    // Spawn terminal input task
    let term_tx = event_tx.clone();
    tokio::spawn(async move {
        let mut reader = EventStream::new();
        loop {
            match reader.next().await {
                Some(Ok(event)) => {
                    if term_tx.send(AppEvent::Terminal(event)).is_err() {
                        break;
                    }
                }
                Some(Err(_)) => break,
                None => break,
            }
        }
    });

    // Spawn tick task (20 FPS = 50ms)
    let tick_tx = event_tx.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(std::time::Duration::from_millis(50));
        loop {
            interval.tick().await;
            if tick_tx.send(AppEvent::Tick).is_err() {
                break;
            }
        }
    });

    // Initial render
    terminal.draw(|f| ui::render(f, &state, &raffle))?;

    // Main event loop
    loop {
        let event = event_rx.recv().await;
        let Some(event) = event else { break };

        let actions = handler::handle_event(&mut state, &raffle, event);

        // Drain completed draws for the results log
        for entry in state.new_results.drain(..) {
            draw_logger.log_draw(&entry);
        }

        // Process actions
        for action in actions {
            match action {
                Action::TriggerDraw => raffle.trigger_draw(),
                Action::ResetDraw => raffle.reset_draw(),
                Action::ClearHistory => raffle.clear_history(),
                Action::WipeData => raffle.wipe_data(),
                Action::SetDigitCount(n) => raffle.set_digit_count(n),
                Action::SetManualReveal(on) => raffle.set_manual_reveal(on),
                Action::SetCountdownEnabled(on) => raffle.set_countdown_enabled(on),
                Action::SetCountdownDuration(n) => raffle.set_countdown_duration(n),
                Action::RenameWinner { id, name } => {
                    if raffle.update_winner_name(id, &name) {
                        state.set_status(format!("Renamed entry {}", id));
                    }
                }
                Action::FireTimer(handle) => raffle.fire(handle),
                Action::Quit => state.should_quit = true,
            }
        }

        if state.should_quit {
            break;
        }

        // Bell
        if state.pending_bell {
            let _ = io::stdout().write_all(b"\x07");
            let _ = io::stdout().flush();
            state.pending_bell = false;
        }

        // Conditional render (only if dirty)
        if state.dirty {
            terminal.draw(|f| ui::render(f, &state, &raffle))?;
            state.dirty = false;
        }
    }

    tracing::info!("shutting down");
    Ok(())
}
