//! Quote Client: a terminal front end for the ShieldCover quote flow.
//!
//! Reads one command per line from stdin, forwards it to a `QuoteSession`, and
//! prints the resulting view. While a purchase confirmation is shown, the
//! session's countdown ticker drives the return to the landing page.
//!
//! Usage example (CLI):
//! ```bash
//! cover_client                       # interactive, text output
//! cover_client --json --tick-ms 200  # interactive, JSON lines, fast countdown
//! cover_client price --body-type truck --coverage third-party --duration quarter
//! ```
//!
//! Concurrency and shutdown:
//! - A reader thread pushes stdin lines into a `crossbeam_channel`.
//! - The main loop `select!`s over input lines and countdown ticks, so the
//!   controller is only ever touched from one thread.
//! - Ctrl+C or `quit` stops the loop; end of input stops it once no countdown
//!   is running.
#![warn(missing_docs)]
mod args;
mod command;
mod render;

use crate::args::{Args, Mode};
use crate::command::{ClientCommand, HELP};
use crate::render::Renderer;
use clap::Parser;
use cover_common::flow::TickOutcome;
use cover_common::{PricingEngine, QuoteError, QuoteFlowController, QuoteRequest, QuoteSession, Result};
use crossbeam_channel::{Receiver, never, select, unbounded};
use log::{debug, error, info, warn};
use std::io::{self, BufRead, Write};
use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};
use std::thread;
use std::time::Duration;

/// How often the main loop wakes up to check the shutdown flag.
const SHUTDOWN_POLL_MS: u64 = 200;

fn main() -> Result<(), QuoteError> {
    init_logger();
    let args = Args::parse();

    if let Some(Mode::Price {
        body_type,
        coverage,
        duration,
    }) = args.mode
    {
        let quote = PricingEngine::calculate(QuoteRequest {
            body_type,
            coverage_type: coverage,
            duration,
            ..Default::default()
        });
        println!("{}", quote.display_price());
        return Ok(());
    }

    let shutdown = Arc::new(AtomicBool::new(false));
    {
        let shutdown = shutdown.clone();
        ctrlc::set_handler(move || {
            info!("Ctrl+C received. Shutting down client...");
            shutdown.store(true, Ordering::SeqCst);
        })
        .expect("Error setting Ctrl+C handler");
    }

    let session = QuoteSession::new(
        QuoteFlowController::new(),
        Duration::from_millis(args.tick_ms.max(1)),
    );
    let renderer = Renderer::new(args.json);
    let input_rx = spawn_stdin_reader();

    run_event_loop(session, &renderer, input_rx, shutdown)
}

/// Spawns a thread that forwards stdin lines into a channel. The channel closes
/// at end of input.
fn spawn_stdin_reader() -> Receiver<String> {
    let (line_tx, line_rx) = unbounded::<String>();
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            match line {
                Ok(line) => {
                    if line_tx.send(line).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    error!("Read stdin error: {}", e);
                    break;
                }
            }
        }
        debug!("Stdin reader stopping...");
    });
    line_rx
}

/// Blocking loop that multiplexes user input and countdown ticks.
fn run_event_loop(
    mut session: QuoteSession,
    renderer: &Renderer,
    input_rx: Receiver<String>,
    shutdown: Arc<AtomicBool>,
) -> Result<(), QuoteError> {
    let mut stdout = io::stdout();
    let ticks_rx = session.ticks().clone();
    let mut input_open = true;

    renderer.render(&mut stdout, &session.snapshot())?;

    while !shutdown.load(Ordering::Relaxed) {
        if !input_open && !session.timer_running() {
            info!("Input closed. Exiting...");
            break;
        }
        let lines = if input_open { input_rx.clone() } else { never() };

        select! {
            recv(lines) -> msg => match msg {
                Ok(line) => {
                    if !line.trim().is_empty()
                        && !handle_line(&mut session, renderer, &mut stdout, &line)?
                    {
                        break;
                    }
                }
                Err(_) => input_open = false,
            },
            recv(ticks_rx) -> msg => match msg {
                Ok(tick) => match session.on_tick(tick) {
                    TickOutcome::Ignored => {}
                    TickOutcome::Remaining(_) => {
                        renderer.render_tick(&mut stdout, &session.snapshot())?;
                    }
                    TickOutcome::Expired => {
                        renderer.render(&mut stdout, &session.snapshot())?;
                    }
                },
                Err(e) => return Err(QuoteError::ChannelRecv(e.to_string())),
            },
            default(Duration::from_millis(SHUTDOWN_POLL_MS)) => {}
        }
    }

    info!("Client loop stopping...");
    Ok(())
}

/// Applies one input line. Returns `false` when the user asked to quit.
fn handle_line<W: Write>(
    session: &mut QuoteSession,
    renderer: &Renderer,
    out: &mut W,
    line: &str,
) -> Result<bool, QuoteError> {
    let command = match line.parse::<ClientCommand>() {
        Ok(command) => command,
        Err(e) => {
            renderer.render_error(out, &format!("{} (type `help`)", e))?;
            return Ok(true);
        }
    };

    match command {
        ClientCommand::Flow(action) => {
            debug!("Applying {:?}", action);
            match session.apply(action) {
                Ok(()) => renderer.render(out, &session.snapshot())?,
                Err(e @ QuoteError::Validation(_)) => {
                    warn!("{}", e);
                    renderer.render_error(out, &e.to_string())?;
                    renderer.render(out, &session.snapshot())?;
                }
                Err(e) => renderer.render_error(out, &e.to_string())?,
            }
        }
        ClientCommand::Show => renderer.render(out, &session.snapshot())?,
        ClientCommand::Help => {
            writeln!(out, "{}", HELP)?;
        }
        ClientCommand::Quit => return Ok(false),
    }
    Ok(true)
}

fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
}
