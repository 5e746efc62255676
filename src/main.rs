//! Terminal block-fall runner (default binary).
//!
//! Uses crossterm for input and the framebuffer renderer from `blockfall::term`.

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};
use tracing::{debug, info};

use blockfall::clock::FrameClock;
use blockfall::config::{Args, RunConfig};
use blockfall::core::{GameSession, RandomSource, SimpleRng, ThreadRandom};
use blockfall::input::{handle_key_event, should_quit};
use blockfall::logging;
use blockfall::term::{GameView, TerminalRenderer, Viewport};

type Session = GameSession<Box<dyn RandomSource>>;

fn main() -> Result<()> {
    let args = Args::parse();
    let config = RunConfig::from_env()
        .and_then(|c| c.with_args(&args))
        .context("reading configuration")?;
    logging::init(&config)?;

    let rng: Box<dyn RandomSource> = match config.seed {
        Some(seed) => Box::new(SimpleRng::new(seed)),
        None => Box::new(ThreadRandom),
    };
    info!(seed = ?config.seed, tick_ms = config.tick_ms, "starting");

    let mut session = Session::with_random(rng);
    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut session, &config);

    // Always try to restore terminal state.
    let _ = term.exit();
    info!(score = session.score(), lines = session.lines(), "exiting");
    result
}

fn run(term: &mut TerminalRenderer, session: &mut Session, config: &RunConfig) -> Result<()> {
    let view = GameView::default();
    let tick_duration = Duration::from_millis(u64::from(config.tick_ms));

    let mut clock = FrameClock::new();
    clock.lap(Instant::now());
    let mut last_tick = Instant::now();

    loop {
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        term.draw(view.render(&session.snapshot(), Viewport::new(w, h)))?;

        // Input with timeout until next tick.
        let timeout = tick_duration.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if let Some(action) = handle_key_event(key) {
                        let applied = session.apply_action(action);
                        debug!(action = action.as_str(), applied, "input");
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        if last_tick.elapsed() >= tick_duration {
            let now = Instant::now();
            last_tick = now;
            session.tick(clock.lap(now));
        }

        if let Some(event) = session.take_last_event() {
            debug!(
                lines = event.lines_cleared,
                score = event.score_delta,
                level_up = event.level_up,
                topped_out = event.topped_out,
                "lock"
            );
        }
    }
}
