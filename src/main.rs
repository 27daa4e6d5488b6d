//! Flip-dot Tetris runner (default binary).
//!
//! Runs the engine against a simulated flip-dot panel in the terminal. An
//! autopilot nudges the falling piece; there is no player control. `q` or Esc quits.

use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};
use tracing::{info, trace};
use tracing_subscriber::EnvFilter;

use flipdot_tetris::core::{EntropyRng, Frame, GameState, RandomSource, SimpleRng, ThreadPause};
use flipdot_tetris::demo::{should_quit, Autopilot, GAME_OVER_WORDS};
use flipdot_tetris::panel::{PanelRenderer, TerminalPanel};
use flipdot_tetris::types::{ActionOutcome, GameAction};
use flipdot_tetris::FlipdotConfig;

#[cfg(unix)]
const NULL_DEVICE: &str = "/dev/null";
#[cfg(windows)]
const NULL_DEVICE: &str = "NUL";

#[derive(Parser)]
#[command(name = "flipdot-tetris", version, about = "Falling blocks on a simulated flip-dot panel")]
struct Cli {
    /// Path to the TOML config file (defaults apply if it does not exist)
    #[arg(short, long, default_value = "flipdot-tetris.toml")]
    config: PathBuf,

    /// Fixed seed for the piece sequence (overrides the config file)
    #[arg(short, long)]
    seed: Option<u32>,
}

/// Restore terminal state - called on panic
fn restore_terminal() {
    use crossterm::{
        cursor, execute,
        terminal::{disable_raw_mode, LeaveAlternateScreen},
    };
    let _ = disable_raw_mode();
    let _ = execute!(std::io::stdout(), LeaveAlternateScreen, cursor::Show);
}

/// Log to a file; stdout belongs to the panel.
fn init_logging(config: &FlipdotConfig) {
    let Ok(log_file) = File::create(&config.log_file).or_else(|_| File::create(NULL_DEVICE)) else {
        return;
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(log_file))
        .with_ansi(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = FlipdotConfig::load(&cli.config)?;
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }
    init_logging(&config);
    info!(?config, "starting");

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        restore_terminal();
        original_hook(panic_info);
    }));

    let mut panel = TerminalPanel::new();
    panel.enter()?;

    let result = match config.seed {
        Some(seed) => run(
            &config,
            &mut panel,
            SimpleRng::new(seed),
            SimpleRng::new(seed.rotate_left(16)),
        ),
        None => run(&config, &mut panel, EntropyRng::new(), EntropyRng::new()),
    };

    // Always try to restore terminal state.
    let _ = panel.exit();
    result
}

fn run<R: RandomSource, A: RandomSource>(
    config: &FlipdotConfig,
    panel: &mut TerminalPanel,
    rng: R,
    pilot_rng: A,
) -> Result<()> {
    let mut renderer = PanelRenderer::new(panel);
    let mut autopilot = Autopilot::new(pilot_rng);
    let mut game = GameState::new(rng, ThreadPause).with_flash_pause(config.flash_pause());
    game.init_game();
    renderer.fill(false)?;

    let drop_interval = config.drop_interval();
    let nudge_interval = drop_interval / 2;
    let mut frame = Frame::new();
    let mut last_drop = Instant::now();
    let mut last_nudge = Instant::now();

    loop {
        game.compose_frame_into(&mut frame);
        renderer.draw_frame(&frame)?;

        let until_drop = drop_interval.saturating_sub(last_drop.elapsed());
        let until_nudge = nudge_interval.saturating_sub(last_nudge.elapsed());
        if quit_requested(until_drop.min(until_nudge))? {
            return Ok(());
        }

        if last_nudge.elapsed() >= nudge_interval {
            last_nudge = Instant::now();
            if let Some(action) = autopilot.next_action() {
                let outcome = game.apply_action(action);
                trace!(action = action.as_str(), ?outcome, "autopilot");
            }
        }

        if last_drop.elapsed() < drop_interval {
            continue;
        }
        last_drop = Instant::now();

        // Line clears block inside the drop; the observer keeps the panel blinking.
        let mut flash_error = None;
        let outcome = game.apply_action_with(GameAction::SoftDrop, |flash| {
            if flash_error.is_none() {
                flash_error = renderer.draw_frame(flash).err();
            }
        });
        if let Some(err) = flash_error {
            return Err(err);
        }

        match outcome {
            ActionOutcome::Locked { lines_cleared } if lines_cleared > 0 => {
                info!(lines_cleared, total = game.total_cleared(), "lines cleared");
            }
            ActionOutcome::GameOver => {
                game.compose_frame_into(&mut frame);
                renderer.draw_frame(&frame)?;
                for word in GAME_OVER_WORDS {
                    renderer.draw_text(word)?;
                    if quit_requested(config.message_hold())? {
                        return Ok(());
                    }
                }
                if !config.restart_on_game_over {
                    return Ok(());
                }
                game.init_game();
                last_drop = Instant::now();
            }
            _ => {}
        }
    }
}

/// Wait up to `timeout` for a key press; true if it was a quit key.
fn quit_requested(timeout: Duration) -> Result<bool> {
    let deadline = Instant::now() + timeout;
    loop {
        let remaining = deadline.saturating_duration_since(Instant::now());
        if !event::poll(remaining)? {
            return Ok(false);
        }
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press && should_quit(key) {
                return Ok(true);
            }
        }
        if remaining.is_zero() {
            return Ok(false);
        }
    }
}
