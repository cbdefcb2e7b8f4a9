mod display;

use std::fs::File;
use std::io::{stdout, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser;
use crossterm::{
    cursor,
    event::{self, Event, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    terminal, ExecutableCommand,
};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use night_runner::audio::{Sfx, Silent};
use night_runner::config::{ConfigError, GameConfig, TerminalConfig};
use night_runner::driver::{Driver, FrameOutcome, Phase};
use night_runner::entities::Sound;
use night_runner::input::{Command, KeyTracker};
use night_runner::session::Session;
use night_runner::surface::Surface;

use display::TerminalSurface;

/// Picked up from the working directory when `--config` is not given.
const DEFAULT_CONFIG_PATH: &str = "night_runner.ron";

/// Frames a one-shot notice stays on screen (≈2 s at 30 FPS).
const NOTICE_FRAMES: u64 = 60;

const HINT_READY: &str =
    "S : Start   ← → : Run   ↑ : Jump   ↓+ENTER : Dive   ENTER/SPACE : Roll   D : Debug   F : Fullscreen   Q : Quit";
const HINT_RUNNING: &str = "← → : Run   ↑ : Jump   ↓+ENTER : Dive   ENTER/SPACE : Roll   Q : Quit";
const HINT_OVER: &str = "S : Play Again   Q : Quit";

#[derive(Parser, Debug)]
#[command(name = "night_runner", version, about = "Side-scrolling night runner for the terminal")]
struct Cli {
    /// RON config file; fields it omits keep their defaults
    #[arg(long, short)]
    config: Option<PathBuf>,
    /// Seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,
    /// Show hitboxes and the player state from the start
    #[arg(long)]
    debug: bool,
    /// Write logs to this file (stdout is the game screen)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

// ── Audio ─────────────────────────────────────────────────────────────────────

/// Rings the terminal bell when the player gets hit.
struct TerminalBell;

impl Sfx for TerminalBell {
    fn play(&mut self, sound: Sound) {
        debug!(?sound, "sfx");
        if sound == Sound::Hit {
            let mut out = stdout();
            let _ = out.write_all(b"\x07");
            let _ = out.flush();
        }
    }
}

// ── Setup helpers ─────────────────────────────────────────────────────────────

fn init_logging(path: Option<&Path>) -> anyhow::Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn load_config(path: Option<&Path>) -> anyhow::Result<GameConfig> {
    let config = match path {
        Some(path) => GameConfig::load_from_file(path)?,
        None => match GameConfig::load_or_default(DEFAULT_CONFIG_PATH) {
            (cfg, None) => {
                info!(path = DEFAULT_CONFIG_PATH, "loaded config");
                cfg
            }
            (cfg, Some(ConfigError::Read { source, .. })) if source.kind() == ErrorKind::NotFound => cfg,
            (cfg, Some(e)) => {
                warn!(error = %e, "ignoring config, using defaults");
                cfg
            }
        },
    };
    for warning in config.validate() {
        warn!(%warning, "config");
    }
    Ok(config)
}

fn new_session(config: &GameConfig, cli: &Cli) -> Session {
    let mut session = Session::new(config.clone(), cli.seed);
    session.world_mut().debug = cli.debug;
    session
}

/// Resize the terminal to the configured grid, or back to `restore` if it
/// is already there.  Hosts that ignore the request are reported as errors.
fn toggle_fullscreen<W: Write>(
    out: &mut W,
    cfg: &TerminalConfig,
    restore: (u16, u16),
) -> std::io::Result<(u16, u16)> {
    let current = terminal::size()?;
    let wanted = if current == (cfg.fullscreen_columns, cfg.fullscreen_rows) {
        restore
    } else {
        (cfg.fullscreen_columns, cfg.fullscreen_rows)
    };
    out.execute(terminal::SetSize(wanted.0, wanted.1))?;
    let now = terminal::size()?;
    if now != wanted {
        return Err(std::io::Error::new(
            ErrorKind::Unsupported,
            format!("terminal stayed at {}x{}", now.0, now.1),
        ));
    }
    Ok(now)
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs until the player quits.  Input arrives from the reader thread over
/// `rx`; each frame drains it without blocking, feeds the driver one
/// timestamp, presents the surface and sleeps out the rest of the frame.
fn game_loop<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    config: &GameConfig,
    cli: &Cli,
) -> std::io::Result<()> {
    let (cols, rows) = terminal::size()?;
    let original_size = (cols, rows);
    let mut surface = TerminalSurface::new(cols, rows, config.world.width, config.world.height);

    let mut session = new_session(config, cli);
    let mut driver = Driver::new();
    driver.prime(&mut session, &mut surface);

    let mut sfx: Box<dyn Sfx> = if config.terminal.bell {
        Box::new(TerminalBell)
    } else {
        Box::new(Silent)
    };
    let mut tracker = KeyTracker::new();
    let frame_period = Duration::from_millis(config.terminal.frame_ms);
    let session_timeout = Duration::from_secs(config.terminal.session_timeout_secs);
    let epoch = Instant::now();
    let mut session_started = Instant::now();
    let mut notice: Option<(String, u64)> = None;
    let mut frame: u64 = 0;

    loop {
        let frame_start = Instant::now();
        frame += 1;
        let mut dirty = false;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            match ev {
                Event::Key(key) => match tracker.handle(&key, frame) {
                    Some(Command::Quit) => return Ok(()),
                    Some(Command::Start) => {
                        driver.start(&mut session, &mut surface);
                        dirty = true;
                    }
                    Some(Command::ToggleDebug) => {
                        session.toggle_debug();
                        dirty = true;
                    }
                    Some(Command::Fullscreen) => {
                        if let Err(e) = toggle_fullscreen(out, &config.terminal, original_size) {
                            warn!(error = %e, "fullscreen request rejected");
                            notice = Some((
                                format!("Error can't enable full screen mode, {e}"),
                                frame + NOTICE_FRAMES,
                            ));
                        }
                    }
                    None => {}
                },
                Event::Resize(cols, rows) => {
                    surface.resize(cols, rows);
                    dirty = true;
                }
                _ => {}
            }
        }
        tracker.expire(frame);

        // ── Advance the simulation ────────────────────────────────────────────
        let intents = tracker.intents(frame);
        let timestamp = epoch.elapsed().as_secs_f64() * 1000.0;
        let outcome = driver.frame(timestamp, &mut session, &intents, &mut surface, sfx.as_mut());
        if outcome == FrameOutcome::Idle && dirty {
            surface.clear();
            session.world().draw(&mut surface);
        }

        // ── Safety valve: rebuild everything after the session timeout ────────
        if session_started.elapsed() >= session_timeout {
            info!(
                timeout_secs = config.terminal.session_timeout_secs,
                "session timeout reached, reloading"
            );
            session = new_session(config, cli);
            driver = Driver::new();
            driver.prime(&mut session, &mut surface);
            tracker = KeyTracker::new();
            session_started = Instant::now();
        }

        let hint = match driver.phase() {
            Phase::Running => HINT_RUNNING,
            Phase::Idle if session.is_over() => HINT_OVER,
            Phase::Idle => HINT_READY,
        };
        let active_notice = notice
            .as_ref()
            .filter(|(_, until)| frame <= *until)
            .map(|(text, _)| text.as_str());
        surface.present(out, hint, active_notice)?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_period {
            thread::sleep(frame_period - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_deref())?;
    let config = load_config(cli.config.as_deref())?;

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode().context("failed to enable raw mode")?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back to the hold window.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break;
                }
            }
            Err(_) => break,
        }
    });

    let result = game_loop(&mut out, &rx, &config, &cli);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result.context("game loop failed")
}
