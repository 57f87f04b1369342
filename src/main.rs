mod display;

use std::fs::OpenOptions;
use std::io::{stdout, BufWriter, Write};
use std::path::PathBuf;
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::rngs::StdRng;
use tracing::{info, warn};

use summit_climb::config::GameConfig;
use summit_climb::content::Guidebook;
use summit_climb::driver::{FrameHost, FrameId, GameLoop, ListenerId};
use summit_climb::entities::{Avatar, ClimbState, Viewport};
use summit_climb::headless::run_autopilot;
use summit_climb::input::{InputTracker, KeyTarget};
use summit_climb::raster::Surface;
use summit_climb::worldgen::start_run;

/// How long to nap between input polls when no frame is scheduled.
const IDLE_POLL: Duration = Duration::from_millis(30);

#[derive(Debug, Parser)]
#[command(name = "summit_climb", about = "Climb the mountain, learn the 7 habits")]
struct Cli {
    /// JSON config file; the flags below override its fields.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Pin the mountain layout instead of generating a fresh one each run.
    #[arg(long)]
    seed: Option<u64>,
    /// Skip the menu and start with this avatar (man, girl or dog).
    #[arg(long)]
    avatar: Option<Avatar>,
    #[arg(long)]
    fps: Option<u32>,
    /// Frames a key stays held without a repeat, for terminals that never
    /// report key releases.  0 turns the window off.
    #[arg(long)]
    hold_window: Option<u64>,
    /// JSON file with exactly seven {number, title, description} entries.
    #[arg(long)]
    guide: Option<PathBuf>,
    /// Append logs here while the game owns the terminal.
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
    /// Run the autopilot for at most this many frames without a terminal
    /// and print the final snapshot as JSON.
    #[arg(long, value_name = "FRAMES")]
    headless: Option<u64>,
}

impl Cli {
    fn config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::load(path)?,
            None => GameConfig::default(),
        };
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if let Some(fps) = self.fps {
            config.frames_per_second = fps;
        }
        if let Some(window) = self.hold_window {
            config.hold_window = (window > 0).then_some(window);
        }
        Ok(config)
    }
}

/// Headless runs log to stderr.  The interactive game owns the terminal, so
/// its logs go to `--log-file` or nowhere.
fn init_tracing(cli: &Cli) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    // A subscriber installed earlier wins; nothing to report.
    let _ = match (&cli.log_file, cli.headless) {
        (Some(path), _) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("failed to open log file {}", path.display()))?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).try_init()
        }
        (None, Some(_)) => builder.with_writer(std::io::stderr).try_init(),
        (None, None) => builder.with_writer(std::io::sink).try_init(),
    };
    Ok(())
}

// ── Terminal frame host ───────────────────────────────────────────────────────

/// Paces frames against a fixed refresh interval.  Key events reach the
/// tracker only while an input listener is attached.
struct TerminalHost {
    interval: Duration,
    next_id: u64,
    pending: Option<(FrameId, Instant)>,
    listener: Option<ListenerId>,
}

impl TerminalHost {
    fn new(interval: Duration) -> Self {
        Self {
            interval,
            next_id: 0,
            pending: None,
            listener: None,
        }
    }

    fn input_attached(&self) -> bool {
        self.listener.is_some()
    }

    /// The scheduled frame, once its deadline has passed.
    fn take_due_frame(&mut self, now: Instant) -> Option<FrameId> {
        match self.pending {
            Some((id, due)) if now >= due => {
                self.pending = None;
                Some(id)
            }
            _ => None,
        }
    }

    fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.pending.map(|(_, due)| due.saturating_duration_since(now))
    }

    fn next(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

impl FrameHost for TerminalHost {
    fn request_frame(&mut self) -> FrameId {
        let id = FrameId(self.next());
        self.pending = Some((id, Instant::now() + self.interval));
        id
    }

    fn cancel_frame(&mut self, id: FrameId) {
        if matches!(self.pending, Some((pending, _)) if pending == id) {
            self.pending = None;
        }
    }

    fn attach_input(&mut self) -> ListenerId {
        let id = ListenerId(self.next());
        self.listener = Some(id);
        id
    }

    fn detach_input(&mut self, id: ListenerId) {
        if self.listener == Some(id) {
            self.listener = None;
        }
    }
}

// ── Climb loop ────────────────────────────────────────────────────────────────

enum ClimbExit {
    Quit,
    Menu,
}

fn new_run(config: &GameConfig, avatar: Avatar, rng: &mut StdRng) -> Result<ClimbState> {
    start_run(config.viewport, avatar, rng).context("failed to start a new climb")
}

/// Returns when the player quits or asks for the menu.  Enter closes an
/// open checkpoint; R restarts on a fresh mountain once the run is over.
fn climb_loop<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    config: &GameConfig,
    guide: &Guidebook,
    avatar: Avatar,
) -> Result<ClimbExit> {
    let mut rng = config.world_rng();
    let mut host = TerminalHost::new(config.frame_interval());
    let mut tracker = InputTracker::new(config.hold_window);
    let mut surface = Surface::new(config.viewport.width, config.viewport.height);
    let mut game = GameLoop::start(new_run(config, avatar, &mut rng)?, &mut host);

    loop {
        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(event) = rx.try_recv() {
            let Event::Key(KeyEvent { code, kind, modifiers, .. }) = event else {
                continue;
            };

            if kind == KeyEventKind::Press {
                let finished = game.phase().is_terminal();
                match code {
                    KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                        game.teardown(&mut host);
                        return Ok(ClimbExit::Quit);
                    }
                    KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                        game.teardown(&mut host);
                        return Ok(ClimbExit::Quit);
                    }
                    KeyCode::Enter if game.phase().is_paused() => {
                        game.acknowledge()?;
                    }
                    KeyCode::Char('r') | KeyCode::Char('R') if finished => {
                        game.restart(&mut host, new_run(config, avatar, &mut rng)?);
                        tracker.clear();
                        continue;
                    }
                    KeyCode::Char('m') | KeyCode::Char('M') if finished => {
                        game.teardown(&mut host);
                        return Ok(ClimbExit::Menu);
                    }
                    _ => {}
                }
            }

            if host.input_attached() {
                match kind {
                    KeyEventKind::Press | KeyEventKind::Repeat => {
                        tracker.press(code, KeyTarget::Game)
                    }
                    KeyEventKind::Release => tracker.release(code, KeyTarget::Game),
                }
            }
        }

        let now = Instant::now();
        match host.take_due_frame(now) {
            Some(frame) => {
                game.on_frame(&mut host, frame, &tracker.held(), &mut surface);
                tracker.advance_frame();
                display::render(out, &surface, game.state(), guide)?;
            }
            None => {
                let wait = host.time_until_due(now).unwrap_or(IDLE_POLL);
                thread::sleep(wait.min(IDLE_POLL));
            }
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli)?;
    let config = cli.config()?;
    config.validate()?;

    let guide = match &cli.guide {
        Some(path) => Guidebook::load(path)?,
        None => Guidebook::default(),
    };

    if let Some(max_frames) = cli.headless {
        let report = run_autopilot(&config, cli.avatar.unwrap_or(Avatar::Man), max_frames)?;
        println!("{}", serde_json::to_string(&report)?);
        return Ok(());
    }

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode().context("failed to enable raw mode")?;
    out.execute(terminal::EnterAlternateScreen)
        .context("failed to enter alternate screen")?;
    out.execute(cursor::Hide)?;

    // Key-release events make held keys exact; other terminals fall back to
    // the hold window.  The query reads from stdin, so it runs before the
    // reader thread starts.
    let keyboard_enhanced = terminal::supports_keyboard_enhancement().unwrap_or(false)
        && out
            .execute(PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
            ))
            .is_ok();
    let config = config.with_release_events(keyboard_enhanced);
    info!(keyboard_enhanced, hold_window = ?config.hold_window, "Terminal input mode");

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the climb loop never has to block on I/O.
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

    let result = run(&mut out, &rx, &config, &guide, cli.avatar);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    if let Err(err) = out.execute(terminal::LeaveAlternateScreen) {
        warn!(?err, "failed to leave alternate screen");
    }
    if let Err(err) = terminal::disable_raw_mode() {
        warn!(?err, "failed to disable raw mode");
    }

    result
}

fn run<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    config: &GameConfig,
    guide: &Guidebook,
    preselected: Option<Avatar>,
) -> Result<()> {
    let mut preselected = preselected;

    loop {
        let avatar = match preselected.take() {
            Some(avatar) => avatar,
            None => match display::show_menu(out, rx)? {
                display::MenuResult::Start(avatar) => avatar,
                display::MenuResult::Quit => break,
            },
        };

        info!(avatar = avatar.name(), "Avatar selected");
        match climb_loop(out, rx, config, guide, avatar)? {
            ClimbExit::Quit => break,
            ClimbExit::Menu => {}
        }
    }
    Ok(())
}
