mod actions;
mod app;
mod input;
mod panel;
mod view;

use anyhow::{Context, Result};
use app::App;
pub use app::DEFAULT_SEED;
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event as CEvent, KeyEventKind,
};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::{execute, ExecutableCommand};
use dreamroster_core::Clock;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::fs::File;
use std::io::{self, stdout, IsTerminal};
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

pub const DEFAULT_ASSETS_DIR: &str = "assets";

#[derive(Debug, Clone, Default)]
pub struct LaunchOptions {
    pub seed: Option<u64>,
    pub assets: Option<PathBuf>,
}

/// Milliseconds since the UI started, from a monotonic clock.
#[derive(Debug)]
pub struct WallClock {
    started: Instant,
}

impl WallClock {
    pub fn start() -> Self {
        Self {
            started: Instant::now(),
        }
    }
}

impl Clock for WallClock {
    fn now_ms(&self) -> u64 {
        u64::try_from(self.started.elapsed().as_millis()).unwrap_or(u64::MAX)
    }
}

pub fn run(options: LaunchOptions) -> Result<()> {
    init_file_logging()?;
    let seed = options.seed.unwrap_or(DEFAULT_SEED);
    let assets = options
        .assets
        .unwrap_or_else(|| PathBuf::from(DEFAULT_ASSETS_DIR));
    let mut app = App::bootstrap(&assets, seed)?;

    ensure_interactive_terminal()?;

    enable_raw_mode().map_err(|err| {
        anyhow::anyhow!(
            "failed to enable raw mode; ensure the process owns an interactive terminal: {err}"
        )
    })?;
    let mut stdout = stdout();
    stdout
        .execute(EnterAlternateScreen)
        .context("enter alternate screen")?;
    stdout
        .execute(EnableMouseCapture)
        .context("enable mouse capture")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;

    let run_result = run_loop(&mut terminal, &mut app);
    restore_terminal(&mut terminal)?;
    run_result
}

pub fn run_with_args(args: &[String]) -> Result<()> {
    let options = parse_options(args);
    run(options)
}

pub fn parse_options(args: &[String]) -> LaunchOptions {
    let mut seed = std::env::var("DREAMROSTER_SEED")
        .ok()
        .and_then(|value| value.parse::<u64>().ok());
    let mut assets = std::env::var("DREAMROSTER_ASSETS").ok().map(PathBuf::from);
    let mut idx = 0usize;
    while idx < args.len() {
        match args[idx].as_str() {
            "--seed" => {
                if let Some(value) = args.get(idx + 1) {
                    seed = value.parse::<u64>().ok();
                    idx += 1;
                }
            }
            "--assets" => {
                if let Some(value) = args.get(idx + 1) {
                    assets = Some(PathBuf::from(value));
                    idx += 1;
                }
            }
            _ => {}
        }
        idx += 1;
    }
    LaunchOptions { seed, assets }
}

fn run_loop(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    let tick_rate = Duration::from_millis(app.tick_ms());
    let clock = WallClock::start();
    let size = terminal.size().context("read terminal size")?;
    app.on_resize(size.width, size.height);
    while !app.should_quit {
        app.on_tick(clock.now_ms());
        terminal.draw(|frame| view::draw(frame, app))?;
        if !event::poll(tick_rate)? {
            continue;
        }
        let action = match event::read()? {
            CEvent::Key(key) if key.kind == KeyEventKind::Press => input::map_key(key),
            CEvent::Mouse(mouse) => input::map_mouse(mouse),
            CEvent::Resize(width, height) => {
                app.on_resize(width, height);
                continue;
            }
            _ => continue,
        };
        // Catch up first so a draw starts from the current instant.
        app.on_tick(clock.now_ms());
        actions::dispatch(app, action);
    }
    Ok(())
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode().context("disable raw mode")?;
    execute!(
        terminal.backend_mut(),
        DisableMouseCapture,
        LeaveAlternateScreen
    )
    .context("leave alternate screen")?;
    terminal.show_cursor().context("show cursor")?;
    Ok(())
}

fn ensure_interactive_terminal() -> Result<()> {
    if io::stdin().is_terminal() && io::stdout().is_terminal() {
        return Ok(());
    }
    anyhow::bail!(
        "dreamroster-cui requires an interactive TTY (run directly in a terminal, not a piped/headless shell)"
    );
}

/// The terminal belongs to the UI, so logs only go to `DREAMROSTER_LOG_FILE`.
fn init_file_logging() -> Result<()> {
    let Ok(path) = std::env::var("DREAMROSTER_LOG_FILE") else {
        return Ok(());
    };
    let file = File::create(&path).with_context(|| format!("create log file {path}"))?;
    let filter = EnvFilter::try_from_env("DREAMROSTER_LOG").unwrap_or_else(|_| "warn".into());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|err| anyhow::anyhow!("install log subscriber: {err}"))
}
