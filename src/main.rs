mod input;
mod ui;

use std::fs::{self, OpenOptions};
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use clover::build_info;
use clover::core::constants::REALTIME_FRAME_MS;
use clover::pointer::Viewport;
use clover::session::{process_input, tick, GameInput, GameSession, SessionEvent};
use clover::GameConfig;
use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use directories::ProjectDirs;
use input::InputAction;
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing_subscriber::EnvFilter;

const LOG_FILE_NAME: &str = "clover.log";

/// Layered minesweeper with timed arithmetic defuse challenges.
#[derive(Parser, Debug)]
#[command(name = "clover", disable_version_flag = true)]
struct Args {
    /// Config file to load instead of the platform default
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Columns per layer
    #[arg(long)]
    width: Option<usize>,

    /// Rows per layer
    #[arg(long)]
    height: Option<usize>,

    /// Fraction of cells holding a mine
    #[arg(long)]
    density: Option<f64>,

    /// Layers to clear
    #[arg(long)]
    layers: Option<u32>,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// Forget issued defuse problems on restart
    #[arg(long)]
    reset_history: bool,

    /// Show version information
    #[arg(short = 'V', long)]
    version: bool,
}

impl Args {
    fn apply_overrides(&self, config: &mut GameConfig) {
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(density) = self.density {
            config.mine_density = density;
        }
        if let Some(layers) = self.layers {
            config.total_layers = layers;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if self.reset_history {
            config.reset_problem_history_on_restart = true;
        }
    }
}

/// Log to a file in the data directory; the terminal belongs to the UI.
fn init_logging() -> Result<PathBuf> {
    let dirs = ProjectDirs::from("", "", "clover").context("could not resolve data directory")?;
    let dir = dirs.data_dir();
    fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;

    let path = dir.join(LOG_FILE_NAME);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("opening {}", path.display()))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .init();
    Ok(path)
}

fn main() -> Result<()> {
    let args = Args::parse();
    if args.version {
        println!("{}", build_info::version_string());
        return Ok(());
    }

    if let Err(err) = init_logging() {
        eprintln!("Warning: logging disabled: {:#}", err);
    }
    tracing::info!(version = %build_info::version_string(), "starting");

    let mut config =
        GameConfig::load_or_default(args.config.as_deref()).context("failed to load config")?;
    args.apply_overrides(&mut config);
    let mut session = GameSession::new(config).context("invalid game configuration")?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    stdout.execute(EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &mut session);

    disable_raw_mode()?;
    terminal.backend_mut().execute(DisableMouseCapture)?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    tracing::info!(score = session.score, "exiting");
    result
}

fn note_events(events: &[SessionEvent], message: &mut String) {
    for event in events {
        if let Some(text) = ui::hud::describe_event(event) {
            *message = text;
        }
    }
}

fn run(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, session: &mut GameSession) -> Result<()> {
    let size = terminal.size()?;
    process_input(
        session,
        GameInput::Resize(Viewport::new(size.width as f64, size.height as f64)),
    );

    let mut message = String::new();
    let mut last_tick = Instant::now();

    loop {
        let snapshot = session.snapshot();
        terminal.draw(|frame| ui::draw_ui(frame, &snapshot, &message))?;

        if event::poll(Duration::from_millis(REALTIME_FRAME_MS))? {
            let terminal_event = event::read()?;
            match input::map_event(&terminal_event, session.phase.is_defusing()) {
                InputAction::Quit => break,
                InputAction::Game(game_input) => {
                    let events = process_input(session, game_input);
                    note_events(&events, &mut message);
                }
                InputAction::Ignore => {}
            }
        }

        let elapsed = last_tick.elapsed();
        if elapsed >= Duration::from_millis(REALTIME_FRAME_MS) {
            last_tick = Instant::now();
            let events = tick(session, elapsed.as_millis() as u64);
            note_events(&events, &mut message);
        }
    }

    Ok(())
}
