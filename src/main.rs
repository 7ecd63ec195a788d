//! A scroll-driven terminal documentary.
//!
//! Run the binary and scroll: the story of one shirt, from a single wear
//! to the ocean, unfolds scene by scene.

use std::fs::OpenOptions;
use std::io::{self, stderr};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal};
use tokio::time::MissedTickBehavior;
use tracing_subscriber::EnvFilter;

use scrollytell::app::{
    asset_runtime::{AssetUpdate, MeshCache},
    event::{spawn_event_reader, AppEvent},
    handler,
    state::AppState,
};
use scrollytell::config::{self, AppConfig};
use scrollytell::core::{animation::Motion, catalog::Catalog};
use scrollytell::ui::screen;

// ───────────────────────────────────────── CLI ───────────────

#[derive(Parser, Debug)]
#[command(name = env!("CARGO_PKG_NAME"), about = "Scroll-driven terminal documentary")]
struct Cli {
    /// Directory holding the scene models (`models/*.stl`).
    #[arg(long, default_value = "assets")]
    assets: PathBuf,

    /// Turn off motion: instant reveals, no smoothing, no oscillation.
    #[arg(long = "reduced-motion")]
    reduced_motion: bool,

    /// Open at a scene, by id (`SC_03`) or 1-based number.
    #[arg(long, value_name = "SCENE_ID|INDEX")]
    start: Option<String>,

    /// Write logs here instead of stderr.
    #[arg(long = "log-file")]
    log_file: Option<PathBuf>,

    /// Frame rate of the animation loop.
    #[arg(long, default_value_t = 30)]
    fps: u32,
}

fn init_tracing(log_file: Option<&Path>) -> Result<()> {
    let filter = EnvFilter::from_default_env();
    match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("opening log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(io::stderr) // never pollute stdout
                .init();
        }
    }
    Ok(())
}

// ───────────────────────────────────────── main ─────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_file.as_deref())?;

    let catalog = Catalog::builtin().context("built-in story failed validation")?;
    let start = match &cli.start {
        Some(key) => Some(
            catalog
                .find_scene(key)
                .with_context(|| format!("no scene matches --start {key}"))?,
        ),
        None => None,
    };

    let user_config = AppConfig::load();
    let env_motion = std::env::var("REDUCE_MOTION").ok();
    let motion = Motion::from_reduced(config::resolve_reduced_motion(
        cli.reduced_motion,
        &user_config,
        env_motion.as_deref(),
    ));
    tracing::info!(?motion, assets = %cli.assets.display(), "starting");

    // ── terminal setup ────────────────────────────────────────
    enable_raw_mode()?;
    let mut stderr_handle = stderr();
    execute!(stderr_handle, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stderr());
    let mut terminal = Terminal::new(backend)?;
    let size = terminal.size()?;

    // ── async channels ────────────────────────────────────────
    let mut events = spawn_event_reader(Duration::from_millis(100));
    let (asset_tx, mut asset_rx) = tokio::sync::mpsc::unbounded_channel::<AssetUpdate>();
    let meshes = MeshCache::new(cli.assets.clone(), asset_tx);

    let mut state = AppState::new(
        catalog,
        user_config,
        motion,
        meshes,
        Rect::new(0, 0, size.width, size.height),
    );
    match start {
        Some(index) => state.open_at_scene(index),
        None => state.tick(Instant::now()),
    }

    let fps = cli.fps.clamp(1, 120);
    let mut frames = tokio::time::interval(Duration::from_secs_f64(1.0 / f64::from(fps)));
    frames.set_missed_tick_behavior(MissedTickBehavior::Skip);

    // ── event loop ────────────────────────────────────────────
    loop {
        // Draw first so input always lands on what the reader sees.
        terminal.draw(|frame| screen::draw(frame, &mut state, Instant::now()))?;

        tokio::select! {
            biased;

            Some(event) = events.recv() => {
                match event {
                    AppEvent::Key(k) => handler::handle_key(&mut state, k),
                    AppEvent::Mouse(m) => handler::handle_mouse(&mut state, m),
                    AppEvent::Resize(w, h) => state.resize(w, h),
                }
            }

            Some(update) = asset_rx.recv() => {
                // Apply every queued result before the next draw.
                state.meshes.apply(update);
                while let Ok(update) = asset_rx.try_recv() {
                    state.meshes.apply(update);
                }
            }

            _ = frames.tick() => state.tick(Instant::now()),
        }

        if state.should_quit {
            break;
        }
    }

    // ── teardown ──────────────────────────────────────────────
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    Ok(())
}
