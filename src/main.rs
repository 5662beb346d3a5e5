//! Neon Strike headless runner
//!
//! Plays sessions with the autopilot at a nominal 60 Hz, checking state
//! invariants every tick. Rendering frontends drive `neon_strike::sim::tick`
//! the same way with real input.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use serde::Serialize;

use neon_strike::consts::FRAME_DT;
use neon_strike::sim::{GameEvent, GameState, Layout, TickInput, tick};
use neon_strike::{DifficultyProfile, Settings};

#[derive(Parser, Debug)]
#[command(name = "neon-strike")]
#[command(about = "Run Neon Strike sessions headlessly with the autopilot")]
struct Args {
    /// Run seed
    #[arg(long, default_value_t = 1)]
    seed: u64,

    /// Ticks to simulate across all sessions
    #[arg(long, default_value_t = 60 * 60 * 5)]
    ticks: u64,

    /// JSON settings file (missing fields use defaults)
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Difficulty profile: classic or veteran
    #[arg(long)]
    difficulty: Option<String>,

    /// Arena width override
    #[arg(long)]
    width: Option<f32>,

    /// Arena height override (portrait arenas play vertically)
    #[arg(long)]
    height: Option<f32>,

    /// Sessions to start after the first game over
    #[arg(long, default_value_t = 0)]
    restarts: u32,

    /// Write one JSON scene per tick to this file
    #[arg(long)]
    scenes: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct SessionSummary {
    seed: u64,
    ticks: u64,
    score: u64,
    stage: u32,
    bosses_defeated: u32,
    game_over: bool,
}

#[derive(Debug, Serialize)]
struct RunSummary {
    games_played: usize,
    total_ticks: u64,
    best_score: u64,
    sessions: Vec<SessionSummary>,
}

fn load_settings(args: &Args) -> Result<Settings> {
    let mut settings = match &args.settings {
        Some(path) => Settings::load(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => Settings::default(),
    };
    if let Some(name) = &args.difficulty {
        settings.difficulty = DifficultyProfile::from_str(name)
            .ok_or_else(|| anyhow!("unknown difficulty '{name}'"))?;
    }
    if let Some(width) = args.width {
        settings.arena_width = width;
    }
    if let Some(height) = args.height {
        settings.arena_height = height;
    }
    settings.validate().context("invalid settings")?;
    Ok(settings)
}

fn summarize(state: &GameState) -> SessionSummary {
    SessionSummary {
        seed: state.seed,
        ticks: state.time_ticks,
        score: state.progress.score,
        stage: state.progress.stage,
        bosses_defeated: state.bosses_defeated,
        game_over: state.is_game_over(),
    }
}

fn run(args: &Args) -> Result<RunSummary> {
    if args.ticks == 0 {
        return Err(anyhow!("ticks must be > 0"));
    }
    let settings = load_settings(args)?;
    let layout = Layout::from_dimensions(settings.arena_width, settings.arena_height);
    log::info!(
        "Arena {}x{} ({:?}), difficulty {}",
        layout.width,
        layout.height,
        layout.orientation,
        settings.difficulty.as_str()
    );

    let mut scenes = match &args.scenes {
        Some(path) => Some(BufWriter::new(
            File::create(path).with_context(|| format!("creating {}", path.display()))?,
        )),
        None => None,
    };

    let mut state = GameState::with_settings(settings, layout, args.seed)
        .context("building session")?;
    log::info!("Game initialized with seed: {}", args.seed);

    let input = TickInput {
        idle_mode: true,
        ..Default::default()
    };
    let mut sessions = Vec::new();
    let mut restarts_left = args.restarts;

    for _ in 0..args.ticks {
        tick(&mut state, &input, FRAME_DT);
        state
            .validate()
            .map_err(|violation| anyhow!("session seed {}: {violation}", state.seed))?;

        if let Some(out) = scenes.as_mut() {
            serde_json::to_writer(&mut *out, &state.scene())?;
            out.write_all(b"\n")?;
        }

        if state.events.iter().any(|e| matches!(e, GameEvent::GameOver { .. })) {
            sessions.push(summarize(&state));
            if restarts_left == 0 {
                break;
            }
            restarts_left -= 1;
            let seed = state.seed.wrapping_add(1);
            state.restart_with_seed(seed);
        }
    }

    if !state.is_game_over() {
        sessions.push(summarize(&state));
    }
    if let Some(mut out) = scenes {
        out.flush()?;
    }

    Ok(RunSummary {
        games_played: sessions.len(),
        total_ticks: sessions.iter().map(|s| s.ticks).sum(),
        best_score: sessions.iter().map(|s| s.score).max().unwrap_or(0),
        sessions,
    })
}

fn main() -> Result<()> {
    env_logger::init();
    log::info!("Neon Strike (headless) starting...");

    let args = Args::parse();
    let summary = run(&args)?;
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
