//! Math Catcher entry point
//!
//! Parses flags, wires logging to a file and runs the terminal front-end.

mod tui;

use std::fs::File;
use std::io::{self, stdout};
use std::path::PathBuf;
use std::rc::Rc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{cursor, event, execute, terminal};

use math_catcher::GameConfig;
use math_catcher::persistence::FileStore;

use crate::tui::App;

/// Frame pacing (~30 fps)
const FRAME: Duration = Duration::from_millis(33);

#[derive(Parser, Debug)]
#[command(name = "math-catcher")]
#[command(about = "Catch the falling ball that answers the math problem")]
struct Cli {
    /// Directory for saved progress, heroes and preferences
    #[arg(long, default_value = ".math-catcher")]
    data_dir: PathBuf,

    /// Optional JSON file overriding the game tuning
    #[arg(long)]
    config: Option<PathBuf>,

    /// RNG seed (defaults to the clock)
    #[arg(long)]
    seed: Option<u64>,

    /// Log file; the terminal itself is taken by the game
    #[arg(long, default_value = "math-catcher.log")]
    log_file: PathBuf,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli)?;
    log::info!("Math Catcher starting...");

    let config = match &cli.config {
        Some(path) => GameConfig::load(path),
        None => GameConfig::default(),
    };
    let store = FileStore::open(&cli.data_dir)
        .with_context(|| format!("opening data dir {}", cli.data_dir.display()))?;
    let seed = cli.seed.unwrap_or_else(clock_seed);
    log::info!("Seed {seed}, data in {}", store.dir().display());

    let mut app = App::new(config, Rc::new(store), seed);

    let mut out = stdout();
    terminal::enable_raw_mode()?;
    execute!(
        out,
        terminal::EnterAlternateScreen,
        cursor::Hide,
        terminal::DisableLineWrap,
    )?;

    let result = run(&mut app, &mut out);

    // Restore the terminal even when the loop failed
    execute!(
        out,
        terminal::LeaveAlternateScreen,
        cursor::Show,
        terminal::EnableLineWrap,
    )?;
    terminal::disable_raw_mode()?;

    app.shutdown();
    log::info!("Math Catcher exiting");
    result
}

fn run(app: &mut App, out: &mut io::Stdout) -> Result<()> {
    let clock = Instant::now();
    let now_ms = || clock.elapsed().as_secs_f64() * 1000.0;
    app.enter(now_ms());

    while !app.should_quit() {
        let frame_start = Instant::now();

        while event::poll(Duration::ZERO)? {
            app.handle_event(event::read()?, now_ms());
        }

        app.update(now_ms());
        let (cols, rows) = terminal::size()?;
        app.draw(out, cols, rows, now_ms())?;

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            std::thread::sleep(FRAME - elapsed);
        }
    }
    Ok(())
}

fn init_logging(cli: &Cli) -> Result<()> {
    let file = File::create(&cli.log_file)
        .with_context(|| format!("creating log file {}", cli.log_file.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn clock_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}
