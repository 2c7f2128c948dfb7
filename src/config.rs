use std::path::PathBuf;
use std::time::Duration;

use clap::builder::RangedU64ValueParser;
use clap::Parser;

pub const DEFAULT_ROWS: usize = 20;
pub const DEFAULT_COLS: usize = 20;
pub const DEFAULT_FRAME_MS: u64 = 16;
/// Largest size the resize keys will grow to.
pub const MAX_SIDE: usize = 60;

/// Walk from the top-left corner to the goal before the timer runs out.
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None)]
pub struct Config {
    /// Maze height in cells
    #[arg(long, env = "MAZE_ROWS", default_value_t = DEFAULT_ROWS,
        value_parser = RangedU64ValueParser::<usize>::new().range(1..=MAX_SIDE as u64))]
    pub rows: usize,

    /// Maze width in cells
    #[arg(long, env = "MAZE_COLS", default_value_t = DEFAULT_COLS,
        value_parser = RangedU64ValueParser::<usize>::new().range(1..=MAX_SIDE as u64))]
    pub cols: usize,

    /// Milliseconds between animation frames
    #[arg(long, env = "MAZE_FRAME_MS", default_value_t = DEFAULT_FRAME_MS,
        value_parser = clap::value_parser!(u64).range(1..=1000))]
    pub frame_ms: u64,

    /// Random seed, for replaying the same sequence of mazes
    #[arg(long, env = "MAZE_SEED")]
    pub seed: Option<u64>,

    /// Write logs to this file (the terminal is taken over by the game)
    #[arg(long, env = "MAZE_LOG_FILE")]
    pub log_file: Option<PathBuf>,
}

impl Config {
    pub fn frame_time(&self) -> Duration {
        Duration::from_millis(self.frame_ms)
    }
}
