use std::fs::File;
use std::io::{self, Stdout};
use std::path::Path;
use std::sync::Mutex;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser;
use crossterm::cursor::{Hide, Show};
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::ExecutableCommand;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use maze_runner::config::{Config, MAX_SIDE};
use maze_runner::render::Renderer;
use maze_runner::{Direction, Session, SessionState};

const SECOND: Duration = Duration::from_secs(1);

enum Command {
    Move(Direction),
    Start,
    TogglePause,
    Grow,
    Shrink,
    Quit,
}

fn main() -> anyhow::Result<()> {
    let config = Config::parse();
    init_logging(config.log_file.as_deref())?;
    let mut session = Session::new(config.rows, config.cols, config.seed)
        .with_context(|| format!("cannot build a {}x{} maze", config.rows, config.cols))?;

    let mut stdout = io::stdout();
    terminal::enable_raw_mode()?;
    stdout.execute(EnterAlternateScreen)?;
    stdout.execute(Hide)?;

    let result = run(&mut stdout, &mut session, &config);

    stdout.execute(Show)?;
    stdout.execute(LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;
    result
}

fn init_logging(path: Option<&Path>) -> anyhow::Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("cannot open log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn run(stdout: &mut Stdout, session: &mut Session, config: &Config) -> anyhow::Result<()> {
    let frame_time = config.frame_time();
    let mut renderer = Renderer::new();
    let mut last_second = Instant::now();

    loop {
        let frame_start = Instant::now();
        while event::poll(Duration::from_millis(0))? {
            let Event::Key(key) = event::read()? else {
                continue;
            };
            if !matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat) {
                continue;
            }
            let Some(command) = command_for(key.code) else {
                continue;
            };
            match command {
                Command::Quit => return Ok(()),
                Command::Move(dir) => {
                    session.attempt_move(dir);
                }
                Command::Start => {
                    if session.start()? {
                        last_second = Instant::now();
                    }
                }
                Command::TogglePause => {
                    if session.toggle_pause() == SessionState::Running {
                        last_second = Instant::now();
                    }
                }
                Command::Grow => resize(session, 1),
                Command::Shrink => resize(session, -1),
            }
        }

        if session.state() == SessionState::Running && last_second.elapsed() >= SECOND {
            last_second += SECOND;
            if let Some(event) = session.tick_second() {
                info!(?event, "countdown finished the game");
            }
        }
        if let Some(event) = session.tick().event {
            info!(?event, "move finished the game");
        }

        renderer.draw(stdout, &session.snapshot())?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_time {
            thread::sleep(frame_time - elapsed);
        }
    }
}

fn command_for(code: KeyCode) -> Option<Command> {
    let command = match code {
        KeyCode::Up | KeyCode::Char('k') => Command::Move(Direction::Up),
        KeyCode::Right | KeyCode::Char('l') => Command::Move(Direction::Right),
        KeyCode::Down | KeyCode::Char('j') => Command::Move(Direction::Down),
        KeyCode::Left | KeyCode::Char('h') => Command::Move(Direction::Left),
        KeyCode::Char('s') | KeyCode::Enter => Command::Start,
        KeyCode::Char('p') | KeyCode::Char(' ') => Command::TogglePause,
        KeyCode::Char('+') | KeyCode::Char('=') => Command::Grow,
        KeyCode::Char('-') => Command::Shrink,
        KeyCode::Char('q') | KeyCode::Esc => Command::Quit,
        _ => return None,
    };
    Some(command)
}

fn resize(session: &mut Session, delta: isize) {
    let rows = session.rows().saturating_add_signed(delta).clamp(1, MAX_SIDE);
    let cols = session.cols().saturating_add_signed(delta).clamp(1, MAX_SIDE);
    if let Err(err) = session.set_size(rows, cols) {
        warn!(%err, rows, cols, "resize rejected");
    }
}
