//! One game of "walk to the goal before the clock runs out".
//!
//! [`Session`] owns everything a game touches: the maze, the goal, the player
//! and the countdown. Each outside event (a key press, an animation frame, a
//! second of wall-clock time, a button) is a method call, and signals come
//! back as return values.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, warn};

use crate::direction::Direction;
use crate::error::{MazeError, Result};
use crate::generator::generate;
use crate::goal::place_goal;
use crate::grid::{Cell, Grid};
use crate::player::{Player, Position};

/// Every maze starts the player in the top-left corner.
pub const START: Cell = Cell::new(0, 0);
pub const MIN_TIME_SECS: u32 = 30;
pub const MAX_TIME_SECS: u32 = 100;

/// Seconds allowed for a `rows` x `cols` maze: half a second per cell,
/// rounded down to whole seconds and clamped to 30..=100.
pub fn calculate_time(rows: usize, cols: usize) -> u32 {
    let half = rows.saturating_mul(cols) / 2;
    half.clamp(MIN_TIME_SECS as usize, MAX_TIME_SECS as usize) as u32
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Maze {
    pub grid: Grid,
    pub goal: Cell,
}

/// Generates a maze and a goal away from [`START`]. Sizes are checked
/// before anything is allocated.
pub fn new_maze(rows: usize, cols: usize, rng: &mut impl Rng) -> Result<Maze> {
    validate_size(rows, cols)?;
    let grid = generate(rows, cols, rng)?;
    let goal = place_goal(rows, cols, START, rng)?;
    Ok(Maze { grid, goal })
}

fn validate_size(rows: usize, cols: usize) -> Result<()> {
    if rows == 0 || cols == 0 {
        return Err(MazeError::InvalidDimensions { rows, cols });
    }
    if rows == 1 && cols == 1 {
        return Err(MazeError::DegenerateGoalPlacement);
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    GoalReached,
    TimedOut,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    NotStarted,
    Running,
    Paused,
    /// The last game ended this way; the board has already been reset.
    Finished(SessionEvent),
}

/// Result of one animation frame.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    pub arrived: bool,
    pub event: Option<SessionEvent>,
}

/// Read-only view handed to the renderer.
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    pub grid: &'a Grid,
    pub player: Position,
    pub goal: Cell,
    pub path: &'a [Cell],
    pub state: SessionState,
    pub time_remaining: u32,
}

pub struct Session {
    rows: usize,
    cols: usize,
    maze: Maze,
    player: Player,
    state: SessionState,
    time_remaining: u32,
    rng: StdRng,
}

impl Session {
    /// A session seeded from `seed`, or from system entropy when `None`.
    pub fn new(rows: usize, cols: usize, seed: Option<u64>) -> Result<Self> {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(rows, cols, rng)
    }

    pub fn with_rng(rows: usize, cols: usize, mut rng: StdRng) -> Result<Self> {
        let maze = new_maze(rows, cols, &mut rng)?;
        info!(rows, cols, goal = ?maze.goal, "maze generated");
        Ok(Self {
            rows,
            cols,
            maze,
            player: Player::new(START),
            state: SessionState::NotStarted,
            time_remaining: calculate_time(rows, cols),
            rng,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn grid(&self) -> &Grid {
        &self.maze.grid
    }

    pub fn goal(&self) -> Cell {
        self.maze.goal
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn path(&self) -> &[Cell] {
        self.player.path()
    }

    pub fn time_remaining(&self) -> u32 {
        self.time_remaining
    }

    pub fn time_budget(&self) -> u32 {
        calculate_time(self.rows, self.cols)
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            grid: &self.maze.grid,
            player: self.player.position(),
            goal: self.maze.goal,
            path: self.player.path(),
            state: self.state,
            time_remaining: self.time_remaining,
        }
    }

    /// Begins a game on a freshly generated maze. Only valid before the first
    /// game or after one has finished; returns whether a game was started.
    pub fn start(&mut self) -> Result<bool> {
        match self.state {
            SessionState::NotStarted | SessionState::Finished(_) => {}
            SessionState::Running | SessionState::Paused => return Ok(false),
        }
        self.reset_board()?;
        self.state = SessionState::Running;
        info!(
            rows = self.rows,
            cols = self.cols,
            seconds = self.time_remaining,
            "game started"
        );
        Ok(true)
    }

    /// Flips between running and paused. Other states are left alone.
    pub fn toggle_pause(&mut self) -> SessionState {
        self.state = match self.state {
            SessionState::Running => {
                info!(seconds = self.time_remaining, "game paused");
                SessionState::Paused
            }
            SessionState::Paused => {
                info!(seconds = self.time_remaining, "game resumed");
                SessionState::Running
            }
            other => other,
        };
        self.state
    }

    /// Tries to step the player one cell. Ignored unless the game is running.
    pub fn attempt_move(&mut self, dir: Direction) -> bool {
        if self.state != SessionState::Running {
            return false;
        }
        self.player.attempt_move(&self.maze.grid, dir)
    }

    /// One animation frame. A paused game holds any move in flight.
    pub fn tick(&mut self) -> Tick {
        if self.state != SessionState::Running {
            return Tick::default();
        }
        if !self.player.tick() {
            return Tick::default();
        }
        if self.player.cell() != self.maze.goal {
            return Tick {
                arrived: true,
                event: None,
            };
        }
        Tick {
            arrived: true,
            event: Some(self.finish(SessionEvent::GoalReached)),
        }
    }

    /// One second of countdown. The game times out on the second after the
    /// clock reads zero.
    pub fn tick_second(&mut self) -> Option<SessionEvent> {
        if self.state != SessionState::Running {
            return None;
        }
        if self.time_remaining == 0 {
            return Some(self.finish(SessionEvent::TimedOut));
        }
        self.time_remaining -= 1;
        None
    }

    /// Changes the maze size and resets. Invalid sizes leave the session untouched.
    pub fn set_size(&mut self, rows: usize, cols: usize) -> Result<()> {
        validate_size(rows, cols)?;
        self.rows = rows;
        self.cols = cols;
        info!(rows, cols, seconds = self.time_budget(), "maze resized");
        self.reset()
    }

    /// Back to the start screen with a new maze, an empty trail and a full clock.
    pub fn reset(&mut self) -> Result<()> {
        self.reset_board()?;
        self.state = SessionState::NotStarted;
        Ok(())
    }

    fn finish(&mut self, event: SessionEvent) -> SessionEvent {
        info!(?event, cell = ?self.player.cell(), seconds = self.time_remaining, "game over");
        if let Err(err) = self.reset_board() {
            warn!(%err, "could not regenerate maze, keeping the previous one");
            self.player.reset(START);
            self.time_remaining = self.time_budget();
        }
        self.state = SessionState::Finished(event);
        event
    }

    fn reset_board(&mut self) -> Result<()> {
        self.maze = new_maze(self.rows, self.cols, &mut self.rng)?;
        self.player.reset(START);
        self.time_remaining = self.time_budget();
        debug!(goal = ?self.maze.goal, seconds = self.time_remaining, "board reset");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn running(rows: usize, cols: usize, seed: u64) -> Session {
        let mut session = Session::new(rows, cols, Some(seed)).unwrap();
        assert!(session.start().unwrap());
        session
    }

    fn open_direction(session: &Session) -> Direction {
        let grid = session.grid();
        Direction::ALL
            .into_iter()
            .find(|&dir| !grid.has_wall(START, dir))
            .unwrap()
    }

    #[test]
    fn time_budget_is_clamped() {
        assert_eq!(calculate_time(4, 4), 30);
        assert_eq!(calculate_time(6, 10), 30);
        assert_eq!(calculate_time(10, 10), 50);
        assert_eq!(calculate_time(10, 15), 75);
        assert_eq!(calculate_time(10, 20), 100);
        assert_eq!(calculate_time(20, 20), 100);
        assert_eq!(calculate_time(usize::MAX, usize::MAX), 100);
    }

    #[test]
    fn odd_cell_counts_round_the_budget_down() {
        assert_eq!(calculate_time(11, 11), 60);
        assert_eq!(calculate_time(11, 13), 71);
        assert_eq!(calculate_time(7, 9), 31);
        assert_eq!(calculate_time(3, 41), 61);
        // 201 cells would be 100.5 before clamping.
        assert_eq!(calculate_time(3, 67), 100);

        let mut session = Session::new(11, 11, Some(3)).unwrap();
        session.start().unwrap();
        assert_eq!(session.time_budget(), 60);
        assert_eq!(session.time_remaining(), 60);
    }

    #[test]
    fn new_maze_checks_dimensions() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(
            new_maze(0, 3, &mut rng),
            Err(MazeError::InvalidDimensions { rows: 0, cols: 3 })
        );
        assert_eq!(
            new_maze(1, 1, &mut rng),
            Err(MazeError::DegenerateGoalPlacement)
        );
        let maze = new_maze(1, 2, &mut rng).unwrap();
        assert_eq!(maze.goal, Cell::new(0, 1));
    }

    #[test]
    fn moves_ignored_until_started() {
        let mut session = Session::new(5, 5, Some(3)).unwrap();
        assert_eq!(session.state(), SessionState::NotStarted);
        for dir in Direction::ALL {
            assert!(!session.attempt_move(dir));
        }
        assert_eq!(session.tick_second(), None);
        assert_eq!(session.time_remaining(), 30);
    }

    #[test]
    fn start_is_not_reentrant() {
        let mut session = running(5, 5, 4);
        assert!(!session.start().unwrap());
        session.toggle_pause();
        assert!(!session.start().unwrap());
        assert_eq!(session.state(), SessionState::Paused);
    }

    #[test]
    fn pause_freezes_moves_animation_and_clock() {
        let mut session = running(6, 6, 8);
        let dir = open_direction(&session);
        assert!(session.attempt_move(dir));
        session.tick();
        let mid_flight = session.player().position();

        assert_eq!(session.toggle_pause(), SessionState::Paused);
        assert_eq!(session.tick(), Tick::default());
        assert_eq!(session.player().position(), mid_flight);
        assert_eq!(session.tick_second(), None);
        assert_eq!(session.time_remaining(), 30);
        assert!(!session.attempt_move(dir.opposite()));

        assert_eq!(session.toggle_pause(), SessionState::Running);
        let mut arrived = false;
        for _ in 0..50 {
            if session.tick().arrived {
                arrived = true;
                break;
            }
        }
        assert!(arrived);
    }

    #[test]
    fn countdown_times_out_after_reaching_zero() {
        let mut session = running(4, 4, 2);
        for _ in 0..30 {
            assert_eq!(session.tick_second(), None);
        }
        assert_eq!(session.time_remaining(), 0);
        assert_eq!(session.state(), SessionState::Running);
        assert_eq!(session.tick_second(), Some(SessionEvent::TimedOut));
        assert_eq!(
            session.state(),
            SessionState::Finished(SessionEvent::TimedOut)
        );
        assert_eq!(session.time_remaining(), 30);
        assert_eq!(session.player().cell(), START);
        assert!(session.path().is_empty());
    }

    #[test]
    fn timeout_mid_move_clears_the_animation() {
        let mut session = running(4, 4, 6);
        assert!(session.attempt_move(open_direction(&session)));
        for _ in 0..=30 {
            session.tick_second();
        }
        assert!(!session.player().is_moving());
        assert_eq!(session.tick(), Tick::default());
        assert!(session.start().unwrap());
        assert!(session.attempt_move(open_direction(&session)));
    }

    #[test]
    fn resize_validates_and_resets() {
        let mut session = running(5, 5, 10);
        assert!(session.attempt_move(open_direction(&session)));

        assert_eq!(
            session.set_size(0, 5),
            Err(MazeError::InvalidDimensions { rows: 0, cols: 5 })
        );
        assert_eq!(session.set_size(1, 1), Err(MazeError::DegenerateGoalPlacement));
        assert_eq!(session.state(), SessionState::Running);
        assert_eq!((session.rows(), session.cols()), (5, 5));

        session.set_size(20, 12).unwrap();
        assert_eq!(session.state(), SessionState::NotStarted);
        assert_eq!((session.grid().rows(), session.grid().cols()), (20, 12));
        assert_eq!(session.time_remaining(), 100);
        assert!(!session.player().is_moving());
        assert!(session.path().is_empty());
        assert_eq!(session.grid().passage_count(), 20 * 12 - 1);
    }

    #[test]
    fn snapshot_mirrors_session() {
        let mut session = running(3, 7, 12);
        assert!(session.attempt_move(open_direction(&session)));
        let snapshot = session.snapshot();
        assert_eq!(snapshot.goal, session.goal());
        assert_eq!(snapshot.path, &[START]);
        assert_eq!(snapshot.player, Position::from(START));
        assert_eq!(snapshot.state, SessionState::Running);
        assert_eq!(snapshot.time_remaining, 30);
        assert_eq!(snapshot.grid.cell_count(), 21);
    }
}
