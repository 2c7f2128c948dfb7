//! Maze generation and wall-respecting player movement, with a small
//! terminal front-end on top.

pub mod config;
pub mod direction;
pub mod error;
pub mod generator;
pub mod goal;
pub mod grid;
pub mod player;
pub mod render;
pub mod session;

pub use direction::Direction;
pub use error::{MazeError, Result};
pub use grid::{Cell, Grid};
pub use player::{Player, Position};
pub use session::{Session, SessionEvent, SessionState, Tick};
