//! Terminal drawing.
//!
//! A `rows` x `cols` maze is drawn on a `(2 * rows + 1)` x `(2 * cols + 1)`
//! lattice: cells sit at odd coordinates, the walls between them on the
//! even ones. Each lattice slot is two terminal columns wide.

use std::io::{self, Write};

use crossterm::cursor::MoveTo;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{self, Clear, ClearType};
use crossterm::QueueableCommand;
use unicode_width::UnicodeWidthChar;

use crate::direction::Direction;
use crate::grid::Cell;
use crate::player::Position;
use crate::session::{SessionEvent, SessionState, Snapshot};

const CELL_W: usize = 2;
const WALL_COLOR: Color = Color::Rgb {
    r: 240,
    g: 165,
    b: 0,
};
const TRAIL_COLOR: Color = Color::Rgb {
    r: 255,
    g: 215,
    b: 0,
};
const PLAYER_COLOR: Color = Color::Rgb {
    r: 0,
    g: 149,
    b: 221,
};
const GOAL_COLOR: Color = Color::Rgb {
    r: 40,
    g: 167,
    b: 69,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Glyph {
    Wall,
    Empty,
    Trail,
    Player,
    Goal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lattice {
    width: usize,
    height: usize,
    glyphs: Vec<Glyph>,
}

impl Lattice {
    pub fn compose(snapshot: &Snapshot<'_>) -> Self {
        let grid = snapshot.grid;
        let width = grid.cols() * 2 + 1;
        let height = grid.rows() * 2 + 1;
        let mut lattice = Self {
            width,
            height,
            glyphs: vec![Glyph::Wall; width * height],
        };

        for cell in grid.cells() {
            let (x, y) = slot(cell);
            lattice.set(x, y, Glyph::Empty);
            if cell.col + 1 < grid.cols() && !grid.has_wall(cell, Direction::Right) {
                lattice.set(x + 1, y, Glyph::Empty);
            }
            if cell.row + 1 < grid.rows() && !grid.has_wall(cell, Direction::Down) {
                lattice.set(x, y + 1, Glyph::Empty);
            }
        }

        for step in snapshot.path.windows(2) {
            let (ax, ay) = slot(step[0]);
            let (bx, by) = slot(step[1]);
            lattice.set(ax, ay, Glyph::Trail);
            lattice.set((ax + bx) / 2, (ay + by) / 2, Glyph::Trail);
            lattice.set(bx, by, Glyph::Trail);
        }
        if let [only] = snapshot.path {
            let (x, y) = slot(*only);
            lattice.set(x, y, Glyph::Trail);
        }

        let (gx, gy) = slot(snapshot.goal);
        lattice.set(gx, gy, Glyph::Goal);
        let (px, py) = player_slot(snapshot.player);
        lattice.set(px, py, Glyph::Player);
        lattice
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, x: usize, y: usize) -> Option<Glyph> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.glyphs.get(y * self.width + x).copied()
    }

    fn set(&mut self, x: usize, y: usize, glyph: Glyph) {
        if x < self.width && y < self.height {
            self.glyphs[y * self.width + x] = glyph;
        }
    }
}

fn slot(cell: Cell) -> (usize, usize) {
    (cell.col * 2 + 1, cell.row * 2 + 1)
}

// Mid-move the player lands on the passage between two cells.
fn player_slot(pos: Position) -> (usize, usize) {
    let x = (pos.col * 2.0 + 1.0).round().max(0.0) as usize;
    let y = (pos.row * 2.0 + 1.0).round().max(0.0) as usize;
    (x, y)
}

pub fn hud_line(snapshot: &Snapshot<'_>) -> String {
    format!(
        "Time Remaining: {}s  Maze: {}x{}  (arrows/hjkl move, s start, p pause, +/- size, q quit)",
        snapshot.time_remaining,
        snapshot.grid.rows(),
        snapshot.grid.cols()
    )
}

/// Longest prefix of `text` that fits in `max` terminal columns. Wide
/// characters are never split.
pub fn fit_width(text: &str, max: usize) -> &str {
    let mut used = 0;
    for (idx, ch) in text.char_indices() {
        let w = ch.width().unwrap_or(0);
        if used + w > max {
            return &text[..idx];
        }
        used += w;
    }
    text
}

pub fn status_line(state: SessionState) -> &'static str {
    match state {
        SessionState::NotStarted => "Press s to start.",
        SessionState::Running => "",
        SessionState::Paused => "Paused. Press p to resume.",
        SessionState::Finished(SessionEvent::GoalReached) => {
            "You reached the goal! Congratulations! Press s to play again."
        }
        SessionState::Finished(SessionEvent::TimedOut) => "Time's up! Try again. Press s to play again.",
    }
}

fn style(glyph: Glyph) -> (&'static str, Color) {
    match glyph {
        Glyph::Wall => ("██", WALL_COLOR),
        Glyph::Empty => ("  ", Color::Reset),
        Glyph::Trail => ("░░", TRAIL_COLOR),
        Glyph::Player => ("██", PLAYER_COLOR),
        Glyph::Goal => ("██", GOAL_COLOR),
    }
}

pub struct Renderer {
    last: Vec<Glyph>,
    last_hud: String,
    last_status: String,
    needs_full: bool,
    origin_x: u16,
    origin_y: u16,
}

impl Renderer {
    pub fn new() -> Self {
        Self {
            last: Vec::new(),
            last_hud: String::new(),
            last_status: String::new(),
            needs_full: true,
            origin_x: 0,
            origin_y: 1,
        }
    }

    /// Redraws whatever changed since the previous frame.
    pub fn draw(&mut self, out: &mut impl Write, snapshot: &Snapshot<'_>) -> io::Result<()> {
        let lattice = Lattice::compose(snapshot);
        let needed_h = (lattice.height() + 2) as u16;
        let needed_w = (lattice.width() * CELL_W) as u16;

        out.queue(MoveTo(0, 0))?;

        let (term_w, term_h) = terminal::size()?;
        if term_w < needed_w || term_h < needed_h {
            out.queue(Clear(ClearType::All))?;
            let msg = format!(
                "Terminal too small. Need at least {}x{} (cols x rows). Current: {}x{}. Press - to shrink the maze.",
                needed_w, needed_h, term_w, term_h
            );
            out.queue(Print(msg))?;
            out.flush()?;
            self.needs_full = true;
            return Ok(());
        }

        let origin_x = (term_w - needed_w) / 2;
        let origin_y = (term_h - needed_h) / 2 + 1;
        if origin_x != self.origin_x || origin_y != self.origin_y {
            self.origin_x = origin_x;
            self.origin_y = origin_y;
            self.needs_full = true;
        }
        if self.last.len() != lattice.glyphs.len() {
            self.last = vec![Glyph::Empty; lattice.glyphs.len()];
            self.needs_full = true;
        }
        if self.needs_full {
            out.queue(Clear(ClearType::All))?;
        }
        // Text lines must stop short of the right edge, or the terminal wraps
        // them onto the maze (or scrolls, on the bottom row).
        let line_w = (term_w - self.origin_x).saturating_sub(1) as usize;

        let hud = hud_line(snapshot);
        if self.needs_full || hud != self.last_hud {
            out.queue(MoveTo(self.origin_x, self.origin_y - 1))?;
            out.queue(SetForegroundColor(Color::White))?;
            out.queue(Clear(ClearType::CurrentLine))?;
            out.queue(Print(fit_width(&hud, line_w)))?;
            out.queue(ResetColor)?;
            self.last_hud = hud;
        }

        for y in 0..lattice.height() {
            for x in 0..lattice.width() {
                let idx = y * lattice.width() + x;
                let glyph = lattice.glyphs[idx];
                if self.needs_full || glyph != self.last[idx] {
                    self.last[idx] = glyph;
                    self.draw_glyph(out, x, y, glyph)?;
                }
            }
        }

        let status = status_line(snapshot.state);
        if self.needs_full || status != self.last_status {
            out.queue(MoveTo(self.origin_x, self.origin_y + lattice.height() as u16))?;
            out.queue(Clear(ClearType::CurrentLine))?;
            out.queue(SetForegroundColor(Color::White))?;
            out.queue(Print(fit_width(status, line_w)))?;
            out.queue(ResetColor)?;
            self.last_status = status.to_string();
        }
        self.needs_full = false;

        out.flush()?;
        Ok(())
    }

    fn draw_glyph(&self, out: &mut impl Write, x: usize, y: usize, glyph: Glyph) -> io::Result<()> {
        let (text, color) = style(glyph);
        let x_pos = self.origin_x + (x * CELL_W) as u16;
        let y_pos = self.origin_y + y as u16;
        out.queue(MoveTo(x_pos, y_pos))?;
        out.queue(SetForegroundColor(color))?;
        out.queue(Print(text))?;
        out.queue(ResetColor)?;
        Ok(())
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}
