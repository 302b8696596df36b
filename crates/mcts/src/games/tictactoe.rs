//! Generalized tic-tac-toe: an N×N grid where the first player to line up
//! K marks in a row, column or diagonal wins.
//!
//! The classic 3×3 game is a solved draw, which makes it a good check for the
//! search:
//! - MCTS should never lose against a random opponent
//! - MCTS should never walk into an immediate loss
//! - Two MCTS players should draw

use ox_core::{GameState, OxError, Result, Rewards};
use std::fmt;

/// Largest supported board side.
pub const MAX_SIZE: usize = 16;

/// A player's mark. X always moves first.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum Mark {
    X,
    O,
}

impl Mark {
    /// Get the opposing mark.
    pub fn opposite(self) -> Self {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }

    /// Player index used in reward vectors: 0 for X, 1 for O.
    pub fn index(self) -> usize {
        match self {
            Mark::X => 0,
            Mark::O => 1,
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mark::X => write!(f, "X"),
            Mark::O => write!(f, "O"),
        }
    }
}

/// A board cell, used as the move type.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Cell {
    pub row: u8,
    pub col: u8,
}

impl Cell {
    pub fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// Cell at row-major `index` on a board of side `size`.
    pub fn from_index(index: usize, size: usize) -> Self {
        Self {
            row: (index / size) as u8,
            col: (index % size) as u8,
        }
    }

    /// Row-major index on a board of side `size`.
    pub fn index(self, size: usize) -> usize {
        self.row as usize * size + self.col as usize
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Board position.
///
/// Equality and hashing cover every field; `winner` is derived from `cells`,
/// so equal grids with the same side to move always compare equal.
#[derive(Clone, PartialEq, Eq, Debug, Hash)]
pub struct Board {
    size: usize,
    win_length: usize,
    /// Row-major cells.
    cells: Vec<Option<Mark>>,
    current: Mark,
    winner: Option<Mark>,
}

impl Board {
    /// Create an empty `size`×`size` board where `win_length` in a row wins.
    ///
    /// # Errors
    /// Returns `OxError::InvalidBoard` if `size` is 0 or above [`MAX_SIZE`],
    /// or if `win_length` is 0 or larger than `size`.
    pub fn new(size: usize, win_length: usize) -> Result<Self> {
        if size == 0 || size > MAX_SIZE {
            return Err(OxError::InvalidBoard(format!(
                "size {} is outside 1..={}",
                size, MAX_SIZE
            )));
        }
        if win_length == 0 || win_length > size {
            return Err(OxError::InvalidBoard(format!(
                "win length {} is outside 1..={}",
                win_length, size
            )));
        }

        Ok(Self {
            size,
            win_length,
            cells: vec![None; size * size],
            current: Mark::X,
            winner: None,
        })
    }

    /// The classic 3×3, three-in-a-row game.
    pub fn tic_tac_toe() -> Self {
        Self {
            size: 3,
            win_length: 3,
            cells: vec![None; 9],
            current: Mark::X,
            winner: None,
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn win_length(&self) -> usize {
        self.win_length
    }

    /// Mark to move.
    pub fn current_mark(&self) -> Mark {
        self.current
    }

    /// Get the winner, if any.
    pub fn winner(&self) -> Option<Mark> {
        self.winner
    }

    /// Get the mark at a cell, if any.
    pub fn get(&self, cell: Cell) -> Option<Mark> {
        if !self.contains(cell) {
            return None;
        }
        self.cells[cell.index(self.size)]
    }

    /// Number of marks placed so far.
    pub fn moves_played(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Play `cell` for the side to move, checking legality.
    ///
    /// # Errors
    /// Returns `OxError::IllegalMove` if the game is over, the cell is off
    /// the board, or the cell is occupied.
    pub fn play(&mut self, cell: Cell) -> Result<()> {
        if self.is_terminal() {
            return Err(OxError::IllegalMove(format!("{}: game is over", cell)));
        }
        if !self.contains(cell) {
            return Err(OxError::IllegalMove(format!(
                "{}: off a {}x{} board",
                cell, self.size, self.size
            )));
        }
        if self.cells[cell.index(self.size)].is_some() {
            return Err(OxError::IllegalMove(format!("{}: cell is occupied", cell)));
        }

        self.place(cell);
        Ok(())
    }

    fn contains(&self, cell: Cell) -> bool {
        (cell.row as usize) < self.size && (cell.col as usize) < self.size
    }

    fn place(&mut self, cell: Cell) {
        let mark = self.current;
        self.cells[cell.index(self.size)] = Some(mark);
        if self.completes_line(cell, mark) {
            self.winner = Some(mark);
        }
        self.current = mark.opposite();
    }

    /// Whether the mark just placed at `cell` completes a line.
    fn completes_line(&self, cell: Cell, mark: Mark) -> bool {
        const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

        DIRECTIONS.iter().any(|&(dr, dc)| {
            let run = 1 + self.run_length(cell, mark, dr, dc) + self.run_length(cell, mark, -dr, -dc);
            run >= self.win_length
        })
    }

    /// Consecutive `mark`s from `cell` (exclusive) in direction (dr, dc).
    fn run_length(&self, cell: Cell, mark: Mark, dr: isize, dc: isize) -> usize {
        let size = self.size as isize;
        let mut row = cell.row as isize + dr;
        let mut col = cell.col as isize + dc;
        let mut count = 0;

        while (0..size).contains(&row) && (0..size).contains(&col) {
            if self.cells[(row * size + col) as usize] != Some(mark) {
                break;
            }
            count += 1;
            row += dr;
            col += dc;
        }
        count
    }

    /// Check if the board is full (draw if no winner).
    fn is_full(&self) -> bool {
        self.cells.iter().all(|c| c.is_some())
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::tic_tac_toe()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "  ")?;
        for col in 0..self.size {
            write!(f, " {:>2}", col)?;
        }
        writeln!(f)?;

        for row in 0..self.size {
            write!(f, "{:>2}", row)?;
            for col in 0..self.size {
                match self.cells[row * self.size + col] {
                    Some(mark) => write!(f, "  {}", mark)?,
                    None => write!(f, "  .")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl GameState for Board {
    type Action = Cell;

    fn legal_actions(&self) -> Vec<Cell> {
        if self.winner.is_some() {
            return Vec::new();
        }
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_none())
            .map(|(i, _)| Cell::from_index(i, self.size))
            .collect()
    }

    fn apply(&mut self, action: &Cell) {
        debug_assert!(
            self.get(*action).is_none() && self.contains(*action),
            "illegal move {}",
            action
        );
        self.place(*action);
    }

    fn is_terminal(&self) -> bool {
        self.winner.is_some() || self.is_full()
    }

    fn rewards(&self) -> Rewards {
        match self.winner {
            Some(mark) => Rewards::win(mark.index(), 2),
            None => Rewards::zeros(2),
        }
    }

    fn current_player(&self) -> usize {
        self.current.index()
    }
}
