//! Core data models for the infinite board.
//! Marks live in a sparse map keyed by grid cell; nothing bounds the grid.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Integer grid coordinate. The grid has no edges, so both components are signed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    pub x: i64,
    pub y: i64,
}

impl Cell {
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// The cell `k` steps away along `axis`.
    pub fn step(self, axis: Axis, k: i64) -> Self {
        let (dx, dy) = axis.delta();
        Self {
            x: self.x.wrapping_add(dx * k),
            y: self.y.wrapping_add(dy * k),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    /// Moves first, drawn as a circle.
    First,
    /// Drawn as a cross.
    Second,
}

impl Player {
    pub fn other(self) -> Self {
        match self {
            Player::First => Player::Second,
            Player::Second => Player::First,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Player::First => "O",
            Player::Second => "X",
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Direction along which five-in-a-row is evaluated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    /// Step (1, 1): top-left to bottom-right in screen space.
    DiagDown,
    /// Step (1, -1): bottom-left to top-right in screen space.
    DiagUp,
    Vertical,
    Horizontal,
}

impl Axis {
    pub const ALL: [Axis; 4] = [Axis::DiagDown, Axis::DiagUp, Axis::Vertical, Axis::Horizontal];

    pub fn delta(self) -> (i64, i64) {
        match self {
            Axis::DiagDown => (1, 1),
            Axis::DiagUp => (1, -1),
            Axis::Vertical => (0, 1),
            Axis::Horizontal => (1, 0),
        }
    }
}

/// A recorded five-cell run, anchored at its centre cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WinLine {
    pub anchor: Cell,
    pub axis: Axis,
}

impl WinLine {
    /// First and last cell of the run.
    pub fn ends(&self) -> (Cell, Cell) {
        (self.anchor.step(self.axis, -2), self.anchor.step(self.axis, 2))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rejection {
    AlreadyOccupied,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Placement {
    Accepted,
    Rejected(Rejection),
}

impl Placement {
    pub fn is_accepted(self) -> bool {
        matches!(self, Placement::Accepted)
    }
}

/// Sparse record of which player occupies which cells.
///
/// Entries are never overwritten: the first mark placed on a cell keeps it
/// until the whole board is cleared for a new game.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Board {
    marks: HashMap<Cell, Player>,
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn place(&mut self, cell: Cell, player: Player) -> Placement {
        if self.marks.contains_key(&cell) {
            return Placement::Rejected(Rejection::AlreadyOccupied);
        }
        self.marks.insert(cell, player);
        Placement::Accepted
    }

    pub fn get(&self, cell: Cell) -> Option<Player> {
        self.marks.get(&cell).copied()
    }

    pub fn len(&self) -> usize {
        self.marks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Cell, Player)> + '_ {
        self.marks.iter().map(|(c, p)| (*c, *p))
    }

    pub fn clear(&mut self) {
        self.marks.clear();
    }
}

/// Whose move is next.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Turn(Player);

impl Default for Turn {
    fn default() -> Self {
        Turn(Player::First)
    }
}

impl Turn {
    pub fn current(self) -> Player {
        self.0
    }

    pub fn advance(&mut self) {
        self.0 = self.0.other();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck::quickcheck;

    quickcheck! {
        fn first_writer_wins(x: i64, y: i64) -> bool {
            let mut board = Board::new();
            let c = Cell::new(x, y);
            let first = board.place(c, Player::First);
            let second = board.place(c, Player::Second);
            first == Placement::Accepted
                && second == Placement::Rejected(Rejection::AlreadyOccupied)
                && board.get(c) == Some(Player::First)
                && board.len() == 1
        }
    }

    #[test]
    fn empty_cells_are_absent() {
        let mut board = Board::new();
        assert!(board.is_empty());
        board.place(Cell::new(i64::MIN, i64::MAX), Player::Second);
        assert_eq!(board.get(Cell::new(0, 0)), None);
        assert_eq!(board.get(Cell::new(i64::MIN, i64::MAX)), Some(Player::Second));
    }

    #[test]
    fn clear_empties_the_board() {
        let mut board = Board::new();
        board.place(Cell::new(1, 2), Player::First);
        board.place(Cell::new(2, 2), Player::Second);
        board.clear();
        assert!(board.is_empty());
        assert!(board.place(Cell::new(1, 2), Player::Second).is_accepted());
    }

    #[test]
    fn turn_alternates() {
        let mut turn = Turn::default();
        assert_eq!(turn.current(), Player::First);
        turn.advance();
        assert_eq!(turn.current(), Player::Second);
        turn.advance();
        assert_eq!(turn.current(), Player::First);
    }

    #[test]
    fn player_display() {
        assert_eq!(format!("player {} wins", Player::First), "player O wins");
        assert_eq!(Player::Second.to_string(), "X");
    }

    #[test]
    fn win_line_ends_span_five_cells() {
        let line = WinLine { anchor: Cell::new(3, 3), axis: Axis::DiagUp };
        assert_eq!(line.ends(), (Cell::new(1, 5), Cell::new(5, 1)));
    }
}
