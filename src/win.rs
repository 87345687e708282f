// Five-in-a-row detection over the sparse board.
//
// A cell C owned by P anchors a win on an axis when the two cells on each
// side of it along that axis are also owned by P. Every recorded line is
// keyed by (anchor, axis), so no geometric run is stored twice.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::model::{Axis, Board, Cell, Player, WinLine};

/// How much of the board a scan looks at after a placement.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScanMode {
    /// Only runs that pass through the placed cell.
    #[default]
    Incremental,
    /// Every occupied cell on every axis.
    FullBoard,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScanOutcome {
    pub new_lines: Vec<WinLine>,
    /// Owner of the first new line, if any was found.
    pub winner: Option<Player>,
}

/// Owner of `cell` if it is the centre of five same-owner marks along `axis`.
pub fn anchors_run(board: &Board, cell: Cell, axis: Axis) -> Option<Player> {
    let owner = board.get(cell)?;
    [-2, -1, 1, 2]
        .into_iter()
        .all(|k| board.get(cell.step(axis, k)) == Some(owner))
        .then_some(owner)
}

#[derive(Clone, Debug, Default)]
pub struct WinDetector {
    mode: ScanMode,
    lines: Vec<WinLine>,
    seen: HashSet<WinLine>,
}

impl WinDetector {
    pub fn new(mode: ScanMode) -> Self {
        Self {
            mode,
            ..Default::default()
        }
    }

    pub fn mode(&self) -> ScanMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: ScanMode) {
        self.mode = mode;
    }

    /// Every line recorded so far, in discovery order.
    pub fn lines(&self) -> &[WinLine] {
        &self.lines
    }

    pub fn clear(&mut self) {
        self.lines.clear();
        self.seen.clear();
    }

    /// Look for runs created by the mark just placed at `placed`.
    pub fn scan(&mut self, board: &Board, placed: Cell) -> ScanOutcome {
        let mut outcome = ScanOutcome::default();
        match self.mode {
            ScanMode::Incremental => {
                for axis in Axis::ALL {
                    for k in -2..=2 {
                        self.check(board, placed.step(axis, k), axis, &mut outcome);
                    }
                }
            }
            ScanMode::FullBoard => {
                for (cell, _) in board.iter() {
                    for axis in Axis::ALL {
                        self.check(board, cell, axis, &mut outcome);
                    }
                }
            }
        }
        outcome
    }

    fn check(&mut self, board: &Board, anchor: Cell, axis: Axis, outcome: &mut ScanOutcome) {
        let Some(owner) = anchors_run(board, anchor, axis) else {
            return;
        };
        let line = WinLine { anchor, axis };
        if !self.seen.insert(line) {
            return;
        }
        self.lines.push(line);
        outcome.new_lines.push(line);
        if outcome.winner.is_none() {
            outcome.winner = Some(owner);
        }
    }
}
