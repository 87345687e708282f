// Single owner of all game state. Event handlers call into this and nothing
// else mutates the board, the pan or the gesture.

use crate::input::{Gesture, GestureOutcome};
use crate::model::{Board, Cell, Placement, Player, Turn, WinLine};
use crate::render::{self, DrawOp, RenderOptions};
use crate::settings::Settings;
use crate::viewport::{PixelPoint, Viewport};
use crate::win::WinDetector;

/// What the HUD shows between frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameSummary {
    pub to_move: Player,
    pub marks: usize,
    pub lines: usize,
    pub last_winner: Option<Player>,
}

impl Default for GameSummary {
    fn default() -> Self {
        Self {
            to_move: Player::First,
            marks: 0,
            lines: 0,
            last_winner: None,
        }
    }
}

/// Result of a tap that reached the board.
#[derive(Debug, Clone, PartialEq)]
pub struct TapOutcome {
    pub cell: Cell,
    pub player: Player,
    pub placement: Placement,
    pub new_lines: Vec<WinLine>,
    /// Set once per scan that found at least one new line.
    pub winner: Option<Player>,
}

#[derive(Debug, Clone, Default)]
pub struct Game {
    board: Board,
    turn: Turn,
    wins: WinDetector,
    viewport: Viewport,
    gesture: Gesture,
    options: RenderOptions,
    last_winner: Option<Player>,
}

impl Game {
    pub fn new(settings: &Settings) -> Self {
        let mut game = Self::default();
        game.apply_settings(settings);
        game
    }

    pub fn apply_settings(&mut self, settings: &Settings) {
        self.wins.set_mode(settings.scan_mode);
        self.options = settings.render_options();
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn lines(&self) -> &[WinLine] {
        self.wins.lines()
    }

    pub fn to_move(&self) -> Player {
        self.turn.current()
    }

    pub fn summary(&self) -> GameSummary {
        GameSummary {
            to_move: self.turn.current(),
            marks: self.board.len(),
            lines: self.wins.lines().len(),
            last_winner: self.last_winner,
        }
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.viewport.resize(width, height);
    }

    pub fn pointer_down(&mut self, at: PixelPoint) {
        self.gesture.pointer_down(at);
    }

    /// Returns true if the view needs a redraw.
    pub fn pointer_move(&mut self, at: PixelPoint, movement: PixelPoint, dpr: f64) -> bool {
        matches!(
            self.gesture.pointer_move(at, movement, &mut self.viewport, dpr),
            GestureOutcome::Panned
        )
    }

    pub fn pointer_up(&mut self, at: PixelPoint, dpr: f64) -> Option<TapOutcome> {
        match self.gesture.pointer_up(at) {
            GestureOutcome::Tap(p) => Some(self.tap(p, dpr)),
            _ => None,
        }
    }

    pub fn pointer_cancel(&mut self) {
        self.gesture.cancel();
    }

    pub fn tap(&mut self, at: PixelPoint, dpr: f64) -> TapOutcome {
        let cell = self.viewport.pixel_to_cell(at, dpr);
        self.place(cell)
    }

    /// Puts the current player's mark on `cell`. Occupied cells forfeit nothing
    /// and keep the turn where it is.
    pub fn place(&mut self, cell: Cell) -> TapOutcome {
        let player = self.turn.current();
        let placement = self.board.place(cell, player);
        let mut outcome = TapOutcome {
            cell,
            player,
            placement,
            new_lines: Vec::new(),
            winner: None,
        };
        if placement.is_accepted() {
            self.turn.advance();
            let scan = self.wins.scan(&self.board, cell);
            outcome.new_lines = scan.new_lines;
            outcome.winner = scan.winner;
            if scan.winner.is_some() {
                self.last_winner = scan.winner;
            }
        }
        outcome
    }

    pub fn reset_view(&mut self) {
        self.viewport.reset();
    }

    /// Clears marks, lines and turn. The pan stays where it is.
    pub fn new_game(&mut self) {
        self.board.clear();
        self.wins.clear();
        self.turn = Turn::default();
        self.last_winner = None;
        self.gesture.cancel();
    }

    pub fn frame(&self, dpr: f64) -> Vec<DrawOp> {
        render::render(&self.board, &self.viewport, self.wins.lines(), dpr, self.options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Axis, Rejection};
    use crate::viewport::CELL_SIZE_PX;
    use crate::win::ScanMode;
    use quickcheck::quickcheck;

    fn game() -> Game {
        let mut g = Game::new(&Settings::default());
        g.resize(800.0, 600.0);
        g
    }

    fn click(g: &mut Game, x: f64, y: f64) -> Option<TapOutcome> {
        let p = PixelPoint::new(x, y);
        g.pointer_down(p);
        g.pointer_up(p, 1.0)
    }

    #[test]
    fn two_taps_alternate_players() {
        let mut g = game();
        click(&mut g, 5.0, 5.0);
        click(&mut g, 25.0, 5.0);
        assert_eq!(g.board().get(Cell::new(0, 0)), Some(Player::First));
        assert_eq!(g.board().get(Cell::new(1, 0)), Some(Player::Second));
        assert_eq!(g.to_move(), Player::First);
    }

    #[test]
    fn tap_on_occupied_cell_keeps_turn() {
        let mut g = game();
        click(&mut g, 5.0, 5.0);
        let out = click(&mut g, 6.0, 6.0).unwrap();
        assert_eq!(out.placement, Placement::Rejected(Rejection::AlreadyOccupied));
        assert_eq!(out.winner, None);
        assert_eq!(g.to_move(), Player::Second);
        assert_eq!(g.board().get(Cell::new(0, 0)), Some(Player::First));
    }

    quickcheck! {
        fn turn_follows_accepted_count(moves: Vec<(i8, i8)>) -> bool {
            let mut g = game();
            let mut accepted = 0usize;
            for (x, y) in moves {
                let out = g.place(Cell::new((x % 4) as i64, (y % 4) as i64));
                let expected = if accepted % 2 == 0 { Player::First } else { Player::Second };
                if out.player != expected {
                    return false;
                }
                if out.placement.is_accepted() {
                    accepted += 1;
                }
            }
            g.board().len() == accepted
        }
    }

    #[test]
    fn drag_pans_instead_of_placing() {
        let mut g = game();
        g.pointer_down(PixelPoint::new(100.0, 100.0));
        assert!(g.pointer_move(PixelPoint::new(140.0, 100.0), PixelPoint::new(40.0, 0.0), 1.0));
        assert!(g.pointer_up(PixelPoint::new(140.0, 100.0), 1.0).is_none());
        assert!(g.board().is_empty());
        assert_eq!(g.viewport().offset_x, -40.0);
        // A tap after the pan lands on the shifted grid.
        click(&mut g, 45.0, 5.0);
        assert_eq!(g.board().get(Cell::new(0, 0)), Some(Player::First));
        g.reset_view();
        assert_eq!(g.viewport().offset_x, 0.0);
        assert_eq!(g.board().len(), 1);
    }

    #[test]
    fn five_in_a_row_notifies_once() {
        let mut g = game();
        let mut notes = Vec::new();
        for x in 0..5 {
            // Second player answers far away each time.
            notes.extend(g.place(Cell::new(x, 0)).winner);
            if x < 4 {
                notes.extend(g.place(Cell::new(x, 10)).winner);
            }
        }
        assert_eq!(notes, vec![Player::First]);
        let summary = g.summary();
        assert_eq!(summary.last_winner, Some(Player::First));
        assert_eq!((summary.marks, summary.lines, summary.to_move), (9, 1, Player::Second));
        assert_eq!(g.lines(), &[WinLine { anchor: Cell::new(2, 0), axis: Axis::Horizontal }]);
    }

    #[test]
    fn full_board_mode_also_notifies_once() {
        let mut g = Game::new(&Settings {
            scan_mode: ScanMode::FullBoard,
            ..Default::default()
        });
        let mut notes = 0;
        for y in 0..5 {
            notes += g.place(Cell::new(0, y)).winner.iter().count();
            if y < 4 {
                notes += g.place(Cell::new(3, y * 2)).winner.iter().count();
            }
        }
        // Later moves rescan the whole board without announcing the old line again.
        for k in 0..4 {
            notes += g.place(Cell::new(20 + k * 2, 20)).winner.iter().count();
        }
        assert_eq!(notes, 1);
        assert_eq!(g.lines().len(), 1);
    }

    #[test]
    fn new_game_clears_everything_but_pan() {
        let mut g = game();
        for y in 0..5 {
            g.place(Cell::new(0, y));
            g.place(Cell::new(1, y + 20));
        }
        assert!(!g.lines().is_empty());
        g.pointer_down(PixelPoint::new(0.0, 0.0));
        g.pointer_move(PixelPoint::new(0.0, 50.0), PixelPoint::new(0.0, 50.0), 1.0);
        g.new_game();
        assert!(g.board().is_empty());
        assert!(g.lines().is_empty());
        assert_eq!(g.to_move(), Player::First);
        assert_eq!(g.summary(), GameSummary::default());
        assert_eq!(g.viewport().offset_y, -50.0);
    }

    #[test]
    fn frame_reflects_state() {
        let mut g = game();
        g.place(Cell::new(1, 1));
        let ops = g.frame(1.0);
        let c = CELL_SIZE_PX * 1.5;
        assert!(ops.contains(&DrawOp::Arc { x: c, y: c, radius: 8.0 }));
    }
}
