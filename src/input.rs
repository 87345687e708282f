// Pointer gesture classification: a press either turns into a pan or ends as a tap.
//
//   Idle --down--> Armed --move past threshold--> Dragging
//                    |                               |
//                    +----up: tap--> Idle            +----up: discard--> Idle

use crate::viewport::{PixelPoint, Viewport};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum GestureState {
    #[default]
    Idle,
    /// Pressed but not yet moved far enough to count as a drag.
    Armed { start: PixelPoint },
    Dragging,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureOutcome {
    /// Nothing visible changed.
    None,
    /// The viewport moved.
    Panned,
    /// Press released without dragging; place a mark under this pixel.
    Tap(PixelPoint),
    /// A drag finished; not a placement.
    DragEnded,
}

#[derive(Debug, Clone, Default)]
pub struct Gesture {
    state: GestureState,
}

impl Gesture {
    pub fn state(&self) -> GestureState {
        self.state
    }

    /// Arms the gesture. Extra presses while one is in flight are ignored.
    pub fn pointer_down(&mut self, at: PixelPoint) {
        if self.state == GestureState::Idle {
            self.state = GestureState::Armed { start: at };
        }
    }

    /// `movement` is the per-event pointer delta, physical pixels.
    pub fn pointer_move(
        &mut self,
        at: PixelPoint,
        movement: PixelPoint,
        viewport: &mut Viewport,
        dpr: f64,
    ) -> GestureOutcome {
        match self.state {
            GestureState::Idle => GestureOutcome::None,
            GestureState::Armed { start } => {
                let min_dist = viewport.drag_threshold();
                let dx = at.x - start.x;
                let dy = at.y - start.y;
                if dx.abs() > min_dist || dy.abs() > min_dist {
                    self.begin_drag(dx, dy, viewport, dpr);
                    GestureOutcome::Panned
                } else {
                    GestureOutcome::None
                }
            }
            GestureState::Dragging => {
                viewport.pan_by(movement.x, movement.y, dpr);
                GestureOutcome::Panned
            }
        }
    }

    /// Armed -> Dragging. The travel accumulated while armed is applied in one
    /// step so the content lines up with the pointer from the first drag frame.
    fn begin_drag(&mut self, dx: f64, dy: f64, viewport: &mut Viewport, dpr: f64) {
        viewport.pan_by(dx, dy, dpr);
        self.state = GestureState::Dragging;
    }

    pub fn pointer_up(&mut self, at: PixelPoint) -> GestureOutcome {
        let prev = std::mem::take(&mut self.state);
        match prev {
            GestureState::Dragging => GestureOutcome::DragEnded,
            GestureState::Idle | GestureState::Armed { .. } => GestureOutcome::Tap(at),
        }
    }

    /// Drop the gesture without producing a tap (pointer lost, touch cancelled).
    pub fn cancel(&mut self) {
        self.state = GestureState::Idle;
    }
}
