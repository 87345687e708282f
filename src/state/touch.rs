// Single-finger touch tracking. Touch events carry no movement delta, so the
// previous position is kept here and the delta derived from it.
use crate::viewport::PixelPoint;

#[derive(Default, Debug, Clone)]
pub struct TouchState {
    pub active: bool,
    pub last: PixelPoint,
}

impl TouchState {
    pub fn start(&mut self, at: PixelPoint) {
        self.active = true;
        self.last = at;
    }

    /// Delta since the previous touch position; `None` when no touch is tracked.
    pub fn advance(&mut self, at: PixelPoint) -> Option<PixelPoint> {
        if !self.active {
            return None;
        }
        let delta = PixelPoint::new(at.x - self.last.x, at.y - self.last.y);
        self.last = at;
        Some(delta)
    }

    /// Stops tracking, returning the last known position.
    pub fn end(&mut self) -> Option<PixelPoint> {
        std::mem::take(&mut self.active).then_some(self.last)
    }
}
