use bevy::prelude::*;

/// Total displacement from the press position that turns a pointer session
/// into a confirmed drag.
pub const DRAG_THRESHOLD_PX: f32 = 10.0;
/// Radians of cabinet rotation per pixel of pointer movement.
pub const DRAG_SENSITIVITY: f32 = 0.01;
/// How long the confirmed-drag flag stays observable after release, so the
/// click that follows a drag release is still suppressed. Clearing it
/// immediately would re-introduce a spurious view switch after every drag.
pub const DRAG_RESET_DELAY_SECS: f64 = 0.1;

/// One pointer session: press, moves, release, and the click that may follow.
/// Disambiguates "rotate the cabinet" from "switch the view".
#[derive(Resource, Debug, Default)]
pub struct DragTracker {
    armed: bool,
    start: Vec2,
    last: Vec2,
    confirmed: bool,
    clear_confirmed_at: Option<f64>,
}

/// Outcome of a pointer move.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DragMove {
    Ignored,
    Rotate { yaw_delta: f32, pitch_delta: f32 },
}

impl DragTracker {
    pub fn pointer_down(&mut self, position: Vec2) {
        self.armed = true;
        self.confirmed = false;
        self.clear_confirmed_at = None;
        self.start = position;
        self.last = position;
    }

    /// Rotation follows every move of an armed session; the confirmed flag
    /// only trips once total displacement from the press position exceeds the
    /// threshold, and never untrips for the rest of the session.
    pub fn pointer_move(&mut self, position: Vec2) -> DragMove {
        if !self.armed {
            return DragMove::Ignored;
        }

        let incremental = position - self.last;
        self.last = position;

        if !self.confirmed && position.distance(self.start) > DRAG_THRESHOLD_PX {
            self.confirmed = true;
        }

        DragMove::Rotate {
            yaw_delta: incremental.x * DRAG_SENSITIVITY,
            pitch_delta: incremental.y * DRAG_SENSITIVITY,
        }
    }

    pub fn pointer_up(&mut self, now: f64) {
        self.armed = false;
        if self.confirmed {
            self.clear_confirmed_at = Some(now + DRAG_RESET_DELAY_SECS);
        } else {
            self.clear_confirmed_at = None;
        }
    }

    /// Expires the deferred confirmed-drag flag; call once per frame.
    pub fn tick(&mut self, now: f64) {
        if let Some(deadline) = self.clear_confirmed_at {
            if now >= deadline {
                self.confirmed = false;
                self.clear_confirmed_at = None;
            }
        }
    }

    /// Whether a click arriving now should act. False while a confirmed drag
    /// is still observable.
    pub fn click_allowed(&self) -> bool {
        !self.confirmed
    }

    pub fn is_dragging(&self) -> bool {
        self.armed
    }
}
