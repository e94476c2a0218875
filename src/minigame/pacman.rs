//! The dot-collector simulation. One step per render tick while the screen
//! surface is visible; a hidden surface pauses the game.

use crate::constants::{SCREEN_HEIGHT, SCREEN_WIDTH};

use super::glyph::{dots_layout, GlyphCell};

pub const MOVE_SPEED: f32 = 3.0;
/// Ticks between mouth open/closed flips.
pub const MOUTH_PERIOD: u32 = 10;
/// Axis-aligned pickup range against each uneaten dot.
pub const PICKUP_RANGE: f32 = 20.0;
pub const DOT_SCORE: u32 = 10;
pub const CLEAR_BONUS: u32 = 100;
pub const PLAYER_RADIUS: f32 = 15.0;

const START_X: f32 = 600.0;
const START_Y: f32 = 500.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Heading {
    Right,
    Down,
    Left,
    Up,
}

impl Heading {
    /// Mouth direction in raster space (y grows downward).
    pub fn angle(self) -> f32 {
        use std::f32::consts::FRAC_PI_2;
        match self {
            Heading::Right => 0.0,
            Heading::Down => FRAC_PI_2,
            Heading::Left => 2.0 * FRAC_PI_2,
            Heading::Up => 3.0 * FRAC_PI_2,
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Dot {
    pub x: f32,
    pub y: f32,
    pub eaten: bool,
    pub letter: usize,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct StepOutcome {
    pub dots_eaten: u32,
    pub cleared: bool,
}

#[derive(Debug)]
pub struct PacmanState {
    pub x: f32,
    pub y: f32,
    pub heading: Heading,
    next_heading: Heading,
    pub mouth_open: bool,
    mouth_timer: u32,
    pub dots: Vec<Dot>,
}

impl Default for PacmanState {
    fn default() -> Self {
        Self::new()
    }
}

impl PacmanState {
    pub fn new() -> Self {
        Self {
            x: START_X,
            y: START_Y,
            heading: Heading::Right,
            next_heading: Heading::Right,
            mouth_open: true,
            mouth_timer: 0,
            dots: dots_layout().iter().map(Dot::from_cell).collect(),
        }
    }

    /// Buffers a heading change; it takes effect at the start of the next
    /// step, one tick of input latency by design.
    pub fn set_heading(&mut self, heading: Heading) {
        self.next_heading = heading;
    }

    pub fn remaining_dots(&self) -> usize {
        self.dots.iter().filter(|d| !d.eaten).count()
    }

    pub fn step(&mut self) -> StepOutcome {
        self.heading = self.next_heading;

        match self.heading {
            Heading::Right => self.x += MOVE_SPEED,
            Heading::Down => self.y += MOVE_SPEED,
            Heading::Left => self.x -= MOVE_SPEED,
            Heading::Up => self.y -= MOVE_SPEED,
        }

        // Wrap to the opposite edge on all four sides.
        let (w, h) = (SCREEN_WIDTH as f32, SCREEN_HEIGHT as f32);
        if self.x < 0.0 {
            self.x = w;
        }
        if self.x > w {
            self.x = 0.0;
        }
        if self.y < 0.0 {
            self.y = h;
        }
        if self.y > h {
            self.y = 0.0;
        }

        self.mouth_timer += 1;
        if self.mouth_timer > MOUTH_PERIOD {
            self.mouth_open = !self.mouth_open;
            self.mouth_timer = 0;
        }

        let mut outcome = StepOutcome::default();
        for dot in &mut self.dots {
            if !dot.eaten
                && (self.x - dot.x).abs() < PICKUP_RANGE
                && (self.y - dot.y).abs() < PICKUP_RANGE
            {
                dot.eaten = true;
                outcome.dots_eaten += 1;
            }
        }

        outcome.cleared = self.dots.iter().all(|d| d.eaten);
        outcome
    }
}

impl Dot {
    fn from_cell(cell: &GlyphCell) -> Self {
        Self {
            x: cell.x,
            y: cell.y,
            eaten: false,
            letter: cell.letter,
        }
    }
}
