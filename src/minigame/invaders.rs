//! The shooter simulation. Same tick regime as the dot collector: one step
//! per render tick while the screen surface is visible.

use crate::constants::{SCREEN_HEIGHT, SCREEN_WIDTH};

use super::glyph::{invaders_layout, GlyphCell};

pub const PLAYER_SPEED: f32 = 4.0;
/// Player and invader clamp margin from the horizontal screen edges.
pub const EDGE_MARGIN: f32 = 20.0;
pub const BULLET_SPEED: f32 = 6.0;
/// Minimum seconds between shots. Holding fire produces a steady stream
/// bounded only by this interval, never by a bullet-count cap.
pub const SHOT_INTERVAL_SECS: f64 = 0.1;
/// Ticks between horizontal block moves.
pub const MOVE_PERIOD: u32 = 40;
pub const BLOCK_STEP_X: f32 = 8.0;
pub const BLOCK_DROP_Y: f32 = 15.0;
/// Half-extent of the bullet/invader hit box.
pub const HIT_HALF_EXTENT: f32 = 15.0;
pub const KILL_SCORE: u32 = 20;
pub const CLEAR_BONUS: u32 = 500;

pub const EXPLOSION_START_RADIUS: f32 = 5.0;
pub const EXPLOSION_GROWTH: f32 = 2.0;
pub const EXPLOSION_FADE: f32 = 0.02;
pub const EXPLOSION_MAX_AGE: u32 = 30;

const PLAYER_START_X: f32 = 600.0;
const PLAYER_Y: f32 = 800.0;

#[derive(Clone, Copy, Debug)]
pub struct Invader {
    pub x: f32,
    pub y: f32,
    pub alive: bool,
    pub letter: usize,
}

#[derive(Clone, Copy, Debug)]
pub struct Bullet {
    pub x: f32,
    pub y: f32,
    pub velocity_y: f32,
}

#[derive(Clone, Copy, Debug)]
pub struct Explosion {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub opacity: f32,
    pub age: u32,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct InvaderInput {
    pub left: bool,
    pub right: bool,
    pub fire: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct StepOutcome {
    pub shots_fired: u32,
    pub kills: u32,
    pub cleared: bool,
}

#[derive(Debug)]
pub struct InvadersState {
    pub player_x: f32,
    pub player_y: f32,
    pub invaders: Vec<Invader>,
    pub bullets: Vec<Bullet>,
    pub explosions: Vec<Explosion>,
    direction: f32,
    move_timer: u32,
    last_shot_at: Option<f64>,
}

impl Default for InvadersState {
    fn default() -> Self {
        Self::new()
    }
}

impl InvadersState {
    pub fn new() -> Self {
        Self {
            player_x: PLAYER_START_X,
            player_y: PLAYER_Y,
            invaders: invaders_layout().iter().map(Invader::from_cell).collect(),
            bullets: Vec::new(),
            explosions: Vec::new(),
            direction: 1.0,
            move_timer: 0,
            last_shot_at: None,
        }
    }

    pub fn alive_invaders(&self) -> usize {
        self.invaders.iter().filter(|i| i.alive).count()
    }

    pub fn step(&mut self, input: InvaderInput, now: f64) -> StepOutcome {
        let mut outcome = StepOutcome::default();
        let width = SCREEN_WIDTH as f32;

        if input.left {
            self.player_x = (self.player_x - PLAYER_SPEED).max(EDGE_MARGIN);
        }
        if input.right {
            self.player_x = (self.player_x + PLAYER_SPEED).min(width - EDGE_MARGIN);
        }

        if input.fire && self.shot_ready(now) {
            self.bullets.push(Bullet {
                x: self.player_x,
                y: self.player_y - 10.0,
                velocity_y: -BULLET_SPEED,
            });
            self.last_shot_at = Some(now);
            outcome.shots_fired += 1;
        }

        for bullet in &mut self.bullets {
            bullet.y += bullet.velocity_y;
        }
        self.bullets.retain(|b| b.y > 0.0);

        self.move_timer += 1;
        if self.move_timer > MOVE_PERIOD {
            self.move_timer = 0;
            for invader in self.invaders.iter_mut().filter(|i| i.alive) {
                invader.x += self.direction * BLOCK_STEP_X;
            }
            let at_bound = self
                .invaders
                .iter()
                .any(|i| i.alive && (i.x <= EDGE_MARGIN || i.x >= width - EDGE_MARGIN));
            if at_bound {
                // The whole block reverses and drops together, dead cells
                // included so a revived layout never shears.
                self.direction = -self.direction;
                for invader in &mut self.invaders {
                    invader.y += BLOCK_DROP_Y;
                }
            }
        }

        let mut i = 0;
        while i < self.bullets.len() {
            let bullet = self.bullets[i];
            let hit = self.invaders.iter_mut().find(|inv| {
                inv.alive
                    && (bullet.x - inv.x).abs() < HIT_HALF_EXTENT
                    && (bullet.y - inv.y).abs() < HIT_HALF_EXTENT
            });
            if let Some(invader) = hit {
                invader.alive = false;
                self.explosions.push(Explosion {
                    x: invader.x,
                    y: invader.y,
                    radius: EXPLOSION_START_RADIUS,
                    opacity: 1.0,
                    age: 0,
                });
                self.bullets.swap_remove(i);
                outcome.kills += 1;
            } else {
                i += 1;
            }
        }

        for explosion in &mut self.explosions {
            explosion.age += 1;
            explosion.radius += EXPLOSION_GROWTH;
            explosion.opacity -= EXPLOSION_FADE;
        }
        self.explosions
            .retain(|e| e.age < EXPLOSION_MAX_AGE && e.opacity > 0.0);

        outcome.cleared = self.invaders.iter().all(|i| !i.alive);
        outcome
    }

    fn shot_ready(&self, now: f64) -> bool {
        match self.last_shot_at {
            None => true,
            Some(at) => now - at > SHOT_INTERVAL_SECS,
        }
    }
}

impl Invader {
    fn from_cell(cell: &GlyphCell) -> Self {
        Self {
            x: cell.x,
            y: cell.y,
            alive: true,
            letter: cell.letter,
        }
    }
}
