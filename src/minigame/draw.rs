//! Renders one frame of the active mini-game into the raster canvas. Purely
//! a function of game state, banner state and elapsed time; the caller
//! uploads the result to the screen-surface texture.

use crate::constants::raster_color;

use super::arcade::{ArcadeGame, GameVariant};
use super::invaders::InvadersState;
use super::pacman::{PacmanState, PLAYER_RADIUS};
use super::raster::Raster;

const PACMAN_BG: [u8; 4] = raster_color(0x000000, 255);
const INVADERS_BG: [u8; 4] = raster_color(0x000033, 255);
const DOT_COLOR: [u8; 4] = raster_color(0xffff00, 255);
const DOT_GLOW: [u8; 4] = raster_color(0xffff00, 70);
const HUD_TEXT: [u8; 4] = raster_color(0xffffff, 255);
const HUD_LIVES: [u8; 4] = raster_color(0xff6b6b, 255);
const HUD_ACCENT: [u8; 4] = raster_color(0x3b82f6, 255);
const STAR: [u8; 4] = raster_color(0xffffff, 255);

/// Outer/inner/core fill per invader letter group.
const INVADER_COLORS: [[u32; 3]; 5] = [
    [0xff6b6b, 0xff8e8e, 0xffb3b3],
    [0x4ecdc4, 0x7dd3d0, 0xa8e6e3],
    [0x45b7d1, 0x6bc5d8, 0x8dd3df],
    [0x96ceb4, 0xa8d5c1, 0xbadcce],
    [0xfeca57, 0xfed976, 0xfee895],
];

const EXPLOSION_COLORS: [u32; 2] = [0xff6b6b, 0x4ecdc4];

/// Transient center-screen notice (mode switches, completion). Suppressed on
/// the primary landing page.
#[derive(Clone, Debug)]
pub struct Banner {
    pub title: String,
    pub subtitle: String,
}

pub fn draw_frame(raster: &mut Raster, game: &ArcadeGame, banner: Option<&Banner>, elapsed: f64) {
    match game.variant {
        GameVariant::Pacman => draw_pacman_frame(raster, &game.pacman),
        GameVariant::SpaceInvaders => draw_invaders_frame(raster, &game.invaders, elapsed),
    }
    draw_hud(raster, game);
    if let Some(banner) = banner {
        draw_banner(raster, banner);
    }
}

fn draw_pacman_frame(raster: &mut Raster, state: &PacmanState) {
    raster.clear(PACMAN_BG);

    for dot in state.dots.iter().filter(|d| !d.eaten) {
        raster.fill_circle(dot.x, dot.y, 11.0, DOT_GLOW);
        raster.fill_circle(dot.x, dot.y, 8.0, DOT_COLOR);
    }

    raster.fill_circle(state.x, state.y, PLAYER_RADIUS, DOT_COLOR);
    if state.mouth_open {
        // Carve the mouth as a background-colored wedge over the disc.
        let angle = state.heading.angle();
        let reach = PLAYER_RADIUS + 1.0;
        let a = (state.x, state.y);
        let b = (
            state.x + (angle + 0.5).cos() * reach,
            state.y + (angle + 0.5).sin() * reach,
        );
        let c = (
            state.x + (angle - 0.5).cos() * reach,
            state.y + (angle - 0.5).sin() * reach,
        );
        raster.fill_triangle(a, b, c, PACMAN_BG);
    }
}

fn draw_invaders_frame(raster: &mut Raster, state: &InvadersState, elapsed: f64) {
    raster.clear(INVADERS_BG);

    let (w, h) = (raster.width(), raster.height());
    for i in 0..50u32 {
        let x = (i * 13) % w;
        let y = (i * 17) % h;
        raster.fill_rect(x as f32, y as f32, 2.0, 2.0, STAR);
    }

    for invader in state.invaders.iter().filter(|i| i.alive) {
        let [outer, inner, core] = INVADER_COLORS[invader.letter % INVADER_COLORS.len()];
        raster.fill_rect(invader.x - 14.0, invader.y - 14.0, 28.0, 28.0, raster_color(outer, 255));
        raster.fill_rect(invader.x - 10.0, invader.y - 10.0, 20.0, 20.0, raster_color(inner, 255));
        raster.fill_rect(invader.x - 6.0, invader.y - 6.0, 12.0, 12.0, raster_color(core, 255));
        raster.fill_rect(invader.x - 2.0, invader.y - 2.0, 4.0, 4.0, HUD_TEXT);
        // Slow shimmer on the core highlight.
        let pulse = ((elapsed * 5.0 + invader.x as f64 * 0.01).sin() * 0.2 + 0.8) * 255.0;
        raster.fill_rect(
            invader.x - 1.0,
            invader.y - 1.0,
            2.0,
            2.0,
            raster_color(0xffffff, pulse as u8),
        );
    }

    let px = state.player_x;
    let py = state.player_y;
    raster.fill_rect(px - 18.0, py - 8.0, 36.0, 16.0, raster_color(0x00ffff, 255));
    raster.fill_rect(px - 15.0, py - 5.0, 30.0, 10.0, HUD_TEXT);
    raster.fill_rect(px - 12.0, py - 2.0, 24.0, 4.0, DOT_COLOR);
    raster.fill_rect(px - 3.0, py - 7.0, 6.0, 2.0, raster_color(0x00ffff, 255));
    raster.fill_rect(px - 1.0, py + 5.0, 2.0, 3.0, raster_color(0x00ffff, 255));

    for bullet in &state.bullets {
        raster.fill_rect(bullet.x - 4.0, bullet.y - 7.0, 8.0, 14.0, DOT_COLOR);
        raster.fill_rect(bullet.x - 3.0, bullet.y - 6.0, 6.0, 12.0, HUD_TEXT);
        raster.fill_rect(bullet.x - 2.0, bullet.y - 5.0, 4.0, 10.0, raster_color(0x00ffff, 255));
    }

    for (index, explosion) in state.explosions.iter().enumerate() {
        let color = EXPLOSION_COLORS[index % EXPLOSION_COLORS.len()];
        let alpha = explosion.opacity.clamp(0.0, 1.0);
        raster.fill_circle(
            explosion.x,
            explosion.y,
            explosion.radius,
            raster_color(color, (alpha * 0.6 * 255.0) as u8),
        );
        raster.fill_circle(
            explosion.x,
            explosion.y,
            explosion.radius * 0.6,
            raster_color(0xffffff, (alpha * 0.8 * 255.0) as u8),
        );
        raster.fill_circle(
            explosion.x,
            explosion.y,
            explosion.radius * 0.3,
            raster_color(0xffff00, (alpha * 255.0) as u8),
        );
    }
}

fn draw_hud(raster: &mut Raster, game: &ArcadeGame) {
    let h = raster.height() as f32;

    raster.draw_text(15.0, 15.0, 2, HUD_TEXT, &format!("SCORE {}", game.score));
    raster.draw_text(15.0, 40.0, 2, HUD_LIVES, &format!("LIVES {}", game.lives));
    raster.draw_text(15.0, 65.0, 2, HUD_ACCENT, &format!("MODE {}", game.variant.title()));

    let help = match game.variant {
        GameVariant::Pacman => "ARROWS MOVE EAT THE DOTS",
        GameVariant::SpaceInvaders => "ARROWS MOVE SPACE FIRES",
    };
    raster.draw_text(15.0, h - 60.0, 2, HUD_ACCENT, help);
    raster.draw_text(15.0, h - 30.0, 2, HUD_ACCENT, "G SWITCHES GAME");
}

fn draw_banner(raster: &mut Raster, banner: &Banner) {
    let w = raster.width() as f32;
    let h = raster.height() as f32;
    let cx = w * 0.5;
    let cy = h * 0.5;

    let title_w = Raster::text_width(&banner.title, 4);
    let sub_w = Raster::text_width(&banner.subtitle, 2);
    let box_w = title_w.max(sub_w) + 80.0;
    let box_h = 120.0;

    raster.fill_rect(cx - box_w * 0.5, cy - box_h * 0.5, box_w, box_h, raster_color(0x1a1a1a, 230));
    raster.fill_rect(cx - box_w * 0.5, cy - box_h * 0.5, box_w, 4.0, HUD_ACCENT);
    raster.fill_rect(cx - box_w * 0.5, cy + box_h * 0.5 - 4.0, box_w, 4.0, HUD_ACCENT);

    raster.draw_text(cx - title_w * 0.5, cy - 44.0, 4, HUD_TEXT, &banner.title);
    raster.draw_text(cx - sub_w * 0.5, cy + 8.0, 2, HUD_ACCENT, &banner.subtitle);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{SCREEN_HEIGHT, SCREEN_WIDTH};
    use crate::minigame::arcade::KeySet;

    fn canvas() -> Raster {
        Raster::new(SCREEN_WIDTH, SCREEN_HEIGHT)
    }

    #[test]
    fn pacman_frame_marks_dots_on_a_black_background() {
        let mut raster = canvas();
        let game = ArcadeGame::new();
        draw_frame(&mut raster, &game, None, 0.0);

        let dot = game.pacman.dots[0];
        assert_eq!(raster.pixel(dot.x as i32, dot.y as i32), Some(DOT_COLOR));
        assert_eq!(
            raster.pixel(SCREEN_WIDTH as i32 - 2, SCREEN_HEIGHT as i32 / 2),
            Some(PACMAN_BG)
        );
    }

    #[test]
    fn invaders_frame_uses_the_space_background() {
        let mut raster = canvas();
        let mut game = ArcadeGame::new();
        let mut events = Vec::new();
        game.cycle_variant(&mut events);
        draw_frame(&mut raster, &game, None, 0.0);

        let invader = game.invaders.invaders[0];
        assert!(raster.pixel(invader.x as i32, invader.y as i32).is_some());
        assert_ne!(
            raster.pixel(invader.x as i32, invader.y as i32),
            Some(INVADERS_BG)
        );
    }

    #[test]
    fn eaten_dots_are_not_drawn() {
        let mut raster = canvas();
        let mut game = ArcadeGame::new();
        let dot = {
            let d = &mut game.pacman.dots[0];
            d.eaten = true;
            *d
        };
        // Keep the player away so its disc cannot cover the sampled pixel.
        game.pacman.x = 1100.0;
        game.pacman.y = 850.0;
        draw_frame(&mut raster, &game, None, 0.0);
        assert_eq!(raster.pixel(dot.x as i32, dot.y as i32), Some(PACMAN_BG));
    }

    #[test]
    fn banner_draws_over_the_frame_center() {
        let mut raster = canvas();
        let game = ArcadeGame::new();
        let banner = Banner {
            title: "GAME COMPLETE".to_string(),
            subtitle: "SCORE 1280".to_string(),
        };
        draw_frame(&mut raster, &game, Some(&banner), 0.0);

        let cx = SCREEN_WIDTH as i32 / 2;
        let cy = SCREEN_HEIGHT as i32 / 2;
        assert_ne!(raster.pixel(cx, cy - 58), Some(PACMAN_BG));
    }

    #[test]
    fn frames_draw_for_any_reachable_state() {
        let mut raster = canvas();
        let mut game = ArcadeGame::new();
        let mut events = Vec::new();
        let keys = KeySet {
            fire: true,
            right: true,
            ..KeySet::default()
        };
        for tick in 0..120 {
            game.step(&keys, tick as f64 / 60.0, &mut events);
            draw_frame(&mut raster, &game, None, tick as f64 / 60.0);
        }
        game.cycle_variant(&mut events);
        for tick in 0..120 {
            game.step(&keys, 10.0 + tick as f64 / 60.0, &mut events);
            draw_frame(&mut raster, &game, None, 10.0 + tick as f64 / 60.0);
        }
    }
}
