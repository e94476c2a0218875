use bevy::prelude::*;

use crate::config::ArcadeConfig;
use crate::constants::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::minigame::arcade::{ArcadeGame, GameEvent, KeySet};
use crate::minigame::draw::{draw_frame, Banner};
use crate::minigame::raster::Raster;

use super::audio::{Cue, PlayCue};
use super::input::GameKeys;
use super::screen::{GameScreen, ScreenTarget};
use super::UpdateSet;

pub struct MiniGamePlugin;

/// Manual variant cycling, the `G` binding.
#[derive(Message, Clone, Copy)]
pub(crate) struct CycleVariant;

/// Seconds a mode-switch banner stays up.
const SWITCH_BANNER_SECS: f64 = 1.0;
/// Seconds the completion banner stays up.
const COMPLETE_BANNER_SECS: f64 = 3.0;

#[derive(Resource)]
struct ScreenRaster(Raster);

#[derive(Resource, Default)]
struct BannerState {
    banner: Option<Banner>,
    until: f64,
}

impl Plugin for MiniGamePlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<CycleVariant>()
            .init_resource::<ArcadeGame>()
            .init_resource::<BannerState>()
            .insert_resource(ScreenRaster(Raster::new(SCREEN_WIDTH, SCREEN_HEIGHT)))
            .add_systems(Update, advance_minigame.in_set(UpdateSet::Simulate));
    }
}

/// One simulation step plus one redraw per frame, both gated on the screen
/// surface being visible: a hidden screen pauses the game outright. Variant
/// cycling is processed regardless so `G` works from anywhere.
fn advance_minigame(
    time: Res<Time>,
    config: Res<ArcadeConfig>,
    keys: Res<GameKeys>,
    mut cycles: MessageReader<CycleVariant>,
    mut game: ResMut<ArcadeGame>,
    mut raster: ResMut<ScreenRaster>,
    mut banner: ResMut<BannerState>,
    screen: Res<ScreenTarget>,
    q_screen: Query<&Visibility, With<GameScreen>>,
    mut images: ResMut<Assets<Image>>,
    mut cues: MessageWriter<PlayCue>,
) {
    let now = time.elapsed_secs_f64();
    let mut events = Vec::new();

    for _ in cycles.read() {
        game.cycle_variant(&mut events);
    }

    let visible = q_screen.iter().any(|v| *v == Visibility::Visible);
    if visible {
        let keyset = KeySet {
            left: keys.left,
            right: keys.right,
            up: keys.up,
            down: keys.down,
            fire: keys.fire,
        };
        game.step(&keyset, now, &mut events);
    }

    let show_banners = !config.is_primary_page();
    for event in &events {
        match event {
            GameEvent::DotEaten => {
                cues.write(PlayCue(Cue::Eat));
            }
            GameEvent::Shot => {
                cues.write(PlayCue(Cue::Shoot));
            }
            GameEvent::InvaderKilled => {
                cues.write(PlayCue(Cue::Hit));
            }
            GameEvent::VariantSwitched(variant) => {
                info!("mini-game variant: {:?}", variant);
                cues.write(PlayCue(Cue::ModeSwitch));
                if show_banners {
                    banner.banner = Some(Banner {
                        title: variant.title().to_string(),
                        subtitle: "CLEAR THE BOARD TO ADVANCE".to_string(),
                    });
                    banner.until = now + SWITCH_BANNER_SECS;
                }
            }
            GameEvent::Completed => {
                info!("both games cleared, final score {}", game.score);
                cues.write(PlayCue(Cue::Complete));
                if show_banners {
                    banner.banner = Some(Banner {
                        title: "GAME COMPLETE".to_string(),
                        subtitle: format!("SCORE {}", game.score),
                    });
                    banner.until = now + COMPLETE_BANNER_SECS;
                }
            }
            GameEvent::ResetToFirstLevel => {
                info!("back to the first level");
            }
        }
    }

    if !visible {
        return;
    }

    if banner.banner.is_some() && now >= banner.until {
        banner.banner = None;
    }

    draw_frame(&mut raster.0, &game, banner.banner.as_ref(), now);
    if let Some(image) = images.get_mut(&screen.image) {
        if let Some(data) = image.data.as_mut() {
            data.copy_from_slice(raster.0.data());
        }
    }
}
