mod config;
mod constants;
mod game;
mod minigame;
mod view;

use bevy::prelude::*;
use bevy::window::{PresentMode, WindowResolution};

use config::ArcadeConfig;
use game::{
    AmbientPlugin, CabinetPlugin, CorePlugin, InputPlugin, MiniGamePlugin, ScreenPlugin,
    SoundPlugin, ViewPlugin,
};

fn main() {
    let config = ArcadeConfig::from_env();

    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Arcade Cabinet".to_string(),
                resolution: WindowResolution::new(1280, 800),
                present_mode: PresentMode::AutoVsync,
                resizable: true,
                ..default()
            }),
            ..default()
        }))
        .add_plugins(CorePlugin { config })
        .add_plugins(CabinetPlugin)
        .add_plugins(ScreenPlugin)
        .add_plugins(ViewPlugin)
        .add_plugins(InputPlugin)
        .add_plugins(MiniGamePlugin)
        .add_plugins(AmbientPlugin)
        .add_plugins(SoundPlugin)
        .run();
}
