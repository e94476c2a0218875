use bevy::prelude::*;

use crate::config::ArcadeConfig;
use crate::constants::{color_from_hex, Colors};
use crate::view::drag::DragTracker;
use crate::view::modes::{preset, ViewMode};
use crate::view::rotation::RotationState;
use crate::view::transition::ViewState;

/// Per-frame ordering. Input feeds the view state machine, the view gates the
/// simulation, and visuals read everything last. One chained pass keeps every
/// shared resource single-writer per frame.
#[derive(SystemSet, Debug, Hash, Eq, PartialEq, Clone)]
pub(crate) enum UpdateSet {
    Input,
    View,
    Simulate,
    Visuals,
}

pub struct CorePlugin {
    pub config: ArcadeConfig,
}

#[derive(Component)]
pub(crate) struct MainCamera;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(self.config.clone())
            .init_resource::<ViewState>()
            .init_resource::<RotationState>()
            .init_resource::<DragTracker>()
            .insert_resource(ClearColor(Color::BLACK))
            .insert_resource(AmbientLight {
                color: color_from_hex(0x404040),
                brightness: 80.0,
                ..default()
            })
            .configure_sets(
                Update,
                (
                    UpdateSet::Input,
                    UpdateSet::View,
                    UpdateSet::Simulate,
                    UpdateSet::Visuals,
                )
                    .chain(),
            )
            .add_systems(Startup, (setup_camera, setup_lights));
    }
}

fn setup_camera(mut commands: Commands) {
    #[cfg(target_arch = "wasm32")]
    let msaa = Msaa::Off;
    #[cfg(not(target_arch = "wasm32"))]
    let msaa = Msaa::Sample4;

    let pose = preset(ViewMode::Overview);
    commands.spawn((
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            fov: pose.fov_degrees.to_radians(),
            ..default()
        }),
        Transform::from_translation(pose.position).looking_at(pose.look_at, Vec3::Y),
        msaa,
        MainCamera,
    ));
}

fn setup_lights(mut commands: Commands) {
    // Key light from the upper right, the only shadow caster.
    commands.spawn((
        DirectionalLight {
            illuminance: 12_000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(5.0, 5.0, 5.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    // Blue accent wash in front of the cabinet.
    commands.spawn((
        PointLight {
            color: color_from_hex(Colors::ACCENT),
            intensity: 600_000.0,
            range: 10.0,
            ..default()
        },
        Transform::from_xyz(0.0, 0.0, 3.0),
    ));

    commands.spawn((
        PointLight {
            color: Color::WHITE,
            intensity: 400_000.0,
            range: 8.0,
            ..default()
        },
        Transform::from_xyz(-3.0, 2.0, 3.0),
    ));

    commands.spawn((
        PointLight {
            color: Color::WHITE,
            intensity: 300_000.0,
            range: 6.0,
            ..default()
        },
        Transform::from_xyz(0.0, 0.0, 2.0),
    ));
}
