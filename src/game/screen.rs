use bevy::asset::RenderAssetUsages;
use bevy::image::ImageSampler;
use bevy::prelude::*;
use bevy::render::render_resource::{Extent3d, TextureDimension, TextureFormat};

use crate::constants::{
    color_from_hex, SCREEN_HEIGHT, SCREEN_WIDTH, SURFACE_HEIGHT, SURFACE_TILT_RADIANS,
    SURFACE_WIDTH,
};

pub struct ScreenPlugin;

/// World position of the mini-game surface, just proud of the cabinet face.
/// It lives in world space, not under the cabinet root: the cabinet is turned
/// to its facing angle before this surface is ever shown.
const SURFACE_POSITION: Vec3 = Vec3::new(0.0, 0.5, 0.51);
const BORDER_THICKNESS: f32 = 0.01;
const BORDER_COLOR: u32 = 0x1a1a1a;

/// The in-scene quad showing the mini-game raster. Hidden except in the
/// Gameplay view; the simulation pauses whenever it is hidden.
#[derive(Component)]
pub(crate) struct GameScreen;

#[derive(Resource)]
pub(crate) struct ScreenTarget {
    pub(crate) image: Handle<Image>,
}

impl Plugin for ScreenPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_screen_surface);
    }
}

fn setup_screen_surface(
    mut commands: Commands,
    mut images: ResMut<Assets<Image>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let mut image = Image::new_fill(
        Extent3d {
            width: SCREEN_WIDTH,
            height: SCREEN_HEIGHT,
            depth_or_array_layers: 1,
        },
        TextureDimension::D2,
        &[0, 0, 0, 255],
        TextureFormat::Rgba8UnormSrgb,
        RenderAssetUsages::MAIN_WORLD | RenderAssetUsages::RENDER_WORLD,
    );
    // Nearest filtering keeps the pixel look when the camera is close.
    image.sampler = ImageSampler::nearest();
    let image = images.add(image);

    let screen_material = materials.add(StandardMaterial {
        base_color_texture: Some(image.clone()),
        unlit: true,
        ..default()
    });
    let border_material = materials.add(StandardMaterial {
        base_color: color_from_hex(BORDER_COLOR),
        unlit: true,
        ..default()
    });

    let horizontal_bar = meshes.add(Rectangle::new(
        SURFACE_WIDTH + BORDER_THICKNESS * 2.0,
        BORDER_THICKNESS,
    ));
    let vertical_bar = meshes.add(Rectangle::new(BORDER_THICKNESS, SURFACE_HEIGHT));

    commands
        .spawn((
            GameScreen,
            Mesh3d(meshes.add(Rectangle::new(SURFACE_WIDTH, SURFACE_HEIGHT))),
            MeshMaterial3d(screen_material),
            Transform::from_translation(SURFACE_POSITION)
                .with_rotation(Quat::from_rotation_x(SURFACE_TILT_RADIANS)),
            Visibility::Hidden,
        ))
        .with_children(|parent| {
            let dy = (SURFACE_HEIGHT + BORDER_THICKNESS) * 0.5;
            let dx = (SURFACE_WIDTH + BORDER_THICKNESS) * 0.5;
            for (mesh, offset) in [
                (horizontal_bar.clone(), Vec3::new(0.0, dy, 0.001)),
                (horizontal_bar, Vec3::new(0.0, -dy, 0.001)),
                (vertical_bar.clone(), Vec3::new(-dx, 0.0, 0.001)),
                (vertical_bar, Vec3::new(dx, 0.0, 0.001)),
            ] {
                parent.spawn((
                    Mesh3d(mesh),
                    MeshMaterial3d(border_material.clone()),
                    Transform::from_translation(offset),
                ));
            }
        });

    commands.insert_resource(ScreenTarget { image });
}
