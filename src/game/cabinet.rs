use bevy::asset::LoadState;
use bevy::gltf::GltfAssetLabel;
use bevy::prelude::*;
use bevy::render::render_resource::Face;

use crate::config::ArcadeConfig;
use crate::constants::{
    color_from_hex, Colors, CABINET_DEPTH, CABINET_HEIGHT, CABINET_WIDTH,
};
use crate::view::modes::ViewMode;
use crate::view::rotation::RotationState;
use crate::view::transition::ViewState;

use super::input::Hover;
use super::UpdateSet;

pub struct CabinetPlugin;

const MODEL_SCALE: f32 = 0.6;
const HOVER_PULSE_RATE: f32 = 2.0;
const HOVER_PULSE_AMPLITUDE: f32 = 0.05;
const SCALE_RECOVERY: f32 = 0.1;

/// Container the model (or fallback) hangs under; drag rotation and the
/// hover pulse apply here.
#[derive(Component)]
pub(crate) struct CabinetRoot;

/// Marks the procedural body so the wireframe highlight knows what to trace.
#[derive(Component)]
struct FallbackCabinet;

#[derive(Resource, Default)]
struct CabinetModel {
    scene: Option<Handle<Scene>>,
    resolved: bool,
}

impl Plugin for CabinetPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CabinetModel>()
            .add_systems(Startup, spawn_cabinet_root)
            .add_systems(
                Update,
                (resolve_model, apply_cabinet_transform, draw_fallback_wireframe)
                    .in_set(UpdateSet::Visuals),
            );
    }
}

fn spawn_cabinet_root(
    mut commands: Commands,
    config: Res<ArcadeConfig>,
    asset_server: Res<AssetServer>,
    mut model: ResMut<CabinetModel>,
    rotation: Res<RotationState>,
) {
    commands.spawn((
        CabinetRoot,
        Transform::from_rotation(Quat::from_euler(
            EulerRot::YXZ,
            rotation.current_yaw,
            rotation.current_pitch,
            0.0,
        )),
        Visibility::default(),
    ));

    if config.model_path.is_empty() {
        info!("no cabinet model configured, using the procedural fallback");
        return;
    }
    model.scene = Some(asset_server.load(GltfAssetLabel::Scene(0).from_asset(config.model_path.clone())));
}

/// Waits for the GLB load to settle; a failure builds the procedural cabinet
/// instead, so the scene is never empty. No user-visible error either way.
fn resolve_model(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    mut model: ResMut<CabinetModel>,
    q_root: Query<Entity, With<CabinetRoot>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    if model.resolved {
        return;
    }
    let Ok(root) = q_root.single() else {
        return;
    };

    match &model.scene {
        None => {
            build_fallback(&mut commands, root, &mut meshes, &mut materials);
            model.resolved = true;
        }
        Some(scene) => match asset_server.load_state(scene.id()) {
            LoadState::Loaded => {
                let scene = scene.clone();
                commands.entity(root).with_children(|parent| {
                    parent.spawn((
                        SceneRoot(scene),
                        Transform::from_scale(Vec3::splat(MODEL_SCALE)),
                    ));
                });
                info!("cabinet model loaded");
                model.resolved = true;
            }
            LoadState::Failed(err) => {
                warn!("cabinet model failed to load ({err}), using the procedural fallback");
                build_fallback(&mut commands, root, &mut meshes, &mut materials);
                model.resolved = true;
            }
            _ => {}
        },
    }
}

fn build_fallback(
    commands: &mut Commands,
    root: Entity,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
) {
    let accent = color_from_hex(Colors::ACCENT);

    let body_mesh = meshes.add(Cuboid::new(CABINET_WIDTH, CABINET_HEIGHT, CABINET_DEPTH));
    let body_material = materials.add(StandardMaterial {
        base_color: color_from_hex(Colors::CABINET_BODY),
        perceptual_roughness: 0.35,
        ..default()
    });

    // Faint halo rendered on the inside of a slightly larger shell.
    let glow_mesh = meshes.add(Cuboid::new(
        CABINET_WIDTH + 0.1,
        CABINET_HEIGHT + 0.1,
        CABINET_DEPTH + 0.1,
    ));
    let glow_material = materials.add(StandardMaterial {
        base_color: accent.with_alpha(0.1),
        alpha_mode: AlphaMode::Blend,
        unlit: true,
        cull_mode: Some(Face::Front),
        ..default()
    });

    let bar_mesh = meshes.add(Cuboid::new(CABINET_WIDTH + 0.2, 0.05, 0.05));
    let bar_material = materials.add(StandardMaterial {
        base_color: accent.with_alpha(0.8),
        alpha_mode: AlphaMode::Blend,
        unlit: true,
        ..default()
    });

    let side_mesh = meshes.add(Cuboid::new(0.05, CABINET_HEIGHT + 0.2, 0.05));
    let side_material = materials.add(StandardMaterial {
        base_color: accent.with_alpha(0.6),
        alpha_mode: AlphaMode::Blend,
        unlit: true,
        ..default()
    });

    commands.entity(root).with_children(|parent| {
        parent.spawn((
            Mesh3d(body_mesh),
            MeshMaterial3d(body_material),
            Transform::default(),
            FallbackCabinet,
        ));
        parent.spawn((
            Mesh3d(glow_mesh),
            MeshMaterial3d(glow_material),
            Transform::default(),
        ));
        parent.spawn((
            Mesh3d(bar_mesh.clone()),
            MeshMaterial3d(bar_material.clone()),
            Transform::from_xyz(0.0, CABINET_HEIGHT * 0.5 + 0.05, 0.0),
        ));
        parent.spawn((
            Mesh3d(bar_mesh),
            MeshMaterial3d(bar_material),
            Transform::from_xyz(0.0, -(CABINET_HEIGHT * 0.5 + 0.05), 0.0),
        ));
        parent.spawn((
            Mesh3d(side_mesh.clone()),
            MeshMaterial3d(side_material.clone()),
            Transform::from_xyz(-(CABINET_WIDTH * 0.5 + 0.05), 0.0, 0.0),
        ));
        parent.spawn((
            Mesh3d(side_mesh),
            MeshMaterial3d(side_material),
            Transform::from_xyz(CABINET_WIDTH * 0.5 + 0.05, 0.0, 0.0),
        ));
    });
}

/// Tracks the smoothed rotation and the hover pulse. The cabinet freezes in
/// place once the Gameplay mode is committed; during the flight in it still
/// turns, which is what lets the facing gate do its job visually.
fn apply_cabinet_transform(
    time: Res<Time>,
    view: Res<ViewState>,
    rotation: Res<RotationState>,
    mut hover: ResMut<Hover>,
    mut q_root: Query<&mut Transform, With<CabinetRoot>>,
) {
    let Ok(mut transform) = q_root.single_mut() else {
        return;
    };

    let in_gameplay = view.mode == ViewMode::Gameplay;
    if !in_gameplay {
        transform.rotation = Quat::from_euler(
            EulerRot::YXZ,
            rotation.current_yaw,
            rotation.current_pitch,
            0.0,
        );
    }

    if hover.active && !in_gameplay {
        hover.intensity += time.delta_secs() * HOVER_PULSE_RATE;
        let scale = 1.0 + hover.intensity.sin() * HOVER_PULSE_AMPLITUDE;
        transform.scale = Vec3::splat(scale);
    } else {
        hover.intensity = 0.0;
        transform.scale = transform.scale.lerp(Vec3::ONE, SCALE_RECOVERY);
    }
}

fn draw_fallback_wireframe(
    mut gizmos: Gizmos,
    q_body: Query<&GlobalTransform, With<FallbackCabinet>>,
) {
    for global in &q_body {
        let mut tf = global.compute_transform();
        tf.scale *= Vec3::new(CABINET_WIDTH, CABINET_HEIGHT, CABINET_DEPTH);
        gizmos.cuboid(tf, color_from_hex(Colors::ACCENT).with_alpha(0.6));
    }
}
