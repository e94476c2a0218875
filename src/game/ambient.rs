use bevy::prelude::*;

use crate::constants::{color_from_hex, Colors};
use crate::view::modes::ViewMode;
use crate::view::transition::ViewState;

use super::input::Hover;
use super::UpdateSet;

pub struct AmbientPlugin;

const AMBIENT_COUNT: usize = 120;
const ARCADE_COUNT: usize = 150;
/// Cloud rotation rates, radians per second.
const SPIN_YAW: f32 = 0.1;
const SPIN_PITCH: f32 = 0.05;
/// Bright-preset scale relative to the dim particle size.
const BRIGHT_SCALE: f32 = 4.0 / 3.0;
const DIM_ALPHA: f32 = 0.6;
const BRIGHT_ALPHA: f32 = 0.9;

const HOVER_LIGHT_BASE: f32 = 300_000.0;
const HOVER_LIGHT_AMPLITUDE: f32 = 200_000.0;
const HOVER_PULSE_RATE: f32 = 5.0;

/// Root of the active particle cloud; rotates at a constant rate and is
/// despawned wholesale when the view mode changes.
#[derive(Component)]
struct ParticleCloud;

#[derive(Component)]
struct Particle {
    dim: Handle<StandardMaterial>,
    bright: Handle<StandardMaterial>,
    base_scale: f32,
}

#[derive(Component)]
struct HoverLight {
    index: usize,
}

impl Plugin for AmbientPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_hover_lights).add_systems(
            Update,
            (regenerate_on_mode_change, spin_cloud, apply_particle_presets, pulse_hover_lights)
                .in_set(UpdateSet::Visuals),
        );
    }
}

fn spawn_hover_lights(mut commands: Commands) {
    let lights = [
        (Colors::HOVER_CYAN, Vec3::new(2.0, 1.0, 2.0), 8.0),
        (Colors::HOVER_MAGENTA, Vec3::new(-2.0, 1.0, 2.0), 8.0),
        (Colors::HOVER_YELLOW, Vec3::new(0.0, 2.0, 1.0), 6.0),
    ];
    for (index, (color, position, range)) in lights.into_iter().enumerate() {
        commands.spawn((
            PointLight {
                color: color_from_hex(color),
                intensity: 0.0,
                range,
                ..default()
            },
            Transform::from_translation(position),
            HoverLight { index },
        ));
    }
}

/// Hash-style placement keeps the clouds deterministic without a RNG; the
/// sequence is fixed per index, so regeneration reproduces the same cloud.
fn hash01(seed: f32) -> f32 {
    seed.sin() * 0.5 + 0.5
}

fn ambient_position(i: usize) -> Vec3 {
    let t = i as f32;
    Vec3::new(
        (hash01(t * 17.13) - 0.5) * 20.0,
        (hash01(t * 31.77) - 0.5) * 20.0,
        (hash01(t * 23.91) - 0.5) * 20.0,
    )
}

fn arcade_position(i: usize) -> Vec3 {
    let t = i as f32;
    let radius = 2.0 + hash01(t * 7.31) * 3.0;
    let angle = hash01(t * 12.9898) * std::f32::consts::TAU;
    // The first thirty particles pool low around the cabinet base.
    let height = if i < 30 {
        -1.5 - hash01(t * 5.21)
    } else {
        (hash01(t * 9.73) - 0.5) * 4.0
    };
    Vec3::new(angle.cos() * radius, height, angle.sin() * radius)
}

fn ambient_tint(i: usize) -> Color {
    // Blue family, four fixed tints.
    match i % 4 {
        0 => Color::srgb(0.25, 0.55, 0.85),
        1 => Color::srgb(0.35, 0.75, 0.95),
        2 => Color::srgb(0.45, 0.9, 1.0),
        _ => Color::srgb(0.3, 0.65, 0.9),
    }
}

fn arcade_tint(i: usize) -> Color {
    // Neon cyan / magenta / yellow rotation.
    match i % 3 {
        0 => Color::srgb(0.2, 0.8, 1.0),
        1 => Color::srgb(1.0, 0.2, 1.0),
        _ => Color::srgb(1.0, 1.0, 0.2),
    }
}

fn regenerate_on_mode_change(
    mut commands: Commands,
    view: Res<ViewState>,
    mut last_mode: Local<Option<ViewMode>>,
    q_cloud: Query<Entity, With<ParticleCloud>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let mode = view.mode;
    if *last_mode == Some(mode) {
        return;
    }
    *last_mode = Some(mode);

    for cloud in &q_cloud {
        commands.entity(cloud).despawn();
    }

    let mesh = meshes.add(Sphere::new(0.075).mesh().uv(8, 6));
    let (count, position, tint): (usize, fn(usize) -> Vec3, fn(usize) -> Color) = match mode {
        ViewMode::Overview => (AMBIENT_COUNT, ambient_position, ambient_tint),
        ViewMode::Gameplay => (ARCADE_COUNT, arcade_position, arcade_tint),
    };

    commands
        .spawn((ParticleCloud, Transform::default(), Visibility::default()))
        .with_children(|parent| {
            for i in 0..count {
                let color = tint(i);
                let dim = materials.add(unlit_particle(color, DIM_ALPHA));
                let bright = materials.add(unlit_particle(color, BRIGHT_ALPHA));
                let base_scale = 0.5 + (i % 3) as f32 * 0.25;
                parent.spawn((
                    Mesh3d(mesh.clone()),
                    MeshMaterial3d(dim.clone()),
                    Transform::from_translation(position(i)).with_scale(Vec3::splat(base_scale)),
                    Particle {
                        dim,
                        bright,
                        base_scale,
                    },
                ));
            }
        });
}

fn unlit_particle(color: Color, alpha: f32) -> StandardMaterial {
    StandardMaterial {
        base_color: color.with_alpha(alpha),
        alpha_mode: AlphaMode::Blend,
        unlit: true,
        ..default()
    }
}

fn spin_cloud(time: Res<Time>, mut q_cloud: Query<&mut Transform, With<ParticleCloud>>) {
    for mut transform in &mut q_cloud {
        transform.rotate_y(time.delta_secs() * SPIN_YAW);
        transform.rotate_x(time.delta_secs() * SPIN_PITCH);
    }
}

/// Two presets only: dim when idle in the Overview, bright while hovered or
/// in Gameplay.
fn apply_particle_presets(
    hover: Res<Hover>,
    view: Res<ViewState>,
    mut q_particles: Query<(&Particle, &mut MeshMaterial3d<StandardMaterial>, &mut Transform)>,
) {
    let bright = hover.active || view.mode == ViewMode::Gameplay;
    for (particle, mut material, mut transform) in &mut q_particles {
        let (target, scale) = if bright {
            (&particle.bright, particle.base_scale * BRIGHT_SCALE)
        } else {
            (&particle.dim, particle.base_scale)
        };
        if material.0 != *target {
            material.0 = target.clone();
        }
        transform.scale = Vec3::splat(scale);
    }
}

fn pulse_hover_lights(
    time: Res<Time>,
    hover: Res<Hover>,
    view: Res<ViewState>,
    mut q_lights: Query<(&HoverLight, &mut PointLight)>,
) {
    let active = hover.active && view.mode != ViewMode::Gameplay;
    for (light, mut point) in &mut q_lights {
        point.intensity = if active {
            let phase = time.elapsed_secs() * HOVER_PULSE_RATE + light.index as f32;
            HOVER_LIGHT_BASE + phase.sin() * HOVER_LIGHT_AMPLITUDE
        } else {
            0.0
        };
    }
}
