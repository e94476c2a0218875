use bevy::prelude::*;
use bevy::window::{CursorEntered, CursorLeft, CursorMoved, PrimaryWindow};

use crate::view::drag::{DragMove, DragTracker};
use crate::view::modes::ViewMode;
use crate::view::rotation::RotationState;
use crate::view::transition::ViewState;

use super::audio::{Cue, PlayCue};
use super::minigame::CycleVariant;
use super::view::RequestViewSwitch;
use super::UpdateSet;

pub struct InputPlugin;

/// Pressed game keys, sampled once per frame for the simulation step.
#[derive(Resource, Default)]
pub(crate) struct GameKeys {
    pub(crate) left: bool,
    pub(crate) right: bool,
    pub(crate) up: bool,
    pub(crate) down: bool,
    pub(crate) fire: bool,
}

/// Whether the cursor is over the window, plus the running phase of the
/// cabinet's hover pulse.
#[derive(Resource, Default)]
pub(crate) struct Hover {
    pub(crate) active: bool,
    pub(crate) intensity: f32,
}

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<GameKeys>()
            .init_resource::<Hover>()
            .add_systems(
                Update,
                (keyboard_system, pointer_system, hover_system).in_set(UpdateSet::Input),
            );
    }
}

fn keyboard_system(
    keys: Res<ButtonInput<KeyCode>>,
    view: Res<ViewState>,
    mut game_keys: ResMut<GameKeys>,
    mut switches: MessageWriter<RequestViewSwitch>,
    mut cycles: MessageWriter<CycleVariant>,
    mut cues: MessageWriter<PlayCue>,
) {
    game_keys.left = keys.pressed(KeyCode::ArrowLeft) || keys.pressed(KeyCode::KeyA);
    game_keys.right = keys.pressed(KeyCode::ArrowRight) || keys.pressed(KeyCode::KeyD);
    game_keys.up = keys.pressed(KeyCode::ArrowUp) || keys.pressed(KeyCode::KeyW);
    game_keys.down = keys.pressed(KeyCode::ArrowDown) || keys.pressed(KeyCode::KeyS);
    game_keys.fire = keys.pressed(KeyCode::Space);

    if keys.just_pressed(KeyCode::KeyG) {
        cycles.write(CycleVariant);
    }
    if keys.just_pressed(KeyCode::KeyV) {
        switches.write(RequestViewSwitch {
            target: view.mode.cycled(),
        });
    }
    if keys.just_pressed(KeyCode::Escape) {
        switches.write(RequestViewSwitch {
            target: ViewMode::Overview,
        });
    }

    for key in keys.get_just_pressed() {
        if let Some(cue) = Cue::for_key(*key) {
            cues.write(PlayCue(cue));
        }
    }
}

/// Pointer handling: press arms a drag session (Overview only), moves rotate
/// the cabinet, release doubles as the click. A click toggles the view mode
/// unless a confirmed drag is still observable or a transition is running.
fn pointer_system(
    time: Res<Time>,
    buttons: Res<ButtonInput<MouseButton>>,
    touches: Res<Touches>,
    mut moves: MessageReader<CursorMoved>,
    q_window: Query<&Window, With<PrimaryWindow>>,
    view: Res<ViewState>,
    mut drag: ResMut<DragTracker>,
    mut rotation: ResMut<RotationState>,
    mut switches: MessageWriter<RequestViewSwitch>,
    mut cues: MessageWriter<PlayCue>,
) {
    let now = time.elapsed_secs_f64();
    drag.tick(now);

    if buttons.just_pressed(MouseButton::Left) && view.mode != ViewMode::Gameplay {
        if let Ok(window) = q_window.single() {
            if let Some(position) = window.cursor_position() {
                drag.pointer_down(position);
            }
        }
    }
    // Touch mirrors the mouse path: the first finger drags, a short tap is a
    // click on release.
    for touch in touches.iter_just_pressed() {
        if view.mode != ViewMode::Gameplay {
            drag.pointer_down(touch.position());
        }
    }

    for moved in moves.read() {
        apply_drag_move(&mut drag, &mut rotation, &view, moved.position);
    }
    for touch in touches.iter() {
        apply_drag_move(&mut drag, &mut rotation, &view, touch.position());
    }

    let released =
        buttons.just_released(MouseButton::Left) || touches.iter_just_released().next().is_some();
    if released {
        drag.pointer_up(now);
        cues.write(PlayCue(Cue::Click));
        if drag.click_allowed() && !view.is_transitioning() {
            switches.write(RequestViewSwitch {
                target: view.mode.cycled(),
            });
        }
    }
}

fn apply_drag_move(
    drag: &mut DragTracker,
    rotation: &mut RotationState,
    view: &ViewState,
    position: Vec2,
) {
    if let DragMove::Rotate {
        yaw_delta,
        pitch_delta,
    } = drag.pointer_move(position)
    {
        if !view.is_transitioning() {
            rotation.nudge(yaw_delta, pitch_delta);
        }
    }
}

fn hover_system(
    mut entered: MessageReader<CursorEntered>,
    mut left: MessageReader<CursorLeft>,
    mut hover: ResMut<Hover>,
    mut cues: MessageWriter<PlayCue>,
) {
    if entered.read().last().is_some() && !hover.active {
        hover.active = true;
        cues.write(PlayCue(Cue::Hover));
    }
    if left.read().last().is_some() {
        hover.active = false;
    }
}
