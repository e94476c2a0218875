use bevy::prelude::*;

use crate::view::drag::DragTracker;
use crate::view::modes::{CameraPose, ViewMode};
use crate::view::rotation::RotationState;
use crate::view::transition::{TransitionStep, ViewState};

use super::audio::{Cue, PlayCue};
use super::screen::GameScreen;
use super::{MainCamera, UpdateSet};

pub struct ViewPlugin;

#[derive(Message, Clone, Copy)]
pub(crate) struct RequestViewSwitch {
    pub(crate) target: ViewMode,
}

impl Plugin for ViewPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<RequestViewSwitch>().add_systems(
            Update,
            (step_rotation, handle_switch_requests, step_transition)
                .chain()
                .in_set(UpdateSet::View),
        );
    }
}

/// Smooths the cabinet toward its target every frame and keeps the idle
/// auto-spin running while nobody is interacting in the Overview.
fn step_rotation(mut rotation: ResMut<RotationState>, view: Res<ViewState>, drag: Res<DragTracker>) {
    if view.mode == ViewMode::Overview && !view.is_transitioning() && !drag.is_dragging() {
        rotation.auto_spin();
    }
    rotation.step();
}

fn handle_switch_requests(
    mut requests: MessageReader<RequestViewSwitch>,
    mut view: ResMut<ViewState>,
    mut rotation: ResMut<RotationState>,
    mut q_screen: Query<&mut Visibility, With<GameScreen>>,
    mut cues: MessageWriter<PlayCue>,
) {
    for request in requests.read() {
        if !view.request_switch(request.target) {
            // Mid-transition and same-mode requests are dropped, never queued.
            debug!("view switch to {:?} dropped", request.target);
            continue;
        }
        match request.target {
            ViewMode::Gameplay => rotation.face_front(),
            // Leaving Gameplay hides the screen right away, pausing the
            // mini-game for the whole flight out.
            ViewMode::Overview => {
                for mut screen in &mut q_screen {
                    *screen = Visibility::Hidden;
                }
            }
        }
        info!("view switch started: {:?} -> {:?}", view.mode, request.target);
        cues.write(PlayCue(Cue::Transition));
    }
}

/// Drives the in-flight transition. This is the only system that writes the
/// camera while a transition is active.
fn step_transition(
    time: Res<Time>,
    mut view: ResMut<ViewState>,
    rotation: Res<RotationState>,
    mut q_camera: Query<(&mut Transform, &mut Projection), With<MainCamera>>,
    mut q_screen: Query<&mut Visibility, With<GameScreen>>,
) {
    let current = view.current_pose;
    let step = {
        let Some(transition) = view.transition.as_mut() else {
            return;
        };
        let target = transition.target;
        (
            target,
            transition.step(time.delta_secs(), rotation.is_settled(), current),
        )
    };

    let (target, step) = step;
    match step {
        TransitionStep::Hold => {}
        TransitionStep::Apply(pose) => {
            apply_pose(&mut q_camera, &pose);
            view.current_pose = pose;
        }
        TransitionStep::Finished(pose) => {
            apply_pose(&mut q_camera, &pose);
            view.commit(target, pose);

            // The screen only appears once the camera has fully arrived.
            if target == ViewMode::Gameplay {
                for mut screen in &mut q_screen {
                    *screen = Visibility::Visible;
                }
            }
            info!("view switch complete: {:?}", target);
        }
    }
}

fn apply_pose(
    q_camera: &mut Query<(&mut Transform, &mut Projection), With<MainCamera>>,
    pose: &CameraPose,
) {
    let Ok((mut transform, mut projection)) = q_camera.single_mut() else {
        return;
    };
    *transform = Transform::from_translation(pose.position).looking_at(pose.look_at, Vec3::Y);
    if let Projection::Perspective(perspective) = &mut *projection {
        perspective.fov = pose.fov_degrees.to_radians();
    }
}
