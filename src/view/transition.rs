use bevy::prelude::*;

use super::modes::{preset, CameraPose, ViewMode};

/// Fixed duration of the camera flight between presets, seconds.
pub const TRANSITION_SECS: f32 = 0.8;

pub fn ease_out_cubic(p: f32) -> f32 {
    1.0 - (1.0 - p).powi(3)
}

pub fn lerp_pose(start: &CameraPose, end: &CameraPose, t: f32) -> CameraPose {
    CameraPose {
        position: start.position.lerp(end.position, t),
        look_at: start.look_at.lerp(end.look_at, t),
        fov_degrees: start.fov_degrees + (end.fov_degrees - start.fov_degrees) * t,
    }
}

/// Entering Gameplay first turns the cabinet to its canonical facing angle;
/// the camera only starts moving once the rotation has settled. Returning to
/// Overview skips the gate.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TransitionPhase {
    RotatingIntoPlace,
    MovingCamera { start: CameraPose, elapsed: f32 },
}

/// One in-flight camera transition. While alive it owns the camera; new
/// switch requests are dropped, never queued, and the flight always runs to
/// completion.
#[derive(Clone, Copy, Debug)]
pub struct CameraTransition {
    pub target: ViewMode,
    pub phase: TransitionPhase,
}

/// What the per-frame step asks of the caller.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TransitionStep {
    /// Still waiting on the cabinet rotation, camera untouched.
    Hold,
    /// Apply this pose and keep stepping.
    Apply(CameraPose),
    /// Apply this (exact end) pose and commit the target mode.
    Finished(CameraPose),
}

impl CameraTransition {
    pub fn begin(target: ViewMode) -> Self {
        Self {
            target,
            phase: TransitionPhase::RotatingIntoPlace,
        }
    }

    pub fn step(&mut self, dt: f32, rotation_settled: bool, current: CameraPose) -> TransitionStep {
        if let TransitionPhase::RotatingIntoPlace = self.phase {
            // Only the flight into Gameplay waits for the cabinet; returning
            // to Overview starts moving immediately.
            if self.target == ViewMode::Gameplay && !rotation_settled {
                return TransitionStep::Hold;
            }
            self.phase = TransitionPhase::MovingCamera {
                start: current,
                elapsed: 0.0,
            };
        }

        let TransitionPhase::MovingCamera { start, elapsed } = &mut self.phase else {
            unreachable!("rotation phase resolved above");
        };

        *elapsed += dt;
        let progress = (*elapsed / TRANSITION_SECS).clamp(0.0, 1.0);
        let end = preset(self.target);
        if progress >= 1.0 {
            return TransitionStep::Finished(end);
        }
        TransitionStep::Apply(lerp_pose(start, &end, ease_out_cubic(progress)))
    }
}

/// The view-mode state machine: the committed mode plus at most one in-flight
/// transition. Nothing else may touch the camera while a transition is alive.
#[derive(Resource, Debug)]
pub struct ViewState {
    pub mode: ViewMode,
    pub transition: Option<CameraTransition>,
    /// Pose most recently applied to the camera; the start pose of the next
    /// transition.
    pub current_pose: CameraPose,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            mode: ViewMode::Overview,
            transition: None,
            current_pose: preset(ViewMode::Overview),
        }
    }
}

impl ViewState {
    pub fn is_transitioning(&self) -> bool {
        self.transition.is_some()
    }

    /// Starts a transition unless one is already in flight or the target is
    /// the current mode. Returns whether the request was accepted; dropped
    /// requests are the caller's cue for a debug log, nothing more.
    pub fn request_switch(&mut self, target: ViewMode) -> bool {
        if self.is_transitioning() || self.mode == target {
            return false;
        }
        self.transition = Some(CameraTransition::begin(target));
        true
    }

    /// Commits the target mode once its transition reports `Finished`.
    pub fn commit(&mut self, target: ViewMode, end: CameraPose) {
        self.mode = target;
        self.transition = None;
        self.current_pose = end;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    fn run_to_completion(state: &mut ViewState, rotation_settled: bool) -> Option<CameraPose> {
        for _ in 0..600 {
            let current = state.current_pose;
            let Some(transition) = state.transition.as_mut() else {
                return None;
            };
            let target = transition.target;
            match transition.step(DT, rotation_settled, current) {
                TransitionStep::Hold => {}
                TransitionStep::Apply(pose) => state.current_pose = pose,
                TransitionStep::Finished(pose) => {
                    state.commit(target, pose);
                    return Some(pose);
                }
            }
        }
        None
    }

    mod easing {
        use super::*;

        #[test]
        fn endpoints_are_exact() {
            assert_eq!(ease_out_cubic(0.0), 0.0);
            assert_eq!(ease_out_cubic(1.0), 1.0);
        }

        #[test]
        fn is_monotonic_on_unit_interval() {
            let mut prev = ease_out_cubic(0.0);
            for i in 1..=100 {
                let next = ease_out_cubic(i as f32 / 100.0);
                assert!(next >= prev);
                prev = next;
            }
        }
    }

    mod interpolation {
        use super::*;

        #[test]
        fn progress_zero_yields_exact_start_pose() {
            let start = preset(ViewMode::Overview);
            let end = preset(ViewMode::Gameplay);
            let pose = lerp_pose(&start, &end, 0.0);
            assert_eq!(pose.position, start.position);
            assert_eq!(pose.look_at, start.look_at);
            assert_eq!(pose.fov_degrees, start.fov_degrees);
        }

        #[test]
        fn finished_step_yields_exact_end_pose() {
            let mut state = ViewState::default();
            assert!(state.request_switch(ViewMode::Gameplay));
            let pose = run_to_completion(&mut state, true).expect("transition completes");
            let end = preset(ViewMode::Gameplay);
            assert_eq!(pose.position, end.position);
            assert_eq!(pose.look_at, end.look_at);
            assert_eq!(pose.fov_degrees, end.fov_degrees);
        }
    }

    mod state_machine {
        use super::*;

        #[test]
        fn request_while_transitioning_is_a_no_op() {
            let mut state = ViewState::default();
            assert!(state.request_switch(ViewMode::Gameplay));
            let target_before = state.transition.as_ref().map(|t| t.target);

            assert!(!state.request_switch(ViewMode::Overview));
            assert!(!state.request_switch(ViewMode::Gameplay));

            assert_eq!(state.mode, ViewMode::Overview);
            assert_eq!(state.transition.as_ref().map(|t| t.target), target_before);
        }

        #[test]
        fn request_for_current_mode_is_dropped() {
            let mut state = ViewState::default();
            assert!(!state.request_switch(ViewMode::Overview));
            assert!(state.transition.is_none());
        }

        #[test]
        fn gameplay_transition_holds_until_rotation_settles() {
            let mut state = ViewState::default();
            assert!(state.request_switch(ViewMode::Gameplay));

            let current = state.current_pose;
            let transition = state.transition.as_mut().unwrap();
            for _ in 0..10 {
                assert_eq!(transition.step(DT, false, current), TransitionStep::Hold);
            }
            assert!(matches!(
                transition.step(DT, true, current),
                TransitionStep::Apply(_)
            ));
        }

        #[test]
        fn overview_transition_ignores_the_rotation_gate() {
            let mut state = ViewState::default();
            state.mode = ViewMode::Gameplay;
            assert!(state.request_switch(ViewMode::Overview));

            let current = state.current_pose;
            let transition = state.transition.as_mut().unwrap();
            assert!(matches!(
                transition.step(DT, false, current),
                TransitionStep::Apply(_)
            ));
        }

        #[test]
        fn completed_transition_commits_mode_and_clears_flag() {
            let mut state = ViewState::default();
            assert!(state.request_switch(ViewMode::Gameplay));
            run_to_completion(&mut state, true).expect("transition completes");
            assert_eq!(state.mode, ViewMode::Gameplay);
            assert!(!state.is_transitioning());

            assert!(state.request_switch(ViewMode::Overview));
            run_to_completion(&mut state, true).expect("transition completes");
            assert_eq!(state.mode, ViewMode::Overview);
        }

        #[test]
        fn camera_moves_along_eased_path() {
            let mut state = ViewState::default();
            assert!(state.request_switch(ViewMode::Gameplay));
            let start = state.current_pose;
            let transition = state.transition.as_mut().unwrap();

            let TransitionStep::Apply(first) = transition.step(DT, true, start) else {
                panic!("expected an applied pose");
            };
            let TransitionStep::Apply(second) = transition.step(DT, true, start) else {
                panic!("expected an applied pose");
            };

            let end = preset(ViewMode::Gameplay);
            let d0 = (first.position - start.position).length();
            let d1 = (second.position - first.position).length();
            assert!(d0 > 0.0);
            assert!(d1 > 0.0);
            // Ease-out: the first frame covers more ground than a later one
            // of equal length near the end of the flight.
            let mut t = *transition;
            let mut last = second;
            loop {
                match t.step(DT, true, start) {
                    TransitionStep::Apply(pose) => last = pose,
                    TransitionStep::Finished(_) => break,
                    TransitionStep::Hold => unreachable!(),
                }
            }
            let tail = (end.position - last.position).length();
            assert!(tail < d0);
        }
    }
}
