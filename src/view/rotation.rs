use bevy::prelude::*;
use std::f32::consts::FRAC_PI_2;

/// Per-frame exponential smoothing factor toward the target angles.
pub const SMOOTHING: f32 = 0.1;
/// Canonical "facing forward" yaw the cabinet is turned to before the camera
/// flies in close.
pub const FACING_YAW: f32 = -FRAC_PI_2;
pub const FACING_PITCH: f32 = 0.0;
/// Both axes must be within this of their targets before the cabinet counts
/// as settled.
pub const SETTLE_EPSILON: f32 = 0.01;
/// Idle yaw drift per frame while nobody is dragging.
pub const AUTO_SPIN_PER_FRAME: f32 = 0.005;

/// Current and target Euler angles of the cabinet. The target is nudged by
/// drags and forced to the facing angle before a gameplay transition; the
/// current angles chase it every frame.
#[derive(Resource, Clone, Copy, Debug)]
pub struct RotationState {
    pub current_yaw: f32,
    pub current_pitch: f32,
    pub target_yaw: f32,
    pub target_pitch: f32,
}

impl Default for RotationState {
    fn default() -> Self {
        Self {
            current_yaw: FACING_YAW,
            current_pitch: FACING_PITCH,
            target_yaw: FACING_YAW,
            target_pitch: FACING_PITCH,
        }
    }
}

impl RotationState {
    /// One frame of exponential smoothing toward the targets.
    pub fn step(&mut self) {
        self.current_yaw += (self.target_yaw - self.current_yaw) * SMOOTHING;
        self.current_pitch += (self.target_pitch - self.current_pitch) * SMOOTHING;
    }

    /// Adds raw radians to the targets (drag deltas arrive pre-scaled).
    pub fn nudge(&mut self, yaw_delta: f32, pitch_delta: f32) {
        self.target_yaw += yaw_delta;
        self.target_pitch += pitch_delta;
    }

    pub fn face_front(&mut self) {
        self.target_yaw = FACING_YAW;
        self.target_pitch = FACING_PITCH;
    }

    pub fn auto_spin(&mut self) {
        self.target_yaw += AUTO_SPIN_PER_FRAME;
    }

    pub fn is_settled(&self) -> bool {
        (self.current_yaw - self.target_yaw).abs() < SETTLE_EPSILON
            && (self.current_pitch - self.target_pitch).abs() < SETTLE_EPSILON
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_facing_front_and_settled() {
        let rotation = RotationState::default();
        assert!(rotation.is_settled());
        assert_eq!(rotation.current_yaw, FACING_YAW);
    }

    #[test]
    fn smoothing_converges_to_a_nudged_target() {
        let mut rotation = RotationState::default();
        rotation.nudge(1.2, -0.4);
        assert!(!rotation.is_settled());

        for _ in 0..200 {
            rotation.step();
        }
        assert!(rotation.is_settled());
        assert!((rotation.current_yaw - rotation.target_yaw).abs() < SETTLE_EPSILON);
        assert!((rotation.current_pitch - rotation.target_pitch).abs() < SETTLE_EPSILON);
    }

    #[test]
    fn settles_within_a_bounded_number_of_frames() {
        let mut rotation = RotationState::default();
        rotation.nudge(std::f32::consts::PI, 0.0);

        let mut frames = 0;
        while !rotation.is_settled() && frames < 120 {
            rotation.step();
            frames += 1;
        }
        // (1 - 0.1)^n * pi < 0.01 needs n ~ 55.
        assert!(rotation.is_settled(), "still unsettled after {frames} frames");
    }

    #[test]
    fn approach_is_monotonic_without_overshoot() {
        let mut rotation = RotationState::default();
        rotation.nudge(2.0, 0.0);

        let mut prev_gap = (rotation.target_yaw - rotation.current_yaw).abs();
        for _ in 0..100 {
            rotation.step();
            let gap = (rotation.target_yaw - rotation.current_yaw).abs();
            assert!(gap <= prev_gap);
            prev_gap = gap;
        }
    }

    #[test]
    fn face_front_restores_canonical_targets() {
        let mut rotation = RotationState::default();
        rotation.nudge(0.7, 0.3);
        rotation.face_front();
        assert_eq!(rotation.target_yaw, FACING_YAW);
        assert_eq!(rotation.target_pitch, FACING_PITCH);
    }

    #[test]
    fn auto_spin_drifts_yaw_only() {
        let mut rotation = RotationState::default();
        let pitch_before = rotation.target_pitch;
        for _ in 0..10 {
            rotation.auto_spin();
        }
        assert!((rotation.target_yaw - (FACING_YAW + 10.0 * AUTO_SPIN_PER_FRAME)).abs() < 1e-6);
        assert_eq!(rotation.target_pitch, pitch_before);
    }
}
