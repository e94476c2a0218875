use bevy::prelude::Vec3;

/// The two camera presets. Exactly one is current at any time; switching is
/// always mediated by a [`CameraTransition`](super::transition::CameraTransition).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewMode {
    Overview,
    Gameplay,
}

impl ViewMode {
    pub fn cycled(self) -> Self {
        match self {
            ViewMode::Overview => ViewMode::Gameplay,
            ViewMode::Gameplay => ViewMode::Overview,
        }
    }
}

/// A complete camera pose: where the camera sits, what it looks at, and how
/// wide it sees.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraPose {
    pub position: Vec3,
    pub look_at: Vec3,
    pub fov_degrees: f32,
}

pub fn preset(mode: ViewMode) -> CameraPose {
    match mode {
        ViewMode::Overview => CameraPose {
            position: Vec3::new(0.0, 0.5, 4.0),
            look_at: Vec3::ZERO,
            fov_degrees: 60.0,
        },
        ViewMode::Gameplay => CameraPose {
            position: Vec3::new(0.0, 0.8, 1.2),
            look_at: Vec3::new(0.0, 0.5, 0.0),
            fov_degrees: 70.0,
        },
    }
}
