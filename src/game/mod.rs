mod ambient;
mod audio;
mod cabinet;
mod core;
mod input;
mod minigame;
mod screen;
mod view;

pub use ambient::AmbientPlugin;
pub use audio::SoundPlugin;
pub use cabinet::CabinetPlugin;
pub use self::core::CorePlugin;
pub(crate) use self::core::{MainCamera, UpdateSet};
pub use input::InputPlugin;
pub use minigame::MiniGamePlugin;
pub use screen::ScreenPlugin;
pub use view::ViewPlugin;
