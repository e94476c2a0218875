pub mod drag;
pub mod modes;
pub mod rotation;
pub mod transition;
