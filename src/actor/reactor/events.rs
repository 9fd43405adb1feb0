pub mod command;
pub mod drag;
pub mod viewport;
pub mod window;
