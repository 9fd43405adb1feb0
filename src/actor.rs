//! The reactor and the shell surfaces that consume its state.

pub mod dock;
pub mod menu_bar;
pub mod reactor;
