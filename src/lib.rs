//! Window manager core for a simulated desktop shell.
//!
//! The [`actor::reactor::Reactor`] owns a [`model::WindowRegistry`] and turns
//! raw input (pointer, keyboard, viewport and launch events) into registry
//! mutations, using the pure geometry in [`layout_engine`].

pub mod actor;
pub mod common;
pub mod layout_engine;
pub mod model;
pub mod sys;
