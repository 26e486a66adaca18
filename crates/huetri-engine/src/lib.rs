//! huetri engine crate.
//!
//! This crate owns the platform + GPU runtime pieces used by the application:
//! one window, one wgpu context bound to it, and the loop that drives the
//! [`core::App`] callbacks.

pub mod core;
pub mod coords;
pub mod device;
pub mod input;
pub mod logging;
pub mod paint;
pub mod render;
pub mod time;
pub mod window;
