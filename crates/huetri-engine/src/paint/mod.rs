//! Clear color for the swapchain target.

pub mod color;

pub use color::Color;
