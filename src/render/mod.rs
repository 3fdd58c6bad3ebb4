//! Render module - per-frame clear and present driver

pub mod frame_driver;

pub use frame_driver::*;
