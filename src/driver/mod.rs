//! Driver module - fixed-function graphics driver abstraction
//!
//! Traits and descriptor types for exactly one driver generation's
//! capability model. Backend implementations provide the concrete
//! device/context/swapchain types; the mock driver backs the tests.

// Module declarations
pub mod types;
pub mod buffer;
pub mod texture;
pub mod view;
pub mod sampler;
pub mod device;
pub mod context;
pub mod swapchain;

#[cfg(test)]
pub mod mock_driver;

// Re-exports
pub use types::*;
pub use buffer::*;
pub use texture::*;
pub use view::*;
pub use sampler::*;
pub use device::*;
pub use context::*;
pub use swapchain::*;
