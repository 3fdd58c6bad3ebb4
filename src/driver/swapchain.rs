//! Swapchain trait - window/back-buffer presentation

use std::sync::Arc;

use crate::driver::{Format, Texture};
use crate::error::Result;

/// Swap chain for presenting rendered images to the output window
///
/// Owns the presentable back-buffer surfaces rotated between rendering
/// and on-screen display. Presentation is synchronous: `present` blocks
/// until the driver accepts or rejects the frame.
pub trait Swapchain: Send + Sync {
    /// Retrieve a back-buffer surface
    ///
    /// # Errors
    ///
    /// `Error::SwapchainUnavailable` if the surface cannot be retrieved.
    fn buffer(&self, index: u32) -> Result<Arc<dyn Texture>>;

    /// Present the current back buffer
    ///
    /// # Errors
    ///
    /// `Error::PresentFailed` if the driver rejects the present; the
    /// frame loop may continue after a failed present.
    fn present(&mut self) -> Result<()>;

    /// Current output width in pixels
    fn width(&self) -> u32;

    /// Current output height in pixels
    fn height(&self) -> u32;

    /// Back-buffer pixel format
    fn format(&self) -> Format;
}
