//! Frame driver - clears the bound output pair and presents
//!
//! Thin per-frame loop body over the pipeline binder and the swap chain.
//! The depth buffer clears to 0.0 (reverse depth) with stencil 0.

use std::sync::{Arc, Mutex};

use crate::driver::Swapchain;
use crate::error::Result;
use crate::pipeline::PipelineBinder;

const SOURCE: &str = "neki::FrameDriver";

/// Frame driver
pub struct FrameDriver {
    binder: Arc<Mutex<PipelineBinder>>,
    swapchain: Arc<Mutex<dyn Swapchain>>,
}

impl FrameDriver {
    /// Create a frame driver over the given binder and swap chain
    pub fn new(binder: Arc<Mutex<PipelineBinder>>, swapchain: Arc<Mutex<dyn Swapchain>>) -> Self {
        Self { binder, swapchain }
    }

    /// Render one frame: clear whatever output views are bound, then present
    ///
    /// The first bound render target is cleared to `clear_colour` and the
    /// bound depth-stencil view to depth 0.0, stencil 0; unbound views are
    /// simply skipped.
    ///
    /// # Errors
    ///
    /// `Error::PresentFailed` when the driver rejects the present. The
    /// failure is soft: the caller's frame loop may continue.
    pub fn render_frame(&self, clear_colour: [f32; 4]) -> Result<()> {
        {
            let binder = self.binder.lock().map_err(|_| {
                crate::engine_err!(BackendError, SOURCE, "Binder lock poisoned")
            })?;

            let targets = binder.current_render_target_views()?;
            if let Some(target) = targets.first().and_then(|t| t.as_ref()) {
                binder.clear_render_target_view(target, clear_colour)?;
            }
            if let Some(depth_stencil) = binder.current_depth_stencil_view()? {
                binder.clear_depth_stencil_view(&depth_stencil, 0.0, 0)?;
            }
        }

        let mut swapchain = self.swapchain.lock().map_err(|_| {
            crate::engine_err!(BackendError, SOURCE, "Swapchain lock poisoned")
        })?;
        swapchain.present().map_err(|e| {
            crate::engine_err!(PresentFailed, SOURCE, "Present rejected: {}", e)
        })
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "frame_driver_tests.rs"]
mod tests;
