//! Pipeline binder - per-stage binding dispatch over the immediate context
//!
//! Stateless façade over the driver context: the context's currently bound
//! state is the only state machine. The binder owns the per-stage dispatch
//! (the driver exposes one entry point family per stage) and treats the
//! render-target/depth-stencil pair as a single read-modify-write unit, so
//! rebinding one side never silently drops the other.

use std::sync::{Arc, Mutex};

use crate::driver::{
    Buffer, Context, DepthStencilView, Format, PipelineStage, RenderTargetView, SamplerState,
    ShaderResourceView, UnorderedAccessView,
};
use crate::error::Result;

const SOURCE: &str = "neki::PipelineBinder";

/// Pipeline binder
pub struct PipelineBinder {
    context: Arc<Mutex<dyn Context>>,
}

impl PipelineBinder {
    /// Create a pipeline binder over the given immediate context
    pub fn new(context: Arc<Mutex<dyn Context>>) -> Self {
        Self { context }
    }

    fn lock_context(&self) -> Result<std::sync::MutexGuard<'_, dyn Context + 'static>> {
        self.context.lock().map_err(|_| {
            crate::engine_err!(BackendError, SOURCE, "Context lock poisoned")
        })
    }

    // ===== OUTPUT MERGER =====

    /// Query the currently bound render-target set
    ///
    /// Always `MAX_RENDER_TARGETS` entries, unused slots `None`. No side
    /// effects on the bound state.
    pub fn current_render_target_views(
        &self,
    ) -> Result<Vec<Option<Arc<dyn RenderTargetView>>>> {
        let context = self.lock_context()?;
        let (targets, _) = context.render_targets();
        Ok(targets)
    }

    /// Query the currently bound depth-stencil view
    pub fn current_depth_stencil_view(&self) -> Result<Option<Arc<dyn DepthStencilView>>> {
        let context = self.lock_context()?;
        let (_, depth_stencil) = context.render_targets();
        Ok(depth_stencil)
    }

    /// Bind a new render-target set, preserving the bound depth-stencil view
    ///
    /// Reads the live depth-stencil view from the context and re-supplies
    /// it unchanged alongside the new targets.
    pub fn bind_render_target_views(
        &self,
        views: &[Option<Arc<dyn RenderTargetView>>],
    ) -> Result<()> {
        let mut context = self.lock_context()?;
        let (_, depth_stencil) = context.render_targets();
        context.set_render_targets(views, depth_stencil);
        Ok(())
    }

    /// Bind a new depth-stencil view, preserving the bound render targets
    pub fn bind_depth_stencil_view(
        &self,
        view: Option<Arc<dyn DepthStencilView>>,
    ) -> Result<()> {
        let mut context = self.lock_context()?;
        let (targets, _) = context.render_targets();
        context.set_render_targets(&targets, view);
        Ok(())
    }

    // ===== PER-STAGE BINDING =====

    /// Bind shader-resource views to consecutive slots of one stage
    pub fn bind_shader_resource_views(
        &self,
        views: &[Option<Arc<dyn ShaderResourceView>>],
        stage: PipelineStage,
        start_slot: u32,
    ) -> Result<()> {
        let mut context = self.lock_context()?;
        match stage {
            PipelineStage::Vertex => context.vs_set_shader_resources(start_slot, views),
            PipelineStage::Hull => context.hs_set_shader_resources(start_slot, views),
            PipelineStage::Domain => context.ds_set_shader_resources(start_slot, views),
            PipelineStage::Geometry => context.gs_set_shader_resources(start_slot, views),
            PipelineStage::Pixel => context.ps_set_shader_resources(start_slot, views),
            PipelineStage::Compute => context.cs_set_shader_resources(start_slot, views),
        }
        Ok(())
    }

    /// Bind sampler states to consecutive slots of one stage
    pub fn bind_sampler_states(
        &self,
        samplers: &[Option<Arc<dyn SamplerState>>],
        stage: PipelineStage,
        start_slot: u32,
    ) -> Result<()> {
        let mut context = self.lock_context()?;
        match stage {
            PipelineStage::Vertex => context.vs_set_samplers(start_slot, samplers),
            PipelineStage::Hull => context.hs_set_samplers(start_slot, samplers),
            PipelineStage::Domain => context.ds_set_samplers(start_slot, samplers),
            PipelineStage::Geometry => context.gs_set_samplers(start_slot, samplers),
            PipelineStage::Pixel => context.ps_set_samplers(start_slot, samplers),
            PipelineStage::Compute => context.cs_set_samplers(start_slot, samplers),
        }
        Ok(())
    }

    /// Bind constant buffers to consecutive slots of one stage
    ///
    /// # Errors
    ///
    /// `Error::UnsupportedStage` for any stage other than vertex or pixel;
    /// no binding is performed.
    pub fn bind_constant_buffers(
        &self,
        stage: PipelineStage,
        start_slot: u32,
        buffers: &[Option<Arc<dyn Buffer>>],
    ) -> Result<()> {
        match stage {
            PipelineStage::Vertex => {
                let mut context = self.lock_context()?;
                context.vs_set_constant_buffers(start_slot, buffers);
                Ok(())
            }
            PipelineStage::Pixel => {
                let mut context = self.lock_context()?;
                context.ps_set_constant_buffers(start_slot, buffers);
                Ok(())
            }
            PipelineStage::Hull
            | PipelineStage::Domain
            | PipelineStage::Geometry
            | PipelineStage::Compute => Err(crate::engine_err!(
                UnsupportedStage,
                SOURCE,
                "Constant buffers cannot be bound to the {} stage",
                stage.name()
            )),
        }
    }

    /// Bind unordered-access views to consecutive slots of one stage
    ///
    /// Compute binds directly; pixel re-supplies the current render-target
    /// and depth-stencil pair atomically alongside the views (the driver
    /// sets all three together for the pixel stage).
    ///
    /// # Errors
    ///
    /// `Error::UnsupportedStage` for any stage other than pixel or compute;
    /// no driver call is issued.
    pub fn bind_unordered_access_views(
        &self,
        views: &[Option<Arc<dyn UnorderedAccessView>>],
        stage: PipelineStage,
        start_slot: u32,
    ) -> Result<()> {
        match stage {
            PipelineStage::Compute => {
                let mut context = self.lock_context()?;
                context.cs_set_unordered_access_views(start_slot, views);
                Ok(())
            }
            PipelineStage::Pixel => {
                let mut context = self.lock_context()?;
                let (targets, depth_stencil) = context.render_targets();
                context.set_render_targets_and_unordered_access_views(
                    &targets,
                    depth_stencil,
                    start_slot,
                    views,
                );
                Ok(())
            }
            PipelineStage::Vertex
            | PipelineStage::Hull
            | PipelineStage::Domain
            | PipelineStage::Geometry => Err(crate::engine_err!(
                UnsupportedStage,
                SOURCE,
                "Unordered access views cannot be bound to the {} stage",
                stage.name()
            )),
        }
    }

    // ===== INPUT ASSEMBLER =====

    /// Bind vertex buffers to consecutive input slots
    pub fn bind_vertex_buffers(
        &self,
        buffers: &[Option<Arc<dyn Buffer>>],
        strides: &[u32],
        offsets: &[u32],
        start_slot: u32,
    ) -> Result<()> {
        let mut context = self.lock_context()?;
        context.set_vertex_buffers(start_slot, buffers, strides, offsets);
        Ok(())
    }

    /// Bind the index buffer
    pub fn bind_index_buffer(
        &self,
        buffer: Option<Arc<dyn Buffer>>,
        format: Format,
        offset: u32,
    ) -> Result<()> {
        let mut context = self.lock_context()?;
        context.set_index_buffer(buffer, format, offset);
        Ok(())
    }

    // ===== CLEARS =====

    /// Clear a render-target view to the given colour
    pub fn clear_render_target_view(
        &self,
        view: &Arc<dyn RenderTargetView>,
        rgba: [f32; 4],
    ) -> Result<()> {
        let mut context = self.lock_context()?;
        context.clear_render_target_view(view, rgba);
        Ok(())
    }

    /// Clear a depth-stencil view to the given depth and stencil values
    pub fn clear_depth_stencil_view(
        &self,
        view: &Arc<dyn DepthStencilView>,
        depth: f32,
        stencil: u8,
    ) -> Result<()> {
        let mut context = self.lock_context()?;
        context.clear_depth_stencil_view(view, depth, stencil);
        Ok(())
    }

    /// Clear an unordered-access view with float values
    pub fn clear_unordered_access_view_float(
        &self,
        view: &Arc<dyn UnorderedAccessView>,
        values: [f32; 4],
    ) -> Result<()> {
        let mut context = self.lock_context()?;
        context.clear_unordered_access_view_float(view, values);
        Ok(())
    }

    /// Clear an unordered-access view with unsigned integer values
    pub fn clear_unordered_access_view_uint(
        &self,
        view: &Arc<dyn UnorderedAccessView>,
        values: [u32; 4],
    ) -> Result<()> {
        let mut context = self.lock_context()?;
        context.clear_unordered_access_view_uint(view, values);
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "pipeline_binder_tests.rs"]
mod tests;
