//! Context trait - driver immediate-context entry points
//!
//! The driver models each programmable stage as its own family of binding
//! entry points; the pipeline binder owns the stage dispatch.

use std::sync::Arc;

use crate::driver::{
    Buffer, DepthStencilView, Format, RenderTargetView, SamplerState, ShaderResourceView,
    UnorderedAccessView,
};

/// Programmable pipeline stages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PipelineStage {
    Vertex,
    Hull,
    Domain,
    Geometry,
    Pixel,
    Compute,
}

impl PipelineStage {
    /// Short stage name used in diagnostics
    pub fn name(&self) -> &'static str {
        match self {
            PipelineStage::Vertex => "vertex",
            PipelineStage::Hull => "hull",
            PipelineStage::Domain => "domain",
            PipelineStage::Geometry => "geometry",
            PipelineStage::Pixel => "pixel",
            PipelineStage::Compute => "compute",
        }
    }
}

/// Driver immediate-context trait
///
/// The handle through which per-frame GPU commands (bind, clear) are
/// issued. Binding calls replace the slots starting at `start_slot`; a
/// `None` entry unbinds that slot. The currently bound state persists in
/// the context until replaced or cleared.
pub trait Context: Send + Sync {
    // ===== SHADER RESOURCES (all six stages) =====

    fn vs_set_shader_resources(
        &mut self,
        start_slot: u32,
        views: &[Option<Arc<dyn ShaderResourceView>>],
    );
    fn hs_set_shader_resources(
        &mut self,
        start_slot: u32,
        views: &[Option<Arc<dyn ShaderResourceView>>],
    );
    fn ds_set_shader_resources(
        &mut self,
        start_slot: u32,
        views: &[Option<Arc<dyn ShaderResourceView>>],
    );
    fn gs_set_shader_resources(
        &mut self,
        start_slot: u32,
        views: &[Option<Arc<dyn ShaderResourceView>>],
    );
    fn ps_set_shader_resources(
        &mut self,
        start_slot: u32,
        views: &[Option<Arc<dyn ShaderResourceView>>],
    );
    fn cs_set_shader_resources(
        &mut self,
        start_slot: u32,
        views: &[Option<Arc<dyn ShaderResourceView>>],
    );

    // ===== SAMPLERS (all six stages) =====

    fn vs_set_samplers(&mut self, start_slot: u32, samplers: &[Option<Arc<dyn SamplerState>>]);
    fn hs_set_samplers(&mut self, start_slot: u32, samplers: &[Option<Arc<dyn SamplerState>>]);
    fn ds_set_samplers(&mut self, start_slot: u32, samplers: &[Option<Arc<dyn SamplerState>>]);
    fn gs_set_samplers(&mut self, start_slot: u32, samplers: &[Option<Arc<dyn SamplerState>>]);
    fn ps_set_samplers(&mut self, start_slot: u32, samplers: &[Option<Arc<dyn SamplerState>>]);
    fn cs_set_samplers(&mut self, start_slot: u32, samplers: &[Option<Arc<dyn SamplerState>>]);

    // ===== CONSTANT BUFFERS (vertex and pixel stages only) =====

    fn vs_set_constant_buffers(&mut self, start_slot: u32, buffers: &[Option<Arc<dyn Buffer>>]);
    fn ps_set_constant_buffers(&mut self, start_slot: u32, buffers: &[Option<Arc<dyn Buffer>>]);

    // ===== UNORDERED ACCESS (compute stage) =====

    fn cs_set_unordered_access_views(
        &mut self,
        start_slot: u32,
        views: &[Option<Arc<dyn UnorderedAccessView>>],
    );

    // ===== OUTPUT MERGER =====

    /// Bind the render-target set and the depth-stencil view atomically
    fn set_render_targets(
        &mut self,
        render_targets: &[Option<Arc<dyn RenderTargetView>>],
        depth_stencil: Option<Arc<dyn DepthStencilView>>,
    );

    /// Query the currently bound render-target set and depth-stencil view
    ///
    /// The returned sequence always has `MAX_RENDER_TARGETS` entries,
    /// unused slots `None`.
    fn render_targets(
        &self,
    ) -> (
        Vec<Option<Arc<dyn RenderTargetView>>>,
        Option<Arc<dyn DepthStencilView>>,
    );

    /// Bind render targets, depth stencil and pixel-stage unordered-access
    /// views in one atomic call (the driver sets all three together for
    /// the pixel stage)
    fn set_render_targets_and_unordered_access_views(
        &mut self,
        render_targets: &[Option<Arc<dyn RenderTargetView>>],
        depth_stencil: Option<Arc<dyn DepthStencilView>>,
        uav_start_slot: u32,
        unordered_access_views: &[Option<Arc<dyn UnorderedAccessView>>],
    );

    // ===== INPUT ASSEMBLER =====

    fn set_vertex_buffers(
        &mut self,
        start_slot: u32,
        buffers: &[Option<Arc<dyn Buffer>>],
        strides: &[u32],
        offsets: &[u32],
    );

    fn set_index_buffer(&mut self, buffer: Option<Arc<dyn Buffer>>, format: Format, offset: u32);

    // ===== CLEARS =====

    fn clear_render_target_view(&mut self, view: &Arc<dyn RenderTargetView>, rgba: [f32; 4]);
    fn clear_depth_stencil_view(
        &mut self,
        view: &Arc<dyn DepthStencilView>,
        depth: f32,
        stencil: u8,
    );
    fn clear_unordered_access_view_float(
        &mut self,
        view: &Arc<dyn UnorderedAccessView>,
        values: [f32; 4],
    );
    fn clear_unordered_access_view_uint(
        &mut self,
        view: &Arc<dyn UnorderedAccessView>,
        values: [u32; 4],
    );

    // ===== STATE =====

    /// Unbind every resource and view from every stage (used at shutdown,
    /// before the device and context are released)
    fn clear_state(&mut self);
}
