//! Mock driver for unit tests (no GPU required)
//!
//! `MockDevice` records every creation call and can be switched to reject
//! them; `MockContext` tracks its currently bound state per stage and slot
//! and keeps a command log so tests can assert exactly which driver calls
//! were (or were not) issued.

use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::driver::{
    BindFlags, Buffer, BufferDesc, BufferViewDesc, Context, CpuAccessFlags, DepthStencilView,
    Device, Format, MiscFlags, PipelineStage, RenderTargetView, SamplerDesc, SamplerState,
    ShaderResourceView, ShaderViewDesc, SubresourceData, Swapchain, Texture, TextureDesc,
    TextureKind, TextureViewDesc, UnorderedAccessView, Usage, MAX_RENDER_TARGETS,
};
use crate::error::{Error, Result};

// ============================================================================
// Mock resources
// ============================================================================

#[derive(Debug)]
pub struct MockBuffer {
    pub desc: BufferDesc,
}

impl Buffer for MockBuffer {
    fn desc(&self) -> &BufferDesc {
        &self.desc
    }
}

#[derive(Debug)]
pub struct MockTexture {
    pub desc: TextureDesc,
}

impl Texture for MockTexture {
    fn desc(&self) -> &TextureDesc {
        &self.desc
    }
}

#[derive(Debug)]
pub struct MockSampler {
    pub desc: SamplerDesc,
}

impl SamplerState for MockSampler {
    fn desc(&self) -> &SamplerDesc {
        &self.desc
    }
}

// ============================================================================
// Mock views
// ============================================================================

#[derive(Debug)]
pub struct MockRenderTargetView {
    pub desc: TextureViewDesc,
}

impl RenderTargetView for MockRenderTargetView {
    fn desc(&self) -> &TextureViewDesc {
        &self.desc
    }
}

#[derive(Debug)]
pub struct MockDepthStencilView {
    pub desc: TextureViewDesc,
}

impl DepthStencilView for MockDepthStencilView {
    fn desc(&self) -> &TextureViewDesc {
        &self.desc
    }
}

#[derive(Debug)]
pub struct MockShaderResourceView {
    pub desc: ShaderViewDesc,
}

impl ShaderResourceView for MockShaderResourceView {
    fn desc(&self) -> &ShaderViewDesc {
        &self.desc
    }
}

#[derive(Debug)]
pub struct MockUnorderedAccessView {
    pub desc: ShaderViewDesc,
}

impl UnorderedAccessView for MockUnorderedAccessView {
    fn desc(&self) -> &ShaderViewDesc {
        &self.desc
    }
}

// ============================================================================
// Mock device
// ============================================================================

/// Mock device that records created objects without a GPU
#[derive(Debug, Default)]
pub struct MockDevice {
    /// Names of every creation call accepted so far
    pub created: Vec<String>,
    /// When true, every creation call is rejected with `CreationFailed`
    pub fail_creation: bool,
}

impl MockDevice {
    pub fn new() -> Self {
        Self::default()
    }

    fn accept(&mut self, name: String) -> Result<()> {
        if self.fail_creation {
            return Err(Error::CreationFailed(format!("mock device rejected {}", name)));
        }
        self.created.push(name);
        Ok(())
    }
}

impl Device for MockDevice {
    fn create_buffer(
        &mut self,
        desc: &BufferDesc,
        _data: Option<&SubresourceData<'_>>,
    ) -> Result<Arc<dyn Buffer>> {
        self.accept(format!("buffer_{}", desc.byte_width))?;
        Ok(Arc::new(MockBuffer { desc: *desc }))
    }

    fn create_texture(
        &mut self,
        desc: &TextureDesc,
        _data: Option<&SubresourceData<'_>>,
    ) -> Result<Arc<dyn Texture>> {
        self.accept(format!("texture_{}x{}x{}", desc.width, desc.height, desc.depth))?;
        Ok(Arc::new(MockTexture { desc: *desc }))
    }

    fn create_sampler_state(&mut self, desc: &SamplerDesc) -> Result<Arc<dyn SamplerState>> {
        self.accept(format!("sampler_{:?}", desc.filter))?;
        Ok(Arc::new(MockSampler { desc: *desc }))
    }

    fn create_render_target_view(
        &mut self,
        _texture: &Arc<dyn Texture>,
        desc: &TextureViewDesc,
    ) -> Result<Arc<dyn RenderTargetView>> {
        self.accept(format!("rtv_{:?}", desc.dimension))?;
        Ok(Arc::new(MockRenderTargetView { desc: *desc }))
    }

    fn create_depth_stencil_view(
        &mut self,
        _texture: &Arc<dyn Texture>,
        desc: &TextureViewDesc,
    ) -> Result<Arc<dyn DepthStencilView>> {
        self.accept(format!("dsv_{:?}", desc.dimension))?;
        Ok(Arc::new(MockDepthStencilView { desc: *desc }))
    }

    fn create_buffer_shader_resource_view(
        &mut self,
        _buffer: &Arc<dyn Buffer>,
        desc: &BufferViewDesc,
    ) -> Result<Arc<dyn ShaderResourceView>> {
        self.accept(format!("buffer_srv_{}", desc.element_count))?;
        Ok(Arc::new(MockShaderResourceView { desc: ShaderViewDesc::Buffer(*desc) }))
    }

    fn create_texture_shader_resource_view(
        &mut self,
        _texture: &Arc<dyn Texture>,
        desc: &TextureViewDesc,
    ) -> Result<Arc<dyn ShaderResourceView>> {
        self.accept(format!("texture_srv_{:?}", desc.dimension))?;
        Ok(Arc::new(MockShaderResourceView { desc: ShaderViewDesc::Texture(*desc) }))
    }

    fn create_buffer_unordered_access_view(
        &mut self,
        _buffer: &Arc<dyn Buffer>,
        desc: &BufferViewDesc,
    ) -> Result<Arc<dyn UnorderedAccessView>> {
        self.accept(format!("buffer_uav_{}", desc.element_count))?;
        Ok(Arc::new(MockUnorderedAccessView { desc: ShaderViewDesc::Buffer(*desc) }))
    }

    fn create_texture_unordered_access_view(
        &mut self,
        _texture: &Arc<dyn Texture>,
        desc: &TextureViewDesc,
    ) -> Result<Arc<dyn UnorderedAccessView>> {
        self.accept(format!("texture_uav_{:?}", desc.dimension))?;
        Ok(Arc::new(MockUnorderedAccessView { desc: ShaderViewDesc::Texture(*desc) }))
    }
}

// ============================================================================
// Mock context
// ============================================================================

/// Mock context that tracks bound state per stage and slot
#[derive(Default)]
pub struct MockContext {
    /// Command log, one entry per driver call
    pub calls: Vec<String>,

    render_targets: Vec<Option<Arc<dyn RenderTargetView>>>,
    depth_stencil: Option<Arc<dyn DepthStencilView>>,
    shader_resources: FxHashMap<(PipelineStage, u32), Arc<dyn ShaderResourceView>>,
    samplers: FxHashMap<(PipelineStage, u32), Arc<dyn SamplerState>>,
    constant_buffers: FxHashMap<(PipelineStage, u32), Arc<dyn Buffer>>,
    unordered_access: FxHashMap<(PipelineStage, u32), Arc<dyn UnorderedAccessView>>,
    vertex_buffers: FxHashMap<u32, Arc<dyn Buffer>>,
    index_buffer: Option<Arc<dyn Buffer>>,
}

impl MockContext {
    pub fn new() -> Self {
        let mut ctx = Self::default();
        ctx.render_targets = vec![None; MAX_RENDER_TARGETS];
        ctx
    }

    // ===== QUERY HELPERS FOR TESTS =====

    pub fn shader_resource(
        &self,
        stage: PipelineStage,
        slot: u32,
    ) -> Option<Arc<dyn ShaderResourceView>> {
        self.shader_resources.get(&(stage, slot)).cloned()
    }

    pub fn sampler(&self, stage: PipelineStage, slot: u32) -> Option<Arc<dyn SamplerState>> {
        self.samplers.get(&(stage, slot)).cloned()
    }

    pub fn constant_buffer(&self, stage: PipelineStage, slot: u32) -> Option<Arc<dyn Buffer>> {
        self.constant_buffers.get(&(stage, slot)).cloned()
    }

    pub fn unordered_access_view(
        &self,
        stage: PipelineStage,
        slot: u32,
    ) -> Option<Arc<dyn UnorderedAccessView>> {
        self.unordered_access.get(&(stage, slot)).cloned()
    }

    pub fn vertex_buffer(&self, slot: u32) -> Option<Arc<dyn Buffer>> {
        self.vertex_buffers.get(&slot).cloned()
    }

    pub fn index_buffer(&self) -> Option<Arc<dyn Buffer>> {
        self.index_buffer.clone()
    }

    // ===== SLOT UPDATE HELPERS =====

    fn set_shader_resource_slots(
        &mut self,
        stage: PipelineStage,
        start_slot: u32,
        views: &[Option<Arc<dyn ShaderResourceView>>],
    ) {
        for (i, view) in views.iter().enumerate() {
            let slot = (stage, start_slot + i as u32);
            match view {
                Some(v) => {
                    self.shader_resources.insert(slot, v.clone());
                }
                None => {
                    self.shader_resources.remove(&slot);
                }
            }
        }
    }

    fn set_sampler_slots(
        &mut self,
        stage: PipelineStage,
        start_slot: u32,
        samplers: &[Option<Arc<dyn SamplerState>>],
    ) {
        for (i, sampler) in samplers.iter().enumerate() {
            let slot = (stage, start_slot + i as u32);
            match sampler {
                Some(s) => {
                    self.samplers.insert(slot, s.clone());
                }
                None => {
                    self.samplers.remove(&slot);
                }
            }
        }
    }

    fn set_constant_buffer_slots(
        &mut self,
        stage: PipelineStage,
        start_slot: u32,
        buffers: &[Option<Arc<dyn Buffer>>],
    ) {
        for (i, buffer) in buffers.iter().enumerate() {
            let slot = (stage, start_slot + i as u32);
            match buffer {
                Some(b) => {
                    self.constant_buffers.insert(slot, b.clone());
                }
                None => {
                    self.constant_buffers.remove(&slot);
                }
            }
        }
    }

    fn set_unordered_access_slots(
        &mut self,
        stage: PipelineStage,
        start_slot: u32,
        views: &[Option<Arc<dyn UnorderedAccessView>>],
    ) {
        for (i, view) in views.iter().enumerate() {
            let slot = (stage, start_slot + i as u32);
            match view {
                Some(v) => {
                    self.unordered_access.insert(slot, v.clone());
                }
                None => {
                    self.unordered_access.remove(&slot);
                }
            }
        }
    }

    fn store_render_targets(
        &mut self,
        render_targets: &[Option<Arc<dyn RenderTargetView>>],
        depth_stencil: Option<Arc<dyn DepthStencilView>>,
    ) {
        self.render_targets = vec![None; MAX_RENDER_TARGETS];
        for (i, rtv) in render_targets.iter().take(MAX_RENDER_TARGETS).enumerate() {
            self.render_targets[i] = rtv.clone();
        }
        self.depth_stencil = depth_stencil;
    }
}

impl Context for MockContext {
    fn vs_set_shader_resources(
        &mut self,
        start_slot: u32,
        views: &[Option<Arc<dyn ShaderResourceView>>],
    ) {
        self.calls.push("vs_set_shader_resources".to_string());
        self.set_shader_resource_slots(PipelineStage::Vertex, start_slot, views);
    }

    fn hs_set_shader_resources(
        &mut self,
        start_slot: u32,
        views: &[Option<Arc<dyn ShaderResourceView>>],
    ) {
        self.calls.push("hs_set_shader_resources".to_string());
        self.set_shader_resource_slots(PipelineStage::Hull, start_slot, views);
    }

    fn ds_set_shader_resources(
        &mut self,
        start_slot: u32,
        views: &[Option<Arc<dyn ShaderResourceView>>],
    ) {
        self.calls.push("ds_set_shader_resources".to_string());
        self.set_shader_resource_slots(PipelineStage::Domain, start_slot, views);
    }

    fn gs_set_shader_resources(
        &mut self,
        start_slot: u32,
        views: &[Option<Arc<dyn ShaderResourceView>>],
    ) {
        self.calls.push("gs_set_shader_resources".to_string());
        self.set_shader_resource_slots(PipelineStage::Geometry, start_slot, views);
    }

    fn ps_set_shader_resources(
        &mut self,
        start_slot: u32,
        views: &[Option<Arc<dyn ShaderResourceView>>],
    ) {
        self.calls.push("ps_set_shader_resources".to_string());
        self.set_shader_resource_slots(PipelineStage::Pixel, start_slot, views);
    }

    fn cs_set_shader_resources(
        &mut self,
        start_slot: u32,
        views: &[Option<Arc<dyn ShaderResourceView>>],
    ) {
        self.calls.push("cs_set_shader_resources".to_string());
        self.set_shader_resource_slots(PipelineStage::Compute, start_slot, views);
    }

    fn vs_set_samplers(&mut self, start_slot: u32, samplers: &[Option<Arc<dyn SamplerState>>]) {
        self.calls.push("vs_set_samplers".to_string());
        self.set_sampler_slots(PipelineStage::Vertex, start_slot, samplers);
    }

    fn hs_set_samplers(&mut self, start_slot: u32, samplers: &[Option<Arc<dyn SamplerState>>]) {
        self.calls.push("hs_set_samplers".to_string());
        self.set_sampler_slots(PipelineStage::Hull, start_slot, samplers);
    }

    fn ds_set_samplers(&mut self, start_slot: u32, samplers: &[Option<Arc<dyn SamplerState>>]) {
        self.calls.push("ds_set_samplers".to_string());
        self.set_sampler_slots(PipelineStage::Domain, start_slot, samplers);
    }

    fn gs_set_samplers(&mut self, start_slot: u32, samplers: &[Option<Arc<dyn SamplerState>>]) {
        self.calls.push("gs_set_samplers".to_string());
        self.set_sampler_slots(PipelineStage::Geometry, start_slot, samplers);
    }

    fn ps_set_samplers(&mut self, start_slot: u32, samplers: &[Option<Arc<dyn SamplerState>>]) {
        self.calls.push("ps_set_samplers".to_string());
        self.set_sampler_slots(PipelineStage::Pixel, start_slot, samplers);
    }

    fn cs_set_samplers(&mut self, start_slot: u32, samplers: &[Option<Arc<dyn SamplerState>>]) {
        self.calls.push("cs_set_samplers".to_string());
        self.set_sampler_slots(PipelineStage::Compute, start_slot, samplers);
    }

    fn vs_set_constant_buffers(&mut self, start_slot: u32, buffers: &[Option<Arc<dyn Buffer>>]) {
        self.calls.push("vs_set_constant_buffers".to_string());
        self.set_constant_buffer_slots(PipelineStage::Vertex, start_slot, buffers);
    }

    fn ps_set_constant_buffers(&mut self, start_slot: u32, buffers: &[Option<Arc<dyn Buffer>>]) {
        self.calls.push("ps_set_constant_buffers".to_string());
        self.set_constant_buffer_slots(PipelineStage::Pixel, start_slot, buffers);
    }

    fn cs_set_unordered_access_views(
        &mut self,
        start_slot: u32,
        views: &[Option<Arc<dyn UnorderedAccessView>>],
    ) {
        self.calls.push("cs_set_unordered_access_views".to_string());
        self.set_unordered_access_slots(PipelineStage::Compute, start_slot, views);
    }

    fn set_render_targets(
        &mut self,
        render_targets: &[Option<Arc<dyn RenderTargetView>>],
        depth_stencil: Option<Arc<dyn DepthStencilView>>,
    ) {
        self.calls.push("set_render_targets".to_string());
        self.store_render_targets(render_targets, depth_stencil);
    }

    fn render_targets(
        &self,
    ) -> (
        Vec<Option<Arc<dyn RenderTargetView>>>,
        Option<Arc<dyn DepthStencilView>>,
    ) {
        (self.render_targets.clone(), self.depth_stencil.clone())
    }

    fn set_render_targets_and_unordered_access_views(
        &mut self,
        render_targets: &[Option<Arc<dyn RenderTargetView>>],
        depth_stencil: Option<Arc<dyn DepthStencilView>>,
        uav_start_slot: u32,
        unordered_access_views: &[Option<Arc<dyn UnorderedAccessView>>],
    ) {
        self.calls
            .push("set_render_targets_and_unordered_access_views".to_string());
        self.store_render_targets(render_targets, depth_stencil);
        self.set_unordered_access_slots(
            PipelineStage::Pixel,
            uav_start_slot,
            unordered_access_views,
        );
    }

    fn set_vertex_buffers(
        &mut self,
        start_slot: u32,
        buffers: &[Option<Arc<dyn Buffer>>],
        _strides: &[u32],
        _offsets: &[u32],
    ) {
        self.calls.push("set_vertex_buffers".to_string());
        for (i, buffer) in buffers.iter().enumerate() {
            let slot = start_slot + i as u32;
            match buffer {
                Some(b) => {
                    self.vertex_buffers.insert(slot, b.clone());
                }
                None => {
                    self.vertex_buffers.remove(&slot);
                }
            }
        }
    }

    fn set_index_buffer(
        &mut self,
        buffer: Option<Arc<dyn Buffer>>,
        _format: Format,
        _offset: u32,
    ) {
        self.calls.push("set_index_buffer".to_string());
        self.index_buffer = buffer;
    }

    fn clear_render_target_view(&mut self, _view: &Arc<dyn RenderTargetView>, rgba: [f32; 4]) {
        self.calls.push(format!("clear_render_target_view_{:?}", rgba));
    }

    fn clear_depth_stencil_view(
        &mut self,
        _view: &Arc<dyn DepthStencilView>,
        depth: f32,
        stencil: u8,
    ) {
        self.calls
            .push(format!("clear_depth_stencil_view_{}_{}", depth, stencil));
    }

    fn clear_unordered_access_view_float(
        &mut self,
        _view: &Arc<dyn UnorderedAccessView>,
        values: [f32; 4],
    ) {
        self.calls
            .push(format!("clear_unordered_access_view_float_{:?}", values));
    }

    fn clear_unordered_access_view_uint(
        &mut self,
        _view: &Arc<dyn UnorderedAccessView>,
        values: [u32; 4],
    ) {
        self.calls
            .push(format!("clear_unordered_access_view_uint_{:?}", values));
    }

    fn clear_state(&mut self) {
        self.calls.push("clear_state".to_string());
        self.render_targets = vec![None; MAX_RENDER_TARGETS];
        self.depth_stencil = None;
        self.shader_resources.clear();
        self.samplers.clear();
        self.constant_buffers.clear();
        self.unordered_access.clear();
        self.vertex_buffers.clear();
        self.index_buffer = None;
    }
}

// ============================================================================
// Mock swapchain
// ============================================================================

/// Mock swapchain with a single back buffer
pub struct MockSwapchain {
    width: u32,
    height: u32,
    back_buffer: Arc<dyn Texture>,
    /// Number of accepted presents
    pub present_count: u32,
    /// When true, `present` fails with `PresentFailed`
    pub fail_present: bool,
    /// When true, `buffer` fails with `SwapchainUnavailable`
    pub fail_buffer: bool,
}

impl MockSwapchain {
    pub fn new(width: u32, height: u32) -> Self {
        let back_buffer: Arc<dyn Texture> = Arc::new(MockTexture {
            desc: TextureDesc {
                kind: TextureKind::D2,
                width,
                height,
                depth: 1,
                mip_levels: 1,
                array_size: 1,
                format: Format::R8G8B8A8_UNORM,
                usage: Usage::Default,
                bind_flags: BindFlags::RENDER_TARGET,
                cpu_access: CpuAccessFlags::empty(),
                misc_flags: MiscFlags::empty(),
            },
        });
        Self {
            width,
            height,
            back_buffer,
            present_count: 0,
            fail_present: false,
            fail_buffer: false,
        }
    }
}

impl Swapchain for MockSwapchain {
    fn buffer(&self, index: u32) -> Result<Arc<dyn Texture>> {
        if self.fail_buffer {
            return Err(Error::SwapchainUnavailable(format!(
                "mock swapchain has no buffer {}",
                index
            )));
        }
        Ok(self.back_buffer.clone())
    }

    fn present(&mut self) -> Result<()> {
        if self.fail_present {
            return Err(Error::PresentFailed("mock present rejected".to_string()));
        }
        self.present_count += 1;
        Ok(())
    }

    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn format(&self) -> Format {
        Format::R8G8B8A8_UNORM
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "mock_driver_tests.rs"]
mod tests;
