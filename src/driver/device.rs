//! Device trait - driver resource-creation entry points

use std::sync::Arc;

use crate::driver::{
    Buffer, BufferDesc, BufferViewDesc, DepthStencilView, RenderTargetView, SamplerDesc,
    SamplerState, ShaderResourceView, SubresourceData, Texture, TextureDesc, TextureViewDesc,
    UnorderedAccessView,
};
use crate::error::Result;

/// Driver device trait
///
/// The process-wide handle through which GPU-resident objects are created.
/// Every call issues its driver command immediately on the calling thread
/// and returns only after the driver has accepted or rejected it. A
/// rejection surfaces as `Error::CreationFailed`.
///
/// Implemented by backend-specific device types; the engine core performs
/// descriptor validation before calling in, so implementations may assume
/// well-formed descriptors.
pub trait Device: Send + Sync {
    /// Create a buffer, optionally uploading initial data
    fn create_buffer(
        &mut self,
        desc: &BufferDesc,
        data: Option<&SubresourceData<'_>>,
    ) -> Result<Arc<dyn Buffer>>;

    /// Create a texture, optionally uploading initial data
    fn create_texture(
        &mut self,
        desc: &TextureDesc,
        data: Option<&SubresourceData<'_>>,
    ) -> Result<Arc<dyn Texture>>;

    /// Create a sampler state
    fn create_sampler_state(&mut self, desc: &SamplerDesc) -> Result<Arc<dyn SamplerState>>;

    /// Create a render-target view over a texture
    fn create_render_target_view(
        &mut self,
        texture: &Arc<dyn Texture>,
        desc: &TextureViewDesc,
    ) -> Result<Arc<dyn RenderTargetView>>;

    /// Create a depth-stencil view over a texture
    fn create_depth_stencil_view(
        &mut self,
        texture: &Arc<dyn Texture>,
        desc: &TextureViewDesc,
    ) -> Result<Arc<dyn DepthStencilView>>;

    /// Create a shader-resource view over a buffer
    fn create_buffer_shader_resource_view(
        &mut self,
        buffer: &Arc<dyn Buffer>,
        desc: &BufferViewDesc,
    ) -> Result<Arc<dyn ShaderResourceView>>;

    /// Create a shader-resource view over a texture
    fn create_texture_shader_resource_view(
        &mut self,
        texture: &Arc<dyn Texture>,
        desc: &TextureViewDesc,
    ) -> Result<Arc<dyn ShaderResourceView>>;

    /// Create an unordered-access view over a buffer
    fn create_buffer_unordered_access_view(
        &mut self,
        buffer: &Arc<dyn Buffer>,
        desc: &BufferViewDesc,
    ) -> Result<Arc<dyn UnorderedAccessView>>;

    /// Create an unordered-access view over a texture
    fn create_texture_unordered_access_view(
        &mut self,
        texture: &Arc<dyn Texture>,
        desc: &TextureViewDesc,
    ) -> Result<Arc<dyn UnorderedAccessView>>;
}
