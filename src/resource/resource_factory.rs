//! Resource factory - validated GPU resource and view creation
//!
//! Front door for creating buffers, textures, views and sampler states.
//! Capability requests (CPU-writable, GPU-writable) are translated into
//! driver usage classes and bind flags, view descriptors are validated
//! against the resource they target before any driver call, and every
//! successfully created object is tracked until `shutdown` releases it.

use std::sync::{Arc, Mutex};

use crate::driver::{
    BindFlags, Buffer, BufferDesc, BufferViewDesc, BufferViewFlags, CpuAccessFlags,
    DepthStencilView, Device, Format, MiscFlags, RenderTargetView, SamplerDesc, SamplerState,
    ShaderResourceView, SubresourceData, Swapchain, Texture, TextureDesc, TextureKind,
    TextureViewDesc, UnorderedAccessView, Usage, ViewDimension,
};
use crate::error::Result;

const SOURCE: &str = "neki::ResourceFactory";

/// Subrange of a texture addressed by a view
///
/// `Default` covers the whole resource: `mip_levels` 0 means all mips from
/// `mip_slice` on (shader-resource views), `array_size` 0 means all layers
/// from `first_array_slice` on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextureSubrange {
    pub mip_slice: u32,
    pub mip_levels: u32,
    pub first_array_slice: u32,
    pub array_size: u32,
}

/// A tracked resource (buffer or texture)
enum TrackedResource {
    Buffer(Arc<dyn Buffer>),
    Texture(Arc<dyn Texture>),
}

/// A tracked view, any role
enum TrackedView {
    RenderTarget(Arc<dyn RenderTargetView>),
    DepthStencil(Arc<dyn DepthStencilView>),
    ShaderResource(Arc<dyn ShaderResourceView>),
    UnorderedAccess(Arc<dyn UnorderedAccessView>),
}

/// Resource factory
///
/// Owns the driver device handle (and the swap chain, when one exists) and
/// three append-only ownership lists: resources, views, samplers. Every
/// successful creation registers exactly one entry; a failed creation
/// registers nothing.
pub struct ResourceFactory {
    device: Arc<Mutex<dyn Device>>,
    swapchain: Option<Arc<Mutex<dyn Swapchain>>>,
    resources: Vec<TrackedResource>,
    views: Vec<TrackedView>,
    samplers: Vec<Arc<dyn SamplerState>>,
}

impl ResourceFactory {
    /// Create a resource factory over the given driver device
    ///
    /// The swap chain is optional; without one the swap-chain-backed
    /// operations (`create_depth_stencil_texture`,
    /// `active_swapchain_texture`) fail with `SwapchainUnavailable`.
    pub fn new(
        device: Arc<Mutex<dyn Device>>,
        swapchain: Option<Arc<Mutex<dyn Swapchain>>>,
    ) -> Self {
        Self {
            device,
            swapchain,
            resources: Vec::new(),
            views: Vec::new(),
            samplers: Vec::new(),
        }
    }

    // ===== DERIVATION HELPERS =====

    /// Usage class from the capability flag pair
    ///
    /// CPU-writable wins Dynamic, GPU-writable wins Default, neither is
    /// Immutable. Callers reject the both-flags combination before this.
    fn derive_usage(cpu_writeable: bool, gpu_writeable: bool) -> Usage {
        if cpu_writeable {
            Usage::Dynamic
        } else if gpu_writeable {
            Usage::Default
        } else {
            Usage::Immutable
        }
    }

    fn derive_cpu_access(cpu_writeable: bool) -> CpuAccessFlags {
        if cpu_writeable {
            CpuAccessFlags::WRITE
        } else {
            CpuAccessFlags::empty()
        }
    }

    /// Reject the mutually exclusive capability pair
    fn check_capability_exclusivity(&self, what: &str, cpu: bool, gpu: bool) -> Result<()> {
        if cpu && gpu {
            return Err(crate::engine_err!(
                InvalidCapabilityCombination,
                SOURCE,
                "{} cannot be both CPU-writable and GPU-writable",
                what
            ));
        }
        Ok(())
    }

    // ===== BUFFERS =====

    /// Create a buffer from a full descriptor
    ///
    /// Validated pass-through for callers that need full control. `Dynamic`
    /// usage requires CPU write access and `Immutable` forbids any CPU
    /// access.
    pub fn create_buffer(
        &mut self,
        desc: &BufferDesc,
        data: Option<&SubresourceData<'_>>,
    ) -> Result<Arc<dyn Buffer>> {
        match desc.usage {
            Usage::Dynamic if !desc.cpu_access.contains(CpuAccessFlags::WRITE) => {
                crate::engine_bail!(
                    DescriptorMismatch,
                    SOURCE,
                    "Dynamic buffer requires CPU write access"
                );
            }
            Usage::Immutable if !desc.cpu_access.is_empty() => {
                crate::engine_bail!(
                    DescriptorMismatch,
                    SOURCE,
                    "Immutable buffer cannot have CPU access"
                );
            }
            _ => {}
        }

        self.submit_buffer(desc, data)
    }

    /// Issue the driver create call and register the buffer on success
    fn submit_buffer(
        &mut self,
        desc: &BufferDesc,
        data: Option<&SubresourceData<'_>>,
    ) -> Result<Arc<dyn Buffer>> {
        let buffer = {
            let mut device = self.lock_device()?;
            device.create_buffer(desc, data).map_err(|e| {
                crate::engine_err!(
                    CreationFailed,
                    SOURCE,
                    "Driver rejected buffer ({} bytes): {}",
                    desc.byte_width,
                    e
                )
            })?
        };
        self.resources.push(TrackedResource::Buffer(buffer.clone()));
        crate::engine_trace!(SOURCE, "Buffer created ({} bytes)", desc.byte_width);
        Ok(buffer)
    }

    /// Create a vertex buffer
    ///
    /// GPU-writable vertex buffers additionally get the stream-output bind
    /// flag so a later stage may write them.
    pub fn create_vertex_buffer(
        &mut self,
        size: u32,
        cpu_writeable: bool,
        gpu_writeable: bool,
        data: Option<&SubresourceData<'_>>,
    ) -> Result<Arc<dyn Buffer>> {
        self.check_capability_exclusivity("vertex buffer", cpu_writeable, gpu_writeable)?;

        let mut bind_flags = BindFlags::VERTEX_BUFFER;
        if gpu_writeable {
            bind_flags |= BindFlags::STREAM_OUTPUT;
        }
        let desc = BufferDesc {
            byte_width: size,
            usage: Self::derive_usage(cpu_writeable, gpu_writeable),
            bind_flags,
            cpu_access: Self::derive_cpu_access(cpu_writeable),
            misc_flags: MiscFlags::empty(),
            structure_byte_stride: 0,
        };
        self.submit_buffer(&desc, data)
    }

    /// Create an index buffer
    pub fn create_index_buffer(
        &mut self,
        size: u32,
        cpu_writeable: bool,
        gpu_writeable: bool,
        data: Option<&SubresourceData<'_>>,
    ) -> Result<Arc<dyn Buffer>> {
        self.check_capability_exclusivity("index buffer", cpu_writeable, gpu_writeable)?;

        let desc = BufferDesc {
            byte_width: size,
            usage: Self::derive_usage(cpu_writeable, gpu_writeable),
            bind_flags: BindFlags::INDEX_BUFFER,
            cpu_access: Self::derive_cpu_access(cpu_writeable),
            misc_flags: MiscFlags::empty(),
            structure_byte_stride: 0,
        };
        self.submit_buffer(&desc, data)
    }

    /// Create a constant buffer
    pub fn create_constant_buffer(
        &mut self,
        size: u32,
        cpu_writeable: bool,
        gpu_writeable: bool,
        data: Option<&SubresourceData<'_>>,
    ) -> Result<Arc<dyn Buffer>> {
        self.check_capability_exclusivity("constant buffer", cpu_writeable, gpu_writeable)?;

        let desc = BufferDesc {
            byte_width: size,
            usage: Self::derive_usage(cpu_writeable, gpu_writeable),
            bind_flags: BindFlags::CONSTANT_BUFFER,
            cpu_access: Self::derive_cpu_access(cpu_writeable),
            misc_flags: MiscFlags::empty(),
            structure_byte_stride: 0,
        };
        self.submit_buffer(&desc, data)
    }

    /// Create a structured buffer of `element_count` elements of
    /// `element_size` bytes each
    ///
    /// GPU-writable structured buffers get shader-resource plus
    /// unordered-access binds; the others are shader-resource only.
    pub fn create_structured_buffer(
        &mut self,
        element_count: u32,
        element_size: u32,
        cpu_writeable: bool,
        gpu_writeable: bool,
        data: Option<&SubresourceData<'_>>,
    ) -> Result<Arc<dyn Buffer>> {
        self.check_capability_exclusivity("structured buffer", cpu_writeable, gpu_writeable)?;

        let mut bind_flags = BindFlags::SHADER_RESOURCE;
        if gpu_writeable {
            bind_flags |= BindFlags::UNORDERED_ACCESS;
        }
        let desc = BufferDesc {
            byte_width: element_count * element_size,
            usage: Self::derive_usage(cpu_writeable, gpu_writeable),
            bind_flags,
            cpu_access: Self::derive_cpu_access(cpu_writeable),
            misc_flags: MiscFlags::BUFFER_STRUCTURED,
            structure_byte_stride: element_size,
        };
        self.submit_buffer(&desc, data)
    }

    /// Create an append/consume structured buffer (always GPU-writable)
    pub fn create_append_consume_buffer(
        &mut self,
        element_count: u32,
        element_size: u32,
        data: Option<&SubresourceData<'_>>,
    ) -> Result<Arc<dyn Buffer>> {
        let desc = BufferDesc {
            byte_width: element_count * element_size,
            usage: Usage::Default,
            bind_flags: BindFlags::SHADER_RESOURCE | BindFlags::UNORDERED_ACCESS,
            cpu_access: CpuAccessFlags::empty(),
            misc_flags: MiscFlags::BUFFER_STRUCTURED,
            structure_byte_stride: element_size,
        };
        self.submit_buffer(&desc, data)
    }

    /// Create a byte-address buffer allowing raw views
    pub fn create_raw_buffer(
        &mut self,
        size: u32,
        gpu_writeable: bool,
        data: Option<&SubresourceData<'_>>,
    ) -> Result<Arc<dyn Buffer>> {
        let desc = BufferDesc {
            byte_width: size,
            usage: if gpu_writeable { Usage::Default } else { Usage::Immutable },
            bind_flags: BindFlags::SHADER_RESOURCE | BindFlags::UNORDERED_ACCESS,
            cpu_access: CpuAccessFlags::empty(),
            misc_flags: MiscFlags::BUFFER_ALLOW_RAW_VIEWS,
            structure_byte_stride: 0,
        };
        self.submit_buffer(&desc, data)
    }

    /// Create an indirect-draw-arguments buffer
    ///
    /// The driver consumes these in 4-byte words; an unaligned size is
    /// suspicious but not fatal, so it only warns and the creation is
    /// still attempted.
    pub fn create_indirect_args_buffer(
        &mut self,
        size: u32,
        data: Option<&SubresourceData<'_>>,
    ) -> Result<Arc<dyn Buffer>> {
        if size % 4 != 0 {
            crate::engine_warn!(
                SOURCE,
                "Indirect args buffer size {} is not a multiple of 4",
                size
            );
        }
        let desc = BufferDesc {
            byte_width: size,
            usage: Usage::Default,
            bind_flags: BindFlags::SHADER_RESOURCE | BindFlags::UNORDERED_ACCESS,
            cpu_access: CpuAccessFlags::empty(),
            misc_flags: MiscFlags::DRAW_INDIRECT_ARGS,
            structure_byte_stride: 0,
        };
        self.submit_buffer(&desc, data)
    }

    // ===== TEXTURES =====

    /// Issue the driver create call and register the texture on success
    fn submit_texture(
        &mut self,
        desc: &TextureDesc,
        data: Option<&SubresourceData<'_>>,
    ) -> Result<Arc<dyn Texture>> {
        let texture = {
            let mut device = self.lock_device()?;
            device.create_texture(desc, data).map_err(|e| {
                crate::engine_err!(
                    CreationFailed,
                    SOURCE,
                    "Driver rejected texture ({}x{}x{}): {}",
                    desc.width,
                    desc.height,
                    desc.depth,
                    e
                )
            })?
        };
        self.resources.push(TrackedResource::Texture(texture.clone()));
        crate::engine_trace!(
            SOURCE,
            "Texture created ({}x{}x{}, {} mips, {} layers)",
            desc.width,
            desc.height,
            desc.depth,
            desc.mip_levels,
            desc.array_size
        );
        Ok(texture)
    }

    /// Shared bind/usage derivation for the shader-visible texture kinds
    ///
    /// Mip generation (requested via `mip_levels > 1`) needs the texture to
    /// also be a render target.
    fn shader_texture_desc(
        kind: TextureKind,
        width: u32,
        height: u32,
        depth: u32,
        mip_levels: u32,
        array_size: u32,
        format: Format,
        cpu_writeable: bool,
        gpu_writeable: bool,
    ) -> TextureDesc {
        let mut bind_flags = BindFlags::SHADER_RESOURCE;
        if gpu_writeable {
            bind_flags |= BindFlags::UNORDERED_ACCESS;
        }
        let mut misc_flags = MiscFlags::empty();
        if mip_levels > 1 {
            bind_flags |= BindFlags::RENDER_TARGET;
            misc_flags |= MiscFlags::GENERATE_MIPS;
        }
        TextureDesc {
            kind,
            width,
            height,
            depth,
            mip_levels,
            array_size,
            format,
            usage: Self::derive_usage(cpu_writeable, gpu_writeable),
            bind_flags,
            cpu_access: Self::derive_cpu_access(cpu_writeable),
            misc_flags,
        }
    }

    /// Create a 1D texture
    pub fn create_texture_1d(
        &mut self,
        width: u32,
        mip_levels: u32,
        format: Format,
        cpu_writeable: bool,
        gpu_writeable: bool,
        data: Option<&SubresourceData<'_>>,
    ) -> Result<Arc<dyn Texture>> {
        self.check_capability_exclusivity("1D texture", cpu_writeable, gpu_writeable)?;
        let desc = Self::shader_texture_desc(
            TextureKind::D1,
            width,
            1,
            1,
            mip_levels,
            1,
            format,
            cpu_writeable,
            gpu_writeable,
        );
        self.submit_texture(&desc, data)
    }

    /// Create a 1D texture array
    pub fn create_texture_1d_array(
        &mut self,
        width: u32,
        mip_levels: u32,
        array_size: u32,
        format: Format,
        cpu_writeable: bool,
        gpu_writeable: bool,
        data: Option<&SubresourceData<'_>>,
    ) -> Result<Arc<dyn Texture>> {
        self.check_capability_exclusivity("1D texture array", cpu_writeable, gpu_writeable)?;
        let desc = Self::shader_texture_desc(
            TextureKind::D1,
            width,
            1,
            1,
            mip_levels,
            array_size,
            format,
            cpu_writeable,
            gpu_writeable,
        );
        self.submit_texture(&desc, data)
    }

    /// Create a 2D texture
    pub fn create_texture_2d(
        &mut self,
        width: u32,
        height: u32,
        mip_levels: u32,
        format: Format,
        cpu_writeable: bool,
        gpu_writeable: bool,
        data: Option<&SubresourceData<'_>>,
    ) -> Result<Arc<dyn Texture>> {
        self.check_capability_exclusivity("2D texture", cpu_writeable, gpu_writeable)?;
        let desc = Self::shader_texture_desc(
            TextureKind::D2,
            width,
            height,
            1,
            mip_levels,
            1,
            format,
            cpu_writeable,
            gpu_writeable,
        );
        self.submit_texture(&desc, data)
    }

    /// Create a 2D texture array
    pub fn create_texture_2d_array(
        &mut self,
        width: u32,
        height: u32,
        mip_levels: u32,
        array_size: u32,
        format: Format,
        cpu_writeable: bool,
        gpu_writeable: bool,
        data: Option<&SubresourceData<'_>>,
    ) -> Result<Arc<dyn Texture>> {
        self.check_capability_exclusivity("2D texture array", cpu_writeable, gpu_writeable)?;
        let desc = Self::shader_texture_desc(
            TextureKind::D2,
            width,
            height,
            1,
            mip_levels,
            array_size,
            format,
            cpu_writeable,
            gpu_writeable,
        );
        self.submit_texture(&desc, data)
    }

    /// Create a 3D texture (never arrayed)
    pub fn create_texture_3d(
        &mut self,
        width: u32,
        height: u32,
        depth: u32,
        mip_levels: u32,
        format: Format,
        cpu_writeable: bool,
        gpu_writeable: bool,
        data: Option<&SubresourceData<'_>>,
    ) -> Result<Arc<dyn Texture>> {
        self.check_capability_exclusivity("3D texture", cpu_writeable, gpu_writeable)?;
        let desc = Self::shader_texture_desc(
            TextureKind::D3,
            width,
            height,
            depth,
            mip_levels,
            1,
            format,
            cpu_writeable,
            gpu_writeable,
        );
        self.submit_texture(&desc, data)
    }

    /// Create a depth-stencil texture sized to the swap chain's current
    /// output dimensions
    ///
    /// # Errors
    ///
    /// `Error::SwapchainUnavailable` when no swap chain is wired in.
    pub fn create_depth_stencil_texture(&mut self) -> Result<Arc<dyn Texture>> {
        let (width, height) = {
            let swapchain = self.lock_swapchain()?;
            (swapchain.width(), swapchain.height())
        };
        let desc = TextureDesc {
            kind: TextureKind::D2,
            width,
            height,
            depth: 1,
            mip_levels: 1,
            array_size: 1,
            format: Format::D32_FLOAT,
            usage: Usage::Default,
            bind_flags: BindFlags::DEPTH_STENCIL,
            cpu_access: CpuAccessFlags::empty(),
            misc_flags: MiscFlags::empty(),
        };
        self.submit_texture(&desc, None)
    }

    /// Get the swap chain's active back buffer, registered like any other
    /// tracked resource
    ///
    /// # Errors
    ///
    /// `Error::SwapchainUnavailable` when no swap chain is wired in or the
    /// back buffer cannot be retrieved.
    pub fn active_swapchain_texture(&mut self) -> Result<Arc<dyn Texture>> {
        let texture = {
            let swapchain = self.lock_swapchain()?;
            swapchain.buffer(0).map_err(|e| {
                crate::engine_err!(SwapchainUnavailable, SOURCE, "Back buffer retrieval: {}", e)
            })?
        };
        self.resources.push(TrackedResource::Texture(texture.clone()));
        Ok(texture)
    }

    // ===== TEXTURE VIEWS =====

    /// View dimension for a texture, given its kind and layer count
    fn texture_view_dimension(desc: &TextureDesc) -> ViewDimension {
        match (desc.kind, desc.is_array()) {
            (TextureKind::D1, false) => ViewDimension::Texture1D,
            (TextureKind::D1, true) => ViewDimension::Texture1DArray,
            (TextureKind::D2, false) => ViewDimension::Texture2D,
            (TextureKind::D2, true) => ViewDimension::Texture2DArray,
            (TextureKind::D3, _) => ViewDimension::Texture3D,
        }
    }

    /// Resolve a subrange against the texture it addresses
    fn texture_view_desc(
        texture: &Arc<dyn Texture>,
        subrange: TextureSubrange,
        format: Option<Format>,
    ) -> TextureViewDesc {
        let desc = texture.desc();
        let mip_levels = if subrange.mip_levels == 0 {
            desc.mip_levels.saturating_sub(subrange.mip_slice)
        } else {
            subrange.mip_levels
        };
        let array_size = if subrange.array_size == 0 {
            desc.array_size.saturating_sub(subrange.first_array_slice)
        } else {
            subrange.array_size
        };
        TextureViewDesc {
            format: format.unwrap_or(desc.format),
            dimension: Self::texture_view_dimension(desc),
            mip_slice: subrange.mip_slice,
            mip_levels,
            first_array_slice: subrange.first_array_slice,
            array_size,
        }
    }

    /// Create a render-target view over a texture
    pub fn create_render_target_view(
        &mut self,
        texture: &Arc<dyn Texture>,
        subrange: TextureSubrange,
        format: Option<Format>,
    ) -> Result<Arc<dyn RenderTargetView>> {
        let view_desc = Self::texture_view_desc(texture, subrange, format);
        let view = {
            let mut device = self.lock_device()?;
            device
                .create_render_target_view(texture, &view_desc)
                .map_err(|e| {
                    crate::engine_err!(CreationFailed, SOURCE, "Render target view: {}", e)
                })?
        };
        self.views.push(TrackedView::RenderTarget(view.clone()));
        Ok(view)
    }

    /// Create a depth-stencil view over a texture
    pub fn create_depth_stencil_view(
        &mut self,
        texture: &Arc<dyn Texture>,
        subrange: TextureSubrange,
        format: Option<Format>,
    ) -> Result<Arc<dyn DepthStencilView>> {
        let view_desc = Self::texture_view_desc(texture, subrange, format);
        let view = {
            let mut device = self.lock_device()?;
            device
                .create_depth_stencil_view(texture, &view_desc)
                .map_err(|e| {
                    crate::engine_err!(CreationFailed, SOURCE, "Depth stencil view: {}", e)
                })?
        };
        self.views.push(TrackedView::DepthStencil(view.clone()));
        Ok(view)
    }

    /// Create a shader-resource view over a texture
    ///
    /// # Errors
    ///
    /// `Error::DescriptorMismatch` when the texture was not created with
    /// the shader-resource bind flag; no driver call is issued.
    pub fn create_texture_shader_resource_view(
        &mut self,
        texture: &Arc<dyn Texture>,
        subrange: TextureSubrange,
        format: Option<Format>,
    ) -> Result<Arc<dyn ShaderResourceView>> {
        if !texture.desc().bind_flags.contains(BindFlags::SHADER_RESOURCE) {
            crate::engine_bail!(
                DescriptorMismatch,
                SOURCE,
                "Shader resource view requested over a texture without the shader-resource bind flag"
            );
        }
        let view_desc = Self::texture_view_desc(texture, subrange, format);
        let view = {
            let mut device = self.lock_device()?;
            device
                .create_texture_shader_resource_view(texture, &view_desc)
                .map_err(|e| {
                    crate::engine_err!(CreationFailed, SOURCE, "Texture shader resource view: {}", e)
                })?
        };
        self.views.push(TrackedView::ShaderResource(view.clone()));
        Ok(view)
    }

    /// Create an unordered-access view over a texture
    ///
    /// # Errors
    ///
    /// `Error::DescriptorMismatch` when the texture was not created with
    /// the unordered-access bind flag; no driver call is issued.
    pub fn create_texture_unordered_access_view(
        &mut self,
        texture: &Arc<dyn Texture>,
        subrange: TextureSubrange,
        format: Option<Format>,
    ) -> Result<Arc<dyn UnorderedAccessView>> {
        if !texture.desc().bind_flags.contains(BindFlags::UNORDERED_ACCESS) {
            crate::engine_bail!(
                DescriptorMismatch,
                SOURCE,
                "Unordered access view requested over a texture without the unordered-access bind flag"
            );
        }
        let view_desc = Self::texture_view_desc(texture, subrange, format);
        let view = {
            let mut device = self.lock_device()?;
            device
                .create_texture_unordered_access_view(texture, &view_desc)
                .map_err(|e| {
                    crate::engine_err!(CreationFailed, SOURCE, "Texture unordered access view: {}", e)
                })?
        };
        self.views.push(TrackedView::UnorderedAccess(view.clone()));
        Ok(view)
    }

    // ===== BUFFER VIEWS =====

    /// Validate a buffer view request against the buffer's descriptor
    ///
    /// Exits on the first violation; a rejected request issues no driver
    /// call and registers nothing.
    fn validate_buffer_view(
        buffer: &Arc<dyn Buffer>,
        required_bind: BindFlags,
        role: &str,
        format: Format,
        flags: BufferViewFlags,
    ) -> Result<()> {
        let desc = buffer.desc();

        if !desc.bind_flags.contains(required_bind) {
            crate::engine_bail!(
                DescriptorMismatch,
                SOURCE,
                "{} requested over a buffer without the required bind flag",
                role
            );
        }
        if desc.is_structured() && format != Format::Unknown {
            crate::engine_bail!(
                DescriptorMismatch,
                SOURCE,
                "{} over a structured buffer must use Format::Unknown, got {:?}",
                role,
                format
            );
        }
        if flags.contains(BufferViewFlags::RAW) {
            if format != Format::R32_TYPELESS {
                crate::engine_bail!(
                    DescriptorMismatch,
                    SOURCE,
                    "Raw {} requires Format::R32_TYPELESS, got {:?}",
                    role,
                    format
                );
            }
            if !desc.allows_raw_views() {
                crate::engine_bail!(
                    DescriptorMismatch,
                    SOURCE,
                    "Raw {} over a buffer created without raw view support",
                    role
                );
            }
        }
        Ok(())
    }

    /// Create a shader-resource view over a buffer
    pub fn create_buffer_shader_resource_view(
        &mut self,
        buffer: &Arc<dyn Buffer>,
        first_element: u32,
        element_count: u32,
        format: Format,
        flags: BufferViewFlags,
    ) -> Result<Arc<dyn ShaderResourceView>> {
        Self::validate_buffer_view(
            buffer,
            BindFlags::SHADER_RESOURCE,
            "Shader resource view",
            format,
            flags,
        )?;
        let view_desc = BufferViewDesc { format, first_element, element_count, flags };
        let view = {
            let mut device = self.lock_device()?;
            device
                .create_buffer_shader_resource_view(buffer, &view_desc)
                .map_err(|e| {
                    crate::engine_err!(CreationFailed, SOURCE, "Buffer shader resource view: {}", e)
                })?
        };
        self.views.push(TrackedView::ShaderResource(view.clone()));
        Ok(view)
    }

    /// Create an unordered-access view over a buffer
    pub fn create_buffer_unordered_access_view(
        &mut self,
        buffer: &Arc<dyn Buffer>,
        first_element: u32,
        element_count: u32,
        format: Format,
        flags: BufferViewFlags,
    ) -> Result<Arc<dyn UnorderedAccessView>> {
        Self::validate_buffer_view(
            buffer,
            BindFlags::UNORDERED_ACCESS,
            "Unordered access view",
            format,
            flags,
        )?;
        let view_desc = BufferViewDesc { format, first_element, element_count, flags };
        let view = {
            let mut device = self.lock_device()?;
            device
                .create_buffer_unordered_access_view(buffer, &view_desc)
                .map_err(|e| {
                    crate::engine_err!(CreationFailed, SOURCE, "Buffer unordered access view: {}", e)
                })?
        };
        self.views.push(TrackedView::UnorderedAccess(view.clone()));
        Ok(view)
    }

    // ===== SAMPLERS =====

    /// Create a sampler state
    pub fn create_sampler_state(&mut self, desc: &SamplerDesc) -> Result<Arc<dyn SamplerState>> {
        let sampler = {
            let mut device = self.lock_device()?;
            device.create_sampler_state(desc).map_err(|e| {
                crate::engine_err!(CreationFailed, SOURCE, "Sampler state: {}", e)
            })?
        };
        self.samplers.push(sampler.clone());
        Ok(sampler)
    }

    // ===== OWNERSHIP =====

    /// Release every tracked resource, then every view, then every sampler
    ///
    /// Dropping the factory's handle releases the driver-side object once
    /// no caller holds another one. Safe to call more than once; the lists
    /// are simply empty the second time.
    pub fn shutdown(&mut self) {
        let released = self.resources.len() + self.views.len() + self.samplers.len();
        self.resources.clear();
        self.views.clear();
        self.samplers.clear();
        crate::engine_info!(SOURCE, "Released {} tracked objects", released);
    }

    /// Number of tracked resources (buffers and textures)
    pub fn resource_count(&self) -> usize {
        self.resources.len()
    }

    /// Number of tracked views (all roles)
    pub fn view_count(&self) -> usize {
        self.views.len()
    }

    /// Number of tracked sampler states
    pub fn sampler_count(&self) -> usize {
        self.samplers.len()
    }

    // ===== LOCK HELPERS =====

    fn lock_device(&self) -> Result<std::sync::MutexGuard<'_, dyn Device + 'static>> {
        self.device.lock().map_err(|_| {
            crate::engine_err!(BackendError, SOURCE, "Device lock poisoned")
        })
    }

    fn lock_swapchain(&self) -> Result<std::sync::MutexGuard<'_, dyn Swapchain + 'static>> {
        let swapchain = self.swapchain.as_ref().ok_or_else(|| {
            crate::engine_err!(
                SwapchainUnavailable,
                SOURCE,
                "No swapchain wired into the resource factory"
            )
        })?;
        swapchain.lock().map_err(|_| {
            crate::engine_err!(BackendError, SOURCE, "Swapchain lock poisoned")
        })
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "resource_factory_tests.rs"]
mod tests;
