//! Resource view traits and view descriptors
//!
//! A view is a typed, range-scoped interpretation of a resource for one
//! pipeline role: render target, depth stencil, shader resource or
//! unordered access.

use bitflags::bitflags;

use crate::driver::Format;

/// View dimensionality
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewDimension {
    Buffer,
    Texture1D,
    Texture1DArray,
    Texture2D,
    Texture2DArray,
    Texture3D,
}

bitflags! {
    /// Options on a buffer view
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct BufferViewFlags: u32 {
        /// Raw (byte-address) view; requires `Format::R32_TYPELESS` and a
        /// resource created with `MiscFlags::BUFFER_ALLOW_RAW_VIEWS`
        const RAW = 1 << 0;
    }
}

/// Descriptor for a view over a buffer (shader-resource or
/// unordered-access role)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BufferViewDesc {
    /// Element format (`Format::Unknown` for structured buffers)
    pub format: Format,
    /// First element visible through the view
    pub first_element: u32,
    /// Number of elements visible through the view
    pub element_count: u32,
    /// View options
    pub flags: BufferViewFlags,
}

/// Descriptor for a view over a texture (any role)
///
/// `mip_levels` is only meaningful for shader-resource views; the other
/// roles address a single mip via `mip_slice`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextureViewDesc {
    /// View format (may differ from the resource format only under the
    /// documented reinterpretation rules)
    pub format: Format,
    /// View dimensionality
    pub dimension: ViewDimension,
    /// Mip slice (or most-detailed mip for shader-resource views)
    pub mip_slice: u32,
    /// Number of mips visible (shader-resource views)
    pub mip_levels: u32,
    /// First array layer visible
    pub first_array_slice: u32,
    /// Number of array layers visible
    pub array_size: u32,
}

// ===== VIEW TRAITS =====

/// Render-target view trait
pub trait RenderTargetView: Send + Sync {
    fn desc(&self) -> &TextureViewDesc;
}

/// Depth-stencil view trait
pub trait DepthStencilView: Send + Sync {
    fn desc(&self) -> &TextureViewDesc;
}

/// Descriptor carried by a shader-resource or unordered-access view,
/// which may sit over either a buffer or a texture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderViewDesc {
    Buffer(BufferViewDesc),
    Texture(TextureViewDesc),
}

/// Shader-resource view trait
pub trait ShaderResourceView: Send + Sync {
    fn desc(&self) -> &ShaderViewDesc;
}

/// Unordered-access view trait
pub trait UnorderedAccessView: Send + Sync {
    fn desc(&self) -> &ShaderViewDesc;
}
