//! Common driver types - formats, usage classes, capability flags

use bitflags::bitflags;

/// Fixed limit of simultaneously bound render targets
pub const MAX_RENDER_TARGETS: usize = 8;

/// Pixel/element format
///
/// `Unknown` is the unspecified format required by structured-buffer views;
/// `R32_TYPELESS` is the 32-bit typeless format required by raw views.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(non_camel_case_types)]
pub enum Format {
    Unknown,
    R32_TYPELESS,
    D32_FLOAT,
    R8G8B8A8_UNORM,
    R8G8B8A8_SRGB,
    B8G8R8A8_UNORM,
    R16_UINT,
    R32_UINT,
    R32_FLOAT,
    R32G32_FLOAT,
    R32G32B32_FLOAT,
    R32G32B32A32_FLOAT,
}

/// Resource usage class - the memory/access policy governing who may
/// write to a resource and when
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Usage {
    /// GPU read/write, no direct CPU access
    Default,
    /// GPU read only, contents fixed at creation
    Immutable,
    /// GPU read, CPU write (requires CPU write access)
    Dynamic,
}

bitflags! {
    /// Pipeline roles a resource may fill
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct BindFlags: u32 {
        const VERTEX_BUFFER    = 1 << 0;
        const INDEX_BUFFER     = 1 << 1;
        const CONSTANT_BUFFER  = 1 << 2;
        const SHADER_RESOURCE  = 1 << 3;
        const STREAM_OUTPUT    = 1 << 4;
        const RENDER_TARGET    = 1 << 5;
        const DEPTH_STENCIL    = 1 << 6;
        const UNORDERED_ACCESS = 1 << 7;
    }
}

bitflags! {
    /// CPU access capabilities on a resource
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct CpuAccessFlags: u32 {
        const WRITE = 1 << 0;
        const READ  = 1 << 1;
    }
}

bitflags! {
    /// Miscellaneous resource options
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct MiscFlags: u32 {
        const GENERATE_MIPS          = 1 << 0;
        const BUFFER_STRUCTURED      = 1 << 1;
        const BUFFER_ALLOW_RAW_VIEWS = 1 << 2;
        const DRAW_INDIRECT_ARGS     = 1 << 3;
    }
}

/// Initial data uploaded to a resource at creation time
#[derive(Debug, Clone, Copy)]
pub struct SubresourceData<'a> {
    /// Raw bytes for the whole resource (or its first subresource)
    pub data: &'a [u8],
    /// Row pitch in bytes (0 for buffers and 1D textures)
    pub row_pitch: u32,
    /// Depth-slice pitch in bytes (0 unless 3D)
    pub slice_pitch: u32,
}

impl<'a> SubresourceData<'a> {
    /// Wrap a raw byte slice
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, row_pitch: 0, slice_pitch: 0 }
    }

    /// View a plain-old-data slice as initial bytes
    pub fn from_pod<T: bytemuck::Pod>(data: &'a [T]) -> Self {
        Self::new(bytemuck::cast_slice(data))
    }

    /// Same, with an explicit row pitch (2D texture uploads)
    pub fn with_row_pitch(data: &'a [u8], row_pitch: u32) -> Self {
        Self { data, row_pitch, slice_pitch: 0 }
    }
}
