//! Texture trait and texture descriptor

use crate::driver::{BindFlags, CpuAccessFlags, Format, MiscFlags, Usage};

/// Texture dimensionality
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureKind {
    D1,
    D2,
    D3,
}

/// Descriptor for creating a texture (1D, 2D or 3D, optionally arrayed)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextureDesc {
    /// Dimensionality
    pub kind: TextureKind,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels (1 for 1D)
    pub height: u32,
    /// Depth in pixels (1 unless 3D)
    pub depth: u32,
    /// Number of mip levels
    pub mip_levels: u32,
    /// Number of array layers (1 = not an array; 3D textures cannot be arrayed)
    pub array_size: u32,
    /// Pixel format
    pub format: Format,
    /// Usage class
    pub usage: Usage,
    /// Pipeline roles this texture may fill
    pub bind_flags: BindFlags,
    /// CPU access capabilities
    pub cpu_access: CpuAccessFlags,
    /// Miscellaneous options (mip generation)
    pub misc_flags: MiscFlags,
}

impl TextureDesc {
    /// Returns true if this texture is an array (array_size > 1)
    pub fn is_array(&self) -> bool {
        self.array_size > 1
    }
}

/// GPU texture resource trait
///
/// Implemented by backend-specific texture types. The driver-side object
/// is released when the last handle is dropped.
pub trait Texture: Send + Sync {
    /// Get the descriptor this texture was created with
    fn desc(&self) -> &TextureDesc;
}
