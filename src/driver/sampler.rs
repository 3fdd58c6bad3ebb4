//! Sampler state trait and descriptor

/// Texture filtering mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Filter {
    Point,
    Linear,
    Anisotropic,
}

/// Texture coordinate addressing mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressMode {
    Wrap,
    Mirror,
    Clamp,
    Border,
}

/// Descriptor for creating a sampler state
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplerDesc {
    pub filter: Filter,
    pub address_u: AddressMode,
    pub address_v: AddressMode,
    pub address_w: AddressMode,
    /// Maximum anisotropy (only meaningful for `Filter::Anisotropic`)
    pub max_anisotropy: u32,
    /// Border colour (only meaningful for `AddressMode::Border`)
    pub border_colour: [f32; 4],
}

impl Default for SamplerDesc {
    fn default() -> Self {
        Self {
            filter: Filter::Linear,
            address_u: AddressMode::Wrap,
            address_v: AddressMode::Wrap,
            address_w: AddressMode::Wrap,
            max_anisotropy: 1,
            border_colour: [0.0, 0.0, 0.0, 0.0],
        }
    }
}

/// Sampler state trait
///
/// Implemented by backend-specific sampler types.
pub trait SamplerState: Send + Sync {
    fn desc(&self) -> &SamplerDesc;
}
