//! Buffer trait and buffer descriptor

use crate::driver::{BindFlags, CpuAccessFlags, MiscFlags, Usage};

/// Descriptor for creating a GPU buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BufferDesc {
    /// Size in bytes
    pub byte_width: u32,
    /// Usage class
    pub usage: Usage,
    /// Pipeline roles this buffer may fill
    pub bind_flags: BindFlags,
    /// CPU access capabilities
    pub cpu_access: CpuAccessFlags,
    /// Miscellaneous options (structured, raw views, indirect args)
    pub misc_flags: MiscFlags,
    /// Element stride for structured buffers (0 otherwise)
    pub structure_byte_stride: u32,
}

impl BufferDesc {
    /// True if the buffer was created with the structured misc flag
    pub fn is_structured(&self) -> bool {
        self.misc_flags.contains(MiscFlags::BUFFER_STRUCTURED)
    }

    /// True if raw views are allowed over this buffer
    pub fn allows_raw_views(&self) -> bool {
        self.misc_flags.contains(MiscFlags::BUFFER_ALLOW_RAW_VIEWS)
    }
}

/// GPU buffer resource trait
///
/// Implemented by backend-specific buffer types. The driver-side object
/// is released when the last handle is dropped.
pub trait Buffer: Send + Sync {
    /// Get the descriptor this buffer was created with
    fn desc(&self) -> &BufferDesc;
}
