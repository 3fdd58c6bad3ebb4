//! Resource module - GPU resource and view creation with ownership tracking

pub mod resource_factory;

pub use resource_factory::*;
