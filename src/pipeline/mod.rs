//! Pipeline module - binding dispatch to the programmable pipeline stages

pub mod pipeline_binder;

pub use pipeline_binder::*;
