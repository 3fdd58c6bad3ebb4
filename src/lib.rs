/*!
# Neki Engine

Minimal real-time rendering scaffold over a fixed-function graphics driver
API (device, immediate context, swap chain).

The two central components are:

- **ResourceFactory**: creates GPU resources (buffers, textures) and views
  with descriptor validation, and owns every object it creates until
  shutdown.
- **PipelineBinder**: binds resources and views to the programmable pipeline
  stages, and manages the render-target/depth-stencil pair as a single
  read-modify-write unit.

The driver itself is abstracted behind the `driver` traits (`Device`,
`Context`, `Swapchain`); backend implementations provide the concrete types.
*/

// Internal modules
mod error;
mod engine;
pub mod log;
pub mod driver;
pub mod resource;
pub mod pipeline;
pub mod render;

// Main neki namespace module
pub mod neki {
    // Error types
    pub use crate::error::{Error, Result};

    // Engine singleton and startup configuration
    pub use crate::engine::{
        Engine, EngineDescription, RenderDescription, WindowDescription,
    };

    // Logging sub-module (types only, NOT macros)
    pub mod log {
        pub use crate::log::{DefaultLogger, LogEntry, LogSeverity, Logger};
    }

    // Driver abstraction sub-module
    pub mod driver {
        pub use crate::driver::*;
    }

    // Resource sub-module
    pub mod resource {
        pub use crate::resource::*;
    }

    // Pipeline sub-module
    pub mod pipeline {
        pub use crate::pipeline::*;
    }

    // Render sub-module
    pub mod render {
        pub use crate::render::*;
    }
}
