//! Neki Engine - singleton manager for engine subsystems
//!
//! Holds the process-wide driver collaborators (device, immediate context,
//! swap chain) and the two core components (resource factory, pipeline
//! binder). Thread-safe static storage with RwLock slots; the design still
//! assumes a single rendering thread issuing commands.

use std::sync::{Arc, Mutex, OnceLock, RwLock};
use std::time::SystemTime;

use crate::driver::{Context, Device, Swapchain};
use crate::error::{Error, Result};
use crate::log::{DefaultLogger, LogEntry, LogSeverity, Logger};
use crate::pipeline::PipelineBinder;
use crate::resource::ResourceFactory;

// ===== STARTUP CONFIGURATION =====

/// Output window configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowDescription {
    /// Output width in pixels
    pub width: u32,
    /// Output height in pixels
    pub height: u32,
}

/// Per-frame render configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderDescription {
    /// RGBA clear colour applied to the active render target each tick
    pub clear_colour: [f32; 4],
}

/// Full startup configuration, passed once to `Engine::initialize`
///
/// This is the only configuration surface: no flags, environment
/// variables, or persisted files.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineDescription {
    pub window: WindowDescription,
    pub render: RenderDescription,
}

// ===== INTERNAL STATE =====

/// Global engine state storage
static ENGINE_STATE: OnceLock<EngineState> = OnceLock::new();

/// Global logger (initialized with DefaultLogger)
static LOGGER: OnceLock<RwLock<Box<dyn Logger>>> = OnceLock::new();

/// Internal state structure holding all engine singletons
struct EngineState {
    /// Startup configuration record
    description: RwLock<Option<EngineDescription>>,
    /// Driver device handle (resource creation entry points)
    device: RwLock<Option<Arc<Mutex<dyn Device>>>>,
    /// Driver immediate context handle (binding entry points)
    context: RwLock<Option<Arc<Mutex<dyn Context>>>>,
    /// Swap chain collaborator
    swapchain: RwLock<Option<Arc<Mutex<dyn Swapchain>>>>,
    /// Resource factory singleton
    resource_factory: RwLock<Option<Arc<Mutex<ResourceFactory>>>>,
    /// Pipeline binder singleton
    pipeline_binder: RwLock<Option<Arc<Mutex<PipelineBinder>>>>,
}

impl EngineState {
    fn new() -> Self {
        Self {
            description: RwLock::new(None),
            device: RwLock::new(None),
            context: RwLock::new(None),
            swapchain: RwLock::new(None),
            resource_factory: RwLock::new(None),
            pipeline_binder: RwLock::new(None),
        }
    }
}

// ===== PUBLIC API =====

/// Main engine singleton manager
///
/// # Example
///
/// ```no_run
/// use neki_engine::neki::{Engine, EngineDescription, RenderDescription, WindowDescription};
///
/// Engine::initialize(EngineDescription {
///     window: WindowDescription { width: 800, height: 800 },
///     render: RenderDescription { clear_colour: [1.0, 1.0, 0.0, 1.0] },
/// })?;
///
/// // Register a driver backend, then create the core components
/// // Engine::create_driver(device, context)?;
/// // Engine::create_resource_factory()?;
/// // Engine::create_pipeline_binder()?;
///
/// Engine::shutdown();
/// # Ok::<(), neki_engine::neki::Error>(())
/// ```
pub struct Engine;

impl Engine {
    /// Helper to log errors before returning them (internal use)
    fn log_and_return_error(error: Error) -> Error {
        crate::engine_error!("neki::Engine", "{}", error);
        error
    }

    fn state() -> Result<&'static EngineState> {
        ENGINE_STATE.get().ok_or_else(|| {
            Self::log_and_return_error(Error::InitializationFailed(
                "Engine not initialized. Call Engine::initialize() first.".to_string(),
            ))
        })
    }

    /// Initialize the engine with the startup configuration
    ///
    /// Must be called once at application startup before registering the
    /// driver or creating any subsystems. Calling it again only replaces
    /// the stored description.
    pub fn initialize(description: EngineDescription) -> Result<()> {
        let state = ENGINE_STATE.get_or_init(EngineState::new);
        let mut lock = state.description.write().map_err(|_| {
            Self::log_and_return_error(Error::BackendError(
                "Description lock poisoned".to_string(),
            ))
        })?;
        *lock = Some(description);
        Ok(())
    }

    /// Get the startup configuration record
    pub fn description() -> Result<EngineDescription> {
        let state = Self::state()?;
        let lock = state.description.read().map_err(|_| {
            Self::log_and_return_error(Error::BackendError(
                "Description lock poisoned".to_string(),
            ))
        })?;
        lock.ok_or_else(|| {
            Self::log_and_return_error(Error::InitializationFailed(
                "Engine description not set. Call Engine::initialize() first.".to_string(),
            ))
        })
    }

    /// Shutdown the entire engine and destroy all singletons
    ///
    /// Releases tracked resources through the resource factory, clears all
    /// bound pipeline state, then releases the driver handles. Not
    /// protected against a second call; call at most once per process.
    pub fn shutdown() {
        let Some(state) = ENGINE_STATE.get() else {
            return;
        };

        // Release every tracked resource/view before the device goes away
        if let Ok(lock) = state.resource_factory.read() {
            if let Some(factory) = lock.as_ref() {
                if let Ok(mut factory) = factory.lock() {
                    factory.shutdown();
                }
            }
        }

        // Unbind everything from the pipeline before releasing the context
        if let Ok(lock) = state.context.read() {
            if let Some(context) = lock.as_ref() {
                if let Ok(mut context) = context.lock() {
                    context.clear_state();
                }
            }
        }

        if let Ok(mut lock) = state.resource_factory.write() {
            *lock = None;
        }
        if let Ok(mut lock) = state.pipeline_binder.write() {
            *lock = None;
        }
        if let Ok(mut lock) = state.swapchain.write() {
            *lock = None;
        }
        if let Ok(mut lock) = state.context.write() {
            *lock = None;
        }
        if let Ok(mut lock) = state.device.write() {
            *lock = None;
        }
        if let Ok(mut lock) = state.description.write() {
            *lock = None;
        }

        crate::engine_info!("neki::Engine", "Engine shut down");
    }

    // ===== DRIVER REGISTRATION =====

    /// Register the driver device and immediate context collaborators
    ///
    /// # Errors
    ///
    /// Returns an error if the engine is not initialized, or if a driver
    /// is already registered — re-initialization is rejected with a
    /// diagnostic, never silently overwritten.
    pub fn create_driver<D, C>(device: D, context: C) -> Result<()>
    where
        D: Device + 'static,
        C: Context + 'static,
    {
        let state = Self::state()?;

        let mut device_lock = state.device.write().map_err(|_| {
            Self::log_and_return_error(Error::BackendError("Device lock poisoned".to_string()))
        })?;
        if device_lock.is_some() {
            return Err(Self::log_and_return_error(Error::InitializationFailed(
                "Driver already initialized. A device and context are already registered."
                    .to_string(),
            )));
        }

        let mut context_lock = state.context.write().map_err(|_| {
            Self::log_and_return_error(Error::BackendError("Context lock poisoned".to_string()))
        })?;

        *device_lock = Some(Arc::new(Mutex::new(device)));
        *context_lock = Some(Arc::new(Mutex::new(context)));

        crate::engine_info!("neki::Engine", "Driver device and context registered");
        Ok(())
    }

    /// Register the swap chain collaborator
    ///
    /// # Errors
    ///
    /// Returns an error if the engine is not initialized or a swap chain
    /// already exists.
    pub fn create_swapchain<S: Swapchain + 'static>(swapchain: S) -> Result<()> {
        let state = Self::state()?;

        let mut lock = state.swapchain.write().map_err(|_| {
            Self::log_and_return_error(Error::BackendError(
                "Swapchain lock poisoned".to_string(),
            ))
        })?;
        if lock.is_some() {
            return Err(Self::log_and_return_error(Error::InitializationFailed(
                "Swapchain already exists.".to_string(),
            )));
        }

        *lock = Some(Arc::new(Mutex::new(swapchain)));

        crate::engine_info!("neki::Engine", "Swapchain registered");
        Ok(())
    }

    /// Get the driver device handle
    pub fn device() -> Result<Arc<Mutex<dyn Device>>> {
        let state = Self::state()?;
        let lock = state.device.read().map_err(|_| {
            Self::log_and_return_error(Error::BackendError("Device lock poisoned".to_string()))
        })?;
        lock.clone().ok_or_else(|| {
            Self::log_and_return_error(Error::InitializationFailed(
                "Driver not registered. Call Engine::create_driver() first.".to_string(),
            ))
        })
    }

    /// Get the driver immediate context handle
    pub fn context() -> Result<Arc<Mutex<dyn Context>>> {
        let state = Self::state()?;
        let lock = state.context.read().map_err(|_| {
            Self::log_and_return_error(Error::BackendError("Context lock poisoned".to_string()))
        })?;
        lock.clone().ok_or_else(|| {
            Self::log_and_return_error(Error::InitializationFailed(
                "Driver not registered. Call Engine::create_driver() first.".to_string(),
            ))
        })
    }

    /// Get the swap chain handle
    pub fn swapchain() -> Result<Arc<Mutex<dyn Swapchain>>> {
        let state = Self::state()?;
        let lock = state.swapchain.read().map_err(|_| {
            Self::log_and_return_error(Error::BackendError(
                "Swapchain lock poisoned".to_string(),
            ))
        })?;
        lock.clone().ok_or_else(|| {
            Self::log_and_return_error(Error::SwapchainUnavailable(
                "Swapchain not registered. Call Engine::create_swapchain() first.".to_string(),
            ))
        })
    }

    // ===== CORE COMPONENTS =====

    /// Create and register the resource factory singleton
    ///
    /// Wires the registered device (and swap chain, when present) into a
    /// new `ResourceFactory`.
    ///
    /// # Errors
    ///
    /// Returns an error if the engine is not initialized, the driver is
    /// not registered, or a resource factory already exists.
    pub fn create_resource_factory() -> Result<()> {
        let device = Self::device()?;
        let swapchain = Self::swapchain().ok();

        let state = Self::state()?;
        let mut lock = state.resource_factory.write().map_err(|_| {
            Self::log_and_return_error(Error::BackendError(
                "ResourceFactory lock poisoned".to_string(),
            ))
        })?;
        if lock.is_some() {
            return Err(Self::log_and_return_error(Error::InitializationFailed(
                "ResourceFactory already exists.".to_string(),
            )));
        }

        *lock = Some(Arc::new(Mutex::new(ResourceFactory::new(device, swapchain))));

        crate::engine_info!("neki::Engine", "ResourceFactory singleton created");
        Ok(())
    }

    /// Get the resource factory singleton
    pub fn resource_factory() -> Result<Arc<Mutex<ResourceFactory>>> {
        let state = Self::state()?;
        let lock = state.resource_factory.read().map_err(|_| {
            Self::log_and_return_error(Error::BackendError(
                "ResourceFactory lock poisoned".to_string(),
            ))
        })?;
        lock.clone().ok_or_else(|| {
            Self::log_and_return_error(Error::InitializationFailed(
                "ResourceFactory not created. Call Engine::create_resource_factory() first."
                    .to_string(),
            ))
        })
    }

    /// Create and register the pipeline binder singleton
    ///
    /// # Errors
    ///
    /// Returns an error if the engine is not initialized, the driver is
    /// not registered, or a pipeline binder already exists.
    pub fn create_pipeline_binder() -> Result<()> {
        let context = Self::context()?;

        let state = Self::state()?;
        let mut lock = state.pipeline_binder.write().map_err(|_| {
            Self::log_and_return_error(Error::BackendError(
                "PipelineBinder lock poisoned".to_string(),
            ))
        })?;
        if lock.is_some() {
            return Err(Self::log_and_return_error(Error::InitializationFailed(
                "PipelineBinder already exists.".to_string(),
            )));
        }

        *lock = Some(Arc::new(Mutex::new(PipelineBinder::new(context))));

        crate::engine_info!("neki::Engine", "PipelineBinder singleton created");
        Ok(())
    }

    /// Get the pipeline binder singleton
    pub fn pipeline_binder() -> Result<Arc<Mutex<PipelineBinder>>> {
        let state = Self::state()?;
        let lock = state.pipeline_binder.read().map_err(|_| {
            Self::log_and_return_error(Error::BackendError(
                "PipelineBinder lock poisoned".to_string(),
            ))
        })?;
        lock.clone().ok_or_else(|| {
            Self::log_and_return_error(Error::InitializationFailed(
                "PipelineBinder not created. Call Engine::create_pipeline_binder() first."
                    .to_string(),
            ))
        })
    }

    /// Reset all singletons for testing (only available in test builds)
    #[cfg(test)]
    pub fn reset_for_testing() {
        if let Some(state) = ENGINE_STATE.get() {
            if let Ok(mut lock) = state.resource_factory.write() {
                *lock = None;
            }
            if let Ok(mut lock) = state.pipeline_binder.write() {
                *lock = None;
            }
            if let Ok(mut lock) = state.swapchain.write() {
                *lock = None;
            }
            if let Ok(mut lock) = state.context.write() {
                *lock = None;
            }
            if let Ok(mut lock) = state.device.write() {
                *lock = None;
            }
            if let Ok(mut lock) = state.description.write() {
                *lock = None;
            }
        }
    }

    // ===== LOGGING API =====

    /// Set a custom logger
    ///
    /// Replaces the default logger with a custom implementation.
    pub fn set_logger<L: Logger + 'static>(logger: L) {
        let logger_lock = LOGGER.get_or_init(|| RwLock::new(Box::new(DefaultLogger)));
        if let Ok(mut lock) = logger_lock.write() {
            *lock = Box::new(logger);
        }
    }

    /// Reset logger to the default colored console logger
    pub fn reset_logger() {
        let logger_lock = LOGGER.get_or_init(|| RwLock::new(Box::new(DefaultLogger)));
        if let Ok(mut lock) = logger_lock.write() {
            *lock = Box::new(DefaultLogger);
        }
    }

    /// Internal logging method (for simple logs without file:line)
    ///
    /// Used by the `engine_info!` family of macros.
    pub fn log(severity: LogSeverity, source: &str, message: String) {
        let logger_lock = LOGGER.get_or_init(|| RwLock::new(Box::new(DefaultLogger)));
        if let Ok(lock) = logger_lock.read() {
            lock.log(&LogEntry {
                severity,
                timestamp: SystemTime::now(),
                source: source.to_string(),
                message,
                file: None,
                line: None,
            });
        }
    }

    /// Internal logging method with file:line information (for ERROR logs)
    pub fn log_detailed(
        severity: LogSeverity,
        source: &str,
        message: String,
        file: &'static str,
        line: u32,
    ) {
        let logger_lock = LOGGER.get_or_init(|| RwLock::new(Box::new(DefaultLogger)));
        if let Ok(lock) = logger_lock.read() {
            lock.log(&LogEntry {
                severity,
                timestamp: SystemTime::now(),
                source: source.to_string(),
                message,
                file: Some(file),
                line: Some(line),
            });
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
