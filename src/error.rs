//! Error types for the Neki engine
//!
//! Every failure in the engine is local: detected, logged through the
//! engine logger, and returned to the immediate caller. There is no
//! automatic recovery or retry.

use std::fmt;

/// Result type for Neki engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Neki engine errors
#[derive(Debug, Clone)]
pub enum Error {
    /// The underlying driver rejected a create call (bad descriptor,
    /// out of memory, device lost)
    CreationFailed(String),

    /// Caller requested mutually exclusive CPU and GPU write capability
    InvalidCapabilityCombination(String),

    /// View requested against a resource lacking the required bind flag,
    /// or a format/flag combination violates the documented rules
    DescriptorMismatch(String),

    /// Binding requested for a pipeline stage not valid for that
    /// resource kind
    UnsupportedStage(String),

    /// The swap chain is missing or a swap-chain operation failed
    SwapchainUnavailable(String),

    /// Presenting the swap chain failed (the frame loop may continue)
    PresentFailed(String),

    /// Initialization failed (engine, driver registration, subsystems)
    InitializationFailed(String),

    /// Driver/backend error with no better classification
    BackendError(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::CreationFailed(msg) => write!(f, "Creation failed: {}", msg),
            Error::InvalidCapabilityCombination(msg) => {
                write!(f, "Invalid capability combination: {}", msg)
            }
            Error::DescriptorMismatch(msg) => write!(f, "Descriptor mismatch: {}", msg),
            Error::UnsupportedStage(msg) => write!(f, "Unsupported stage: {}", msg),
            Error::SwapchainUnavailable(msg) => write!(f, "Swapchain unavailable: {}", msg),
            Error::PresentFailed(msg) => write!(f, "Present failed: {}", msg),
            Error::InitializationFailed(msg) => write!(f, "Initialization failed: {}", msg),
            Error::BackendError(msg) => write!(f, "Backend error: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

// ===== ERROR MACROS =====

/// Build an `Error` of the given variant and log it at ERROR severity
/// with file:line information.
///
/// # Example
///
/// ```no_run
/// # fn validate(format: neki_engine::neki::driver::Format) -> neki_engine::neki::Result<()> {
/// return Err(neki_engine::engine_err!(DescriptorMismatch, "neki::ResourceFactory",
///     "view format {:?} not allowed", format));
/// # }
/// ```
#[macro_export]
macro_rules! engine_err {
    ($variant:ident, $source:expr, $($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::neki::Engine::log_detailed(
            $crate::neki::log::LogSeverity::Error,
            $source,
            message.clone(),
            file!(),
            line!(),
        );
        $crate::neki::Error::$variant(message)
    }};
}

/// Log an error and return it from the current function (early-return
/// form of `engine_err!`).
#[macro_export]
macro_rules! engine_bail {
    ($variant:ident, $source:expr, $($arg:tt)*) => {
        return Err($crate::engine_err!($variant, $source, $($arg)*))
    };
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
