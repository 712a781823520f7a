//! The common error type for quartz operations.

use std::fmt;

/// An error that can occur while manipulating a [`Context`](crate::Context).
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The rendering engine reported a failure.
    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),
    /// `restore` was called with no matching `save`.
    #[error("Restore without a matching save")]
    InvalidRestore,
}

/// An opaque failure reported by a rendering engine.
///
/// Engines box their own error types into this; the context only ever
/// propagates it.
pub struct EngineError(Box<dyn std::error::Error + Send + Sync>);

impl EngineError {
    pub fn new(err: impl std::error::Error + Send + Sync + 'static) -> EngineError {
        EngineError(Box::new(err))
    }

    /// The engine's own error, for callers that know which engine they run.
    pub fn reason(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
        &*self.0
    }

    /// Try to view the reason as a concrete engine error type.
    pub fn downcast_ref<T: std::error::Error + 'static>(&self) -> Option<&T> {
        self.0.downcast_ref()
    }
}

impl fmt::Debug for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for EngineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&*self.0)
    }
}
