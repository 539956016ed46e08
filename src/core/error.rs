//! Error types for engine operations.

use thiserror::Error;

/// Errors produced while assembling or driving the engine.
///
/// Transient conditions (resource shortage, budget shortfall, bad weather,
/// missing skilled workers) are not errors; they are logged holds handled by
/// bounded backoff inside the loops.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    /// Spawning an OS thread failed.
    #[error("failed to spawn {role} thread")]
    ThreadSpawn {
        /// Which loop the thread was meant to run.
        role: &'static str,
        /// Underlying OS error.
        source: std::io::Error,
    },
}

/// Application-facing result using anyhow for higher-level contexts.
pub type AppResult<T> = Result<T, anyhow::Error>;
