// src/error.rs
use thiserror::Error;

/// Failures the wrapper can report.
///
/// Setter passthroughs never fail at this layer: the native library handles
/// bad colors or unavailable fonts internally (falling back silently), so only
/// allocation, parsing, validation and process spawning show up here.
#[derive(Error, Debug)]
pub enum TerminalError {
    // Construction
    #[error("Terminal construction failed: {reason}")]
    ConstructionFailed { reason: String },

    #[error("Window creation failed: {reason}")]
    WindowCreationFailed { reason: String },

    // Descriptors
    #[error("Invalid color: {value}")]
    InvalidColor { value: String },

    #[error("Invalid font description: {value}")]
    InvalidFont { value: String },

    #[error("Invalid terminal size: {columns}x{rows}")]
    InvalidSize { columns: usize, rows: usize },

    // Child process
    #[error("Invalid spawn request: {message}")]
    InvalidSpawnRequest { message: String },

    #[error("Failed to spawn {program}: {message}")]
    SpawnFailed { program: String, message: String },

    // Configuration
    #[error("Invalid configuration: {field} = {value}")]
    ConfigurationError { field: String, value: String },
}

pub type TerminalResult<T> = Result<T, TerminalError>;
