//! Synapse error types

use thiserror::Error;

/// Errors raised by the Synapse animation core
///
/// Control surfaces (the timeline controller in particular) never return these
/// to their callers; they are rendered into observable state instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SynapseError {
    /// A control method was invoked before the timeline finished initializing
    #[error("Timeline not initialized")]
    NotInitialized,

    /// The timeline manager failed to initialize
    #[error("Timeline initialization failed: {0}")]
    Initialization(String),

    /// Phase index outside the phase table
    #[error("Invalid phase index: {0}")]
    InvalidPhase(usize),

    /// Playback speed multiplier that is not finite and positive
    #[error("Invalid playback speed: {0}")]
    InvalidSpeed(f64),

    /// Invalid or unreadable configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Locale catalog could not be parsed
    #[error("Locale error: {0}")]
    Locale(String),

    /// Device capability detection failed
    #[error("Device probe failed: {0}")]
    Probe(String),

    /// Failure reported by a timeline manager
    #[error("Timeline manager error: {0}")]
    Manager(String),
}

/// Result type for Synapse operations
pub type Result<T> = std::result::Result<T, SynapseError>;
