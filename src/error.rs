//! Error types for ring-attractor

use thiserror::Error;

/// Which side of the reference id lacks a fixed point
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flank {
    /// No fixed point strictly above the reference
    Above,
    /// No fixed point strictly below the reference
    Below,
}

impl std::fmt::Display for Flank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Flank::Above => f.write_str("above"),
            Flank::Below => f.write_str("below"),
        }
    }
}

/// Ring attractor error type
#[derive(Debug, Error)]
pub enum RingError {
    /// Invalid configuration, rejected before any simulation starts
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Midpoint heuristic found no fixed point flanking the reference id
    #[error("Bounds error: no fixed point {side} reference neuron {reference}")]
    Bounds { reference: usize, side: Flank },

    /// No tick in the trailing window contained a spike
    #[error("Undefined decode: no spikes in the last {window} ticks")]
    UndefinedDecode { window: usize },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl RingError {
    /// Shorthand for a configuration error
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, RingError>;
