//! Error taxonomy for the geometry solver, balance step and driver.

use thiserror::Error;

/// Errors raised while validating inputs or running a simulation.
///
/// Each variant is a distinct class so callers can map them to distinct
/// client-visible failures.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BalanceError {
    /// Basin shape cannot describe a frustum.
    #[error("invalid basin geometry: base = {base}, slope = {slope} (need base >= 0 and slope > 0)")]
    InvalidGeometry { base: f64, slope: f64 },

    /// Negative or non-finite volume handed to the geometry solver.
    #[error("invalid volume: {volume} (need a finite, non-negative volume)")]
    InvalidVolume { volume: f64 },

    /// Non-finite depth, or a depth below the apex of the virtual pyramid.
    #[error("invalid depth: {depth} (need a finite depth >= {min_depth})")]
    InvalidDepth { depth: f64, min_depth: f64 },

    /// Missing, non-numeric or out-of-range configuration value.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// Forcing table has the wrong shape or contains non-finite values.
    #[error("malformed forcing at row {row}: {reason}")]
    MalformedForcing { row: usize, reason: String },
}

pub type Result<T> = std::result::Result<T, BalanceError>;
