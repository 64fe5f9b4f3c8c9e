//! Error types for spherical array processing

use thiserror::Error;

/// Errors reported by the basis and operator builders.
///
/// Configuration errors (`UnknownArrayType`, `DirectionLengthMismatch`) are
/// rejected before any computation starts. Domain errors surface from the
/// special-function layer and are propagated unchanged, never clamped.
#[derive(Error, Debug)]
pub enum SphError {
    /// Unknown array configuration selector
    #[error("Unknown array type: '{0}' (expected 'open', 'rigid' or 'cardioid')")]
    UnknownArrayType(String),

    /// Colatitude and azimuth arrays differ in length
    #[error("Direction length mismatch: {colatitude} colatitudes, {azimuth} azimuths")]
    DirectionLengthMismatch { colatitude: usize, azimuth: usize },

    /// Argument outside the valid mathematical domain
    #[error("Domain error: {0}")]
    Domain(String),
}

/// Result type for spherical array operations
pub type SphResult<T> = Result<T, SphError>;
