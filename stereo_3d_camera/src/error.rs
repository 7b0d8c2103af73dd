//! Error types for the Stereo3D camera pipeline
//!
//! The transform math itself never fails: degenerate input yields a degenerate
//! matrix. These errors cover the checked paths (strict update, slot reads,
//! parameter validation).

use std::fmt;
use crate::camera::Eye;
use crate::state::RenderingMode;

/// Result type for Stereo3D operations
pub type Result<T> = std::result::Result<T, Error>;

/// Stereo3D errors
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Clip bounds with a zero-width, zero-height or zero-depth extent
    InvalidFrustum(String),

    /// Look direction of zero length or parallel to world up
    DegenerateView(String),

    /// Eye slot that the current rendering mode does not compute
    UnpopulatedSlot {
        eye: Eye,
        mode: Option<RenderingMode>,
    },

    /// Display or post-process parameter out of range
    InvalidParameter(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidFrustum(msg) => write!(f, "Invalid frustum: {}", msg),
            Error::DegenerateView(msg) => write!(f, "Degenerate view: {}", msg),
            Error::UnpopulatedSlot { eye, mode: Some(mode) } => {
                write!(f, "Unpopulated slot: {:?} eye is not rendered in {:?} mode", eye, mode)
            }
            Error::UnpopulatedSlot { eye, mode: None } => {
                write!(f, "Unpopulated slot: {:?} eye requested before the first update", eye)
            }
            Error::InvalidParameter(msg) => write!(f, "Invalid parameter: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
