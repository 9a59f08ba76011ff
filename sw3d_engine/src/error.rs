//! Error types for the SW3D engine
//!
//! This module defines the error type returned by every fallible resource
//! operation (creation, level queries, box locking, private data).

use std::fmt;
use crate::format::Format;

/// Result type for SW3D engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// SW3D engine errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Bad creation arguments (zero extent, bad level count, bad usage)
    InvalidParameter(String),

    /// Level index beyond the texture's level count
    OutOfRange { level: u32, levels: u32 },

    /// Malformed or out-of-bounds lock region
    InvalidBox(String),

    /// The level already has an outstanding lock
    AlreadyLocked { level: u32 },

    /// The level has no outstanding lock
    NotLocked { level: u32 },

    /// Format cannot back a volume resource
    UnsupportedFormat(Format),

    /// Storage allocation failed or exceeds the device budget
    OutOfMemory,

    /// Operation not valid in the current state
    InvalidCall(String),

    /// Lookup key not present
    NotFound(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidParameter(msg) => write!(f, "Invalid parameter: {}", msg),
            Error::OutOfRange { level, levels } => {
                write!(f, "Level {} out of range (levels: {})", level, levels)
            }
            Error::InvalidBox(msg) => write!(f, "Invalid box: {}", msg),
            Error::AlreadyLocked { level } => write!(f, "Level {} is already locked", level),
            Error::NotLocked { level } => write!(f, "Level {} is not locked", level),
            Error::UnsupportedFormat(format) => {
                write!(f, "Unsupported volume format: {:?}", format)
            }
            Error::OutOfMemory => write!(f, "Out of memory"),
            Error::InvalidCall(msg) => write!(f, "Invalid call: {}", msg),
            Error::NotFound(msg) => write!(f, "Not found: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

// ===== ERROR MACROS =====

/// Log an error with file:line information and evaluate to it
///
/// # Example
///
/// ```ignore
/// let err = engine_err!("sw3d::VolumeTexture", Error::OutOfMemory);
/// ```
#[macro_export]
macro_rules! engine_err {
    ($source:expr, $err:expr) => {{
        let err: $crate::sw3d::Error = $err;
        $crate::engine_error!($source, "{}", err);
        err
    }};
}

/// Log an error with file:line information and return it as `Err`
///
/// # Example
///
/// ```ignore
/// engine_bail!("sw3d::VolumeLevel", Error::NotLocked { level: 2 });
/// ```
#[macro_export]
macro_rules! engine_bail {
    ($source:expr, $err:expr) => {
        return Err($crate::engine_err!($source, $err))
    };
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
