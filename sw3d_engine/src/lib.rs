/*!
# SW3D Engine

Resource core of a software graphics device.

All resources live in system memory and are manipulated directly by the CPU.
This crate currently provides volume (3D) textures: a mip chain of volumetric
levels with box locking and dirty-region tracking for partial updates.

## Architecture

- **Device**: trait for the owning device (configuration and format queries)
- **SoftwareDevice**: CPU-backed device and resource factory
- **VolumeTexture**: mip chain of volume levels, LOD and priority state
- **VolumeLevel**: storage, pitches, lock state and dirty region of one level
- **Format**: pixel format catalog (block size and bytes per block)

Resources are not internally synchronized: callers serialize access to a
texture, and the lock state of a level is a logical contract only.
*/

// Internal modules
mod error;
mod engine;
pub mod log;
pub mod format;
pub mod device;
pub mod resource;

// Main sw3d namespace module
pub mod sw3d {
    // Error types
    pub use crate::error::{Error, Result};

    // Engine-wide services
    pub use crate::engine::Engine;

    // Logging sub-module (types only, NOT macros)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
    }

    // Pixel format catalog
    pub mod format {
        pub use crate::format::*;
    }

    // Device sub-module
    pub mod device {
        pub use crate::device::*;
    }

    // Resource sub-module
    pub mod resource {
        pub use crate::resource::*;
    }
}

// Re-export math library at crate root
pub use glam;
