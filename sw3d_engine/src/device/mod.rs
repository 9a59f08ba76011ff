//! Device module
//!
//! Device trait, configuration, and the software device implementation.

pub mod device;
pub mod software_device;

pub use device::{Device, DeviceConfig};
pub use software_device::SoftwareDevice;
