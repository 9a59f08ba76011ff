/// Software device: CPU-backed implementation of the Device trait

use std::sync::Arc;
use crate::device::{Device, DeviceConfig};
use crate::error::Result;
use crate::resource::{VolumeTexture, VolumeTextureDesc};

/// Device whose resources live entirely in system memory
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use sw3d_engine::sw3d::device::{SoftwareDevice, DeviceConfig};
/// use sw3d_engine::sw3d::format::Format;
/// use sw3d_engine::sw3d::resource::{VolumeTextureDesc, Usage, Pool};
///
/// let device = Arc::new(SoftwareDevice::new(DeviceConfig::default()));
/// let texture = device.create_volume_texture(VolumeTextureDesc {
///     width: 64,
///     height: 64,
///     depth: 8,
///     levels: 0,
///     usage: Usage::empty(),
///     format: Format::A8R8G8B8,
///     pool: Pool::Managed,
/// })?;
/// assert_eq!(texture.level_count(), 7);
/// # Ok::<(), sw3d_engine::sw3d::Error>(())
/// ```
pub struct SoftwareDevice {
    config: DeviceConfig,
}

impl SoftwareDevice {
    /// Create a new software device
    pub fn new(config: DeviceConfig) -> Self {
        crate::engine_info!("sw3d::SoftwareDevice", "Created device '{}'", config.device_name);
        Self { config }
    }

    /// Create a volume texture owned by this device
    ///
    /// The texture keeps a non-owning reference to the device; the caller
    /// must keep the device alive for as long as it queries the texture's
    /// device.
    pub fn create_volume_texture(self: &Arc<Self>, desc: VolumeTextureDesc) -> Result<VolumeTexture> {
        let device: Arc<dyn Device> = self.clone();
        VolumeTexture::new(&device, desc)
    }
}

impl Device for SoftwareDevice {
    fn config(&self) -> &DeviceConfig {
        &self.config
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "software_device_tests.rs"]
mod tests;
