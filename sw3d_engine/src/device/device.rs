/// Device trait and device configuration

use crate::format::Format;

/// Device configuration
#[derive(Debug, Clone)]
pub struct DeviceConfig {
    /// Human-readable device name
    pub device_name: String,
    /// Largest accepted width, height or depth for a volume resource
    pub max_volume_extent: u32,
    /// Largest accepted total storage for a single resource (bytes)
    pub max_resource_bytes: u64,
    /// Byte value written into freshly allocated level storage
    pub clear_value: u8,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            device_name: "SW3D Software Device".to_string(),
            max_volume_extent: 8192,
            max_resource_bytes: 1 << 30,
            clear_value: 0,
        }
    }
}

/// Device owning resources
///
/// Resources keep a non-owning reference to their device and only use it
/// for queries (configuration, format support, identity).
pub trait Device: Send + Sync {
    /// Configuration the device was created with
    fn config(&self) -> &DeviceConfig;

    /// Device name
    fn name(&self) -> &str {
        &self.config().device_name
    }

    /// Whether the device can create volume resources in `format`
    fn supports_volume_format(&self, format: Format) -> bool {
        format.supports_volume()
    }
}
