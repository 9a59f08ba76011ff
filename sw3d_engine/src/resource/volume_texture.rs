/// Volume texture: a mip chain of volume levels owned by a single resource.
///
/// Architecture:
/// - Levels: fixed-capacity array of `MAX_LEVELS` slots, the first
///   `level_count` populated at creation and never replaced
/// - Level extents: `max(1, base >> i)` on every axis
/// - Device: non-owning reference, used for queries only
/// - Locking and dirty tracking are delegated to each VolumeLevel
///
/// Creation is all-or-nothing: either every level is allocated or no texture
/// is returned.

use std::sync::{Arc, Weak};
use glam::UVec3;
use crate::device::Device;
use crate::error::{Error, Result};
use crate::engine_bail;
use crate::format::Format;
use crate::resource::private_data::PrivateDataStore;
use crate::resource::volume::{level_layout, LockedBox, VolumeDesc, VolumeLevel};
use crate::resource::volume_box::{LockFlags, Pool, ResourceType, Usage, VolumeBox};

/// Maximum number of mip levels a texture can hold
pub const MAX_LEVELS: usize = 14;

// ===== TEXTURE DESC =====

/// Descriptor for creating a volume texture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VolumeTextureDesc {
    /// Level 0 width in texels
    pub width: u32,
    /// Level 0 height in texels
    pub height: u32,
    /// Level 0 depth in texels
    pub depth: u32,
    /// Requested mip level count (0 = full chain)
    pub levels: u32,
    pub usage: Usage,
    pub format: Format,
    pub pool: Pool,
}

/// Length of the full mip chain for a base extent: halving the largest axis
/// until it reaches 1, capped to `MAX_LEVELS`
pub fn natural_level_count(extent: UVec3) -> u32 {
    let largest = extent.max_element().max(1);
    (u32::BITS - largest.leading_zeros()).min(MAX_LEVELS as u32)
}

/// Extent of mip level `level` for a base extent
pub fn mip_extent(extent: UVec3, level: u32) -> UVec3 {
    UVec3::new(
        (extent.x >> level).max(1),
        (extent.y >> level).max(1),
        (extent.z >> level).max(1),
    )
}

// ===== VOLUME TEXTURE =====

/// Volume texture resource
pub struct VolumeTexture {
    device: Weak<dyn Device>,
    extent: UVec3,
    format: Format,
    pool: Pool,
    usage: Usage,
    level_count: u32,
    lod: u32,
    priority: u32,
    levels: [Option<VolumeLevel>; MAX_LEVELS],
    private_data: PrivateDataStore,
}

impl VolumeTexture {
    /// Create a volume texture owned by `device`
    ///
    /// # Errors
    ///
    /// - `InvalidParameter` for a zero or oversized extent, a level count
    ///   above `MAX_LEVELS`, or render-target/depth-stencil usage
    /// - `UnsupportedFormat` if the device cannot create volumes in `format`
    /// - `OutOfMemory` if storage exceeds the device budget or cannot be
    ///   allocated
    pub fn new(device: &Arc<dyn Device>, desc: VolumeTextureDesc) -> Result<Self> {
        let config = device.config();
        let extent = UVec3::new(desc.width, desc.height, desc.depth);

        // ========== VALIDATION ==========
        if extent.min_element() == 0 {
            engine_bail!("sw3d::VolumeTexture", Error::InvalidParameter(format!(
                "extent {}x{}x{} has a zero dimension", extent.x, extent.y, extent.z)));
        }
        if extent.max_element() > config.max_volume_extent {
            engine_bail!("sw3d::VolumeTexture", Error::InvalidParameter(format!(
                "extent {}x{}x{} exceeds device maximum {}",
                extent.x, extent.y, extent.z, config.max_volume_extent)));
        }
        if !device.supports_volume_format(desc.format) {
            engine_bail!("sw3d::VolumeTexture", Error::UnsupportedFormat(desc.format));
        }
        if desc.usage.intersects(Usage::RENDER_TARGET | Usage::DEPTH_STENCIL) {
            engine_bail!("sw3d::VolumeTexture", Error::InvalidParameter(format!(
                "usage {:?} not allowed for volume textures", desc.usage)));
        }
        if desc.levels as usize > MAX_LEVELS {
            engine_bail!("sw3d::VolumeTexture", Error::InvalidParameter(format!(
                "{} levels requested, maximum is {}", desc.levels, MAX_LEVELS)));
        }

        // ========== LEVEL COUNT ==========
        let natural = natural_level_count(extent);
        let level_count = match desc.levels {
            0 => natural,
            requested if requested > natural => {
                crate::engine_warn!("sw3d::VolumeTexture",
                    "Clamping {} requested levels to full chain length {}", requested, natural);
                natural
            }
            requested => requested,
        };

        // ========== MEMORY BUDGET ==========
        let format_info = desc.format.info();
        let mut total_bytes: u64 = 0;
        for level in 0..level_count {
            let (_, _, size) = level_layout(&format_info, mip_extent(extent, level))
                .map_err(|err| crate::engine_err!("sw3d::VolumeTexture", err))?;
            total_bytes = total_bytes.saturating_add(size);
        }
        if total_bytes > config.max_resource_bytes {
            engine_bail!("sw3d::VolumeTexture", Error::OutOfMemory);
        }

        // ========== ALLOCATE LEVELS ==========
        let mut levels: [Option<VolumeLevel>; MAX_LEVELS] = std::array::from_fn(|_| None);
        for (index, slot) in levels.iter_mut().take(level_count as usize).enumerate() {
            let level = index as u32;
            let volume = VolumeLevel::new(
                level,
                mip_extent(extent, level),
                desc.format,
                desc.usage,
                desc.pool,
                config.clear_value,
            ).map_err(|err| crate::engine_err!("sw3d::VolumeTexture", err))?;
            *slot = Some(volume);
        }

        crate::engine_debug!("sw3d::VolumeTexture",
            "Created {}x{}x{} {:?} volume texture with {} levels ({} bytes) on '{}'",
            extent.x, extent.y, extent.z, desc.format, level_count, total_bytes, device.name());

        Ok(Self {
            device: Arc::downgrade(device),
            extent,
            format: desc.format,
            pool: desc.pool,
            usage: desc.usage,
            level_count,
            lod: 0,
            priority: 0,
            levels,
            private_data: PrivateDataStore::new(),
        })
    }

    // ===== RESOURCE =====

    /// Owning device
    ///
    /// # Errors
    ///
    /// `InvalidCall` if the device has already been dropped.
    pub fn device(&self) -> Result<Arc<dyn Device>> {
        match self.device.upgrade() {
            Some(device) => Ok(device),
            None => engine_bail!("sw3d::VolumeTexture",
                Error::InvalidCall("owning device has been released".to_string())),
        }
    }

    pub fn resource_type(&self) -> ResourceType { ResourceType::VolumeTexture }

    /// Set the eviction priority and return the previous one
    ///
    /// Only managed resources carry a priority; other pools keep 0.
    pub fn set_priority(&mut self, priority: u32) -> u32 {
        if self.pool != Pool::Managed {
            return 0;
        }
        std::mem::replace(&mut self.priority, priority)
    }

    pub fn priority(&self) -> u32 { self.priority }

    /// Hint that the texture is about to be used
    ///
    /// Software resources are always resident, so there is nothing to load.
    pub fn preload(&self) {
        crate::engine_trace!("sw3d::VolumeTexture", "Preload on resident volume texture");
    }

    /// Attach an opaque blob under a 128-bit identifier
    pub fn set_private_data(&mut self, guid: u128, data: &[u8]) {
        self.private_data.set(guid, data);
    }

    /// Blob attached under `guid`
    pub fn private_data(&self, guid: u128) -> Result<&[u8]> {
        self.private_data.get(guid)
    }

    /// Remove the blob attached under `guid`
    pub fn free_private_data(&mut self, guid: u128) -> Result<()> {
        self.private_data.free(guid)
    }

    // ===== ACCESSORS =====

    pub fn width(&self) -> u32 { self.extent.x }

    pub fn height(&self) -> u32 { self.extent.y }

    pub fn depth(&self) -> u32 { self.extent.z }

    /// Level 0 extent
    pub fn extent(&self) -> UVec3 { self.extent }

    pub fn format(&self) -> Format { self.format }

    pub fn pool(&self) -> Pool { self.pool }

    pub fn usage(&self) -> Usage { self.usage }

    /// Number of mip levels
    pub fn level_count(&self) -> u32 { self.level_count }

    // ===== LEVEL OF DETAIL =====

    /// Currently selected level of detail
    pub fn lod(&self) -> u32 { self.lod }

    /// Select a level of detail, clamped to `[0, level_count)`
    ///
    /// Returns the effective value.
    pub fn set_lod(&mut self, lod: u32) -> u32 {
        self.lod = lod.min(self.level_count - 1);
        self.lod
    }

    // ===== LEVELS =====

    /// Description of a level
    pub fn level_desc(&self, level: u32) -> Result<VolumeDesc> {
        Ok(self.volume_level(level)?.desc())
    }

    /// Borrow a level
    ///
    /// # Errors
    ///
    /// `OutOfRange` if `level >= level_count`.
    pub fn volume_level(&self, level: u32) -> Result<&VolumeLevel> {
        match self.internal_volume_level(level) {
            Some(volume) => Ok(volume),
            None => engine_bail!("sw3d::VolumeTexture",
                Error::OutOfRange { level, levels: self.level_count }),
        }
    }

    /// Mutably borrow a level
    pub fn volume_level_mut(&mut self, level: u32) -> Result<&mut VolumeLevel> {
        let levels = self.level_count;
        match self.internal_volume_level_mut(level) {
            Some(volume) => Ok(volume),
            None => engine_bail!("sw3d::VolumeTexture", Error::OutOfRange { level, levels }),
        }
    }

    /// Level lookup for the device pipeline, without error reporting
    pub fn internal_volume_level(&self, level: u32) -> Option<&VolumeLevel> {
        if level >= self.level_count {
            return None;
        }
        self.levels.get(level as usize).and_then(Option::as_ref)
    }

    /// Mutable level lookup for the device pipeline, without error reporting
    pub fn internal_volume_level_mut(&mut self, level: u32) -> Option<&mut VolumeLevel> {
        if level >= self.level_count {
            return None;
        }
        self.levels.get_mut(level as usize).and_then(Option::as_mut)
    }

    /// Iterate over the populated levels in order
    pub fn volume_levels(&self) -> impl Iterator<Item = &VolumeLevel> {
        self.levels.iter().take(self.level_count as usize).flatten()
    }

    // ===== LOCKING =====

    /// Lock a box of a level (`None` locks the whole level)
    ///
    /// # Errors
    ///
    /// - `OutOfRange` if `level >= level_count`
    /// - `InvalidBox` if the box is malformed or out of bounds
    /// - `AlreadyLocked` if the level already has an outstanding lock
    pub fn lock_box(&mut self, level: u32, region: Option<&VolumeBox>, flags: LockFlags) -> Result<LockedBox> {
        self.volume_level_mut(level)?.lock_box(region, flags)
    }

    /// Release the outstanding lock of a level
    ///
    /// # Errors
    ///
    /// - `OutOfRange` if `level >= level_count`
    /// - `NotLocked` if the level has no outstanding lock
    pub fn unlock_box(&mut self, level: u32) -> Result<()> {
        self.volume_level_mut(level)?.unlock_box()
    }

    // ===== DIRTY REGIONS =====

    /// Report a modified box of the base level (`None` marks it entirely)
    pub fn add_dirty_box(&mut self, region: Option<&VolumeBox>) -> Result<()> {
        self.volume_level_mut(0)?.add_dirty_box(region)
    }

    /// Dirty region of a level, `None` when clean
    pub fn dirty_region(&self, level: u32) -> Result<Option<VolumeBox>> {
        Ok(self.volume_level(level)?.dirty_region())
    }

    /// Whether any level has a pending dirty region
    pub fn is_dirty(&self) -> bool {
        self.volume_levels().any(VolumeLevel::is_dirty)
    }

    /// Mark every level as synchronized
    pub fn clear_dirty_regions(&mut self) {
        let count = self.level_count as usize;
        for volume in self.levels.iter_mut().take(count).flatten() {
            volume.clear_dirty();
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "volume_texture_tests.rs"]
mod tests;
