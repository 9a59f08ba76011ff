/// Volume level: storage and box locking for a single mip level
///
/// A VolumeLevel owns the pixel storage of one level of a volume texture.
/// Storage is laid out slice by slice, each slice row by row, each row block
/// by block:
///
/// - row pitch: blocks across the level width × bytes per block
/// - slice pitch: row pitch × blocks down the level height
///
/// Both pitches are computed once at construction and reused by every lock.
///
/// Locking is a logical state machine (`Unlocked` → `Locked` → `Unlocked`),
/// not a synchronization primitive: cross-thread use of a level requires
/// external synchronization.

use glam::UVec3;
use crate::error::{Error, Result};
use crate::engine_bail;
use crate::format::{Format, FormatInfo};
use crate::resource::dirty_region::DirtyRegionTracker;
use crate::resource::volume_box::{LockFlags, Pool, ResourceType, Usage, VolumeBox};

// ===== DESCRIPTORS =====

/// Description of a volume level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VolumeDesc {
    pub format: Format,
    pub resource_type: ResourceType,
    pub usage: Usage,
    pub pool: Pool,
    /// Storage size in bytes
    pub size: u64,
    pub width: u32,
    pub height: u32,
    pub depth: u32,
}

/// Addressing information returned by a successful lock
///
/// The texel block at `(x, y, z)` inside the locked box starts at
/// `offset + (z - front) * slice_pitch + (y - top) / block_height * row_pitch
/// + (x - left) / block_width * block_bytes` in the level storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockedBox {
    /// Byte offset of the box origin inside the level storage
    pub offset: usize,
    pub row_pitch: u32,
    pub slice_pitch: u32,
    /// Locked region
    pub region: VolumeBox,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LockState {
    Unlocked,
    Locked { locked: LockedBox, flags: LockFlags },
}

// ===== VOLUME LEVEL =====

/// Storage for one mip level of a volume texture
#[derive(Debug)]
pub struct VolumeLevel {
    level: u32,
    extent: UVec3,
    format: Format,
    format_info: FormatInfo,
    usage: Usage,
    pool: Pool,
    row_pitch: u32,
    slice_pitch: u32,
    data: Vec<u8>,
    lock: LockState,
    dirty: DirtyRegionTracker,
}

/// Storage layout of a level: (row pitch, slice pitch, total bytes)
///
/// Fails with `OutOfMemory` when any quantity overflows.
pub(crate) fn level_layout(format_info: &FormatInfo, extent: UVec3) -> Result<(u32, u32, u64)> {
    let row_pitch = format_info.row_pitch(extent.x);
    let slice_pitch = format_info.slice_pitch(extent.x, extent.y);
    let size = slice_pitch
        .checked_mul(extent.z as u64)
        .ok_or(Error::OutOfMemory)?;
    let row_pitch = u32::try_from(row_pitch).map_err(|_| Error::OutOfMemory)?;
    let slice_pitch = u32::try_from(slice_pitch).map_err(|_| Error::OutOfMemory)?;
    Ok((row_pitch, slice_pitch, size))
}

impl VolumeLevel {
    /// Allocate a level of the given extent, filled with `clear_value`
    pub(crate) fn new(
        level: u32,
        extent: UVec3,
        format: Format,
        usage: Usage,
        pool: Pool,
        clear_value: u8,
    ) -> Result<Self> {
        let format_info = format.info();
        let (row_pitch, slice_pitch, size) = level_layout(&format_info, extent)?;
        let size = usize::try_from(size).map_err(|_| Error::OutOfMemory)?;

        let mut data = Vec::new();
        data.try_reserve_exact(size).map_err(|_| Error::OutOfMemory)?;
        data.resize(size, clear_value);

        Ok(Self {
            level,
            extent,
            format,
            format_info,
            usage,
            pool,
            row_pitch,
            slice_pitch,
            data,
            lock: LockState::Unlocked,
            dirty: DirtyRegionTracker::new(),
        })
    }

    // ===== ACCESSORS =====

    /// Mip level index within the owning texture
    pub fn level(&self) -> u32 { self.level }

    pub fn width(&self) -> u32 { self.extent.x }

    pub fn height(&self) -> u32 { self.extent.y }

    pub fn depth(&self) -> u32 { self.extent.z }

    /// Level extent (width, height, depth)
    pub fn extent(&self) -> UVec3 { self.extent }

    pub fn format(&self) -> Format { self.format }

    /// Bytes between consecutive block rows
    pub fn row_pitch(&self) -> u32 { self.row_pitch }

    /// Bytes between consecutive depth slices
    pub fn slice_pitch(&self) -> u32 { self.slice_pitch }

    /// Storage size in bytes
    pub fn size(&self) -> u64 { self.data.len() as u64 }

    pub fn resource_type(&self) -> ResourceType { ResourceType::Volume }

    /// Level description
    pub fn desc(&self) -> VolumeDesc {
        VolumeDesc {
            format: self.format,
            resource_type: ResourceType::Volume,
            usage: self.usage,
            pool: self.pool,
            size: self.size(),
            width: self.extent.x,
            height: self.extent.y,
            depth: self.extent.z,
        }
    }

    /// Whole level storage, for the device pipeline
    pub fn data(&self) -> &[u8] { &self.data }

    /// Byte offset of the block containing texel `(x, y, z)`
    pub fn texel_offset(&self, x: u32, y: u32, z: u32) -> usize {
        z as usize * self.slice_pitch as usize
            + (y / self.format_info.block_height) as usize * self.row_pitch as usize
            + (x / self.format_info.block_width) as usize * self.format_info.block_bytes as usize
    }

    // ===== LOCKING =====

    pub fn is_locked(&self) -> bool {
        matches!(self.lock, LockState::Locked { .. })
    }

    /// Addressing information of the outstanding lock, if any
    pub fn locked_box(&self) -> Option<LockedBox> {
        match self.lock {
            LockState::Locked { locked, .. } => Some(locked),
            LockState::Unlocked => None,
        }
    }

    /// Flags of the outstanding lock, if any
    pub fn lock_flags(&self) -> Option<LockFlags> {
        match self.lock {
            LockState::Locked { flags, .. } => Some(flags),
            LockState::Unlocked => None,
        }
    }

    /// Lock a box of this level for direct access
    ///
    /// `None` locks the whole level. Unless `flags` contains `READ_ONLY` or
    /// `NO_DIRTY_UPDATE`, the locked box is merged into the dirty region.
    ///
    /// # Errors
    ///
    /// - `InvalidBox` if the box is empty, out of bounds, or not aligned to
    ///   the format's block size
    /// - `AlreadyLocked` if the level already has an outstanding lock
    ///
    /// A failed lock leaves the lock state untouched.
    pub fn lock_box(&mut self, region: Option<&VolumeBox>, flags: LockFlags) -> Result<LockedBox> {
        let region = region.copied().unwrap_or_else(|| VolumeBox::full(self.extent));
        self.validate_lock_region(&region)?;

        if self.is_locked() {
            engine_bail!("sw3d::VolumeLevel", Error::AlreadyLocked { level: self.level });
        }

        let locked = LockedBox {
            offset: self.texel_offset(region.left, region.top, region.front),
            row_pitch: self.row_pitch,
            slice_pitch: self.slice_pitch,
            region,
        };
        self.lock = LockState::Locked { locked, flags };

        if !flags.intersects(LockFlags::READ_ONLY | LockFlags::NO_DIRTY_UPDATE) {
            self.dirty.add(&region);
        }

        crate::engine_trace!("sw3d::VolumeLevel",
            "Locked level {} box {:?} at offset {}", self.level, region, locked.offset);

        Ok(locked)
    }

    /// Release the outstanding lock
    ///
    /// # Errors
    ///
    /// `NotLocked` if the level has no outstanding lock.
    pub fn unlock_box(&mut self) -> Result<()> {
        if !self.is_locked() {
            engine_bail!("sw3d::VolumeLevel", Error::NotLocked { level: self.level });
        }
        self.lock = LockState::Unlocked;
        crate::engine_trace!("sw3d::VolumeLevel", "Unlocked level {}", self.level);
        Ok(())
    }

    /// Bytes spanned by the locked box, starting at the box origin
    pub fn locked_bytes(&self) -> Result<&[u8]> {
        let range = self.locked_range()?;
        Ok(&self.data[range])
    }

    /// Mutable bytes spanned by the locked box, starting at the box origin
    ///
    /// # Errors
    ///
    /// - `NotLocked` if the level has no outstanding lock
    /// - `InvalidCall` if the lock was taken with `READ_ONLY`
    pub fn locked_bytes_mut(&mut self) -> Result<&mut [u8]> {
        if self.lock_flags().is_some_and(|flags| flags.contains(LockFlags::READ_ONLY)) {
            engine_bail!("sw3d::VolumeLevel", Error::InvalidCall(
                format!("level {} is locked read-only", self.level)));
        }
        let range = self.locked_range()?;
        Ok(&mut self.data[range])
    }

    /// Raw pointer to the origin of the locked box
    ///
    /// # Safety
    ///
    /// - The pointer is only valid until the level is unlocked or moved
    /// - No bounds checking on subsequent accesses; callers must stay within
    ///   the locked box using the returned pitches
    pub unsafe fn locked_ptr(&mut self) -> Option<*mut u8> {
        let locked = self.locked_box()?;
        Some(self.data.as_mut_ptr().add(locked.offset))
    }

    fn locked_range(&self) -> Result<std::ops::Range<usize>> {
        let locked = match self.lock {
            LockState::Locked { locked, .. } => locked,
            LockState::Unlocked => {
                engine_bail!("sw3d::VolumeLevel", Error::NotLocked { level: self.level });
            }
        };
        let region = locked.region;
        let last_block_end = self.texel_offset(region.right - 1, region.bottom - 1, region.back - 1)
            + self.format_info.block_bytes as usize;
        Ok(locked.offset..last_block_end)
    }

    fn validate_lock_region(&self, region: &VolumeBox) -> Result<()> {
        if let Err(msg) = region.validate_within(self.extent) {
            engine_bail!("sw3d::VolumeLevel", Error::InvalidBox(
                format!("level {}: {}", self.level, msg)));
        }

        if self.format_info.is_block_compressed() {
            let bw = self.format_info.block_width;
            let bh = self.format_info.block_height;
            let aligned = region.left % bw == 0
                && region.top % bh == 0
                && (region.right % bw == 0 || region.right == self.extent.x)
                && (region.bottom % bh == 0 || region.bottom == self.extent.y);
            if !aligned {
                engine_bail!("sw3d::VolumeLevel", Error::InvalidBox(format!(
                    "level {}: box {:?} not aligned to {}x{} blocks of {:?}",
                    self.level, region, bw, bh, self.format)));
            }
        }
        Ok(())
    }

    // ===== DIRTY REGION =====

    /// Merge a box into the dirty region (`None` marks the whole level)
    ///
    /// # Errors
    ///
    /// `InvalidBox` if the box is empty or out of bounds.
    pub fn add_dirty_box(&mut self, region: Option<&VolumeBox>) -> Result<()> {
        let region = region.copied().unwrap_or_else(|| VolumeBox::full(self.extent));
        if let Err(msg) = region.validate_within(self.extent) {
            engine_bail!("sw3d::VolumeLevel", Error::InvalidBox(
                format!("dirty box on level {}: {}", self.level, msg)));
        }
        self.dirty.add(&region);
        Ok(())
    }

    /// Region modified since the last clear, `None` when clean
    pub fn dirty_region(&self) -> Option<VolumeBox> {
        self.dirty.region()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty.is_dirty()
    }

    /// Mark the level as synchronized
    pub fn clear_dirty(&mut self) {
        self.dirty.clear();
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "volume_tests.rs"]
mod tests;
