/// Box regions, lock flags and resource classification shared by volume resources

use bitflags::bitflags;
use glam::UVec3;

// ===== VOLUME BOX =====

/// Axis-aligned region of a volume, in texels
///
/// Bounds are half-open: a box covers `left..right`, `top..bottom`,
/// `front..back`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VolumeBox {
    pub left: u32,
    pub top: u32,
    pub front: u32,
    pub right: u32,
    pub bottom: u32,
    pub back: u32,
}

impl VolumeBox {
    /// Create a box from its bounds
    pub fn new(left: u32, top: u32, front: u32, right: u32, bottom: u32, back: u32) -> Self {
        Self { left, top, front, right, bottom, back }
    }

    /// Box covering a whole volume of the given extent
    pub fn full(extent: UVec3) -> Self {
        Self::new(0, 0, 0, extent.x, extent.y, extent.z)
    }

    pub fn width(&self) -> u32 {
        self.right.saturating_sub(self.left)
    }

    pub fn height(&self) -> u32 {
        self.bottom.saturating_sub(self.top)
    }

    pub fn depth(&self) -> u32 {
        self.back.saturating_sub(self.front)
    }

    /// Minimum corner (left, top, front)
    pub fn min(&self) -> UVec3 {
        UVec3::new(self.left, self.top, self.front)
    }

    /// Maximum corner (right, bottom, back), exclusive
    pub fn max(&self) -> UVec3 {
        UVec3::new(self.right, self.bottom, self.back)
    }

    /// Check that the box is non-empty on every axis and lies within `extent`
    ///
    /// Returns a description of the first violated bound.
    pub fn validate_within(&self, extent: UVec3) -> Result<(), String> {
        if self.left >= self.right || self.right > extent.x {
            return Err(format!(
                "horizontal bounds {}..{} invalid for width {}",
                self.left, self.right, extent.x
            ));
        }
        if self.top >= self.bottom || self.bottom > extent.y {
            return Err(format!(
                "vertical bounds {}..{} invalid for height {}",
                self.top, self.bottom, extent.y
            ));
        }
        if self.front >= self.back || self.back > extent.z {
            return Err(format!(
                "depth bounds {}..{} invalid for depth {}",
                self.front, self.back, extent.z
            ));
        }
        Ok(())
    }

    /// Smallest box containing both boxes
    pub fn union(&self, other: &VolumeBox) -> VolumeBox {
        VolumeBox {
            left: self.left.min(other.left),
            top: self.top.min(other.top),
            front: self.front.min(other.front),
            right: self.right.max(other.right),
            bottom: self.bottom.max(other.bottom),
            back: self.back.max(other.back),
        }
    }

    /// Whether `other` lies entirely within this box
    pub fn contains(&self, other: &VolumeBox) -> bool {
        self.left <= other.left && self.right >= other.right
        && self.top <= other.top && self.bottom >= other.bottom
        && self.front <= other.front && self.back >= other.back
    }
}

// ===== FLAGS =====

bitflags! {
    /// Resource usage flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Usage: u32 {
        const RENDER_TARGET       = 1 << 0;
        const DEPTH_STENCIL       = 1 << 1;
        const WRITE_ONLY          = 1 << 3;
        const SOFTWARE_PROCESSING = 1 << 4;
        const DYNAMIC             = 1 << 9;
    }
}

bitflags! {
    /// Flags accepted by box locking
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct LockFlags: u32 {
        /// The caller only reads; the locked region is not marked dirty
        const READ_ONLY       = 1 << 4;
        /// The previous contents may be discarded
        const DISCARD         = 1 << 13;
        /// The caller promises not to overwrite data in use
        const NO_OVERWRITE    = 1 << 12;
        const NO_SYSLOCK      = 1 << 11;
        /// Do not merge the locked region into the dirty region
        const NO_DIRTY_UPDATE = 1 << 15;
    }
}

// ===== POOL / TYPE =====

/// Memory pool classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Pool {
    #[default]
    Default,
    Managed,
    SystemMem,
    Scratch,
}

/// Resource type reported by resource queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceType {
    Surface,
    Volume,
    Texture,
    VolumeTexture,
    CubeTexture,
    VertexBuffer,
    IndexBuffer,
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "volume_box_tests.rs"]
mod tests;
