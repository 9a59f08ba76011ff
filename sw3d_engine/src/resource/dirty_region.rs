/// Dirty-region accumulation for volume levels
///
/// Reported boxes are folded into their bounding union, so merging is O(1)
/// and the tracker never grows. The device pipeline reads the region when it
/// synchronises the level and clears it afterwards.

use crate::resource::volume_box::VolumeBox;

/// Bounding union of every box reported as modified since the last clear
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirtyRegionTracker {
    region: Option<VolumeBox>,
}

impl DirtyRegionTracker {
    /// Create a clean tracker
    pub fn new() -> Self {
        Self { region: None }
    }

    /// Merge a modified box into the region
    pub fn add(&mut self, dirty: &VolumeBox) {
        self.region = Some(match &self.region {
            Some(current) => current.union(dirty),
            None => *dirty,
        });
    }

    /// Current dirty region, `None` when clean
    pub fn region(&self) -> Option<VolumeBox> {
        self.region
    }

    pub fn is_dirty(&self) -> bool {
        self.region.is_some()
    }

    /// Forget every reported box
    pub fn clear(&mut self) {
        self.region = None;
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "dirty_region_tests.rs"]
mod tests;
