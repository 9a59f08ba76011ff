use super::*;
use crate::device::{DeviceConfig, SoftwareDevice};

// ============================================================================
// Helpers
// ============================================================================

fn create_device() -> Arc<dyn Device> {
    Arc::new(SoftwareDevice::new(DeviceConfig::default()))
}

fn desc(width: u32, height: u32, depth: u32, levels: u32) -> VolumeTextureDesc {
    VolumeTextureDesc {
        width,
        height,
        depth,
        levels,
        usage: Usage::empty(),
        format: Format::A8R8G8B8,
        pool: Pool::Managed,
    }
}

fn create_texture(width: u32, height: u32, depth: u32, levels: u32) -> VolumeTexture {
    VolumeTexture::new(&create_device(), desc(width, height, depth, levels)).unwrap()
}

// ============================================================================
// Mip chain helpers
// ============================================================================

#[test]
fn test_natural_level_count() {
    assert_eq!(natural_level_count(UVec3::new(1, 1, 1)), 1);
    assert_eq!(natural_level_count(UVec3::new(64, 64, 8)), 7);
    assert_eq!(natural_level_count(UVec3::new(5, 3, 2)), 3);
    assert_eq!(natural_level_count(UVec3::new(1, 1, 256)), 9);
    assert_eq!(natural_level_count(UVec3::new(1 << 20, 1, 1)), MAX_LEVELS as u32);
}

#[test]
fn test_mip_extent_halves_with_floor_of_one() {
    let base = UVec3::new(64, 16, 3);
    assert_eq!(mip_extent(base, 0), base);
    assert_eq!(mip_extent(base, 1), UVec3::new(32, 8, 1));
    assert_eq!(mip_extent(base, 4), UVec3::new(4, 1, 1));
    assert_eq!(mip_extent(base, 6), UVec3::new(1, 1, 1));
}

// ============================================================================
// Creation tests
// ============================================================================

#[test]
fn test_full_chain_when_zero_levels_requested() {
    let texture = create_texture(64, 64, 8, 0);
    assert_eq!(texture.level_count(), 7);

    let expected = [
        (64, 64, 8), (32, 32, 4), (16, 16, 2), (8, 8, 1),
        (4, 4, 1), (2, 2, 1), (1, 1, 1),
    ];
    for (level, &(w, h, d)) in expected.iter().enumerate() {
        let desc = texture.level_desc(level as u32).unwrap();
        assert_eq!((desc.width, desc.height, desc.depth), (w, h, d), "level {}", level);
    }
}

#[test]
fn test_level_extents_follow_halving_rule() {
    for (w, h, d) in [(7, 3, 5), (128, 1, 9), (1, 1, 1), (33, 65, 17)] {
        let texture = create_texture(w, h, d, 0);
        let base = UVec3::new(w, h, d);
        assert_eq!(texture.volume_level(0).unwrap().extent(), base);
        for level in 0..texture.level_count() {
            let expected = UVec3::new((w >> level).max(1), (h >> level).max(1), (d >> level).max(1));
            assert_eq!(texture.volume_level(level).unwrap().extent(), expected);
        }
    }
}

#[test]
fn test_explicit_level_count() {
    let texture = create_texture(64, 64, 8, 3);
    assert_eq!(texture.level_count(), 3);
    assert_eq!(texture.volume_levels().count(), 3);
    assert!(texture.internal_volume_level(3).is_none());
}

#[test]
fn test_level_count_above_chain_is_clamped() {
    let texture = create_texture(8, 8, 8, 10);
    assert_eq!(texture.level_count(), 4);
}

#[test]
fn test_level_count_above_max_is_rejected() {
    let result = VolumeTexture::new(&create_device(), desc(8, 8, 8, MAX_LEVELS as u32 + 1));
    assert!(matches!(result, Err(Error::InvalidParameter(_))));
}

#[test]
fn test_zero_extent_is_rejected() {
    let device = create_device();
    for (w, h, d) in [(0, 4, 4), (4, 0, 4), (4, 4, 0)] {
        let result = VolumeTexture::new(&device, desc(w, h, d, 0));
        assert!(matches!(result, Err(Error::InvalidParameter(_))));
    }
}

#[test]
fn test_extent_above_device_maximum_is_rejected() {
    let device: Arc<dyn Device> = Arc::new(SoftwareDevice::new(DeviceConfig {
        max_volume_extent: 32,
        ..DeviceConfig::default()
    }));
    assert!(VolumeTexture::new(&device, desc(32, 32, 32, 0)).is_ok());
    assert!(matches!(
        VolumeTexture::new(&device, desc(33, 1, 1, 0)),
        Err(Error::InvalidParameter(_))
    ));
}

#[test]
fn test_unsupported_format_is_rejected() {
    let device = create_device();
    for format in [Format::D24S8, Format::UYVY, Format::P8, Format::Unknown, Format::Index16] {
        let result = VolumeTexture::new(&device, VolumeTextureDesc { format, ..desc(4, 4, 4, 1) });
        assert_eq!(result.err(), Some(Error::UnsupportedFormat(format)));
    }
}

#[test]
fn test_render_target_usage_is_rejected() {
    let device = create_device();
    for usage in [Usage::RENDER_TARGET, Usage::DEPTH_STENCIL, Usage::DYNAMIC | Usage::RENDER_TARGET] {
        let result = VolumeTexture::new(&device, VolumeTextureDesc { usage, ..desc(4, 4, 4, 1) });
        assert!(matches!(result, Err(Error::InvalidParameter(_))));
    }
    let dynamic = VolumeTexture::new(&device, VolumeTextureDesc { usage: Usage::DYNAMIC, ..desc(4, 4, 4, 1) });
    assert!(dynamic.is_ok());
}

#[test]
fn test_budget_exceeded_is_out_of_memory() {
    // 16x16x16 ARGB = 16 KiB at level 0 alone
    let device: Arc<dyn Device> = Arc::new(SoftwareDevice::new(DeviceConfig {
        max_resource_bytes: 16 * 1024,
        ..DeviceConfig::default()
    }));
    assert!(VolumeTexture::new(&device, desc(16, 16, 16, 1)).is_ok());
    assert_eq!(
        VolumeTexture::new(&device, desc(16, 16, 16, 0)).err(),
        Some(Error::OutOfMemory)
    );
}

#[test]
fn test_creation_parameters_are_kept() {
    let device = create_device();
    let texture = VolumeTexture::new(&device, VolumeTextureDesc {
        width: 16,
        height: 8,
        depth: 4,
        levels: 2,
        usage: Usage::WRITE_ONLY,
        format: Format::DXT3,
        pool: Pool::SystemMem,
    }).unwrap();

    assert_eq!((texture.width(), texture.height(), texture.depth()), (16, 8, 4));
    assert_eq!(texture.format(), Format::DXT3);
    assert_eq!(texture.pool(), Pool::SystemMem);
    assert_eq!(texture.usage(), Usage::WRITE_ONLY);
    assert_eq!(texture.resource_type(), ResourceType::VolumeTexture);

    let level1 = texture.level_desc(1).unwrap();
    assert_eq!(level1.format, Format::DXT3);
    assert_eq!(level1.pool, Pool::SystemMem);
    assert_eq!(level1.usage, Usage::WRITE_ONLY);
    // 8x4x2 DXT3: 2 blocks across × 16 bytes, 1 block down, 2 slices
    assert_eq!(level1.size, 64);
}

#[test]
fn test_clear_value_fills_every_level() {
    let device: Arc<dyn Device> = Arc::new(SoftwareDevice::new(DeviceConfig {
        clear_value: 0x5A,
        ..DeviceConfig::default()
    }));
    let texture = VolumeTexture::new(&device, desc(4, 4, 4, 0)).unwrap();
    for level in texture.volume_levels() {
        assert!(level.data().iter().all(|&b| b == 0x5A));
    }
}

// ============================================================================
// Level queries
// ============================================================================

#[test]
fn test_level_queries_out_of_range() {
    let mut texture = create_texture(64, 64, 8, 0);
    assert_eq!(texture.level_desc(7).err(), Some(Error::OutOfRange { level: 7, levels: 7 }));
    assert!(matches!(texture.volume_level(100), Err(Error::OutOfRange { .. })));
    assert!(matches!(texture.volume_level_mut(7), Err(Error::OutOfRange { .. })));
    assert!(matches!(texture.dirty_region(7), Err(Error::OutOfRange { .. })));
    assert!(texture.internal_volume_level(7).is_none());
    assert!(texture.internal_volume_level_mut(7).is_none());
}

#[test]
fn test_internal_level_is_same_storage() {
    let texture = create_texture(8, 8, 8, 0);
    let public = texture.volume_level(1).unwrap() as *const VolumeLevel;
    let internal = texture.internal_volume_level(1).unwrap() as *const VolumeLevel;
    assert_eq!(public, internal);
}

#[test]
fn test_levels_know_their_index() {
    let texture = create_texture(32, 32, 32, 0);
    for (index, level) in texture.volume_levels().enumerate() {
        assert_eq!(level.level(), index as u32);
    }
}

// ============================================================================
// LOD and priority
// ============================================================================

#[test]
fn test_lod_defaults_to_zero() {
    assert_eq!(create_texture(8, 8, 8, 0).lod(), 0);
}

#[test]
fn test_set_lod_clamps_and_returns_effective_value() {
    let mut texture = create_texture(64, 64, 8, 0);
    assert_eq!(texture.set_lod(3), 3);
    assert_eq!(texture.lod(), 3);
    assert_eq!(texture.set_lod(6), 6);
    assert_eq!(texture.set_lod(7), 6);
    assert_eq!(texture.set_lod(u32::MAX), 6);
    assert_eq!(texture.lod(), 6);
    assert_eq!(texture.set_lod(0), 0);
}

#[test]
fn test_set_lod_single_level() {
    let mut texture = create_texture(8, 8, 8, 1);
    assert_eq!(texture.set_lod(5), 0);
}

#[test]
fn test_priority_only_for_managed_pool() {
    let mut managed = create_texture(4, 4, 4, 1);
    assert_eq!(managed.set_priority(5), 0);
    assert_eq!(managed.set_priority(9), 5);
    assert_eq!(managed.priority(), 9);

    let device = create_device();
    let mut system = VolumeTexture::new(&device, VolumeTextureDesc {
        pool: Pool::SystemMem,
        ..desc(4, 4, 4, 1)
    }).unwrap();
    assert_eq!(system.set_priority(5), 0);
    assert_eq!(system.priority(), 0);
}

// ============================================================================
// Locking through the texture
// ============================================================================

#[test]
fn test_lock_level_two_box() {
    let mut texture = create_texture(64, 64, 8, 0);
    let region = VolumeBox::new(0, 0, 0, 16, 16, 2);
    let locked = texture.lock_box(2, Some(&region), LockFlags::empty()).unwrap();
    assert_eq!(locked.offset, 0);
    assert_eq!(locked.row_pitch, 16 * 4);
    assert_eq!(locked.slice_pitch, 16 * 16 * 4);

    texture.unlock_box(2).unwrap();
    assert_eq!(texture.unlock_box(2), Err(Error::NotLocked { level: 2 }));
}

#[test]
fn test_lock_out_of_range_level() {
    let mut texture = create_texture(8, 8, 8, 2);
    assert_eq!(
        texture.lock_box(2, None, LockFlags::empty()),
        Err(Error::OutOfRange { level: 2, levels: 2 })
    );
    assert_eq!(texture.unlock_box(5), Err(Error::OutOfRange { level: 5, levels: 2 }));
}

#[test]
fn test_oversized_box_fails_on_every_level() {
    let mut texture = create_texture(32, 16, 8, 0);
    for level in 0..texture.level_count() {
        let extent = texture.volume_level(level).unwrap().extent();
        let boxes = [
            VolumeBox::new(0, 0, 0, extent.x + 1, extent.y, extent.z),
            VolumeBox::new(0, 0, 0, extent.x, extent.y + 1, extent.z),
            VolumeBox::new(0, 0, 0, extent.x, extent.y, extent.z + 1),
        ];
        for b in boxes {
            let result = texture.lock_box(level, Some(&b), LockFlags::empty());
            assert!(matches!(result, Err(Error::InvalidBox(_))), "level {} box {:?}", level, b);
        }
        assert!(!texture.volume_level(level).unwrap().is_locked());
    }
}

#[test]
fn test_levels_lock_independently() {
    let mut texture = create_texture(8, 8, 8, 0);
    texture.lock_box(0, None, LockFlags::empty()).unwrap();
    texture.lock_box(1, None, LockFlags::empty()).unwrap();
    assert_eq!(
        texture.lock_box(0, None, LockFlags::empty()),
        Err(Error::AlreadyLocked { level: 0 })
    );
    texture.unlock_box(0).unwrap();
    assert!(texture.volume_level(1).unwrap().is_locked());
    texture.unlock_box(1).unwrap();
}

// ============================================================================
// Dirty regions
// ============================================================================

#[test]
fn test_add_dirty_box_none_marks_base_level() {
    let mut texture = create_texture(64, 64, 8, 0);
    assert!(!texture.is_dirty());
    texture.add_dirty_box(None).unwrap();
    assert_eq!(texture.dirty_region(0).unwrap(), Some(VolumeBox::new(0, 0, 0, 64, 64, 8)));
    assert_eq!(texture.dirty_region(1).unwrap(), None);
    assert!(texture.is_dirty());
}

#[test]
fn test_add_dirty_box_merges_on_base_level() {
    let mut texture = create_texture(16, 16, 16, 0);
    texture.add_dirty_box(Some(&VolumeBox::new(0, 0, 0, 2, 2, 2))).unwrap();
    texture.add_dirty_box(Some(&VolumeBox::new(8, 8, 8, 9, 12, 16))).unwrap();
    assert_eq!(texture.dirty_region(0).unwrap(), Some(VolumeBox::new(0, 0, 0, 9, 12, 16)));
}

#[test]
fn test_clear_dirty_regions_clears_every_level() {
    let mut texture = create_texture(16, 16, 16, 0);
    texture.add_dirty_box(None).unwrap();
    texture.lock_box(3, None, LockFlags::empty()).unwrap();
    texture.unlock_box(3).unwrap();
    assert!(texture.dirty_region(3).unwrap().is_some());

    texture.clear_dirty_regions();
    assert!(!texture.is_dirty());
}

// ============================================================================
// Device and private data
// ============================================================================

#[test]
fn test_device_query() {
    let device = create_device();
    let texture = VolumeTexture::new(&device, desc(4, 4, 4, 1)).unwrap();
    let owner = texture.device().unwrap();
    assert!(Arc::ptr_eq(&owner, &device));
    assert_eq!(owner.name(), "SW3D Software Device");
}

#[test]
fn test_device_query_after_device_dropped() {
    let device = create_device();
    let texture = VolumeTexture::new(&device, desc(4, 4, 4, 1)).unwrap();
    drop(device);
    assert!(matches!(texture.device(), Err(Error::InvalidCall(_))));

    // The texture itself stays usable
    assert_eq!(texture.level_count(), 1);
}

#[test]
fn test_private_data_roundtrip() {
    let mut texture = create_texture(4, 4, 4, 1);
    let guid = 0x1234_5678_9abc_def0_0fed_cba9_8765_4321u128;
    texture.set_private_data(guid, b"debug-name");
    assert_eq!(texture.private_data(guid).unwrap(), b"debug-name");
    texture.free_private_data(guid).unwrap();
    assert!(matches!(texture.private_data(guid), Err(Error::NotFound(_))));
}

#[test]
fn test_preload_is_harmless() {
    let texture = create_texture(4, 4, 4, 1);
    texture.preload();
    assert!(!texture.is_dirty());
}
