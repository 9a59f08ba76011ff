//! Resource module
//!
//! Volume textures, their levels, and the types shared by volume resources.

pub mod volume_box;
pub mod dirty_region;
pub mod private_data;
pub mod volume;
pub mod volume_texture;

pub use volume_box::{VolumeBox, Usage, LockFlags, Pool, ResourceType};
pub use dirty_region::DirtyRegionTracker;
pub use private_data::PrivateDataStore;
pub use volume::{VolumeLevel, VolumeDesc, LockedBox};
pub use volume_texture::{
    VolumeTexture, VolumeTextureDesc,
    MAX_LEVELS, natural_level_count, mip_extent,
};
