/// Pixel format catalog
///
/// Maps every format the device knows about to its storage block layout.
/// Uncompressed formats use 1x1 blocks; DXT formats use 4x4 blocks and
/// packed YUV formats use 2x1 blocks.

/// Resource pixel format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(non_camel_case_types)]
pub enum Format {
    Unknown,

    // Color formats
    R8G8B8,
    A8R8G8B8,
    X8R8G8B8,
    R5G6B5,
    X1R5G5B5,
    A1R5G5B5,
    A4R4G4B4,
    R3G3B2,
    A8,
    A8R3G3B2,
    X4R4G4B4,
    A2B10G10R10,
    G16R16,

    // Palettized formats
    A8P8,
    P8,

    // Luminance formats
    L8,
    A8L8,
    A4L4,

    // Bump-map formats
    V8U8,
    L6V5U5,
    X8L8V8U8,
    Q8W8V8U8,
    V16U16,
    W11V11U10,
    A2W10V10U10,

    // Packed YUV formats
    UYVY,
    YUY2,

    // Block-compressed formats
    DXT1,
    DXT2,
    DXT3,
    DXT4,
    DXT5,

    // Depth/stencil formats
    D16_LOCKABLE,
    D32,
    D15S1,
    D24S8,
    D16,
    D24X8,
    D24X4S4,

    // Buffer formats
    VertexData,
    Index16,
    Index32,
}

/// Broad format family
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatKind {
    Unknown,
    Color,
    Palette,
    Luminance,
    BumpMap,
    Yuv,
    Compressed,
    DepthStencil,
    Buffer,
}

/// Storage layout of a format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatInfo {
    /// Texels per block horizontally
    pub block_width: u32,
    /// Texels per block vertically
    pub block_height: u32,
    /// Bytes per block (bytes per texel for 1x1 blocks)
    pub block_bytes: u32,
    /// Format family
    pub kind: FormatKind,
}

impl FormatInfo {
    const fn texel(bytes: u32, kind: FormatKind) -> Self {
        Self { block_width: 1, block_height: 1, block_bytes: bytes, kind }
    }

    const fn block(width: u32, height: u32, bytes: u32, kind: FormatKind) -> Self {
        Self { block_width: width, block_height: height, block_bytes: bytes, kind }
    }

    /// Number of blocks covering `width` texels
    pub fn blocks_across(&self, width: u32) -> u32 {
        width.div_ceil(self.block_width)
    }

    /// Number of blocks covering `height` texels
    pub fn blocks_down(&self, height: u32) -> u32 {
        height.div_ceil(self.block_height)
    }

    /// Bytes between two consecutive block rows
    pub fn row_pitch(&self, width: u32) -> u64 {
        self.blocks_across(width) as u64 * self.block_bytes as u64
    }

    /// Bytes between two consecutive depth slices
    pub fn slice_pitch(&self, width: u32, height: u32) -> u64 {
        self.row_pitch(width) * self.blocks_down(height) as u64
    }

    /// Whether blocks span more than one texel
    pub fn is_block_compressed(&self) -> bool {
        self.block_width > 1 || self.block_height > 1
    }
}

impl Format {
    /// Look up the storage layout of this format
    pub fn info(&self) -> FormatInfo {
        use FormatKind::*;
        match self {
            Format::Unknown => FormatInfo::texel(0, Unknown),

            Format::R8G8B8 => FormatInfo::texel(3, Color),
            Format::A8R8G8B8 | Format::X8R8G8B8 => FormatInfo::texel(4, Color),
            Format::R5G6B5 | Format::X1R5G5B5 | Format::A1R5G5B5 => FormatInfo::texel(2, Color),
            Format::A4R4G4B4 | Format::X4R4G4B4 | Format::A8R3G3B2 => FormatInfo::texel(2, Color),
            Format::R3G3B2 | Format::A8 => FormatInfo::texel(1, Color),
            Format::A2B10G10R10 | Format::G16R16 => FormatInfo::texel(4, Color),

            Format::A8P8 => FormatInfo::texel(2, Palette),
            Format::P8 => FormatInfo::texel(1, Palette),

            Format::L8 | Format::A4L4 => FormatInfo::texel(1, Luminance),
            Format::A8L8 => FormatInfo::texel(2, Luminance),

            Format::V8U8 | Format::L6V5U5 => FormatInfo::texel(2, BumpMap),
            Format::X8L8V8U8 | Format::Q8W8V8U8 | Format::V16U16 => FormatInfo::texel(4, BumpMap),
            Format::W11V11U10 | Format::A2W10V10U10 => FormatInfo::texel(4, BumpMap),

            Format::UYVY | Format::YUY2 => FormatInfo::block(2, 1, 4, Yuv),

            Format::DXT1 => FormatInfo::block(4, 4, 8, Compressed),
            Format::DXT2 | Format::DXT3 | Format::DXT4 | Format::DXT5 => {
                FormatInfo::block(4, 4, 16, Compressed)
            }

            Format::D16_LOCKABLE | Format::D15S1 | Format::D16 => FormatInfo::texel(2, DepthStencil),
            Format::D32 | Format::D24S8 | Format::D24X8 | Format::D24X4S4 => {
                FormatInfo::texel(4, DepthStencil)
            }

            Format::VertexData => FormatInfo::texel(1, Buffer),
            Format::Index16 => FormatInfo::texel(2, Buffer),
            Format::Index32 => FormatInfo::texel(4, Buffer),
        }
    }

    /// Whether this format can back a volume resource
    ///
    /// Depth/stencil, packed YUV, palettized and buffer formats have no
    /// volumetric representation on the software device.
    pub fn supports_volume(&self) -> bool {
        matches!(
            self.info().kind,
            FormatKind::Color | FormatKind::Luminance | FormatKind::BumpMap | FormatKind::Compressed
        )
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "format_tests.rs"]
mod tests;
