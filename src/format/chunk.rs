//! Numeric vocabulary of the container: magics, chunk ids, flag sets and
//! small enums decoded from raw fields.

/// Magic number at offset 4 of the file header.
pub const FILE_MAGIC: u16 = 0xA5E0;
/// Magic number at offset 4 of every frame header.
pub const FRAME_MAGIC: u16 = 0xF1FA;
/// Fixed size of the file header in bytes.
pub const FILE_HEADER_SIZE: usize = 128;
/// Fixed size of a frame header in bytes.
pub const FRAME_HEADER_SIZE: usize = 16;
/// Size of the `u32 size + u16 type` prefix of every chunk.
pub const CHUNK_HEADER_SIZE: usize = 6;

/// Chunk type tags.
#[allow(missing_docs)]
pub mod chunk_ids {
    pub const OLD_PALETTE_256: u16 = 0x0004;
    pub const OLD_PALETTE_64: u16 = 0x0011;
    pub const LAYER: u16 = 0x2004;
    pub const CEL: u16 = 0x2005;
    pub const CEL_EXTRA: u16 = 0x2006;
    pub const COLOR_PROFILE: u16 = 0x2007;
    pub const EXTERNAL_FILES: u16 = 0x2008;
    pub const MASK: u16 = 0x2016;
    pub const PATH: u16 = 0x2017;
    pub const TAGS: u16 = 0x2018;
    pub const PALETTE: u16 = 0x2019;
    pub const USER_DATA: u16 = 0x2020;
    pub const SLICE: u16 = 0x2022;
    pub const TILESET: u16 = 0x2023;

    /// Human-readable name for log events.
    pub fn name(id: u16) -> &'static str {
        match id {
            OLD_PALETTE_256 => "old palette (256)",
            OLD_PALETTE_64 => "old palette (64)",
            LAYER => "layer",
            CEL => "cel",
            CEL_EXTRA => "cel extra",
            COLOR_PROFILE => "color profile",
            EXTERNAL_FILES => "external files",
            MASK => "mask",
            PATH => "path",
            TAGS => "tags",
            PALETTE => "palette",
            USER_DATA => "user data",
            SLICE => "slice",
            TILESET => "tileset",
            _ => "unknown",
        }
    }
}

/// Cel storage encodings.
#[allow(missing_docs)]
pub mod cel_types {
    pub const RAW: u16 = 0;
    pub const LINKED: u16 = 1;
    pub const COMPRESSED: u16 = 2;
    pub const COMPRESSED_TILEMAP: u16 = 3;
}

/// Color profile kinds.
#[allow(missing_docs)]
pub mod color_profiles {
    pub const NONE: u16 = 0;
    pub const SRGB: u16 = 1;
    pub const ICC: u16 = 2;
}

bitflags::bitflags! {
    /// Layer flag word.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
    pub struct LayerFlags: u16 {
        /// Layer is rendered.
        const VISIBLE = 1;
        /// Layer accepts edits.
        const EDITABLE = 2;
        /// Layer cannot be moved.
        const LOCK_MOVEMENT = 4;
        /// Background layer; stack order is fixed.
        const BACKGROUND = 8;
        /// Copies prefer linked cels.
        const CONTINUOUS = 16;
        /// Group shown collapsed.
        const COLLAPSED = 32;
        /// Reference layer.
        const REFERENCE = 64;
    }
}

bitflags::bitflags! {
    /// User-data flag word.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct UserDataFlags: u32 {
        /// A text string follows.
        const HAS_TEXT = 1;
        /// An RGBA color follows.
        const HAS_COLOR = 2;
        /// A properties map follows (not decoded).
        const HAS_PROPERTIES = 4;
    }
}

bitflags::bitflags! {
    /// Slice flag word.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct SliceFlags: u32 {
        /// Each key carries a 9-slice center rectangle.
        const HAS_CENTER = 1;
        /// Each key carries a pivot point.
        const HAS_PIVOT = 2;
    }
}

/// Layer kind field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum LayerKind {
    /// Plain image layer.
    Image,
    /// Group of nested layers.
    Group,
    /// Tilemap layer.
    Tilemap,
    /// Unrecognized kind.
    Other(u16),
}

impl From<u16> for LayerKind {
    fn from(raw: u16) -> Self {
        match raw {
            0 => Self::Image,
            1 => Self::Group,
            2 => Self::Tilemap,
            other => Self::Other(other),
        }
    }
}

/// Tag playback direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum AnimationDirection {
    /// `from..=to`.
    Forward,
    /// `to..=from`.
    Reverse,
    /// Forward then back.
    PingPong,
    /// Back then forward.
    PingPongReverse,
    /// Unrecognized direction byte.
    Other(u8),
}

impl From<u8> for AnimationDirection {
    fn from(raw: u8) -> Self {
        match raw {
            0 => Self::Forward,
            1 => Self::Reverse,
            2 => Self::PingPong,
            3 => Self::PingPongReverse,
            other => Self::Other(other),
        }
    }
}
