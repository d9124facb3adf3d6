/// Convenience result type used across celstream.
pub type CelstreamResult<T> = Result<T, CelstreamError>;

/// Top-level error taxonomy surfaced by the decoder and the compositor.
///
/// Every variant is fatal for the decode session: both stream stages stop
/// producing items after yielding one of these.
#[derive(thiserror::Error, Debug)]
pub enum CelstreamError {
    /// A read would run past the end of the input buffer.
    #[error("truncated input at offset {offset:#x} (need {need} bytes, have {have})")]
    TruncatedInput {
        /// Cursor position when the read was attempted.
        offset: usize,
        /// Bytes the read required.
        need: usize,
        /// Bytes left in the buffer.
        have: usize,
    },

    /// A file or frame magic number did not match.
    #[error("bad {what} magic at offset {offset:#x}: expected {expected:#06x}, found {found:#06x}")]
    BadMagic {
        /// Which structure carried the magic (`"file"` or `"frame"`).
        what: &'static str,
        /// Offset of the magic field.
        offset: usize,
        /// Expected value.
        expected: u16,
        /// Value found in the input.
        found: u16,
    },

    /// A color profile other than sRGB was declared.
    #[error("unsupported color profile type {kind}")]
    UnsupportedColorProfile {
        /// Raw profile type field.
        kind: u16,
    },

    /// A cel uses a storage encoding this crate does not decode.
    #[error("unsupported cel encoding {cel_type}")]
    UnsupportedCelEncoding {
        /// Raw cel type field.
        cel_type: u16,
    },

    /// The compositor only rasterizes 32 bits-per-pixel RGBA files.
    #[error("unsupported color depth {depth} bpp (only 32 bpp RGBA is composited)")]
    UnsupportedColorDepth {
        /// Declared bits per pixel.
        depth: u16,
    },

    /// A link cel points at a (frame, layer) pair that holds no cel.
    #[error("link cel in frame {frame} on layer {layer} references frame {source_frame}, which has no cel on that layer")]
    DanglingLinkReference {
        /// Frame the link cel appears in.
        frame: usize,
        /// Layer index shared by the link and its target.
        layer: usize,
        /// Frame the link points at.
        source_frame: usize,
    },

    /// A cel names a layer index that has not been declared.
    #[error("cel references layer {layer}, but only {declared} layers are declared")]
    UnknownLayer {
        /// Referenced layer index.
        layer: usize,
        /// Number of layers declared so far.
        declared: usize,
    },

    /// A cel's inflated payload does not cover its declared rectangle.
    #[error("cel at offset {offset:#x} inflated to {actual} bytes, expected {expected}")]
    CorruptCel {
        /// Offset of the cel chunk.
        offset: usize,
        /// `width * height * 4`.
        expected: usize,
        /// Bytes produced by inflate.
        actual: usize,
    },

    /// The zlib stream of a compressed cel is invalid.
    #[error("inflate failed for cel at offset {offset:#x}: {reason}")]
    Inflate {
        /// Offset of the cel chunk.
        offset: usize,
        /// Decompressor status.
        reason: String,
    },

    /// The record stream or the settings are inconsistent.
    #[error("validation error: {0}")]
    Validation(String),
}

impl CelstreamError {
    /// Build a [`CelstreamError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`CelstreamError::TruncatedInput`] value.
    pub fn truncated(offset: usize, need: usize, have: usize) -> Self {
        Self::TruncatedInput { offset, need, have }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
