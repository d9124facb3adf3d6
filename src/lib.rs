//! celstream decodes layered sprite files (`.ase` / `.aseprite`) and
//! composites every animation frame into a straight RGBA8 buffer.
//!
//! # Pipeline overview
//!
//! 1. **Read**: [`FieldReader`] is a bounds-checked little-endian cursor over the file bytes.
//! 2. **Decode**: [`ChunkStream`] walks the file header, each frame header and each chunk,
//!    yielding typed [`Record`]s (layers, cels, link cels, tags, slices, user data).
//! 3. **Composite**: [`FrameCompositor`] replays records in file order and yields one
//!    [`RenderedFrame`] per frame, passing metadata through as [`RenderOutput`]s.
//!
//! Both stages are plain iterators: nothing is decoded before it is pulled,
//! and dropping the iterator is the only cancellation needed.
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic**: the same bytes always produce the same frames.
//! - **No IO**: callers hand in a byte buffer; encoding frames is left to them
//!   (see [`RenderedFrame::to_image`]).
//! - **Declared sizes are authoritative**: after every chunk the cursor jumps to the
//!   chunk's declared end, so unknown chunks and unparsed trailing fields are skipped.
//!
//! ```no_run
//! # fn main() -> celstream::CelstreamResult<()> {
//! let bytes = std::fs::read("sprite.aseprite").expect("read sprite");
//! for frame in celstream::render_frames(&bytes)? {
//!     println!("frame {} ({} ms)", frame.index, frame.duration_ms);
//! }
//! # Ok(())
//! # }
//! ```
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;
mod format;
mod render;

#[cfg(test)]
#[path = "../tests/support/mod.rs"]
mod testing;

pub use foundation::core::{Point, Rect, Rgb8, Rgba8};
pub use foundation::error::{CelstreamError, CelstreamResult};
pub use foundation::settings::DecodeSettings;
pub use format::chunk::{
    AnimationDirection, CHUNK_HEADER_SIZE, FILE_HEADER_SIZE, FILE_MAGIC, FRAME_HEADER_SIZE,
    FRAME_MAGIC, LayerFlags, LayerKind, SliceFlags, UserDataFlags, cel_types, chunk_ids,
    color_profiles,
};
pub use format::decoder::ChunkStream;
pub use format::header::{FileHeader, FrameHeader};
pub use format::reader::FieldReader;
pub use format::records::{Cel, Layer, LinkCel, Record, Slice, SliceKey, Tag, UserData};
pub use render::blend::{StraightRgba8, blend_normal, composite_cel, mul_un8};
pub use render::compositor::FrameCompositor;
pub use render::frame::{RenderOutput, RenderedFrame};
pub use render::pipeline::{decode, render, render_frames, render_with_settings};
