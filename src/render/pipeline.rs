use crate::{
    foundation::{error::CelstreamResult, settings::DecodeSettings},
    format::decoder::ChunkStream,
    render::{
        compositor::FrameCompositor,
        frame::{RenderOutput, RenderedFrame},
    },
};

/// Decode `bytes` into a lazy [`Record`](crate::Record) stream.
pub fn decode(bytes: &[u8]) -> ChunkStream<'_> {
    ChunkStream::new(bytes)
}

/// Decode and composite `bytes` lazily.
///
/// Pipeline:
/// 1. [`ChunkStream`] turns bytes into records
/// 2. [`FrameCompositor`] replays records into [`RenderOutput`]s
pub fn render(bytes: &[u8]) -> FrameCompositor<ChunkStream<'_>> {
    render_with_settings(bytes, &DecodeSettings::default())
}

/// [`render`] with explicit settings shared by both stages.
pub fn render_with_settings<'a>(
    bytes: &'a [u8],
    settings: &DecodeSettings,
) -> FrameCompositor<ChunkStream<'a>> {
    FrameCompositor::with_settings(
        ChunkStream::with_settings(bytes, settings.clone()),
        settings.clone(),
    )
}

/// Composite every frame of `bytes`, dropping metadata.
///
/// This is a convenience wrapper that drains [`render`]; prefer the
/// iterator when frames should be consumed one at a time.
#[tracing::instrument(skip(bytes), fields(len = bytes.len()))]
pub fn render_frames(bytes: &[u8]) -> CelstreamResult<Vec<RenderedFrame>> {
    render(bytes)
        .filter_map(|item| item.map(RenderOutput::into_frame).transpose())
        .collect()
}
