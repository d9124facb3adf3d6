use std::collections::HashMap;

use crate::{
    foundation::{
        error::{CelstreamError, CelstreamResult},
        settings::DecodeSettings,
    },
    format::{
        header::{FileHeader, FrameHeader},
        records::{Cel, Layer, LinkCel, Record},
    },
    render::{
        blend::composite_cel,
        frame::{RenderOutput, RenderedFrame},
    },
};

/// Key into the cel history: `(frame index, layer index)`.
type CelKey = (usize, usize);

enum Slot {
    Owned(Cel),
    /// Filled by a link cel; holds the frame that owns the pixels.
    Linked(usize),
}

struct OpenFrame {
    index: usize,
    duration_ms: u16,
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl OpenFrame {
    fn seal(self) -> RenderedFrame {
        tracing::debug!(frame = self.index, "frame composited");
        RenderedFrame {
            index: self.index,
            width: self.width,
            height: self.height,
            duration_ms: self.duration_ms,
            data: self.data,
        }
    }
}

/// Replays a [`Record`] stream into composited frames.
///
/// Layer declarations and every cel ever seen are retained for the whole
/// session so link cels can point at any earlier frame. Metadata records are
/// passed through unchanged. Like the decoder, the compositor is lazy and
/// fused after the first error.
pub struct FrameCompositor<I> {
    records: I,
    settings: DecodeSettings,
    header: Option<FileHeader>,
    layers: Vec<Layer>,
    history: HashMap<CelKey, Slot>,
    open: Option<OpenFrame>,
    done: bool,
}

impl<I> FrameCompositor<I>
where
    I: Iterator<Item = CelstreamResult<Record>>,
{
    /// Composite `records` with default settings.
    pub fn new(records: I) -> Self {
        Self::with_settings(records, DecodeSettings::default())
    }

    /// Composite `records` with explicit settings.
    pub fn with_settings(records: I, settings: DecodeSettings) -> Self {
        Self {
            records,
            settings,
            header: None,
            layers: Vec::new(),
            history: HashMap::new(),
            open: None,
            done: false,
        }
    }

    /// The file header, once it has been consumed.
    pub fn header(&self) -> Option<&FileHeader> {
        self.header.as_ref()
    }

    /// Layers declared so far, in index order.
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    fn process(&mut self, record: Record) -> CelstreamResult<Option<RenderOutput>> {
        match record {
            Record::Header(header) => {
                self.settings.check_canvas(header.width, header.height)?;
                self.header = Some(header.clone());
                Ok(Some(RenderOutput::Header(header)))
            }
            Record::Frame(frame) => {
                let next = self.open_frame(&frame)?;
                Ok(self
                    .open
                    .replace(next)
                    .map(|done| RenderOutput::Frame(done.seal())))
            }
            Record::Layer(layer) => {
                self.layers.push(layer);
                Ok(None)
            }
            Record::Cel(cel) => {
                self.paint_cel(cel)?;
                Ok(None)
            }
            Record::LinkCel(link) => {
                self.paint_link(link)?;
                Ok(None)
            }
            Record::Tags(tags) => Ok(Some(RenderOutput::Tags(tags))),
            Record::Slice(slice) => Ok(Some(RenderOutput::Slice(slice))),
            Record::SliceUserData(data) => Ok(Some(RenderOutput::SliceUserData(data))),
        }
    }

    fn open_frame(&self, frame: &FrameHeader) -> CelstreamResult<OpenFrame> {
        let header = self
            .header
            .as_ref()
            .ok_or_else(|| CelstreamError::validation("frame record before the file header"))?;
        Ok(OpenFrame {
            index: frame.index,
            duration_ms: frame.duration_ms,
            width: u32::from(header.width),
            height: u32::from(header.height),
            data: vec![0; header.canvas_len()],
        })
    }

    fn layer(&self, index: usize) -> CelstreamResult<&Layer> {
        self.layers.get(index).ok_or(CelstreamError::UnknownLayer {
            layer: index,
            declared: self.layers.len(),
        })
    }

    /// Pixels are only composited as RGBA8; other depths still pass their
    /// header, metadata and blank frames through.
    fn require_rgba(&self) -> CelstreamResult<()> {
        match &self.header {
            Some(header) if header.color_depth != 32 => {
                Err(CelstreamError::UnsupportedColorDepth {
                    depth: header.color_depth,
                })
            }
            _ => Ok(()),
        }
    }

    fn paint_cel(&mut self, cel: Cel) -> CelstreamResult<()> {
        self.require_rgba()?;
        let visible = self.layer(cel.layer_index)?.is_visible();
        let open = self
            .open
            .as_mut()
            .ok_or_else(|| CelstreamError::validation("cel record outside of a frame"))?;

        if visible {
            composite_cel(&mut open.data, open.width, open.height, &cel)?;
        }
        // Hidden cels are kept too: a later frame may link to them.
        self.history
            .insert((open.index, cel.layer_index), Slot::Owned(cel));
        Ok(())
    }

    fn paint_link(&mut self, link: LinkCel) -> CelstreamResult<()> {
        self.require_rgba()?;
        let visible = self.layer(link.layer_index)?.is_visible();
        let open = self
            .open
            .as_mut()
            .ok_or_else(|| CelstreamError::validation("link cel record outside of a frame"))?;

        let dangling = CelstreamError::DanglingLinkReference {
            frame: open.index,
            layer: link.layer_index,
            source_frame: link.source_frame,
        };
        if link.source_frame >= open.index {
            return Err(dangling);
        }

        let owner = match self.history.get(&(link.source_frame, link.layer_index)) {
            Some(Slot::Owned(_)) => link.source_frame,
            Some(Slot::Linked(owner)) => *owner,
            None => return Err(dangling),
        };
        let Some(Slot::Owned(cel)) = self.history.get(&(owner, link.layer_index)) else {
            return Err(dangling);
        };

        if visible {
            composite_cel(&mut open.data, open.width, open.height, cel)?;
        }
        self.history
            .insert((open.index, link.layer_index), Slot::Linked(owner));
        Ok(())
    }
}

impl<I> Iterator for FrameCompositor<I>
where
    I: Iterator<Item = CelstreamResult<Record>>,
{
    type Item = CelstreamResult<RenderOutput>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        loop {
            let result = match self.records.next() {
                Some(Ok(record)) => self.process(record),
                Some(Err(err)) => Err(err),
                None => {
                    self.done = true;
                    return self
                        .open
                        .take()
                        .map(|last| Ok(RenderOutput::Frame(last.seal())));
                }
            };
            match result {
                Ok(Some(output)) => return Some(Ok(output)),
                Ok(None) => continue,
                Err(err) => {
                    self.done = true;
                    self.open = None;
                    return Some(Err(err));
                }
            }
        }
    }
}

impl<I> std::iter::FusedIterator for FrameCompositor<I> where
    I: Iterator<Item = CelstreamResult<Record>>
{
}

#[cfg(test)]
#[path = "../../tests/unit/render/compositor.rs"]
mod tests;
