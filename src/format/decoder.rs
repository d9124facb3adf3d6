use crate::{
    foundation::{error::CelstreamResult, settings::DecodeSettings},
    format::{
        chunk::{CHUNK_HEADER_SIZE, chunk_ids},
        chunks::{check_color_profile, parse_cel},
        header::{FileHeader, FrameHeader},
        reader::FieldReader,
        records::{Layer, Record, Slice, Tag, UserData},
    },
};

enum State {
    Start,
    FrameHeader { index: usize },
    Chunks { frame: FrameHeader, remaining: u32 },
    Done,
}

enum Step {
    Emit(Record),
    Skip,
    Finished,
}

/// Forward-only, lazy decoder turning a file buffer into [`Record`]s.
///
/// Nothing is decoded ahead of the consumer: each call to `next` reads at
/// most one header or chunk. The stream is fused after the first error.
pub struct ChunkStream<'a> {
    reader: FieldReader<'a>,
    settings: DecodeSettings,
    frame_count: usize,
    color_depth: u16,
    state: State,
}

impl<'a> ChunkStream<'a> {
    /// Decode `bytes` with default settings.
    pub fn new(bytes: &'a [u8]) -> Self {
        Self::with_settings(bytes, DecodeSettings::default())
    }

    /// Decode `bytes` with explicit settings.
    pub fn with_settings(bytes: &'a [u8], settings: DecodeSettings) -> Self {
        Self {
            reader: FieldReader::new(bytes),
            settings,
            frame_count: 0,
            color_depth: 0,
            state: State::Start,
        }
    }

    /// Byte offset of the next unread header or chunk.
    pub fn position(&self) -> usize {
        self.reader.position()
    }

    fn step(&mut self) -> CelstreamResult<Step> {
        match std::mem::replace(&mut self.state, State::Done) {
            State::Start => {
                let header = FileHeader::parse(&mut self.reader, self.settings.check_magic)?;
                self.frame_count = usize::from(header.frames);
                self.color_depth = header.color_depth;
                self.state = State::FrameHeader { index: 0 };
                Ok(Step::Emit(Record::Header(header)))
            }
            State::FrameHeader { index } => {
                if index >= self.frame_count {
                    return Ok(Step::Finished);
                }
                let frame = FrameHeader::parse(&mut self.reader, index, self.settings.check_magic)?;
                tracing::trace!(
                    frame = index,
                    chunks = frame.chunks,
                    size = frame.size,
                    "frame header"
                );
                self.state = State::Chunks {
                    frame,
                    remaining: frame.chunks,
                };
                Ok(Step::Emit(Record::Frame(frame)))
            }
            State::Chunks { frame, remaining } => {
                if remaining == 0 {
                    self.finish_frame(&frame);
                    self.state = State::FrameHeader {
                        index: frame.index + 1,
                    };
                    return Ok(Step::Skip);
                }
                let record = self.next_chunk(&frame)?;
                self.state = State::Chunks {
                    frame,
                    remaining: remaining - 1,
                };
                Ok(record.map_or(Step::Skip, Step::Emit))
            }
            State::Done => Ok(Step::Finished),
        }
    }

    fn next_chunk(&mut self, frame: &FrameHeader) -> CelstreamResult<Option<Record>> {
        let start = self.reader.position();
        let size = self.reader.read_u32()? as usize;
        let chunk_type = self.reader.read_u16()?;

        // A chunk always spans at least its own prefix, so the cursor moves
        // forward even when the size field is garbage.
        let end = start.saturating_add(size.max(CHUNK_HEADER_SIZE));
        let mut body = self.reader.limited_to(end.min(self.reader.len()))?;

        tracing::trace!(
            frame = frame.index,
            offset = start,
            size,
            kind = chunk_ids::name(chunk_type),
            "chunk"
        );

        let record = match chunk_type {
            chunk_ids::COLOR_PROFILE => {
                check_color_profile(&mut body)?;
                None
            }
            chunk_ids::LAYER => Some(Record::Layer(Layer::parse(&mut body)?)),
            chunk_ids::CEL => Some(parse_cel(&mut body, start, end, self.color_depth)?),
            chunk_ids::TAGS => Some(Record::Tags(Tag::parse_all(&mut body)?)),
            chunk_ids::USER_DATA => Some(Record::SliceUserData(UserData::parse(&mut body)?)),
            chunk_ids::SLICE => Some(Record::Slice(Slice::parse(&mut body)?)),
            other => {
                tracing::debug!(
                    frame = frame.index,
                    offset = start,
                    size,
                    chunk_type = format_args!("{other:#06x}"),
                    kind = chunk_ids::name(other),
                    "skipping chunk"
                );
                None
            }
        };

        // Declared size is authoritative: fields this decoder does not
        // interpret are skipped wholesale.
        self.reader.seek(end);
        Ok(record)
    }

    fn finish_frame(&mut self, frame: &FrameHeader) {
        let pos = self.reader.position();
        let end = frame.end();
        if end == pos {
            return;
        }
        if end > pos {
            tracing::debug!(
                frame = frame.index,
                skipped = end - pos,
                "frame declares bytes beyond its chunks; resyncing"
            );
            self.reader.seek(end);
        } else {
            tracing::debug!(
                frame = frame.index,
                overrun = pos - end,
                "frame chunks extend past the declared frame size"
            );
        }
    }
}

impl Iterator for ChunkStream<'_> {
    type Item = CelstreamResult<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.step() {
                Ok(Step::Emit(record)) => return Some(Ok(record)),
                Ok(Step::Skip) => continue,
                Ok(Step::Finished) => return None,
                Err(err) => {
                    self.state = State::Done;
                    return Some(Err(err));
                }
            }
        }
    }
}

impl std::iter::FusedIterator for ChunkStream<'_> {}

#[cfg(test)]
#[path = "../../tests/unit/format/decoder.rs"]
mod tests;
