use crate::{
    foundation::{
        core::{Point, Rect},
        error::{CelstreamError, CelstreamResult},
    },
    format::{
        chunk::{FILE_HEADER_SIZE, FILE_MAGIC, FRAME_HEADER_SIZE, FRAME_MAGIC},
        reader::FieldReader,
    },
};

/// The fixed 128-byte record at the start of every file.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FileHeader {
    /// Declared total file size.
    pub file_size: u32,
    /// Magic number (`0xA5E0` for well-formed files).
    pub magic: u16,
    /// Number of frames that follow the header.
    pub frames: u16,
    /// Canvas width in pixels.
    pub width: u16,
    /// Canvas height in pixels.
    pub height: u16,
    /// Bits per pixel: 32 (RGBA), 16 (grayscale + alpha) or 8 (indexed).
    pub color_depth: u16,
    /// Header flag word.
    pub flags: u32,
    /// Deprecated per-file frame duration in milliseconds.
    pub speed: u16,
    /// Palette entry treated as transparent (indexed files only).
    pub transparent_index: u8,
    /// Number of palette colors (0 means 256).
    pub palette_size: u16,
    /// Pixel aspect ratio as `width:height` (0 in either means 1:1).
    pub pixel_ratio: (u8, u8),
    /// Grid origin and cell size.
    pub grid: Rect,
}

impl FileHeader {
    /// Parse the header at `reader`'s cursor and leave the cursor just past
    /// the 128-byte record.
    pub fn parse(reader: &mut FieldReader<'_>, check_magic: bool) -> CelstreamResult<Self> {
        let start = reader.position();
        if reader.remaining() < FILE_HEADER_SIZE {
            return Err(CelstreamError::truncated(
                start,
                FILE_HEADER_SIZE,
                reader.remaining(),
            ));
        }

        let file_size = reader.read_u32()?;
        let magic = reader.read_u16()?;
        if check_magic && magic != FILE_MAGIC {
            return Err(CelstreamError::BadMagic {
                what: "file",
                offset: start + 4,
                expected: FILE_MAGIC,
                found: magic,
            });
        }
        let frames = reader.read_u16()?;
        let width = reader.read_u16()?;
        let height = reader.read_u16()?;
        let color_depth = reader.read_u16()?;
        let flags = reader.read_u32()?;
        let speed = reader.read_u16()?;
        // two DWORDs that must be zero
        reader.skip(8)?;
        let transparent_index = reader.read_u8()?;
        reader.skip(3)?;
        let palette_size = reader.read_u16()?;
        let pixel_ratio = (reader.read_u8()?, reader.read_u8()?);
        let grid_x = reader.read_i16()?;
        let grid_y = reader.read_i16()?;
        let grid_w = reader.read_u16()?;
        let grid_h = reader.read_u16()?;

        reader.seek(start + FILE_HEADER_SIZE);

        Ok(Self {
            file_size,
            magic,
            frames,
            width,
            height,
            color_depth,
            flags,
            speed,
            transparent_index,
            palette_size,
            pixel_ratio,
            grid: Rect::new(
                i32::from(grid_x),
                i32::from(grid_y),
                u32::from(grid_w),
                u32::from(grid_h),
            ),
        })
    }

    /// Grid origin as a point.
    pub fn grid_origin(&self) -> Point {
        Point {
            x: self.grid.x,
            y: self.grid.y,
        }
    }

    /// Size in bytes of one straight RGBA8 canvas buffer.
    pub fn canvas_len(&self) -> usize {
        usize::from(self.width) * usize::from(self.height) * 4
    }
}

/// Per-frame header preceding the frame's chunks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FrameHeader {
    /// Zero-based frame index.
    pub index: usize,
    /// Offset of the header in the input buffer.
    pub offset: usize,
    /// Declared size of the frame in bytes, header included.
    pub size: u32,
    /// Frame duration in milliseconds.
    pub duration_ms: u16,
    /// Number of chunks in the frame.
    pub chunks: u32,
}

impl FrameHeader {
    /// Parse a frame header at `reader`'s cursor.
    ///
    /// The 32-bit chunk count wins when non-zero; older files only fill the
    /// 16-bit field.
    pub fn parse(
        reader: &mut FieldReader<'_>,
        index: usize,
        check_magic: bool,
    ) -> CelstreamResult<Self> {
        let offset = reader.position();
        let size = reader.read_u32()?;
        let magic = reader.read_u16()?;
        if check_magic && magic != FRAME_MAGIC {
            return Err(CelstreamError::BadMagic {
                what: "frame",
                offset: offset + 4,
                expected: FRAME_MAGIC,
                found: magic,
            });
        }
        let old_chunks = reader.read_u16()?;
        let duration_ms = reader.read_u16()?;
        reader.skip(2)?;
        let new_chunks = reader.read_u32()?;
        debug_assert_eq!(reader.position(), offset + FRAME_HEADER_SIZE);

        let chunks = if new_chunks != 0 {
            new_chunks
        } else {
            u32::from(old_chunks)
        };

        Ok(Self {
            index,
            offset,
            size,
            duration_ms,
            chunks,
        })
    }

    /// Offset one past the last byte of the frame, per its declared size.
    pub fn end(&self) -> usize {
        self.offset.saturating_add(self.size as usize)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/format/header.rs"]
mod tests;
