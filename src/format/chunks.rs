//! Chunk body parsers.
//!
//! Each parser starts right after the 6-byte chunk prefix and reads only the
//! fields it understands. Callers reposition the cursor to the chunk's
//! declared end afterwards, so trailing fields are never a concern here.

use crate::{
    foundation::{
        core::{Point, Rect, Rgb8, Rgba8},
        error::{CelstreamError, CelstreamResult},
    },
    format::{
        chunk::{LayerFlags, SliceFlags, UserDataFlags, cel_types, color_profiles},
        reader::FieldReader,
        records::{Cel, Layer, LinkCel, Record, Slice, SliceKey, Tag, UserData},
    },
};

/// Validate a color profile chunk. Only sRGB is accepted.
pub(crate) fn check_color_profile(reader: &mut FieldReader<'_>) -> CelstreamResult<()> {
    let kind = reader.read_u16()?;
    let _flags = reader.read_u16()?;
    // 16.16 fixed point
    let _gamma = reader.read_u32()?;
    reader.skip(8)?;

    match kind {
        color_profiles::SRGB => Ok(()),
        // no ICC transforms
        _ => Err(CelstreamError::UnsupportedColorProfile { kind }),
    }
}

impl Layer {
    pub(crate) fn parse(reader: &mut FieldReader<'_>) -> CelstreamResult<Self> {
        let flags = LayerFlags::from_bits_retain(reader.read_u16()?);
        let kind = reader.read_u16()?.into();
        let child_level = reader.read_u16()?;
        // default width/height, ignored by every writer since 1.0
        reader.skip(4)?;
        let blend_mode = reader.read_u16()?;
        let opacity = reader.read_u8()?;
        reader.skip(3)?;
        let name = reader.read_string()?;

        Ok(Self {
            flags,
            kind,
            child_level,
            blend_mode,
            opacity,
            name,
        })
    }
}

/// Parse a cel chunk spanning `[chunk_start, chunk_end)` into a
/// [`Record::Cel`] or [`Record::LinkCel`].
///
/// Compressed cels are only inflated for 32 bpp files.
pub(crate) fn parse_cel(
    reader: &mut FieldReader<'_>,
    chunk_start: usize,
    chunk_end: usize,
    color_depth: u16,
) -> CelstreamResult<Record> {
    let layer_index = usize::from(reader.read_u16()?);
    let x = i32::from(reader.read_i16()?);
    let y = i32::from(reader.read_i16()?);
    let opacity = reader.read_u8()?;
    let cel_type = reader.read_u16()?;
    let z_index = reader.read_i16()?;
    reader.skip(5)?;

    match cel_type {
        cel_types::LINKED => {
            let source_frame = usize::from(reader.read_u16()?);
            Ok(Record::LinkCel(LinkCel {
                layer_index,
                source_frame,
            }))
        }
        cel_types::COMPRESSED if color_depth != 32 => {
            Err(CelstreamError::UnsupportedColorDepth { depth: color_depth })
        }
        cel_types::COMPRESSED => {
            let width = u32::from(reader.read_u16()?);
            let height = u32::from(reader.read_u16()?);
            let payload = reader.slice(reader.position(), chunk_end)?;
            let pixels = inflate_rgba(payload, width, height, chunk_start)?;
            Ok(Record::Cel(Cel {
                layer_index,
                x,
                y,
                width,
                height,
                opacity,
                z_index,
                pixels,
            }))
        }
        _ => Err(CelstreamError::UnsupportedCelEncoding { cel_type }),
    }
}

fn inflate_rgba(
    payload: &[u8],
    width: u32,
    height: u32,
    offset: usize,
) -> CelstreamResult<Vec<u8>> {
    let expected = (width as usize) * (height as usize) * 4;
    if expected == 0 {
        return Ok(Vec::new());
    }

    let pixels = miniz_oxide::inflate::decompress_to_vec_zlib_with_limit(payload, expected)
        .map_err(|err| CelstreamError::Inflate {
            offset,
            reason: format!("{:?}", err.status),
        })?;

    if pixels.len() != expected {
        return Err(CelstreamError::CorruptCel {
            offset,
            expected,
            actual: pixels.len(),
        });
    }
    Ok(pixels)
}

impl Tag {
    pub(crate) fn parse_all(reader: &mut FieldReader<'_>) -> CelstreamResult<Vec<Self>> {
        let count = reader.read_u16()?;
        reader.skip(8)?;

        let mut tags = Vec::with_capacity(usize::from(count));
        for _ in 0..count {
            let from = reader.read_u16()?;
            let to = reader.read_u16()?;
            let direction = reader.read_u8()?.into();
            let repeat = reader.read_u16()?;
            reader.skip(6)?;
            let [r, g, b] = reader.read_array()?;
            reader.skip(1)?;
            let name = reader.read_string()?;
            tags.push(Self {
                from,
                to,
                direction,
                repeat,
                color: Rgb8 { r, g, b },
                name,
            });
        }
        Ok(tags)
    }
}

impl UserData {
    pub(crate) fn parse(reader: &mut FieldReader<'_>) -> CelstreamResult<Self> {
        let flags = UserDataFlags::from_bits_retain(reader.read_u32()?);

        let text = if flags.contains(UserDataFlags::HAS_TEXT) {
            reader.read_string()?
        } else {
            String::new()
        };
        let color = if flags.contains(UserDataFlags::HAS_COLOR) {
            Rgba8::from_array(reader.read_array()?)
        } else {
            Rgba8::transparent()
        };

        Ok(Self { text, color })
    }
}

impl Slice {
    pub(crate) fn parse(reader: &mut FieldReader<'_>) -> CelstreamResult<Self> {
        let key_count = reader.read_u32()?;
        let flags = SliceFlags::from_bits_retain(reader.read_u32()?);
        reader.skip(4)?;
        let name = reader.read_string()?;

        // Each key is at least 20 bytes; cap the reservation by what the
        // buffer could possibly hold.
        let capacity = (key_count as usize).min(reader.remaining() / 20);
        let mut keys = Vec::with_capacity(capacity);
        for _ in 0..key_count {
            let frame = reader.read_u32()?;
            let bounds = read_rect(reader)?;
            let center = if flags.contains(SliceFlags::HAS_CENTER) {
                read_rect(reader)?
            } else {
                Rect::default()
            };
            let pivot = if flags.contains(SliceFlags::HAS_PIVOT) {
                Point {
                    x: reader.read_i32()?,
                    y: reader.read_i32()?,
                }
            } else {
                Point::default()
            };
            keys.push(SliceKey {
                frame,
                bounds,
                center,
                pivot,
            });
        }

        Ok(Self { name, keys })
    }
}

fn read_rect(reader: &mut FieldReader<'_>) -> CelstreamResult<Rect> {
    Ok(Rect {
        x: reader.read_i32()?,
        y: reader.read_i32()?,
        w: reader.read_u32()?,
        h: reader.read_u32()?,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/format/chunks.rs"]
mod tests;
