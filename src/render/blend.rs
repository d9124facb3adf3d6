use crate::{
    foundation::error::{CelstreamError, CelstreamResult},
    format::records::Cel,
};

/// Straight (non-premultiplied) RGBA8 pixel.
pub type StraightRgba8 = [u8; 4];

/// `a * b / 255` with rounding, in 8-bit fixed point.
pub fn mul_un8(a: u8, b: u8) -> u8 {
    let t = u32::from(a) * u32::from(b) + 0x80;
    (((t >> 8) + t) >> 8) as u8
}

/// Normal-mode merge of `src` onto `dst`.
///
/// Output alpha is the union of both alphas; color moves from `dst` towards
/// `src` by `sa / ra`, truncating toward zero.
pub fn blend_normal(dst: StraightRgba8, src: StraightRgba8) -> StraightRgba8 {
    let sa = i32::from(src[3]);
    let da = i32::from(dst[3]);
    let ra = sa + da - i32::from(mul_un8(dst[3], src[3]));
    if ra == 0 {
        return dst;
    }

    let channel = |d: u8, s: u8| {
        let d = i32::from(d);
        (d + (i32::from(s) - d) * sa / ra) as u8
    };

    [
        channel(dst[0], src[0]),
        channel(dst[1], src[1]),
        channel(dst[2], src[2]),
        ra as u8,
    ]
}

/// Paint `cel` onto a `width * height` straight RGBA8 canvas.
///
/// Only the part of the cel that overlaps the canvas is touched. Cel and
/// layer opacity are not applied.
pub fn composite_cel(canvas: &mut [u8], width: u32, height: u32, cel: &Cel) -> CelstreamResult<()> {
    let canvas_len = (width as usize) * (height as usize) * 4;
    if canvas.len() != canvas_len {
        return Err(CelstreamError::validation(
            "composite_cel expects a canvas of width*height*4 bytes",
        ));
    }
    let cel_w = i64::from(cel.width);
    let cel_h = i64::from(cel.height);
    if cel.pixels.len() as u64 != (cel_w * cel_h * 4) as u64 {
        return Err(CelstreamError::validation(
            "composite_cel expects cel pixels of width*height*4 bytes",
        ));
    }

    let (cx, cy) = (i64::from(cel.x), i64::from(cel.y));
    let x0 = cx.max(0);
    let x1 = (cx + cel_w).min(i64::from(width));
    let y0 = cy.max(0);
    let y1 = (cy + cel_h).min(i64::from(height));
    if x0 >= x1 || y0 >= y1 {
        return Ok(());
    }

    let stride = i64::from(width);
    for dy in y0..y1 {
        let sy = dy - cy;
        for dx in x0..x1 {
            let sx = dx - cx;
            let si = (4 * (sy * cel_w + sx)) as usize;
            let di = (4 * (dy * stride + dx)) as usize;

            let src = [
                cel.pixels[si],
                cel.pixels[si + 1],
                cel.pixels[si + 2],
                cel.pixels[si + 3],
            ];
            let dst = [canvas[di], canvas[di + 1], canvas[di + 2], canvas[di + 3]];
            canvas[di..di + 4].copy_from_slice(&blend_normal(dst, src));
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/render/blend.rs"]
mod tests;
