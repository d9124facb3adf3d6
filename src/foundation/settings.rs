use crate::foundation::error::{CelstreamError, CelstreamResult};

/// Knobs shared by the decoder and the compositor.
///
/// Deserializes from partial documents: missing fields keep their defaults.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct DecodeSettings {
    /// Reject files whose header or frame magic numbers do not match.
    pub check_magic: bool,
    /// Upper bound on `width * height` of the canvas. `None` means unbounded.
    pub max_canvas_pixels: Option<u64>,
}

impl Default for DecodeSettings {
    fn default() -> Self {
        Self {
            check_magic: true,
            max_canvas_pixels: None,
        }
    }
}

impl DecodeSettings {
    /// Settings that accept anything structurally parseable.
    pub fn permissive() -> Self {
        Self {
            check_magic: false,
            max_canvas_pixels: None,
        }
    }

    /// Check a canvas size against [`DecodeSettings::max_canvas_pixels`].
    pub fn check_canvas(&self, width: u16, height: u16) -> CelstreamResult<()> {
        let pixels = u64::from(width) * u64::from(height);
        match self.max_canvas_pixels {
            Some(max) if pixels > max => Err(CelstreamError::validation(format!(
                "canvas {width}x{height} exceeds the limit of {max} pixels"
            ))),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/settings.rs"]
mod tests;
