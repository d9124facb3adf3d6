use crate::format::{
    header::FileHeader,
    records::{Slice, Tag, UserData},
};

/// A fully composited animation frame.
#[derive(Clone, PartialEq, Eq)]
pub struct RenderedFrame {
    /// Zero-based frame index.
    pub index: usize,
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
    /// How long the frame is shown, in milliseconds.
    pub duration_ms: u16,
    /// Row-major, top-left origin, straight (non-premultiplied) RGBA8.
    pub data: Vec<u8>,
}

impl RenderedFrame {
    /// Pixel at `(x, y)`, or `None` outside the canvas.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let px = self.data.get(i..i + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Copy the frame into an [`image::RgbaImage`] for downstream encoders.
    pub fn to_image(&self) -> Option<image::RgbaImage> {
        image::RgbaImage::from_raw(self.width, self.height, self.data.clone())
    }

    /// Consume the frame into an [`image::RgbaImage`].
    pub fn into_image(self) -> Option<image::RgbaImage> {
        image::RgbaImage::from_raw(self.width, self.height, self.data)
    }
}

impl std::fmt::Debug for RenderedFrame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderedFrame")
            .field("index", &self.index)
            .field("width", &self.width)
            .field("height", &self.height)
            .field("duration_ms", &self.duration_ms)
            .field("data", &format_args!("[{} bytes]", self.data.len()))
            .finish()
    }
}

/// One item of the compositor's output, in file order.
#[derive(Clone, Debug, PartialEq)]
pub enum RenderOutput {
    /// The file header, passed through first.
    Header(FileHeader),
    /// A completed frame.
    Frame(RenderedFrame),
    /// All tags of the file.
    Tags(Vec<Tag>),
    /// A slice declaration.
    Slice(Slice),
    /// User data that followed a slice.
    SliceUserData(UserData),
}

impl RenderOutput {
    /// The frame, if this item is one.
    pub fn as_frame(&self) -> Option<&RenderedFrame> {
        match self {
            Self::Frame(frame) => Some(frame),
            _ => None,
        }
    }

    /// Take the frame out of this item, if it is one.
    pub fn into_frame(self) -> Option<RenderedFrame> {
        match self {
            Self::Frame(frame) => Some(frame),
            _ => None,
        }
    }
}
