use crate::{
    foundation::core::{Point, Rect, Rgb8, Rgba8},
    format::{
        chunk::{AnimationDirection, LayerFlags, LayerKind},
        header::{FileHeader, FrameHeader},
    },
};

/// One item of the decoder's output, in file order.
#[derive(Clone, Debug, PartialEq)]
pub enum Record {
    /// The file header; always the first record.
    Header(FileHeader),
    /// Start of a frame; its chunks follow.
    Frame(FrameHeader),
    /// A layer declaration.
    Layer(Layer),
    /// A cel carrying its own pixels.
    Cel(Cel),
    /// A cel reusing another frame's cel on the same layer.
    LinkCel(LinkCel),
    /// All tags of the file.
    Tags(Vec<Tag>),
    /// A named, keyframed region.
    Slice(Slice),
    /// User data attached to the preceding chunk (typically a slice).
    SliceUserData(UserData),
}

/// A declared layer. Its index is its position in declaration order.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Layer {
    /// Flag word.
    pub flags: LayerFlags,
    /// Image, group or tilemap.
    pub kind: LayerKind,
    /// Nesting depth below the root.
    pub child_level: u16,
    /// Raw blend mode (not applied when compositing).
    pub blend_mode: u16,
    /// Layer opacity (not applied when compositing).
    pub opacity: u8,
    /// Display name.
    pub name: String,
}

impl Layer {
    /// Whether cels on this layer are painted.
    pub fn is_visible(&self) -> bool {
        self.flags.contains(LayerFlags::VISIBLE)
    }
}

/// A rectangle of inflated straight RGBA8 pixels placed on the canvas.
#[derive(Clone, PartialEq, Eq)]
pub struct Cel {
    /// Index into the declared layer list.
    pub layer_index: usize,
    /// Left edge on the canvas; may be negative.
    pub x: i32,
    /// Top edge on the canvas; may be negative.
    pub y: i32,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Cel opacity (not applied when compositing).
    pub opacity: u8,
    /// Z-index relative to the layer order (not applied when compositing).
    pub z_index: i16,
    /// Row-major RGBA8, `width * height * 4` bytes.
    pub pixels: Vec<u8>,
}

impl Cel {
    /// Placement on the canvas.
    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

impl std::fmt::Debug for Cel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cel")
            .field("layer_index", &self.layer_index)
            .field("bounds", &self.bounds())
            .field("opacity", &self.opacity)
            .field("z_index", &self.z_index)
            .field("pixels", &format_args!("[{} bytes]", self.pixels.len()))
            .finish()
    }
}

/// A cel that reuses the cel at the same layer of an earlier frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct LinkCel {
    /// Index into the declared layer list.
    pub layer_index: usize,
    /// Frame whose cel on this layer is reused.
    pub source_frame: usize,
}

/// A named range of frames.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Tag {
    /// First frame, inclusive.
    pub from: u16,
    /// Last frame, inclusive.
    pub to: u16,
    /// Playback direction.
    pub direction: AnimationDirection,
    /// Repeat count; 0 means forever.
    pub repeat: u16,
    /// Display color.
    pub color: Rgb8,
    /// Display name.
    pub name: String,
}

/// A named region with one entry per keyframe.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Slice {
    /// Display name.
    pub name: String,
    /// Keyframes in file order.
    pub keys: Vec<SliceKey>,
}

/// The state of a slice from `frame` onwards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SliceKey {
    /// First frame this key applies to.
    pub frame: u32,
    /// Slice bounds on the canvas.
    pub bounds: Rect,
    /// 9-slice center, relative to `bounds`; all zero when absent.
    pub center: Rect,
    /// Pivot, relative to `bounds`; origin when absent.
    pub pivot: Point,
}

/// Free text and color attached to the chunk before it.
///
/// Emitted as an independent record; pairing it with its slice is left to
/// the consumer.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct UserData {
    /// Text, empty when absent.
    pub text: String,
    /// Color, transparent black when absent.
    pub color: Rgba8,
}
