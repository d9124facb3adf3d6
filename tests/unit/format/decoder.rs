use super::*;
use crate::{
    foundation::error::CelstreamError,
    testing::{
        CHUNK_PALETTE, FrameBuilder, LAYER_VISIBLE, SpriteBuilder, TagSpec, solid,
    },
};

fn collect(bytes: &[u8]) -> Vec<Record> {
    ChunkStream::new(bytes)
        .collect::<CelstreamResult<Vec<_>>>()
        .unwrap()
}

fn kinds(records: &[Record]) -> Vec<&'static str> {
    records
        .iter()
        .map(|r| match r {
            Record::Header(_) => "header",
            Record::Frame(_) => "frame",
            Record::Layer(_) => "layer",
            Record::Cel(_) => "cel",
            Record::LinkCel(_) => "link",
            Record::Tags(_) => "tags",
            Record::Slice(_) => "slice",
            Record::SliceUserData(_) => "user_data",
        })
        .collect()
}

#[test]
fn records_follow_file_order() {
    let bytes = SpriteBuilder::new(4, 4)
        .frame(
            FrameBuilder::new(100)
                .layer("bg", LAYER_VISIBLE)
                .tags(&[TagSpec {
                    from: 0,
                    to: 1,
                    direction: 0,
                    color: [0, 0, 0],
                    name: "all",
                }])
                .cel(0, 0, 0, 1, 1, &solid(1, 1, [1, 2, 3, 255]))
                .slice("s", 0, &[Default::default()])
                .user_data(Some("note"), None),
        )
        .frame(FrameBuilder::new(50).link_cel(0, 0))
        .build();

    let records = collect(&bytes);
    assert_eq!(
        kinds(&records),
        [
            "header", "frame", "layer", "tags", "cel", "slice", "user_data", "frame", "link"
        ]
    );
    let Record::Frame(second) = &records[7] else {
        panic!("expected a frame header");
    };
    assert_eq!(second.index, 1);
    assert_eq!(second.duration_ms, 50);
}

#[test]
fn unknown_and_ignored_chunks_are_skipped() {
    let bytes = SpriteBuilder::new(2, 2)
        .frame(
            FrameBuilder::new(100)
                .chunk(0x7777, &[1, 2, 3, 4, 5])
                .chunk(CHUNK_PALETTE, &[0; 20])
                .layer("a", LAYER_VISIBLE),
        )
        .build();

    assert_eq!(kinds(&collect(&bytes)), ["header", "frame", "layer"]);
}

#[test]
fn oversized_chunk_resyncs_to_declared_end() {
    let bytes = SpriteBuilder::new(2, 2)
        .frame(
            FrameBuilder::new(100)
                .chunk_with_size(0x2020, &crate::testing::user_data_body(Some("x"), None), 64)
                .layer("after", LAYER_VISIBLE),
        )
        .build();

    let records = collect(&bytes);
    assert_eq!(kinds(&records), ["header", "frame", "user_data", "layer"]);
    let Record::Layer(layer) = &records[3] else {
        panic!("expected a layer");
    };
    assert_eq!(layer.name, "after");
}

#[test]
fn undersized_chunk_size_still_advances() {
    // A size field of zero is treated as the bare 6-byte prefix.
    let bytes = SpriteBuilder::new(2, 2)
        .frame(
            FrameBuilder::new(100)
                .chunk_with_size(0x7777, &[], 0)
                .layer("a", LAYER_VISIBLE),
        )
        .build();

    assert_eq!(kinds(&collect(&bytes)), ["header", "frame", "layer"]);
}

#[test]
fn legacy_chunk_count_is_honored() {
    let bytes = SpriteBuilder::new(2, 2)
        .frame(
            FrameBuilder::new(100)
                .legacy_count_only()
                .layer("a", LAYER_VISIBLE)
                .layer("b", LAYER_VISIBLE),
        )
        .build();

    assert_eq!(kinds(&collect(&bytes)), ["header", "frame", "layer", "layer"]);
}

#[test]
fn frame_padding_is_skipped() {
    let bytes = SpriteBuilder::new(2, 2)
        .frame(
            FrameBuilder::new(100)
                .layer("a", LAYER_VISIBLE)
                .trailing_padding(7),
        )
        .frame(FrameBuilder::new(100).layer("b", LAYER_VISIBLE))
        .build();

    let records = collect(&bytes);
    assert_eq!(
        kinds(&records),
        ["header", "frame", "layer", "frame", "layer"]
    );
}

#[test]
fn stream_is_lazy_and_tracks_position() {
    let bytes = SpriteBuilder::new(2, 2)
        .frame(FrameBuilder::new(100).layer("a", LAYER_VISIBLE))
        .build();

    let mut stream = ChunkStream::new(&bytes);
    assert_eq!(stream.position(), 0);
    assert!(matches!(stream.next(), Some(Ok(Record::Header(_)))));
    assert_eq!(stream.position(), 128);
    assert!(matches!(stream.next(), Some(Ok(Record::Frame(_)))));
    assert_eq!(stream.position(), 144);
    assert!(matches!(stream.next(), Some(Ok(Record::Layer(_)))));
    assert!(stream.next().is_none());
    assert_eq!(stream.position(), bytes.len());
}

#[test]
fn error_fuses_the_stream() {
    let bytes = SpriteBuilder::new(2, 2)
        .frame(
            FrameBuilder::new(100)
                .cel_of_type(0, 0)
                .layer("never", LAYER_VISIBLE),
        )
        .build();

    let mut stream = ChunkStream::new(&bytes);
    assert!(matches!(stream.next(), Some(Ok(Record::Header(_)))));
    assert!(matches!(stream.next(), Some(Ok(Record::Frame(_)))));
    assert!(matches!(
        stream.next(),
        Some(Err(CelstreamError::UnsupportedCelEncoding { cel_type: 0 }))
    ));
    assert!(stream.next().is_none());
    assert!(stream.next().is_none());
}

#[test]
fn icc_profile_aborts() {
    let bytes = SpriteBuilder::new(2, 2)
        .frame(FrameBuilder::new(100).color_profile(2).layer("a", LAYER_VISIBLE))
        .build();

    let results: Vec<_> = ChunkStream::new(&bytes).collect();
    assert_eq!(results.len(), 3);
    assert!(matches!(
        results[2],
        Err(CelstreamError::UnsupportedColorProfile { kind: 2 })
    ));
}

#[test]
fn srgb_profile_is_silent() {
    let bytes = SpriteBuilder::new(2, 2)
        .frame(FrameBuilder::new(100).color_profile(1).layer("a", LAYER_VISIBLE))
        .build();

    assert_eq!(kinds(&collect(&bytes)), ["header", "frame", "layer"]);
}

#[test]
fn truncated_chunk_is_reported() {
    let mut bytes = SpriteBuilder::new(2, 2)
        .frame(FrameBuilder::new(100).layer("abcdef", LAYER_VISIBLE))
        .build();
    bytes.truncate(bytes.len() - 3);

    let last = ChunkStream::new(&bytes).last().unwrap();
    assert!(matches!(last, Err(CelstreamError::TruncatedInput { .. })));
}

#[test]
fn chunk_cannot_read_past_its_size() {
    // The layer body claims a 6-byte name but the chunk ends after 2 of them.
    let mut body = crate::testing::ByteWriter::new();
    body.u16(1).u16(0).u16(0).zeros(4).u16(0).u8(255).zeros(3).u16(6).bytes(b"ab");
    let body = body.into_bytes();
    let bytes = SpriteBuilder::new(2, 2)
        .frame(
            FrameBuilder::new(100)
                .chunk(0x2004, &body)
                .chunk(0x7777, b"cdef"),
        )
        .build();

    let last = ChunkStream::new(&bytes).last().unwrap();
    assert!(matches!(last, Err(CelstreamError::TruncatedInput { .. })));
}

#[test]
fn zero_frames_yields_only_the_header() {
    let bytes = SpriteBuilder::new(8, 8).build();
    assert_eq!(kinds(&collect(&bytes)), ["header"]);
}
