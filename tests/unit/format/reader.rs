use super::*;

#[test]
fn reads_little_endian_widths() {
    let data = [0x01, 0x34, 0x12, 0x78, 0x56, 0x34, 0x12];
    let mut r = FieldReader::new(&data);
    assert_eq!(r.read_u8().unwrap(), 0x01);
    assert_eq!(r.read_u16().unwrap(), 0x1234);
    assert_eq!(r.read_u32().unwrap(), 0x1234_5678);
    assert_eq!(r.position(), 7);
    assert_eq!(r.remaining(), 0);
}

#[test]
fn signed_reads_reinterpret_the_sign_bit() {
    let data = [0xFF, 0xFF, 0x00, 0x80, 0xFE, 0xFF, 0xFF, 0xFF];
    let mut r = FieldReader::new(&data);
    assert_eq!(r.read_i16().unwrap(), -1);
    assert_eq!(r.read_i16().unwrap(), i16::MIN);
    assert_eq!(r.read_i32().unwrap(), -2);
}

#[test]
fn string_is_u16_length_prefixed() {
    let data = [5, 0, b'h', b'e', b'l', b'l', b'o', 0xAA];
    let mut r = FieldReader::new(&data);
    assert_eq!(r.read_string().unwrap(), "hello");
    assert_eq!(r.position(), 7);
}

#[test]
fn read_past_end_is_truncated_input() {
    let data = [1, 2, 3];
    let mut r = FieldReader::new(&data);
    r.skip(2).unwrap();
    match r.read_u16() {
        Err(CelstreamError::TruncatedInput { offset, need, have }) => {
            assert_eq!((offset, need, have), (2, 2, 1));
        }
        other => panic!("expected truncation, got {other:?}"),
    }
    // failed reads do not move the cursor
    assert_eq!(r.position(), 2);
}

#[test]
fn string_longer_than_buffer_is_truncated_input() {
    let data = [10, 0, b'a'];
    let mut r = FieldReader::new(&data);
    assert!(matches!(
        r.read_string(),
        Err(CelstreamError::TruncatedInput { .. })
    ));
}

#[test]
fn seek_past_end_fails_on_next_read() {
    let data = [0u8; 4];
    let mut r = FieldReader::new(&data);
    r.seek(100);
    assert_eq!(r.position(), 100);
    assert!(r.read_u8().is_err());
    assert!(r.skip(1).is_err());
}

#[test]
fn slice_does_not_move_cursor() {
    let data = [1, 2, 3, 4, 5];
    let mut r = FieldReader::new(&data);
    r.skip(1).unwrap();
    assert_eq!(r.slice(2, 5).unwrap(), &[3, 4, 5]);
    assert_eq!(r.position(), 1);
    assert!(r.slice(3, 6).is_err());
    assert!(r.slice(4, 3).is_err());
}

#[test]
fn limited_reader_stops_at_the_limit_but_keeps_offsets() {
    let data = [0u8, 1, 2, 3, 4, 5, 6, 7];
    let mut r = FieldReader::new(&data);
    r.seek(2);
    let mut limited = r.limited_to(5).unwrap();
    assert_eq!(limited.position(), 2);
    assert_eq!(limited.read_u16().unwrap(), 0x0302);
    assert!(limited.read_u16().is_err());
    assert_eq!(limited.read_u8().unwrap(), 4);
    assert!(r.limited_to(9).is_err());
}
