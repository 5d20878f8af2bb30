// covers the framing primitives, tagged values and collections, then the
// serde bridge in the same manner: round trips plus checks that types that
// should share a binary representation actually do
use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::*;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Point {
    x: Half,
    y: Half,
}

impl Payload for Point {
    const TYPE_TAG: &'static str = "test.point";

    fn write_payload(&self, w: &mut BinaryWriter) -> Result<()> {
        w.write(self.x);
        w.write(self.y);
        Ok(())
    }

    fn read_payload(r: &mut BinaryReader<'_>) -> Result<Self> {
        Ok(Self {
            x: r.read()?,
            y: r.read()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Label {
    text: String,
    weight: u32,
}

crate::serde_payload!(Label = "test.label");

#[derive(Debug, Clone, Copy, PartialEq)]
struct Flag(bool);

impl Payload for Flag {
    const TYPE_TAG: &'static str = "test.flag";

    fn write_payload(&self, w: &mut BinaryWriter) -> Result<()> {
        w.write_bool(self.0);
        Ok(())
    }

    fn read_payload(r: &mut BinaryReader<'_>) -> Result<Self> {
        r.read_bool().map(Self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
struct Unregistered(u8);

crate::serde_payload!(Unregistered = "test.unregistered");

// writes part of its payload, then fails
#[derive(Debug)]
struct HalfWritten;

impl Payload for HalfWritten {
    const TYPE_TAG: &'static str = "test.half_written";

    fn write_payload(&self, w: &mut BinaryWriter) -> Result<()> {
        w.write(0xDEADu16);
        Err(Error::Custom("gave up halfway".to_owned()))
    }

    fn read_payload(_: &mut BinaryReader<'_>) -> Result<Self> {
        Ok(Self)
    }
}

crate::type_registry! {
    static REGISTRY = [Point, Label, Flag];
}

fn point(x: f32, y: f32) -> Point {
    Point {
        x: Half::from_f32(x),
        y: Half::from_f32(y),
    }
}

fn label(text: &str, weight: u32) -> Label {
    Label {
        text: text.to_owned(),
        weight,
    }
}

macro_rules! round_trip_fixed {
    ($($Ty:ty => [$($v:expr),* $(,)?];)*) => {$(
        for v in [$($v),*] {
            let v: $Ty = v;
            let mut w = BinaryWriter::new();
            w.write(v);
            let bytes = w.into_inner();
            assert_eq!(bytes.len(), size_of::<$Ty>(), "{} must be fixed width", stringify!($Ty));

            let mut r = BinaryReader::new(&bytes);
            let back: $Ty = r.read().expect("reading must work");
            assert_eq!(
                FixedWidth::to_be_bytes(back),
                FixedWidth::to_be_bytes(v),
                "{} must round trip",
                stringify!($Ty)
            );
            r.finish().expect("value must be fully read");
        }
    )*};
}

#[test]
fn fixed_width_round_trip() {
    round_trip_fixed! {
        u8 => [0, 1, u8::MAX];
        u16 => [0, 1, u16::MAX];
        u32 => [0, 1, u32::MAX];
        u64 => [0, 1, u64::MAX];
        u128 => [0, 1, u128::MAX];
        i8 => [0, -1, i8::MIN, i8::MAX];
        i16 => [0, -1, i16::MIN, i16::MAX];
        i32 => [0, -1, i32::MIN, i32::MAX];
        i64 => [0, -1, i64::MIN, i64::MAX];
        i128 => [0, -1, i128::MIN, i128::MAX];
        f32 => [0.0, -1.0, f32::MIN, f32::MAX, f32::NAN];
        f64 => [0.0, -1.0, f64::MIN, f64::MAX, f64::NEG_INFINITY];
        Half => [Half::ZERO, Half::NEG_ONE, Half::MIN, Half::MAX, Half::SIGNALING_NAN];
    }
}

#[test]
fn fixed_width_is_big_endian() {
    let mut w = BinaryWriter::new();
    w.write(0x0102_0304u32);
    w.write(-2i16);
    w.write(Half::ONE);
    w.write(1.0f32);
    w.write_bool(true);

    assert_eq!(
        w.as_bytes(),
        [1, 2, 3, 4, 0xFF, 0xFE, 0x3C, 0x00, 0x3F, 0x80, 0, 0, 1],
        "most significant byte must come first"
    );
    assert_eq!(w.position(), 13, "position is the buffer length");
}

#[test]
fn strings_and_bytes() {
    let mut w = BinaryWriter::new();
    w.write_str("").expect("empty string must write");
    w.write_str("héllo").expect("string must write");
    w.write_bytes(&[]).expect("empty bytes must write");
    w.write_bytes(&[9, 8, 7]).expect("bytes must write");
    let bytes = w.into_inner();

    assert_eq!(bytes[..4], [0, 0, 0, 0], "empty string is just its prefix");
    assert_eq!(bytes[4..8], [0, 0, 0, 6], "prefix counts utf-8 bytes");

    let mut r = BinaryReader::new(&bytes);
    assert_eq!(r.read_str().expect("must read"), "", "empty string");
    assert_eq!(r.read_string().expect("must read"), "héllo", "string");
    assert_eq!(r.read_bytes().expect("must read"), [0u8; 0], "empty bytes");
    assert_eq!(r.read_byte_vec().expect("must read"), vec![9, 8, 7], "bytes");
    assert!(r.is_at_end(), "everything must be read");
}

#[test]
fn block_fidelity() {
    for len in [0usize, 1, 4096] {
        let data: Vec<u8> = (0..=255u8).cycle().take(len).collect();
        let mut w = BinaryWriter::new();
        w.write_bytes(&data).expect("block must write");
        w.write(0xAAu8);
        let bytes = w.into_inner();
        assert_eq!(bytes.len(), 4 + len + 1, "block is prefix plus data");

        let mut r = BinaryReader::new(&bytes);
        assert_eq!(r.read_bytes().expect("block must read"), data, "block of {len} bytes");
        assert_eq!(r.position(), 4 + len, "reader must stop at the block end");
        assert_eq!(r.read::<u8>().expect("sentinel must read"), 0xAA, "next value follows the block");
    }
}

#[test]
fn truncated_input_underruns() {
    let mut r = BinaryReader::new(&[1, 2, 3]);
    let err = r.read::<u32>().expect_err("3 bytes are not a u32");
    assert!(
        matches!(err, Error::BufferUnderrun { needed: 4, remaining: 3 }),
        "unexpected error: {err:?}"
    );
    assert_eq!(r.position(), 0, "failed reads must not advance");

    // prefix claims 10 bytes, only 2 follow
    let mut r = BinaryReader::new(&[0, 0, 0, 10, 1, 2]);
    let err = r.read_bytes().expect_err("block is cut short");
    assert!(
        matches!(err, Error::BufferUnderrun { needed: 10, remaining: 2 }),
        "unexpected error: {err:?}"
    );
    assert_eq!(r.remaining(), 6, "failed block reads must not advance");

    let mut r = BinaryReader::new(&[]);
    r.read_raw(0).expect("reading nothing always works");
    r.read::<u8>().expect_err("empty input has no byte");
}

#[test]
fn invalid_values() {
    let err = BinaryReader::new(&[2]).read_bool().expect_err("2 is not a bool");
    assert!(matches!(err, Error::InvalidBool), "unexpected error: {err:?}");

    let err = BinaryReader::new(&[0, 0, 0, 2, 0xC3, 0x28])
        .read_str()
        .expect_err("not utf-8");
    assert!(matches!(err, Error::InvalidUtf8), "unexpected error: {err:?}");

    let err = BinaryReader::new(&[1, 2]).finish().expect_err("unread bytes");
    assert!(matches!(err, Error::TrailingBytes(2)), "unexpected error: {err:?}");
}

#[cfg(target_pointer_width = "64")]
#[test]
fn oversized_block_len() {
    let len = usize::try_from(u32::MAX).expect("u32 fits usize") + 1;
    let err = writer::block_len(len).expect_err("too long for u32");
    assert!(matches!(err, Error::OversizedPayload(l) if l == len), "unexpected error: {err:?}");
    writer::block_len(len - 1).expect("u32::MAX still fits");
}

#[test]
fn tagged_round_trip() {
    let mut w = BinaryWriter::new();
    w.write_tagged(&point(1.5, -2.0)).expect("point must write");
    w.write_tagged(&label("north", 3)).expect("label must write");
    w.write_dyn(&Flag(true)).expect("flag must write");
    let bytes = w.into_inner();

    let mut r = BinaryReader::new(&bytes);
    let p: Point = r.read_tagged(&REGISTRY).expect("point must read");
    assert_eq!(p, point(1.5, -2.0), "point must round trip");

    let l = r.read_tagged_dyn(&REGISTRY).expect("label must read");
    assert!(l.is::<Label>(), "dynamic type must be Label");
    assert_eq!(l.downcast_ref::<Label>(), Some(&label("north", 3)), "label must round trip");

    let f = r.read_tagged_dyn(&REGISTRY).expect("flag must read");
    assert_eq!(*f.downcast::<Flag>().expect("must be a flag"), Flag(true), "flag must round trip");
    r.finish().expect("everything must be read");
}

#[test]
fn tagged_layout() {
    let mut w = BinaryWriter::new();
    w.write_tagged(&Flag(true)).expect("flag must write");

    let mut expected = vec![0, 0, 0, 9];
    expected.extend_from_slice(b"test.flag");
    expected.extend_from_slice(&[0, 0, 0, 1, 1]);
    assert_eq!(w.into_inner(), expected, "tag block then payload block");
}

#[test]
fn tagged_type_mismatch() {
    let mut w = BinaryWriter::new();
    w.write_tagged(&point(0.0, 0.0)).expect("point must write");
    let bytes = w.into_inner();

    let err = BinaryReader::new(&bytes)
        .read_tagged::<Label>(&REGISTRY)
        .expect_err("a point is not a label");
    match err {
        Error::TypeMismatch { expected, received } => {
            assert!(expected.ends_with("Label"), "expected names the requested type: {expected}");
            assert!(received.ends_with("Point"), "received names the registered type: {received}");
        },
        _ => panic!("incorrect error kind: {err:?}"),
    }

    let boxed = BinaryReader::new(&bytes)
        .read_tagged_dyn(&REGISTRY)
        .expect("point must read");
    assert!(!boxed.is::<Flag>(), "a point is not a flag");
    let err = boxed.downcast::<Flag>().expect_err("a point is not a flag");
    assert!(matches!(err, Error::TypeMismatch { .. }), "unexpected error: {err:?}");
}

#[test]
fn tagged_unknown_tag() {
    let mut w = BinaryWriter::new();
    w.write_tagged(&Unregistered(4)).expect("must write");
    let bytes = w.into_inner();

    let err = BinaryReader::new(&bytes)
        .read_tagged_dyn(&REGISTRY)
        .expect_err("tag is not registered");
    assert!(
        matches!(&err, Error::UnknownTypeTag(tag) if tag == "test.unregistered"),
        "unexpected error: {err:?}"
    );
}

#[test]
fn tagged_payload_must_fill_block() {
    let mut w = BinaryWriter::new();
    w.write_str(Flag::TYPE_TAG).expect("tag must write");
    w.write_bytes(&[1, 0]).expect("block must write");
    let bytes = w.into_inner();

    let err = BinaryReader::new(&bytes)
        .read_tagged::<Flag>(&REGISTRY)
        .expect_err("flag leaves a byte in its block");
    assert!(matches!(err, Error::TrailingBytes(1)), "unexpected error: {err:?}");

    // and it must never read past the block either
    let mut w = BinaryWriter::new();
    w.write_str(Point::TYPE_TAG).expect("tag must write");
    w.write_bytes(&[0x3C, 0x00]).expect("block must write");
    w.write(0x3C00u16);
    let bytes = w.into_inner();

    let err = BinaryReader::new(&bytes)
        .read_tagged::<Point>(&REGISTRY)
        .expect_err("point needs 4 bytes");
    assert!(
        matches!(err, Error::BufferUnderrun { needed: 2, remaining: 0 }),
        "unexpected error: {err:?}"
    );
}

#[test]
fn tagged_failed_write_leaves_nothing() {
    let mut w = BinaryWriter::new();
    w.write(7u8);

    let err = w.write_tagged(&HalfWritten).expect_err("payload fails");
    assert!(matches!(err, Error::Custom(_)), "unexpected error: {err:?}");
    assert_eq!(w.position(), 1, "failed tagged write must not grow the buffer");

    w.write_dyn(&HalfWritten).expect_err("payload fails");
    assert_eq!(w.position(), 1, "failed dyn write must not grow the buffer");

    let items: Vec<Box<dyn DynPayload>> = vec![Box::new(Flag(true)), Box::new(HalfWritten)];
    write_collection(&mut w, &items).expect_err("second item fails");
    assert_eq!(w.as_bytes(), [7], "failed collection must not leave a partial frame");

    w.write(9u8);
    let bytes = w.into_inner();
    let mut r = BinaryReader::new(&bytes);
    assert_eq!(r.read::<u8>().expect("must read"), 7, "value before the failures");
    assert_eq!(r.read::<u8>().expect("must read"), 9, "value after the failures");
    r.finish().expect("nothing else was written");
}

#[test]
fn tagged_failed_read_does_not_advance() {
    let mut w = BinaryWriter::new();
    w.write_tagged(&Unregistered(4)).expect("must write");
    w.write_tagged(&point(1.0, 2.0)).expect("point must write");
    let bytes = w.into_inner();

    let mut r = BinaryReader::new(&bytes);
    r.read_tagged_dyn(&REGISTRY).expect_err("tag is not registered");
    r.read_tagged::<Point>(&REGISTRY).expect_err("tag is not registered");
    assert_eq!(r.position(), 0, "unknown tags must not advance");
    assert_eq!(r.remaining(), bytes.len(), "unknown tags must not consume input");

    // step over the unregistered value by hand
    r.read_str().expect("tag must read");
    r.read_bytes().expect("payload must read");
    let start = r.position();

    let err = r.read_tagged::<Label>(&REGISTRY).expect_err("a point is not a label");
    assert!(matches!(err, Error::TypeMismatch { .. }), "unexpected error: {err:?}");
    assert_eq!(r.position(), start, "type mismatches must not advance");

    let err = r.read_tagged::<Flag>(&REGISTRY).expect_err("a point is not a flag");
    assert!(matches!(err, Error::TypeMismatch { .. }), "unexpected error: {err:?}");
    assert_eq!(r.position(), start, "type mismatches must not advance");

    let p: Point = r.read_tagged(&REGISTRY).expect("point must read after failures");
    assert_eq!(p, point(1.0, 2.0), "point must round trip");
    r.finish().expect("everything must be read");

    // a payload that fails inside its block leaves the reader in place too
    let mut w = BinaryWriter::new();
    w.write_str(Flag::TYPE_TAG).expect("tag must write");
    w.write_bytes(&[1, 0]).expect("block must write");
    let bytes = w.into_inner();

    let mut r = BinaryReader::new(&bytes);
    r.read_tagged_dyn(&REGISTRY).expect_err("flag leaves a byte in its block");
    assert_eq!(r.position(), 0, "bad payloads must not advance");
}

#[test]
fn payload_helpers() {
    let l = label("east", 7);
    let bytes = payload_bytes(&l).expect("must encode");
    assert_eq!(bytes, to_vec(&l).expect("must serialize"), "serde payloads use the bridge");
    assert_eq!(payload_from_bytes::<Label>(&bytes).expect("must decode"), l, "must round trip");

    let boxed: Box<dyn DynPayload> = Box::new(l.clone());
    assert_eq!(boxed.type_tag(), "test.label", "dyn tag");
    assert_eq!(boxed.to_payload_bytes().expect("must encode"), bytes, "dyn bytes");

    let mut long = bytes.clone();
    long.push(0);
    let err = payload_from_bytes::<Label>(&long).expect_err("extra byte");
    assert!(matches!(err, Error::TrailingBytes(1)), "unexpected error: {err:?}");
}

#[test]
fn registry_lookup() {
    assert_eq!(REGISTRY.len(), 3, "three types are registered");
    assert!(!REGISTRY.is_empty(), "registry has types");
    assert!(REGISTRY.contains("test.label"), "label is registered");
    assert!(!REGISTRY.contains("test.unregistered"), "unregistered is not");
    assert_eq!(
        REGISTRY.tags().collect::<Vec<_>>(),
        ["test.point", "test.label", "test.flag"],
        "tags keep registration order"
    );

    let entry = REGISTRY.get("test.point").expect("point is registered");
    assert_eq!(entry.tag(), "test.point", "entry tag");
    assert_eq!(entry.type_id(), std::any::TypeId::of::<Point>(), "entry type");

    let empty = TypeRegistry::builder().build();
    assert!(empty.is_empty(), "nothing registered");
    assert!(empty.get("test.point").is_none(), "nothing to find");
}

#[test]
#[should_panic(expected = "registered for both")]
fn registry_duplicate_panics() {
    #[derive(Debug)]
    struct FakePoint;

    impl Payload for FakePoint {
        const TYPE_TAG: &'static str = "test.point";

        fn write_payload(&self, _: &mut BinaryWriter) -> Result<()> {
            Ok(())
        }

        fn read_payload(_: &mut BinaryReader<'_>) -> Result<Self> {
            Ok(Self)
        }
    }

    _ = TypeRegistry::builder()
        .register::<Point>()
        .register::<FakePoint>();
}

#[test]
fn registry_concurrent_first_access() {
    use std::sync::Barrier;

    crate::type_registry! {
        static SHARED = [Point, Label, Flag];
    }

    const THREADS: usize = 8;
    let barrier = Barrier::new(THREADS);

    let seen: Vec<(usize, usize)> = std::thread::scope(|s| {
        let handles: Vec<_> = (0..THREADS)
            .map(|_| {
                s.spawn(|| {
                    barrier.wait();
                    let entry = SHARED.get("test.label").expect("label is registered");
                    assert_eq!(
                        entry.type_id(),
                        std::any::TypeId::of::<Label>(),
                        "entry type must be the same on every thread"
                    );
                    (SHARED.len(), std::ptr::from_ref::<TypeRegistry>(&SHARED).addr())
                })
            })
            .collect();

        handles
            .into_iter()
            .map(|h| h.join().expect("lookup thread must not panic"))
            .collect()
    });

    assert_eq!(seen.len(), THREADS, "every thread reports back");
    let (_, first) = seen[0];
    for &(len, addr) in &seen {
        assert_eq!(len, 3, "every thread sees all types");
        assert_eq!(addr, first, "every thread sees the same registry");
    }
}

fn sample_items() -> Vec<Box<dyn DynPayload>> {
    vec![
        Box::new(point(1.0, 2.0)),
        Box::new(label("west", 1)),
        Box::new(point(-0.5, 65504.0)),
        Box::new(Flag(false)),
        Box::new(label("", 0)),
    ]
}

#[test]
fn collection_round_trip() {
    let items = sample_items();
    let bytes = encode_collection(&items).expect("must encode");
    let back = decode_collection(&bytes, &REGISTRY).expect("must decode");

    assert_eq!(back.len(), items.len(), "item count");
    for (a, b) in items.iter().zip(&back) {
        assert_eq!(a.type_tag(), b.type_tag(), "dynamic types must match in order");
        assert_eq!(
            a.to_payload_bytes().expect("must encode"),
            b.to_payload_bytes().expect("must encode"),
            "payloads must match"
        );
    }

    assert_eq!(back[2].downcast_ref::<Point>(), Some(&point(-0.5, 65504.0)), "typed access");
    assert_eq!(back[4].downcast_ref::<Label>(), Some(&label("", 0)), "typed access");
}

#[test]
fn collection_layout() {
    let items: Vec<Box<dyn DynPayload>> = vec![
        Box::new(Flag(true)),
        Box::new(point(1.0, 1.0)),
        Box::new(Flag(false)),
    ];
    let bytes = encode_collection(&items).expect("must encode");

    let mut r = BinaryReader::new(&bytes);
    assert_eq!(r.read_raw(4).expect("header"), b"ZDR1", "header marker");
    assert_eq!(r.read::<u32>().expect("tag count"), 2, "distinct tags only");
    assert_eq!(r.read_str().expect("tag"), "test.flag", "first appearance first");
    assert_eq!(r.read_str().expect("tag"), "test.point", "then the next new tag");
    assert_eq!(r.read_raw(4).expect("body"), b"ZDR2", "body marker");
    assert_eq!(r.read::<i32>().expect("item count"), 3, "item count");

    assert_eq!(r.read::<u32>().expect("index"), 0, "flag index");
    assert_eq!(r.read_bytes().expect("payload"), [1], "flag payload");
    assert_eq!(r.read::<u32>().expect("index"), 1, "point index");
    assert_eq!(r.read_bytes().expect("payload"), [0x3C, 0, 0x3C, 0], "point payload");
    assert_eq!(r.read::<u32>().expect("index"), 0, "flag index");
    assert_eq!(r.read_bytes().expect("payload"), [0], "flag payload");

    assert_eq!(r.read_raw(4).expect("footer"), b"ZDR3", "footer marker");
    r.finish().expect("nothing follows the footer");
}

#[test]
fn collection_empty() {
    let bytes = encode_collection(&[]).expect("must encode");
    assert_eq!(bytes.len(), 20, "markers and counts only");
    assert!(decode_collection(&bytes, &REGISTRY).expect("must decode").is_empty(), "no items");
}

#[test]
fn collection_unknown_tag() {
    let items: Vec<Box<dyn DynPayload>> = vec![Box::new(Flag(true)), Box::new(Unregistered(1))];
    let bytes = encode_collection(&items).expect("must encode");
    let err = decode_collection(&bytes, &REGISTRY).expect_err("tag is not registered");
    assert!(
        matches!(&err, Error::UnknownTypeTag(tag) if tag == "test.unregistered"),
        "unexpected error: {err:?}"
    );
}

/// Writes a collection by hand so that it can be malformed.
fn raw_collection(tags: &[&str], items: &[(u32, &[u8])], len: i32) -> Vec<u8> {
    let mut w = BinaryWriter::new();
    w.write(collection::HEADER_MARKER);
    w.write(u32::try_from(tags.len()).expect("few tags"));
    for tag in tags {
        w.write_str(tag).expect("tag must write");
    }

    w.write(collection::BODY_MARKER);
    w.write(len);
    for &(index, payload) in items {
        w.write(index);
        w.write_bytes(payload).expect("payload must write");
    }

    w.write(collection::FOOTER_MARKER);
    w.into_inner()
}

#[test]
fn collection_tags_resolve_first() {
    // no item uses the unknown tag, it still fails
    let bytes = raw_collection(&["test.flag", "test.missing"], &[], 0);
    let err = decode_collection(&bytes, &REGISTRY).expect_err("tag is not registered");
    assert!(
        matches!(&err, Error::UnknownTypeTag(tag) if tag == "test.missing"),
        "unexpected error: {err:?}"
    );
}

#[test]
fn collection_index_out_of_range() {
    let bytes = raw_collection(&["test.flag"], &[(0, &[1]), (1, &[1])], 2);
    let err = decode_collection(&bytes, &REGISTRY).expect_err("index 1 has no tag");
    assert!(
        matches!(err, Error::TypeIndexOutOfRange { index: 1, count: 1 }),
        "unexpected error: {err:?}"
    );
}

#[test]
fn collection_negative_count() {
    let bytes = raw_collection(&["test.flag"], &[], -1);
    let err = decode_collection(&bytes, &REGISTRY).expect_err("count is negative");
    assert!(matches!(err, Error::InvalidLength(-1)), "unexpected error: {err:?}");
}

#[test]
fn collection_bad_markers() {
    let good = encode_collection(&sample_items()).expect("must encode");

    let mut bad_header = good.clone();
    bad_header[3] = b'9';
    let err = decode_collection(&bad_header, &REGISTRY).expect_err("header is wrong");
    assert!(
        matches!(err, Error::MalformedMarker { expected, found } if expected == collection::HEADER_MARKER && found == four_cc(b"ZDR9")),
        "unexpected error: {err:?}"
    );

    let mut bad_footer = good.clone();
    let last = bad_footer.len() - 1;
    bad_footer[last] = b'0';
    let err = decode_collection(&bad_footer, &REGISTRY).expect_err("footer is wrong");
    assert!(
        matches!(err, Error::MalformedMarker { expected, .. } if expected == collection::FOOTER_MARKER),
        "unexpected error: {err:?}"
    );

    // count claims one more item than there is, so the footer is read as an index
    let bytes = raw_collection(&["test.flag"], &[(0, &[1])], 2);
    decode_collection(&bytes, &REGISTRY).expect_err("count is wrong");
}

#[test]
fn collection_truncated() {
    let good = encode_collection(&sample_items()).expect("must encode");
    for len in [0, 3, 10, good.len() / 2, good.len() - 1] {
        let err = decode_collection(&good[..len], &REGISTRY).expect_err("input is cut short");
        assert!(
            matches!(err, Error::BufferUnderrun { .. }),
            "cut at {len}: unexpected error: {err:?}"
        );
    }
}

#[test]
fn collection_trailing_bytes() {
    let mut bytes = encode_collection(&sample_items()).expect("must encode");
    bytes.extend_from_slice(&[0xDE, 0xAD]);

    let err = decode_collection(&bytes, &REGISTRY).expect_err("bytes follow the footer");
    assert!(matches!(err, Error::TrailingBytes(2)), "unexpected error: {err:?}");

    let mut r = BinaryReader::new(&bytes);
    let items = decode_collection_from(&mut r, &REGISTRY).expect("must decode");
    assert_eq!(items.len(), 5, "all items decode");
    assert_eq!(r.remainder(), [0xDE, 0xAD], "the rest is left to the caller");
}

// serde bridge

fn round_trip<T>(value: &T) -> Vec<u8>
where
    T: PartialEq + fmt::Debug + Serialize + serde::de::DeserializeOwned,
{
    let buf = to_vec(value).expect("serializing must work");
    let rev: T = from_slice(&buf).expect("deserializing must work");
    assert_eq!(*value, rev, "serialization messed up data");
    buf
}

fn assert_all_equal(iter: impl IntoIterator<Item = Vec<u8>>) {
    let mut peek = iter.into_iter().peekable();

    while let Some(item) = peek.next() {
        if let Some(next) = peek.peek() {
            assert_eq!(item, *next, "all serialized forms must be equal");
        }
    }
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct Unit;

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct NewType(u64);

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct Struct {
    a: i32,
    b: u16,
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct Tuple(i32, u16);

#[derive(Debug, PartialEq, Serialize, Deserialize)]
enum Enum {
    Unit,
    NewType(u64),
    Struct { a: i32, b: u16 },
    Tuple(i32, u16),
}

#[test]
fn serde_unit() {
    assert_all_equal([round_trip(&()), round_trip(&[0u64; 0]), round_trip(&Unit), Vec::new()]);
    assert_eq!(round_trip(&Enum::Unit), [0, 0, 0, 0], "variant index only");
}

#[test]
fn serde_tuple() {
    assert_all_equal([
        round_trip(&(87654321u64,)),
        round_trip(&[87654321u64]),
        round_trip(&NewType(87654321u64)),
    ]);
    assert_all_equal([
        round_trip(&(1u32, 87654321u64)),
        round_trip(&Enum::NewType(87654321u64)),
    ]);
    assert_all_equal([
        round_trip(&(87654321i32, 54321u16)),
        round_trip(&Tuple(87654321i32, 54321u16)),
        round_trip(&Struct {
            a: 87654321i32,
            b: 54321u16,
        }),
        vec![0x05, 0x39, 0x7F, 0xB1, 0xD4, 0x31],
    ]);
    assert_all_equal([
        round_trip(&(2u32, 87654321i32, 54321u16)),
        round_trip(&Enum::Struct {
            a: 87654321i32,
            b: 54321u16,
        }),
    ]);
    assert_all_equal([
        round_trip(&(3u32, 87654321i32, 54321u16)),
        round_trip(&Enum::Tuple(87654321i32, 54321u16)),
    ]);
}

#[test]
fn serde_list() {
    assert_all_equal([
        round_trip(&(3u32, 87654321, 54321, 321)),
        round_trip(&Cow::Borrowed(&[87654321, 54321, 321][..])),
        round_trip(&vec![87654321, 54321, 321]),
    ]);
}

#[test]
fn serde_string() {
    assert_all_equal([
        round_trip(&[0u8, 0, 0, 4, b'a', b'b', b'c', b'd']),
        round_trip(&"abcd".to_owned()),
        {
            let mut w = BinaryWriter::new();
            w.write_str("abcd").expect("must write");
            w.into_inner()
        },
    ]);
}

#[test]
fn serde_map() {
    use indexmap::IndexMap;

    assert_all_equal([
        round_trip(&(
            3u32,
            ("a".to_owned(), 'A'),
            ("b".to_owned(), 'B'),
            ("c".to_owned(), 'C'),
        )),
        round_trip(&IndexMap::<String, char>::from([
            ("a".to_owned(), 'A'),
            ("b".to_owned(), 'B'),
            ("c".to_owned(), 'C'),
        ])),
    ]);
}

#[test]
fn serde_option_and_half() {
    assert_eq!(round_trip(&Some(5u16)), [1, 0, 5], "some");
    assert_eq!(round_trip(&None::<u16>), [0], "none");
    assert_eq!(round_trip(&Half::ONE), [0x3C, 0x00], "half is its bits");
    assert_eq!(round_trip(&Some(Half::MIN)), [1, 0xFB, 0xFF], "optional half");
}

#[test]
fn serde_borrowed() {
    #[derive(Deserialize)]
    struct Borrowed<'a> {
        text: &'a str,
        data: &'a [u8],
    }

    let mut w = BinaryWriter::new();
    w.write_str("borrowed").expect("must write");
    w.write_bytes(&[1, 2, 3]).expect("must write");
    let bytes = w.into_inner();

    let value: Borrowed<'_> = from_slice(&bytes).expect("must deserialize");
    assert_eq!(value.text, "borrowed", "text");
    assert_eq!(value.data, [1, 2, 3], "data");
    assert!(std::ptr::eq(value.text.as_ptr(), bytes[4..].as_ptr()), "text must be borrowed");
}

#[test]
fn serde_errors() {
    let err = from_slice::<Vec<u8>>(&[0, 0, 0, 5, 1, 2, 3, 4]).expect_err("too short");
    assert!(
        matches!(err, Error::BufferUnderrun { needed: 1, remaining: 0 }),
        "unexpected error: {err:?}"
    );

    let err = from_slice::<u8>(&[1, 2]).expect_err("excess data");
    assert!(matches!(err, Error::TrailingBytes(1)), "unexpected error: {err:?}");

    let err = from_slice::<Option<u8>>(&[2]).expect_err("bad discriminator");
    assert!(matches!(err, Error::InvalidOption), "unexpected error: {err:?}");

    let err = from_slice::<char>(&[0, 0, 0xD8, 0]).expect_err("surrogate");
    assert!(matches!(err, Error::InvalidChar), "unexpected error: {err:?}");

    let err = from_slice::<bool>(&[7]).expect_err("bad bool");
    assert!(matches!(err, Error::InvalidBool), "unexpected error: {err:?}");

    let err = from_slice::<serde::de::IgnoredAny>(&[]).expect_err("any is unsupported");
    assert!(matches!(err, Error::AnyUnsupported), "unexpected error: {err:?}");
}

#[test]
fn serde_length_required() {
    struct Unsized;

    impl Serialize for Unsized {
        fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
        where
            S: serde::Serializer,
        {
            use serde::ser::SerializeSeq as _;

            serializer.serialize_seq(None)?.end()
        }
    }

    let err = to_vec(&Unsized).expect_err("no length hint");
    assert!(matches!(err, Error::LengthRequired), "unexpected error: {err:?}");
}
