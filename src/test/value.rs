use serde::Serialize;

use crate::{
    error::Error, from_bytes, from_reader, to_bytes, to_bytes_with_opts, to_value, ByteArray,
    Compound, IntArray, LongArray, SerOpts, Tag, Value,
};

use super::builder::Builder;

fn every_tag() -> Vec<u8> {
    Builder::new()
        .start_compound("")
        .byte("byte", 1)
        .short("short", 2)
        .int("int", 3)
        .long("long", 4)
        .float("float", 5.5)
        .double("double", 6.5)
        .byte_array("byte_array", &[1, 2])
        .string("string", "text")
        .start_list("list", Tag::Short, 2)
        .short_payload(7)
        .short_payload(8)
        .start_compound("compound")
        .int("inner", 9)
        .end_compound()
        .int_array("int_array", &[10, 11])
        .long_array("long_array", &[12])
        .end_compound()
        .build()
}

#[test]
fn every_tag_into_value() {
    let payload = every_tag();
    let v: Value = from_bytes(&payload).unwrap();
    let compound = v.as_compound().unwrap();

    assert_eq!(compound["byte"], Value::Byte(1));
    assert_eq!(compound["short"], Value::Short(2));
    assert_eq!(compound["int"], Value::Int(3));
    assert_eq!(compound["long"], Value::Long(4));
    assert_eq!(compound["float"], Value::Float(5.5));
    assert_eq!(compound["double"], Value::Double(6.5));
    assert_eq!(
        compound["byte_array"],
        Value::ByteArray(ByteArray::new(vec![1, 2]))
    );
    assert_eq!(compound["string"], Value::String("text".to_owned()));
    assert_eq!(
        compound["list"],
        Value::List(vec![Value::Short(7), Value::Short(8)])
    );
    assert_eq!(compound["compound"].as_compound().unwrap()["inner"], Value::Int(9));
    assert_eq!(
        compound["int_array"],
        Value::IntArray(IntArray::new(vec![10, 11]))
    );
    assert_eq!(
        compound["long_array"],
        Value::LongArray(LongArray::new(vec![12]))
    );

    let from_read: Value = from_reader(payload.as_slice()).unwrap();
    assert_eq!(from_read, v);
}

#[test]
fn value_reencodes_to_same_bytes() {
    // Entries in the builder are in sorted order, so sorted keys reproduce
    // the input exactly.
    let payload = Builder::new()
        .start_compound("")
        .byte_array("a", &[1, -1])
        .double("b", 0.5)
        .start_list("c", Tag::Compound, 1)
        .start_anon_compound()
        .long_array("x", &[1, 2])
        .string("y", "why")
        .end_compound()
        .int_array("d", &[])
        .start_list("e", Tag::List, 2)
        .start_anon_list(Tag::Byte, 1)
        .byte_payload(3)
        .start_anon_list(Tag::End, 0)
        .end_compound()
        .build();

    let v: Value = from_bytes(&payload).unwrap();
    assert_eq!(to_bytes(&v).unwrap(), payload);
}

#[test]
fn value_at_root() {
    let payload = Builder::new().int("", 42).build();
    let v: Value = from_bytes(&payload).unwrap();
    assert_eq!(v, Value::Int(42));
    assert_eq!(to_bytes(&v).unwrap(), payload);
}

#[test]
fn empty_list_value() {
    let payload = Builder::new()
        .start_compound("")
        .start_list("empty", Tag::End, 0)
        .end_compound()
        .build();

    let v: Compound = from_bytes(&payload).unwrap();
    assert_eq!(v["empty"], Value::List(vec![]));
    assert_eq!(to_bytes(&v).unwrap(), payload);
}

#[test]
fn mixed_list_value_fails() {
    let v = Value::List(vec![Value::Int(1), Value::Long(2)]);
    assert!(matches!(to_bytes(&v), Err(Error::UnsupportedShape(_))));
}

#[test]
fn to_value_arrays_and_lists() {
    #[derive(Serialize)]
    struct V {
        fixed_ints: [i32; 2],
        fixed_shorts: [i16; 2],
        growable: Vec<i64>,
        longs: LongArray,
        bytes: ByteArray,
        nested: Vec<Vec<i8>>,
    }

    let v = to_value(V {
        fixed_ints: [1, 2],
        fixed_shorts: [3, 4],
        growable: vec![5],
        longs: LongArray::new(vec![6]),
        bytes: ByteArray::new(vec![]),
        nested: vec![vec![7]],
    })
    .unwrap();

    let c = v.as_compound().unwrap();
    assert_eq!(c["fixed_ints"], Value::IntArray(IntArray::new(vec![1, 2])));
    assert_eq!(
        c["fixed_shorts"],
        Value::List(vec![Value::Short(3), Value::Short(4)])
    );
    assert_eq!(c["growable"], Value::List(vec![Value::Long(5)]));
    assert_eq!(c["longs"], Value::LongArray(LongArray::new(vec![6])));
    assert_eq!(c["bytes"], Value::ByteArray(ByteArray::new(vec![])));
    assert_eq!(
        c["nested"],
        Value::List(vec![Value::List(vec![Value::Byte(7)])])
    );
}

#[test]
fn to_value_matches_serializer() {
    #[derive(Serialize)]
    #[serde(rename_all = "snake_case")]
    enum Kind {
        Stone,
    }

    #[derive(Serialize)]
    struct V {
        kind: Kind,
        missing: Option<i32>,
        present: Option<i32>,
        flag: bool,
        letter: char,
        pos: [i64; 3],
    }

    let original = V {
        kind: Kind::Stone,
        missing: None,
        present: Some(1),
        flag: true,
        letter: 'x',
        pos: [1, 2, 3],
    };

    let v = to_value(&original).unwrap();
    let c = v.as_compound().unwrap();
    assert_eq!(c["kind"].as_str(), Some("stone"));
    assert!(!c.contains_key("missing"));
    assert_eq!(c["present"], Value::Int(1));
    assert_eq!(c["flag"], Value::Byte(1));
    assert_eq!(c["letter"], Value::Int('x' as i32));

    // Keys of a Value compound are sorted, so compare against a serializer
    // that keeps the Value's order.
    let from_value: Compound = from_bytes(&to_bytes(&v).unwrap()).unwrap();
    let from_struct: Compound = from_bytes(&to_bytes(&original).unwrap()).unwrap();
    assert_eq!(from_value, from_struct);
}

#[test]
fn to_value_errors() {
    #[derive(Serialize)]
    enum Shape {
        Circle(f32),
    }

    assert!(matches!(
        to_value(Shape::Circle(1.0)),
        Err(Error::UnsupportedShape(_))
    ));
    assert!(matches!(to_value(()), Err(Error::UnsupportedShape(_))));
    assert!(matches!(
        to_value(Option::<i32>::None),
        Err(Error::UnsupportedShape(_))
    ));
    assert!(matches!(
        to_value(vec![Some(1), None]),
        Err(Error::UnsupportedShape(_))
    ));
    assert!(matches!(
        to_value((1i32, "two")),
        Err(Error::UnsupportedShape(_))
    ));

    let mut bad_keys = std::collections::HashMap::new();
    bad_keys.insert(1i32, 1i32);
    assert!(matches!(to_value(bad_keys), Err(Error::UnsupportedShape(_))));
}

#[test]
fn tags_of_values() {
    assert_eq!(Value::Byte(0).tag(), Tag::Byte);
    assert_eq!(Value::from("s").tag(), Tag::String);
    assert_eq!(Value::from(true), Value::Byte(1));
    assert_eq!(Value::from(u32::MAX), Value::Int(-1));
    assert_eq!(Value::from(vec![Value::Int(1)]).tag(), Tag::List);
    assert_eq!(Value::from(Compound::new()).tag(), Tag::Compound);
    assert_eq!(Value::from(IntArray::new(vec![])).tag(), Tag::IntArray);
}

#[test]
fn value_accessors() {
    assert_eq!(Value::Short(-3).as_i64(), Some(-3));
    assert_eq!(Value::Float(1.5).as_i64(), None);
    assert_eq!(Value::Int(2).as_f64(), Some(2.0));
    assert_eq!(Value::Double(2.5).as_f64(), Some(2.5));
    assert_eq!(Value::Int(2).as_str(), None);
    assert_eq!(
        Value::List(vec![Value::Byte(1)]).as_list(),
        Some(&[Value::Byte(1)][..])
    );
    assert!(Value::Int(1).as_compound().is_none());
}

#[test]
fn unsorted_compound_keeps_map_order() {
    let mut c = Compound::new();
    c.insert("only".to_owned(), Value::Int(1));

    let opts = SerOpts::new().sort_map_keys(false);
    let bs = to_bytes_with_opts(&c, opts).unwrap();
    let expected = Builder::new()
        .start_compound("")
        .int("only", 1)
        .end_compound()
        .build();
    assert_eq!(bs, expected);
}

#[test]
fn json_into_value() {
    let json = r#"{"name": "Steve", "level": 30, "pos": [1.5, 2.5], "ok": true}"#;
    let v: Value = serde_json::from_str(json).unwrap();
    let c = v.as_compound().unwrap();

    assert_eq!(c["name"].as_str(), Some("Steve"));
    // JSON numbers carry no width, so integers arrive as Long.
    assert_eq!(c["level"], Value::Long(30));
    assert_eq!(
        c["pos"],
        Value::List(vec![Value::Double(1.5), Value::Double(2.5)])
    );
    assert_eq!(c["ok"], Value::Byte(1));

    let bs = to_bytes(&v).unwrap();
    let back: Value = from_bytes(&bs).unwrap();
    assert_eq!(back, v);
}

#[test]
fn arrays_into_json() {
    let payload = Builder::new()
        .start_compound("")
        .int_array("ints", &[1, 2, 3])
        .byte_array("bytes", &[-1])
        .end_compound()
        .build();

    let v: Value = from_bytes(&payload).unwrap();
    let json = serde_json::to_value(&v).unwrap();
    assert_eq!(json["ints"], serde_json::json!([1, 2, 3]));
    assert_eq!(json["bytes"], serde_json::json!([-1]));
}

#[test]
fn gzip_round_trip() {
    use std::io::{Read, Write};

    use flate2::{read::GzDecoder, write::GzEncoder, Compression};

    let payload = every_tag();
    let v: Value = from_bytes(&payload).unwrap();

    let mut encoder = GzEncoder::new(Vec::new(), Compression::fast());
    crate::to_writer(&mut encoder, &v).unwrap();
    let compressed = encoder.finish().unwrap();

    let mut decompressed = Vec::new();
    GzDecoder::new(compressed.as_slice())
        .read_to_end(&mut decompressed)
        .unwrap();
    let back: Value = from_bytes(&decompressed).unwrap();
    assert_eq!(back, v);

    let streamed: Value = from_reader(GzDecoder::new(compressed.as_slice())).unwrap();
    assert_eq!(streamed, v);

    // Writing into the encoder directly gives the same payload.
    let mut encoder = GzEncoder::new(Vec::new(), Compression::fast());
    encoder.write_all(&to_bytes(&v).unwrap()).unwrap();
    let again: Value = from_reader(GzDecoder::new(encoder.finish().unwrap().as_slice())).unwrap();
    assert_eq!(again, v);
}

#[test]
fn compound_keyed_by_array_token_reads_as_array() {
    let payload = Builder::new()
        .start_compound("")
        .start_list("__nbtwire_int_array", Tag::Int, 2)
        .int_payload(1)
        .int_payload(2)
        .byte("dropped", 1)
        .end_compound()
        .build();

    let v: Value = from_bytes(&payload).unwrap();
    assert_eq!(v, Value::IntArray(IntArray::new(vec![1, 2])));
}
