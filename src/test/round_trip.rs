use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::{from_bytes, from_reader, to_bytes, Compound, Tag, Value};

use super::builder::Builder;

#[test]
fn int_array_at_root() {
    let bs = to_bytes(&[0i32, -10, 3]).unwrap();
    let expected = [
        0x0b, // IntArray
        0x00, 0x00, // empty name
        0x00, 0x00, 0x00, 0x03, // count
        0x00, 0x00, 0x00, 0x00, //
        0xff, 0xff, 0xff, 0xf6, //
        0x00, 0x00, 0x00, 0x03,
    ];
    assert_eq!(bs, expected);

    let back: [i32; 3] = from_bytes(&bs).unwrap();
    assert_eq!(back, [0, -10, 3]);
}

#[test]
fn string_at_root() {
    let bs = to_bytes("Test").unwrap();
    assert_eq!(bs, [0x08, 0x00, 0x00, 0x00, 0x04, b'T', b'e', b's', b't']);

    let back: String = from_bytes(&bs).unwrap();
    assert_eq!(back, "Test");
}

#[test]
fn nan_in_list_keeps_bit_pattern() {
    let bs = to_bytes(&vec![f32::NAN]).unwrap();
    let expected = Builder::new()
        .tag(Tag::List)
        .name("")
        .tag(Tag::Float)
        .int_payload(1)
        .raw_bytes(&[0x7f, 0xc0, 0x00, 0x00])
        .build();
    assert_eq!(bs, expected);

    let back: Vec<f32> = from_bytes(&bs).unwrap();
    assert_eq!(back[0].to_bits(), f32::NAN.to_bits());
}

#[test]
fn floats_keep_exact_bits() {
    #[derive(Serialize, Deserialize)]
    struct Floats {
        f: f32,
        d: f64,
        fs: Vec<f32>,
        ds: Vec<f64>,
    }

    let singles = [
        f32::NAN,
        f32::from_bits(0x7fc0_0001),
        f32::from_bits(0xffc0_0000),
        f32::INFINITY,
        f32::NEG_INFINITY,
        0.0,
        -0.0,
        f32::MIN_POSITIVE,
    ];
    let doubles = [
        f64::NAN,
        f64::from_bits(0x7ff8_0000_0000_0001),
        f64::from_bits(0xfff8_0000_0000_0000),
        f64::INFINITY,
        f64::NEG_INFINITY,
        0.0,
        -0.0,
        f64::MIN_POSITIVE,
    ];

    for (&f, &d) in singles.iter().zip(doubles.iter()) {
        let v = Floats {
            f,
            d,
            fs: singles.to_vec(),
            ds: doubles.to_vec(),
        };
        let bs = to_bytes(&v).unwrap();

        let from_slice: Floats = from_bytes(&bs).unwrap();
        let from_read: Floats = from_reader(&bs[..]).unwrap();
        for back in [from_slice, from_read] {
            assert_eq!(back.f.to_bits(), f.to_bits());
            assert_eq!(back.d.to_bits(), d.to_bits());
            let fs: Vec<u32> = back.fs.iter().map(|x| x.to_bits()).collect();
            let ds: Vec<u64> = back.ds.iter().map(|x| x.to_bits()).collect();
            assert_eq!(fs, singles.map(f32::to_bits));
            assert_eq!(ds, doubles.map(f64::to_bits));
        }
    }
}

#[test]
fn dynamic_list_of_compounds() {
    #[derive(Serialize)]
    struct Pig {
        name: String,
    }

    #[derive(Serialize)]
    struct Cow {
        age: i8,
        milk: i16,
    }

    #[derive(Serialize)]
    #[serde(untagged)]
    enum Mob {
        Pig(Pig),
        Cow(Cow),
    }

    let mobs = vec![
        Mob::Pig(Pig {
            name: "Wilbur".to_owned(),
        }),
        Mob::Cow(Cow { age: 3, milk: 40 }),
    ];
    let bs = to_bytes(&mobs).unwrap();

    let expected = Builder::new()
        .start_list("", Tag::Compound, 2)
        .start_anon_compound()
        .string("name", "Wilbur")
        .end_compound()
        .start_anon_compound()
        .byte("age", 3)
        .short("milk", 40)
        .end_compound()
        .build();
    assert_eq!(bs, expected);

    // The same bytes from Values.
    let values: Vec<Value> = from_bytes(&bs).unwrap();
    assert_eq!(to_bytes(&values).unwrap(), expected);
}

#[test]
fn map_of_sequences_into_struct_with_renames() {
    #[derive(Deserialize, Debug, PartialEq)]
    struct Sequences {
        #[serde(rename = "first-run")]
        first_run: Vec<i32>,
        #[serde(rename = "minecraft:scores")]
        scores: Vec<i32>,
        empty: Vec<i32>,
    }

    let mut map: HashMap<String, Vec<i32>> = HashMap::new();
    map.insert("first-run".to_owned(), vec![1, 2, 3]);
    map.insert("minecraft:scores".to_owned(), vec![i32::MIN, 0, i32::MAX]);
    map.insert("empty".to_owned(), vec![]);

    let bs = to_bytes(&map).unwrap();
    let s: Sequences = from_bytes(&bs).unwrap();

    assert_eq!(s.first_run, map["first-run"]);
    assert_eq!(s.scores, map["minecraft:scores"]);
    assert!(s.empty.is_empty());

    let back: HashMap<String, Vec<i32>> = from_bytes(&bs).unwrap();
    assert_eq!(back, map);
}

#[test]
fn struct_survives_round_trip() {
    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Chunk {
        #[serde(rename = "DataVersion")]
        data_version: i32,
        status: Status,
        heights: [i64; 4],
        biomes: Vec<String>,
        sections: Vec<Section>,
        light: Option<Vec<i8>>,
        flag: bool,
        id: u64,
    }

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    #[serde(rename_all = "snake_case")]
    enum Status {
        Empty,
        Full,
    }

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Section {
        y: i8,
        blocks: [u8; 4],
        palette: Vec<[i32; 2]>,
    }

    let chunk = Chunk {
        data_version: 3465,
        status: Status::Full,
        heights: [1, -2, i64::MAX, i64::MIN],
        biomes: vec!["plains".to_owned(), "river".to_owned()],
        sections: vec![
            Section {
                y: -4,
                blocks: [0, 1, 254, 255],
                palette: vec![[1, 2], [3, 4]],
            },
            Section {
                y: 0,
                blocks: [9; 4],
                palette: vec![],
            },
        ],
        light: None,
        flag: true,
        id: u64::MAX,
    };

    let bs = to_bytes(&chunk).unwrap();
    let from_slice: Chunk = from_bytes(&bs).unwrap();
    let from_read: Chunk = from_reader(bs.as_slice()).unwrap();
    assert_eq!(from_slice, chunk);
    assert_eq!(from_read, chunk);

    // Re-encoding through Value gives the same bytes.
    let value: Compound = from_bytes(&bs).unwrap();
    let opts = crate::SerOpts::new().sort_map_keys(false);
    let reencoded = crate::to_bytes_with_opts(&value, opts).unwrap();
    let again: Chunk = from_bytes(&reencoded).unwrap();
    assert_eq!(again, chunk);
}

#[test]
fn payload_lengths_match_counts() {
    #[derive(Serialize)]
    struct Arrays {
        longs: [i64; 3],
    }

    let bs = to_bytes(&Arrays { longs: [1, 2, 3] }).unwrap();
    // tag, name, count, then 3 * 8 bytes, then End.
    let header = 1 + 2 + 1 + 2 + "longs".len() + 4;
    assert_eq!(bs.len(), header + 3 * 8 + 1);
}
