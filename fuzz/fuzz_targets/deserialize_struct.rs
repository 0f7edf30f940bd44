#![no_main]
use libfuzzer_sys::fuzz_target;
use serde::Deserialize;

use nbtwire::{from_bytes_with_opts, DeOpts, IntArray, LongArray};

#[derive(Deserialize)]
#[allow(dead_code)]
struct Section<'a> {
    #[serde(rename = "Y")]
    y: i8,
    #[serde(borrow)]
    palette: Option<Vec<&'a str>>,
    data: Option<LongArray>,
}

#[derive(Deserialize)]
#[allow(dead_code)]
struct Chunk<'a> {
    #[serde(rename = "DataVersion")]
    data_version: i32,
    status: Option<String>,
    heights: Option<IntArray>,
    #[serde(borrow, default)]
    sections: Vec<Section<'a>>,
    pos: Option<[i32; 2]>,
}

fuzz_target!(|data: &[u8]| {
    let opts = DeOpts::new().max_seq_len(1000).max_depth(64);
    let _chunk = from_bytes_with_opts::<Chunk>(data, opts);
});
