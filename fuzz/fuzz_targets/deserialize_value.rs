#![no_main]
use libfuzzer_sys::fuzz_target;

use nbtwire::error::Result;
use nbtwire::{from_bytes_with_opts, from_reader_with_opts, to_bytes, DeOpts, Value};

fuzz_target!(|data: &[u8]| {
    let opts = DeOpts::new().max_seq_len(100).max_depth(64);
    let value: Result<Value> = from_bytes_with_opts(data, opts.clone());
    let streamed: Result<Value> = from_reader_with_opts(data, opts);

    assert_eq!(value.is_ok(), streamed.is_ok());
    if let Ok(v) = value {
        // Lists in decoded data always hold a single tag, so this cannot fail.
        let _bs = to_bytes(&v).unwrap();
    }
});
