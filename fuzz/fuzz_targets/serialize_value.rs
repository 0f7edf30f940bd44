#![no_main]
use libfuzzer_sys::fuzz_target;

use nbtwire::error::Result;
use nbtwire::{from_bytes, to_bytes, Compound, Value};

fuzz_target!(|v: Value| {
    let mut inner = Compound::new();
    inner.insert("".to_string(), v);

    let v = Value::Compound(inner);
    let bs = to_bytes(&v);

    if let Ok(bs) = bs {
        let _: Result<Value> = from_bytes(&bs);
    }
});
