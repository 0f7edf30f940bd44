use crate::{
    error::{Error, Result},
    from_bytes, from_bytes_with_opts, from_reader, to_bytes,
    test::builder::Builder,
    DeOpts, Tag, Value,
};

/// Inputs that once misbehaved under fuzzing.

#[test]
fn partial_input_in_string() {
    let input = Builder::new().start_compound("some long name").build();
    let v: Result<Value> = from_bytes(&input[0..3]);
    assert!(matches!(v, Err(Error::UnexpectedEndOfStream)));
}

#[test]
fn list_of_end() {
    let input = Builder::new()
        .start_compound("")
        .start_list("", Tag::End, 1)
        .tag(Tag::End)
        .end_compound()
        .build();

    let v: Result<Value> = from_bytes(&input);
    assert!(v.is_err());
}

#[test]
fn huge_list_count_does_not_allocate() {
    let input = Builder::new()
        .start_compound("")
        .start_list("", Tag::Compound, i32::MAX)
        .build();

    let v: Result<Value> = from_bytes(&input);
    assert!(matches!(v, Err(Error::UnexpectedEndOfStream)));

    let v: Result<Value> = from_reader(input.as_slice());
    assert!(matches!(v, Err(Error::UnexpectedEndOfStream)));
}

#[test]
fn huge_byte_array_from_reader() {
    let input = Builder::new()
        .start_compound("")
        .tag(Tag::ByteArray)
        .name("")
        .int_payload(i32::MAX)
        .raw_bytes(&[1, 2, 3])
        .build();

    let v: Result<Value> = from_reader(input.as_slice());
    assert!(matches!(v, Err(Error::UnexpectedEndOfStream)));
}

#[test]
fn count_over_limit() {
    let input = Builder::new()
        .start_compound("")
        .int_array("", &[1; 101])
        .end_compound()
        .build();

    let v: Result<Value> = from_bytes_with_opts(&input, DeOpts::new().max_seq_len(100));
    assert!(matches!(v, Err(Error::InvalidLength(_))));
}

#[test]
fn deeply_nested_lists() {
    let mut builder = Builder::new().start_list("", Tag::List, 1);
    for _ in 0..10_000 {
        builder = builder.start_anon_list(Tag::List, 1);
    }
    let input = builder.build();

    let v: Result<Value> = from_bytes_with_opts(&input, DeOpts::new().max_depth(64));
    assert!(matches!(v, Err(Error::DepthExceeded(64))));
}

#[test]
fn decoded_values_encode_again() {
    let inputs = [
        Builder::new()
            .start_compound("")
            .start_list("l", Tag::List, 2)
            .start_anon_list(Tag::End, 0)
            .start_anon_list(Tag::Int, 1)
            .int_payload(1)
            .end_compound()
            .build(),
        Builder::new()
            .start_list("", Tag::Compound, 1)
            .start_anon_compound()
            .end_compound()
            .build(),
        Builder::new().long_array("", &[]).build(),
    ];

    for input in inputs {
        let v: Value = from_bytes(&input).unwrap();
        let bs = to_bytes(&v).unwrap();
        let back: Value = from_bytes(&bs).unwrap();
        assert_eq!(back, v);
    }
}
