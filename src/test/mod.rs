use std::convert::TryFrom;

use serde::{Deserialize, Serialize};

use crate::Tag;


#[allow(clippy::float_cmp)]
mod value;

mod fuzz;
mod round_trip;

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct Single<T> {
    val: T,
}

macro_rules! check_tags {
    {$($tag:ident = $val:literal),* $(,)?} => {
        $(
            assert_eq!(u8::from(Tag::$tag), $val);
            assert_eq!(Tag::try_from($val), Ok(Tag::$tag));
        )*
    };
}

#[test]
fn exhaustive_tag_check() {
    check_tags! {
        End = 0,
        Byte = 1,
        Short = 2,
        Int = 3,
        Long = 4,
        Float = 5,
        Double = 6,
        ByteArray = 7,
        String = 8,
        List = 9,
        Compound = 10,
        IntArray = 11,
        LongArray = 12,
    }

    for value in 13..=u8::MAX {
        assert!(Tag::try_from(value).is_err())
    }
}

#[test]
fn array_tags_pair_with_elements() {
    for tag in [Tag::ByteArray, Tag::IntArray, Tag::LongArray] {
        let element = tag.array_element().unwrap();
        assert_eq!(Tag::array_of(element), Some(tag));
    }
    assert_eq!(Tag::array_of(Tag::Short), None);
    assert_eq!(Tag::List.array_element(), None);
}
