//! This module contains a serde serializer for NBT data. Use
//! [`to_bytes`][`crate::to_bytes`] or [`to_writer`][`crate::to_writer`].
//!
//! The tag of a value is picked from the serde type it serializes as, see the
//! table in the [crate root][crate]. Lists and arrays take their element tag
//! from their first element, so their header is only written once that
//! element is seen. Every later element must have the same tag.
//!
//! Some Rust structures have no sensible mapping to NBT data: units, enum
//! variants carrying data, maps with non-string keys, `None` outside of a
//! struct field. These result in
//! [`Error::UnsupportedShape`][crate::error::Error::UnsupportedShape], never a
//! panic.
//!
//! An empty `Vec` has no element to take a tag from. By default it is written
//! as a list of End tags, which the deserializer accepts for any sequence. See
//! [`EmptyList`][crate::EmptyList] to make this an error instead.
//!
//! The same goes for `[i32; 0]` and other empty fixed arrays: serde hands
//! them over with no element type, so they are written like an empty `Vec`
//! rather than as an NBT array. Use [`ByteArray`][crate::ByteArray],
//! [`IntArray`][crate::IntArray] or [`LongArray`][crate::LongArray] when an
//! empty array has to keep its array tag.
mod array_serializer;
mod name_serializer;
mod serializer;
mod write_nbt;

pub use serializer::*;

pub(crate) use name_serializer::NameSerializer;
