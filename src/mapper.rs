//! Rules shared by the serializer and deserializer for choosing tags and
//! matching names.

use crate::{Tag, BYTE_ARRAY_TOKEN, INT_ARRAY_TOKEN, LONG_ARRAY_TOKEN};

/// Container tag for a sequence whose first element has tag `element`.
///
/// Sequences with a length fixed by their type (arrays and tuples) become NBT
/// arrays when the element has a dedicated array tag. Everything else is a
/// List.
pub(crate) fn sequence_tag(fixed: bool, element: Tag) -> Tag {
    match Tag::array_of(element) {
        Some(array) if fixed => array,
        _ => Tag::List,
    }
}

/// The array tag signalled by a newtype struct name, if it is one of the
/// array tokens used by [`ByteArray`], [`IntArray`] and [`LongArray`].
///
/// [`ByteArray`]: crate::ByteArray
/// [`IntArray`]: crate::IntArray
/// [`LongArray`]: crate::LongArray
pub(crate) fn token_tag(name: &str) -> Option<Tag> {
    match name {
        BYTE_ARRAY_TOKEN => Some(Tag::ByteArray),
        INT_ARRAY_TOKEN => Some(Tag::IntArray),
        LONG_ARRAY_TOKEN => Some(Tag::LongArray),
        _ => None,
    }
}

/// Inverse of [`token_tag`].
pub(crate) fn array_token(tag: Tag) -> Option<&'static str> {
    match tag {
        Tag::ByteArray => Some(BYTE_ARRAY_TOKEN),
        Tag::IntArray => Some(INT_ARRAY_TOKEN),
        Tag::LongArray => Some(LONG_ARRAY_TOKEN),
        _ => None,
    }
}

/// Resolve a name read from a compound against the fields a struct expects.
///
/// An exact match wins. Otherwise the first field that matches ignoring case
/// is used. Returns `None` when nothing matches, in which case the name is
/// passed through as-is and the entry ends up ignored.
pub(crate) fn resolve_field(name: &str, fields: &'static [&'static str]) -> Option<&'static str> {
    if let Some(field) = fields.iter().copied().find(|f| *f == name) {
        return Some(field);
    }

    fields.iter().copied().find(|f| eq_ignore_case(f, name))
}

fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}

/// Sort buffered compound entries by name, giving maps a stable order on the
/// wire regardless of their iteration order.
pub(crate) fn sort_entries(entries: &mut [(String, Vec<u8>)]) {
    entries.sort_by(|(a, _), (b, _)| a.cmp(b));
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIELDS: &[&str] = &["Val", "val", "Other", "größe"];

    #[test]
    fn exact_match_preferred() {
        assert_eq!(resolve_field("val", FIELDS), Some("val"));
        assert_eq!(resolve_field("Val", FIELDS), Some("Val"));
    }

    #[test]
    fn falls_back_to_case_insensitive() {
        assert_eq!(resolve_field("OTHER", FIELDS), Some("Other"));
        assert_eq!(resolve_field("GRÖSSE", FIELDS), None);
        assert_eq!(resolve_field("GRÖßE", FIELDS), Some("größe"));
    }

    #[test]
    fn unknown_name_unresolved() {
        assert_eq!(resolve_field("missing", FIELDS), None);
    }

    #[test]
    fn fixed_sequences_use_arrays() {
        assert_eq!(sequence_tag(true, Tag::Int), Tag::IntArray);
        assert_eq!(sequence_tag(true, Tag::Byte), Tag::ByteArray);
        assert_eq!(sequence_tag(true, Tag::Long), Tag::LongArray);
        assert_eq!(sequence_tag(true, Tag::Short), Tag::List);
        assert_eq!(sequence_tag(true, Tag::Float), Tag::List);
        assert_eq!(sequence_tag(false, Tag::Int), Tag::List);
    }

    #[test]
    fn tokens_round_trip() {
        for tag in [Tag::ByteArray, Tag::IntArray, Tag::LongArray] {
            assert_eq!(array_token(tag).and_then(token_tag), Some(tag));
        }
        assert_eq!(array_token(Tag::List), None);
    }
}
