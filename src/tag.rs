use std::convert::TryFrom;
use std::fmt;

/// An NBT tag. This does not carry the value or the name of the data.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
#[cfg_attr(feature = "arbitrary1", derive(arbitrary::Arbitrary))]
#[repr(u8)]
pub enum Tag {
    /// Represents the end of a Compound object.
    End = 0,
    /// Equivalent to i8.
    Byte = 1,
    /// Equivalent to i16.
    Short = 2,
    /// Equivalent to i32.
    Int = 3,
    /// Equivalent to i64
    Long = 4,
    /// Equivalent to f32.
    Float = 5,
    /// Equivalent to f64.
    Double = 6,
    /// Represents as array of Byte (i8).
    ByteArray = 7,
    /// Represents a Unicode string.
    String = 8,
    /// Represents a list of other objects, all of the same tag.
    List = 9,
    /// Represents a struct-like structure.
    Compound = 10,
    /// Represents as array of Int (i32).
    IntArray = 11,
    /// Represents as array of Long (i64).
    LongArray = 12,
}

/// The byte layout of a tag's payload. Both the serializer and the
/// deserializer work from this table, so the two directions cannot disagree on
/// how many bytes a payload occupies.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Layout {
    /// No payload at all. Only [`Tag::End`].
    Empty,
    /// A fixed number of big-endian bytes.
    Fixed(usize),
    /// An unsigned 16-bit length followed by that many string bytes.
    Str,
    /// A signed 32-bit count followed by `count * width` bytes.
    Array { width: usize },
    /// An element tag, a signed 32-bit count, then `count` payloads of the
    /// element tag.
    List,
    /// Named entries up to and including an End tag.
    Compound,
}

impl Tag {
    /// Payload layout of this tag.
    pub const fn layout(self) -> Layout {
        match self {
            Tag::End => Layout::Empty,
            Tag::Byte => Layout::Fixed(1),
            Tag::Short => Layout::Fixed(2),
            Tag::Int | Tag::Float => Layout::Fixed(4),
            Tag::Long | Tag::Double => Layout::Fixed(8),
            Tag::String => Layout::Str,
            Tag::ByteArray => Layout::Array { width: 1 },
            Tag::IntArray => Layout::Array { width: 4 },
            Tag::LongArray => Layout::Array { width: 8 },
            Tag::List => Layout::List,
            Tag::Compound => Layout::Compound,
        }
    }

    /// The array tag that stores elements of this tag, if there is one. Only
    /// Byte, Int and Long have dedicated array tags.
    pub const fn array_of(element: Tag) -> Option<Tag> {
        match element {
            Tag::Byte => Some(Tag::ByteArray),
            Tag::Int => Some(Tag::IntArray),
            Tag::Long => Some(Tag::LongArray),
            _ => None,
        }
    }

    /// The element tag of an array tag. Inverse of [`Tag::array_of`].
    pub const fn array_element(self) -> Option<Tag> {
        match self {
            Tag::ByteArray => Some(Tag::Byte),
            Tag::IntArray => Some(Tag::Int),
            Tag::LongArray => Some(Tag::Long),
            _ => None,
        }
    }

    const fn name(self) -> &'static str {
        match self {
            Tag::End => "End",
            Tag::Byte => "Byte",
            Tag::Short => "Short",
            Tag::Int => "Int",
            Tag::Long => "Long",
            Tag::Float => "Float",
            Tag::Double => "Double",
            Tag::ByteArray => "ByteArray",
            Tag::String => "String",
            Tag::List => "List",
            Tag::Compound => "Compound",
            Tag::IntArray => "IntArray",
            Tag::LongArray => "LongArray",
        }
    }
}

// Crates exist to generate this code for us, but would add to our compile
// times, so we instead write it out manually. The tags will very rarely change.
impl TryFrom<u8> for Tag {
    type Error = ();

    fn try_from(value: u8) -> Result<Self, ()> {
        use Tag::*;
        Ok(match value {
            0 => End,
            1 => Byte,
            2 => Short,
            3 => Int,
            4 => Long,
            5 => Float,
            6 => Double,
            7 => ByteArray,
            8 => String,
            9 => List,
            10 => Compound,
            11 => IntArray,
            12 => LongArray,
            13..=u8::MAX => return Err(()),
        })
    }
}

impl From<Tag> for u8 {
    fn from(tag: Tag) -> Self {
        tag as u8
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
