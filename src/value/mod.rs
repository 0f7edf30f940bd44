mod de;
mod ser;

use serde::Serialize;

use crate::{error::Error, ByteArray, IntArray, LongArray, Tag};

/// Map type used for [`Value::Compound`]. A `HashMap` by default, or an
/// `IndexMap` keeping insertion order with the `preserve-order` feature.
#[cfg(not(feature = "preserve-order"))]
pub type Compound = std::collections::HashMap<String, Value>;

/// Map type used for [`Value::Compound`]. A `HashMap` by default, or an
/// `IndexMap` keeping insertion order with the `preserve-order` feature.
#[cfg(feature = "preserve-order")]
pub type Compound = indexmap::IndexMap<String, Value>;

/// Value is a complete NBT value. It owns its data. Compounds and Lists are
/// recursively deserialized. All information from the original NBT is kept
/// apart from the name of the root entry.
///
/// ```
/// use nbtwire::{Compound, Value};
///
/// let mut player = Compound::new();
/// player.insert("DataVersion".to_owned(), Value::Int(3465));
/// let bytes = nbtwire::to_bytes(&player)?;
///
/// let compound: Compound = nbtwire::from_bytes(&bytes)?;
/// match compound["DataVersion"] {
///     Value::Int(ver) => assert_eq!(ver, 3465),
///     _ => unreachable!(),
/// }
/// # Ok::<(), nbtwire::error::Error>(())
/// ```
///
/// A `List` must hold values of a single tag to be serialized. Compounds are
/// written in the order of the map, sorted by key unless
/// [`SerOpts::sort_map_keys`](crate::SerOpts::sort_map_keys) is turned off.
///
/// Arrays reach `Value` as a map with a single entry keyed by
/// `__nbtwire_byte_array`, `__nbtwire_int_array` or `__nbtwire_long_array`.
/// A real compound whose first entry has one of these names is therefore
/// read as an array built from that entry alone, or fails if the entry does
/// not hold a sequence of matching integers.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    String(String),
    ByteArray(ByteArray),
    IntArray(IntArray),
    LongArray(LongArray),
    List(Vec<Value>),
    Compound(Compound),
}

#[cfg(feature = "arbitrary1")]
impl<'a> arbitrary::Arbitrary<'a> for Value {
    fn arbitrary(u: &mut arbitrary::Unstructured<'a>) -> arbitrary::Result<Self> {
        let tag = u.arbitrary()?;
        arbitrary_with_tag(u, tag)
    }
}

/// A random value of the given tag. Each list draws a single element tag, so
/// every generated value can be written.
#[cfg(feature = "arbitrary1")]
fn arbitrary_with_tag(u: &mut arbitrary::Unstructured, tag: Tag) -> arbitrary::Result<Value> {
    Ok(match tag {
        Tag::End => return Err(arbitrary::Error::IncorrectFormat),
        Tag::Byte => Value::Byte(u.arbitrary()?),
        Tag::Short => Value::Short(u.arbitrary()?),
        Tag::Int => Value::Int(u.arbitrary()?),
        Tag::Long => Value::Long(u.arbitrary()?),
        Tag::Float => Value::Float(u.arbitrary()?),
        Tag::Double => Value::Double(u.arbitrary()?),
        Tag::String => Value::String(u.arbitrary()?),
        Tag::ByteArray => Value::ByteArray(u.arbitrary()?),
        Tag::IntArray => Value::IntArray(u.arbitrary()?),
        Tag::LongArray => Value::LongArray(u.arbitrary()?),
        Tag::Compound => Value::Compound(u.arbitrary()?),
        Tag::List => {
            let element: Tag = u.arbitrary()?;
            let mut items = Vec::new();
            if element != Tag::End {
                for _ in 0..u.arbitrary_len::<Value>()? {
                    items.push(arbitrary_with_tag(u, element)?);
                }
            }
            Value::List(items)
        }
    })
}

impl Value {
    /// The tag this value is written with.
    pub fn tag(&self) -> Tag {
        match self {
            Value::Byte(_) => Tag::Byte,
            Value::Short(_) => Tag::Short,
            Value::Int(_) => Tag::Int,
            Value::Long(_) => Tag::Long,
            Value::Float(_) => Tag::Float,
            Value::Double(_) => Tag::Double,
            Value::String(_) => Tag::String,
            Value::ByteArray(_) => Tag::ByteArray,
            Value::IntArray(_) => Tag::IntArray,
            Value::LongArray(_) => Tag::LongArray,
            Value::List(_) => Tag::List,
            Value::Compound(_) => Tag::Compound,
        }
    }

    /// The value of any integer tag, widened to `i64`.
    pub fn as_i64(&self) -> Option<i64> {
        Some(match *self {
            Value::Byte(v) => v.into(),
            Value::Short(v) => v.into(),
            Value::Int(v) => v.into(),
            Value::Long(v) => v,
            _ => return None,
        })
    }

    /// The value of any numeric tag as `f64`. Longs may lose precision.
    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            Value::Float(v) => Some(v.into()),
            Value::Double(v) => Some(v),
            _ => self.as_i64().map(|v| v as f64),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        if let Value::String(s) = self {
            Some(s)
        } else {
            None
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_compound(&self) -> Option<&Compound> {
        match self {
            Value::Compound(v) => Some(v),
            _ => None,
        }
    }
}

macro_rules! value_from {
    ($($from:ty => $variant:ident $(as $cast:ty)?),* $(,)?) => {
        $(
            impl From<$from> for Value {
                fn from(v: $from) -> Self {
                    Value::$variant(v $(as $cast)?)
                }
            }
        )*
    };
}

// Unsigned integers keep their bits, matching how the serializer writes them.
value_from! {
    bool => Byte as i8,
    i8 => Byte,
    u8 => Byte as i8,
    i16 => Short,
    u16 => Short as i16,
    i32 => Int,
    u32 => Int as i32,
    i64 => Long,
    u64 => Long as i64,
    f32 => Float,
    f64 => Double,
    String => String,
    ByteArray => ByteArray,
    IntArray => IntArray,
    LongArray => LongArray,
    Vec<Value> => List,
    Compound => Compound,
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_owned())
    }
}

/// Convert a `T` into a [`Value`], following the same rules as the NBT
/// serializer: fixed size integer arrays become NBT arrays, `None` struct
/// fields are left out, and shapes with no NBT form are errors.
///
/// ```
/// use nbtwire::{IntArray, Value};
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Block {
///     pos: [i32; 3],
///     name: String,
///     note: Option<String>,
/// }
///
/// let v = nbtwire::to_value(&Block {
///     pos: [1, 2, 3],
///     name: "stone".to_owned(),
///     note: None,
/// })?;
///
/// let compound = v.as_compound().unwrap();
/// assert_eq!(compound["pos"], Value::IntArray(IntArray::new(vec![1, 2, 3])));
/// assert_eq!(compound["name"].as_str(), Some("stone"));
/// assert!(!compound.contains_key("note"));
/// # Ok::<(), nbtwire::error::Error>(())
/// ```
///
/// # Errors
///
/// This conversion can fail if `T`'s implementation of `Serialize` decides to
/// fail, or if `T` contains a map with non-string keys, a list mixing tags, or
/// any other shape [`to_bytes`](crate::to_bytes) would reject.
pub fn to_value<T>(value: T) -> Result<Value, Error>
where
    T: Serialize,
{
    value
        .serialize(ser::ValueSerializer)?
        .ok_or_else(|| Error::unsupported("None has no NBT representation outside a compound"))
}
