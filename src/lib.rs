//! nbtwire is a serde encoder and decoder for NBT (Named Binary Tag) data, the
//! tag-prefixed binary format popularised by *Minecraft* for its world and
//! player files.
//!
//! * For encoding see [`to_bytes`] and [`to_writer`], and the [`ser`] module.
//! * For decoding see [`from_bytes`] and [`from_reader`], and the [`de`] module.
//! * For a `serde_json`-like dynamic type see [`Value`].
//! * For growable NBT array types see [`ByteArray`], [`IntArray`] and
//!   [`LongArray`].
//!
//! Compression and file handling are left to the caller. NBT files on disk are
//! usually gzip compressed, so decompress them with a crate like `flate2`
//! before handing the bytes over.
//!
//! # How Rust types map to NBT
//!
//! | Rust | NBT |
//! | ---- | --- |
//! | `i8`, `u8`, `bool` | Byte |
//! | `i16`, `u16` | Short |
//! | `i32`, `u32`, `char` | Int |
//! | `i64`, `u64` | Long |
//! | `f32` | Float |
//! | `f64` | Double |
//! | `String`, `&str`, unit enum variants | String |
//! | `[i8; N]`, `[u8; N]`, `[bool; N]` | Byte Array |
//! | `[i32; N]`, `[u32; N]` | Int Array |
//! | `[i64; N]`, `[u64; N]` | Long Array |
//! | [`ByteArray`], [`IntArray`], [`LongArray`] | Byte, Int, Long Array |
//! | `Vec<T>`, slices, other fixed arrays | List |
//! | structs, maps with string keys | Compound |
//!
//! Arrays with a length fixed by their type become NBT arrays, growable
//! sequences become lists, even when both hold integers. Struct fields are
//! written in declaration order under their serde name, so
//! `#[serde(rename = "...")]` controls the name on the wire. Map entries are
//! sorted by key by default so repeated encodes give identical bytes, see
//! [`SerOpts::sort_map_keys`].
//!
//! # Quick example
//!
//! ```
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize, Debug, PartialEq)]
//! struct Player {
//!     #[serde(rename = "Name")]
//!     name: String,
//!     health: f32,
//!     pos: [i32; 3],
//!     inventory: Vec<Item>,
//! }
//!
//! #[derive(Serialize, Deserialize, Debug, PartialEq)]
//! struct Item {
//!     id: String,
//!     count: i8,
//! }
//!
//! let player = Player {
//!     name: "Steve".to_owned(),
//!     health: 20.0,
//!     pos: [12, 64, -40],
//!     inventory: vec![Item {
//!         id: "minecraft:stone".to_owned(),
//!         count: 64,
//!     }],
//! };
//!
//! let bytes = nbtwire::to_bytes(&player)?;
//! let back: Player = nbtwire::from_bytes(&bytes)?;
//! assert_eq!(player, back);
//! # Ok::<(), nbtwire::error::Error>(())
//! ```

use std::io::{Read, Write};

use serde::{de::DeserializeOwned, Deserialize, Serialize};

pub mod de;
pub mod error;
pub mod input;
pub mod ser;

mod arrays;
mod de_arrays;
mod mapper;
mod tag;
mod value;

pub use arrays::*;
pub use tag::{Layout, Tag};
pub use value::{to_value, Compound, Value};

use de::Deserializer;
use error::Result;
use ser::Serializer;

#[cfg(test)]
mod test;

// Newtype struct names used by the array wrappers to signal to our serializer
// and deserializer which NBT array they represent.
pub(crate) const BYTE_ARRAY_TOKEN: &str = "__nbtwire_byte_array";
pub(crate) const INT_ARRAY_TOKEN: &str = "__nbtwire_int_array";
pub(crate) const LONG_ARRAY_TOKEN: &str = "__nbtwire_long_array";

/// How names and strings are encoded on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StringEncoding {
    /// Standard UTF-8.
    #[default]
    Utf8,
    /// Java's modified UTF-8 (CESU-8 with an encoded NUL), as written by the
    /// Java edition of Minecraft.
    ModifiedUtf8,
}

/// What to do with an empty sequence, which has no element to take a tag
/// from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmptyList {
    /// Write a list with element tag End and zero elements. The deserializer
    /// accepts this for any sequence type.
    #[default]
    EndTag,
    /// Fail with [`Error::AmbiguousEmptySequence`][error::Error::AmbiguousEmptySequence].
    Reject,
}

/// Options for customizing serialization.
#[derive(Debug, Clone)]
pub struct SerOpts {
    pub(crate) root_name: String,
    pub(crate) network_nbt: bool,
    pub(crate) sort_map_keys: bool,
    pub(crate) empty_list: EmptyList,
    pub(crate) strings: StringEncoding,
}

impl SerOpts {
    /// Create new options. This object follows a builder pattern.
    pub fn new() -> Self {
        Default::default()
    }

    /// Options for network NBT: the root entry has a tag but no name.
    pub fn network_nbt() -> Self {
        Self {
            network_nbt: true,
            ..Default::default()
        }
    }

    /// Name of the root entry. Defaults to the empty string. Setting a name
    /// produces a named entry that can be embedded in another compound.
    pub fn root_name(mut self, root_name: impl Into<String>) -> Self {
        self.root_name = root_name.into();
        self
    }

    /// Sort the entries of maps by key. Enabled by default. When disabled, map
    /// entries are written in the map's own iteration order. Struct fields are
    /// always written in declaration order, including structs with
    /// `#[serde(flatten)]` fields. Only maps that report their length up front
    /// are sorted, which covers the std and `indexmap` maps.
    pub fn sort_map_keys(mut self, sort: bool) -> Self {
        self.sort_map_keys = sort;
        self
    }

    /// Policy for empty sequences. See [`EmptyList`].
    pub fn empty_list(mut self, policy: EmptyList) -> Self {
        self.empty_list = policy;
        self
    }

    /// Encoding for names and strings. See [`StringEncoding`].
    pub fn string_encoding(mut self, strings: StringEncoding) -> Self {
        self.strings = strings;
        self
    }
}

impl Default for SerOpts {
    fn default() -> Self {
        Self {
            root_name: String::new(),
            network_nbt: false,
            sort_map_keys: true,
            empty_list: EmptyList::default(),
            strings: StringEncoding::default(),
        }
    }
}

/// Options for customizing deserialization.
#[derive(Debug, Clone)]
pub struct DeOpts {
    /// Maximum number of elements a list or array can have.
    pub(crate) max_seq_len: usize,
    /// Maximum nesting of compounds and lists.
    pub(crate) max_depth: usize,
    pub(crate) network_nbt: bool,
    pub(crate) strings: StringEncoding,
}

impl DeOpts {
    /// Create new options. This object follows a builder pattern.
    pub fn new() -> Self {
        Default::default()
    }

    /// Options for network NBT: the root entry has a tag but no name.
    pub fn network_nbt() -> Self {
        Self {
            network_nbt: true,
            ..Default::default()
        }
    }

    /// Maximum number of elements a list or array can have. Larger counts fail
    /// with [`Error::InvalidLength`][error::Error::InvalidLength].
    pub fn max_seq_len(mut self, value: usize) -> Self {
        self.max_seq_len = value;
        self
    }

    /// Maximum nesting depth of compounds and lists, counting the root. Deeper
    /// data fails with [`Error::DepthExceeded`][error::Error::DepthExceeded].
    pub fn max_depth(mut self, value: usize) -> Self {
        self.max_depth = value;
        self
    }

    /// Encoding for names and strings. See [`StringEncoding`].
    pub fn string_encoding(mut self, strings: StringEncoding) -> Self {
        self.strings = strings;
        self
    }
}

impl Default for DeOpts {
    fn default() -> Self {
        Self {
            max_seq_len: i32::MAX as usize,
            max_depth: 512,
            network_nbt: false,
            strings: StringEncoding::default(),
        }
    }
}

/// Serialize some `T` into NBT data. See the [`ser`] module for more
/// information.
pub fn to_bytes<T: Serialize + ?Sized>(v: &T) -> Result<Vec<u8>> {
    to_bytes_with_opts(v, SerOpts::default())
}

/// Serialize some `T` into NBT data with the given options.
pub fn to_bytes_with_opts<T: Serialize + ?Sized>(v: &T, opts: SerOpts) -> Result<Vec<u8>> {
    let mut result = vec![];
    to_writer_with_opts(&mut result, v, opts)?;
    Ok(result)
}

/// Serialize some `T` into NBT data, writing to `writer`. Nothing written is
/// undone if serialization fails part way; serialize to a buffer with
/// [`to_bytes`] if that matters.
pub fn to_writer<T: Serialize + ?Sized, W: Write>(writer: W, v: &T) -> Result<()> {
    to_writer_with_opts(writer, v, SerOpts::default())
}

/// Serialize some `T` into NBT data with the given options, writing to
/// `writer`.
pub fn to_writer_with_opts<T: Serialize + ?Sized, W: Write>(
    writer: W,
    v: &T,
    opts: SerOpts,
) -> Result<()> {
    let mut serializer = Serializer::new(writer, &opts);
    v.serialize(&mut serializer)
}

/// Deserialize into a `T` from some NBT data. See the [`de`] module for more
/// information.
pub fn from_bytes<'a, T>(input: &'a [u8]) -> Result<T>
where
    T: Deserialize<'a>,
{
    from_bytes_with_opts(input, DeOpts::default())
}

/// Deserialize into a `T` from some NBT data with the given options.
pub fn from_bytes_with_opts<'a, T>(input: &'a [u8], opts: DeOpts) -> Result<T>
where
    T: Deserialize<'a>,
{
    let mut des = Deserializer::from_bytes(input, opts);
    T::deserialize(&mut des)
}

/// Deserialize into a `T` from some NBT data read from `reader`. Unlike
/// [`from_bytes`] nothing can be borrowed from the input.
pub fn from_reader<R, T>(reader: R) -> Result<T>
where
    R: Read,
    T: DeserializeOwned,
{
    from_reader_with_opts(reader, DeOpts::default())
}

/// Deserialize into a `T` from some NBT data read from `reader`, with the
/// given options.
pub fn from_reader_with_opts<R, T>(reader: R, opts: DeOpts) -> Result<T>
where
    R: Read,
    T: DeserializeOwned,
{
    let mut des = Deserializer::from_reader(reader, opts);
    T::deserialize(&mut des)
}
