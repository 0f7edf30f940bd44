//! This module contains a serde deserializer. It can do most of the things you
//! would expect of a typical serde deserializer, such as deserializing into:
//! * Rust structs.
//! * containers like `HashMap` and `Vec`.
//! * fixed size arrays and tuples.
//! * an arbitrary [`Value`](crate::Value).
//! * enums. Unit variants are read from strings, and for compounds you
//!   typically want internally tagged or untagged enums.
//!
//! Use [`from_bytes`](crate::from_bytes) when all the input is in memory,
//! which lets `&str` and `&[u8]` fields borrow from it, or
//! [`from_reader`](crate::from_reader) to decode from any [`std::io::Read`].
//!
//! # Type conversions
//!
//! * Integer targets accept any integer tag, subject to serde's range checks.
//!   An unsigned target of the same width as the tag gets the bit pattern
//!   reinterpreted, so a `u32` written as an Int comes back unchanged.
//! * `f32` and `f64` accept both Float and Double.
//! * Any integral value can be deserialized to `bool`. Any non-zero value
//!   becomes `true`.
//! * `char` is read from an Int holding the code point.
//! * Lists and all three NBT arrays can be deserialized into `Vec` and other
//!   sequences. Fixed size targets like `[i32; 3]` or tuples need the count to
//!   match exactly, else [`Error::FixedSizeMismatch`].
//! * `&[u8]`, `Vec<u8>` through `serde_bytes` and similar byte targets accept a
//!   Byte Array or a List of Byte.
//! * You can deserialize a field to the unit type `()`. This ignores the value
//!   but ensures that it existed.
//!
//! Any other combination fails with [`Error::TypeMismatch`].
//!
//! # Compounds and field names
//!
//! Entries are matched to struct fields by name, exact match first, then
//! ignoring case. Entries that match no field are skipped. Once an entry has
//! filled a field, later entries resolving to the same field are skipped too,
//! even an exact match arriving after a case-insensitive one. Fields with no
//! entry are left to serde, so `Option` fields become `None` and
//! `#[serde(default)]` fields get their default.
//!
//! ```rust
//! use serde::Deserialize;
//!
//! #[derive(Deserialize, Debug, PartialEq)]
//! struct Level {
//!     name: String,
//!     #[serde(default)]
//!     difficulty: i8,
//! }
//!
//! # let bytes = nbtwire::to_bytes(&std::collections::HashMap::from([("NAME", "world")]))?;
//! let level: Level = nbtwire::from_bytes(&bytes)?;
//! assert_eq!(level, Level { name: "world".to_owned(), difficulty: 0 });
//! # Ok::<(), nbtwire::error::Error>(())
//! ```
//!
//! # Limits
//!
//! Nesting of compounds and lists is limited by
//! [`DeOpts::max_depth`](crate::DeOpts::max_depth), also while skipping
//! unknown entries. List and array counts are limited by
//! [`DeOpts::max_seq_len`](crate::DeOpts::max_seq_len). Neither limit is
//! ever used to allocate up front.
//!
//! [`Error::FixedSizeMismatch`]: crate::error::Error::FixedSizeMismatch
//! [`Error::TypeMismatch`]: crate::error::Error::TypeMismatch

use std::io::Read;

use serde::de::{
    self,
    value::{BorrowedStrDeserializer, StrDeserializer},
};

use crate::{
    de_arrays::ArrayWrapperAccess,
    error::{Error, Result},
    input::{Input, Reader, Reference, Slice},
    mapper, DeOpts, Layout, Tag,
};

/// Deserializer for NBT data. See the [`de`](crate::de) module for more
/// information.
pub struct Deserializer<In> {
    pub(crate) input: In,
    pub(crate) scratch: Vec<u8>,
    opts: DeOpts,
    depth: usize,
}

impl<'de> Deserializer<Slice<'de>> {
    /// Create a Deserializer over some in-memory NBT data.
    pub fn from_bytes(bytes: &'de [u8], opts: DeOpts) -> Self {
        Self::new(Slice { data: bytes }, opts)
    }
}

impl<R: Read> Deserializer<Reader<R>> {
    /// Create a Deserializer reading NBT data from `reader`.
    pub fn from_reader(reader: R, opts: DeOpts) -> Self {
        Self::new(Reader { reader }, opts)
    }
}

impl<'de, In> Deserializer<In>
where
    In: Input<'de>,
{
    fn new(input: In, opts: DeOpts) -> Self {
        Self {
            input,
            scratch: Vec::new(),
            opts,
            depth: 0,
        }
    }

    /// Read the root entry up to its payload.
    fn root(&mut self) -> Result<Tag> {
        let tag = self.input.consume_tag()?;
        if tag == Tag::End {
            return Err(Error::mismatch("a root entry", tag));
        }
        if !self.opts.network_nbt {
            self.input.ignore_str()?;
        }
        Ok(tag)
    }

    fn enter(&mut self) -> Result<()> {
        self.depth += 1;
        if self.depth > self.opts.max_depth {
            return Err(Error::DepthExceeded(self.opts.max_depth));
        }
        Ok(())
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    /// Read a list or array count.
    pub(crate) fn consume_len(&mut self) -> Result<usize> {
        let len = self.input.consume_i32()?;
        let len = usize::try_from(len)
            .map_err(|_| Error::InvalidLength(format!("negative length {}", len)))?;
        if len > self.opts.max_seq_len {
            return Err(Error::InvalidLength(format!(
                "length {} is greater than the maximum sequence length {}",
                len, self.opts.max_seq_len
            )));
        }
        Ok(len)
    }

    /// Read the element tag and count of a list.
    fn consume_list_header(&mut self) -> Result<(Tag, usize)> {
        let element = self.input.consume_tag()?;
        let len = self.consume_len()?;
        // End has no payload, so a non-empty list of it would be a cheap way to
        // make us produce values out of nothing.
        if element == Tag::End && len != 0 {
            return Err(Error::InvalidLength(format!(
                "list of End tags cannot have elements, found {}",
                len
            )));
        }
        Ok((element, len))
    }

    fn visit_str<V>(&mut self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self
            .input
            .consume_str(&mut self.scratch, self.opts.strings)?
        {
            Reference::Borrowed(s) => visitor.visit_borrowed_str(s),
            Reference::Copied(s) => visitor.visit_str(s),
        }
    }

    pub(crate) fn visit_bytes<V>(&mut self, visitor: V, len: usize) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.input.consume_bytes(len, &mut self.scratch)? {
            Reference::Borrowed(bs) => visitor.visit_borrowed_bytes(bs),
            Reference::Copied(bs) => visitor.visit_bytes(bs),
        }
    }

    fn compound<V>(&mut self, visitor: V, fields: Option<&'static [&'static str]>) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.enter()?;
        let mut access = CompoundAccess {
            de: self,
            fields,
            taken: Vec::new(),
            tag: None,
            done: false,
        };
        let value = visitor.visit_map(&mut access)?;
        access.finish()?;
        self.leave();
        Ok(value)
    }

    /// Hand `len` payloads with tag `element` to the visitor. Used for both
    /// lists and arrays, whose elements are payload only.
    pub(crate) fn elements<V>(
        &mut self,
        visitor: V,
        element: Tag,
        len: usize,
        expected: Option<usize>,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        if let Some(expected) = expected {
            if expected != len {
                return Err(Error::FixedSizeMismatch {
                    expected,
                    found: len,
                });
            }
        }

        let mut access = ListAccess {
            de: self,
            element,
            remaining: len,
        };
        let value = visitor.visit_seq(&mut access)?;
        access.finish()?;
        Ok(value)
    }

    fn list<V>(&mut self, visitor: V, expected: Option<usize>) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        let (element, len) = self.consume_list_header()?;
        self.enter()?;
        let value = self.elements(visitor, element, len, expected)?;
        self.leave();
        Ok(value)
    }

    fn array<V>(&mut self, visitor: V, tag: Tag, expected: Option<usize>) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        let element = tag
            .array_element()
            .ok_or_else(|| Error::mismatch("an NBT array", tag))?;
        let len = self.consume_len()?;
        self.elements(visitor, element, len, expected)
    }

    /// Read and discard the payload of a value with the given tag.
    pub(crate) fn skip(&mut self, tag: Tag) -> Result<()> {
        match tag.layout() {
            Layout::Empty => Ok(()),
            Layout::Fixed(width) => self.input.ignore_bytes(width),
            Layout::Str => self.input.ignore_str(),
            Layout::Array { width } => {
                let len = self.consume_len()?;
                self.input.ignore_bytes(byte_len(len, width)?)
            }
            Layout::List => {
                let (element, len) = self.consume_list_header()?;
                self.enter()?;
                match element.layout() {
                    Layout::Fixed(width) => self.input.ignore_bytes(byte_len(len, width)?)?,
                    _ => {
                        for _ in 0..len {
                            self.skip(element)?;
                        }
                    }
                }
                self.leave();
                Ok(())
            }
            Layout::Compound => {
                self.enter()?;
                loop {
                    let tag = self.input.consume_tag()?;
                    if tag == Tag::End {
                        break;
                    }
                    self.input.ignore_str()?;
                    self.skip(tag)?;
                }
                self.leave();
                Ok(())
            }
        }
    }
}

fn byte_len(len: usize, width: usize) -> Result<usize> {
    len.checked_mul(width)
        .ok_or_else(|| Error::InvalidLength(format!("length {} is too large", len)))
}

macro_rules! forward_to_payload {
    ($($method:ident($($arg:ident: $ty:ty),*)),* $(,)?) => {
        $(
            fn $method<V>(self, $($arg: $ty,)* visitor: V) -> Result<V::Value>
            where
                V: de::Visitor<'de>,
            {
                let tag = self.root()?;
                Payload { de: self, tag }.$method($($arg,)* visitor)
            }
        )*
    };
}

impl<'a, 'de, In> de::Deserializer<'de> for &'a mut Deserializer<In>
where
    In: Input<'de>,
{
    type Error = Error;

    fn is_human_readable(&self) -> bool {
        false
    }

    forward_to_payload!(
        deserialize_any(),
        deserialize_bool(),
        deserialize_i8(),
        deserialize_i16(),
        deserialize_i32(),
        deserialize_i64(),
        deserialize_u8(),
        deserialize_u16(),
        deserialize_u32(),
        deserialize_u64(),
        deserialize_f32(),
        deserialize_f64(),
        deserialize_char(),
        deserialize_str(),
        deserialize_string(),
        deserialize_bytes(),
        deserialize_byte_buf(),
        deserialize_option(),
        deserialize_unit(),
        deserialize_unit_struct(name: &'static str),
        deserialize_newtype_struct(name: &'static str),
        deserialize_seq(),
        deserialize_tuple(len: usize),
        deserialize_tuple_struct(name: &'static str, len: usize),
        deserialize_map(),
        deserialize_struct(name: &'static str, fields: &'static [&'static str]),
        deserialize_enum(name: &'static str, variants: &'static [&'static str]),
        deserialize_identifier(),
        deserialize_ignored_any(),
    );
}

/// The payload of a value whose tag, and name if it has one, are already read.
pub(crate) struct Payload<'a, In> {
    pub(crate) de: &'a mut Deserializer<In>,
    pub(crate) tag: Tag,
}

impl<'a, 'de, In> Payload<'a, In>
where
    In: Input<'de>,
{
    fn integral(&mut self, expected: &'static str) -> Result<i64> {
        let input = &mut self.de.input;
        Ok(match self.tag {
            Tag::Byte => input.consume_byte()? as i8 as i64,
            Tag::Short => input.consume_i16()? as i64,
            Tag::Int => input.consume_i32()? as i64,
            Tag::Long => input.consume_i64()?,
            found => return Err(Error::mismatch(expected, found)),
        })
    }

    fn visit_integral<V>(mut self, visitor: V, expected: &'static str) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.tag {
            Tag::Byte => visitor.visit_i8(self.de.input.consume_byte()? as i8),
            Tag::Short => visitor.visit_i16(self.de.input.consume_i16()?),
            Tag::Int => visitor.visit_i32(self.de.input.consume_i32()?),
            _ => visitor.visit_i64(self.integral(expected)?),
        }
    }

    fn visit_floating<V>(self, visitor: V, expected: &'static str) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.tag {
            Tag::Float => visitor.visit_f32(self.de.input.consume_f32()?),
            Tag::Double => visitor.visit_f64(self.de.input.consume_f64()?),
            found => Err(Error::mismatch(expected, found)),
        }
    }
}

macro_rules! signed {
    ($method:ident, $expected:literal) => {
        fn $method<V>(self, visitor: V) -> Result<V::Value>
        where
            V: de::Visitor<'de>,
        {
            self.visit_integral(visitor, $expected)
        }
    };
}

// Same-width tags keep their bits, so unsigned values survive a round trip.
macro_rules! unsigned {
    ($method:ident, $expected:literal, $tag:ident, $consume:ident, $visit:ident, $ty:ty) => {
        fn $method<V>(self, visitor: V) -> Result<V::Value>
        where
            V: de::Visitor<'de>,
        {
            if self.tag == Tag::$tag {
                let v = self.de.input.$consume()?;
                visitor.$visit(v as $ty)
            } else {
                self.visit_integral(visitor, $expected)
            }
        }
    };
}

impl<'a, 'de, In> de::Deserializer<'de> for Payload<'a, In>
where
    In: Input<'de>,
{
    type Error = Error;

    fn is_human_readable(&self) -> bool {
        false
    }

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.tag {
            Tag::Byte | Tag::Short | Tag::Int | Tag::Long => self.visit_integral(visitor, "a value"),
            Tag::Float | Tag::Double => self.visit_floating(visitor, "a value"),
            Tag::String => self.de.visit_str(visitor),
            Tag::ByteArray | Tag::IntArray | Tag::LongArray => {
                let len = self.de.consume_len()?;
                visitor.visit_map(ArrayWrapperAccess::new(self.de, self.tag, len))
            }
            Tag::List => self.de.list(visitor, None),
            Tag::Compound => self.de.compound(visitor, None),
            Tag::End => Err(Error::mismatch("a value", Tag::End)),
        }
    }

    signed!(deserialize_i8, "i8");
    signed!(deserialize_i16, "i16");
    signed!(deserialize_i32, "i32");
    signed!(deserialize_i64, "i64");
    unsigned!(deserialize_u8, "u8", Byte, consume_byte, visit_u8, u8);
    unsigned!(deserialize_u16, "u16", Short, consume_i16, visit_u16, u16);
    unsigned!(deserialize_u32, "u32", Int, consume_i32, visit_u32, u32);
    unsigned!(deserialize_u64, "u64", Long, consume_i64, visit_u64, u64);

    fn deserialize_f32<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.visit_floating(visitor, "f32")
    }

    fn deserialize_f64<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.visit_floating(visitor, "f64")
    }

    fn deserialize_bool<V>(mut self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_bool(self.integral("bool")? != 0)
    }

    fn deserialize_char<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.tag {
            Tag::Int => {
                let v = self.de.input.consume_i32()? as u32;
                let c = char::from_u32(v)
                    .ok_or_else(|| Error::Message(format!("invalid char code point {:#x}", v)))?;
                visitor.visit_char(c)
            }
            found => Err(Error::mismatch("char", found)),
        }
    }

    fn deserialize_str<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.tag {
            Tag::String => self.de.visit_str(visitor),
            found => Err(Error::mismatch("a string", found)),
        }
    }

    fn deserialize_string<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_str(visitor)
    }

    fn deserialize_bytes<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.tag {
            Tag::ByteArray => {
                let len = self.de.consume_len()?;
                self.de.visit_bytes(visitor, len)
            }
            Tag::List => {
                let (element, len) = self.de.consume_list_header()?;
                match element {
                    Tag::Byte | Tag::End => self.de.visit_bytes(visitor, len),
                    found => Err(Error::mismatch("a list of bytes", found)),
                }
            }
            found => Err(Error::mismatch("bytes", found)),
        }
    }

    fn deserialize_byte_buf<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_bytes(visitor)
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        // A value that is present is always Some. Absent fields are None.
        visitor.visit_some(self)
    }

    fn deserialize_unit<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.de.skip(self.tag)?;
        visitor.visit_unit()
    }

    fn deserialize_unit_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_unit(visitor)
    }

    fn deserialize_newtype_struct<V>(self, name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        if let Some(array) = mapper::token_tag(name) {
            if self.tag != array {
                return Err(Error::mismatch(name_of_array(array), self.tag));
            }
        }
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_seq<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.tag {
            Tag::List => self.de.list(visitor, None),
            Tag::ByteArray | Tag::IntArray | Tag::LongArray => self.de.array(visitor, self.tag, None),
            found => Err(Error::mismatch("a sequence", found)),
        }
    }

    fn deserialize_tuple<V>(self, len: usize, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.tag {
            Tag::List => self.de.list(visitor, Some(len)),
            Tag::ByteArray | Tag::IntArray | Tag::LongArray => {
                self.de.array(visitor, self.tag, Some(len))
            }
            found => Err(Error::mismatch("a sequence", found)),
        }
    }

    fn deserialize_tuple_struct<V>(
        self,
        _name: &'static str,
        len: usize,
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_tuple(len, visitor)
    }

    fn deserialize_map<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.tag {
            Tag::Compound => self.de.compound(visitor, None),
            found => Err(Error::mismatch("a compound", found)),
        }
    }

    fn deserialize_struct<V>(
        self,
        _name: &'static str,
        fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.tag {
            Tag::Compound => self.de.compound(visitor, Some(fields)),
            found => Err(Error::mismatch("a compound", found)),
        }
    }

    fn deserialize_enum<V>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.tag {
            Tag::String => {
                let de = self.de;
                match de.input.consume_str(&mut de.scratch, de.opts.strings)? {
                    Reference::Borrowed(s) => {
                        visitor.visit_enum(BorrowedStrDeserializer::<Error>::new(s))
                    }
                    Reference::Copied(s) => visitor.visit_enum(StrDeserializer::<Error>::new(s)),
                }
            }
            found => Err(Error::mismatch("a unit variant name", found)),
        }
    }

    fn deserialize_identifier<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_str(visitor)
    }

    fn deserialize_ignored_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        log::trace!("skipping ignored {} value", self.tag);
        self.de.skip(self.tag)?;
        visitor.visit_unit()
    }
}

fn name_of_array(tag: Tag) -> &'static str {
    match tag {
        Tag::ByteArray => "a byte array",
        Tag::IntArray => "an int array",
        _ => "a long array",
    }
}

struct CompoundAccess<'a, In> {
    de: &'a mut Deserializer<In>,
    fields: Option<&'static [&'static str]>,
    // Fields already handed to the visitor. Later entries resolving to one of
    // these are skipped, so the first entry for a field wins.
    taken: Vec<&'static str>,
    // Tag of the entry whose name was handed out last.
    tag: Option<Tag>,
    done: bool,
}

impl<'a, 'de, In> CompoundAccess<'a, In>
where
    In: Input<'de>,
{
    /// Skip whatever the visitor left unread, up to and including the End tag.
    fn finish(&mut self) -> Result<()> {
        if let Some(tag) = self.tag.take() {
            self.de.skip(tag)?;
        }
        while !self.done {
            let tag = self.de.input.consume_tag()?;
            if tag == Tag::End {
                self.done = true;
            } else {
                self.de.input.ignore_str()?;
                self.de.skip(tag)?;
            }
        }
        Ok(())
    }
}

impl<'a, 'de, In> de::MapAccess<'de> for CompoundAccess<'a, In>
where
    In: Input<'de>,
{
    type Error = Error;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>>
    where
        K: de::DeserializeSeed<'de>,
    {
        loop {
            if self.done {
                return Ok(None);
            }

            let tag = self.de.input.consume_tag()?;
            if tag == Tag::End {
                self.done = true;
                return Ok(None);
            }

            let de = &mut *self.de;
            let name = de.input.consume_str(&mut de.scratch, de.opts.strings)?;
            let field = self
                .fields
                .and_then(|fields| mapper::resolve_field(&name, fields));

            match field {
                Some(field) if self.taken.contains(&field) => {
                    log::trace!("skipping {} entry {:?}, {} already set", tag, &*name, field);
                    self.de.skip(tag)?;
                }
                Some(field) => {
                    self.taken.push(field);
                    self.tag = Some(tag);
                    return seed
                        .deserialize(BorrowedStrDeserializer::<Error>::new(field))
                        .map(Some);
                }
                None => {
                    self.tag = Some(tag);
                    let key = match name {
                        Reference::Borrowed(s) => {
                            seed.deserialize(BorrowedStrDeserializer::<Error>::new(s))
                        }
                        Reference::Copied(s) => seed.deserialize(StrDeserializer::<Error>::new(s)),
                    };
                    return key.map(Some);
                }
            }
        }
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value>
    where
        V: de::DeserializeSeed<'de>,
    {
        let tag = self
            .tag
            .take()
            .ok_or_else(|| Error::Message("compound value requested before its key".into()))?;

        seed.deserialize(Payload {
            de: &mut *self.de,
            tag,
        })
    }
}

struct ListAccess<'a, In> {
    de: &'a mut Deserializer<In>,
    element: Tag,
    remaining: usize,
}

impl<'a, 'de, In> ListAccess<'a, In>
where
    In: Input<'de>,
{
    fn finish(&mut self) -> Result<()> {
        while self.remaining > 0 {
            self.remaining -= 1;
            self.de.skip(self.element)?;
        }
        Ok(())
    }
}

impl<'a, 'de, In> de::SeqAccess<'de> for ListAccess<'a, In>
where
    In: Input<'de>,
{
    type Error = Error;

    fn next_element_seed<T>(&mut self, seed: T) -> Result<Option<T::Value>>
    where
        T: de::DeserializeSeed<'de>,
    {
        if self.remaining == 0 {
            return Ok(None);
        }
        self.remaining -= 1;

        seed.deserialize(Payload {
            de: &mut *self.de,
            tag: self.element,
        })
        .map(Some)
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.remaining)
    }
}
