use std::io::Write;
use std::mem;

use byteorder::{BigEndian, WriteBytesExt};
use serde::{ser::Impossible, Serialize};

use crate::{
    error::{Error, Result},
    mapper, EmptyList, SerOpts, Tag,
};

use super::{
    array_serializer::ArraySerializer, name_serializer::NameSerializer, write_nbt::WriteNbt,
};

/// Where the next value sits, which decides what has to be written in front
/// of its payload.
#[derive(Debug)]
pub(crate) enum State {
    /// The root entry: tag, then the root name.
    Root,
    /// An entry of a compound: tag, then the field name.
    Compound { current_field: String },
    /// The first element of a sequence whose header has not been written yet.
    /// The element's tag decides between an NBT array and a list, so the
    /// header of `outer` is only written once that tag is known.
    SeqStart {
        len: usize,
        fixed: bool,
        slot: usize,
        outer: Box<State>,
    },
    /// An element of a list or array after the first: payload only, and the
    /// tag must match the one the first element chose.
    Element { element_tag: Tag },
}

/// Serializer for NBT data. See the [`ser`][crate::ser] module for more
/// information.
pub struct Serializer<'o, W: Write> {
    pub(crate) writer: W,
    pub(crate) state: State,
    pub(crate) opts: &'o SerOpts,
    // Element tag chosen by each sequence currently open, innermost last.
    slots: Vec<Option<Tag>>,
}

impl<'o, W: Write> Serializer<'o, W> {
    pub(crate) fn new(writer: W, opts: &'o SerOpts) -> Self {
        Self {
            writer,
            state: State::Root,
            opts,
            slots: Vec::new(),
        }
    }

    fn entry(writer: W, opts: &'o SerOpts, name: String) -> Self {
        Self {
            writer,
            state: State::Compound {
                current_field: name,
            },
            opts,
            slots: Vec::new(),
        }
    }

    /// Write whatever precedes a payload with the given tag in the current
    /// state.
    fn write_header(&mut self, tag: Tag) -> Result<()> {
        let state = mem::replace(&mut self.state, State::Root);
        self.state = match state {
            State::Root => {
                self.writer.write_tag(tag)?;
                if !self.opts.network_nbt {
                    self.writer
                        .write_size_prefixed_str(&self.opts.root_name, self.opts.strings)?;
                }
                State::Root
            }
            State::Compound { current_field } => {
                self.writer.write_tag(tag)?;
                self.writer
                    .write_size_prefixed_str(&current_field, self.opts.strings)?;
                State::Compound { current_field }
            }
            State::SeqStart {
                len,
                fixed,
                slot,
                outer,
            } => {
                let container = mapper::sequence_tag(fixed, tag);
                self.state = *outer;
                self.write_header(container)?;
                if container == Tag::List {
                    self.writer.write_tag(tag)?;
                }
                self.writer.write_len(len)?;
                self.slots[slot] = Some(tag);
                State::Element { element_tag: tag }
            }
            State::Element { element_tag } => {
                if element_tag != tag {
                    return Err(Error::unsupported(format!(
                        "sequence elements must all have the same tag, found {} after {}",
                        tag, element_tag
                    )));
                }
                State::Element { element_tag }
            }
        };
        Ok(())
    }

    fn start_seq<'a>(&'a mut self, len: usize, fixed: bool) -> SerializerSeq<'a, 'o, W> {
        let slot = self.slots.len();
        self.slots.push(None);
        let outer = mem::replace(&mut self.state, State::Root);

        SerializerSeq {
            ser: self,
            len,
            written: 0,
            slot,
            fixed,
            outer: Some(outer),
        }
    }

    /// Sequence whose header, including the count, is already written and
    /// whose elements must all have `element_tag`.
    pub(crate) fn started_seq<'a>(
        &'a mut self,
        len: usize,
        element_tag: Tag,
    ) -> SerializerSeq<'a, 'o, W> {
        let slot = self.slots.len();
        self.slots.push(Some(element_tag));

        SerializerSeq {
            ser: self,
            len,
            written: 0,
            slot,
            fixed: true,
            outer: None,
        }
    }
}

impl<'a, 'o, W: 'a + Write> serde::ser::Serializer for &'a mut Serializer<'o, W> {
    type Ok = ();
    type Error = Error;
    type SerializeSeq = SerializerSeq<'a, 'o, W>;
    type SerializeTuple = SerializerSeq<'a, 'o, W>;
    type SerializeTupleStruct = SerializerSeq<'a, 'o, W>;
    type SerializeTupleVariant = Impossible<(), Error>;
    type SerializeMap = SerializerMap<'a, 'o, W>;
    type SerializeStruct = SerializerMap<'a, 'o, W>;
    type SerializeStructVariant = Impossible<(), Error>;

    fn serialize_bool(self, v: bool) -> Result<()> {
        self.write_header(Tag::Byte)?;
        self.writer.write_u8(v as u8)?;
        Ok(())
    }

    fn serialize_i8(self, v: i8) -> Result<()> {
        self.write_header(Tag::Byte)?;
        self.writer.write_i8(v)?;
        Ok(())
    }

    fn serialize_i16(self, v: i16) -> Result<()> {
        self.write_header(Tag::Short)?;
        self.writer.write_i16::<BigEndian>(v)?;
        Ok(())
    }

    fn serialize_i32(self, v: i32) -> Result<()> {
        self.write_header(Tag::Int)?;
        self.writer.write_i32::<BigEndian>(v)?;
        Ok(())
    }

    fn serialize_i64(self, v: i64) -> Result<()> {
        self.write_header(Tag::Long)?;
        self.writer.write_i64::<BigEndian>(v)?;
        Ok(())
    }

    fn serialize_u8(self, v: u8) -> Result<()> {
        self.write_header(Tag::Byte)?;
        self.writer.write_u8(v)?;
        Ok(())
    }

    fn serialize_u16(self, v: u16) -> Result<()> {
        self.write_header(Tag::Short)?;
        self.writer.write_u16::<BigEndian>(v)?;
        Ok(())
    }

    fn serialize_u32(self, v: u32) -> Result<()> {
        self.write_header(Tag::Int)?;
        self.writer.write_u32::<BigEndian>(v)?;
        Ok(())
    }

    fn serialize_u64(self, v: u64) -> Result<()> {
        self.write_header(Tag::Long)?;
        self.writer.write_u64::<BigEndian>(v)?;
        Ok(())
    }

    fn serialize_f32(self, v: f32) -> Result<()> {
        self.write_header(Tag::Float)?;
        self.writer.write_f32::<BigEndian>(v)?;
        Ok(())
    }

    fn serialize_f64(self, v: f64) -> Result<()> {
        self.write_header(Tag::Double)?;
        self.writer.write_f64::<BigEndian>(v)?;
        Ok(())
    }

    fn serialize_char(self, v: char) -> Result<()> {
        self.write_header(Tag::Int)?;
        self.writer.write_u32::<BigEndian>(v as u32)?;
        Ok(())
    }

    fn serialize_str(self, v: &str) -> Result<()> {
        self.write_header(Tag::String)?;
        self.writer.write_size_prefixed_str(v, self.opts.strings)?;
        Ok(())
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<()> {
        self.write_header(Tag::List)?;
        self.writer.write_tag(Tag::Byte)?;
        self.writer.write_len(v.len())?;
        self.writer.write_all(v)?;
        Ok(())
    }

    fn serialize_none(self) -> Result<()> {
        match self.state {
            // The entry is left out entirely.
            State::Compound { .. } => Ok(()),
            _ => Err(Error::unsupported(
                "None is only supported as a compound field, where it is omitted",
            )),
        }
    }

    fn serialize_some<T: ?Sized>(self, value: &T) -> Result<()>
    where
        T: Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<()> {
        Err(Error::unsupported("unit has no NBT representation"))
    }

    fn serialize_unit_struct(self, name: &'static str) -> Result<()> {
        Err(Error::unsupported(format!(
            "unit struct {} has no NBT representation",
            name
        )))
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<()> {
        self.serialize_str(variant)
    }

    fn serialize_newtype_struct<T: ?Sized>(self, name: &'static str, value: &T) -> Result<()>
    where
        T: Serialize,
    {
        match mapper::token_tag(name) {
            Some(tag) => {
                self.write_header(tag)?;
                value.serialize(ArraySerializer { ser: self, tag })
            }
            None => value.serialize(self),
        }
    }

    fn serialize_newtype_variant<T: ?Sized>(
        self,
        name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _value: &T,
    ) -> Result<()>
    where
        T: Serialize,
    {
        Err(Error::unsupported(format!(
            "newtype variant {}::{} has no NBT representation, consider an untagged enum",
            name, variant
        )))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<Self::SerializeSeq> {
        let len = len.ok_or_else(|| Error::unsupported("sequences must have a known length"))?;
        Ok(self.start_seq(len, false))
    }

    fn serialize_tuple(self, len: usize) -> Result<Self::SerializeTuple> {
        Ok(self.start_seq(len, true))
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        len: usize,
    ) -> Result<Self::SerializeTupleStruct> {
        self.serialize_tuple(len)
    }

    fn serialize_tuple_variant(
        self,
        name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        Err(Error::unsupported(format!(
            "tuple variant {}::{} has no NBT representation",
            name, variant
        )))
    }

    fn serialize_map(self, len: Option<usize>) -> Result<Self::SerializeMap> {
        self.write_header(Tag::Compound)?;
        // serde writes structs with flattened fields as a map of unknown
        // length. Those keep declaration order like any other struct.
        let sorted = match len {
            Some(len) if self.opts.sort_map_keys => Some(Vec::with_capacity(len)),
            _ => None,
        };

        Ok(SerializerMap {
            ser: self,
            sorted,
            key: None,
        })
    }

    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<Self::SerializeStruct> {
        self.write_header(Tag::Compound)?;
        Ok(SerializerMap {
            ser: self,
            sorted: None,
            key: None,
        })
    }

    fn serialize_struct_variant(
        self,
        name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        Err(Error::unsupported(format!(
            "struct variant {}::{} has no NBT representation",
            name, variant
        )))
    }
}

/// Serializes the entries of a compound. Struct fields are written as they
/// come. Map entries are buffered and sorted by key first, unless key sorting
/// is turned off.
pub struct SerializerMap<'a, 'o, W: Write> {
    ser: &'a mut Serializer<'o, W>,
    sorted: Option<Vec<(String, Vec<u8>)>>,
    key: Option<String>,
}

impl<'a, 'o, W: Write> SerializerMap<'a, 'o, W> {
    fn write_entry<T: ?Sized>(&mut self, name: String, value: &T) -> Result<()>
    where
        T: Serialize,
    {
        match &mut self.sorted {
            Some(entries) => {
                let mut buf = Vec::new();
                let mut entry = Serializer::entry(&mut buf, self.ser.opts, name.clone());
                value.serialize(&mut entry)?;
                entries.push((name, buf));
            }
            None => {
                self.ser.state = State::Compound {
                    current_field: name,
                };
                value.serialize(&mut *self.ser)?;
            }
        }
        Ok(())
    }

    fn finish(self) -> Result<()> {
        if let Some(mut entries) = self.sorted {
            mapper::sort_entries(&mut entries);
            for (_, bytes) in entries {
                self.ser.writer.write_all(&bytes)?;
            }
        }
        self.ser.writer.write_tag(Tag::End)
    }
}

impl<'a, 'o, W: Write> serde::ser::SerializeMap for SerializerMap<'a, 'o, W> {
    type Ok = ();
    type Error = Error;

    fn serialize_key<T: ?Sized>(&mut self, key: &T) -> Result<()>
    where
        T: Serialize,
    {
        let mut name = String::new();
        key.serialize(&mut NameSerializer { name: &mut name })?;
        self.key = Some(name);
        Ok(())
    }

    fn serialize_value<T: ?Sized>(&mut self, value: &T) -> Result<()>
    where
        T: Serialize,
    {
        let name = self
            .key
            .take()
            .ok_or_else(|| Error::unsupported("map value serialized before its key"))?;
        self.write_entry(name, value)
    }

    fn end(self) -> Result<()> {
        self.finish()
    }
}

impl<'a, 'o, W: Write> serde::ser::SerializeStruct for SerializerMap<'a, 'o, W> {
    type Ok = ();
    type Error = Error;

    fn serialize_field<T: ?Sized>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: Serialize,
    {
        self.write_entry(key.to_owned(), value)
    }

    fn end(self) -> Result<()> {
        self.finish()
    }
}

/// Serializes the elements of a list or NBT array.
pub struct SerializerSeq<'a, 'o, W: Write> {
    ser: &'a mut Serializer<'o, W>,
    len: usize,
    written: usize,
    slot: usize,
    fixed: bool,
    // State the sequence's own header is written in. Taken by the first
    // element.
    outer: Option<State>,
}

impl<'a, 'o, W: Write> SerializerSeq<'a, 'o, W> {
    fn write_element<T: ?Sized>(&mut self, value: &T) -> Result<()>
    where
        T: Serialize,
    {
        self.ser.state = match self.outer.take() {
            Some(outer) => State::SeqStart {
                len: self.len,
                fixed: self.fixed,
                slot: self.slot,
                outer: Box::new(outer),
            },
            None => State::Element {
                element_tag: self.ser.slots[self.slot]
                    .ok_or_else(|| Error::unsupported("sequence element produced no value"))?,
            },
        };

        value.serialize(&mut *self.ser)?;
        self.written += 1;
        Ok(())
    }

    fn finish(self) -> Result<()> {
        if self.written != self.len {
            return Err(Error::unsupported(format!(
                "sequence claimed {} elements but produced {}",
                self.len, self.written
            )));
        }

        if let Some(outer) = self.outer {
            // Nothing was serialized, so there was no element to take a tag
            // from.
            match self.ser.opts.empty_list {
                EmptyList::Reject => return Err(Error::AmbiguousEmptySequence),
                EmptyList::EndTag => {
                    self.ser.state = outer;
                    self.ser.write_header(Tag::List)?;
                    self.ser.writer.write_tag(Tag::End)?;
                    self.ser.writer.write_len(0)?;
                }
            }
        }

        self.ser.slots.truncate(self.slot);
        Ok(())
    }
}

impl<'a, 'o, W: Write> serde::ser::SerializeSeq for SerializerSeq<'a, 'o, W> {
    type Ok = ();
    type Error = Error;

    fn serialize_element<T: ?Sized>(&mut self, value: &T) -> Result<()>
    where
        T: Serialize,
    {
        self.write_element(value)
    }

    fn end(self) -> Result<()> {
        self.finish()
    }
}

impl<'a, 'o, W: Write> serde::ser::SerializeTuple for SerializerSeq<'a, 'o, W> {
    type Ok = ();
    type Error = Error;

    fn serialize_element<T: ?Sized>(&mut self, value: &T) -> Result<()>
    where
        T: Serialize,
    {
        self.write_element(value)
    }

    fn end(self) -> Result<()> {
        self.finish()
    }
}

impl<'a, 'o, W: Write> serde::ser::SerializeTupleStruct for SerializerSeq<'a, 'o, W> {
    type Ok = ();
    type Error = Error;

    fn serialize_field<T: ?Sized>(&mut self, value: &T) -> Result<()>
    where
        T: Serialize,
    {
        self.write_element(value)
    }

    fn end(self) -> Result<()> {
        self.finish()
    }
}
