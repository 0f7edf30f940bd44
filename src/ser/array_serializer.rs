use std::io::Write;

use serde::ser::Impossible;

use crate::{error::Error, error::Result, Tag};

use super::{
    serializer::{Serializer, SerializerSeq},
    write_nbt::WriteNbt,
};

/// ArraySerializer is for the payload of the NBT arrays ie ByteArray, IntArray
/// and LongArray. The tag and name are already written; it accepts a sequence
/// of integers of the array's element width.
pub(crate) struct ArraySerializer<'a, 'o, W: Write> {
    pub(crate) ser: &'a mut Serializer<'o, W>,
    pub(crate) tag: Tag,
}

macro_rules! only_sequences {
    ($v:ident, $t:ty) => {
        fn $v(self, _: $t) -> Result<()> {
            Err(Error::array_as_other())
        }
    };
}

impl<'a, 'o, W: Write> ArraySerializer<'a, 'o, W> {
    fn start(self, len: usize) -> Result<SerializerSeq<'a, 'o, W>> {
        let element = self.tag.array_element().ok_or_else(Error::array_as_other)?;
        self.ser.writer.write_len(len)?;
        Ok(self.ser.started_seq(len, element))
    }
}

impl<'a, 'o, W: Write> serde::Serializer for ArraySerializer<'a, 'o, W> {
    type Ok = ();
    type Error = Error;
    type SerializeSeq = SerializerSeq<'a, 'o, W>;
    type SerializeTuple = SerializerSeq<'a, 'o, W>;
    type SerializeTupleStruct = Impossible<(), Error>;
    type SerializeTupleVariant = Impossible<(), Error>;
    type SerializeMap = Impossible<(), Error>;
    type SerializeStruct = Impossible<(), Error>;
    type SerializeStructVariant = Impossible<(), Error>;

    only_sequences!(serialize_bool, bool);
    only_sequences!(serialize_i8, i8);
    only_sequences!(serialize_i16, i16);
    only_sequences!(serialize_i32, i32);
    only_sequences!(serialize_i64, i64);
    only_sequences!(serialize_u8, u8);
    only_sequences!(serialize_u16, u16);
    only_sequences!(serialize_u32, u32);
    only_sequences!(serialize_u64, u64);
    only_sequences!(serialize_f32, f32);
    only_sequences!(serialize_f64, f64);
    only_sequences!(serialize_char, char);
    only_sequences!(serialize_str, &str);
    only_sequences!(serialize_unit_struct, &'static str);

    fn serialize_bytes(self, v: &[u8]) -> Result<()> {
        if self.tag != Tag::ByteArray {
            return Err(Error::array_as_other());
        }
        self.ser.writer.write_len(v.len())?;
        self.ser.writer.write_all(v)?;
        Ok(())
    }

    fn serialize_none(self) -> Result<()> {
        Err(Error::array_as_other())
    }

    fn serialize_some<T: ?Sized>(self, _value: &T) -> Result<()>
    where
        T: serde::Serialize,
    {
        Err(Error::array_as_other())
    }

    fn serialize_unit(self) -> Result<()> {
        Err(Error::array_as_other())
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
    ) -> Result<()> {
        Err(Error::array_as_other())
    }

    fn serialize_newtype_struct<T: ?Sized>(self, _name: &'static str, value: &T) -> Result<()>
    where
        T: serde::Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T: ?Sized>(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _value: &T,
    ) -> Result<()>
    where
        T: serde::Serialize,
    {
        Err(Error::array_as_other())
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<Self::SerializeSeq> {
        let len = len.ok_or_else(|| Error::unsupported("arrays must have a known length"))?;
        self.start(len)
    }

    fn serialize_tuple(self, len: usize) -> Result<Self::SerializeTuple> {
        self.start(len)
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleStruct> {
        Err(Error::array_as_other())
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        Err(Error::array_as_other())
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap> {
        Err(Error::array_as_other())
    }

    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<Self::SerializeStruct> {
        Err(Error::array_as_other())
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        Err(Error::array_as_other())
    }
}
