use std::result;

use serde::{ser::Impossible, Serialize};

use crate::{
    error::{Error, Result},
    mapper,
    ser::NameSerializer,
    ByteArray, Compound, IntArray, LongArray, Tag, Value,
};

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Value::Byte(v) => serializer.serialize_i8(*v),
            Value::Short(v) => serializer.serialize_i16(*v),
            Value::Int(v) => serializer.serialize_i32(*v),
            Value::Long(v) => serializer.serialize_i64(*v),
            Value::Float(v) => serializer.serialize_f32(*v),
            Value::Double(v) => serializer.serialize_f64(*v),
            Value::String(v) => serializer.serialize_str(v),
            Value::ByteArray(v) => v.serialize(serializer),
            Value::IntArray(v) => v.serialize(serializer),
            Value::LongArray(v) => v.serialize(serializer),
            Value::List(v) => v.serialize(serializer),
            Value::Compound(v) => v.serialize(serializer),
        }
    }
}

/// Serializer whose output is a `Value`, backing [`to_value`][crate::to_value].
/// `None` output means the value is absent, which only a compound can hold.
pub(crate) struct ValueSerializer;

fn element<T: ?Sized + Serialize>(value: &T) -> Result<Value> {
    value
        .serialize(ValueSerializer)?
        .ok_or_else(|| Error::unsupported("None is only supported as a compound field"))
}

macro_rules! collect_array {
    ($items:expr, $variant:ident, $array:ident) => {
        $items
            .into_iter()
            .map(|v| match v {
                Value::$variant(v) => Ok(v),
                _ => Err(Error::array_as_other()),
            })
            .collect::<Result<Vec<_>>>()
            .map(|data| Value::$array($array::new(data)))
    };
}

fn into_array(array: Tag, items: Vec<Value>) -> Result<Value> {
    match array {
        Tag::ByteArray => collect_array!(items, Byte, ByteArray),
        Tag::IntArray => collect_array!(items, Int, IntArray),
        Tag::LongArray => collect_array!(items, Long, LongArray),
        _ => Err(Error::array_as_other()),
    }
}

impl serde::Serializer for ValueSerializer {
    type Ok = Option<Value>;
    type Error = Error;

    type SerializeSeq = SerializeVec;
    type SerializeTuple = SerializeVec;
    type SerializeTupleStruct = SerializeVec;
    type SerializeTupleVariant = Impossible<Option<Value>, Error>;
    type SerializeMap = SerializeCompound;
    type SerializeStruct = SerializeCompound;
    type SerializeStructVariant = Impossible<Option<Value>, Error>;

    fn serialize_bool(self, v: bool) -> Result<Option<Value>> {
        Ok(Some(Value::Byte(v as i8)))
    }

    fn serialize_i8(self, v: i8) -> Result<Option<Value>> {
        Ok(Some(Value::Byte(v)))
    }

    fn serialize_i16(self, v: i16) -> Result<Option<Value>> {
        Ok(Some(Value::Short(v)))
    }

    fn serialize_i32(self, v: i32) -> Result<Option<Value>> {
        Ok(Some(Value::Int(v)))
    }

    fn serialize_i64(self, v: i64) -> Result<Option<Value>> {
        Ok(Some(Value::Long(v)))
    }

    fn serialize_u8(self, v: u8) -> Result<Option<Value>> {
        Ok(Some(Value::Byte(v as i8)))
    }

    fn serialize_u16(self, v: u16) -> Result<Option<Value>> {
        Ok(Some(Value::Short(v as i16)))
    }

    fn serialize_u32(self, v: u32) -> Result<Option<Value>> {
        Ok(Some(Value::Int(v as i32)))
    }

    fn serialize_u64(self, v: u64) -> Result<Option<Value>> {
        Ok(Some(Value::Long(v as i64)))
    }

    fn serialize_f32(self, v: f32) -> Result<Option<Value>> {
        Ok(Some(Value::Float(v)))
    }

    fn serialize_f64(self, v: f64) -> Result<Option<Value>> {
        Ok(Some(Value::Double(v)))
    }

    fn serialize_char(self, v: char) -> Result<Option<Value>> {
        Ok(Some(Value::Int(v as i32)))
    }

    fn serialize_str(self, v: &str) -> Result<Option<Value>> {
        Ok(Some(Value::String(v.to_owned())))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Option<Value>> {
        Ok(Some(Value::List(
            v.iter().map(|b| Value::Byte(*b as i8)).collect(),
        )))
    }

    fn serialize_none(self) -> Result<Option<Value>> {
        Ok(None)
    }

    fn serialize_some<T: ?Sized>(self, value: &T) -> Result<Option<Value>>
    where
        T: Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Option<Value>> {
        Err(Error::unsupported("unit has no NBT representation"))
    }

    fn serialize_unit_struct(self, name: &'static str) -> Result<Option<Value>> {
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
    ) -> Result<Option<Value>> {
        Ok(Some(Value::String(variant.to_owned())))
    }

    fn serialize_newtype_struct<T: ?Sized>(
        self,
        name: &'static str,
        value: &T,
    ) -> Result<Option<Value>>
    where
        T: Serialize,
    {
        match mapper::token_tag(name) {
            Some(array) => match element(value)? {
                Value::List(items) => into_array(array, items).map(Some),
                _ => Err(Error::array_as_other()),
            },
            None => value.serialize(self),
        }
    }

    fn serialize_newtype_variant<T: ?Sized>(
        self,
        name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _value: &T,
    ) -> Result<Option<Value>>
    where
        T: Serialize,
    {
        Err(Error::unsupported(format!(
            "newtype variant {}::{} has no NBT representation",
            name, variant
        )))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<SerializeVec> {
        Ok(SerializeVec {
            items: Vec::with_capacity(len.unwrap_or(0)),
            fixed: false,
        })
    }

    fn serialize_tuple(self, len: usize) -> Result<SerializeVec> {
        Ok(SerializeVec {
            items: Vec::with_capacity(len),
            fixed: true,
        })
    }

    fn serialize_tuple_struct(self, _name: &'static str, len: usize) -> Result<SerializeVec> {
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

    fn serialize_map(self, _len: Option<usize>) -> Result<SerializeCompound> {
        Ok(SerializeCompound {
            map: Compound::default(),
            key: None,
        })
    }

    fn serialize_struct(self, _name: &'static str, len: usize) -> Result<SerializeCompound> {
        self.serialize_map(Some(len))
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

pub(crate) struct SerializeVec {
    items: Vec<Value>,
    fixed: bool,
}

impl SerializeVec {
    fn push<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<()> {
        let value = element(value)?;
        if let Some(first) = self.items.first() {
            if first.tag() != value.tag() {
                return Err(Error::unsupported(format!(
                    "sequence elements must all have the same tag, found {} after {}",
                    value.tag(),
                    first.tag()
                )));
            }
        }
        self.items.push(value);
        Ok(())
    }

    fn finish(self) -> Result<Option<Value>> {
        let container = self
            .items
            .first()
            .map(|first| mapper::sequence_tag(self.fixed, first.tag()));

        match container {
            Some(array) if array != Tag::List => into_array(array, self.items).map(Some),
            _ => Ok(Some(Value::List(self.items))),
        }
    }
}

impl serde::ser::SerializeSeq for SerializeVec {
    type Ok = Option<Value>;
    type Error = Error;

    fn serialize_element<T: ?Sized>(&mut self, value: &T) -> Result<()>
    where
        T: Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Option<Value>> {
        self.finish()
    }
}

impl serde::ser::SerializeTuple for SerializeVec {
    type Ok = Option<Value>;
    type Error = Error;

    fn serialize_element<T: ?Sized>(&mut self, value: &T) -> Result<()>
    where
        T: Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Option<Value>> {
        self.finish()
    }
}

impl serde::ser::SerializeTupleStruct for SerializeVec {
    type Ok = Option<Value>;
    type Error = Error;

    fn serialize_field<T: ?Sized>(&mut self, value: &T) -> Result<()>
    where
        T: Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Option<Value>> {
        self.finish()
    }
}

pub(crate) struct SerializeCompound {
    map: Compound,
    key: Option<String>,
}

impl SerializeCompound {
    fn insert<T: ?Sized + Serialize>(&mut self, key: String, value: &T) -> Result<()> {
        // Absent values leave no entry behind.
        if let Some(value) = value.serialize(ValueSerializer)? {
            self.map.insert(key, value);
        }
        Ok(())
    }
}

impl serde::ser::SerializeMap for SerializeCompound {
    type Ok = Option<Value>;
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
        let key = self
            .key
            .take()
            .ok_or_else(|| Error::unsupported("map value serialized before its key"))?;
        self.insert(key, value)
    }

    fn end(self) -> Result<Option<Value>> {
        Ok(Some(Value::Compound(self.map)))
    }
}

impl serde::ser::SerializeStruct for SerializeCompound {
    type Ok = Option<Value>;
    type Error = Error;

    fn serialize_field<T: ?Sized>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: Serialize,
    {
        self.insert(key.to_owned(), value)
    }

    fn end(self) -> Result<Option<Value>> {
        Ok(Some(Value::Compound(self.map)))
    }
}
