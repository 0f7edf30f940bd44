use serde::de::{self, value::BorrowedStrDeserializer};
use serde::forward_to_deserialize_any;

use crate::de::Deserializer;
use crate::error::{Error, Result};
use crate::input::Input;
use crate::{mapper, Tag};

enum State {
    Unread,
    Read,
}

/// Presents an NBT array to a self-describing visitor as a single entry map,
/// keyed by the array's token, so that [`Value`](crate::Value) and the array
/// wrappers can tell the three arrays apart from a list. The count is already
/// read.
pub(crate) struct ArrayWrapperAccess<'a, In> {
    de: &'a mut Deserializer<In>,
    tag: Tag,
    len: usize,
    state: State,
}

impl<'a, In> ArrayWrapperAccess<'a, In> {
    pub(crate) fn new(de: &'a mut Deserializer<In>, tag: Tag, len: usize) -> Self {
        Self {
            de,
            tag,
            len,
            state: State::Unread,
        }
    }
}

impl<'a, 'de, In> de::MapAccess<'de> for ArrayWrapperAccess<'a, In>
where
    In: Input<'de>,
{
    type Error = Error;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>>
    where
        K: de::DeserializeSeed<'de>,
    {
        if let State::Read = self.state {
            return Ok(None);
        }
        self.state = State::Read;

        let token = mapper::array_token(self.tag)
            .ok_or_else(|| Error::mismatch("an NBT array", self.tag))?;
        seed.deserialize(BorrowedStrDeserializer::new(token)).map(Some)
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value>
    where
        V: de::DeserializeSeed<'de>,
    {
        let element = self
            .tag
            .array_element()
            .ok_or_else(|| Error::mismatch("an NBT array", self.tag))?;

        seed.deserialize(ArrayContents {
            de: &mut *self.de,
            tag: self.tag,
            element,
            len: self.len,
        })
    }

    fn size_hint(&self) -> Option<usize> {
        Some(1)
    }
}

/// The elements of an NBT array whose count has been read.
struct ArrayContents<'a, In> {
    de: &'a mut Deserializer<In>,
    tag: Tag,
    element: Tag,
    len: usize,
}

impl<'a, 'de, In> de::Deserializer<'de> for ArrayContents<'a, In>
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
        self.de.elements(visitor, self.element, self.len, None)
    }

    fn deserialize_tuple<V>(self, len: usize, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.de.elements(visitor, self.element, self.len, Some(len))
    }

    fn deserialize_bytes<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.tag {
            Tag::ByteArray => self.de.visit_bytes(visitor, self.len),
            found => Err(Error::mismatch("bytes", found)),
        }
    }

    fn deserialize_byte_buf<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_bytes(visitor)
    }

    forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
        option unit unit_struct newtype_struct seq tuple_struct
        map struct enum identifier ignored_any
    }
}
