use std::fmt;

use serde::{
    de::{self, DeserializeSeed, Visitor},
    Deserialize,
};

use crate::{ByteArray, Compound, IntArray, LongArray, Value};

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_any(ValueVisitor)
    }
}

struct ValueVisitor;

impl<'de> Visitor<'de> for ValueVisitor {
    type Value = Value;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("valid NBT")
    }

    fn visit_bool<E>(self, v: bool) -> Result<Value, E>
    where
        E: de::Error,
    {
        Ok(Value::Byte(v as i8))
    }

    fn visit_i8<E>(self, v: i8) -> Result<Value, E>
    where
        E: de::Error,
    {
        Ok(Value::Byte(v))
    }

    fn visit_i16<E>(self, v: i16) -> Result<Value, E>
    where
        E: de::Error,
    {
        Ok(Value::Short(v))
    }

    fn visit_i32<E>(self, v: i32) -> Result<Value, E>
    where
        E: de::Error,
    {
        Ok(Value::Int(v))
    }

    fn visit_i64<E>(self, v: i64) -> Result<Value, E>
    where
        E: de::Error,
    {
        Ok(Value::Long(v))
    }

    // Self-describing formats other than NBT may hand over unsigned integers.
    fn visit_u64<E>(self, v: u64) -> Result<Value, E>
    where
        E: de::Error,
    {
        Ok(Value::Long(v as i64))
    }

    fn visit_f32<E>(self, v: f32) -> Result<Value, E>
    where
        E: de::Error,
    {
        Ok(Value::Float(v))
    }

    fn visit_f64<E>(self, v: f64) -> Result<Value, E>
    where
        E: de::Error,
    {
        Ok(Value::Double(v))
    }

    fn visit_str<E>(self, v: &str) -> Result<Value, E>
    where
        E: de::Error,
    {
        Ok(Value::String(v.to_owned()))
    }

    fn visit_string<E>(self, v: String) -> Result<Value, E>
    where
        E: de::Error,
    {
        Ok(Value::String(v))
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Value, A::Error>
    where
        A: de::SeqAccess<'de>,
    {
        let mut v = Vec::<Value>::with_capacity(seq.size_hint().unwrap_or(0).min(4096));

        while let Some(el) = seq.next_element()? {
            v.push(el);
        }

        Ok(Value::List(v))
    }

    fn visit_map<A>(self, mut map: A) -> Result<Value, A::Error>
    where
        A: de::MapAccess<'de>,
    {
        match map.next_key_seed(KeyClassifier)? {
            Some(KeyClass::Compound(first_key)) => {
                let mut compound = Compound::default();

                compound.insert(first_key, map.next_value()?);
                while let Some((key, value)) = map.next_entry()? {
                    compound.insert(key, value);
                }

                Ok(Value::Compound(compound))
            }
            Some(KeyClass::ByteArray) => {
                let data = map.next_value::<Vec<i8>>()?;
                Ok(Value::ByteArray(ByteArray::new(data)))
            }
            Some(KeyClass::IntArray) => {
                let data = map.next_value::<Vec<i32>>()?;
                Ok(Value::IntArray(IntArray::new(data)))
            }
            Some(KeyClass::LongArray) => {
                let data = map.next_value::<Vec<i64>>()?;
                Ok(Value::LongArray(LongArray::new(data)))
            }
            // No keys just means an empty compound.
            None => Ok(Value::Compound(Compound::default())),
        }
    }
}

struct KeyClassifier;

enum KeyClass {
    Compound(String),
    ByteArray,
    IntArray,
    LongArray,
}

impl KeyClass {
    fn of(s: &str) -> Option<KeyClass> {
        match s {
            crate::BYTE_ARRAY_TOKEN => Some(KeyClass::ByteArray),
            crate::INT_ARRAY_TOKEN => Some(KeyClass::IntArray),
            crate::LONG_ARRAY_TOKEN => Some(KeyClass::LongArray),
            _ => None,
        }
    }
}

impl<'de> DeserializeSeed<'de> for KeyClassifier {
    type Value = KeyClass;

    fn deserialize<D>(self, deserializer: D) -> Result<KeyClass, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_str(self)
    }
}

impl<'de> Visitor<'de> for KeyClassifier {
    type Value = KeyClass;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("an nbt field string")
    }

    fn visit_string<E>(self, s: String) -> Result<KeyClass, E>
    where
        E: de::Error,
    {
        Ok(KeyClass::of(&s).unwrap_or(KeyClass::Compound(s)))
    }

    fn visit_str<E>(self, s: &str) -> Result<KeyClass, E>
    where
        E: de::Error,
    {
        Ok(KeyClass::of(s).unwrap_or_else(|| KeyClass::Compound(s.to_owned())))
    }
}
