use serde::{ser::Impossible, Serialize, Serializer};

use crate::error::{Error, Result};

/// Collects a map key into a compound entry name. The name is only written
/// once the value has been seen, since the value's tag goes in front of it.
pub(crate) struct NameSerializer<'n> {
    pub(crate) name: &'n mut String,
}

fn not_a_name(kind: &str) -> Error {
    Error::unsupported(format!("compound keys must be strings, found {}", kind))
}

macro_rules! reject {
    ($($method:ident$(<$generic:ident>)?($($arg:ty),*) $(-> $ret:ty)?;)*) => {
        $(
            fn $method$(<$generic: ?Sized>)?(self, $(_: $arg),*) -> Result<reject!(@ret $($ret)?)> {
                Err(not_a_name(&stringify!($method)["serialize_".len()..]))
            }
        )*
    };
    (@ret) => { () };
    (@ret $ret:ty) => { $ret };
}

impl<'a, 'n> Serializer for &'a mut NameSerializer<'n> {
    type Ok = ();
    type Error = Error;
    type SerializeSeq = Impossible<(), Error>;
    type SerializeTuple = Impossible<(), Error>;
    type SerializeTupleStruct = Impossible<(), Error>;
    type SerializeTupleVariant = Impossible<(), Error>;
    type SerializeMap = Impossible<(), Error>;
    type SerializeStruct = Impossible<(), Error>;
    type SerializeStructVariant = Impossible<(), Error>;

    fn serialize_str(self, v: &str) -> Result<()> {
        self.name.push_str(v);
        Ok(())
    }

    fn serialize_char(self, c: char) -> Result<()> {
        self.name.push(c);
        Ok(())
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<()> {
        let s = std::str::from_utf8(v).map_err(|_| Error::nonunicode_string(v))?;
        self.name.push_str(s);
        Ok(())
    }

    // Enum keys, eg `HashMap<Direction, _>`, use the variant name.
    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<()> {
        self.serialize_str(variant)
    }

    fn serialize_newtype_struct<T: ?Sized>(self, _name: &'static str, value: &T) -> Result<()>
    where
        T: Serialize,
    {
        value.serialize(self)
    }

    reject! {
        serialize_bool(bool);
        serialize_i8(i8);
        serialize_i16(i16);
        serialize_i32(i32);
        serialize_i64(i64);
        serialize_u8(u8);
        serialize_u16(u16);
        serialize_u32(u32);
        serialize_u64(u64);
        serialize_f32(f32);
        serialize_f64(f64);
        serialize_none();
        serialize_some<T>(&T);
        serialize_unit();
        serialize_unit_struct(&'static str);
        serialize_newtype_variant<T>(&'static str, u32, &'static str, &T);
        serialize_seq(Option<usize>) -> Self::SerializeSeq;
        serialize_tuple(usize) -> Self::SerializeTuple;
        serialize_tuple_struct(&'static str, usize) -> Self::SerializeTupleStruct;
        serialize_tuple_variant(&'static str, u32, &'static str, usize) -> Self::SerializeTupleVariant;
        serialize_map(Option<usize>) -> Self::SerializeMap;
        serialize_struct(&'static str, usize) -> Self::SerializeStruct;
        serialize_struct_variant(&'static str, u32, &'static str, usize) -> Self::SerializeStructVariant;
    }
}
