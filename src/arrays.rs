use std::{fmt, marker::PhantomData, ops::Deref};

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::{BYTE_ARRAY_TOKEN, INT_ARRAY_TOKEN, LONG_ARRAY_TOKEN};

macro_rules! array_wrapper {
    ($(#[$meta:meta])* $name:ident, $elem:ty, $token:ident, $expecting:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Default)]
        #[cfg_attr(feature = "arbitrary1", derive(arbitrary::Arbitrary))]
        pub struct $name {
            data: Vec<$elem>,
        }

        impl $name {
            pub fn new(data: Vec<$elem>) -> Self {
                Self { data }
            }

            /// Take the elements out of the array.
            pub fn into_inner(self) -> Vec<$elem> {
                self.data
            }
        }

        impl Deref for $name {
            type Target = Vec<$elem>;

            fn deref(&self) -> &Self::Target {
                &self.data
            }
        }

        impl From<Vec<$elem>> for $name {
            fn from(data: Vec<$elem>) -> Self {
                Self::new(data)
            }
        }

        impl Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: Serializer,
            {
                // Other formats see a plain sequence. Our serializer
                // recognises the token and writes the NBT array tag.
                serializer.serialize_newtype_struct($token, self.data.as_slice())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: Deserializer<'de>,
            {
                deserializer
                    .deserialize_newtype_struct(
                        $token,
                        ArrayVisitor::<$elem> {
                            token: $token,
                            expecting: $expecting,
                            marker: PhantomData,
                        },
                    )
                    .map($name::new)
            }
        }
    };
}

array_wrapper!(
    /// NBT ByteArray that owns its data. Use this in place of `Vec<i8>` when
    /// a growable byte array is needed, since a plain `Vec` serializes as a
    /// List.
    ///
    /// ```
    /// use nbtwire::ByteArray;
    /// use serde::{Deserialize, Serialize};
    ///
    /// #[derive(Serialize, Deserialize)]
    /// struct Section {
    ///     blocks: ByteArray,
    /// }
    ///
    /// let section = Section { blocks: ByteArray::new(vec![1, 2, 3]) };
    /// let bytes = nbtwire::to_bytes(&section)?;
    /// let back: Section = nbtwire::from_bytes(&bytes)?;
    /// assert_eq!(*back.blocks, [1, 2, 3]);
    /// # Ok::<(), nbtwire::error::Error>(())
    /// ```
    ByteArray,
    i8,
    BYTE_ARRAY_TOKEN,
    "an nbt byte array"
);

array_wrapper!(
    /// NBT IntArray that owns its data.
    IntArray,
    i32,
    INT_ARRAY_TOKEN,
    "an nbt int array"
);

array_wrapper!(
    /// NBT LongArray that owns its data.
    LongArray,
    i64,
    LONG_ARRAY_TOKEN,
    "an nbt long array"
);

struct ArrayVisitor<T> {
    token: &'static str,
    expecting: &'static str,
    marker: PhantomData<T>,
}

impl<'de, T> de::Visitor<'de> for ArrayVisitor<T>
where
    T: Deserialize<'de>,
{
    type Value = Vec<T>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str(self.expecting)
    }

    fn visit_newtype_struct<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        Vec::deserialize(deserializer)
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: de::SeqAccess<'de>,
    {
        let mut data = Vec::with_capacity(seq.size_hint().unwrap_or(0).min(4096));
        while let Some(v) = seq.next_element()? {
            data.push(v);
        }
        Ok(data)
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: de::MapAccess<'de>,
    {
        // The shape NBT arrays take when buffered through a self-describing
        // path, eg an untagged enum.
        match map.next_key::<String>()? {
            Some(key) if key == self.token => map.next_value(),
            _ => Err(de::Error::invalid_type(de::Unexpected::Map, &self)),
        }
    }
}
