//! Byte sources for the deserializer: an in-memory [`Slice`] that values can
//! borrow from, and a [`Reader`] over any [`Read`] that copies into scratch
//! space instead.

use std::{
    borrow::Cow,
    io::{self, Read},
    ops::Deref,
};

use byteorder::{BigEndian, ReadBytesExt};

use crate::{
    error::{Error, Result},
    StringEncoding, Tag,
};

mod private {
    // Only this crate can implement this trait. Other traits can inherit from
    // Sealed in order to prevent other crates from creating implementations.
    pub trait Sealed {}
}

/// Data handed out by an [`Input`], either borrowed for the whole input
/// lifetime `'b` or only valid until the next read (`'c`).
pub enum Reference<'b, 'c, T>
where
    T: ?Sized + 'static,
{
    Borrowed(&'b T),
    Copied(&'c T),
}

impl<'b, 'c, T: ?Sized + 'static> Deref for Reference<'b, 'c, T> {
    type Target = T;

    fn deref(&self) -> &T {
        match self {
            Reference::Borrowed(v) => v,
            Reference::Copied(v) => v,
        }
    }
}

fn decode_str(bytes: &[u8], encoding: StringEncoding) -> Result<Cow<'_, str>> {
    match encoding {
        StringEncoding::Utf8 => std::str::from_utf8(bytes)
            .map(Cow::Borrowed)
            .map_err(|_| Error::nonunicode_string(bytes)),
        StringEncoding::ModifiedUtf8 => {
            cesu8::from_java_cesu8(bytes).map_err(|_| Error::nonunicode_string(bytes))
        }
    }
}

// Fixed-width big-endian reads from whatever `$source` evaluates to, given
// the input as `$this` and the byte count as `$width`.
macro_rules! big_endian {
    (|$this:ident, $width:ident| $source:expr; $($method:ident -> $ty:ty: $read:ident, $n:literal;)*) => {
        $(
            fn $method(&mut self) -> Result<$ty> {
                let $this = self;
                let $width = $n;
                Ok($source.$read::<BigEndian>()?)
            }
        )*
    };
}

/// A source of NBT bytes.
pub trait Input<'de>: private::Sealed {
    #[doc(hidden)]
    fn consume_byte(&mut self) -> Result<u8>;

    #[doc(hidden)]
    fn consume_i16(&mut self) -> Result<i16>;

    #[doc(hidden)]
    fn consume_i32(&mut self) -> Result<i32>;

    #[doc(hidden)]
    fn consume_i64(&mut self) -> Result<i64>;

    #[doc(hidden)]
    fn consume_f32(&mut self) -> Result<f32>;

    #[doc(hidden)]
    fn consume_f64(&mut self) -> Result<f64>;

    /// Read a length-prefixed string in the given encoding.
    #[doc(hidden)]
    fn consume_str<'s>(
        &'s mut self,
        scratch: &'s mut Vec<u8>,
        encoding: StringEncoding,
    ) -> Result<Reference<'de, 's, str>>;

    #[doc(hidden)]
    fn consume_bytes<'s>(
        &'s mut self,
        n: usize,
        scratch: &'s mut Vec<u8>,
    ) -> Result<Reference<'de, 's, [u8]>>;

    #[doc(hidden)]
    fn ignore_bytes(&mut self, n: usize) -> Result<()>;

    #[doc(hidden)]
    fn ignore_str(&mut self) -> Result<()>;

    #[doc(hidden)]
    fn consume_tag(&mut self) -> Result<Tag> {
        let tag = self.consume_byte()?;
        Tag::try_from(tag).map_err(|_| Error::UnknownTag(tag))
    }
}

/// Input borrowed from a byte slice.
pub struct Slice<'de> {
    pub(crate) data: &'de [u8],
}

impl<'de> private::Sealed for Slice<'de> {}

impl<'de> Slice<'de> {
    fn consume(&mut self, n: usize) -> Result<&'de [u8]> {
        if n > self.data.len() {
            return Err(Error::UnexpectedEndOfStream);
        }
        let (ret, rest) = self.data.split_at(n);
        self.data = rest;
        Ok(ret)
    }

    fn consume_str_bytes(&mut self) -> Result<&'de [u8]> {
        let len = self.consume(2)?.read_u16::<BigEndian>()? as usize;
        self.consume(len)
    }
}

impl<'de> Input<'de> for Slice<'de> {
    fn consume_byte(&mut self) -> Result<u8> {
        Ok(self.consume(1)?[0])
    }

    big_endian! {
        |s, width| s.consume(width)?;
        consume_i16 -> i16: read_i16, 2;
        consume_i32 -> i32: read_i32, 4;
        consume_i64 -> i64: read_i64, 8;
        consume_f32 -> f32: read_f32, 4;
        consume_f64 -> f64: read_f64, 8;
    }

    fn consume_str<'s>(
        &'s mut self,
        scratch: &'s mut Vec<u8>,
        encoding: StringEncoding,
    ) -> Result<Reference<'de, 's, str>> {
        let bytes = self.consume_str_bytes()?;
        Ok(match decode_str(bytes, encoding)? {
            Cow::Borrowed(s) => Reference::Borrowed(s),
            Cow::Owned(s) => {
                *scratch = s.into_bytes();
                let s = std::str::from_utf8(scratch).map_err(|_| Error::nonunicode_string(bytes))?;
                Reference::Copied(s)
            }
        })
    }

    fn consume_bytes<'s>(
        &'s mut self,
        n: usize,
        _scratch: &'s mut Vec<u8>,
    ) -> Result<Reference<'de, 's, [u8]>> {
        Ok(Reference::Borrowed(self.consume(n)?))
    }

    fn ignore_bytes(&mut self, n: usize) -> Result<()> {
        self.consume(n)?;
        Ok(())
    }

    fn ignore_str(&mut self) -> Result<()> {
        self.consume_str_bytes()?;
        Ok(())
    }
}

/// Input read from an [`io::Read`]. Nothing can be borrowed from it.
pub struct Reader<R: Read> {
    pub(crate) reader: R,
}

impl<R: Read> private::Sealed for Reader<R> {}

impl<'de, R: Read> Input<'de> for Reader<R> {
    fn consume_byte(&mut self) -> Result<u8> {
        Ok(self.reader.read_u8()?)
    }

    big_endian! {
        |r, _width| &mut r.reader;
        consume_i16 -> i16: read_i16, 2;
        consume_i32 -> i32: read_i32, 4;
        consume_i64 -> i64: read_i64, 8;
        consume_f32 -> f32: read_f32, 4;
        consume_f64 -> f64: read_f64, 8;
    }

    fn consume_str<'s>(
        &'s mut self,
        scratch: &'s mut Vec<u8>,
        encoding: StringEncoding,
    ) -> Result<Reference<'de, 's, str>> {
        let len = self.reader.read_u16::<BigEndian>()? as usize;
        scratch.clear();
        scratch.resize(len, 0);
        self.reader.read_exact(scratch)?;

        let decoded = match decode_str(scratch, encoding)? {
            Cow::Borrowed(_) => None,
            Cow::Owned(s) => Some(s),
        };
        if let Some(s) = decoded {
            *scratch = s.into_bytes();
        }

        let s = std::str::from_utf8(scratch).map_err(|_| Error::nonunicode_string(scratch))?;
        Ok(Reference::Copied(s))
    }

    fn consume_bytes<'s>(
        &'s mut self,
        n: usize,
        scratch: &'s mut Vec<u8>,
    ) -> Result<Reference<'de, 's, [u8]>> {
        scratch.clear();
        // `n` comes from the input, so it is never used to preallocate.
        let read = (&mut self.reader).take(n as u64).read_to_end(scratch)?;
        if read != n {
            return Err(Error::UnexpectedEndOfStream);
        }
        Ok(Reference::Copied(scratch.as_slice()))
    }

    fn ignore_bytes(&mut self, n: usize) -> Result<()> {
        let copied = io::copy(&mut (&mut self.reader).take(n as u64), &mut io::sink())?;
        if copied != n as u64 {
            return Err(Error::UnexpectedEndOfStream);
        }
        Ok(())
    }

    fn ignore_str(&mut self) -> Result<()> {
        let len = self.reader.read_u16::<BigEndian>()? as usize;
        self.ignore_bytes(len)
    }
}
