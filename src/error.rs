//! Contains the Error and Result type used by the serializer and deserializer.
use std::fmt::Display;

use crate::Tag;

/// Errors that can occur while encoding or decoding NBT.
///
/// Every error is fatal for the call that produced it. On encode, bytes
/// already handed to a writer are not rolled back.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The value has no NBT representation, eg a unit, a `None` inside a
    /// list, or a sequence mixing elements of different tags.
    #[error("unsupported shape: {0}")]
    UnsupportedShape(String),

    /// An empty sequence was serialized while [`EmptyList::Reject`] was in
    /// effect, so no element tag could be chosen.
    ///
    /// [`EmptyList::Reject`]: crate::EmptyList::Reject
    #[error("ambiguous empty sequence: cannot infer the element tag of an empty list")]
    AmbiguousEmptySequence,

    /// A tag byte outside the known range.
    #[error("invalid nbt tag value: {0}{hint}", hint = gzip_hint(.0))]
    UnknownTag(u8),

    /// The input ended part way through a value.
    #[error("eof: unexpectedly ran out of input")]
    UnexpectedEndOfStream,

    /// The data's tag cannot be converted into the requested type.
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: &'static str, found: Tag },

    /// A list or array was decoded into a fixed size type of a different
    /// length.
    #[error("fixed size mismatch: expected {expected} elements, found {found}")]
    FixedSizeMismatch { expected: usize, found: usize },

    /// Compounds and lists were nested deeper than the configured limit.
    #[error("depth exceeded: nesting is deeper than the limit of {0}")]
    DepthExceeded(usize),

    /// A list or array count was negative or above the configured limit.
    #[error("invalid length: {0}")]
    InvalidLength(String),

    /// A string or name was not valid in the configured encoding.
    #[error("invalid nbt string: {0}")]
    InvalidString(String),

    /// A custom error raised by a `Serialize` or `Deserialize` implementation,
    /// such as a missing field.
    #[error("{0}")]
    Message(String),

    /// The underlying reader or writer failed.
    #[error("io error: {0}")]
    Io(#[source] std::io::Error),
}

/// Convenience type for Result.
pub type Result<T> = std::result::Result<T, Error>;

fn gzip_hint(tag: &u8) -> &'static str {
    // 0x1f is the first byte of the gzip magic number.
    if *tag == 0x1f {
        " (the data may be gzip compressed, decompress it first)"
    } else {
        ""
    }
}

impl serde::de::Error for Error {
    fn custom<T: Display>(msg: T) -> Self {
        Error::Message(msg.to_string())
    }
}

impl serde::ser::Error for Error {
    fn custom<T: Display>(msg: T) -> Self {
        Error::Message(msg.to_string())
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        match e.kind() {
            std::io::ErrorKind::UnexpectedEof => Error::UnexpectedEndOfStream,
            _ => Error::Io(e),
        }
    }
}

impl Error {
    pub(crate) fn unsupported(msg: impl Into<String>) -> Error {
        Error::UnsupportedShape(msg.into())
    }

    pub(crate) fn mismatch(expected: &'static str, found: Tag) -> Error {
        Error::TypeMismatch { expected, found }
    }

    pub(crate) fn nonunicode_string(data: &[u8]) -> Error {
        Error::InvalidString(format!("nonunicode: {}", String::from_utf8_lossy(data)))
    }

    pub(crate) fn array_as_other() -> Error {
        Error::unsupported("NBT arrays must be given a sequence of integers")
    }
}
