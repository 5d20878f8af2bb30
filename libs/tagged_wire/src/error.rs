//! Error handling types.
//!
//! Every operation of this crate, including the serde bridge, shares the one
//! error type below.

use std::{fmt, io};

use serde_core::{de, ser};

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Potential errors to encounter when writing or reading tagged binary data.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// A read needed more bytes than were left in the buffer.
    #[error("buffer underrun: needed {needed} bytes but only {remaining} remain")]
    BufferUnderrun { needed: usize, remaining: usize },
    /// A block was too long for its `u32` length prefix.
    #[error("payload of {0} bytes does not fit a u32 length prefix")]
    OversizedPayload(usize),
    /// A collection marker did not have the expected value.
    #[error("malformed marker: expected {expected:#010x}, found {found:#010x}")]
    MalformedMarker { expected: u32, found: u32 },
    /// A type tag is not present in the registry.
    #[error("unknown type tag {0:?}")]
    UnknownTypeTag(String),
    /// A tagged value decoded to a different type than the caller asked for.
    #[error("type mismatch: expected {expected}, received {received}")]
    TypeMismatch {
        expected: &'static str,
        received: String,
    },
    /// A collection item referred to a type tag past the end of the table.
    #[error("type index {index} is out of range for {count} type tags")]
    TypeIndexOutOfRange { index: u32, count: u32 },
    /// A collection declared a negative item count.
    #[error("invalid item count {0}")]
    InvalidLength(i32),

    /// Tried to read a [`str`] value but it contained invalid UTF-8.
    #[error("invalid utf-8 in data for string")]
    InvalidUtf8,
    /// Tried to read a [`bool`] value but it wasn't 0 or 1.
    #[error("invalid bool value")]
    InvalidBool,
    /// Tried to deserialize a [`char`] value but its code was invalid.
    #[error("invalid char code")]
    InvalidChar,
    /// Tried to deserialize an [`Option`] with an invalid discriminator.
    #[error("invalid option discriminator")]
    InvalidOption,
    /// Past the expected end of the value were trailing bytes.
    #[error("{0} trailing bytes past the end of the value")]
    TrailingBytes(usize),

    /// A sequence or map tried to serialize itself without a length hint.
    #[error("sequences and maps must provide a length hint")]
    LengthRequired,
    /// A type tried to use [`de::Deserializer::deserialize_any`].
    #[error("types deserializing via any are unsupported")]
    AnyUnsupported,
    /// The error originated from the [`io::Write`] implementation.
    #[error(transparent)]
    Io(#[from] io::Error),
    /// Another reason provided by the value's implementation.
    #[error("{0}")]
    Custom(String),
}

impl Error {
    pub(crate) fn underrun(needed: usize, remaining: usize) -> Self {
        Self::BufferUnderrun { needed, remaining }
    }
}

impl ser::Error for Error {
    fn custom<T>(msg: T) -> Self
    where
        T: fmt::Display,
    {
        Self::Custom(msg.to_string())
    }
}

impl de::Error for Error {
    fn custom<T>(msg: T) -> Self
    where
        T: fmt::Display,
    {
        Self::Custom(msg.to_string())
    }
}
