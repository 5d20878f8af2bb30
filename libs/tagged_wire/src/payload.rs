use std::any::{Any, type_name};
use std::fmt;

use crate::error::{Error, Result};
use crate::reader::BinaryReader;
use crate::writer::BinaryWriter;

/// A value that knows its own type tag and binary form.
///
/// Implement this next to the type definition, then register the type with a
/// [`TypeRegistry`](crate::TypeRegistry) to decode it polymorphically. The
/// [`serde_payload!`](crate::serde_payload) macro implements this through
/// serde.
///
/// # Examples
///
/// ```
/// use tagged_wire::{BinaryReader, BinaryWriter, Payload};
///
/// #[derive(Debug, PartialEq)]
/// struct Ping(u32);
///
/// impl Payload for Ping {
///     const TYPE_TAG: &'static str = "ping";
///
///     fn write_payload(&self, w: &mut BinaryWriter) -> tagged_wire::Result<()> {
///         w.write(self.0);
///         Ok(())
///     }
///
///     fn read_payload(r: &mut BinaryReader<'_>) -> tagged_wire::Result<Self> {
///         r.read().map(Ping)
///     }
/// }
///
/// let bytes = tagged_wire::payload_bytes(&Ping(7)).expect("must encode");
/// assert_eq!(bytes, [0, 0, 0, 7]);
/// let ping: Ping = tagged_wire::payload_from_bytes(&bytes).expect("must decode");
/// assert_eq!(ping, Ping(7));
/// ```
pub trait Payload: Any + fmt::Debug + Send + Sync + Sized {
    /// The stable identifier written ahead of the payload.
    const TYPE_TAG: &'static str;

    /// Writes the value's own bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if a nested block is too long.
    fn write_payload(&self, w: &mut BinaryWriter) -> Result<()>;

    /// Reconstructs a value from the bytes [`Self::write_payload`] wrote.
    ///
    /// # Errors
    ///
    /// Returns an error if the bytes are truncated or malformed.
    fn read_payload(r: &mut BinaryReader<'_>) -> Result<Self>;
}

/// Encodes a value's payload without a tag or length prefix.
///
/// # Errors
///
/// Returns any error of [`Payload::write_payload`].
pub fn payload_bytes<T: Payload>(value: &T) -> Result<Vec<u8>> {
    let mut w = BinaryWriter::new();
    value.write_payload(&mut w)?;
    Ok(w.into_inner())
}

/// Decodes a value from exactly its payload bytes.
///
/// # Errors
///
/// Returns any error of [`Payload::read_payload`], or
/// [`Error::TrailingBytes`] if the payload wasn't fully consumed.
pub fn payload_from_bytes<T: Payload>(bytes: &[u8]) -> Result<T> {
    let mut r = BinaryReader::new(bytes);
    let value = T::read_payload(&mut r)?;
    r.finish()?;
    Ok(value)
}

/// Object-safe form of [`Payload`], implemented for every payload type.
pub trait DynPayload: Any + fmt::Debug + Send + Sync {
    /// Gets the type tag of the concrete type.
    fn type_tag(&self) -> &'static str;

    /// Gets the Rust name of the concrete type, for diagnostics.
    fn type_name(&self) -> &'static str;

    /// Writes the payload to `w`.
    ///
    /// # Errors
    ///
    /// Same as [`Payload::write_payload`].
    fn write_payload_dyn(&self, w: &mut BinaryWriter) -> Result<()>;

    /// Encodes the payload into a new buffer.
    ///
    /// # Errors
    ///
    /// Same as [`Payload::write_payload`].
    fn to_payload_bytes(&self) -> Result<Vec<u8>>;

    fn as_any(&self) -> &dyn Any;
    fn into_any(self: Box<Self>) -> Box<dyn Any + Send + Sync>;
}

impl<T: Payload> DynPayload for T {
    fn type_tag(&self) -> &'static str {
        T::TYPE_TAG
    }

    fn type_name(&self) -> &'static str {
        type_name::<T>()
    }

    fn write_payload_dyn(&self, w: &mut BinaryWriter) -> Result<()> {
        self.write_payload(w)
    }

    fn to_payload_bytes(&self) -> Result<Vec<u8>> {
        payload_bytes(self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any + Send + Sync> {
        self
    }
}

impl dyn DynPayload {
    /// Whether the concrete type is `T`.
    #[must_use]
    pub fn is<T: Payload>(&self) -> bool {
        self.as_any().is::<T>()
    }

    /// Gets a reference to the concrete value if it is a `T`.
    #[must_use]
    pub fn downcast_ref<T: Payload>(&self) -> Option<&T> {
        self.as_any().downcast_ref()
    }

    /// Converts into the concrete value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TypeMismatch`] if the concrete type isn't `T`.
    pub fn downcast<T: Payload>(self: Box<Self>) -> Result<Box<T>> {
        let received = self.type_name();
        self.into_any()
            .downcast()
            .map_err(|_| Error::TypeMismatch {
                expected: type_name::<T>(),
                received: received.to_owned(),
            })
    }
}

/// Implements [`Payload`] for types that implement serde's `Serialize` and
/// `Deserialize`, encoding them with this crate's serde bridge.
///
/// # Examples
///
/// ```
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Debug, PartialEq, Serialize, Deserialize)]
/// struct Label {
///     text: String,
///     size: u16,
/// }
///
/// tagged_wire::serde_payload!(Label = "label");
///
/// let label = Label { text: "hi".to_owned(), size: 12 };
/// let bytes = tagged_wire::payload_bytes(&label).expect("must encode");
/// assert_eq!(bytes, [0, 0, 0, 2, b'h', b'i', 0, 12]);
/// ```
#[macro_export]
macro_rules! serde_payload {
    ($($Ty:ty = $tag:literal),* $(,)?) => {$(
        impl $crate::Payload for $Ty {
            const TYPE_TAG: &'static str = $tag;

            fn write_payload(&self, w: &mut $crate::BinaryWriter) -> $crate::Result<()> {
                $crate::to_writer(w, self)
            }

            fn read_payload(r: &mut $crate::BinaryReader<'_>) -> $crate::Result<Self> {
                $crate::de::from_reader(r)
            }
        }
    )*};
}
