use std::any::TypeId;

use crate::error::{Error, Result};
use crate::fixed::FixedWidth;
use crate::payload::{DynPayload, Payload};
use crate::registry::TypeRegistry;

/// Reads big-endian binary data from a borrowed buffer.
///
/// Every read checks the remaining length first and fails with
/// [`Error::BufferUnderrun`] without advancing if there isn't enough data.
/// Blocks and strings are borrowed from the buffer.
#[derive(Debug, Clone)]
pub struct BinaryReader<'a> {
    rest: &'a [u8],
    pos: usize,
}

impl<'a> BinaryReader<'a> {
    /// Creates a reader at the start of `buf`.
    #[must_use]
    pub const fn new(buf: &'a [u8]) -> Self {
        Self { rest: buf, pos: 0 }
    }

    /// Reads a fixed-width big-endian value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BufferUnderrun`] if too few bytes remain.
    pub fn read<T: FixedWidth>(&mut self) -> Result<T> {
        let mut bytes = T::Bytes::default();
        let src = self.read_raw(bytes.as_ref().len())?;
        bytes.as_mut().copy_from_slice(src);
        Ok(T::from_be_bytes(bytes))
    }

    /// Reads a single byte as a [`bool`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidBool`] if the byte is neither 0 nor 1.
    pub fn read_bool(&mut self) -> Result<bool> {
        match self.read::<u8>()? {
            0 => Ok(false),
            1 => Ok(true),
            _ => Err(Error::InvalidBool),
        }
    }

    /// Reads exactly `len` bytes without any framing.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BufferUnderrun`] if too few bytes remain.
    pub fn read_raw(&mut self, len: usize) -> Result<&'a [u8]> {
        let (out, rest) = self
            .rest
            .split_at_checked(len)
            .ok_or_else(|| Error::underrun(len, self.rest.len()))?;

        self.rest = rest;
        self.pos += len;
        Ok(out)
    }

    /// Reads a `u32` length prefix.
    pub(crate) fn read_len(&mut self) -> Result<usize> {
        let len: u32 = self.read()?;
        Ok(len as usize)
    }

    /// Reads a length-prefixed block.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BufferUnderrun`] if the prefix or the block is cut
    /// short.
    pub fn read_bytes(&mut self) -> Result<&'a [u8]> {
        let mut ahead = self.clone();
        let len = ahead.read_len()?;
        let out = ahead.read_raw(len)?;
        *self = ahead;
        Ok(out)
    }

    /// Reads a length-prefixed block into a new [`Vec`].
    ///
    /// # Errors
    ///
    /// Same as [`Self::read_bytes`].
    pub fn read_byte_vec(&mut self) -> Result<Vec<u8>> {
        self.read_bytes().map(<[u8]>::to_vec)
    }

    /// Reads a length-prefixed UTF-8 string.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidUtf8`] if the block isn't valid UTF-8, or the
    /// errors of [`Self::read_bytes`].
    pub fn read_str(&mut self) -> Result<&'a str> {
        let bytes = self.read_bytes()?;
        std::str::from_utf8(bytes).map_err(|_| Error::InvalidUtf8)
    }

    /// Reads a length-prefixed UTF-8 string into a new [`String`].
    ///
    /// # Errors
    ///
    /// Same as [`Self::read_str`].
    pub fn read_string(&mut self) -> Result<String> {
        self.read_str().map(str::to_owned)
    }

    /// Reads a length-prefixed block and decodes its content with `content`.
    ///
    /// `content` only sees the block, and must consume all of it. The reader
    /// only advances past the block if `content` succeeds.
    pub(crate) fn read_block<T, F>(&mut self, content: F) -> Result<T>
    where
        F: FnOnce(&mut Self) -> Result<T>,
    {
        let mut outer = self.clone();
        let block = outer.read_bytes()?;

        let mut inner = Self {
            rest: block,
            pos: self.pos + 4,
        };

        let value = content(&mut inner)?;
        inner.finish()?;
        *self = outer;
        Ok(value)
    }

    /// Reads a type tag and the payload block that follows it, decoding the
    /// payload with the registered type.
    ///
    /// The reader doesn't advance if this fails.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownTypeTag`] if the tag isn't registered, or any
    /// error the payload decoding raises.
    pub fn read_tagged_dyn(&mut self, registry: &TypeRegistry) -> Result<Box<dyn DynPayload>> {
        let mut ahead = self.clone();
        let tag = ahead.read_str()?;
        let entry = registry
            .get(tag)
            .ok_or_else(|| Error::UnknownTypeTag(tag.to_owned()))?;

        let value = ahead.read_block(|r| entry.decode(r))?;
        *self = ahead;
        Ok(value)
    }

    /// Reads a tagged value that must be a `T`.
    ///
    /// The registered type is checked before the payload is decoded.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TypeMismatch`] if the tag is registered for another
    /// type, or the errors of [`Self::read_tagged_dyn`].
    pub fn read_tagged<T: Payload>(&mut self, registry: &TypeRegistry) -> Result<T> {
        let mut ahead = self.clone();
        let tag = ahead.read_str()?;
        let entry = registry
            .get(tag)
            .ok_or_else(|| Error::UnknownTypeTag(tag.to_owned()))?;

        if entry.type_id() != TypeId::of::<T>() {
            return Err(Error::TypeMismatch {
                expected: std::any::type_name::<T>(),
                received: entry.type_name().to_owned(),
            });
        }

        let value = ahead.read_block(T::read_payload)?;
        *self = ahead;
        Ok(value)
    }

    /// Gets the number of bytes read so far.
    #[must_use]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Gets the number of bytes left to read.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.rest.len()
    }

    /// Whether all bytes have been read.
    #[must_use]
    pub fn is_at_end(&self) -> bool {
        self.rest.is_empty()
    }

    /// Gets the unread part of the buffer.
    #[must_use]
    pub fn remainder(&self) -> &'a [u8] {
        self.rest
    }

    /// Ensures the whole buffer has been read.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TrailingBytes`] if any bytes are left.
    pub fn finish(self) -> Result<()> {
        match self.rest.len() {
            0 => Ok(()),
            n => Err(Error::TrailingBytes(n)),
        }
    }
}
