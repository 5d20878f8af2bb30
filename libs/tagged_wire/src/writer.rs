use std::io;

use crate::error::{Error, Result};
use crate::fixed::FixedWidth;
use crate::payload::{DynPayload, Payload};

/// Appends big-endian binary data to an owned buffer.
///
/// Fixed-width writes cannot fail. Block writes fail only if the block
/// length does not fit the `u32` length prefix.
#[derive(Debug, Default, Clone)]
pub struct BinaryWriter {
    buf: Vec<u8>,
}

impl BinaryWriter {
    /// Creates a writer with an empty buffer.
    #[must_use]
    pub const fn new() -> Self {
        Self { buf: Vec::new() }
    }

    /// Creates a writer with room for `capacity` bytes.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    /// Writes a fixed-width value in big-endian order.
    pub fn write<T: FixedWidth>(&mut self, value: T) {
        self.buf.extend_from_slice(value.to_be_bytes().as_ref());
    }

    /// Writes a single byte, `1` for `true` and `0` for `false`.
    pub fn write_bool(&mut self, value: bool) {
        self.buf.push(value.into());
    }

    /// Appends bytes without any framing.
    pub fn write_raw(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Writes a length-prefixed block.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OversizedPayload`] if the length exceeds [`u32::MAX`].
    pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        self.write(block_len(bytes.len())?);
        self.write_raw(bytes);
        Ok(())
    }

    /// Writes a string as a length-prefixed block of UTF-8.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OversizedPayload`] if the string is too long.
    pub fn write_str(&mut self, value: &str) -> Result<()> {
        self.write_bytes(value.as_bytes())
    }

    /// Writes a value's type tag followed by its payload block.
    ///
    /// Nothing is written if this fails.
    ///
    /// # Errors
    ///
    /// Returns any error of [`Payload::write_payload`], or
    /// [`Error::OversizedPayload`] if the payload is too long.
    pub fn write_tagged<T: Payload>(&mut self, value: &T) -> Result<()> {
        self.all_or_nothing(|w| {
            w.write_str(T::TYPE_TAG)?;
            w.write_block(|w| value.write_payload(w))
        })
    }

    /// Like [`Self::write_tagged`], for a type-erased value.
    ///
    /// # Errors
    ///
    /// Same as [`Self::write_tagged`].
    pub fn write_dyn(&mut self, value: &dyn DynPayload) -> Result<()> {
        self.all_or_nothing(|w| {
            w.write_str(value.type_tag())?;
            w.write_block(|w| value.write_payload_dyn(w))
        })
    }

    /// Writes a length-prefixed block whose content is produced by `content`.
    ///
    /// The length is patched in afterwards, so no intermediate buffer is
    /// needed. Nothing is written if `content` fails.
    pub(crate) fn write_block<F>(&mut self, content: F) -> Result<()>
    where
        F: FnOnce(&mut Self) -> Result<()>,
    {
        self.all_or_nothing(|w| {
            let start = w.buf.len();
            w.write(0u32);
            content(w)?;

            let len = block_len(w.buf.len() - start - 4)?;
            w.buf[start..start + 4].copy_from_slice(&len.to_be_bytes());
            Ok(())
        })
    }

    /// Runs `f`, discarding everything it wrote if it fails.
    pub(crate) fn all_or_nothing<F>(&mut self, f: F) -> Result<()>
    where
        F: FnOnce(&mut Self) -> Result<()>,
    {
        let start = self.buf.len();
        let res = f(self);
        if res.is_err() {
            self.buf.truncate(start);
        }
        res
    }

    /// Gets the offset the next write will append at.
    #[must_use]
    pub fn position(&self) -> usize {
        self.buf.len()
    }

    /// Gets the bytes written so far.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Unwraps the writer into its buffer.
    #[must_use]
    pub fn into_inner(self) -> Vec<u8> {
        self.buf
    }
}

// allows the serde bridge to write straight into the buffer
impl io::Write for BinaryWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        self.buf.extend_from_slice(buf);
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

pub(crate) fn block_len(len: usize) -> Result<u32> {
    u32::try_from(len).map_err(|_| Error::OversizedPayload(len))
}
