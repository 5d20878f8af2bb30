//! Exposes a serde serializer for the crate's wire format.

use std::io;

use serde_core::ser;

use crate::error::{Error, Result};
use crate::writer::block_len;

/// Serializes a value to a [`Vec<u8>`].
///
/// # Errors
///
/// Returns an error if the value's [`Serialize`](ser::Serialize)
/// implementation fails, a sequence has no length hint or a length exceeds
/// its `u32` prefix.
pub fn to_vec<T>(value: &T) -> Result<Vec<u8>>
where
    T: ?Sized + ser::Serialize,
{
    let mut buf = Vec::new();
    to_writer(&mut buf, value)?;
    Ok(buf)
}

/// Serializes a value to a [`io::Write`].
///
/// # Errors
///
/// Same as [`to_vec`], plus any error of the writer.
pub fn to_writer<T, W>(writer: W, value: &T) -> Result<()>
where
    T: ?Sized + ser::Serialize,
    W: io::Write,
{
    value.serialize(Serializer::from_writer(writer))
}

/// A [`Serializer`] for this crate's binary format.
///
/// [`Serializer`]: serde_core::ser::Serializer
#[derive(Debug)]
pub struct Serializer<W> {
    writer: W,
}

impl<W> Serializer<W> {
    /// Reborrows the serializer so it can be used for multiple
    /// [`serialize`](ser::Serialize::serialize) calls.
    pub fn reborrow(&mut self) -> Serializer<&mut W> {
        Serializer {
            writer: &mut self.writer,
        }
    }
}

impl<W: io::Write> Serializer<W> {
    /// Creates a new serializer that writes to a [`io::Write`].
    pub fn from_writer(writer: W) -> Self {
        Self { writer }
    }

    /// Unwraps the serializer into its inner writer.
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn write_all(mut self, bytes: &[u8]) -> Result<()> {
        Ok(self.writer.write_all(bytes)?)
    }

    fn write_len(&mut self, len: usize) -> Result<()> {
        let len = block_len(len)?;
        Ok(self.writer.write_all(&len.to_be_bytes())?)
    }
}

impl<W: io::Write> ser::Serializer for Serializer<W> {
    type Ok = ();
    type Error = Error;

    type SerializeSeq = SerializeList<W>;
    type SerializeTuple = SerializeTuple<W>;
    type SerializeTupleStruct = SerializeTuple<W>;
    type SerializeTupleVariant = SerializeTuple<W>;
    type SerializeMap = SerializeList<W>;
    type SerializeStruct = SerializeTuple<W>;
    type SerializeStructVariant = SerializeTuple<W>;

    fn serialize_bool(self, v: bool) -> Result<Self::Ok, Self::Error> {
        self.write_all(&[v.into()])
    }

    fn serialize_i8(self, v: i8) -> Result<Self::Ok, Self::Error> {
        self.write_all(&v.to_be_bytes())
    }

    fn serialize_i16(self, v: i16) -> Result<Self::Ok, Self::Error> {
        self.write_all(&v.to_be_bytes())
    }

    fn serialize_i32(self, v: i32) -> Result<Self::Ok, Self::Error> {
        self.write_all(&v.to_be_bytes())
    }

    fn serialize_i64(self, v: i64) -> Result<Self::Ok, Self::Error> {
        self.write_all(&v.to_be_bytes())
    }

    fn serialize_i128(self, v: i128) -> Result<Self::Ok, Self::Error> {
        self.write_all(&v.to_be_bytes())
    }

    fn serialize_u8(self, v: u8) -> Result<Self::Ok, Self::Error> {
        self.write_all(&[v])
    }

    fn serialize_u16(self, v: u16) -> Result<Self::Ok, Self::Error> {
        self.write_all(&v.to_be_bytes())
    }

    fn serialize_u32(self, v: u32) -> Result<Self::Ok, Self::Error> {
        self.write_all(&v.to_be_bytes())
    }

    fn serialize_u64(self, v: u64) -> Result<Self::Ok, Self::Error> {
        self.write_all(&v.to_be_bytes())
    }

    fn serialize_u128(self, v: u128) -> Result<Self::Ok, Self::Error> {
        self.write_all(&v.to_be_bytes())
    }

    fn serialize_f32(self, v: f32) -> Result<Self::Ok, Self::Error> {
        self.write_all(&v.to_be_bytes())
    }

    fn serialize_f64(self, v: f64) -> Result<Self::Ok, Self::Error> {
        self.write_all(&v.to_be_bytes())
    }

    fn serialize_char(self, v: char) -> Result<Self::Ok, Self::Error> {
        self.serialize_u32(v.into())
    }

    fn serialize_str(self, v: &str) -> Result<Self::Ok, Self::Error> {
        self.serialize_bytes(v.as_bytes())
    }

    fn serialize_bytes(mut self, v: &[u8]) -> Result<Self::Ok, Self::Error> {
        self.write_len(v.len())?;
        self.write_all(v)
    }

    fn serialize_none(self) -> Result<Self::Ok, Self::Error> {
        self.write_all(&[0])
    }

    fn serialize_some<T>(mut self, value: &T) -> Result<Self::Ok, Self::Error>
    where
        T: ?Sized + ser::Serialize,
    {
        self.reborrow().write_all(&[1])?;
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Self::Ok, Self::Error> {
        Ok(())
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Self::Ok, Self::Error> {
        Ok(())
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        variant_index: u32,
        _variant: &'static str,
    ) -> Result<Self::Ok, Self::Error> {
        self.serialize_u32(variant_index)
    }

    fn serialize_newtype_struct<T>(
        self,
        _name: &'static str,
        value: &T,
    ) -> Result<Self::Ok, Self::Error>
    where
        T: ?Sized + ser::Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        mut self,
        _name: &'static str,
        variant_index: u32,
        _variant: &'static str,
        value: &T,
    ) -> Result<Self::Ok, Self::Error>
    where
        T: ?Sized + ser::Serialize,
    {
        ser::Serializer::serialize_u32(self.reborrow(), variant_index)?;
        value.serialize(self)
    }

    fn serialize_seq(mut self, len: Option<usize>) -> Result<Self::SerializeSeq, Self::Error> {
        let len = len.ok_or(Error::LengthRequired)?;
        self.write_len(len)?;
        Ok(SerializeList(self))
    }

    fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple, Self::Error> {
        Ok(SerializeTuple(self))
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleStruct, Self::Error> {
        Ok(SerializeTuple(self))
    }

    fn serialize_tuple_variant(
        mut self,
        _name: &'static str,
        variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant, Self::Error> {
        ser::Serializer::serialize_u32(self.reborrow(), variant_index)?;
        Ok(SerializeTuple(self))
    }

    fn serialize_map(mut self, len: Option<usize>) -> Result<Self::SerializeMap, Self::Error> {
        let len = len.ok_or(Error::LengthRequired)?;
        self.write_len(len)?;
        Ok(SerializeList(self))
    }

    fn serialize_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStruct, Self::Error> {
        Ok(SerializeTuple(self))
    }

    fn serialize_struct_variant(
        mut self,
        _name: &'static str,
        variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant, Self::Error> {
        ser::Serializer::serialize_u32(self.reborrow(), variant_index)?;
        Ok(SerializeTuple(self))
    }

    fn is_human_readable(&self) -> bool {
        false
    }
}

/// Serializes the elements of a length-prefixed sequence or map.
///
/// You shouldn't use this type directly. It is returned by [`Serializer`] as
/// needed.
pub struct SerializeList<W>(Serializer<W>);

/// Serializes the elements of a tuple, struct or enum variant.
///
/// You shouldn't use this type directly. It is returned by [`Serializer`] as
/// needed.
pub struct SerializeTuple<W>(Serializer<W>);

impl<W: io::Write> ser::SerializeSeq for SerializeList<W> {
    type Ok = ();
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<(), Self::Error>
    where
        T: ?Sized + ser::Serialize,
    {
        value.serialize(self.0.reborrow())
    }

    fn end(self) -> Result<Self::Ok, Self::Error> {
        Ok(())
    }
}

impl<W: io::Write> ser::SerializeMap for SerializeList<W> {
    type Ok = ();
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<(), Self::Error>
    where
        T: ?Sized + ser::Serialize,
    {
        key.serialize(self.0.reborrow())
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<(), Self::Error>
    where
        T: ?Sized + ser::Serialize,
    {
        value.serialize(self.0.reborrow())
    }

    fn end(self) -> Result<Self::Ok, Self::Error> {
        Ok(())
    }
}

impl<W: io::Write> ser::SerializeTuple for SerializeTuple<W> {
    type Ok = ();
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<(), Self::Error>
    where
        T: ?Sized + ser::Serialize,
    {
        value.serialize(self.0.reborrow())
    }

    fn end(self) -> Result<Self::Ok, Self::Error> {
        Ok(())
    }
}

impl<W: io::Write> ser::SerializeTupleStruct for SerializeTuple<W> {
    type Ok = ();
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<(), Self::Error>
    where
        T: ?Sized + ser::Serialize,
    {
        value.serialize(self.0.reborrow())
    }

    fn end(self) -> Result<Self::Ok, Self::Error> {
        Ok(())
    }
}

impl<W: io::Write> ser::SerializeTupleVariant for SerializeTuple<W> {
    type Ok = ();
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<(), Self::Error>
    where
        T: ?Sized + ser::Serialize,
    {
        value.serialize(self.0.reborrow())
    }

    fn end(self) -> Result<Self::Ok, Self::Error> {
        Ok(())
    }
}

impl<W: io::Write> ser::SerializeStruct for SerializeTuple<W> {
    type Ok = ();
    type Error = Error;

    fn serialize_field<T>(&mut self, _key: &'static str, value: &T) -> Result<(), Self::Error>
    where
        T: ?Sized + ser::Serialize,
    {
        value.serialize(self.0.reborrow())
    }

    fn end(self) -> Result<Self::Ok, Self::Error> {
        Ok(())
    }
}

impl<W: io::Write> ser::SerializeStructVariant for SerializeTuple<W> {
    type Ok = ();
    type Error = Error;

    fn serialize_field<T>(&mut self, _key: &'static str, value: &T) -> Result<(), Self::Error>
    where
        T: ?Sized + ser::Serialize,
    {
        value.serialize(self.0.reborrow())
    }

    fn end(self) -> Result<Self::Ok, Self::Error> {
        Ok(())
    }
}
