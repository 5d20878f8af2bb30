//! Big-endian binary framing for self-describing, differently typed values.
//!
//! The wire format is built from a handful of pieces:
//!
//! - fixed-width values: integers, [`f32`], [`f64`] and [`Half`], always
//!   big-endian
//! - block: a `u32` length followed by that many bytes
//! - string: UTF-8 inside a block
//! - tagged value: the type tag as a string, then the payload as a block
//! - collection: a table of distinct type tags followed by items that refer
//!   to the table by index, see [`encode_collection`]
//!
//! Types opt in by implementing [`Payload`], either by hand or with
//! [`serde_payload!`] through the included serde bridge, and are made
//! decodable by registering them in a [`TypeRegistry`].
//!
//! The serde bridge maps Rust types as follows:
//!
//! - [`bool`], [`u8`] and [`i8`]: one byte
//! - other integers, floats: fixed-width big-endian
//! - [`char`]: its code as `u32`
//! - [`str`] and byte slices: block
//! - [`Option`]: byte 0 or 1, then the value if present
//! - sequences and maps: `u32` element count, then the elements
//! - tuples, arrays and structs: the fields in order without prefix
//! - enums: `u32` variant index, then the variant's data
//!
//! Like the rest of the format, this isn't self-describing, so
//! deserializing any is unsupported.

pub mod collection;
pub mod de;
mod error;
mod fixed;
mod payload;
mod reader;
mod registry;
pub mod ser;
mod writer;

#[cfg(test)]
mod tests;

// for benchmarks
#[cfg(test)]
use criterion as _;

pub use binary16::Half;
pub use collection::{decode_collection, decode_collection_from, encode_collection, write_collection};
pub use de::from_slice;
pub use error::{Error, Result};
pub use fixed::{FixedWidth, four_cc};
pub use payload::{DynPayload, Payload, payload_bytes, payload_from_bytes};
pub use reader::BinaryReader;
pub use registry::{RegistryEntry, TypeRegistry, TypeRegistryBuilder};
pub use ser::{to_vec, to_writer};
pub use writer::BinaryWriter;
