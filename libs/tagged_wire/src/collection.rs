//! Framing for ordered collections of differently typed values.
//!
//! ```text
//! u32 HEADER_MARKER
//! u32 tag count, then that many tag strings in order of first appearance
//! u32 BODY_MARKER
//! i32 item count, then per item: u32 tag index, payload block
//! u32 FOOTER_MARKER
//! ```

use indexmap::IndexSet;

use crate::error::{Error, Result};
use crate::fixed::four_cc;
use crate::payload::DynPayload;
use crate::reader::BinaryReader;
use crate::registry::{RegistryEntry, TypeRegistry};
use crate::writer::{BinaryWriter, block_len};

/// Marks the start of the tag table.
pub const HEADER_MARKER: u32 = four_cc(b"ZDR1");
/// Marks the start of the items.
pub const BODY_MARKER: u32 = four_cc(b"ZDR2");
/// Marks the end of the collection.
pub const FOOTER_MARKER: u32 = four_cc(b"ZDR3");

// every item takes at least its tag index and block length
const MIN_ITEM_SIZE: usize = 8;

/// Encodes a sequence of values into a new buffer.
///
/// # Errors
///
/// Returns any error of the values' [`Payload::write_payload`], or
/// [`Error::OversizedPayload`] if a count or block length exceeds its prefix.
///
/// [`Payload::write_payload`]: crate::Payload::write_payload
pub fn encode_collection(items: &[Box<dyn DynPayload>]) -> Result<Vec<u8>> {
    let mut w = BinaryWriter::new();
    write_collection(&mut w, items)?;
    Ok(w.into_inner())
}

/// Writes a sequence of values to `w`.
///
/// Nothing is written if this fails.
///
/// # Errors
///
/// Same as [`encode_collection`].
pub fn write_collection(w: &mut BinaryWriter, items: &[Box<dyn DynPayload>]) -> Result<()> {
    let mut tags = IndexSet::new();
    let indices: Vec<usize> = items
        .iter()
        .map(|item| tags.insert_full(item.type_tag()).0)
        .collect();

    w.all_or_nothing(|w| {
        w.write(HEADER_MARKER);
        w.write(block_len(tags.len())?);
        for tag in &tags {
            w.write_str(tag)?;
        }

        w.write(BODY_MARKER);
        w.write(i32::try_from(items.len()).map_err(|_| Error::OversizedPayload(items.len()))?);
        for (item, &index) in items.iter().zip(&indices) {
            w.write(block_len(index)?);
            w.write_block(|w| item.write_payload_dyn(w))?;
        }

        w.write(FOOTER_MARKER);
        Ok(())
    })?;

    log::debug!(
        "Encoded collection of {} items across {} types.",
        items.len(),
        tags.len()
    );
    Ok(())
}

/// Decodes a whole buffer as a collection.
///
/// # Errors
///
/// Returns the errors of [`decode_collection_from`], or
/// [`Error::TrailingBytes`] if any bytes follow the footer.
pub fn decode_collection(bytes: &[u8], registry: &TypeRegistry) -> Result<Vec<Box<dyn DynPayload>>> {
    let mut r = BinaryReader::new(bytes);
    let items = decode_collection_from(&mut r, registry)?;
    r.finish()?;
    Ok(items)
}

/// Decodes a collection from `r`, leaving any bytes after it unread.
///
/// Every tag is looked up before any item is decoded.
///
/// # Errors
///
/// - [`Error::MalformedMarker`] if a marker is wrong.
/// - [`Error::UnknownTypeTag`] if a tag isn't registered.
/// - [`Error::InvalidLength`] if the item count is negative.
/// - [`Error::TypeIndexOutOfRange`] if an item refers to a missing tag.
/// - [`Error::BufferUnderrun`] if the data is cut short.
/// - Any error of the payloads' decoding.
pub fn decode_collection_from(
    r: &mut BinaryReader<'_>,
    registry: &TypeRegistry,
) -> Result<Vec<Box<dyn DynPayload>>> {
    expect_marker(r, HEADER_MARKER)?;

    let count: u32 = r.read()?;
    let mut entries: Vec<&RegistryEntry> =
        Vec::with_capacity((count as usize).min(r.remaining() / 4));
    for _ in 0..count {
        let tag = r.read_str()?;
        let entry = registry
            .get(tag)
            .ok_or_else(|| Error::UnknownTypeTag(tag.to_owned()))?;
        entries.push(entry);
    }

    expect_marker(r, BODY_MARKER)?;

    let len: i32 = r.read()?;
    let len = usize::try_from(len).map_err(|_| Error::InvalidLength(len))?;

    // don't trust the count for the allocation
    let mut items = Vec::with_capacity(len.min(r.remaining() / MIN_ITEM_SIZE));
    for _ in 0..len {
        let index: u32 = r.read()?;
        let entry = entries
            .get(index as usize)
            .ok_or(Error::TypeIndexOutOfRange { index, count })?;

        items.push(r.read_block(|r| entry.decode(r))?);
    }

    expect_marker(r, FOOTER_MARKER)?;

    log::debug!(
        "Decoded collection of {} items across {} types.",
        items.len(),
        entries.len()
    );
    Ok(items)
}

fn expect_marker(r: &mut BinaryReader<'_>, expected: u32) -> Result<()> {
    let found: u32 = r.read()?;
    if found == expected {
        Ok(())
    } else {
        Err(Error::MalformedMarker { expected, found })
    }
}
