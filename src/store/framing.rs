//! Decoder for the framed byte blobs in the Firefox extension store.
//!
//! Each `object_data` row wraps its value in an undocumented
//! self-delimited framing: `0xFF`-separated segments where the most
//! recent value occupies the last segment, NUL-padded. There is no
//! published schema and no version marker, so the whole convention sits
//! behind one entry point, [`decode_framed_field`], that can be swapped
//! wholesale the next time the layout drifts.

use crate::base::ExtractError;

/// Sentinel separating historical value segments inside a blob.
const SEGMENT_SENTINEL: u8 = 0xFF;
/// Padding byte terminating the live payload inside a segment.
const PAYLOAD_TERMINATOR: u8 = 0x00;

/// How the payload bytes of a field are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// UTF-8 text payload.
    Text,
    /// Little-endian unsigned integer payload.
    Count,
}

/// A decoded field value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Count(u32),
}

impl FieldValue {
    /// The text payload, or `StructureChanged` for a count field.
    pub fn into_text(self) -> Result<String, ExtractError> {
        match self {
            FieldValue::Text(text) => Ok(text),
            FieldValue::Count(_) => Err(ExtractError::StructureChanged),
        }
    }

    /// The integer payload, or `StructureChanged` for a text field.
    pub fn into_count(self) -> Result<u32, ExtractError> {
        match self {
            FieldValue::Count(count) => Ok(count),
            FieldValue::Text(_) => Err(ExtractError::StructureChanged),
        }
    }
}

/// Decode one framed blob into its most recent payload.
///
/// Framing: strip sentinel bytes off both ends, split the remainder on
/// the sentinel and keep the last segment, then split that segment on
/// NUL and keep the first piece. Any structural surprise — an empty or
/// all-sentinel blob, an empty piece, non-UTF-8 text, an oversized
/// integer piece — is reported as [`ExtractError::StructureChanged`] so
/// the caller can fall back instead of crashing.
pub fn decode_framed_field(blob: &[u8], kind: FieldKind) -> Result<FieldValue, ExtractError> {
    let piece = payload_piece(blob).ok_or(ExtractError::StructureChanged)?;
    match kind {
        FieldKind::Text => {
            let text = std::str::from_utf8(piece).map_err(|_| ExtractError::StructureChanged)?;
            Ok(FieldValue::Text(text.to_owned()))
        }
        FieldKind::Count => decode_count(piece).map(FieldValue::Count),
    }
}

/// Last sentinel-delimited segment, first NUL-terminated piece within it.
fn payload_piece(blob: &[u8]) -> Option<&[u8]> {
    let start = blob.iter().position(|&b| b != SEGMENT_SENTINEL)?;
    let end = blob.iter().rposition(|&b| b != SEGMENT_SENTINEL)?;
    let trimmed = &blob[start..=end];
    let last_segment = trimmed.split(|&b| b == SEGMENT_SENTINEL).next_back()?;
    let piece = last_segment.split(|&b| b == PAYLOAD_TERMINATOR).next()?;
    if piece.is_empty() {
        None
    } else {
        Some(piece)
    }
}

fn decode_count(piece: &[u8]) -> Result<u32, ExtractError> {
    if piece.len() > 4 {
        return Err(ExtractError::StructureChanged);
    }
    let mut value = 0u32;
    for (i, &byte) in piece.iter().enumerate() {
        value |= u32::from(byte) << (8 * i);
    }
    Ok(value)
}
