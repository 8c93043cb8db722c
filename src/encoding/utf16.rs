//! UTF-16 serialization.
//!
//! The registry behind [`super::Codec`] decodes UTF-16 but defines no
//! UTF-16 encoder (its encode side always produces UTF-8), so byte output
//! in UTF-16 is built here. No byte-order mark is written; the caller
//! picked an explicit endianness.

/// Serializes `text` as UTF-16LE.
pub fn encode_utf16le(text: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len() * 2);
    for unit in text.encode_utf16() {
        out.extend_from_slice(&unit.to_le_bytes());
    }
    out
}

/// Serializes `text` as UTF-16BE.
pub fn encode_utf16be(text: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len() * 2);
    for unit in text.encode_utf16() {
        out.extend_from_slice(&unit.to_be_bytes());
    }
    out
}
