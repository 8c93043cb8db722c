//! Unicode-signature (BOM) detection.

use encoding_rs::{Encoding, UTF_16BE, UTF_16LE, UTF_8};

pub const BOM_UTF8: &[u8] = b"\xEF\xBB\xBF";
pub const BOM_UTF16_BE: &[u8] = b"\xFE\xFF";
pub const BOM_UTF16_LE: &[u8] = b"\xFF\xFE";

/// A positive sniff: the signalled encoding and the mark length in bytes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BomMatch {
    pub encoding: &'static Encoding,
    pub bom_len: usize,
}

/// Checks the start of `data` for a Unicode signature.
///
/// Marks are tested longest first, in a fixed order, so the sniff is
/// deterministic and a longer mark can never lose to a shorter one.
pub fn sniff(data: &[u8]) -> Option<BomMatch> {
    for (bom, encoding) in [
        (BOM_UTF8, UTF_8),
        (BOM_UTF16_BE, UTF_16BE),
        (BOM_UTF16_LE, UTF_16LE),
    ] {
        if data.starts_with(bom) {
            return Some(BomMatch {
                encoding,
                bom_len: bom.len(),
            });
        }
    }
    None
}
