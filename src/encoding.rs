//! Character-encoding support: registry lookup, strict codec operations,
//! Unicode-signature detection, and input-encoding guessing.

pub mod bom;
pub mod guess;
pub mod locale;
pub mod utf16;

/// Unicode-signature (BOM) sniffing.
pub use bom::{sniff, BomMatch};
/// Candidate-walk encoding detection.
pub use guess::{candidate_labels, guess_bytes, guess_file_encoding, GuessError, Guessed};

use std::borrow::Cow;
use std::fmt;

use encoding_rs::{Encoding, REPLACEMENT, UTF_16BE, UTF_16LE};

// ---------------------------------------------------------------------------
// Source-encoding selection
// ---------------------------------------------------------------------------

/// How the input encoding of a conversion is determined: a label given
/// explicitly, or detection with `fallback` covering detection failure.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SourceEncoding {
    Explicit(String),
    Guess { fallback: String },
}

// ---------------------------------------------------------------------------
// Codec
// ---------------------------------------------------------------------------

/// A resolved character encoding with strict decode and encode operations.
///
/// The registry behind this never fails on its own; it substitutes
/// replacement characters and raises a flag instead. Strictness here means
/// treating any substitution as failure of the whole operation, which is
/// the contract the conversion pipeline needs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Codec(&'static Encoding);

impl Codec {
    /// Looks `label` up in the WHATWG label registry ("utf-8", "latin1",
    /// "shift_jis", ...). `None` for labels the registry does not know.
    pub fn for_label(label: &str) -> Option<Codec> {
        Encoding::for_label(label.trim().as_bytes()).map(Codec)
    }

    /// Canonical name, e.g. "UTF-8" or "windows-1252".
    pub fn name(self) -> &'static str {
        self.0.name()
    }

    pub fn encoding(self) -> &'static Encoding {
        self.0
    }

    /// Decodes `bytes` completely, failing on the first malformed
    /// sequence. Signature bytes are not stripped; a leading BOM decodes
    /// to U+FEFF and travels with the text.
    pub fn decode_strict(self, bytes: &[u8]) -> Option<Cow<'_, str>> {
        let (text, had_errors) = self.0.decode_without_bom_handling(bytes);
        if had_errors {
            None
        } else {
            Some(text)
        }
    }

    /// Encodes `text` completely, failing on the first character the
    /// encoding cannot represent. UTF-16 is serialized here directly (the
    /// registry defines no UTF-16 encoder), always without a byte-order
    /// mark.
    pub fn encode_strict(self, text: &str) -> Option<Vec<u8>> {
        if self.0 == UTF_16LE {
            return Some(utf16::encode_utf16le(text));
        }
        if self.0 == UTF_16BE {
            return Some(utf16::encode_utf16be(text));
        }
        if self.0 == REPLACEMENT {
            return None;
        }
        let (bytes, _, had_errors) = self.0.encode(text);
        if had_errors {
            None
        } else {
            Some(bytes.into_owned())
        }
    }
}

impl From<&'static Encoding> for Codec {
    fn from(encoding: &'static Encoding) -> Codec {
        Codec(encoding)
    }
}

impl fmt::Display for Codec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
