//! Line-ending conventions and the normalization core.
//!
//! Two normalization modes exist. Narrow mode works on decoded text and is
//! used when file content passes through a codec anyway. Raw mode works on
//! undecoded bytes and additionally understands the null-interleaved CR/LF
//! shapes that UTF-16 text exhibits when viewed as raw bytes; it is used
//! when encodings are left untouched.

use std::fmt;

// ---------------------------------------------------------------------------
// Target conventions
// ---------------------------------------------------------------------------

/// A line-ending convention, named after the platform family that uses it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Eol {
    /// `\n` (unix, linux)
    Lf,
    /// `\r\n` (dos, win)
    CrLf,
    /// `\r` (classic mac)
    Cr,
}

impl Eol {
    /// The literal terminator sequence.
    pub const fn as_str(self) -> &'static str {
        match self {
            Eol::Lf => "\n",
            Eol::CrLf => "\r\n",
            Eol::Cr => "\r",
        }
    }

    pub const fn as_bytes(self) -> &'static [u8] {
        self.as_str().as_bytes()
    }

    /// Parses a user-facing convention code: `unix`/`linux` mean LF,
    /// `dos`/`win` mean CRLF, `mac` means CR. Case-insensitive.
    pub fn from_code(code: &str) -> Option<Eol> {
        match code.to_ascii_lowercase().as_str() {
            "unix" | "linux" => Some(Eol::Lf),
            "dos" | "win" => Some(Eol::CrLf),
            "mac" => Some(Eol::Cr),
            _ => None,
        }
    }

    /// The convention native to the build platform.
    pub const fn platform_default() -> Eol {
        #[cfg(target_os = "windows")]
        {
            Eol::CrLf
        }
        #[cfg(not(target_os = "windows"))]
        {
            Eol::Lf
        }
    }
}

impl fmt::Display for Eol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = match self {
            Eol::Lf => "unix",
            Eol::CrLf => "dos",
            Eol::Cr => "mac",
        };
        f.write_str(code)
    }
}

// ---------------------------------------------------------------------------
// Narrow-mode normalization (decoded text)
// ---------------------------------------------------------------------------

/// Rewrites every line break in `text` (CRLF, lone CR, lone LF) as `eol`.
///
/// Breaks are first unified to LF, CRLF before lone CR so that a CRLF pair
/// never turns into two breaks. Text already using the target convention
/// comes back unchanged.
pub fn normalize_text(text: &str, eol: Eol) -> String {
    let unified = text.replace("\r\n", "\n").replace('\r', "\n");
    match eol {
        Eol::Lf => unified,
        _ => unified.replace('\n', eol.as_str()),
    }
}

// ---------------------------------------------------------------------------
// Raw-mode normalization (undecoded bytes)
// ---------------------------------------------------------------------------

const NULL_CR: &[u8] = b"\x00\r";
const NULL_LF: &[u8] = b"\x00\n";

/// Rewrites the line breaks of one raw line without decoding it.
///
/// A line that carries null-interleaved breaks (`\0\r` / `\0\n`, the shape
/// of CR/LF in UTF-16 data) gets the replacement terminator widened the
/// same way, so the byte pairing of the surrounding text survives for both
/// endiannesses. The widening decision is taken per line and never carries
/// over to the next one.
///
/// The replacement chain runs in a fixed order; compound breaks must
/// collapse before their single-byte components are touched.
pub fn normalize_bytes(line: &[u8], eol: Eol) -> Vec<u8> {
    let interleaved = contains(line, NULL_CR) || contains(line, NULL_LF);
    let terminator: Vec<u8> = if interleaved {
        widen(eol.as_bytes())
    } else {
        eol.as_bytes().to_vec()
    };
    let unified = replace(line, b"\r\n", b"\n");
    let unified = replace(&unified, b"\x00\r\x00\n", b"\n");
    let unified = replace(&unified, b"\r", b"\n");
    let unified = replace(&unified, NULL_CR, b"\n");
    let unified = replace(&unified, NULL_LF, b"\n");
    replace(&unified, b"\n", &terminator)
}

/// Inserts a null byte before every CR and LF of a terminator sequence.
fn widen(eol: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(eol.len() * 2);
    for &b in eol {
        if b == b'\r' || b == b'\n' {
            out.push(0);
        }
        out.push(b);
    }
    out
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|w| w == needle)
}

/// Left-to-right, non-overlapping byte-slice replacement.
fn replace(src: &[u8], from: &[u8], to: &[u8]) -> Vec<u8> {
    debug_assert!(!from.is_empty());
    let mut out = Vec::with_capacity(src.len());
    let mut i = 0;
    while i < src.len() {
        if src[i..].starts_with(from) {
            out.extend_from_slice(to);
            i += from.len();
        } else {
            out.push(src[i]);
            i += 1;
        }
    }
    out
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_parsing() {
        assert_eq!(Eol::from_code("unix"), Some(Eol::Lf));
        assert_eq!(Eol::from_code("linux"), Some(Eol::Lf));
        assert_eq!(Eol::from_code("dos"), Some(Eol::CrLf));
        assert_eq!(Eol::from_code("WIN"), Some(Eol::CrLf));
        assert_eq!(Eol::from_code("mac"), Some(Eol::Cr));
        assert_eq!(Eol::from_code("amiga"), None);
        assert_eq!(Eol::from_code(""), None);
    }

    #[test]
    fn mixed_breaks_unify_to_lf() {
        let text = "line1\r\nline2\rline3\nline4";
        assert_eq!(normalize_text(text, Eol::Lf), "line1\nline2\nline3\nline4");
    }

    #[test]
    fn mixed_breaks_to_crlf() {
        let text = "a\r\nb\rc\nd";
        assert_eq!(normalize_text(text, Eol::CrLf), "a\r\nb\r\nc\r\nd");
    }

    #[test]
    fn mixed_breaks_to_cr() {
        let text = "a\r\nb\nc";
        assert_eq!(normalize_text(text, Eol::Cr), "a\rb\rc");
    }

    #[test]
    fn normalize_text_is_idempotent() {
        for &eol in &[Eol::Lf, Eol::CrLf, Eol::Cr] {
            let once = normalize_text("x\r\ny\rz\n", eol);
            assert_eq!(normalize_text(&once, eol), once);
        }
    }

    #[test]
    fn crlf_never_doubles() {
        // A CRLF pair is one break, not a CR break followed by an LF break.
        assert_eq!(normalize_text("a\r\nb", Eol::CrLf), "a\r\nb");
    }

    #[test]
    fn text_without_breaks_passes_through() {
        assert_eq!(normalize_text("no breaks here", Eol::CrLf), "no breaks here");
        assert_eq!(normalize_bytes(b"no breaks here", Eol::CrLf), b"no breaks here");
    }

    #[test]
    fn raw_ascii_crlf_to_lf() {
        assert_eq!(normalize_bytes(b"hello\r\n", Eol::Lf), b"hello\n");
    }

    #[test]
    fn raw_interleaved_be_crlf_to_lf() {
        // "a\r\n" in UTF-16BE, split as one raw line ending at the LF byte.
        let line = b"\x00a\x00\r\x00\n";
        assert_eq!(normalize_bytes(line, Eol::Lf), b"\x00a\x00\n");
    }

    #[test]
    fn raw_interleaved_le_lf_roundtrip() {
        // "a\nb\n" in UTF-16LE splits after each LF byte; the high null byte
        // of each terminator starts the following chunk. Re-joining the
        // normalized chunks must reproduce the file for an LF target.
        let file: &[u8] = b"a\x00\n\x00b\x00\n\x00";
        let chunks: [&[u8]; 3] = [b"a\x00\n", b"\x00b\x00\n", b"\x00"];
        let mut out = Vec::new();
        for chunk in chunks {
            out.extend_from_slice(&normalize_bytes(chunk, Eol::Lf));
        }
        assert_eq!(out, file);
    }

    #[test]
    fn raw_interleaved_le_to_crlf() {
        // "a\nb" in UTF-16LE → "a\r\nb" in UTF-16LE.
        let chunks: [&[u8]; 2] = [b"a\x00\n", b"\x00b\x00"];
        let mut out = Vec::new();
        for chunk in chunks {
            out.extend_from_slice(&normalize_bytes(chunk, Eol::CrLf));
        }
        assert_eq!(out, b"a\x00\r\x00\n\x00b\x00");
    }

    #[test]
    fn widening_is_per_line() {
        // First chunk is UTF-16-shaped, second is plain ASCII. The second
        // must not inherit the widened terminator.
        let wide = normalize_bytes(b"\x00a\x00\n", Eol::CrLf);
        assert_eq!(wide, b"\x00a\x00\r\x00\n");
        let narrow = normalize_bytes(b"b\n", Eol::CrLf);
        assert_eq!(narrow, b"b\r\n");
    }

    #[test]
    fn raw_interleaved_mac_breaks() {
        // "a\r" in UTF-16BE becomes "a\n" in UTF-16BE for a unix target.
        assert_eq!(normalize_bytes(b"\x00a\x00\r", Eol::Lf), b"\x00a\x00\n");
    }

    #[test]
    fn replacement_order_keeps_compound_breaks_whole() {
        // CRLF and its interleaved form collapse to a single break each.
        assert_eq!(normalize_bytes(b"a\r\nb", Eol::Lf), b"a\nb");
        assert_eq!(normalize_bytes(b"\x00a\x00\r\x00\nz", Eol::Lf), b"\x00a\x00\nz");
    }

    #[test]
    fn byte_replace_non_overlapping() {
        assert_eq!(replace(b"aaa", b"aa", b"b"), b"ba");
        assert_eq!(replace(b"", b"x", b"y"), b"");
        assert_eq!(replace(b"xyx", b"x", b""), b"y");
    }
}
