//! Input-encoding detection: signature check first, then an ordered
//! candidate walk where the first strict decode that succeeds wins.

use std::borrow::Cow;
use std::fs;

use thiserror::Error;

use super::{bom, Codec};

/// Labels always tried after `utf-8` and the locale-derived candidates.
///
/// `latin-1` decodes any byte sequence, so the entries behind it can only
/// ever matter for the attempted-list diagnostics. They stay anyway; the
/// list is part of the user-visible error contract.
pub const FALLBACK_CANDIDATES: [&str; 11] = [
    "latin-1",
    "big5",
    "euc-jp",
    "euc-kr",
    "gb2312",
    "gbk",
    "gb18030",
    "hz-gb-2312",
    "iso-2022-jp",
    "koi8-u",
    "shift_jis",
];

/// A successful guess: the winning codec and the text it produced.
#[derive(Debug)]
pub struct Guessed<'a> {
    pub codec: Codec,
    pub text: Cow<'a, str>,
}

/// Every candidate failed to decode the data (labels unknown to the
/// registry are skipped, but still listed here).
#[derive(Debug, Error)]
#[error("unable to decode input data; tried the following encodings: {}", quoted_list(.attempted))]
pub struct GuessError {
    pub attempted: Vec<String>,
}

fn quoted_list(labels: &[String]) -> String {
    labels
        .iter()
        .map(|l| format!("'{}'", l))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Builds the candidate list for one run: `utf-8`, then the locale-derived
/// labels, then the fixed tail.
pub fn candidate_labels(locale_candidates: &[String]) -> Vec<String> {
    let mut labels = Vec::with_capacity(1 + locale_candidates.len() + FALLBACK_CANDIDATES.len());
    labels.push("utf-8".to_owned());
    for candidate in locale_candidates {
        if !labels.contains(candidate) {
            labels.push(candidate.clone());
        }
    }
    labels.extend(FALLBACK_CANDIDATES.iter().map(|s| (*s).to_owned()));
    labels
}

/// Tries `candidates` in order against `data`.
///
/// A leading Unicode signature short-circuits the walk: the signalled
/// encoding wins without any decode attempt, and the text is decoded with
/// the mark stripped.
pub fn guess_bytes<'a>(data: &'a [u8], candidates: &[String]) -> Result<Guessed<'a>, GuessError> {
    if let Some(m) = bom::sniff(data) {
        let codec = Codec::from(m.encoding);
        // The mark identifies the encoding even if the body is damaged;
        // fall back to a lossy decode rather than second-guessing it.
        let body = &data[m.bom_len..];
        let text = match codec.decode_strict(body) {
            Some(text) => text,
            None => m.encoding.decode_without_bom_handling(body).0,
        };
        return Ok(Guessed { codec, text });
    }
    for label in candidates {
        let codec = match Codec::for_label(label) {
            Some(codec) => codec,
            None => continue,
        };
        if let Some(text) = codec.decode_strict(data) {
            return Ok(Guessed { codec, text });
        }
    }
    Err(GuessError {
        attempted: candidates.to_vec(),
    })
}

/// Determines the encoding of the file at `path`, returning its label.
///
/// Detection failure is never fatal here: an unreadable file or an
/// exhausted candidate list warns and hands back `fallback` unchanged.
pub fn guess_file_encoding(path: &str, fallback: &str, candidates: &[String]) -> String {
    let data = match fs::read(path) {
        Ok(data) => data,
        Err(err) => {
            crate::displaylevel!(
                2,
                "Error while trying to guess the encoding of file {}: {}\n",
                path,
                err
            );
            return fallback.to_owned();
        }
    };
    match guess_bytes(&data, candidates) {
        Ok(guessed) => {
            crate::displaylevel!(
                2,
                "Guessed encoding for file '{}': {}\n",
                path,
                guessed.codec.name()
            );
            guessed.codec.name().to_owned()
        }
        Err(err) => {
            crate::displaylevel!(2, "Can't work out the encoding of file '{}': {}\n", path, err);
            crate::displaylevel!(2, "Assuming the default encoding: {}\n", fallback);
            fallback.to_owned()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn labels(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| (*s).to_owned()).collect()
    }

    #[test]
    fn bom_short_circuits_candidate_walk() {
        // An empty candidate list proves no decode attempt is needed.
        let guessed = guess_bytes(b"\xEF\xBB\xBFhi", &[]).unwrap();
        assert_eq!(guessed.codec.name(), "UTF-8");
        assert_eq!(guessed.text.as_ref(), "hi");
    }

    #[test]
    fn utf16_boms_win_over_utf8_candidate() {
        let candidates = labels(&["utf-8"]);
        let be = guess_bytes(b"\xFE\xFF\x00a", &candidates).unwrap();
        assert_eq!(be.codec.name(), "UTF-16BE");
        assert_eq!(be.text.as_ref(), "a");

        let le = guess_bytes(b"\xFF\xFEa\x00", &candidates).unwrap();
        assert_eq!(le.codec.name(), "UTF-16LE");
        assert_eq!(le.text.as_ref(), "a");
    }

    #[test]
    fn ascii_settles_on_first_candidate() {
        let candidates = candidate_labels(&[]);
        let guessed = guess_bytes(b"plain ascii\n", &candidates).unwrap();
        assert_eq!(guessed.codec.name(), "UTF-8");
    }

    #[test]
    fn invalid_utf8_falls_through_to_latin1() {
        let candidates = candidate_labels(&[]);
        // 0xE9 alone is malformed UTF-8 but valid latin-1.
        let guessed = guess_bytes(b"caf\xe9\n", &candidates).unwrap();
        assert_eq!(guessed.codec.name(), "windows-1252");
        assert_eq!(guessed.text.as_ref(), "café\n");
    }

    #[test]
    fn unknown_labels_are_skipped_but_reported() {
        let candidates = labels(&["no-such-encoding", "utf-8"]);
        let guessed = guess_bytes(b"ok", &candidates).unwrap();
        assert_eq!(guessed.codec.name(), "UTF-8");

        let err = guess_bytes(b"\xff", &labels(&["no-such-encoding", "utf-8"])).unwrap_err();
        assert_eq!(err.attempted, vec!["no-such-encoding", "utf-8"]);
        let msg = err.to_string();
        assert!(msg.contains("'no-such-encoding'"), "message was: {}", msg);
        assert!(msg.contains("'utf-8'"), "message was: {}", msg);
    }

    #[test]
    fn exhausted_candidates_error() {
        // 0xFF is malformed in both candidates (and is not a signature).
        let err = guess_bytes(b"\xff\xff\xff", &labels(&["utf-8", "shift_jis"])).unwrap_err();
        assert_eq!(err.attempted.len(), 2);
    }

    #[test]
    fn locale_candidates_run_after_utf8() {
        let list = candidate_labels(&["KOI8-U".to_owned()]);
        assert_eq!(list[0], "utf-8");
        assert_eq!(list[1], "KOI8-U");
        assert_eq!(list[2], "latin-1");
    }

    #[test]
    fn candidate_list_dedups_locale_utf8() {
        let list = candidate_labels(&["utf-8".to_owned()]);
        assert_eq!(list.iter().filter(|l| l.as_str() == "utf-8").count(), 1);
    }

    #[test]
    fn file_guess_uses_fallback_when_unreadable() {
        let fallback = guess_file_encoding("/no/such/file/anywhere", "latin-1", &[]);
        assert_eq!(fallback, "latin-1");
    }

    #[test]
    fn file_guess_reads_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sample.txt");
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(b"\xEF\xBB\xBFsigned").unwrap();
        drop(f);
        let name = guess_file_encoding(path.to_str().unwrap(), "latin-1", &[]);
        assert_eq!(name, "UTF-8");
    }
}
