//! E2E Test Suite: file conversion engine
//!
//! Exercises the `tconv::io` entry points end to end on real temp files:
//! codec conversion, EOL-only conversion, output templating, destination
//! conflicts, and transactional failure behavior.

use std::fs;

use filetime::{set_file_mtime, FileTime};
use tconv::cli::constants::set_display_level;
use tconv::io::convert::convert_filename_ext;
use tconv::io::{
    convert_eol_filename, convert_filename, convert_multiple_filenames, ConflictChoice,
    ConflictResolver, ConvertOutcome, ConvertResources, Prefs,
};
use tconv::Eol;
use tempfile::TempDir;

// Silence progress output in all tests.
fn silent_prefs() -> Prefs {
    set_display_level(0);
    Prefs::default()
}

/// Plays back a fixed list of conflict choices.
struct Scripted(Vec<ConflictChoice>);

impl ConflictResolver for Scripted {
    fn resolve(&mut self, _dest: &str) -> ConflictChoice {
        self.0.remove(0)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 1: Latin-1 → UTF-8 in place
// Validates: decode, re-encode, and the in-place rewrite transaction
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_latin1_to_utf8_in_place() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("cafe.txt");
    fs::write(&path, b"caf\xE9\n").unwrap();

    let mut prefs = silent_prefs();
    prefs.set_source_encoding("latin-1");
    prefs.set_target_encoding("utf-8");
    prefs.set_eol(Eol::Lf);

    let outcome = convert_filename(path.to_str().unwrap(), &prefs)
        .expect("latin-1 to utf-8 should succeed");

    assert_eq!(fs::read(&path).unwrap(), "café\n".as_bytes());
    match outcome {
        ConvertOutcome::Converted(stats) => {
            assert_eq!(stats.bytes_in, 5);
            assert_eq!(stats.bytes_out, 6);
        }
        other => panic!("expected Converted, got {other:?}"),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 2: UTF-8 → UTF-16LE through a '#' output template
// Validates: out_path_for expansion and that the source stays untouched
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_output_template_keeps_source() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("hi.txt");
    fs::write(&path, "hi\n").unwrap();

    let mut prefs = silent_prefs();
    prefs.set_source_encoding("utf-8");
    prefs.set_target_encoding("utf-16le");
    prefs.set_eol(Eol::Lf);
    prefs.set_out_template(Some("#.utf16"));

    convert_filename(path.to_str().unwrap(), &prefs).expect("conversion should succeed");

    assert_eq!(fs::read(&path).unwrap(), b"hi\n", "source must stay untouched");
    let dest = dir.path().join("hi.txt.utf16");
    assert_eq!(fs::read(&dest).unwrap(), b"h\x00i\x00\n\x00");
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 3: Mixed line breaks normalize to one convention
// Validates: CRLF, lone CR, and lone LF all become the requested EOL
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_codec_path_normalizes_mixed_breaks() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("mixed.txt");
    fs::write(&path, "a\nb\rc\r\nd\n").unwrap();

    let mut prefs = silent_prefs();
    prefs.set_source_encoding("utf-8");
    prefs.set_target_encoding("utf-8");
    prefs.set_eol(Eol::CrLf);

    convert_filename(path.to_str().unwrap(), &prefs).expect("conversion should succeed");

    assert_eq!(fs::read(&path).unwrap(), b"a\r\nb\r\nc\r\nd\r\n");
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 4: No trailing break is ever invented
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_no_trailing_break_added() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("tail.txt");
    fs::write(&path, "no terminator").unwrap();

    let mut prefs = silent_prefs();
    prefs.set_source_encoding("utf-8");
    prefs.set_target_encoding("utf-8");
    prefs.set_eol(Eol::CrLf);

    convert_filename(path.to_str().unwrap(), &prefs).expect("conversion should succeed");

    assert_eq!(fs::read(&path).unwrap(), b"no terminator");
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 5: Empty file converts to an empty file
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_empty_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("empty.txt");
    fs::write(&path, b"").unwrap();

    let mut prefs = silent_prefs();
    prefs.set_source_encoding("latin-1");
    prefs.set_target_encoding("utf-16be");

    let outcome =
        convert_filename(path.to_str().unwrap(), &prefs).expect("empty file should convert");

    assert_eq!(fs::read(&path).unwrap(), b"");
    assert_eq!(
        outcome,
        ConvertOutcome::Converted(tconv::io::ConvertStats {
            bytes_in: 0,
            bytes_out: 0
        })
    );
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 6: Guessing picks up a Unicode signature
// Validates: BOM detection wins over the candidate walk; the signature
// travels as text (U+FEFF) into the converted output
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_guess_detects_bom() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bom.txt");
    fs::write(&path, b"\xFF\xFEh\x00i\x00\n\x00").unwrap();

    let mut prefs = silent_prefs();
    prefs.set_source_guess("latin-1");
    prefs.set_target_encoding("utf-8");
    prefs.set_eol(Eol::Lf);

    convert_filename(path.to_str().unwrap(), &prefs).expect("guessed conversion should succeed");

    assert_eq!(fs::read(&path).unwrap(), "\u{feff}hi\n".as_bytes());
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 7: Guessing falls through the candidate list
// Validates: invalid UTF-8 input lands on latin-1 in the fixed candidates
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_guess_candidate_walk() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("legacy.txt");
    fs::write(&path, b"caf\xE9\n").unwrap();

    let mut prefs = silent_prefs();
    prefs.set_source_guess("latin-1");
    prefs.set_target_encoding("utf-8");
    prefs.set_eol(Eol::Lf);

    convert_filename(path.to_str().unwrap(), &prefs).expect("guessed conversion should succeed");

    assert_eq!(fs::read(&path).unwrap(), "café\n".as_bytes());
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 8: Strict decode failure rolls the transaction back
// Validates: the input survives byte-for-byte and no temp file remains
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_decode_failure_leaves_input_untouched() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.txt");
    fs::write(&path, b"caf\xE9\n").unwrap();

    let mut prefs = silent_prefs();
    prefs.set_source_encoding("utf-8");
    prefs.set_target_encoding("utf-16le");

    let err = convert_filename(path.to_str().unwrap(), &prefs)
        .expect_err("invalid utf-8 must fail a strict decode");

    assert!(err.to_string().contains("cannot decode"), "message was: {err}");
    assert_eq!(fs::read(&path).unwrap(), b"caf\xE9\n");
    assert_eq!(
        fs::read_dir(dir.path()).unwrap().count(),
        1,
        "the failed transaction must not leave a temp file behind"
    );
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 9: Unmappable characters fail the encode step
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_encode_failure_leaves_input_untouched() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("kanji.txt");
    fs::write(&path, "漢字\n").unwrap();

    let mut prefs = silent_prefs();
    prefs.set_source_encoding("utf-8");
    prefs.set_target_encoding("latin-1");

    let err = convert_filename(path.to_str().unwrap(), &prefs)
        .expect_err("kanji cannot be encoded as latin-1");

    assert!(err.to_string().contains("cannot encode"), "message was: {err}");
    assert_eq!(fs::read(&path).unwrap(), "漢字\n".as_bytes());
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 10: Unknown target encoding fails before any file is touched
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_unknown_target_encoding() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("a.txt");
    fs::write(&path, "x\n").unwrap();

    let mut prefs = silent_prefs();
    prefs.set_source_encoding("utf-8");
    prefs.set_target_encoding("no-such-encoding");

    let err = convert_filename(path.to_str().unwrap(), &prefs)
        .expect_err("bogus target label must be rejected");

    assert_eq!(err.to_string(), "unknown encoding 'no-such-encoding'");
    assert_eq!(fs::read(&path).unwrap(), b"x\n");
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 11: Batch conversion counts the misses and keeps going
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_batch_counts_misses() {
    let dir = TempDir::new().unwrap();
    let a = dir.path().join("a.txt");
    let b = dir.path().join("b.txt");
    fs::write(&a, b"one\r\n").unwrap();
    fs::write(&b, b"two\r\n").unwrap();
    let missing = dir.path().join("missing.txt");

    let mut prefs = silent_prefs();
    prefs.set_source_encoding("utf-8");
    prefs.set_target_encoding("utf-8");
    prefs.set_eol(Eol::Lf);

    let srcs = [
        a.to_str().unwrap(),
        missing.to_str().unwrap(),
        b.to_str().unwrap(),
    ];
    let mut resolver = Scripted(vec![]);
    let missed =
        convert_multiple_filenames(&srcs, &prefs, &mut resolver).expect("batch setup should work");

    assert_eq!(missed, 1, "exactly the missing file should count as a miss");
    assert_eq!(fs::read(&a).unwrap(), b"one\n");
    assert_eq!(fs::read(&b).unwrap(), b"two\n");
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 12: Declined overwrite keeps the finished copy
// Validates: Aborted outcome reports the surviving temp path
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_declined_overwrite_keeps_finished_copy() {
    let dir = TempDir::new().unwrap();
    let src = dir.path().join("a.txt");
    let dest = dir.path().join("a.txt.out");
    fs::write(&src, b"fresh\r\n").unwrap();
    fs::write(&dest, b"precious").unwrap();

    let mut prefs = silent_prefs();
    prefs.set_source_encoding("utf-8");
    prefs.set_target_encoding("utf-8");
    prefs.set_eol(Eol::Lf);
    prefs.set_out_template(Some("#.out"));

    let ress = ConvertResources::new(&prefs).unwrap();
    let mut resolver = Scripted(vec![ConflictChoice::Abort]);
    let outcome = convert_filename_ext(&ress, src.to_str().unwrap(), &prefs, &mut resolver)
        .expect("a declined overwrite is not an error");

    let temp = match outcome {
        ConvertOutcome::Aborted { temp } => temp,
        other => panic!("expected Aborted, got {other:?}"),
    };
    assert_eq!(fs::read(&temp).unwrap(), b"fresh\n", "converted copy survives");
    assert_eq!(fs::read(&dest).unwrap(), b"precious", "destination untouched");
    assert_eq!(fs::read(&src).unwrap(), b"fresh\r\n", "source untouched");
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 13: Granted overwrite replaces the destination
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_forced_overwrite_replaces_destination() {
    let dir = TempDir::new().unwrap();
    let src = dir.path().join("a.txt");
    let dest = dir.path().join("a.txt.out");
    fs::write(&src, b"fresh\r\n").unwrap();
    fs::write(&dest, b"stale").unwrap();

    let mut prefs = silent_prefs();
    prefs.set_source_encoding("utf-8");
    prefs.set_target_encoding("utf-8");
    prefs.set_eol(Eol::Lf);
    prefs.set_out_template(Some("#.out"));
    prefs.set_overwrite(true);

    convert_filename(src.to_str().unwrap(), &prefs).expect("forced overwrite should succeed");

    assert_eq!(fs::read(&dest).unwrap(), b"fresh\n");
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 14: File times follow the converted file
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_mtime_is_preserved() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("old.txt");
    fs::write(&path, b"dated\r\n").unwrap();
    let stamp = FileTime::from_unix_time(1_000_000_000, 0);
    set_file_mtime(&path, stamp).unwrap();

    let mut prefs = silent_prefs();
    prefs.set_source_encoding("utf-8");
    prefs.set_target_encoding("utf-8");
    prefs.set_eol(Eol::Lf);

    convert_filename(path.to_str().unwrap(), &prefs).expect("conversion should succeed");

    let meta = fs::metadata(&path).unwrap();
    assert_eq!(FileTime::from_last_modification_time(&meta).unix_seconds(), 1_000_000_000);
    assert_eq!(fs::read(&path).unwrap(), b"dated\n");
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 15: EOL-only conversion never touches the encoding
// Validates: latin-1 high bytes pass through unharmed
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_eol_only_preserves_encoding() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("latin.txt");
    fs::write(&path, b"caf\xE9\r\nol\xE9\r\n").unwrap();

    let mut prefs = silent_prefs();
    prefs.set_eol_only(true);
    prefs.set_eol(Eol::Lf);

    convert_eol_filename(path.to_str().unwrap(), &prefs).expect("eol rewrite should succeed");

    assert_eq!(fs::read(&path).unwrap(), b"caf\xE9\nol\xE9\n");
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 16: EOL-only conversion widens breaks in UTF-16 data
// Validates: null-interleaved breaks get a matching widened terminator
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_eol_only_handles_utf16() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("wide.txt");
    fs::write(&path, b"a\x00\n\x00b\x00\n\x00").unwrap();

    let mut prefs = silent_prefs();
    prefs.set_eol_only(true);
    prefs.set_eol(Eol::CrLf);

    convert_eol_filename(path.to_str().unwrap(), &prefs).expect("eol rewrite should succeed");

    assert_eq!(
        fs::read(&path).unwrap(),
        b"a\x00\r\x00\n\x00b\x00\r\x00\n\x00"
    );
}
