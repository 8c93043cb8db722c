// Integration tests for lib.rs — top-level wiring and re-exports
//
// Verifies that the public surface of the crate is usable from outside:
//   - Codec lookup and strict decode/encode through `tconv::Codec`
//   - `tconv::Eol` code parsing and platform default
//   - `tconv::SourceEncoding` variants
//   - `tconv::guess_file_encoding` on a real file
//   - The conversion entry points re-exported at the crate root
//   - `tconv::ConvertError` matching from the outside

use std::fs;

use tconv::cli::constants::set_display_level;
use tconv::{
    convert_eol_filename, convert_filename, guess_file_encoding, Codec, ConvertError, Eol, Prefs,
    SourceEncoding,
};
use tempfile::TempDir;

fn silent_prefs() -> Prefs {
    set_display_level(0);
    Prefs::default()
}

// ─────────────────────────────────────────────────────────────────────────────
// Codec / Eol / SourceEncoding re-exports
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn codec_lookup_via_reexport() {
    assert_eq!(Codec::for_label("utf-8").map(|c| c.name()), Some("UTF-8"));
    assert!(Codec::for_label("klingon").is_none());
}

#[test]
fn codec_strict_operations_via_reexport() {
    let latin1 = Codec::for_label("latin-1").unwrap();
    assert_eq!(latin1.decode_strict(b"caf\xE9").as_deref(), Some("café"));
    assert_eq!(latin1.encode_strict("café").as_deref(), Some(&b"caf\xE9"[..]));
    assert!(latin1.encode_strict("漢").is_none());
}

#[test]
fn eol_codes_via_reexport() {
    assert_eq!(Eol::from_code("unix"), Some(Eol::Lf));
    assert_eq!(Eol::from_code("dos"), Some(Eol::CrLf));
    assert_eq!(Eol::from_code("mac"), Some(Eol::Cr));
    assert_eq!(Eol::from_code("amiga"), None);
    let _ = Eol::platform_default();
}

#[test]
fn source_encoding_variants_are_public() {
    let explicit = SourceEncoding::Explicit("koi8-u".to_owned());
    let guess = SourceEncoding::Guess {
        fallback: "latin-1".to_owned(),
    };
    assert_ne!(explicit, guess);
}

// ─────────────────────────────────────────────────────────────────────────────
// guess_file_encoding
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn guess_file_encoding_reads_the_file() {
    set_display_level(0);
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("signed.txt");
    fs::write(&path, b"\xEF\xBB\xBFsigned\n").unwrap();

    let label = guess_file_encoding(path.to_str().unwrap(), "latin-1", &[]);
    assert_eq!(label, "UTF-8");
}

#[test]
fn guess_file_encoding_falls_back_when_unreadable() {
    set_display_level(0);
    let label = guess_file_encoding("/nonexistent_tconv_lib_api.txt", "koi8-u", &[]);
    assert_eq!(label, "koi8-u");
}

// ─────────────────────────────────────────────────────────────────────────────
// Conversion entry points
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn convert_filename_via_reexport() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("cafe.txt");
    fs::write(&path, b"caf\xE9\r\n").unwrap();

    let mut prefs = silent_prefs();
    prefs.set_source_encoding("latin-1");
    prefs.set_target_encoding("utf-8");
    prefs.set_eol(Eol::Lf);

    convert_filename(path.to_str().unwrap(), &prefs).expect("conversion should succeed");
    assert_eq!(fs::read(&path).unwrap(), "café\n".as_bytes());
}

#[test]
fn convert_eol_filename_via_reexport() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("lines.txt");
    fs::write(&path, b"a\nb\n").unwrap();

    let mut prefs = silent_prefs();
    prefs.set_eol_only(true);
    prefs.set_eol(Eol::CrLf);

    convert_eol_filename(path.to_str().unwrap(), &prefs).expect("eol rewrite should succeed");
    assert_eq!(fs::read(&path).unwrap(), b"a\r\nb\r\n");
}

// ─────────────────────────────────────────────────────────────────────────────
// Error surface
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn missing_input_yields_file_not_found() {
    let prefs = silent_prefs();
    let err = convert_filename("/nonexistent_tconv_lib_api.txt", &prefs)
        .expect_err("a missing file must not convert");
    assert!(matches!(err, ConvertError::FileNotFound { .. }));
}

#[test]
fn unknown_label_yields_unknown_encoding() {
    let mut prefs = silent_prefs();
    prefs.set_target_encoding("klingon");
    let err = convert_filename("/nonexistent_tconv_lib_api.txt", &prefs)
        .expect_err("a bogus label must not resolve");
    assert!(matches!(err, ConvertError::UnknownEncoding { .. }));
}
