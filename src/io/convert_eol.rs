//! Line-ending conversion without any codec: bytes stream through
//! unchanged except for line terminators, so the file's encoding is
//! left exactly as it was.
//!
//! Works on anything ASCII-compatible and, through interleaved-NUL
//! handling in [`normalize_bytes`], on UTF-16 text of either byte
//! order. The rewrite protocol is the same temp-and-rename transaction
//! the codec path uses.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use crate::eol::normalize_bytes;
use crate::io::convert::{ConvertOutcome, ConvertStats};
use crate::io::error::ConvertError;
use crate::io::prefs::Prefs;
use crate::io::rename::{rename_file, ConflictResolver, PromptResolver, RenameOutcome};
use crate::io::rewrite::{choose_temp_path, TempGuard};
use crate::util::{copy_file_stat, is_reg_file};

const TEMP_TAG: &str = "eol";

// ---------------------------------------------------------------------------
// convert_eol_filename_ext
// ---------------------------------------------------------------------------

/// Rewrites the line endings of a single file.
///
/// Reads LF-delimited chunks, so a carriage-return-only file arrives as
/// one chunk and UTF-16 content may split a code unit across chunks;
/// [`normalize_bytes`] is built for both.
pub fn convert_eol_filename_ext(
    src: &str,
    prefs: &Prefs,
    resolver: &mut dyn ConflictResolver,
) -> Result<ConvertOutcome, ConvertError> {
    crate::displaylevel!(2, "Processing {} ...  ", src);
    if !is_reg_file(Path::new(src)) {
        return Err(ConvertError::FileNotFound {
            path: src.to_owned(),
        });
    }

    let infile = File::open(src).map_err(|source| ConvertError::OpenInput {
        path: src.to_owned(),
        source,
    })?;
    let mut reader = BufReader::new(infile);

    let mut guard = TempGuard::new(choose_temp_path(src, TEMP_TAG));
    let outfile = File::create(guard.path()).map_err(|source| ConvertError::OpenOutput {
        path: guard.path().to_owned(),
        source,
    })?;
    let mut writer = BufWriter::new(outfile);

    let mut bytes_in: u64 = 0;
    let mut bytes_out: u64 = 0;
    let mut line: Vec<u8> = Vec::new();
    loop {
        line.clear();
        let n = reader
            .read_until(b'\n', &mut line)
            .map_err(|source| ConvertError::Io {
                path: src.to_owned(),
                source,
            })?;
        if n == 0 {
            break;
        }
        bytes_in += n as u64;
        let converted = normalize_bytes(&line, prefs.eol);
        writer
            .write_all(&converted)
            .map_err(|source| ConvertError::Io {
                path: guard.path().to_owned(),
                source,
            })?;
        bytes_out += converted.len() as u64;
    }
    writer.flush().map_err(|source| ConvertError::Io {
        path: guard.path().to_owned(),
        source,
    })?;
    drop(writer);

    let (dest, overwrite) = match prefs.out_path_for(src) {
        Some(path) if !path.is_empty() => (path, prefs.overwrite),
        _ => (src.to_owned(), true),
    };

    copy_file_stat(Path::new(src), Path::new(guard.path())).map_err(|source| {
        ConvertError::Rename {
            from: guard.path().to_owned(),
            to: dest.clone(),
            source,
        }
    })?;

    match rename_file(guard.path(), &dest, overwrite, resolver)? {
        RenameOutcome::Renamed(_) => {
            guard.disarm();
            crate::displaylevel!(2, "Successfully converted eol for {}\n\n", src);
            Ok(ConvertOutcome::Converted(ConvertStats { bytes_in, bytes_out }))
        }
        RenameOutcome::Aborted => {
            let temp = guard.path().to_owned();
            guard.disarm();
            crate::displaylevel!(2, "{} was NOT converted; converted copy left at {}\n\n", src, temp);
            Ok(ConvertOutcome::Aborted { temp })
        }
    }
}

// ---------------------------------------------------------------------------
// Public: convert_eol_filename
// ---------------------------------------------------------------------------

/// Rewrites the line endings of a single file, prompting on stderr if
/// the destination is already occupied.
pub fn convert_eol_filename(src: &str, prefs: &Prefs) -> Result<ConvertOutcome, ConvertError> {
    let mut resolver = PromptResolver;
    convert_eol_filename_ext(src, prefs, &mut resolver)
}

// ---------------------------------------------------------------------------
// Public: convert_eol_multiple_filenames
// ---------------------------------------------------------------------------

/// Rewrites line endings for every file in `srcs`. Returns the number
/// of files that were not converted.
pub fn convert_eol_multiple_filenames(
    srcs: &[&str],
    prefs: &Prefs,
    resolver: &mut dyn ConflictResolver,
) -> usize {
    let mut missed_files: usize = 0;

    for &src in srcs {
        match convert_eol_filename_ext(src, prefs, resolver) {
            Ok(ConvertOutcome::Converted(_)) => {}
            Ok(ConvertOutcome::Aborted { .. }) => missed_files += 1,
            Err(err) => {
                crate::displaylevel!(1, "{}\n", err);
                missed_files += 1;
            }
        }
    }

    missed_files
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eol::Eol;
    use std::fs;
    use tempfile::TempDir;

    fn prefs(eol: Eol) -> Prefs {
        let mut prefs = Prefs::new();
        prefs.set_eol_only(true);
        prefs.set_eol(eol);
        prefs
    }

    #[test]
    fn dos_to_unix_in_place() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("a.txt");
        fs::write(&src, b"one\r\ntwo\r\nthree\r\n").unwrap();
        let outcome = convert_eol_filename(src.to_str().unwrap(), &prefs(Eol::Lf)).unwrap();
        assert_eq!(fs::read(&src).unwrap(), b"one\ntwo\nthree\n");
        match outcome {
            ConvertOutcome::Converted(stats) => {
                assert_eq!(stats.bytes_in, 17);
                assert_eq!(stats.bytes_out, 14);
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[test]
    fn mac_file_arrives_as_one_chunk() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("old.txt");
        fs::write(&src, b"one\rtwo\rthree").unwrap();
        convert_eol_filename(src.to_str().unwrap(), &prefs(Eol::CrLf)).unwrap();
        assert_eq!(fs::read(&src).unwrap(), b"one\r\ntwo\r\nthree");
    }

    #[test]
    fn mixed_endings_all_become_the_target() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("mixed.txt");
        fs::write(&src, b"a\r\nb\rc\nd").unwrap();
        convert_eol_filename(src.to_str().unwrap(), &prefs(Eol::Lf)).unwrap();
        assert_eq!(fs::read(&src).unwrap(), b"a\nb\nc\nd");
    }

    #[test]
    fn utf16le_crlf_to_lf_keeps_the_encoding() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("wide.txt");
        // "a\r\nb\r\n" in UTF-16LE; read_until splits after each low
        // 0A byte, leaving the high byte to open the next chunk.
        fs::write(&src, b"a\x00\r\x00\n\x00b\x00\r\x00\n\x00").unwrap();
        convert_eol_filename(src.to_str().unwrap(), &prefs(Eol::Lf)).unwrap();
        assert_eq!(fs::read(&src).unwrap(), b"a\x00\n\x00b\x00\n\x00");
    }

    #[test]
    fn utf16be_lf_to_crlf_keeps_the_encoding() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("wide-be.txt");
        // "x\ny\n" in UTF-16BE.
        fs::write(&src, b"\x00x\x00\n\x00y\x00\n").unwrap();
        convert_eol_filename(src.to_str().unwrap(), &prefs(Eol::CrLf)).unwrap();
        assert_eq!(fs::read(&src).unwrap(), b"\x00x\x00\r\x00\n\x00y\x00\r\x00\n");
    }

    #[test]
    fn arbitrary_bytes_survive_untouched() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("latin.txt");
        fs::write(&src, b"caf\xe9\r\n\xff\xfe\r\n").unwrap();
        convert_eol_filename(src.to_str().unwrap(), &prefs(Eol::Lf)).unwrap();
        assert_eq!(fs::read(&src).unwrap(), b"caf\xe9\n\xff\xfe\n");
    }

    #[test]
    fn missing_file_is_a_per_file_error() {
        let dir = TempDir::new().unwrap();
        let gone = dir.path().join("gone.txt");
        let err = convert_eol_filename(gone.to_str().unwrap(), &prefs(Eol::Lf)).unwrap_err();
        assert!(matches!(err, ConvertError::FileNotFound { .. }));
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn batch_reports_missed_count() {
        let dir = TempDir::new().unwrap();
        let good = dir.path().join("good.txt");
        fs::write(&good, b"ok\r\n").unwrap();
        let gone = dir.path().join("gone.txt");
        let srcs = [good.to_str().unwrap(), gone.to_str().unwrap()];
        let missed = convert_eol_multiple_filenames(&srcs, &prefs(Eol::Lf), &mut PromptResolver);
        assert_eq!(missed, 1);
        assert_eq!(fs::read(&good).unwrap(), b"ok\n");
    }
}
