//! Codec conversion: decode a text file with its source encoding,
//! normalize the line endings, re-encode with the target encoding, and
//! move the result into place.
//!
//! The rewrite never touches the original until the converted copy is
//! complete: output goes to a temporary sibling file first, picks up the
//! original's metadata, and is renamed over the destination at the end.

use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;

use crate::encoding::{guess_file_encoding, Codec, SourceEncoding};
use crate::eol::normalize_text;
use crate::io::error::ConvertError;
use crate::io::prefs::Prefs;
use crate::io::rename::{rename_file, ConflictResolver, PromptResolver, RenameOutcome};
use crate::io::rewrite::{choose_temp_path, TempGuard};
use crate::util::{copy_file_stat, is_reg_file};

// ---------------------------------------------------------------------------
// Resources
// ---------------------------------------------------------------------------

/// Per-batch conversion state: the target codec, resolved once, and the
/// candidate list used when guessing source encodings.
#[derive(Debug)]
pub struct ConvertResources {
    target: Codec,
    candidates: Vec<String>,
}

impl ConvertResources {
    pub fn new(prefs: &Prefs) -> Result<ConvertResources, ConvertError> {
        Ok(ConvertResources {
            target: lookup_codec(&prefs.target)?,
            candidates: crate::encoding::candidate_labels(&prefs.locale_candidates),
        })
    }

    pub fn target(&self) -> Codec {
        self.target
    }
}

/// Statistics of one finished conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConvertStats {
    pub bytes_in: u64,
    pub bytes_out: u64,
}

/// How one file ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConvertOutcome {
    Converted(ConvertStats),
    /// The user declined the destination overwrite. The finished copy
    /// survives at `temp` so the work is not lost.
    Aborted { temp: String },
}

fn lookup_codec(label: &str) -> Result<Codec, ConvertError> {
    Codec::for_label(label).ok_or_else(|| ConvertError::UnknownEncoding {
        label: label.to_owned(),
    })
}

/// Resolves the source codec for `src`, reading the file to guess when
/// no explicit encoding was chosen.
fn resolve_source(
    src: &str,
    prefs: &Prefs,
    ress: &ConvertResources,
) -> Result<Codec, ConvertError> {
    match &prefs.source {
        SourceEncoding::Explicit(label) => lookup_codec(label),
        SourceEncoding::Guess { fallback } => {
            let label = guess_file_encoding(src, fallback, &ress.candidates);
            lookup_codec(&label)
        }
    }
}

// ---------------------------------------------------------------------------
// convert_filename_ext
// ---------------------------------------------------------------------------

/// Converts a single file using external [`ConvertResources`].
///
/// The steps, in order: resolve the source codec (guess chatter prints
/// first), check the input exists, decode the whole file, write the
/// re-encoded lines to a temporary sibling, copy the input's metadata
/// onto it, and rename it over the destination. Any failure before the
/// rename removes the temporary file.
pub fn convert_filename_ext(
    ress: &ConvertResources,
    src: &str,
    prefs: &Prefs,
    resolver: &mut dyn ConflictResolver,
) -> Result<ConvertOutcome, ConvertError> {
    let source = resolve_source(src, prefs, ress)?;
    crate::displaylevel!(2, "Processing {} ...  ", src);
    if !is_reg_file(Path::new(src)) {
        return Err(ConvertError::FileNotFound {
            path: src.to_owned(),
        });
    }

    let mut infile = File::open(src).map_err(|source| ConvertError::OpenInput {
        path: src.to_owned(),
        source,
    })?;

    let mut guard = TempGuard::new(choose_temp_path(src, &prefs.target));
    let outfile = File::create(guard.path()).map_err(|source| ConvertError::OpenOutput {
        path: guard.path().to_owned(),
        source,
    })?;
    let mut writer = BufWriter::new(outfile);

    let mut data = Vec::new();
    infile
        .read_to_end(&mut data)
        .map_err(|source| ConvertError::Io {
            path: src.to_owned(),
            source,
        })?;
    let text = source
        .decode_strict(&data)
        .ok_or_else(|| ConvertError::Decode {
            path: src.to_owned(),
            encoding: source.name().to_owned(),
        })?;

    let mut bytes_out: u64 = 0;
    for line in text.split_inclusive('\n') {
        let converted = normalize_text(line, prefs.eol);
        let encoded = ress
            .target
            .encode_strict(&converted)
            .ok_or_else(|| ConvertError::Encode {
                path: src.to_owned(),
                encoding: ress.target.name().to_owned(),
            })?;
        writer.write_all(&encoded).map_err(|source| ConvertError::Io {
            path: guard.path().to_owned(),
            source,
        })?;
        bytes_out += encoded.len() as u64;
    }
    writer.flush().map_err(|source| ConvertError::Io {
        path: guard.path().to_owned(),
        source,
    })?;
    drop(writer);

    let (dest, overwrite) = match prefs.out_path_for(src) {
        Some(path) if !path.is_empty() => (path, prefs.overwrite),
        // In-place rewrite: replacing the input needs no confirmation.
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
            crate::displaylevel!(
                2,
                "{} was successfully converted from {} to {}\n\n",
                src,
                source.name(),
                ress.target.name()
            );
            Ok(ConvertOutcome::Converted(ConvertStats {
                bytes_in: data.len() as u64,
                bytes_out,
            }))
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
// Public: convert_filename
// ---------------------------------------------------------------------------

/// Converts a single file, prompting on stderr if the destination is
/// already occupied.
pub fn convert_filename(src: &str, prefs: &Prefs) -> Result<ConvertOutcome, ConvertError> {
    let ress = ConvertResources::new(prefs)?;
    let mut resolver = PromptResolver;
    convert_filename_ext(&ress, src, prefs, &mut resolver)
}

// ---------------------------------------------------------------------------
// Public: convert_multiple_filenames
// ---------------------------------------------------------------------------

/// Converts every file in `srcs`, sharing one set of resources.
///
/// Per-file failures are reported and counted, not propagated; a
/// declined overwrite counts as a miss as well. Returns the number of
/// files that were not converted.
pub fn convert_multiple_filenames(
    srcs: &[&str],
    prefs: &Prefs,
    resolver: &mut dyn ConflictResolver,
) -> Result<usize, ConvertError> {
    let ress = ConvertResources::new(prefs)?;
    let mut missed_files: usize = 0;

    for &src in srcs {
        match convert_filename_ext(&ress, src, prefs, resolver) {
            Ok(ConvertOutcome::Converted(_)) => {}
            Ok(ConvertOutcome::Aborted { .. }) => missed_files += 1,
            Err(err) => {
                crate::displaylevel!(1, "{}\n", err);
                missed_files += 1;
            }
        }
    }

    Ok(missed_files)
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
