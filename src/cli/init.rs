//! CLI initialization and binary-alias detection.
//!
//! When the converter is installed under the names `tounix`, `todos`, or
//! `tomac` via hard or symbolic links, the program selects EOL-only mode
//! and the matching line ending from `argv[0]` before any flag parsing
//! takes place.
//!
//! [`detect_alias`] encapsulates that detection and returns a [`CliInit`]
//! carrying the pre-parsed defaults.  The argument parser in [`crate::cli`]
//! then layers explicit flags on top of these values.

use crate::cli::arg_utils::{exe_name_match, last_name_from_path};
use crate::cli::constants::{TODOS, TOMAC, TOUNIX};
use crate::encoding::locale;
use crate::eol::Eol;
use crate::io::Prefs;

/// Initial CLI state derived from the binary name and environment.
///
/// Built by [`detect_alias`] before argument parsing begins; the argument
/// parser layers explicit flags on top of these defaults.
#[derive(Debug, Clone)]
pub struct CliInit {
    /// Conversion preferences seeded from the locale, with any alias
    /// effects already applied.
    pub prefs: Prefs,
}

/// Detect initial settings from `argv[0]`.
///
/// The converter ships as several alias binaries that each pre-select a
/// line-ending conversion before any flags are parsed:
///
/// | Binary name | Effect                           |
/// |-------------|----------------------------------|
/// | `tounix`    | EOL-only mode, LF line endings   |
/// | `todos`     | EOL-only mode, CRLF line endings |
/// | `tomac`     | EOL-only mode, CR line endings   |
///
/// `argv0` may be a full path; the basename is extracted internally.
///
/// The locale is read here, exactly once, to seed the default source and
/// target encodings and the guess candidate list.
pub fn detect_alias(argv0: &str) -> CliInit {
    let exe_name = last_name_from_path(argv0);

    let mut prefs = Prefs::default();
    let preferred = locale::preferred_encoding();
    prefs.set_source_encoding(&preferred);
    prefs.set_target_encoding(&preferred);
    prefs.locale_candidates = locale::candidates();

    if exe_name_match(exe_name, TOUNIX) {
        prefs.set_eol_only(true);
        prefs.set_eol(Eol::Lf);
    }
    if exe_name_match(exe_name, TODOS) {
        prefs.set_eol_only(true);
        prefs.set_eol(Eol::CrLf);
    }
    if exe_name_match(exe_name, TOMAC) {
        prefs.set_eol_only(true);
        prefs.set_eol(Eol::Cr);
    }

    CliInit { prefs }
}
