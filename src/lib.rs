// tconv — convert text files between character encodings and line endings

pub mod cli;
pub mod encoding;
pub mod eol;
pub mod io;
pub mod util;

// ── Top-level re-exports ──────────────────────────────────────────────────────
pub use encoding::{guess_file_encoding, Codec, SourceEncoding};
pub use eol::Eol;
pub use io::{
    convert_eol_filename, convert_eol_multiple_filenames, convert_filename,
    convert_multiple_filenames, ConvertError, Prefs,
};
