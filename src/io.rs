//! Public API surface for file conversion operations.
//!
//! This module assembles the conversion sub-modules and re-exports the
//! symbols consumed by the CLI and library users.

pub mod convert;
pub mod convert_eol;
pub mod error;
pub mod prefs;
pub mod rename;
pub mod rewrite;

// ── Core type re-exports ─────────────────────────────────────────────────────
pub use error::ConvertError;
pub use prefs::Prefs;

// ── Codec conversion public API ──────────────────────────────────────────────
/// Convert a single file between encodings.
pub use convert::convert_filename;

/// Convert multiple files between encodings, sharing one resource set.
pub use convert::convert_multiple_filenames;

pub use convert::{ConvertOutcome, ConvertResources, ConvertStats};

// ── Line-ending-only public API ──────────────────────────────────────────────
/// Rewrite line endings of a single file, leaving its encoding alone.
pub use convert_eol::convert_eol_filename;

/// Rewrite line endings of multiple files.
pub use convert_eol::convert_eol_multiple_filenames;

// ── Destination conflict handling ────────────────────────────────────────────
pub use rename::{ConflictChoice, ConflictResolver, PromptResolver, RenameOutcome};
