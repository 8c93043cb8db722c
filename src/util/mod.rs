//! Shared filesystem utilities.
//!
//! Submodules:
//! - [`expand`]      — `~`, environment-variable, and glob expansion of
//!   command-line arguments
//! - [`file_list`]   — flattening files, directories, and symlinks into the
//!   list of regular files to process
//! - [`file_status`] — file-type probes and metadata copying

pub mod expand;
pub mod file_list;
pub mod file_status;

// ── Re-exports at `util::` level ─────────────────────────────────────────────

pub use expand::expand_arg;

pub use file_list::prepare_file_list;

pub use file_status::{copy_file_stat, is_directory, is_reg_file};
