//! Command-line interface for the `tconv` binary.
//!
//! This module organises the full CLI pipeline:
//!
//! | Submodule     | Responsibility |
//! |---------------|---------------|
//! | [`constants`] | Program identity strings, the shared `DISPLAY_LEVEL` atomic, and the display macros. |
//! | [`help`]      | Usage and help text printers. |
//! | [`arg_utils`] | Low-level argument parsing utilities: path basename, executable-name matching, long-option prefix splitting. |
//! | [`init`]      | `CliInit` — initial state built from the binary name (alias detection for `tounix`, `todos`, `tomac`) and the locale. |
//! | [`args`]      | `ParsedArgs` — full argument-parsing loop that consumes `argv` and produces the final set of runtime options. |
//!
//! Typical call sequence: `detect_alias` → `parse_args` → dispatch to the I/O layer.

pub mod constants;
pub mod help;
pub mod arg_utils;
pub mod init;
pub mod args;
