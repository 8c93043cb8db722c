//! Moves a finished temporary file onto its destination, negotiating
//! conflicts with an existing destination file through a resolver.

use std::fs;
use std::io;
use std::io::Write;
use std::path::Path;

use crate::io::error::ConvertError;
use crate::util::is_reg_file;

// ---------------------------------------------------------------------------
// Conflict resolution
// ---------------------------------------------------------------------------

/// What to do when the destination already exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConflictChoice {
    /// Replace the existing destination file.
    Overwrite,
    /// Try a different destination path instead. An empty path means
    /// "ask me again".
    Retarget(String),
    /// Give up. The temporary file is left in place.
    Abort,
}

/// Decides the fate of a rename whose destination is occupied.
/// Consulted repeatedly until the conflict goes away.
pub trait ConflictResolver {
    fn resolve(&mut self, dest: &str) -> ConflictChoice;
}

/// Interactive resolver: asks on stderr, reads the answer from stdin.
///
/// When the display level does not allow interaction, it refuses the
/// overwrite instead of hanging on a prompt nobody will answer.
#[derive(Debug, Default)]
pub struct PromptResolver;

impl ConflictResolver for PromptResolver {
    fn resolve(&mut self, dest: &str) -> ConflictChoice {
        if crate::cli::constants::display_level() <= 1 {
            crate::displaylevel!(1, "{} already exists; not overwritten  \n", dest);
            return ConflictChoice::Abort;
        }
        let answer = match read_answer(&format!(
            "{} already exists. Do you want to overwrite? Yes [No] Abort: ",
            dest
        )) {
            Some(answer) => answer,
            None => return ConflictChoice::Abort,
        };
        if answer.eq_ignore_ascii_case("yes") {
            return ConflictChoice::Overwrite;
        }
        if answer.eq_ignore_ascii_case("abort") {
            return ConflictChoice::Abort;
        }
        match read_answer("Enter a new filename: ") {
            Some(name) => ConflictChoice::Retarget(name),
            None => ConflictChoice::Abort,
        }
    }
}

/// Prints `prompt` on stderr and reads one trimmed line from stdin.
/// Returns None when stdin is closed or unreadable.
fn read_answer(prompt: &str) -> Option<String> {
    eprint!("{}", prompt);
    let _ = io::stderr().flush();
    let mut line = String::new();
    match io::stdin().read_line(&mut line) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(line.trim().to_owned()),
    }
}

// ---------------------------------------------------------------------------
// Renaming
// ---------------------------------------------------------------------------

/// Result of [`rename_file`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenameOutcome {
    /// The temporary file now lives at the contained path.
    Renamed(String),
    /// The resolver gave up; the temporary file was left untouched.
    Aborted,
}

/// Renames `temp` to `dest`. When `dest` exists and `overwrite` was not
/// granted up front, the resolver is consulted; it may authorize the
/// overwrite, direct the file somewhere else, or abort.
pub fn rename_file(
    temp: &str,
    dest: &str,
    overwrite: bool,
    resolver: &mut dyn ConflictResolver,
) -> Result<RenameOutcome, ConvertError> {
    let mut dest = dest.to_owned();
    let mut overwrite = overwrite;
    while !overwrite && is_reg_file(Path::new(&dest)) {
        match resolver.resolve(&dest) {
            ConflictChoice::Overwrite => overwrite = true,
            ConflictChoice::Retarget(name) => {
                if !name.is_empty() {
                    dest = name;
                }
            }
            ConflictChoice::Abort => return Ok(RenameOutcome::Aborted),
        }
    }
    replace_file(temp, &dest).map_err(|source| ConvertError::Rename {
        from: temp.to_owned(),
        to: dest.clone(),
        source,
    })?;
    Ok(RenameOutcome::Renamed(dest))
}

#[cfg(unix)]
fn replace_file(temp: &str, dest: &str) -> io::Result<()> {
    // rename(2) replaces an existing destination atomically.
    fs::rename(temp, dest)
}

#[cfg(windows)]
fn replace_file(temp: &str, dest: &str) -> io::Result<()> {
    // MoveFile refuses occupied destinations; clear the way first.
    if temp != dest && is_reg_file(Path::new(dest)) {
        fs::remove_file(dest)?;
    }
    fs::rename(temp, dest)
}
