//! File list construction with recursive directory expansion.
//!
//! Given the non-option arguments (already glob-expanded), `prepare_file_list`
//! returns the flat list of regular files to convert. Anything that cannot be
//! converted is warned about and dropped: directories when recursion is off,
//! symlinks when following links is off, names that match nothing.
//!
//! Directory walks use the [`walkdir`] crate. Dot-entries met during a walk
//! are skipped unless dotfile processing is on; a dotfile named explicitly on
//! the command line is always processed.

use std::fs;
use std::path::Path;

use walkdir::{DirEntry, WalkDir};

use crate::io::Prefs;
use crate::util::file_status::{is_directory, is_reg_file};

/// Expand a mixed list of file, directory, and symlink names into the flat
/// list of regular files to process.
pub fn prepare_file_list(inputs: &[String], prefs: &Prefs) -> Vec<String> {
    let mut files = Vec::new();
    for name in inputs {
        collect(name, prefs, &mut files);
    }
    files
}

fn collect(name: &str, prefs: &Prefs, files: &mut Vec<String>) {
    let path = Path::new(name);

    if let Ok(meta) = fs::symlink_metadata(path) {
        if meta.file_type().is_symlink() {
            if !prefs.follow_links {
                crate::displaylevel!(
                    2,
                    "'{}' is a symlink, but following links is not activated\n",
                    name
                );
                return;
            }
            // The canonical target is an ordinary name; a dangling link or
            // a link cycle fails canonicalization and falls through to the
            // not-found report.
            match fs::canonicalize(path) {
                Ok(target) => collect(&target.to_string_lossy(), prefs, files),
                Err(_) => {
                    crate::displaylevel!(2, "Can't process '{}'. Not found.\n\n", name);
                }
            }
            return;
        }
    }

    if is_reg_file(path) {
        files.push(name.to_owned());
    } else if is_directory(path) {
        if prefs.recursive {
            walk_directory(path, prefs, files);
        } else {
            crate::displaylevel!(
                2,
                "'{}' is a directory, but recursive handling is not activated\n",
                name
            );
        }
    } else {
        crate::displaylevel!(2, "Can't process '{}'. Not found.\n\n", name);
    }
}

fn walk_directory(path: &Path, prefs: &Prefs, files: &mut Vec<String>) {
    let walker = WalkDir::new(path)
        .follow_links(prefs.follow_links)
        .sort_by_file_name();
    for entry in walker
        .into_iter()
        .filter_entry(|entry| keep_entry(entry, prefs))
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                crate::displaylevel!(2, "{}\n", err);
                continue;
            }
        };
        if entry.depth() == 0 {
            continue;
        }
        if entry.file_type().is_symlink() {
            // Only reported when links are not followed; otherwise walkdir
            // resolves the entry to its target type.
            crate::displaylevel!(
                2,
                "'{}' is a symlink, but following links is not activated\n",
                entry.path().display()
            );
            continue;
        }
        if entry.file_type().is_file() {
            files.push(entry.path().to_string_lossy().into_owned());
        }
    }
}

/// Dot-entries below the walk root are only entered or collected when
/// dotfile processing is on.
fn keep_entry(entry: &DirEntry, prefs: &Prefs) -> bool {
    if entry.depth() == 0 || prefs.dotfiles {
        return true;
    }
    !entry.file_name().to_string_lossy().starts_with('.')
}
