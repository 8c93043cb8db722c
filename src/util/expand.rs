//! Command-line argument expansion: `~`, environment variables, and glob
//! patterns, applied on every platform so patterns work even where the
//! shell does not expand them.
//!
//! A pattern that matches nothing (or is not a pattern at all) comes back
//! as itself, so the caller can report the literal name.

use std::path::Path;

use globset::GlobBuilder;
use walkdir::WalkDir;

/// Expands one command-line file argument.
///
/// `~` and `$VAR` references are substituted first; unknown variables are
/// left in place. If the result carries glob metacharacters it is matched
/// against the filesystem and every match is returned, sorted. Without
/// metacharacters, or when nothing matches, the expanded text itself is
/// the only element.
pub fn expand_arg(arg: &str) -> Vec<String> {
    let expanded = expand_vars(arg);
    if !has_glob_metachars(&expanded) {
        return vec![expanded];
    }
    match glob_matches(&expanded) {
        Some(matches) if !matches.is_empty() => matches,
        _ => vec![expanded],
    }
}

fn expand_vars(arg: &str) -> String {
    shellexpand::full_with_context_no_errors(
        arg,
        || {
            std::env::var("HOME")
                .ok()
                .or_else(|| std::env::var("USERPROFILE").ok())
        },
        |var| std::env::var(var).ok(),
    )
    .into_owned()
}

fn has_glob_metachars(s: &str) -> bool {
    s.contains(['*', '?', '['])
}

/// Splits a pattern into its literal directory prefix and the glob tail.
///
/// The prefix is everything up to the last separator before the first
/// metacharacter; it names the directory the walk starts from.
fn split_glob_base(pattern: &str) -> (&str, &str) {
    let first_meta = pattern
        .find(['*', '?', '['])
        .unwrap_or(pattern.len());
    match pattern[..first_meta].rfind('/') {
        Some(0) => ("/", &pattern[1..]),
        Some(pos) => (&pattern[..pos], &pattern[pos + 1..]),
        None => ("", pattern),
    }
}

/// All filesystem matches for `pattern`, sorted. `None` when the pattern
/// does not compile; the caller then treats it as a literal name.
fn glob_matches(pattern: &str) -> Option<Vec<String>> {
    let (base, tail) = split_glob_base(pattern);
    let matcher = GlobBuilder::new(tail)
        .literal_separator(true)
        .build()
        .ok()?
        .compile_matcher();
    // One walk level per pattern component; `*` never crosses a separator.
    let depth = tail.split('/').count();

    let walk_root = if base.is_empty() {
        Path::new(".")
    } else {
        Path::new(base)
    };
    let mut found = Vec::new();
    for entry in WalkDir::new(walk_root)
        .min_depth(1)
        .max_depth(depth)
        .sort_by_file_name()
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(_) => continue,
        };
        let rel = match entry.path().strip_prefix(walk_root) {
            Ok(rel) => rel,
            Err(_) => continue,
        };
        if !matcher.is_match(rel) || !dot_components_allowed(rel, tail) {
            continue;
        }
        let matched = if base.is_empty() {
            rel.to_string_lossy().into_owned()
        } else {
            entry.path().to_string_lossy().into_owned()
        };
        found.push(matched);
    }
    Some(found)
}

/// A hidden name only matches when its pattern component literally starts
/// with a dot, the way shell globbing treats dotfiles.
fn dot_components_allowed(rel: &Path, tail: &str) -> bool {
    let pattern_components: Vec<&str> = tail.split('/').collect();
    for (i, component) in rel.components().enumerate() {
        let name = component.as_os_str().to_string_lossy();
        if name.starts_with('.') {
            match pattern_components.get(i) {
                Some(p) if p.starts_with('.') => {}
                _ => return false,
            }
        }
    }
    true
}
