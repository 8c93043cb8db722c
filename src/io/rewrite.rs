//! The rewrite transaction: temporary-file naming and scoped cleanup.

use std::fs;
use std::path::Path;

use crate::util::is_reg_file;

/// Picks the temporary output path for rewriting `src`: the input path
/// plus "." plus `tag`, appending "x" until the name is free. Existing
/// files are never clobbered, whatever the temp path collides with.
pub fn choose_temp_path(src: &str, tag: &str) -> String {
    let mut temp = format!("{}.{}", src, tag);
    while is_reg_file(Path::new(&temp)) {
        temp.push('x');
    }
    temp
}

/// Custody of the temporary output file.
///
/// While armed, dropping the guard deletes the file, which makes every
/// early return of the rewrite pipeline clean up after itself.
/// [`TempGuard::disarm`] hands the file back to the caller: after a
/// successful rename (the path no longer exists), or on a user abort
/// (converted data must survive for the caller to report).
#[derive(Debug)]
pub struct TempGuard {
    path: String,
    armed: bool,
}

impl TempGuard {
    pub fn new(path: String) -> TempGuard {
        TempGuard { path, armed: true }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn disarm(&mut self) {
        self.armed = false;
    }
}

impl Drop for TempGuard {
    fn drop(&mut self) {
        if self.armed {
            let _ = fs::remove_file(&self.path);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn temp_path_appends_tag() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("note.txt");
        fs::write(&src, b"x").unwrap();
        let src = src.to_str().unwrap();
        assert_eq!(choose_temp_path(src, "utf-8"), format!("{}.utf-8", src));
        assert_eq!(choose_temp_path(src, "eol"), format!("{}.eol", src));
    }

    #[test]
    fn collisions_grow_an_x_suffix() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("note.txt");
        fs::write(&src, b"x").unwrap();
        let src = src.to_str().unwrap();
        fs::write(format!("{}.eol", src), b"taken").unwrap();
        assert_eq!(choose_temp_path(src, "eol"), format!("{}.eolx", src));
        fs::write(format!("{}.eolx", src), b"also taken").unwrap();
        assert_eq!(choose_temp_path(src, "eol"), format!("{}.eolxx", src));
        // The colliding files are still intact.
        assert_eq!(fs::read(format!("{}.eol", src)).unwrap(), b"taken");
        assert_eq!(fs::read(format!("{}.eolx", src)).unwrap(), b"also taken");
    }

    #[test]
    fn armed_guard_deletes_on_drop() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("work.tmp");
        fs::write(&path, b"partial").unwrap();
        {
            let _guard = TempGuard::new(path.to_str().unwrap().to_owned());
        }
        assert!(!path.exists());
    }

    #[test]
    fn disarmed_guard_keeps_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("keep.tmp");
        fs::write(&path, b"done").unwrap();
        {
            let mut guard = TempGuard::new(path.to_str().unwrap().to_owned());
            guard.disarm();
        }
        assert!(path.exists());
    }

    #[test]
    fn guard_on_missing_file_is_harmless() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("never-created.tmp");
        let _guard = TempGuard::new(path.to_str().unwrap().to_owned());
        // Drop runs remove_file on a path that does not exist.
    }
}
