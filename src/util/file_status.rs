//! File status helpers: classifying paths and carrying file metadata
//! across a rewrite.

use std::fs;
use std::io;
use std::path::Path;

use filetime::FileTime;

/// Copies timestamps, permission bits, and (on POSIX) ownership from
/// `src` onto `dst`.
///
/// A rewritten file should be indistinguishable from the original in
/// everything but its content. Ownership changes need privileges the
/// process usually lacks, so a failed chown is ignored.
pub fn copy_file_stat(src: &Path, dst: &Path) -> io::Result<()> {
    let meta = fs::metadata(src)?;

    let atime = FileTime::from_last_access_time(&meta);
    let mtime = FileTime::from_last_modification_time(&meta);
    filetime::set_file_times(dst, atime, mtime)?;

    #[cfg(unix)]
    {
        use nix::unistd::{chown, Gid, Uid};
        use std::os::unix::fs::MetadataExt;
        use std::os::unix::fs::PermissionsExt;

        let _ = chown(
            dst,
            Some(Uid::from_raw(meta.uid())),
            Some(Gid::from_raw(meta.gid())),
        );
        fs::set_permissions(dst, fs::Permissions::from_mode(meta.mode() & 0o7777))?;
    }
    #[cfg(windows)]
    {
        // Windows has no mode bits; the read-only flag is all there is.
        let readonly = meta.permissions().readonly();
        let mut perms = fs::metadata(dst)?.permissions();
        perms.set_readonly(readonly);
        fs::set_permissions(dst, perms)?;
    }

    Ok(())
}

/// Returns `true` if `path` refers to a regular file.
///
/// Directories, special files, and missing paths all answer `false`.
/// Symlinks are followed first, so a link to a regular file counts.
pub fn is_reg_file(path: &Path) -> bool {
    fs::metadata(path)
        .map(|m| m.file_type().is_file())
        .unwrap_or(false)
}

/// Returns `true` if `path` refers to a directory.
pub fn is_directory(path: &Path) -> bool {
    fs::metadata(path)
        .map(|m| m.file_type().is_dir())
        .unwrap_or(false)
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::time::{Duration, SystemTime};
    use tempfile::TempDir;

    #[cfg(unix)]
    use std::os::unix::fs::PermissionsExt;

    // ── is_reg_file ──────────────────────────────────────────────────────────

    #[test]
    fn is_reg_file_returns_true_for_regular_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("file.txt");
        File::create(&path).unwrap();
        assert!(is_reg_file(&path));
    }

    #[test]
    fn is_reg_file_returns_false_for_directory() {
        let dir = TempDir::new().unwrap();
        assert!(!is_reg_file(dir.path()));
    }

    #[test]
    fn is_reg_file_returns_false_for_nonexistent_path() {
        assert!(!is_reg_file(Path::new("/nonexistent/__tconv_test_path__.txt")));
    }

    // ── is_directory ─────────────────────────────────────────────────────────

    #[test]
    fn is_directory_returns_true_for_directory() {
        let dir = TempDir::new().unwrap();
        assert!(is_directory(dir.path()));
    }

    #[test]
    fn is_directory_returns_false_for_regular_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("file.txt");
        File::create(&path).unwrap();
        assert!(!is_directory(&path));
    }

    #[test]
    fn is_directory_returns_false_for_nonexistent_path() {
        assert!(!is_directory(Path::new("/nonexistent/__tconv_test_dir__")));
    }

    // ── copy_file_stat ───────────────────────────────────────────────────────

    #[test]
    fn copy_file_stat_errors_when_source_missing() {
        let dir = TempDir::new().unwrap();
        let dst = dir.path().join("present.txt");
        File::create(&dst).unwrap();
        let result = copy_file_stat(Path::new("/nonexistent/__tconv_stat__.txt"), &dst);
        assert!(result.is_err());
    }

    /// The destination must take over the source's timestamps exactly.
    #[test]
    fn copy_file_stat_carries_timestamps() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("orig.txt");
        let dst = dir.path().join("copy.txt");
        File::create(&src).unwrap();
        File::create(&dst).unwrap();

        // Age the original by an hour so the copy is observable.
        let old = FileTime::from_system_time(SystemTime::now() - Duration::from_secs(3600));
        filetime::set_file_times(&src, old, old).unwrap();

        copy_file_stat(&src, &dst).unwrap();

        let src_meta = fs::metadata(&src).unwrap();
        let dst_meta = fs::metadata(&dst).unwrap();
        assert_eq!(
            FileTime::from_last_modification_time(&dst_meta),
            FileTime::from_last_modification_time(&src_meta),
        );
    }

    #[cfg(unix)]
    #[test]
    fn copy_file_stat_carries_permission_bits() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("orig.txt");
        let dst = dir.path().join("copy.txt");
        File::create(&src).unwrap();
        File::create(&dst).unwrap();
        fs::set_permissions(&src, fs::Permissions::from_mode(0o600)).unwrap();

        copy_file_stat(&src, &dst).unwrap();

        let mode = fs::metadata(&dst).unwrap().permissions().mode();
        assert_eq!(mode & 0o7777, 0o600);
    }
}
