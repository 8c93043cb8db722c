// e2e/cli_integration.rs — CLI integration tests
//
// Tests the `tconv` binary as a black-box CLI tool using std::process::Command.
// Covers argument handling, alias detection, glob expansion, conversion
// dispatch, exit codes, and the overwrite prompt.

use std::fs;
use std::path::PathBuf;
use std::process::Command;
use tempfile::TempDir;

/// Locate the `tconv` binary produced by Cargo.
fn tconv_bin() -> PathBuf {
    // CARGO_BIN_EXE_tconv is set by Cargo when running integration tests.
    // Fall back to walking up from the test binary location.
    if let Ok(p) = std::env::var("CARGO_BIN_EXE_tconv") {
        return PathBuf::from(p);
    }
    let mut p = std::env::current_exe().unwrap();
    p.pop(); // remove test binary filename
    if p.ends_with("deps") {
        p.pop();
    }
    p.push("tconv");
    p
}

// ── 1. --version ──────────────────────────────────────────────────────────────

#[test]
fn test_cli_version() {
    let output = Command::new(tconv_bin())
        .arg("--version")
        .output()
        .expect("failed to run tconv --version");

    assert!(
        output.status.success(),
        "--version should exit 0; status: {}",
        output.status
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("tconv") && stdout.contains("0.9.0"),
        "--version stdout should name the program and version; got: {stdout}"
    );
}

// ── 2. -h brief help ──────────────────────────────────────────────────────────

#[test]
fn test_cli_help() {
    let output = Command::new(tconv_bin())
        .arg("-h")
        .output()
        .expect("failed to run tconv -h");

    assert!(
        output.status.success(),
        "-h should exit 0; status: {}",
        output.status
    );
    let combined = format!(
        "{}{}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(
        combined.contains("Usage"),
        "-h output should contain 'Usage'; got: {combined}"
    );
}

// ── 3. -H long help ───────────────────────────────────────────────────────────

#[test]
fn test_cli_long_help() {
    let output = Command::new(tconv_bin())
        .arg("-H")
        .output()
        .expect("failed to run tconv -H");

    assert!(output.status.success(), "-H should exit 0");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Advanced"),
        "-H output should contain the advanced sections; got: {stderr}"
    );
}

// ── 4. Unknown option ─────────────────────────────────────────────────────────

#[test]
fn test_cli_unknown_option() {
    let output = Command::new(tconv_bin())
        .arg("--bogus")
        .output()
        .expect("failed to run tconv --bogus");

    assert_eq!(output.status.code(), Some(1), "unknown option should exit 1");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("bad usage"),
        "unknown option should report bad usage; got: {stderr}"
    );
}

// ── 5. No input files ─────────────────────────────────────────────────────────

#[test]
fn test_cli_no_input_files() {
    let output = Command::new(tconv_bin())
        .args(["-n", "-e", "unix"])
        .output()
        .expect("failed to run tconv without files");

    assert_eq!(output.status.code(), Some(1), "no input should exit 1");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("No input files given"),
        "missing input should be reported; got: {stderr}"
    );
    assert!(
        stderr.contains("Usage"),
        "missing input should print the usage text; got: {stderr}"
    );
}

// ── 6. Codec conversion with explicit encodings ───────────────────────────────

#[test]
fn test_cli_latin1_to_utf8() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("gruss.txt");
    fs::write(&path, b"gr\xFC\xDF\n").unwrap();

    let status = Command::new(tconv_bin())
        .args([
            "-f",
            "latin-1",
            "-t",
            "utf-8",
            "-e",
            "unix",
            path.to_str().unwrap(),
        ])
        .status()
        .expect("failed to run tconv conversion");

    assert!(status.success(), "conversion should exit 0");
    assert_eq!(fs::read(&path).unwrap(), "grüß\n".as_bytes());
}

// ── 7. EOL-only conversion (-n) ───────────────────────────────────────────────

#[test]
fn test_cli_eol_only_to_dos() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("lines.txt");
    fs::write(&path, "a\nb\n").unwrap();

    let status = Command::new(tconv_bin())
        .args(["-n", "-e", "dos", path.to_str().unwrap()])
        .status()
        .expect("failed to run tconv -n");

    assert!(status.success(), "-n conversion should exit 0");
    assert_eq!(fs::read(&path).unwrap(), b"a\r\nb\r\n");
}

// ── 8. Alias detection via argv[0] ────────────────────────────────────────────

#[cfg(unix)]
#[test]
fn test_cli_tounix_alias() {
    use std::os::unix::process::CommandExt;

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("dos.txt");
    fs::write(&path, b"a\r\nb\r\n").unwrap();

    let status = Command::new(tconv_bin())
        .arg0("tounix")
        .arg(path.to_str().unwrap())
        .status()
        .expect("failed to run tconv as tounix");

    assert!(status.success(), "tounix alias should exit 0");
    assert_eq!(fs::read(&path).unwrap(), b"a\nb\n");
}

// ── 9. Glob patterns are expanded by the tool itself ──────────────────────────

#[test]
fn test_cli_glob_pattern() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("a.txt"), "1\n").unwrap();
    fs::write(dir.path().join("b.txt"), "2\n").unwrap();
    fs::write(dir.path().join("c.log"), "3\n").unwrap();

    let status = Command::new(tconv_bin())
        .args(["-n", "-e", "dos", "*.txt"])
        .current_dir(dir.path())
        .status()
        .expect("failed to run tconv with a glob");

    assert!(status.success(), "glob conversion should exit 0");
    assert_eq!(fs::read(dir.path().join("a.txt")).unwrap(), b"1\r\n");
    assert_eq!(fs::read(dir.path().join("b.txt")).unwrap(), b"2\r\n");
    assert_eq!(
        fs::read(dir.path().join("c.log")).unwrap(),
        b"3\n",
        "files outside the pattern must stay untouched"
    );
}

// ── 10. -o output template keeps the source ───────────────────────────────────

#[test]
fn test_cli_out_template() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("keep.txt");
    fs::write(&path, "x\n").unwrap();

    let status = Command::new(tconv_bin())
        .args(["-n", "-e", "dos", "-o", "#.dos", path.to_str().unwrap()])
        .status()
        .expect("failed to run tconv -o");

    assert!(status.success(), "-o conversion should exit 0");
    assert_eq!(fs::read(&path).unwrap(), b"x\n", "source must stay untouched");
    let dest = dir.path().join("keep.txt.dos");
    assert_eq!(fs::read(&dest).unwrap(), b"x\r\n");
}

// ── 11. Missing input file ────────────────────────────────────────────────────

#[test]
fn test_cli_missing_input() {
    let output = Command::new(tconv_bin())
        .args(["-n", "-e", "unix", "/nonexistent_tconv_test_file.txt"])
        .output()
        .expect("failed to run tconv with a missing file");

    assert_eq!(output.status.code(), Some(1), "missing input should exit 1");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Can't process"),
        "missing file should be reported; got: {stderr}"
    );
}

// ── 12. Exit code counts the files that failed ────────────────────────────────

#[test]
fn test_cli_exit_code_counts_misses() {
    let dir = TempDir::new().unwrap();
    let good = dir.path().join("good.txt");
    let bad1 = dir.path().join("bad1.txt");
    let bad2 = dir.path().join("bad2.txt");
    fs::write(&good, "ok\n").unwrap();
    fs::write(&bad1, b"\xFF\n").unwrap();
    fs::write(&bad2, b"\xFE\n").unwrap();

    let output = Command::new(tconv_bin())
        .args([
            "-f",
            "utf-8",
            "-t",
            "utf-8",
            "-e",
            "unix",
            good.to_str().unwrap(),
            bad1.to_str().unwrap(),
            bad2.to_str().unwrap(),
        ])
        .output()
        .expect("failed to run tconv batch");

    assert_eq!(
        output.status.code(),
        Some(2),
        "two undecodable files should exit 2"
    );
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("cannot decode"),
        "decode failures should be reported; got: {stderr}"
    );
    assert_eq!(fs::read(&bad1).unwrap(), b"\xFF\n", "failed file stays untouched");
}

// ── 13. -q silences the chatter ───────────────────────────────────────────────

#[test]
fn test_cli_quiet() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("quiet.txt");
    fs::write(&path, "a\r\n").unwrap();

    let output = Command::new(tconv_bin())
        .args(["-q", "-n", "-e", "unix", path.to_str().unwrap()])
        .output()
        .expect("failed to run tconv -q");

    assert!(output.status.success(), "-q conversion should exit 0");
    assert!(
        output.stdout.is_empty() && output.stderr.is_empty(),
        "quiet mode must not print; stdout: {:?} stderr: {:?}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
    assert_eq!(fs::read(&path).unwrap(), b"a\n");
}

// ── 14. Occupied destination aborts when the prompt gets no answer ────────────

#[test]
fn test_cli_occupied_destination_aborts() {
    let dir = TempDir::new().unwrap();
    let src = dir.path().join("in.txt");
    let dest = dir.path().join("in.txt.out");
    fs::write(&src, "new\r\n").unwrap();
    fs::write(&dest, "precious").unwrap();

    // Command::output() closes stdin, so the overwrite prompt reads EOF
    // and the conversion is aborted.
    let output = Command::new(tconv_bin())
        .args(["-n", "-e", "unix", "-o", "#.out", src.to_str().unwrap()])
        .output()
        .expect("failed to run tconv against an occupied destination");

    assert_eq!(
        output.status.code(),
        Some(1),
        "an aborted file should count as a miss"
    );
    assert_eq!(fs::read(&dest).unwrap(), b"precious", "destination untouched");
    assert_eq!(fs::read(&src).unwrap(), b"new\r\n", "source untouched");
}

// ── 15. -F overwrites an occupied destination ─────────────────────────────────

#[test]
fn test_cli_force_overwrites() {
    let dir = TempDir::new().unwrap();
    let src = dir.path().join("in.txt");
    let dest = dir.path().join("in.txt.out");
    fs::write(&src, "new\r\n").unwrap();
    fs::write(&dest, "stale").unwrap();

    let status = Command::new(tconv_bin())
        .args([
            "-F",
            "-n",
            "-e",
            "unix",
            "-o",
            "#.out",
            src.to_str().unwrap(),
        ])
        .status()
        .expect("failed to run tconv -F");

    assert!(status.success(), "-F conversion should exit 0");
    assert_eq!(fs::read(&dest).unwrap(), b"new\n");
}

// ── 16. Directories need -r ───────────────────────────────────────────────────

#[test]
fn test_cli_directory_without_recursive() {
    let dir = TempDir::new().unwrap();
    let inner = dir.path().join("x.txt");
    fs::write(&inner, "1\n").unwrap();

    let output = Command::new(tconv_bin())
        .args(["-n", "-e", "dos", dir.path().to_str().unwrap()])
        .output()
        .expect("failed to run tconv on a directory");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("recursive handling is not activated"),
        "directory without -r should warn; got: {stderr}"
    );
    assert_eq!(fs::read(&inner).unwrap(), b"1\n", "nothing may be converted");
}

// ── 17. -r recurses into directories ──────────────────────────────────────────

#[test]
fn test_cli_recursive_directory() {
    let dir = TempDir::new().unwrap();
    fs::create_dir(dir.path().join("sub")).unwrap();
    fs::write(dir.path().join("x.txt"), "1\n").unwrap();
    fs::write(dir.path().join("sub/y.txt"), "2\n").unwrap();

    let status = Command::new(tconv_bin())
        .args(["-n", "-e", "dos", "-r", dir.path().to_str().unwrap()])
        .status()
        .expect("failed to run tconv -r");

    assert!(status.success(), "-r conversion should exit 0");
    assert_eq!(fs::read(dir.path().join("x.txt")).unwrap(), b"1\r\n");
    assert_eq!(fs::read(dir.path().join("sub/y.txt")).unwrap(), b"2\r\n");
}
