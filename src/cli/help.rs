//! Usage and help text, printed to stderr.

use crate::cli::constants::PROGRAM_NAME;

// ── usage ─────────────────────────────────────────────────────────────────────
/// Print brief usage to stderr.
pub fn print_usage(program: &str) {
    eprintln!("Usage : ");
    eprintln!("      {} [arg] file1 [file2 ...] ", program);
    eprintln!();
    eprintln!("input   : filenames, directories (with -r), or glob patterns ");
    eprintln!("Arguments : ");
    eprintln!(" -f enc : encoding to read input with; 'guess' enables detection ");
    eprintln!("          (default: the locale encoding) ");
    eprintln!(" -t enc : encoding to write output with (default: the locale encoding) ");
    eprintln!(" -e code: line ending to write: unix, linux, dos, win, or mac ");
    eprintln!("          (default: the platform line ending) ");
    eprintln!(" -o file: output filename; each '#' is replaced by the input filename ");
    eprintln!("          (default: convert in place) ");
    eprintln!(" -n     : convert line endings only, leave the encoding alone ");
    eprintln!(" -F     : overwrite existing files without prompting ");
    eprintln!(" -h/-H  : display help/long help and exit ");
}

// ── usage_advanced ────────────────────────────────────────────────────────────
/// Print the version banner followed by brief usage and advanced options.
pub fn print_usage_advanced(program: &str) {
    eprintln!("*** {} v{} ***", PROGRAM_NAME, env!("CARGO_PKG_VERSION"));

    print_usage(program);

    eprintln!();
    eprintln!("Advanced arguments :");
    eprintln!(" -V     : display Version number and exit ");
    eprintln!(" -v     : verbose mode ");
    eprintln!(" -q     : suppress warnings; specify twice to suppress errors too");
    eprintln!(" -r     : recurse into directories ");
    eprintln!(" -l     : follow symbolic links ");
    eprintln!(" -d     : include dot files and directories when recursing ");
    eprintln!(" --     : treat all remaining arguments as filenames ");
}

// ── usage_longhelp ────────────────────────────────────────────────────────────
/// Print the full long-form help to stderr.
pub fn print_long_help(program: &str) {
    print_usage_advanced(program);

    eprintln!();
    eprintln!("****************************");
    eprintln!("***** Advanced comment *****");
    eprintln!("****************************");
    eprintln!();
    eprintln!("Which values can 'enc' have ? ");
    eprintln!("---------------------------------");
    eprintln!("Any label the WHATWG Encoding registry knows : utf-8, latin-1, ");
    eprintln!("iso-8859-15, windows-1252, utf-16le, utf-16be, shift_jis, euc-jp, ");
    eprintln!("gbk, gb18030, big5, koi8-r, macintosh, and so on. ");
    eprintln!("Labels are matched case-insensitively. ");
    eprintln!();
    eprintln!("Guessing the input encoding : ");
    eprintln!("--------------------------------");
    eprintln!("'-f guess' detects the encoding of each input file separately. ");
    eprintln!("A Unicode signature (BOM) wins immediately; otherwise candidates ");
    eprintln!("are tried in order : utf-8, the locale encodings, then a fixed ");
    eprintln!("list ending in latin-1. The first candidate that decodes the ");
    eprintln!("whole file wins. ");
    eprintln!("Guessing is not foolproof. Always check the converted result. ");
    eprintln!();
    eprintln!("Output filenames : ");
    eprintln!("------------------");
    eprintln!("'-o' names the output file. Each '#' in the name is replaced by ");
    eprintln!("the input filename. For example : ");
    eprintln!("          {} -t utf-8 -o #.utf8 notes.txt", program);
    eprintln!("writes the converted text to 'notes.txt.utf8'. Without '-o' the ");
    eprintln!("input file is replaced in place. ");
    eprintln!();
    eprintln!("File arguments : ");
    eprintln!("----------------");
    eprintln!("Glob patterns ('*.txt'), '~' and environment variables are ");
    eprintln!("expanded on every platform, so patterns work even where the ");
    eprintln!("shell does not expand them. Directories are only walked with '-r'. ");
    eprintln!();
    eprintln!("Short arguments can be aggregated. For example :");
    eprintln!("----------------------------------");
    eprintln!("          {} -r -n -q logs/", program);
    eprintln!("    is equivalent to :");
    eprintln!("          {} -rnq logs/", program);
    eprintln!();
    eprintln!("Aliases : ");
    eprintln!("---------");
    eprintln!(
        "When installed as 'tounix', 'todos', or 'tomac', {} converts ",
        PROGRAM_NAME
    );
    eprintln!("line endings only, to the named convention (same as '-n -e ...'). ");
}
