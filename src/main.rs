//! Binary entry point for the `tconv` command-line tool.
//!
//! Handles file-argument expansion (tilde, environment variables, glob
//! patterns), file-list preparation (recursion, symlink policy), and
//! dispatch to the codec or EOL-only conversion drivers.
//!
//! # Control flow
//!
//! 1. [`detect_alias`] inspects `argv[0]` to pick up alias presets
//!    (e.g. `tounix` implies EOL-only conversion to LF) and seeds the
//!    encodings from the locale.
//! 2. [`parse_args`] processes all flags and builds a [`ParsedArgs`] value.
//! 3. [`run`] expands the file arguments and dispatches the conversion,
//!    returning an exit code.

use tconv::cli::args::{parse_args, ParsedArgs};
use tconv::cli::constants::{display_level, PROGRAM_NAME};
use tconv::cli::help::print_usage;
use tconv::cli::init::detect_alias;
use tconv::encoding::SourceEncoding;
use tconv::io::{convert_eol_multiple_filenames, convert_multiple_filenames, PromptResolver};
use tconv::util::{expand_arg, prepare_file_list};

// ── Post-parse dispatch ───────────────────────────────────────────────────────

/// Execute the conversion selected by argument parsing.
///
/// Returns the process exit code: the number of files that could not be
/// converted, or 1 when there was nothing to convert at all.
fn run(args: ParsedArgs) -> i32 {
    let prefs = args.prefs;

    if args.in_file_names.is_empty() {
        tconv::displaylevel!(1, "No input files given \n");
        if display_level() >= 1 {
            print_usage(&args.exe_name);
        }
        return 1;
    }

    // Shell-style expansion first, then classify: plain files pass
    // through, directories recurse under -r, symlinks follow under -l.
    let mut expanded: Vec<String> = Vec::new();
    for name in &args.in_file_names {
        expanded.extend(expand_arg(name));
    }
    let files = prepare_file_list(&expanded, &prefs);

    // Every named input was dropped with its own explanation above.
    if files.is_empty() {
        return 1;
    }

    if !prefs.eol_only {
        if let SourceEncoding::Guess { .. } = prefs.source {
            tconv::displaylevel!(
                2,
                "WARNING: guessing the input encoding is dangerous. \
                 Make sure to check the results.\n\n"
            );
        }
    }

    let srcs: Vec<&str> = files.iter().map(String::as_str).collect();
    let mut resolver = PromptResolver;

    let missed = if prefs.eol_only {
        convert_eol_multiple_filenames(&srcs, &prefs, &mut resolver)
    } else {
        match convert_multiple_filenames(&srcs, &prefs, &mut resolver) {
            Ok(missed) => missed,
            Err(err) => {
                // Setup failure (e.g. unknown target encoding): nothing
                // was converted.
                tconv::displaylevel!(1, "{}: {}\n", PROGRAM_NAME, err);
                return 1;
            }
        }
    };

    missed as i32
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    // argv[0] → alias detection and locale seeding.
    let argv0 = std::env::args()
        .next()
        .unwrap_or_else(|| PROGRAM_NAME.to_owned());
    let init = detect_alias(&argv0);

    let args = match parse_args(init) {
        Ok(a) => a,
        Err(e) => {
            eprintln!("{}: {}", PROGRAM_NAME, e);
            std::process::exit(1);
        }
    };

    // Help / version flags set exit_early; the caller should exit 0.
    if args.exit_early {
        std::process::exit(0);
    }

    let exit_code = run(args);
    std::process::exit(exit_code);
}
