//! Command-line argument parsing for the `tconv` / `tounix` / `todos` / `tomac` family.
//!
//! The entry points are [`parse_args`] (reads `std::env::args()`) and
//! [`parse_args_from`] (takes an explicit slice, suitable for unit-testing).
//! Both return a [`ParsedArgs`] value that captures every option and filename
//! discovered during the parse.
//!
//! Short options may be aggregated (e.g. `-rnq`).  Options taking a value
//! accept it attached (`-tutf-8`, `--to=utf-8`) or as the next argument
//! (`-t utf-8`, `--to utf-8`).  A bare `--` marks the end of options; all
//! subsequent arguments are treated as file paths regardless of whether they
//! start with `-`.
//!
//! Bad or unrecognised options return an `Err` with a human-readable message
//! that begins with `"bad usage: "`.

use anyhow::anyhow;

use crate::cli::arg_utils::long_command_w_arg;
use crate::cli::constants::{display_level, set_display_level, PROGRAM_NAME};
use crate::cli::help::{print_long_help, print_usage_advanced};
use crate::cli::init::CliInit;
use crate::displaylevel;
use crate::encoding::SourceEncoding;
use crate::eol::Eol;
use crate::io::Prefs;

// ── Public output type ─────────────────────────────────────────────────────────

/// Complete set of options and filenames produced by the argument parsing loop.
///
/// Fields are populated by [`parse_args_from`] and consumed by the dispatch
/// phase that selects codec conversion or EOL-only rewriting.
#[derive(Debug)]
pub struct ParsedArgs {
    /// Conversion preferences with every explicit flag applied.
    pub prefs: Prefs,
    /// Non-option arguments: files, directories, or glob patterns.
    pub in_file_names: Vec<String>,
    /// When `true`, a --version / --help flag was processed; the caller
    /// should exit 0 without converting anything.
    pub exit_early: bool,
    /// Program name (argv[0]), used by help functions.
    pub exe_name: String,
}

// ── Public API ─────────────────────────────────────────────────────────────────

/// Parse `std::env::args()` (skipping argv[0]) using `init` as the starting state.
///
/// Delegates to [`parse_args_from`] after collecting `argv` into a `Vec<String>`.
pub fn parse_args(init: CliInit) -> anyhow::Result<ParsedArgs> {
    let exe_name = std::env::args().next().unwrap_or_default();
    let argv: Vec<String> = std::env::args().skip(1).collect();
    parse_args_from(init, &exe_name, &argv)
}

/// Parse an explicit argument list using `init` as the starting state.
///
/// `exe_name` is argv[0] (used for help text). `argv` is argv[1..].
/// This variant is callable from tests without touching `std::env`.
pub fn parse_args_from(
    init: CliInit,
    exe_name: &str,
    argv: &[String],
) -> anyhow::Result<ParsedArgs> {
    // Unpack initial state produced by alias detection in CliInit.
    let CliInit { mut prefs } = init;

    // --- Mutable parsing state ---
    //
    // The input-encoding selection is carried as a label plus a guess flag
    // so repeated -f options compose: `-f guess -f latin-1` and
    // `-f latin-1 -f guess` both guess with latin-1 as the fallback.
    let (mut from_label, mut guess) = match prefs.source.clone() {
        SourceEncoding::Explicit(label) => (label, false),
        SourceEncoding::Guess { fallback } => (fallback, true),
    };
    let mut in_file_names: Vec<String> = Vec::new();
    let mut all_arguments_are_files = false;
    let mut exit_early = false;

    let exe_name_str = exe_name.to_owned();

    // ── Main argument loop ──────────────────────────────────────────────────

    let mut arg_idx = 0usize;
    while arg_idx < argv.len() {
        let argument = &argv[arg_idx];

        if argument.is_empty() {
            arg_idx += 1;
            continue;
        }

        let bytes = argument.as_bytes();

        // ── Non-option path (or end-of-options forced by `--`) ────────────────
        if all_arguments_are_files || bytes[0] != b'-' {
            in_file_names.push(argument.clone());
            arg_idx += 1;
            continue;
        }

        // ── A bare `-` is an ordinary filename ────────────────────────────────
        if bytes.len() == 1 {
            in_file_names.push(argument.clone());
            arg_idx += 1;
            continue;
        }

        // ── Long options (`--...`) ────────────────────────────────────────────
        if bytes[1] == b'-' {
            // `--` end-of-options sentinel
            if argument == "--" {
                all_arguments_are_files = true;
                arg_idx += 1;
                continue;
            }

            // Dispatch on the long option name.

            if argument == "--nocodec" {
                prefs.set_eol_only(true);
            } else if argument == "--recursive" {
                prefs.set_recursive(true);
            } else if argument == "--followlinks" {
                prefs.set_follow_links(true);
            } else if argument == "--dotfiles" {
                prefs.set_dotfiles(true);
            } else if argument == "--force" {
                prefs.set_overwrite(true);
            } else if argument == "--no-force" {
                prefs.set_overwrite(false);
            } else if argument == "--verbose" {
                let lvl = display_level().saturating_add(1);
                set_display_level(lvl);
            } else if argument == "--quiet" {
                let lvl = display_level();
                if lvl > 0 {
                    set_display_level(lvl - 1);
                }
            } else if argument == "--version" {
                print_welcome_message();
                exit_early = true;
                break;
            } else if argument == "--help" {
                print_usage_advanced(exe_name);
                exit_early = true;
                break;
            } else if argument == "--long-help" {
                print_long_help(exe_name);
                exit_early = true;
                break;
            } else if let Some(rest) = long_command_w_arg(argument, "--from") {
                let value = take_option_value(rest, argv, &mut arg_idx, "--from")?;
                if value == "guess" {
                    guess = true;
                } else {
                    from_label = value;
                }
            } else if let Some(rest) = long_command_w_arg(argument, "--to") {
                let value = take_option_value(rest, argv, &mut arg_idx, "--to")?;
                prefs.set_target_encoding(&value);
            } else if let Some(rest) = long_command_w_arg(argument, "--eol") {
                let value = take_option_value(rest, argv, &mut arg_idx, "--eol")?;
                apply_eol_code(&mut prefs, &value);
            } else if let Some(rest) = long_command_w_arg(argument, "--out") {
                let value = take_option_value(rest, argv, &mut arg_idx, "--out")?;
                prefs.set_out_template(Some(&value));
            } else {
                return Err(anyhow!("bad usage: unknown option: {}", argument));
            }

            arg_idx += 1;
            continue;
        }

        // ── Short options (possibly aggregated, e.g. `-rnq`) ─────────────────
        //
        // `char_pos` starts at 1 (the first flag character after `-`).
        // Each iteration handles one flag character and increments `char_pos`.
        // Options that take a value consume the rest of the token (or the
        // next argument) and jump `char_pos` to the end of the token.

        let mut char_pos: usize = 1; // skip the leading '-'
        while char_pos < bytes.len() {
            match bytes[char_pos] {
                b'V' => {
                    // Print version and exit.
                    print_welcome_message();
                    exit_early = true;
                    break; // exit short-option loop
                }
                b'h' => {
                    // Print standard help and exit.
                    print_usage_advanced(exe_name);
                    exit_early = true;
                    break;
                }
                b'H' => {
                    // Print extended help and exit.
                    print_long_help(exe_name);
                    exit_early = true;
                    break;
                }
                b'f' => {
                    // Input encoding, or 'guess' to enable detection.
                    let value = take_short_value(argument, char_pos, argv, &mut arg_idx, "-f")?;
                    if value == "guess" {
                        guess = true;
                    } else {
                        from_label = value;
                    }
                    char_pos = bytes.len() - 1;
                }
                b't' => {
                    // Output encoding.
                    let value = take_short_value(argument, char_pos, argv, &mut arg_idx, "-t")?;
                    prefs.set_target_encoding(&value);
                    char_pos = bytes.len() - 1;
                }
                b'e' => {
                    // Output line-ending convention.
                    let value = take_short_value(argument, char_pos, argv, &mut arg_idx, "-e")?;
                    apply_eol_code(&mut prefs, &value);
                    char_pos = bytes.len() - 1;
                }
                b'o' => {
                    // Output filename template.
                    let value = take_short_value(argument, char_pos, argv, &mut arg_idx, "-o")?;
                    prefs.set_out_template(Some(&value));
                    char_pos = bytes.len() - 1;
                }
                b'n' => {
                    // Convert line endings only; the encoding stays untouched.
                    prefs.set_eol_only(true);
                }
                b'r' => {
                    // Descend into directories named on the command line.
                    prefs.set_recursive(true);
                }
                b'l' => {
                    // Follow symbolic links instead of skipping them.
                    prefs.set_follow_links(true);
                }
                b'd' => {
                    // Include dot-entries met during recursion.
                    prefs.set_dotfiles(true);
                }
                b'F' => {
                    // Overwrite existing destination files without prompting.
                    prefs.set_overwrite(true);
                }
                b'v' => {
                    // Increase verbosity level.
                    let lvl = display_level().saturating_add(1);
                    set_display_level(lvl);
                }
                b'q' => {
                    // Decrease verbosity level.
                    let lvl = display_level();
                    if lvl > 0 {
                        set_display_level(lvl - 1);
                    }
                }
                _ => {
                    // Unrecognised short option.
                    return Err(anyhow!(
                        "bad usage: unrecognised option: -{c}",
                        c = bytes[char_pos] as char
                    ));
                }
            }

            if exit_early {
                break; // propagate early exit out of short-option loop
            }
            char_pos += 1;
        }

        if exit_early {
            break; // propagate out of main argument loop
        }

        arg_idx += 1;
    }

    // Reassemble the input-encoding selection from the composed state.
    prefs.source = if guess {
        SourceEncoding::Guess {
            fallback: from_label,
        }
    } else {
        SourceEncoding::Explicit(from_label)
    };

    Ok(ParsedArgs {
        prefs,
        in_file_names,
        exit_early,
        exe_name: exe_name_str,
    })
}

// ── Private helpers ────────────────────────────────────────────────────────────

/// Prints the version banner to stdout.
fn print_welcome_message() {
    println!("*** {} v{} ***", PROGRAM_NAME, env!("CARGO_PKG_VERSION"));
}

/// Read a long option's value from either `=VALUE` within the current
/// argument or from the next element of `argv` (advancing `arg_idx`),
/// supporting both `--option=VALUE` and `--option VALUE` syntax.
///
/// `rest` is the slice of the current argument following the long-option name
/// (e.g. for `--to=utf-8`, `rest` is `"=utf-8"`; for `--to utf-8`, `rest` is
/// `""`). Any other `rest` means the argument merely started with the option
/// name, which is reported as an unknown option.
fn take_option_value(
    rest: &str,
    argv: &[String],
    arg_idx: &mut usize,
    option: &str,
) -> anyhow::Result<String> {
    if let Some(value) = rest.strip_prefix('=') {
        if value.is_empty() {
            return Err(anyhow!("bad usage: {} requires a value", option));
        }
        Ok(value.to_owned())
    } else if rest.is_empty() {
        *arg_idx += 1;
        match argv.get(*arg_idx) {
            Some(value) => Ok(value.clone()),
            None => Err(anyhow!("bad usage: {} requires a value", option)),
        }
    } else {
        Err(anyhow!("bad usage: unknown option: {}{}", option, rest))
    }
}

/// Read a short option's value from the rest of the current token, or from
/// the next element of `argv` (advancing `arg_idx`) when the option letter
/// ends the token.
fn take_short_value(
    argument: &str,
    char_pos: usize,
    argv: &[String],
    arg_idx: &mut usize,
    option: &str,
) -> anyhow::Result<String> {
    let rest = &argument[char_pos + 1..];
    if !rest.is_empty() {
        Ok(rest.to_owned())
    } else {
        *arg_idx += 1;
        match argv.get(*arg_idx) {
            Some(value) => Ok(value.clone()),
            None => Err(anyhow!("bad usage: {} requires a value", option)),
        }
    }
}

/// Apply a line-ending convention code to `prefs`.
///
/// An unrecognised code warns and leaves the current setting in place.
fn apply_eol_code(prefs: &mut Prefs, code: &str) {
    match Eol::from_code(code) {
        Some(eol) => {
            prefs.set_eol(eol);
        }
        None => {
            displaylevel!(2, "'{}' is not a valid name for a line ending.\n", code);
            displaylevel!(2, "Use 'unix', 'linux', 'dos', 'win', or 'mac'.\n");
            displaylevel!(2, "Converting to your default line ending\n");
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
