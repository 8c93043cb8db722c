//! Program identity strings, the shared display-level atomic, and the
//! display macros used throughout the crate.

use std::sync::atomic::{AtomicU32, Ordering};

// ── String / identity constants ───────────────────────────────────────────────
pub const PROGRAM_NAME: &str = "tconv";
pub const TOUNIX: &str = "tounix";
pub const TODOS: &str = "todos";
pub const TOMAC: &str = "tomac";

// ── Display level global ──────────────────────────────────────────────────────
//
// 0 = silent; 1 = errors only; 2 = results and warnings (default);
// 3+ = verbose
pub static DISPLAY_LEVEL: AtomicU32 = AtomicU32::new(2);

/// Returns the current display level.
#[inline]
pub fn display_level() -> u32 {
    DISPLAY_LEVEL.load(Ordering::Relaxed)
}

/// Sets the display level.
#[inline]
pub fn set_display_level(level: u32) {
    DISPLAY_LEVEL.store(level, Ordering::Relaxed);
}

// ── Display helpers ───────────────────────────────────────────────────────────

/// Print to stdout.
#[macro_export]
macro_rules! displayout {
    ($($arg:tt)*) => { print!($($arg)*) };
}

/// Print to stderr, regardless of display level.
#[macro_export]
macro_rules! display {
    ($($arg:tt)*) => { eprint!($($arg)*) };
}

/// Print to stderr when the display level is at or above `level`.
#[macro_export]
macro_rules! displaylevel {
    ($level:expr, $($arg:tt)*) => {
        if $crate::cli::constants::display_level() >= $level {
            eprint!($($arg)*);
        }
    };
}

/// Print debug output. Only active in debug builds.
#[macro_export]
macro_rules! debugoutput {
    ($($arg:tt)*) => {
        #[cfg(debug_assertions)]
        eprint!($($arg)*);
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn program_name_constant() {
        assert_eq!(PROGRAM_NAME, "tconv");
    }

    #[test]
    fn alias_constants() {
        assert_eq!(TOUNIX, "tounix");
        assert_eq!(TODOS, "todos");
        assert_eq!(TOMAC, "tomac");
    }

    #[test]
    fn display_level_round_trips() {
        // Note: other tests may read this global; restore it afterwards.
        let prev = display_level();
        set_display_level(3);
        assert_eq!(display_level(), 3);
        set_display_level(prev);
    }
}
