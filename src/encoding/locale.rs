//! Locale-derived encoding defaults.
//!
//! POSIX precedence applies: `LC_ALL`, then `LC_CTYPE`, then `LANG`. The
//! codeset is the part after the dot ("en_US.UTF-8" → "UTF-8"); the bare
//! C/POSIX locales mean US-ASCII. The environment is read once at startup
//! and the result travels as explicit configuration from there on.

use std::env;

/// Extracts the codeset label named by one locale string, if any.
pub fn codeset_of(locale: &str) -> Option<String> {
    let locale = locale.trim();
    if locale.is_empty() {
        return None;
    }
    let locale = match locale.split_once('@') {
        Some((base, _modifier)) => base,
        None => locale,
    };
    if let Some((_territory, codeset)) = locale.split_once('.') {
        if codeset.is_empty() {
            None
        } else {
            Some(codeset.to_owned())
        }
    } else if locale.eq_ignore_ascii_case("c") || locale.eq_ignore_ascii_case("posix") {
        Some("us-ascii".to_owned())
    } else {
        None
    }
}

/// Codeset candidates from explicit locale values, precedence order,
/// duplicates removed. Core of [`candidates`], split out for tests.
pub fn candidates_from(
    lc_all: Option<&str>,
    lc_ctype: Option<&str>,
    lang: Option<&str>,
) -> Vec<String> {
    let mut out = Vec::new();
    for value in [lc_all, lc_ctype, lang] {
        if let Some(codeset) = value.and_then(codeset_of) {
            if !out.contains(&codeset) {
                out.push(codeset);
            }
        }
    }
    out
}

/// Locale guess candidates from the process environment.
pub fn candidates() -> Vec<String> {
    candidates_from(
        env::var("LC_ALL").ok().as_deref(),
        env::var("LC_CTYPE").ok().as_deref(),
        env::var("LANG").ok().as_deref(),
    )
}

/// Preferred encoding from explicit locale values: the strongest codeset,
/// or UTF-8 when the locale names none.
pub fn preferred_encoding_from(
    lc_all: Option<&str>,
    lc_ctype: Option<&str>,
    lang: Option<&str>,
) -> String {
    candidates_from(lc_all, lc_ctype, lang)
        .into_iter()
        .next()
        .unwrap_or_else(|| "utf-8".to_owned())
}

/// Preferred encoding from the process environment; the default for both
/// sides of a conversion when no encoding option is given.
pub fn preferred_encoding() -> String {
    preferred_encoding_from(
        env::var("LC_ALL").ok().as_deref(),
        env::var("LC_CTYPE").ok().as_deref(),
        env::var("LANG").ok().as_deref(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codeset_extraction() {
        assert_eq!(codeset_of("en_US.UTF-8"), Some("UTF-8".to_owned()));
        assert_eq!(codeset_of("de_DE.ISO8859-1"), Some("ISO8859-1".to_owned()));
        assert_eq!(codeset_of("uk_UA.KOI8-U@currency"), Some("KOI8-U".to_owned()));
        assert_eq!(codeset_of("C"), Some("us-ascii".to_owned()));
        assert_eq!(codeset_of("POSIX"), Some("us-ascii".to_owned()));
        assert_eq!(codeset_of("en_US"), None);
        assert_eq!(codeset_of("en_US."), None);
        assert_eq!(codeset_of(""), None);
        assert_eq!(codeset_of("  "), None);
    }

    #[test]
    fn precedence_lc_all_first() {
        let got = candidates_from(
            Some("uk_UA.KOI8-U"),
            Some("en_US.UTF-8"),
            Some("ja_JP.eucJP"),
        );
        assert_eq!(got, vec!["KOI8-U", "UTF-8", "eucJP"]);
    }

    #[test]
    fn unset_and_codesetless_vars_are_skipped() {
        let got = candidates_from(None, Some("en_US"), Some("ja_JP.Shift_JIS"));
        assert_eq!(got, vec!["Shift_JIS"]);
        assert!(candidates_from(None, None, None).is_empty());
    }

    #[test]
    fn duplicate_codesets_collapse() {
        let got = candidates_from(Some("en_US.UTF-8"), Some("en_GB.UTF-8"), None);
        assert_eq!(got, vec!["UTF-8"]);
    }

    #[test]
    fn preferred_encoding_falls_back_to_utf8() {
        assert_eq!(preferred_encoding_from(None, None, None), "utf-8");
        assert_eq!(
            preferred_encoding_from(Some("C"), None, None),
            "us-ascii"
        );
        assert_eq!(
            preferred_encoding_from(None, None, Some("en_US.UTF-8")),
            "UTF-8"
        );
    }
}
