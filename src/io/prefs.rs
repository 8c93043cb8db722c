//! Conversion preferences.
//!
//! `Prefs` is a plain value type owned by the caller; nothing in here
//! touches global state. The CLI builds one at startup (seeding the
//! encoding fields from the locale, read exactly once) and passes it into
//! every entry point.

use crate::encoding::SourceEncoding;
use crate::eol::Eol;

/// All tunable parameters of a conversion run.
#[derive(Clone, Debug)]
pub struct Prefs {
    /// Input-encoding selection: an explicit label, or guessing with a
    /// fallback label.
    pub source: SourceEncoding,
    /// Target-encoding label. Resolved against the registry at use time.
    pub target: String,
    /// Line-ending convention written to the output.
    pub eol: Eol,
    /// Convert line endings only, leaving the encoding untouched.
    pub eol_only: bool,
    /// Replace existing destinations without asking. Default: false.
    pub overwrite: bool,
    /// Descend into directories named on the command line.
    pub recursive: bool,
    /// Follow symbolic links instead of skipping them.
    pub follow_links: bool,
    /// Include dot-entries met during recursion (explicitly named
    /// dotfiles are always processed).
    pub dotfiles: bool,
    /// Output path template; `#` stands for the full input path.
    /// `None` converts in place.
    pub out_template: Option<String>,
    /// Locale-derived guess candidates, strongest first.
    pub locale_candidates: Vec<String>,
}

impl Default for Prefs {
    fn default() -> Self {
        Prefs {
            source: SourceEncoding::Explicit("utf-8".to_owned()),
            target: "utf-8".to_owned(),
            eol: Eol::platform_default(),
            eol_only: false,
            overwrite: false,
            recursive: false,
            follow_links: false,
            dotfiles: false,
            out_template: None,
            locale_candidates: Vec::new(),
        }
    }
}

impl Prefs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Selects an explicit input encoding.
    pub fn set_source_encoding(&mut self, label: &str) {
        self.source = SourceEncoding::Explicit(label.to_owned());
    }

    /// Switches the input side to guessing; `fallback` covers detection
    /// failure.
    pub fn set_source_guess(&mut self, fallback: &str) {
        self.source = SourceEncoding::Guess {
            fallback: fallback.to_owned(),
        };
    }

    /// Sets the target-encoding label. Returns the stored label.
    pub fn set_target_encoding(&mut self, label: &str) -> &str {
        self.target = label.to_owned();
        &self.target
    }

    /// Sets the output line-ending convention. Returns the new value.
    pub fn set_eol(&mut self, eol: Eol) -> Eol {
        self.eol = eol;
        eol
    }

    /// Enables or disables EOL-only mode. Returns the new value.
    pub fn set_eol_only(&mut self, yes: bool) -> bool {
        self.eol_only = yes;
        yes
    }

    /// Enables or disables unprompted destination overwrite. Returns the
    /// new value.
    pub fn set_overwrite(&mut self, yes: bool) -> bool {
        self.overwrite = yes;
        yes
    }

    /// Enables or disables directory recursion. Returns the new value.
    pub fn set_recursive(&mut self, yes: bool) -> bool {
        self.recursive = yes;
        yes
    }

    /// Enables or disables symlink following. Returns the new value.
    pub fn set_follow_links(&mut self, yes: bool) -> bool {
        self.follow_links = yes;
        yes
    }

    /// Enables or disables dot-entry processing during recursion. Returns
    /// the new value.
    pub fn set_dotfiles(&mut self, yes: bool) -> bool {
        self.dotfiles = yes;
        yes
    }

    /// Sets the output path template. Passing `None` restores in-place
    /// conversion. Returns true if an explicit output is now active.
    pub fn set_out_template(&mut self, template: Option<&str>) -> bool {
        self.out_template = template.map(|s| s.to_owned());
        self.out_template.is_some()
    }

    /// Expands the output template for one input file: every `#` becomes
    /// the full input path. `None` means convert in place.
    pub fn out_path_for(&self, src: &str) -> Option<String> {
        self.out_template
            .as_ref()
            .map(|template| template.replace('#', src))
    }
}
