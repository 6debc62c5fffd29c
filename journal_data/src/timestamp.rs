use std::{
    fmt,
    path::{Path, PathBuf},
    sync::LazyLock,
};

use chrono::NaiveDateTime;
use regex::Regex;

use crate::NOTE_EXTENSION;

/// `YYYYMMDDHHMMSS.md`, anchored on both ends. `[0-9]` instead of `\d`, which would also accept
/// non-ASCII digits.
static NOTE_FILENAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]{4})([0-9]{2})([0-9]{2})([0-9]{2})([0-9]{2})([0-9]{2})\.md$")
        .expect("note filename pattern should be a valid regex")
});

/// The timestamp embedded in a note file name.
///
/// Segments are kept exactly as they appear in the name. Nothing checks that they form a real date:
/// `20241399000000.md` has month `13` and day `99`, and that is what ends up in the journal path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NoteTimestamp {
    /// the 14 digits, `YYYYMMDDHHMMSS`
    digits: String,
}

impl NoteTimestamp {
    /// Returns `None` unless `file_name` is exactly 14 ASCII digits followed by `.md`.
    pub fn parse(file_name: &str) -> Option<Self> {
        let captures = NOTE_FILENAME_RE.captures(file_name)?;
        let digits = captures
            .iter()
            .skip(1)
            .flatten()
            .map(|segment| segment.as_str())
            .collect::<String>();
        Some(Self { digits })
    }

    pub fn year(&self) -> &str {
        &self.digits[0..4]
    }

    pub fn month(&self) -> &str {
        &self.digits[4..6]
    }

    pub fn day(&self) -> &str {
        &self.digits[6..8]
    }

    pub fn hour(&self) -> &str {
        &self.digits[8..10]
    }

    pub fn minute(&self) -> &str {
        &self.digits[10..12]
    }

    pub fn second(&self) -> &str {
        &self.digits[12..14]
    }

    /// `<root>/<year>/<month>/<day>`
    pub fn day_dir(&self, root: impl AsRef<Path>) -> PathBuf {
        root.as_ref().join(self.year()).join(self.month()).join(self.day())
    }

    /// Where a note named `file_name` with this timestamp belongs below `root`.
    pub fn destination(&self, root: impl AsRef<Path>, file_name: &str) -> PathBuf {
        self.day_dir(root).join(file_name)
    }

    /// Calendar reading of the timestamp, `None` for things like month `13` or `23:61:00`.
    ///
    /// Only used for diagnostics, the journal layout never depends on it.
    pub fn to_datetime(&self) -> Option<NaiveDateTime> {
        NaiveDateTime::parse_from_str(&self.digits, "%Y%m%d%H%M%S").ok()
    }
}

/// Renders the canonical note file name.
impl fmt::Display for NoteTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{NOTE_EXTENSION}", self.digits)
    }
}
