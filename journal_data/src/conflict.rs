use std::{
    path::{Path, PathBuf},
    str::FromStr,
};

use derive_more::derive::Display;
use serde::Deserialize;

/// What to do when a note's journal path is already taken.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, Deserialize)]
#[serde(try_from = "String")]
pub enum ConflictPolicy {
    /// Let the rename replace the existing file.
    #[default]
    #[display("overwrite")]
    Overwrite,
    /// Leave the note in the inbox.
    #[display("skip")]
    Skip,
    /// Move it next to the existing one as `<stem>-<n>.md`.
    #[display("rename")]
    Rename,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown conflict policy `{0}` (expected overwrite, skip or rename)")]
pub struct ParseConflictPolicyError(String);

impl FromStr for ConflictPolicy {
    type Err = ParseConflictPolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "overwrite" => Ok(Self::Overwrite),
            "skip" => Ok(Self::Skip),
            "rename" => Ok(Self::Rename),
            _ => Err(ParseConflictPolicyError(s.to_owned())),
        }
    }
}

impl TryFrom<String> for ConflictPolicy {
    type Error = ParseConflictPolicyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Move the note here.
    Use(PathBuf),
    /// Don't move; this file is already in the way.
    Skip(PathBuf),
}

impl ConflictPolicy {
    /// Decide the final destination for a note whose natural destination is `destination`.
    ///
    /// Only looks at the filesystem, never changes it. Between this and the actual move another
    /// process could still create the file.
    pub fn resolve(self, destination: &Path) -> Resolution {
        if !destination.exists() {
            return Resolution::Use(destination.to_path_buf());
        }
        match self {
            Self::Overwrite => Resolution::Use(destination.to_path_buf()),
            Self::Skip => Resolution::Skip(destination.to_path_buf()),
            Self::Rename => Resolution::Use(next_free_name(destination)),
        }
    }
}

/// `dir/name.md` -> first of `dir/name-1.md`, `dir/name-2.md`, ... that doesn't exist.
fn next_free_name(destination: &Path) -> PathBuf {
    let stem = destination
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let extension = destination
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();

    (1u64..)
        .map(|n| destination.with_file_name(format!("{stem}-{n}{extension}")))
        .find(|candidate| !candidate.exists())
        .unwrap_or_else(|| destination.to_path_buf())
}
