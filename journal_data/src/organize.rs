use std::{
    fs::{self, DirEntry},
    io::{self, ErrorKind},
    path::{Path, PathBuf},
};

use derive_builder::Builder;
use derive_more::derive::Display;
use tracing::{debug, info, instrument, warn};

use crate::{conflict::Resolution, ConflictPolicy, NoteTimestamp, Reporter, NOTE_EXTENSION};

/// Moves `YYYYMMDDHHMMSS.md` notes from a flat inbox into `<journal>/YYYY/MM/DD/`.
///
/// ```no_run
/// # use journal_data::OrganizerBuilder;
/// let organizer = OrganizerBuilder::default()
///     .inbox_dir("/data/inbox")
///     .journal_dir("/data/journal")
///     .build()?;
/// organizer.run(())?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Builder)]
#[builder(setter(into))]
pub struct Organizer {
    inbox_dir: PathBuf,
    journal_dir: PathBuf,
    #[builder(default)]
    on_conflict: ConflictPolicy,
    /// Report what would happen, touch nothing.
    #[builder(default)]
    dry_run: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Run {
    /// The inbox doesn't exist. Nothing was created or moved.
    InboxMissing,
    Completed(Summary),
}

impl Run {
    /// Files moved (or planned to be, in a dry run); zero if the inbox was missing.
    pub fn moved(&self) -> usize {
        match self {
            Run::InboxMissing => 0,
            Run::Completed(summary) => summary.moved,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub moved: usize,
    pub skipped: usize,
    pub failed: usize,
    pub dry_run: bool,
}

impl Summary {
    fn record(&mut self, outcome: &FileOutcome) {
        match outcome {
            FileOutcome::Moved { .. } | FileOutcome::WouldMove { .. } => self.moved += 1,
            FileOutcome::Skipped { .. } => self.skipped += 1,
            FileOutcome::Failed { .. } | FileOutcome::Unreadable { .. } => self.failed += 1,
        }
    }
}

#[derive(Debug)]
pub enum FileOutcome {
    Moved { name: String, from: PathBuf, to: PathBuf },
    WouldMove { name: String, from: PathBuf, to: PathBuf },
    Skipped { name: String, reason: SkipReason },
    Failed { name: String, error: MoveError },
    /// `read_dir` handed us an error instead of an entry, so there is no name to report.
    Unreadable { error: io::Error },
}

impl FileOutcome {
    pub fn name(&self) -> Option<&str> {
        match self {
            FileOutcome::Moved { name, .. }
            | FileOutcome::WouldMove { name, .. }
            | FileOutcome::Skipped { name, .. }
            | FileOutcome::Failed { name, .. } => Some(name),
            FileOutcome::Unreadable { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum SkipReason {
    #[display("doesn't match pattern YYYYMMDDHHMMSS.md")]
    PatternMismatch,
    #[display("not a regular file")]
    NotAFile,
    #[display("{} already exists", _0.display())]
    DestinationExists(PathBuf),
}

/// A single note could not be moved. The run carries on with the next one.
#[derive(Debug, thiserror::Error)]
pub enum MoveError {
    #[error("inspecting {}: {source}", .path.display())]
    Inspect { path: PathBuf, source: io::Error },
    #[error("creating {}: {source}", .path.display())]
    CreateDir { path: PathBuf, source: io::Error },
    #[error("{source}")]
    Move { from: PathBuf, to: PathBuf, source: io::Error },
}

/// The run could not start at all.
#[derive(Debug, thiserror::Error)]
pub enum OrganizeError {
    #[error("creating journal directory {}", .path.display())]
    CreateJournal { path: PathBuf, source: io::Error },
    #[error("listing inbox {}", .path.display())]
    ReadInbox { path: PathBuf, source: io::Error },
}

impl Organizer {
    pub fn inbox_dir(&self) -> &Path {
        &self.inbox_dir
    }

    pub fn journal_dir(&self) -> &Path {
        &self.journal_dir
    }

    /// One pass over the inbox. Per-note failures end up in the [`Summary`]; only a journal root
    /// that can't be created or an inbox that can't be listed abort the run.
    #[instrument(skip_all, fields(inbox = %self.inbox_dir.display(), journal = %self.journal_dir.display()))]
    pub fn run(&self, mut reporter: impl Reporter) -> Result<Run, OrganizeError> {
        if !self.inbox_dir.is_dir() {
            info!("inbox does not exist, nothing to do");
            reporter.inbox_missing(&self.inbox_dir);
            return Ok(Run::InboxMissing);
        }

        if !self.dry_run {
            fs::create_dir_all(&self.journal_dir).map_err(|source| OrganizeError::CreateJournal {
                path: self.journal_dir.clone(),
                source,
            })?;
        }

        let mut summary = Summary {
            dry_run: self.dry_run,
            ..Summary::default()
        };
        for entry in self.notes()? {
            let outcome = self.process(entry);
            summary.record(&outcome);
            reporter.file(&outcome);
        }
        info!(?summary, "finished");
        reporter.finished(&summary);

        Ok(Run::Completed(summary))
    }

    /// Inbox entries whose name ends in `.md`, in whatever order the filesystem lists them.
    ///
    /// Lazy: each entry is read when the previous one has been processed.
    pub fn notes(&self) -> Result<impl Iterator<Item = io::Result<DirEntry>>, OrganizeError> {
        let entries = fs::read_dir(&self.inbox_dir).map_err(|source| OrganizeError::ReadInbox {
            path: self.inbox_dir.clone(),
            source,
        })?;
        Ok(entries.filter(|entry| match entry {
            Ok(entry) => entry.file_name().to_string_lossy().ends_with(NOTE_EXTENSION),
            // can't tell, let `process` report it
            Err(_) => true,
        }))
    }

    pub fn process(&self, entry: io::Result<DirEntry>) -> FileOutcome {
        let entry = match entry {
            Ok(entry) => entry,
            Err(error) => {
                warn!(%error, "unreadable inbox entry");
                return FileOutcome::Unreadable { error };
            }
        };
        let name = entry.file_name().to_string_lossy().into_owned();
        let from = entry.path();

        let Some(timestamp) = NoteTimestamp::parse(&name) else {
            debug!(%name, "no timestamp");
            return FileOutcome::Skipped {
                name,
                reason: SkipReason::PatternMismatch,
            };
        };
        match entry.file_type() {
            Ok(file_type) if file_type.is_dir() => {
                return FileOutcome::Skipped {
                    name,
                    reason: SkipReason::NotAFile,
                }
            }
            Ok(_) => {}
            Err(source) => {
                return FileOutcome::Failed {
                    name,
                    error: MoveError::Inspect { path: from, source },
                }
            }
        }
        if timestamp.to_datetime().is_none() {
            warn!(%name, "timestamp is not a calendar date, filing it literally");
        }

        let to = match self.on_conflict.resolve(&timestamp.destination(&self.journal_dir, &name)) {
            Resolution::Use(to) => to,
            Resolution::Skip(existing) => {
                debug!(%name, ?existing, "destination taken");
                return FileOutcome::Skipped {
                    name,
                    reason: SkipReason::DestinationExists(existing),
                };
            }
        };

        if self.dry_run {
            return FileOutcome::WouldMove { name, from, to };
        }

        let day_dir = timestamp.day_dir(&self.journal_dir);
        if let Err(source) = fs::create_dir_all(&day_dir) {
            warn!(%name, %source, "could not create day directory");
            return FileOutcome::Failed {
                name,
                error: MoveError::CreateDir { path: day_dir, source },
            };
        }
        match move_file(&from, &to) {
            Ok(()) => {
                debug!(%name, ?to, "moved");
                FileOutcome::Moved { name, from, to }
            }
            Err(source) => {
                warn!(%name, %source, "move failed");
                FileOutcome::Failed {
                    name,
                    error: MoveError::Move { from, to, source },
                }
            }
        }
    }
}

/// `rename`, or copy + delete when `from` and `to` live on different filesystems.
fn move_file(from: &Path, to: &Path) -> io::Result<()> {
    match fs::rename(from, to) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::CrossesDevices => {
            debug!(?from, ?to, "crossing filesystems, copying instead");
            fs::copy(from, to)?;
            fs::remove_file(from)
        }
        Err(e) => Err(e),
    }
}

#[allow(non_snake_case)]
#[cfg(test)]
mod test {
    use color_eyre::Result;

    use super::*;

    #[test]
    fn move_file__same_filesystem() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let from = dir.path().join("a.md");
        let to = dir.path().join("b.md");
        fs::write(&from, "content")?;

        move_file(&from, &to)?;

        assert!(!from.exists());
        assert_eq!(fs::read_to_string(&to)?, "content");
        Ok(())
    }

    #[test]
    fn move_file__missing_source() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let result = move_file(&dir.path().join("nope.md"), &dir.path().join("b.md"));
        assert_eq!(result.map_err(|e| e.kind()), Err(ErrorKind::NotFound));
        Ok(())
    }

    #[test]
    fn Summary__record() {
        let mut summary = Summary::default();
        summary.record(&FileOutcome::Moved {
            name: "20240101000000.md".into(),
            from: "a".into(),
            to: "b".into(),
        });
        summary.record(&FileOutcome::Skipped {
            name: "notes.md".into(),
            reason: SkipReason::PatternMismatch,
        });
        summary.record(&FileOutcome::Unreadable {
            error: io::Error::other("boom"),
        });
        assert_eq!(
            summary,
            Summary {
                moved: 1,
                skipped: 1,
                failed: 1,
                dry_run: false
            }
        );
    }

    #[test]
    fn SkipReason__display() {
        assert_eq!(
            SkipReason::PatternMismatch.to_string(),
            "doesn't match pattern YYYYMMDDHHMMSS.md"
        );
        assert_eq!(
            SkipReason::DestinationExists("/j/2024/01/01/20240101000000.md".into()).to_string(),
            "/j/2024/01/01/20240101000000.md already exists"
        );
    }

    #[test]
    fn OrganizerBuilder__missing_paths() {
        assert!(OrganizerBuilder::default().inbox_dir("/tmp/in").build().is_err());
        let organizer = OrganizerBuilder::default()
            .inbox_dir("/tmp/in")
            .journal_dir("/tmp/journal")
            .build();
        assert!(organizer.is_ok_and(|o| o.on_conflict == ConflictPolicy::Overwrite && !o.dry_run));
    }
}
