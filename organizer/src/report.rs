use std::{
    io::{self, Write},
    path::Path,
};

use journal_data::{FileOutcome, Reporter, Summary};
use tracing::error;

/// Writes one human-readable line per event, e.g. to stdout.
pub struct ConsoleReporter<W: Write> {
    out: W,
}

impl ConsoleReporter<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> ConsoleReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, line: std::fmt::Arguments<'_>) {
        // a closed stdout must not stop notes from being moved
        if let Err(e) = writeln!(self.out, "{line}") {
            error!(?e, "writing report line");
        }
    }
}

impl<W: Write> Reporter for ConsoleReporter<W> {
    fn inbox_missing(&mut self, inbox: &Path) {
        self.line(format_args!("Inbox directory {} does not exist", inbox.display()));
    }

    fn file(&mut self, outcome: &FileOutcome) {
        match outcome {
            FileOutcome::Moved { name, to, .. } => {
                self.line(format_args!("Moved {name} to {}", to.display()))
            }
            FileOutcome::WouldMove { name, to, .. } => {
                self.line(format_args!("Would move {name} to {}", to.display()))
            }
            FileOutcome::Skipped { name, reason } => {
                self.line(format_args!("Skipping {name} - {reason}"))
            }
            FileOutcome::Failed { name, error } => {
                self.line(format_args!("Error moving {name}: {error}"))
            }
            FileOutcome::Unreadable { error } => {
                self.line(format_args!("Error reading inbox entry: {error}"))
            }
        }
    }

    fn finished(&mut self, summary: &Summary) {
        let verb = if summary.dry_run { "Would move" } else { "Successfully moved" };
        self.line(format_args!("{verb} {} files", summary.moved));
        if summary.skipped > 0 || summary.failed > 0 {
            self.line(format_args!("({} skipped, {} failed)", summary.skipped, summary.failed));
        }
    }
}

#[allow(non_snake_case)]
#[cfg(test)]
mod test {
    use std::{io, path::PathBuf};

    use journal_data::{MoveError, SkipReason};

    use super::*;

    fn output(events: impl FnOnce(&mut ConsoleReporter<Vec<u8>>)) -> String {
        let mut reporter = ConsoleReporter::new(Vec::new());
        events(&mut reporter);
        String::from_utf8_lossy(&reporter.into_inner()).into_owned()
    }

    #[test]
    fn ConsoleReporter__lines() {
        let out = output(|r| {
            r.file(&FileOutcome::Moved {
                name: "20240103153045.md".into(),
                from: "/in/20240103153045.md".into(),
                to: "/journal/2024/01/03/20240103153045.md".into(),
            });
            r.file(&FileOutcome::Skipped {
                name: "notes.md".into(),
                reason: SkipReason::PatternMismatch,
            });
            r.file(&FileOutcome::Failed {
                name: "20240101000000.md".into(),
                error: MoveError::Move {
                    from: PathBuf::from("/in/20240101000000.md"),
                    to: PathBuf::from("/journal/2024/01/01/20240101000000.md"),
                    source: io::Error::other("permission denied"),
                },
            });
            r.finished(&Summary {
                moved: 1,
                skipped: 1,
                failed: 1,
                dry_run: false,
            });
        });
        assert_eq!(
            out,
            "Moved 20240103153045.md to /journal/2024/01/03/20240103153045.md\n\
             Skipping notes.md - doesn't match pattern YYYYMMDDHHMMSS.md\n\
             Error moving 20240101000000.md: permission denied\n\
             Successfully moved 1 files\n\
             (1 skipped, 1 failed)\n"
        );
    }

    #[test]
    fn ConsoleReporter__inbox_missing() {
        let out = output(|r| r.inbox_missing(Path::new("/data/inbox")));
        assert_eq!(out, "Inbox directory /data/inbox does not exist\n");
    }

    #[test]
    fn ConsoleReporter__dry_run_summary() {
        let out = output(|r| {
            r.finished(&Summary {
                moved: 2,
                dry_run: true,
                ..Summary::default()
            })
        });
        assert_eq!(out, "Would move 2 files\n");
    }
}
