pub mod conflict;
pub mod organize;
pub mod report;
pub mod timestamp;

pub use conflict::{ConflictPolicy, Resolution};
pub use organize::{
    FileOutcome, MoveError, OrganizeError, Organizer, OrganizerBuilder, OrganizerBuilderError, Run,
    SkipReason, Summary,
};
pub use report::Reporter;
pub use timestamp::NoteTimestamp;

pub const DEFAULT_INBOX_DIR: &str = "/data/inbox";
pub const DEFAULT_JOURNAL_DIR: &str = "/data/journal";

/// Extension every note file carries, including the dot.
pub const NOTE_EXTENSION: &str = ".md";
