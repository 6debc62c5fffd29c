use std::path::PathBuf;

use clap::Parser;
use journal_data::ConflictPolicy;
use tracing::Level;

/// Move `YYYYMMDDHHMMSS.md` notes from the inbox into the `YYYY/MM/DD` journal tree.
///
/// Flags override `ORGANIZER_*` environment variables, which override the config file.
#[derive(Debug, Clone, PartialEq, Parser)]
#[command(version)]
pub struct Args {
    /// Directory holding new notes [default: /data/inbox]
    #[arg(long)]
    pub inbox: Option<PathBuf>,

    /// Root of the journal tree [default: /data/journal]
    #[arg(long)]
    pub journal: Option<PathBuf>,

    /// What to do when a note's journal path is taken: overwrite, skip or rename [default: overwrite]
    #[arg(long)]
    pub on_conflict: Option<ConflictPolicy>,

    /// Only print what would be moved
    #[arg(long)]
    pub dry_run: bool,

    /// Exit with an error if any note could not be moved
    #[arg(long)]
    pub fail_on_error: bool,

    /// TOML config file (default: `config/organizer.toml`, if present)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Diagnostics on stderr, e.g. `debug`
    #[arg(long, default_value_t = Level::WARN)]
    pub log_level: Level,
}

#[allow(non_snake_case)]
#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn Args__parse__defaults() {
        let args = Args::try_parse_from(["organizer"]).expect("no flags should parse");
        assert_eq!(args.inbox, None);
        assert_eq!(args.on_conflict, None);
        assert!(!args.dry_run);
        assert_eq!(args.log_level, Level::WARN);
    }

    #[test]
    fn Args__parse__all_flags() {
        let args = Args::try_parse_from([
            "organizer",
            "--inbox",
            "/tmp/in",
            "--journal",
            "/tmp/journal",
            "--on-conflict",
            "rename",
            "--dry-run",
            "--fail-on-error",
            "--log-level",
            "debug",
        ])
        .expect("flags should parse");
        assert_eq!(args.inbox, Some(PathBuf::from("/tmp/in")));
        assert_eq!(args.journal, Some(PathBuf::from("/tmp/journal")));
        assert_eq!(args.on_conflict, Some(ConflictPolicy::Rename));
        assert!(args.dry_run && args.fail_on_error);
        assert_eq!(args.log_level, Level::DEBUG);
    }

    #[test]
    fn Args__parse__bad_policy() {
        assert!(Args::try_parse_from(["organizer", "--on-conflict", "merge"]).is_err());
    }
}
