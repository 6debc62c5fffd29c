use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment, File};
use journal_data::{ConflictPolicy, DEFAULT_INBOX_DIR, DEFAULT_JOURNAL_DIR};
use serde::Deserialize;

use crate::cli::Args;

const DEFAULT_CONFIG_FILE: &str = "config/organizer";
const ENV_PREFIX: &str = "organizer";

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Settings {
    pub inbox_dir: PathBuf,
    pub journal_dir: PathBuf,
    pub on_conflict: ConflictPolicy,
    pub dry_run: bool,
    pub fail_on_error: bool,
}

impl Settings {
    /// Defaults, then the config file, then `ORGANIZER_*` variables, then command-line flags.
    pub fn new(args: &Args) -> Result<Self, ConfigError> {
        Self::load(args, Environment::with_prefix(ENV_PREFIX))
    }

    fn load(args: &Args, environment: Environment) -> Result<Self, ConfigError> {
        let file = match &args.config {
            Some(path) => File::from(path.as_path()).required(true),
            None => File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        let mut builder = Config::builder()
            .set_default("inbox_dir", DEFAULT_INBOX_DIR)?
            .set_default("journal_dir", DEFAULT_JOURNAL_DIR)?
            .set_default("on_conflict", ConflictPolicy::default().to_string())?
            .set_default("dry_run", false)?
            .set_default("fail_on_error", false)?
            .add_source(file)
            .add_source(environment)
            .set_override_option("inbox_dir", args.inbox.as_deref().map(path_value))?
            .set_override_option("journal_dir", args.journal.as_deref().map(path_value))?
            .set_override_option("on_conflict", args.on_conflict.map(|p| p.to_string()))?;
        // flags can only switch these on
        if args.dry_run {
            builder = builder.set_override("dry_run", true)?;
        }
        if args.fail_on_error {
            builder = builder.set_override("fail_on_error", true)?;
        }

        builder.build()?.try_deserialize()
    }
}

fn path_value(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
