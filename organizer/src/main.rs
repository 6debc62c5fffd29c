mod cli;
mod config;
mod report;

use clap::Parser as _;
use color_eyre::{
    eyre::{bail, Context},
    Result,
};
use journal_data::{OrganizerBuilder, Run};
use tracing::{info, Level};

use crate::{cli::Args, config::Settings, report::ConsoleReporter};

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    register_logging(args.log_level)?;

    let settings = read_config(&args)?;
    let Settings {
        inbox_dir,
        journal_dir,
        on_conflict,
        dry_run,
        fail_on_error,
    } = settings;

    let organizer = OrganizerBuilder::default()
        .inbox_dir(inbox_dir)
        .journal_dir(journal_dir)
        .on_conflict(on_conflict)
        .dry_run(dry_run)
        .build()?;

    let run = organizer
        .run(ConsoleReporter::stdout())
        .wrap_err("organizing inbox")?;

    if let Run::Completed(summary) = run {
        if fail_on_error && summary.failed > 0 {
            bail!("{} note(s) could not be moved", summary.failed);
        }
    }
    Ok(())
}

fn register_logging(level: Level) -> Result<()> {
    // report lines own stdout
    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .finish();

    tracing::subscriber::set_global_default(subscriber).wrap_err("setting default subscriber failed")
}

fn read_config(args: &Args) -> Result<Settings> {
    info!("Loading config");
    let settings = Settings::new(args).wrap_err("parsing config")?;
    info!(?settings, "config loaded");
    Ok(settings)
}
