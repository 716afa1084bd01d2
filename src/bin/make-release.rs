use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use release_tools::config;
use release_tools::git::SystemGit;
use release_tools::logging;
use release_tools::release::{self, ReleaseArgs};
use release_tools::ui;

#[derive(clap::Parser)]
#[command(
    name = "make-release",
    version,
    about = "Compute the next release revision from git tags, commit the version file and tag it"
)]
struct Args {
    #[arg(short, long, default_value = "", help = "Use the specified revision for the new version")]
    revision: String,

    #[arg(short, long, default_value = "", help = "Use msg as the commit message")]
    message: String,

    #[arg(short, long, help = "Alternative configuration file instead of version.in")]
    config: Option<PathBuf>,

    #[arg(short, long, help = "Show debugging information")]
    debug: bool,
}

fn run(args: Args) -> Result<()> {
    let work_dir = std::env::current_dir().context("Can't determine current directory")?;
    let now = chrono::Utc::now();

    let config = config::load_config(args.config.as_deref(), &work_dir)?;
    let repo = SystemGit::open(&work_dir);

    let release_args = ReleaseArgs {
        work_dir,
        revision: args.revision,
        message: args.message,
    };
    let outcome = release::run_release(&repo, &release_args, &config, now)?;

    if outcome.resolution.re_release {
        ui::display_status(&format!(
            "re-releasing {} on the day it was tagged",
            outcome.tag_name()
        ));
    }
    for warning in &outcome.warnings {
        ui::display_boundary_warning(warning);
    }
    ui::display_release(
        &outcome.project,
        &outcome.version(),
        outcome.tag_name(),
        outcome.amended,
    );
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    logging::init(args.debug);

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            ui::display_error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}
