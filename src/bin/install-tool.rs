use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use release_tools::install::{self, InstallRequest, Stamp};
use release_tools::logging;
use release_tools::ui;

/// Exit code when the configuration or source cannot be accessed at all
const FATAL_EXIT: u8 = 2;

#[derive(clap::Parser)]
#[command(
    name = "install-tool",
    version,
    about = "Install a built file into a versioned tree according to install.cfg"
)]
struct Args {
    #[arg(help = "The file to be installed")]
    source: PathBuf,

    #[arg(help = "The solution level directory where install.cfg is found")]
    root: PathBuf,

    #[arg(help = "Alternative configuration file instead of <root>/install.cfg")]
    config_file: Option<PathBuf>,

    #[arg(short, long, help = "Show debugging information")]
    debug: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    logging::init(args.debug);

    let request = InstallRequest {
        source: args.source,
        root: args.root,
        config: args.config_file,
    };

    match install::install(&request, &Stamp::now()) {
        Ok(report) if report.success() => ExitCode::SUCCESS,
        Ok(report) => {
            tracing::debug!(failed = report.failed.len(), "some rules failed");
            ExitCode::FAILURE
        }
        Err(e) => {
            ui::display_error(&e.to_string());
            ExitCode::from(FATAL_EXIT)
        }
    }
}
